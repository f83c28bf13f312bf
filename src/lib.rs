//! Retok: source-range repair and re-tokenization for cursor-based C++ AST
//! providers.
//!
//! The provider's reported "extent" for a declaration is frequently wrong:
//! function extents drag the body along when only the signature is wanted,
//! trailing semicolons are dropped, template default-argument expressions are
//! truncated, type-alias extents stop short of the full declaration. This
//! crate reconstructs an exact, self-consistent token range for each entity
//! kind despite those defects, then materializes it as an ordered, owned
//! token sequence.
//!
//! # Architecture
//!
//! Intelligence lives in range acquisition, not in lexing: the repair engine
//! ([`repaired_extent`]) corrects a cursor's reported extent using only local
//! one-token lookahead probes, and [`CursorTokens`] re-lexes the corrected
//! range once and copies the result out of the provider's buffer. The
//! provider itself sits behind the [`TranslationUnit`] trait; this crate
//! never parses C++.
//!
//! # Resource discipline
//!
//! Provider token buffers are single-owner: [`RangeTokens`] acquires one on
//! construction and releases it exactly once on drop, on every exit path,
//! including the per-call buffers of the [`token_after_is`] lookahead probe.
//! Owned [`Token`] values are copied out before a buffer is released; raw
//! handles never cross the crate boundary.
//!
//! # Example
//!
//! ```
//! use retok::mock::ScriptedUnit;
//! use retok::{CursorKind, CursorTokens};
//!
//! // A function definition whose reported extent wrongly includes the body.
//! let source = "int f() { return 1; }";
//! let mut unit = ScriptedUnit::new(source);
//! let cursor = unit.add_cursor(CursorKind::Function, 0, source.len());
//! unit.add_child(&cursor, CursorKind::CompoundStmt, 8, source.len());
//!
//! let tokens = CursorTokens::new(&unit, &(), &cursor);
//! assert_eq!(tokens.spellings(), vec!["int", "f", "(", ")"]);
//! ```

pub mod entity;
pub mod extent;
pub mod mock;
pub mod provider;
pub mod token;
pub mod tokenize;

// Re-exports
pub use entity::{
    CppExpression, CppType, Entity, EntityId, EntityIndex, EntityKind, Function,
    FunctionParameter, IndexError,
};
pub use extent::{next_location, repaired_extent, token_after_is};
pub use provider::{CursorKind, SourceRange, TokenKind, TranslationUnit, Visit};
pub use token::Token;
pub use tokenize::{CursorTokens, RangeTokens};
