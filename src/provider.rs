//! The external AST provider boundary.
//!
//! This crate never talks to a parser directly. Everything it needs from the
//! provider (locations, cursors, reported extents, range lexing) comes in
//! through the [`TranslationUnit`] trait, so the corrective logic in
//! [`crate::extent`] stays independent of any concrete binding. A libclang
//! binding implements this trait over its handles; the test suite implements
//! it over a scripted in-memory unit ([`crate::mock::ScriptedUnit`]).

/// Syntactic kind of a cursor, as reported by the provider.
///
/// Closed set: the repair rules are provider-version-specific and dispatch
/// over exactly these kinds. Anything the engine has no rule for maps to
/// [`CursorKind::Other`] and passes through unrepaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Function,
    Method,
    Constructor,
    Destructor,
    ConversionFunction,
    FunctionTemplate,
    TemplateTypeParameter,
    NonTypeTemplateParameter,
    TemplateTemplateParameter,
    Parameter,
    TypeAlias,
    CompoundStmt,
    TryStmt,
    InitListExpr,
    Other,
}

impl CursorKind {
    /// Kinds whose extent must never include a body, try-block, or
    /// initializer list.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            CursorKind::Function
                | CursorKind::Method
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction
        )
    }

    /// Template parameters and ordinary function parameters.
    pub fn is_parameter(self) -> bool {
        matches!(
            self,
            CursorKind::TemplateTypeParameter
                | CursorKind::NonTypeTemplateParameter
                | CursorKind::TemplateTemplateParameter
                | CursorKind::Parameter
        )
    }
}

/// Lexical class of a raw provider token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Punctuation,
    Keyword,
    Identifier,
    Literal,
    Comment,
}

/// Control flow for the single-level child visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Break,
}

/// An ordered pair of locations within one file.
///
/// Half-open: `end` is the first location *not* included, and the range
/// lexer consumes accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRange<L> {
    pub begin: L,
    pub end: L,
}

impl<L> SourceRange<L> {
    pub fn new(begin: L, end: L) -> Self {
        Self { begin, end }
    }
}

/// A parsed translation unit plus every provider operation this crate
/// consumes.
///
/// Handle types are opaque to the crate: locations are only ever compared,
/// cloned, and converted to/from numeric offsets; cursors are only queried
/// for kind, extent, and direct children. Token buffers are provider-owned
/// and must be given back through [`TranslationUnit::dispose_tokens`]
/// exactly once; [`crate::tokenize::RangeTokens`] is the sole caller.
pub trait TranslationUnit {
    /// Handle for the file a cursor lives in.
    type File;
    /// Opaque point in a file's text.
    type Location: Clone;
    /// Handle for one AST node plus its syntactic kind.
    type Cursor: Clone;
    /// Provider-owned array of raw tokens.
    type TokenBuffer;

    /// Resolve a location to its numeric offset within its file.
    fn location_offset(&self, loc: &Self::Location) -> usize;

    /// Inverse of [`TranslationUnit::location_offset`]. Offsets outside the
    /// file are a provider-level failure.
    fn location_for_offset(&self, file: &Self::File, offset: usize) -> Self::Location;

    /// The cursor's own syntactic kind.
    fn cursor_kind(&self, cursor: &Self::Cursor) -> CursorKind;

    /// For a template cursor, the kind of the underlying templated entity;
    /// [`CursorKind::Other`] when the cursor is not a template.
    fn template_cursor_kind(&self, cursor: &Self::Cursor) -> CursorKind;

    /// The provider-reported extent. Frequently wrong; see [`crate::extent`].
    fn cursor_extent(&self, cursor: &Self::Cursor) -> SourceRange<Self::Location>;

    /// Visit the cursor's direct children in order, stopping early when the
    /// callback returns [`Visit::Break`]. Single level, never recursive.
    fn visit_children<F>(&self, cursor: &Self::Cursor, f: F)
    where
        F: FnMut(&Self::Cursor) -> Visit;

    /// Lex exactly the given range into a provider-owned token buffer.
    fn tokenize(&self, range: &SourceRange<Self::Location>) -> Self::TokenBuffer;

    /// Number of raw tokens in a buffer.
    fn token_count(&self, buffer: &Self::TokenBuffer) -> usize;

    /// Spelling of the raw token at `index`, copied out of provider storage.
    fn token_spelling(&self, buffer: &Self::TokenBuffer, index: usize) -> String;

    /// Lexical class of the raw token at `index`.
    fn token_kind(&self, buffer: &Self::TokenBuffer, index: usize) -> TokenKind;

    /// Source range the raw token at `index` actually covers. When a lexed
    /// range sat between tokens and was rounded onto a neighbor, this reports
    /// the neighbor's true extent, not the queried range.
    fn token_extent(
        &self,
        buffer: &Self::TokenBuffer,
        index: usize,
    ) -> SourceRange<Self::Location>;

    /// Release a token buffer back to the provider. Called exactly once per
    /// buffer, on every exit path.
    fn dispose_tokens(&self, buffer: Self::TokenBuffer);
}
