//! Range lexing and the cursor-level tokenizer.
//!
//! [`RangeTokens`] is the scoped owner of one provider token buffer: it lexes
//! exactly one range on construction and gives the buffer back on drop, on
//! every exit path. [`CursorTokens`] combines the extent repair with a single
//! re-lex and copies every raw token into an owned [`Token`] sequence; it is
//! the only place where those two meet.

use crate::extent::repaired_extent;
use crate::provider::{SourceRange, TokenKind, TranslationUnit};
use crate::token::Token;

/// The raw tokens of a single lexed source range.
///
/// Owns the provider-allocated buffer for its whole lifetime; the buffer is
/// released exactly once when this value drops. Raw token handles are never
/// exposed; callers read spellings and kinds, copying what they keep.
///
/// Not `Clone`: the underlying buffer has single-owner semantics.
///
/// # Panics
///
/// Construction panics if the range lexes to zero tokens. Every syntactically
/// valid probe range yields at least the token it was built around, so an
/// empty result means the range was constructed by broken repair logic.
/// That is a programming defect, not a recoverable condition.
pub struct RangeTokens<'tu, P: TranslationUnit> {
    tu: &'tu P,
    buffer: Option<P::TokenBuffer>,
    len: usize,
}

impl<'tu, P: TranslationUnit> RangeTokens<'tu, P> {
    /// Lex exactly `range` and take ownership of the resulting buffer.
    pub fn new(tu: &'tu P, range: &SourceRange<P::Location>) -> Self {
        let buffer = tu.tokenize(range);
        let len = tu.token_count(&buffer);
        assert!(len >= 1, "source range lexed to zero tokens");
        Self {
            tu,
            buffer: Some(buffer),
            len,
        }
    }

    /// Number of raw tokens in the range. Always >= 1.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Spelling of the raw token at `index`, copied out of the buffer.
    pub fn spelling(&self, index: usize) -> String {
        self.tu.token_spelling(self.buffer(), index)
    }

    /// Lexical kind of the raw token at `index`.
    pub fn kind(&self, index: usize) -> TokenKind {
        self.tu.token_kind(self.buffer(), index)
    }

    /// Source range the raw token at `index` actually covers, which may lie
    /// outside the queried range when the provider rounded onto a neighbor.
    pub fn extent(&self, index: usize) -> SourceRange<P::Location> {
        self.tu.token_extent(self.buffer(), index)
    }

    fn buffer(&self) -> &P::TokenBuffer {
        self.buffer
            .as_ref()
            .expect("token buffer present until drop")
    }
}

impl<P: TranslationUnit> Drop for RangeTokens<'_, P> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.tu.dispose_tokens(buffer);
        }
    }
}

/// The finished token sequence of one cursor.
///
/// Construction repairs the cursor's reported extent, re-lexes the corrected
/// range, and wraps every raw token, in source order, into an owned
/// [`Token`]. The provider buffer is released before construction returns;
/// the result borrows nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorTokens {
    tokens: Vec<Token>,
}

impl CursorTokens {
    pub fn new<P: TranslationUnit>(tu: &P, file: &P::File, cursor: &P::Cursor) -> Self {
        let extent = repaired_extent(tu, file, cursor);

        let raw = RangeTokens::new(tu, &extent);
        let mut tokens = Vec::with_capacity(raw.len());
        for i in 0..raw.len() {
            tokens.push(Token::from_raw(&raw, i));
        }

        Self { tokens }
    }

    /// The tokens, in lexical order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Spellings only, for compact assertions and debugging.
    pub fn spellings(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::spelling).collect()
    }
}

impl std::ops::Index<usize> for CursorTokens {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
