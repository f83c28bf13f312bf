//! Owned token values, independent of any provider buffer.

use crate::provider::{TokenKind, TranslationUnit};
use crate::tokenize::RangeTokens;
use std::fmt;

/// An immutable token: owned spelling plus lexical kind.
///
/// Constructed by copying data out of a raw provider token, so it outlives
/// the buffer the raw token came from. Compares directly against string
/// literals, which is how all one-token lookahead checks are written:
///
/// ```
/// use retok::{Token, TokenKind};
///
/// let tok = Token::new(";", TokenKind::Punctuation);
/// assert!(tok == *";");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    spelling: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(spelling: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            spelling: spelling.into(),
            kind,
        }
    }

    /// Copy the raw token at `index` out of a lexed range.
    pub fn from_raw<P: TranslationUnit>(tokens: &RangeTokens<'_, P>, index: usize) -> Self {
        Self {
            spelling: tokens.spelling(index),
            kind: tokens.kind(index),
        }
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.spelling == other
    }
}

impl PartialEq<Token> for str {
    fn eq(&self, other: &Token) -> bool {
        self == other.spelling
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}
