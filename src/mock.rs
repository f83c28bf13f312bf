//! A scripted in-memory provider for exercising the repair engine.
//!
//! [`ScriptedUnit`] implements [`TranslationUnit`] over a plain source
//! string: a small C++-shaped lexer supplies the range lexing, while the
//! cursors, their kinds, children, and crucially their *reported extents*
//! are scripted by the test author. Wrong extents are the point: every provider
//! defect the repair engine handles (bodies dragged into function extents,
//! terminators dropped, truncated default arguments) is reproduced here by
//! scripting the extent the real provider would have reported.
//!
//! The unit also counts outstanding token buffers, so tests can prove the
//! acquire/release discipline of [`crate::tokenize::RangeTokens`].

use crate::provider::{CursorKind, SourceRange, TokenKind, TranslationUnit, Visit};
use std::cell::Cell;

const KEYWORDS: &[&str] = &[
    "auto", "bool", "catch", "char", "class", "const", "constexpr", "decltype", "default",
    "delete", "double", "else", "enum", "float", "for", "if", "inline", "int", "long",
    "namespace", "noexcept", "operator", "private", "protected", "public", "return", "short",
    "signed", "sizeof", "static", "struct", "template", "try", "typedef", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "while",
];

// Longest first so maximal munch works with a linear scan.
const PUNCTUATION: &[&str] = &[
    "<<=", ">>=", "...", "->*", "::", "->", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "++", "--",
];

#[derive(Debug, Clone)]
struct LexedToken {
    start: usize,
    end: usize,
    spelling: String,
    kind: TokenKind,
}

#[derive(Debug)]
struct CursorData {
    kind: CursorKind,
    template_kind: CursorKind,
    begin: usize,
    end: usize,
    children: Vec<usize>,
}

/// Opaque cursor handle into a [`ScriptedUnit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCursor(usize);

/// Opaque location handle: a byte offset into the unit's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedLocation(usize);

/// A "provider-owned" token buffer handed out by [`ScriptedUnit::tokenize`].
#[derive(Debug)]
pub struct ScriptedBuffer {
    tokens: Vec<LexedToken>,
}

/// An in-memory translation unit with scripted cursors.
pub struct ScriptedUnit {
    source: String,
    tokens: Vec<LexedToken>,
    cursors: Vec<CursorData>,
    live_buffers: Cell<usize>,
    disposed_buffers: Cell<usize>,
}

impl ScriptedUnit {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            tokens: lex(source),
            cursors: Vec::new(),
            live_buffers: Cell::new(0),
            disposed_buffers: Cell::new(0),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Script a top-level cursor with the extent the provider "reports",
    /// which may deliberately be wrong.
    pub fn add_cursor(&mut self, kind: CursorKind, begin: usize, end: usize) -> ScriptedCursor {
        self.cursors.push(CursorData {
            kind,
            template_kind: CursorKind::Other,
            begin,
            end,
            children: Vec::new(),
        });
        ScriptedCursor(self.cursors.len() - 1)
    }

    /// Script a direct child of `parent` (one level; the repair engine never
    /// looks deeper).
    pub fn add_child(
        &mut self,
        parent: &ScriptedCursor,
        kind: CursorKind,
        begin: usize,
        end: usize,
    ) -> ScriptedCursor {
        let child = self.add_cursor(kind, begin, end);
        self.cursors[parent.0].children.push(child.0);
        child
    }

    /// Mark `cursor` as a template whose underlying templated entity has the
    /// given kind.
    pub fn set_template_kind(&mut self, cursor: &ScriptedCursor, kind: CursorKind) {
        self.cursors[cursor.0].template_kind = kind;
    }

    /// Convenience: a range between two byte offsets.
    pub fn range_of(&self, begin: usize, end: usize) -> SourceRange<ScriptedLocation> {
        SourceRange::new(ScriptedLocation(begin), ScriptedLocation(end))
    }

    /// Token buffers handed out and not yet disposed.
    pub fn live_buffers(&self) -> usize {
        self.live_buffers.get()
    }

    /// Token buffers disposed so far.
    pub fn disposed_buffers(&self) -> usize {
        self.disposed_buffers.get()
    }

    fn tokens_in(&self, begin: usize, end: usize) -> Vec<LexedToken> {
        let hits: Vec<_> = self
            .tokens
            .iter()
            .filter(|t| t.start < end && t.end > begin)
            .cloned()
            .collect();
        if !hits.is_empty() {
            return hits;
        }
        // The range sits in whitespace: snap to the nearest token before it,
        // the way the real provider rounds a location onto a token. The
        // snapped token keeps its own start/end offsets.
        self.tokens
            .iter()
            .rev()
            .find(|t| t.end <= begin)
            .or_else(|| self.tokens.first())
            .map(|t| vec![t.clone()])
            .unwrap_or_default()
    }
}

impl TranslationUnit for ScriptedUnit {
    type File = ();
    type Location = ScriptedLocation;
    type Cursor = ScriptedCursor;
    type TokenBuffer = ScriptedBuffer;

    fn location_offset(&self, loc: &ScriptedLocation) -> usize {
        loc.0
    }

    fn location_for_offset(&self, _file: &(), offset: usize) -> ScriptedLocation {
        assert!(
            offset <= self.source.len(),
            "offset {offset} outside file of length {}",
            self.source.len()
        );
        ScriptedLocation(offset)
    }

    fn cursor_kind(&self, cursor: &ScriptedCursor) -> CursorKind {
        self.cursors[cursor.0].kind
    }

    fn template_cursor_kind(&self, cursor: &ScriptedCursor) -> CursorKind {
        self.cursors[cursor.0].template_kind
    }

    fn cursor_extent(&self, cursor: &ScriptedCursor) -> SourceRange<ScriptedLocation> {
        let data = &self.cursors[cursor.0];
        SourceRange::new(ScriptedLocation(data.begin), ScriptedLocation(data.end))
    }

    fn visit_children<F>(&self, cursor: &ScriptedCursor, mut f: F)
    where
        F: FnMut(&ScriptedCursor) -> Visit,
    {
        for &child in &self.cursors[cursor.0].children {
            if f(&ScriptedCursor(child)) == Visit::Break {
                break;
            }
        }
    }

    fn tokenize(&self, range: &SourceRange<ScriptedLocation>) -> ScriptedBuffer {
        self.live_buffers.set(self.live_buffers.get() + 1);
        ScriptedBuffer {
            tokens: self.tokens_in(range.begin.0, range.end.0),
        }
    }

    fn token_count(&self, buffer: &ScriptedBuffer) -> usize {
        buffer.tokens.len()
    }

    fn token_spelling(&self, buffer: &ScriptedBuffer, index: usize) -> String {
        buffer.tokens[index].spelling.clone()
    }

    fn token_kind(&self, buffer: &ScriptedBuffer, index: usize) -> TokenKind {
        buffer.tokens[index].kind
    }

    fn token_extent(
        &self,
        buffer: &ScriptedBuffer,
        index: usize,
    ) -> SourceRange<ScriptedLocation> {
        let t = &buffer.tokens[index];
        SourceRange::new(ScriptedLocation(t.start), ScriptedLocation(t.end))
    }

    fn dispose_tokens(&self, buffer: ScriptedBuffer) {
        drop(buffer);
        self.live_buffers.set(self.live_buffers.get() - 1);
        self.disposed_buffers.set(self.disposed_buffers.get() + 1);
    }
}

fn lex(source: &str) -> Vec<LexedToken> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind;

        if source[i..].starts_with("//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            kind = TokenKind::Comment;
        } else if source[i..].starts_with("/*") {
            i += 2;
            while i < bytes.len() && !source[i..].starts_with("*/") {
                i += 1;
            }
            i = (i + 2).min(bytes.len());
            kind = TokenKind::Comment;
        } else if c == b'_' || c.is_ascii_alphabetic() {
            while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                i += 1;
            }
            kind = if KEYWORDS.contains(&&source[start..i]) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
        } else if c.is_ascii_digit() {
            // pp-number: good enough for hex, floats, suffixes
            while i < bytes.len()
                && (bytes[i] == b'.' || bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric())
            {
                i += 1;
            }
            kind = TokenKind::Literal;
        } else if c == b'"' || c == b'\'' {
            i += 1;
            while i < bytes.len() && bytes[i] != c {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            kind = TokenKind::Literal;
        } else {
            i += PUNCTUATION
                .iter()
                .find(|p| source[i..].starts_with(**p))
                .map_or(1, |p| p.len());
            kind = TokenKind::Punctuation;
        }

        tokens.push(LexedToken {
            start,
            end: i,
            spelling: source[start..i].to_string(),
            kind,
        });
    }

    tokens
}
