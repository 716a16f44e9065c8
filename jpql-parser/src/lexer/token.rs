use super::{Location, TokenKind};

/// A single lexical token produced by [`tokenize`](super::tokenize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token (quotes and escapes retained verbatim
    /// for strings; keyword text is upper-cased).
    pub text: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, location: Location) -> Self {
        Self {
            kind,
            text,
            location,
        }
    }
}
