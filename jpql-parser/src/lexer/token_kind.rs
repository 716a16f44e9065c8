/// The lexical category of a [`Token`](super::Token).
///
/// JPQL keywords are case-insensitive; the lexer normalises keyword text to
/// uppercase in [`TokenKind::Keyword`] while leaving identifiers as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier: entity names, aliases, field names, function names
    /// that are not reserved words.
    Ident,
    /// A case-insensitive reserved word, stored uppercase.
    Keyword,
    /// An integer literal, e.g. `42`.
    Int,
    /// A floating point literal, e.g. `3.14`, `1e10`, `1.5F`.
    Float,
    /// A single-quoted string literal with `''`-doubled escapes.
    String,
    /// A JDBC escape datetime literal: `{d '...'}`, `{t '...'}`, `{ts '...'}`.
    DateTime,
    /// A positional input parameter: `?1`.
    PositionalParam,
    /// A named input parameter: `:name`.
    NamedParam,
    /// A SpEL escape: `#{...}`, passed through structurally.
    SpelEscape,
    Dot,
    Comma,
    LParen,
    RParen,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eof,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        false
    }
}
