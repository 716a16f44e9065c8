mod grammar;

use crate::ast::Statement;
use crate::error::SyntaxError;
use crate::lexer::{tokenize, Location, Token, TokenKind};
use crate::limit::LimitTracker;

/// Recursive-descent parser over a token stream, producing the typed parse
/// tree in [`crate::ast`].
///
/// A struct holding the token stream plus accumulated errors, consumed once
/// by a `parse`-family method.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<SyntaxError>,
    recursion: LimitTracker,
}

impl Parser {
    pub(crate) fn new(input: &str) -> Self {
        let (tokens, lex_errors) = tokenize(input);
        let errors = lex_errors
            .into_iter()
            .map(|e| SyntaxError::at(e.message, e.location))
            .collect();
        Self {
            tokens,
            pos: 0,
            errors,
            recursion: LimitTracker::default(),
        }
    }

    pub(crate) fn parse_statement(&mut self) -> Statement {
        grammar::statement(self)
    }

    pub(crate) fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    // --- token-stream primitives -------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_nth(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn location(&self) -> Location {
        self.current().location
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(crate) fn at_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn at_kind_nth(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).kind == kind
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn at_keyword(&self, kw: &str) -> bool {
        self.current().kind == TokenKind::Keyword && self.current().text == kw
    }

    pub(crate) fn at_keyword_nth(&self, n: usize, kw: &str) -> bool {
        let t = self.peek_nth(n);
        t.kind == TokenKind::Keyword && t.text == kw
    }

    pub(crate) fn text(&self) -> &str {
        &self.current().text
    }

    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes the current token if it is the given keyword, returning
    /// whether it matched.
    pub(crate) fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_keyword(&mut self, kw: &str) {
        if !self.eat_keyword(kw) {
            self.err(format!("expected keyword `{kw}`, found `{}`", self.text()));
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> String {
        if self.at_kind(kind) {
            self.bump().text
        } else {
            self.err(format!(
                "expected {kind:?}, found `{}` ({:?})",
                self.text(),
                self.current().kind
            ));
            String::new()
        }
    }

    /// Parses a dotted identifier chain (`a.b.c`) into its segments.
    pub(crate) fn parse_dotted_name(&mut self) -> Vec<String> {
        let mut parts = vec![self.expect_ident()];
        while self.at_kind(TokenKind::Dot) {
            self.bump();
            parts.push(self.expect_ident());
        }
        parts
    }

    /// An identifier in JPQL may also be written as an unreserved keyword in
    /// some dialects; we only accept a true `Ident` token here and record an
    /// error otherwise, which is sufficient given semantic validation (and
    /// therefore "is this word actually reserved here") is out of scope.
    pub(crate) fn expect_ident(&mut self) -> String {
        if self.at_kind(TokenKind::Ident) {
            self.bump().text
        } else {
            self.err(format!("expected identifier, found `{}`", self.text()));
            String::new()
        }
    }

    /// Accepts either an identifier or a keyword token as a field/unit name
    /// (used by `EXTRACT(YEAR FROM ...)`, where `YEAR` etc. are not
    /// themselves reserved words but may collide with one lexically).
    pub(crate) fn expect_ident_or_keyword(&mut self) -> String {
        if self.at_kind(TokenKind::Ident) || self.at_kind(TokenKind::Keyword) {
            self.bump().text
        } else {
            self.err(format!("expected a field name, found `{}`", self.text()));
            String::new()
        }
    }

    pub(crate) fn err(&mut self, message: impl Into<String>) {
        self.errors.push(SyntaxError::at(message, self.location()));
    }

    /// Guards a recursive grammar call against runaway nesting.
    pub(crate) fn enter_recursive(&mut self) -> bool {
        if !self.recursion.enter() {
            self.err("recursion limit exceeded while parsing nested expression");
            false
        } else {
            true
        }
    }

    pub(crate) fn exit_recursive(&mut self) {
        self.recursion.exit();
    }
}
