mod cursor;
mod location;
mod token;
mod token_kind;

use cursor::Cursor;

pub use location::Location;
pub use token::Token;
pub use token_kind::TokenKind;

/// A lexical error: an input byte sequence the lexer could not classify.
///
/// Lexing never aborts on one of these; the offending text is skipped and
/// scanning continues, matching the parser adapter's "permissive" mode
/// — fail-fast callers turn the first one into a
/// [`crate::SyntaxError`] instead of continuing to parse a token stream with
/// holes in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: Location,
}

/// JPQL 3.1 reserved words (case-insensitive). Anything not in this list that
/// looks like an identifier lexes as [`TokenKind::Ident`].
const KEYWORDS: &[&str] = &[
    "SELECT", "DISTINCT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "OUTER", "FETCH", "AS", "ON",
    "WITH", "TREAT", "KEY", "VALUE", "ENTRY", "GROUP", "BY", "ORDER", "HAVING", "ASC", "DESC",
    "UPDATE", "DELETE", "SET", "AND", "OR", "NOT", "BETWEEN", "IN", "LIKE", "ESCAPE", "IS",
    "NULL", "EMPTY", "MEMBER", "OF", "EXISTS", "ALL", "ANY", "SOME", "CASE", "WHEN", "THEN",
    "ELSE", "END", "COALESCE", "NULLIF", "AVG", "MAX", "MIN", "SUM", "COUNT", "EXTRACT", "TRIM",
    "LEADING", "TRAILING", "BOTH", "SUBSTRING", "CONCAT", "LENGTH", "LOCATE", "LOWER", "UPPER",
    "ABS", "CEILING", "FLOOR", "EXP", "LN", "SIGN", "SQRT", "MOD", "POWER", "ROUND", "SIZE",
    "INDEX", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "LOCAL", "DATE", "TIME",
    "DATETIME", "FUNCTION", "TYPE", "NEW", "TRUE", "FALSE", "OBJECT", "INSERT", "INTO", "VALUES",
];

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

/// Tokenise `input` as JPQL 3.1 source. Never fails outright: unrecognised
/// bytes are recorded in the returned error list and skipped so scanning can
/// continue.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut cursor = Cursor::new(input);
    let mut loc = Location::start();

    while !cursor.is_eof() {
        let start = cursor.pos();
        let ch = cursor.peek().unwrap();

        if ch.is_whitespace() {
            cursor.bump();
            loc = loc.advance(&ch.to_string());
            continue;
        }

        let kind = match ch {
            '.' if !cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                cursor.bump();
                Some(TokenKind::Dot)
            }
            '0'..='9' => Some(lex_number(&mut cursor)),
            '.' => Some(lex_number(&mut cursor)),
            '\'' => Some(lex_string(&mut cursor)),
            ',' => {
                cursor.bump();
                Some(TokenKind::Comma)
            }
            '(' => {
                cursor.bump();
                Some(TokenKind::LParen)
            }
            ')' => {
                cursor.bump();
                Some(TokenKind::RParen)
            }
            '=' => {
                cursor.bump();
                Some(TokenKind::Eq)
            }
            '<' => {
                cursor.bump();
                if cursor.peek() == Some('=') {
                    cursor.bump();
                    Some(TokenKind::Lte)
                } else if cursor.peek() == Some('>') {
                    cursor.bump();
                    Some(TokenKind::Neq)
                } else {
                    Some(TokenKind::Lt)
                }
            }
            '>' => {
                cursor.bump();
                if cursor.peek() == Some('=') {
                    cursor.bump();
                    Some(TokenKind::Gte)
                } else {
                    Some(TokenKind::Gt)
                }
            }
            '!' => {
                cursor.bump();
                if cursor.peek() == Some('=') {
                    cursor.bump();
                    Some(TokenKind::Neq)
                } else {
                    None
                }
            }
            '+' => {
                cursor.bump();
                Some(TokenKind::Plus)
            }
            '-' => {
                cursor.bump();
                Some(TokenKind::Minus)
            }
            '*' => {
                cursor.bump();
                Some(TokenKind::Star)
            }
            '/' => {
                cursor.bump();
                Some(TokenKind::Slash)
            }
            '%' => {
                cursor.bump();
                Some(TokenKind::Percent)
            }
            '?' => {
                cursor.bump();
                cursor.eat_while(|c| c.is_ascii_digit());
                Some(TokenKind::PositionalParam)
            }
            ':' => {
                cursor.bump();
                cursor.eat_while(is_ident_continue);
                Some(TokenKind::NamedParam)
            }
            '{' => lex_brace_form(&mut cursor),
            '#' if cursor.peek_at(1) == Some('{') => lex_spel_escape(&mut cursor),
            c if is_ident_start(c) => {
                cursor.bump();
                cursor.eat_while(is_ident_continue);
                None // resolved below once we have the slice
            }
            _ => {
                cursor.bump();
                None
            }
        };

        let end = cursor.pos();
        let text = &input[start..end];

        let resolved_kind = kind.unwrap_or_else(|| {
            if text.is_empty() {
                TokenKind::Eof
            } else if text.chars().next().map(is_ident_start).unwrap_or(false) {
                let upper = text.to_ascii_uppercase();
                if KEYWORDS.contains(&upper.as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Ident
                }
            } else {
                errors.push(LexError {
                    message: format!("unexpected character: {text:?}"),
                    location: loc,
                });
                TokenKind::Eof
            }
        });

        let text = if resolved_kind == TokenKind::Keyword {
            text.to_ascii_uppercase()
        } else {
            text.to_string()
        };

        if resolved_kind != TokenKind::Eof || !text.is_empty() {
            tokens.push(Token::new(resolved_kind, text, loc));
        }
        loc = loc.advance(&input[start..end]);
    }

    tokens.push(Token::new(TokenKind::Eof, String::new(), loc));
    (tokens, errors)
}

fn lex_number(cursor: &mut Cursor) -> TokenKind {
    cursor.eat_while(|c| c.is_ascii_digit());
    let mut is_float = false;
    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        is_float = true;
        cursor.bump();
        cursor.eat_while(|c| c.is_ascii_digit());
    }
    if matches!(cursor.peek(), Some('e') | Some('E')) {
        is_float = true;
        cursor.bump();
        if matches!(cursor.peek(), Some('+') | Some('-')) {
            cursor.bump();
        }
        cursor.eat_while(|c| c.is_ascii_digit());
    }
    if matches!(
        cursor.peek(),
        Some('f') | Some('F') | Some('d') | Some('D')
    ) {
        is_float = true;
        cursor.bump();
    } else if matches!(cursor.peek(), Some('l') | Some('L')) {
        cursor.bump();
    }
    if is_float {
        TokenKind::Float
    } else {
        TokenKind::Int
    }
}

/// Consumes a `'...'` string literal. JPQL escapes an embedded quote by
/// doubling it (`''`), the same SQL-style rule `nova-framework-jpa`'s
/// tokenizer implements; an unterminated literal is accepted best-effort
/// rather than treated as an error, since the fail-fast/permissive decision
/// belongs to the parser, not the lexer.
fn lex_string(cursor: &mut Cursor) -> TokenKind {
    cursor.bump(); // opening quote
    loop {
        match cursor.peek() {
            None => break,
            Some('\'') => {
                cursor.bump();
                if cursor.peek() == Some('\'') {
                    cursor.bump();
                    continue;
                }
                break;
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
    TokenKind::String
}

/// Consumes a JDBC-escape datetime literal: `{d '...'}`, `{t '...'}`, or
/// `{ts '...'}`.
fn lex_brace_form(cursor: &mut Cursor) -> Option<TokenKind> {
    cursor.bump(); // '{'
    cursor.eat_while(|c| c != '}');
    if cursor.peek() == Some('}') {
        cursor.bump();
    }
    Some(TokenKind::DateTime)
}

/// Consumes a SpEL escape `#{...}`, honouring nested braces so that forms
/// like `#{func([1])}` capture the whole expression as one token.
fn lex_spel_escape(cursor: &mut Cursor) -> Option<TokenKind> {
    cursor.bump(); // '#'
    cursor.bump(); // '{'
    let mut depth = 1usize;
    while depth > 0 {
        match cursor.bump() {
            None => break,
            Some('{') => depth += 1,
            Some('}') => depth -= 1,
            Some(_) => {}
        }
    }
    Some(TokenKind::SpelEscape)
}
