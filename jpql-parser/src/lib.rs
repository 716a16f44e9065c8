//! A recursive-descent parser for the JPQL 3.1 grammar defined by the
//! Jakarta Persistence 3.1 specification (JSR 338).
//!
//! This crate is an external collaborator of the rewriting engine:
//! [`jpql-rewriter`](../jpql_rewriter) depends on it but never matches on
//! parser internals directly, only through [`ast::Statement`] and the two
//! [`parse_fail_fast`]/[`parse_permissive`] entry points.

pub mod ast;
mod error;
mod lexer;
mod limit;
mod parser;

pub use error::SyntaxError;
pub use lexer::{Location, Token, TokenKind};

use ast::Statement;
use parser::Parser;

/// Parses `query`, surfacing the first lexical or syntactic error
/// encountered rather than attempting any recovery.
pub fn parse_fail_fast(query: &str) -> Result<Statement, SyntaxError> {
    let mut parser = Parser::new(query);
    let statement = parser.parse_statement();
    match parser.into_errors().into_iter().next() {
        Some(first) => Err(first),
        None => Ok(statement),
    }
}

/// Parses `query`, suppressing lexical/syntactic errors. Returns `None` in place of the "null tree" a generated
/// parser would hand back on failure — callers are expected to treat that as
/// "not a valid JPQL query".
pub fn parse_permissive(query: &str) -> Option<Statement> {
    let mut parser = Parser::new(query);
    let statement = parser.parse_statement();
    if parser.errors().is_empty() {
        Some(statement)
    } else {
        None
    }
}
