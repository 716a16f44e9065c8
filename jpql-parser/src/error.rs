use crate::lexer::Location;

/// A syntax error surfaced by fail-fast parsing.
///
/// Permissive parsing never constructs one of these directly; it collects
/// the same information internally and discards it, returning `None` from
/// [`crate::parse`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub(crate) fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            line: location.line,
            column: location.column,
        }
    }
}
