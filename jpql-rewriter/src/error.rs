use jpql_parser::SyntaxError;

/// Errors a rewrite operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The input could not be parsed as JPQL.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] SyntaxError),
    /// The walker reached a state its own invariants say is unreachable.
    /// Surfacing this as an error (rather than panicking) keeps a single
    /// malformed query from taking down a caller that rewrites many queries
    /// in a loop; it is always also logged at `error` level, since it means
    /// this crate itself has a bug.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Constructs an [`RewriteError::InternalInvariantViolation`], logging it
/// first. Call sites pass a message naming the invariant that didn't hold.
pub(crate) fn invariant_violation(message: impl Into<String>) -> RewriteError {
    let message = message.into();
    log::error!("jpql-rewriter invariant violation: {message}");
    RewriteError::InternalInvariantViolation(message)
}
