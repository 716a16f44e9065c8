//! The façade bundling parse + walk + render into six named operations: a
//! faithful rewrite, a sort-injecting rewrite, a count-query derivation,
//! alias/projection extraction, and constructor-expression detection.
//!
//! [`JpqlRewriter`] carries no fields — it exists only to group the six
//! operations under one type, the way a per-call builder groups parsing.
//! Every operation below parses its own input, walks a freshly constructed
//! [`state::WalkerState`], and discards both on return; nothing is retained
//! or shared across calls.

mod buffer;
mod error;
mod render;
mod state;
mod token;
mod walker;

pub use error::RewriteError;
pub use state::{Direction, SortOrder};

use jpql_parser::ast::Statement;
use state::WalkerState;

/// Façade configuration bundling every knob for the rewrite family:
/// `{sort, fail_fast, debug_render}`. `count_projection` is
/// deliberately not a field here — it only applies to
/// [`JpqlRewriter::count_query`]'s own dedicated signature, never to a
/// faithful rewrite.
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    sort: Vec<SortOrder>,
    fail_fast: bool,
    debug_render: bool,
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort keys to inject into (or merge with) the query's `ORDER BY`
    /// clause.
    pub fn sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// When set, a parse failure surfaces as [`RewriteError::InvalidQuery`]
    /// rather than being swallowed. [`JpqlRewriter::rewrite`] and
    /// [`JpqlRewriter::rewrite_with_sort`] always set this; it is exposed
    /// here so [`JpqlRewriter::rewrite_with_options`] can also be driven
    /// permissively via the same `fail_fast` toggle.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Render with [`render::render_debug`] instead of [`render::render`].
    pub fn debug_render(mut self, debug_render: bool) -> Self {
        self.debug_render = debug_render;
        self
    }
}

/// Bundles parse+walk+render into the façade's operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpqlRewriter;

impl JpqlRewriter {
    pub fn new() -> Self {
        Self
    }

    /// A faithful re-rendering of `query`. Parses
    /// fail-fast: a syntactically invalid `query` surfaces as
    /// [`RewriteError::InvalidQuery`].
    pub fn rewrite(&self, query: &str) -> Result<String, RewriteError> {
        self.rewrite_with_options(query, &RewriteOptions::new().fail_fast(true))
    }

    /// As [`Self::rewrite`], additionally injecting `sort` into the
    /// `ORDER BY` clause — appended after any existing sort keys, or
    /// introducing the clause if the query has none.
    pub fn rewrite_with_sort(
        &self,
        query: &str,
        sort: Vec<SortOrder>,
    ) -> Result<String, RewriteError> {
        self.rewrite_with_options(query, &RewriteOptions::new().fail_fast(true).sort(sort))
    }

    /// The general entry point behind [`Self::rewrite`] and
    /// [`Self::rewrite_with_sort`], exposing every [`RewriteOptions`] knob
    /// directly. With `fail_fast` unset, a parse failure renders as an empty
    /// string rather than erroring, mirroring the permissive façade
    /// operations' "neutral value" contract.
    pub fn rewrite_with_options(
        &self,
        query: &str,
        options: &RewriteOptions,
    ) -> Result<String, RewriteError> {
        let stmt = if options.fail_fast {
            Some(jpql_parser::parse_fail_fast(query)?)
        } else {
            jpql_parser::parse_permissive(query)
        };
        let Some(stmt) = stmt else {
            return Ok(String::new());
        };
        let mut state = WalkerState::new();
        state.sort = options.sort.clone();
        let buf = walker::walk_statement(&stmt, &mut state);
        Ok(if options.debug_render {
            render::render_debug(buf.as_slice(), &state)
        } else {
            render::render(buf.as_slice(), &state)
        })
    }

    /// Derives a count-query rewrite of `query`. Parses fail-fast. `count_projection`, when supplied
    /// and non-blank, replaces the alias-or-select-items logic below
    /// verbatim as the inner projection of `count(...)`.
    ///
    /// `query` must be a `SELECT` statement — count-query synthesis has no
    /// meaning for `UPDATE`/`DELETE`, so a non-select parse tree here is an
    /// invariant violation rather than a `ParseFailure`.
    pub fn count_query(
        &self,
        query: &str,
        count_projection: Option<&str>,
    ) -> Result<String, RewriteError> {
        let stmt = jpql_parser::parse_fail_fast(query)?;
        if !matches!(stmt, Statement::Select(_)) {
            return Err(error::invariant_violation(
                "count_query requires a SELECT statement",
            ));
        }
        let mut state = WalkerState::new();
        state.count_mode = true;
        state.count_projection = count_projection
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let buf = walker::walk_statement(&stmt, &mut state);
        Ok(render::render(buf.as_slice(), &state))
    }

    /// The primary range-variable alias of `query`'s top-level `FROM`
    /// clause, or `None` if `query` does not parse.
    pub fn detect_alias(&self, query: &str) -> Option<String> {
        let stmt = jpql_parser::parse_permissive(query)?;
        let mut state = WalkerState::new();
        walker::walk_statement(&stmt, &mut state);
        state.has_alias().then(|| state.alias().to_string())
    }

    /// The rendered projection (select-item list) of `query`, or an empty
    /// string if `query` does not parse.
    pub fn projection(&self, query: &str) -> String {
        let Some(stmt) = jpql_parser::parse_permissive(query) else {
            return String::new();
        };
        let mut state = WalkerState::new();
        walker::walk_statement(&stmt, &mut state);
        match state.projection() {
            Some(tokens) => render::render(tokens, &state),
            None => String::new(),
        }
    }

    /// Whether `query`'s projection contains a constructor expression
    /// (`NEW fqcn(...)`) anywhere in its select clause.
    ///
    /// Parses fail-fast and propagates [`RewriteError::InvalidQuery`] on a
    /// syntax error, grouping this operation with `rewrite`/`count_query`
    /// rather than the permissive `detect_alias`/`projection` pair; see
    /// `DESIGN.md`, "Open Question Decisions" for the reasoning.
    pub fn has_constructor_expression(&self, query: &str) -> Result<bool, RewriteError> {
        let stmt = jpql_parser::parse_fail_fast(query)?;
        let mut state = WalkerState::new();
        walker::walk_statement(&stmt, &mut state);
        Ok(state.has_constructor_expression())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_is_faithful_for_plain_select() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.rewrite("select u from User u").unwrap(),
            "select u from User u"
        );
    }

    #[test]
    fn rewrite_propagates_invalid_query() {
        let rw = JpqlRewriter::new();
        assert!(matches!(
            rw.rewrite("select from"),
            Err(RewriteError::InvalidQuery(_))
        ));
    }

    #[test]
    fn rewrite_with_sort_appends_order_by() {
        let rw = JpqlRewriter::new();
        let out = rw
            .rewrite_with_sort("select u from User u", vec![SortOrder::asc("name")])
            .unwrap();
        assert_eq!(out, "select u from User u order by u.name asc");
    }

    #[test]
    fn rewrite_with_sort_merges_existing_order_by() {
        let rw = JpqlRewriter::new();
        let out = rw
            .rewrite_with_sort(
                "select u from User u order by u.id",
                vec![SortOrder::desc("name").ignore_case()],
            )
            .unwrap();
        assert_eq!(out, "select u from User u order by u.id, lower(u.name) desc");
    }

    #[test]
    fn count_query_plain_select_counts_alias() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.count_query("select u from User u", None).unwrap(),
            "select count(u) from User u"
        );
    }

    #[test]
    fn count_query_distinct_preserves_projection() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.count_query("select distinct u.name, u.role from User u", None)
                .unwrap(),
            "select count(distinct u.name, u.role) from User u"
        );
    }

    #[test]
    fn count_query_constructor_expression_falls_back_to_alias() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.count_query("select new com.example.Dto(u.a, u.b) from User u", None)
                .unwrap(),
            "select count(u) from User u"
        );
    }

    #[test]
    fn count_query_override_replaces_projection() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.count_query(
                "select distinct u.name, u.role from User u",
                Some("u.id")
            )
            .unwrap(),
            "select count(u.id) from User u"
        );
    }

    #[test]
    fn detect_alias_with_as_keyword() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.detect_alias("select u from User as u"),
            Some("u".to_string())
        );
    }

    #[test]
    fn detect_alias_without_as_keyword() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.detect_alias("select u from User u"),
            Some("u".to_string())
        );
    }

    #[test]
    fn detect_alias_returns_none_on_garbage() {
        let rw = JpqlRewriter::new();
        assert_eq!(rw.detect_alias("not jpql at all &&&"), None);
    }

    #[test]
    fn projection_renders_select_items() {
        let rw = JpqlRewriter::new();
        assert_eq!(rw.projection("select u.name, u.id from User u"), "u.name, u.id");
    }

    #[test]
    fn projection_empty_string_on_parse_failure() {
        let rw = JpqlRewriter::new();
        assert_eq!(rw.projection("not jpql at all &&&"), "");
    }

    #[test]
    fn has_constructor_expression_true_for_new_expression() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.has_constructor_expression("select new com.example.Dto(u.a, u.b) from User u")
                .unwrap(),
            true
        );
        assert_eq!(
            rw.projection("select new com.example.Dto(u.a, u.b) from User u"),
            "new com.example.Dto(u.a, u.b)"
        );
    }

    #[test]
    fn has_constructor_expression_false_for_plain_projection() {
        let rw = JpqlRewriter::new();
        assert_eq!(
            rw.has_constructor_expression("select u from User u").unwrap(),
            false
        );
    }

    #[test]
    fn idempotent_under_repeated_rewrite() {
        let rw = JpqlRewriter::new();
        let once = rw
            .rewrite("select o from Order o left join fetch o.lineItems li where o.total > 10")
            .unwrap();
        let twice = rw.rewrite(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn output_has_no_consecutive_or_trailing_whitespace() {
        let rw = JpqlRewriter::new();
        let out = rw
            .rewrite("select u.name from User u where u.active = true order by u.name")
            .unwrap();
        assert!(!out.contains("  "));
        assert_eq!(out, out.trim());
    }
}
