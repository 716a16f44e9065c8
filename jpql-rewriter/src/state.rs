use crate::token::Token;

/// Sort direction requested by a caller-supplied [`SortOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A single sort key to inject into (or merge with) a query's `ORDER BY`
/// clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// An unqualified attribute name, e.g. `name`. Qualified at render time
    /// with the captured alias.
    pub property: String,
    pub direction: Direction,
    /// Wrap the property reference in a case-folding function.
    pub ignore_case: bool,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
            ignore_case: false,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
            ignore_case: false,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

/// Mutable state threaded through a single walk.
///
/// Owned by the [`crate::walker::Walker`] that created it; never shared
/// across walks.
#[derive(Debug, Clone, Default)]
pub struct WalkerState {
    pub sort: Vec<SortOrder>,
    pub count_mode: bool,
    /// Overrides the count-mode inner projection when set.
    pub count_projection: Option<String>,
    alias: Option<String>,
    projection: Option<Vec<Token>>,
    has_constructor_expression: bool,
}

impl WalkerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures `alias` from the first `range_variable_declaration` visited;
    /// subsequent calls are no-ops.
    pub fn capture_alias(&mut self, alias: &str) {
        if self.alias.is_none() {
            self.alias = Some(alias.to_string());
        }
    }

    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or("")
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }

    /// Set exactly once, when the top-level `select_clause` is visited.
    pub fn set_projection(&mut self, tokens: Vec<Token>) {
        if self.projection.is_none() {
            self.projection = Some(tokens);
        }
    }

    pub fn projection(&self) -> Option<&[Token]> {
        self.projection.as_deref()
    }

    /// Monotonic: once true, stays true for the rest of the walk.
    pub fn mark_constructor_expression(&mut self) {
        self.has_constructor_expression = true;
    }

    pub fn has_constructor_expression(&self) -> bool {
        self.has_constructor_expression
    }

    /// Derives a count-mode walker state from this one: copies rather than
    /// aliases, so the base walk and the count walk never observe each
    /// other's mutations.
    pub fn derive_for_count(&self, count_projection: Option<String>) -> Self {
        Self {
            sort: Vec::new(),
            count_mode: true,
            count_projection,
            alias: None,
            projection: None,
            has_constructor_expression: false,
        }
    }
}
