use std::fmt;

/// Tracks recursive-descent depth so a pathologically nested query (deeply
/// parenthesised conditionals, nested subqueries) cannot blow the stack.
///
/// JPQL's grammar has the same hazard as any recursive-descent CST builder:
/// `WHERE` conditions, grouped arithmetic, and subqueries are all
/// self-recursive productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitTracker {
    current: usize,
    pub high: usize,
    pub limit: usize,
}

/// Comfortably below where an unoptimised debug build overflows the stack,
/// while far above anything a hand-written query would ever nest.
const DEFAULT_RECURSION_LIMIT: usize = 500;

impl Default for LimitTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RECURSION_LIMIT)
    }
}

impl LimitTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            current: 0,
            high: 0,
            limit,
        }
    }

    pub fn enter(&mut self) -> bool {
        self.current += 1;
        if self.current > self.high {
            self.high = self.current;
        }
        self.current <= self.limit
    }

    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

impl fmt::Display for LimitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion limit: {}, high water mark: {}", self.limit, self.high)
    }
}
