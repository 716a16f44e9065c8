use crate::state::WalkerState;

/// Whitespace policy applied *after* a token when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailing {
    Space,
    NoSpace,
}

/// A lightweight tag identifying which grammar production emitted a token.
/// Retained only for debug rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Path,
    Literal,
    Param,
    Function,
    Case,
    Subquery,
    Constructor,
    SpelEscape,
    Count,
    Sort,
    Punctuation,
    Generic,
}

/// Either a fixed literal or a function resolved against the final
/// [`WalkerState`] at render time.
///
/// The primary alias is not known until the first
/// `range_variable_declaration` is visited, which may happen after other
/// text (notably the sort suffix) has already been queued. Rather than
/// borrowing the walker state into a token's environment, `Deferred` closes
/// over only the (already-owned) pieces it needs — e.g. a sort key's
/// property name — and resolution itself still happens at render time,
/// against the finished state the renderer holds.
#[derive(Clone)]
pub enum TokenText {
    Literal(&'static str),
    Owned(std::rc::Rc<str>),
    Deferred(std::rc::Rc<dyn Fn(&WalkerState) -> String>),
}

impl TokenText {
    pub fn owned(s: impl Into<String>) -> Self {
        TokenText::Owned(std::rc::Rc::from(s.into()))
    }

    pub fn deferred(f: impl Fn(&WalkerState) -> String + 'static) -> Self {
        TokenText::Deferred(std::rc::Rc::new(f))
    }

    pub fn resolve(&self, state: &WalkerState) -> String {
        match self {
            TokenText::Literal(s) => (*s).to_string(),
            TokenText::Owned(s) => s.to_string(),
            TokenText::Deferred(f) => f(state),
        }
    }
}

impl std::fmt::Debug for TokenText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenText::Literal(s) => write!(f, "Literal({s:?})"),
            TokenText::Owned(s) => write!(f, "Owned({s:?})"),
            TokenText::Deferred(_) => write!(f, "Deferred(<fn>)"),
        }
    }
}

/// A single emitted token.
#[derive(Debug, Clone)]
pub struct Token {
    pub text: TokenText,
    pub context: NodeKind,
    pub trailing: Trailing,
    /// Debug-render only: force a line break before this token.
    pub line_break: bool,
    /// Debug-render only: never appears in a non-debug render.
    pub debug_only: bool,
}

impl Token {
    pub fn new(text: TokenText, context: NodeKind, trailing: Trailing) -> Self {
        Self {
            text,
            context,
            trailing,
            line_break: false,
            debug_only: false,
        }
    }

    pub fn literal(text: &'static str, context: NodeKind, trailing: Trailing) -> Self {
        Self::new(TokenText::Literal(text), context, trailing)
    }

    pub fn owned(text: impl Into<String>, context: NodeKind, trailing: Trailing) -> Self {
        Self::new(TokenText::owned(text), context, trailing)
    }

    pub fn debug(mut self) -> Self {
        self.debug_only = true;
        self
    }

    pub fn with_line_break(mut self) -> Self {
        self.line_break = true;
        self
    }
}
