//! The typed JPQL 3.1 parse tree.
//!
//! An owned, recursive AST rather than an offset-indexed CST, since nothing
//! in this workspace needs incremental reparsing (see `DESIGN.md`).

/// A complete top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub select: SelectClause,
    pub from: FromClause,
    pub where_clause: Option<Expr>,
    pub group_by: Option<Vec<Expr>>,
    pub having: Option<Expr>,
    pub order_by: Option<Vec<OrderByItem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub distinct: bool,
    pub items: Vec<SelectItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Expr(Expr),
    Constructor(ConstructorExpr),
    /// `OBJECT(alias)` — shorthand select item naming a whole entity.
    Object(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorExpr {
    /// Dotted fully-qualified class name, e.g. `["com", "example", "Dto"]`.
    pub class_name: Vec<String>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub roots: Vec<IdentificationVariableDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationVariableDeclaration {
    pub range: RangeVariableDeclaration,
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeVariableDeclaration {
    pub entity_name: Vec<String>,
    /// Whether the source spelled out the optional `AS` keyword.
    pub as_keyword: bool,
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    LeftOuter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub fetch: bool,
    pub target: JoinTarget,
    pub alias: Option<String>,
    pub condition: Option<JoinCondition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    Path(PathExpr),
    Treat { path: PathExpr, as_type: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Expr),
    With(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expr: Expr,
    /// `None` when the source wrote neither `ASC` nor `DESC` — the walker
    /// must not invent one on re-render, or a query that never specified a
    /// direction silently gains one.
    pub direction: Option<OrderDirection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub entity_name: Vec<String>,
    pub alias: Option<String>,
    pub assignments: Vec<(PathExpr, Expr)>,
    pub where_clause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub entity_name: Vec<String>,
    pub alias: Option<String>,
    pub where_clause: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathQualifier {
    None,
    Key,
    Value,
    Entry,
}

/// A (possibly qualified) dotted path expression, e.g. `o.customer.name` or
/// `KEY(e).name`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    pub qualifier: PathQualifier,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Avg,
    Max,
    Min,
    Sum,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimSpec {
    Leading,
    Trailing,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllAnyKind {
    All,
    Any,
    Some,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(String),
    Float(String),
    Boolean(bool),
    /// Dotted enum constant, e.g. `com.example.Suit.SPADES`.
    Enum(Vec<String>),
    /// `ENTITY_TYPE` literal used with `TYPE(x) = EntityName`.
    EntityType(String),
    /// Raw JDBC-escape datetime literal text, e.g. `{d '2020-01-01'}`.
    DateTime(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Positional(Option<u32>),
    Named(String),
}

/// A subquery, usable in `EXISTS`, `IN`, comparisons, and `ALL`/`ANY`/`SOME`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub select: SelectClause,
    pub from: FromClause,
    pub where_clause: Option<Expr>,
    pub group_by: Option<Vec<Expr>>,
    pub having: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InList {
    Exprs(Vec<Expr>),
    Subquery(Box<Subquery>),
    Param(Param),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    /// Present for "simple" `CASE expr WHEN ... END`; absent for "searched"
    /// `CASE WHEN cond ... END`.
    pub case_operand: Option<Box<Expr>>,
    pub when_clauses: Vec<(Expr, Expr)>,
    pub else_expr: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(PathExpr),
    Literal(Literal),
    Param(Param),
    Function(FunctionCall),
    /// User-defined `FUNCTION('name', args...)`.
    NamedFunction { name: String, args: Vec<Expr> },
    Aggregate {
        func: AggregateFunc,
        distinct: bool,
        arg: Box<Expr>,
    },
    /// `COUNT(*)` has no argument expression.
    CountStar,
    Arithmetic {
        op: ArithOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    UnaryMinus(Box<Expr>),
    UnaryPlus(Box<Expr>),
    Concat(Vec<Expr>),
    Comparison {
        op: CompOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Between {
        not: bool,
        expr: Box<Expr>,
        lower: Box<Expr>,
        upper: Box<Expr>,
    },
    In {
        not: bool,
        expr: Box<Expr>,
        list: InList,
    },
    Like {
        not: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
    },
    IsNull {
        not: bool,
        expr: Box<Expr>,
    },
    IsEmpty {
        not: bool,
        expr: Box<Expr>,
    },
    MemberOf {
        not: bool,
        expr: Box<Expr>,
        collection: Box<Expr>,
    },
    Exists {
        not: bool,
        subquery: Box<Subquery>,
    },
    AllOrAny {
        kind: AllAnyKind,
        subquery: Box<Subquery>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// A parenthesised subexpression, preserved verbatim so re-rendering is
    /// stable even though the grammar groups more loosely elsewhere.
    Grouped(Box<Expr>),
    Case(CaseExpr),
    Coalesce(Vec<Expr>),
    NullIf(Box<Expr>, Box<Expr>),
    Extract {
        field: String,
        expr: Box<Expr>,
    },
    Trim {
        spec: Option<TrimSpec>,
        trim_char: Option<Box<Expr>>,
        expr: Box<Expr>,
    },
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    LocalDate,
    LocalTime,
    LocalDateTime,
    TypeOf(Box<Expr>),
    Index(PathExpr),
    Size(PathExpr),
    /// `TREAT(path AS Type)`, optionally continued by a dotted suffix
    /// (`TREAT(e AS Dog).breed`).
    Treat {
        path: PathExpr,
        as_type: Vec<String>,
        suffix: Vec<String>,
    },
    Subquery(Box<Subquery>),
    SpelEscape(String),
    New(ConstructorExpr),
}
