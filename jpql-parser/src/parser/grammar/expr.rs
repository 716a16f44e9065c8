use super::select;
use super::Parser;
use crate::ast::{
    AggregateFunc, AllAnyKind, ArithOp, CaseExpr, CompOp, ConstructorExpr, Expr, FunctionCall,
    InList, Literal, Param, PathExpr, PathQualifier, TrimSpec,
};
use crate::lexer::TokenKind;

/// Entry point for any JPQL expression context (select item, `WHERE`
/// condition, `SET` right-hand side, function argument, ...). The grammar
/// treats these as distinct categories (conditional, arithmetic, string,
/// ...); they are unified into one `Expr` type here since the walker only
/// needs to re-render what it sees, never type-check it.
pub(crate) fn expr(p: &mut Parser) -> Expr {
    or_expr(p)
}

fn or_expr(p: &mut Parser) -> Expr {
    let mut lhs = and_expr(p);
    while p.eat_keyword("OR") {
        let rhs = and_expr(p);
        lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
    }
    lhs
}

fn and_expr(p: &mut Parser) -> Expr {
    let mut lhs = not_expr(p);
    while p.eat_keyword("AND") {
        let rhs = not_expr(p);
        lhs = Expr::And(Box::new(lhs), Box::new(rhs));
    }
    lhs
}

fn not_expr(p: &mut Parser) -> Expr {
    if p.eat_keyword("NOT") {
        Expr::Not(Box::new(not_expr(p)))
    } else {
        predicate_suffixed(p)
    }
}

/// Parses an additive-level expression, then applies any trailing predicate
/// suffix (`BETWEEN`, `IN`, `LIKE`, `IS [NOT] NULL`, `IS [NOT] EMPTY`,
/// `[NOT] MEMBER OF`, or a comparison operator).
fn predicate_suffixed(p: &mut Parser) -> Expr {
    if p.at_keyword("EXISTS") {
        p.bump();
        return Expr::Exists {
            not: false,
            subquery: Box::new(parenthesised_subquery(p)),
        };
    }

    let lhs = additive(p);

    let negate_suffix = p.at_keyword("NOT")
        && (p.at_keyword_nth(1, "BETWEEN")
            || p.at_keyword_nth(1, "IN")
            || p.at_keyword_nth(1, "LIKE")
            || p.at_keyword_nth(1, "MEMBER"));
    if negate_suffix {
        p.bump();
    }

    if p.at_keyword("BETWEEN") {
        p.bump();
        let lower = additive(p);
        p.expect_keyword("AND");
        let upper = additive(p);
        return Expr::Between {
            not: negate_suffix,
            expr: Box::new(lhs),
            lower: Box::new(lower),
            upper: Box::new(upper),
        };
    }

    if p.at_keyword("IN") {
        p.bump();
        let list = in_list(p);
        return Expr::In {
            not: negate_suffix,
            expr: Box::new(lhs),
            list,
        };
    }

    if p.at_keyword("LIKE") {
        p.bump();
        let pattern = additive(p);
        let escape = if p.eat_keyword("ESCAPE") {
            Some(Box::new(additive(p)))
        } else {
            None
        };
        return Expr::Like {
            not: negate_suffix,
            expr: Box::new(lhs),
            pattern: Box::new(pattern),
            escape,
        };
    }

    if p.at_keyword("MEMBER") {
        p.bump();
        p.eat_keyword("OF");
        let collection = additive(p);
        return Expr::MemberOf {
            not: negate_suffix,
            expr: Box::new(lhs),
            collection: Box::new(collection),
        };
    }

    if p.at_keyword("IS") {
        p.bump();
        let not = p.eat_keyword("NOT");
        if p.eat_keyword("EMPTY") {
            return Expr::IsEmpty {
                not,
                expr: Box::new(lhs),
            };
        }
        p.expect_keyword("NULL");
        return Expr::IsNull {
            not,
            expr: Box::new(lhs),
        };
    }

    if let Some(op) = comparison_op(p) {
        p.bump();
        let rhs = comparison_rhs(p);
        return Expr::Comparison {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
    }

    lhs
}

fn comparison_op(p: &mut Parser) -> Option<CompOp> {
    Some(match p.current_kind() {
        TokenKind::Eq => CompOp::Eq,
        TokenKind::Neq => CompOp::Neq,
        TokenKind::Lt => CompOp::Lt,
        TokenKind::Lte => CompOp::Lte,
        TokenKind::Gt => CompOp::Gt,
        TokenKind::Gte => CompOp::Gte,
        _ => return None,
    })
}

/// The right-hand side of a comparison may be a quantified subquery
/// (`= ALL (subquery)`, `> ANY (subquery)`, `<> SOME (subquery)`) in
/// addition to an ordinary scalar expression.
fn comparison_rhs(p: &mut Parser) -> Expr {
    let kind = if p.at_keyword("ALL") {
        Some(AllAnyKind::All)
    } else if p.at_keyword("ANY") {
        Some(AllAnyKind::Any)
    } else if p.at_keyword("SOME") {
        Some(AllAnyKind::Some)
    } else {
        None
    };
    if let Some(kind) = kind {
        p.bump();
        return Expr::AllOrAny {
            kind,
            subquery: Box::new(parenthesised_subquery(p)),
        };
    }
    additive(p)
}

fn in_list(p: &mut Parser) -> InList {
    if p.at_kind(TokenKind::NamedParam) || p.at_kind(TokenKind::PositionalParam) {
        return InList::Param(param(p));
    }
    p.expect_kind(TokenKind::LParen);
    if p.at_keyword("SELECT") {
        let sub = select::subquery(p);
        p.expect_kind(TokenKind::RParen);
        return InList::Subquery(Box::new(sub));
    }
    let mut items = vec![expr(p)];
    while p.eat_kind(TokenKind::Comma) {
        items.push(expr(p));
    }
    p.expect_kind(TokenKind::RParen);
    InList::Exprs(items)
}

fn parenthesised_subquery(p: &mut Parser) -> crate::ast::Subquery {
    p.expect_kind(TokenKind::LParen);
    let sub = select::subquery(p);
    p.expect_kind(TokenKind::RParen);
    sub
}

fn additive(p: &mut Parser) -> Expr {
    let mut lhs = term(p);
    loop {
        let op = if p.at_kind(TokenKind::Plus) {
            ArithOp::Add
        } else if p.at_kind(TokenKind::Minus) {
            ArithOp::Sub
        } else {
            break;
        };
        p.bump();
        let rhs = term(p);
        lhs = Expr::Arithmetic {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
    }
    lhs
}

fn term(p: &mut Parser) -> Expr {
    let mut lhs = unary(p);
    loop {
        let op = if p.at_kind(TokenKind::Star) {
            ArithOp::Mul
        } else if p.at_kind(TokenKind::Slash) {
            ArithOp::Div
        } else {
            break;
        };
        p.bump();
        let rhs = unary(p);
        lhs = Expr::Arithmetic {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
    }
    lhs
}

fn unary(p: &mut Parser) -> Expr {
    if p.eat_kind(TokenKind::Minus) {
        Expr::UnaryMinus(Box::new(unary(p)))
    } else if p.eat_kind(TokenKind::Plus) {
        Expr::UnaryPlus(Box::new(unary(p)))
    } else {
        primary(p)
    }
}

fn param(p: &mut Parser) -> Param {
    if p.at_kind(TokenKind::PositionalParam) {
        let text = p.bump().text;
        let n = text.trim_start_matches('?').parse().ok();
        Param::Positional(n)
    } else {
        let text = p.bump().text;
        Param::Named(text.trim_start_matches(':').to_string())
    }
}

fn primary(p: &mut Parser) -> Expr {
    if !p.enter_recursive() {
        return Expr::Literal(Literal::String(String::new()));
    }
    let result = primary_inner(p);
    p.exit_recursive();
    result
}

fn primary_inner(p: &mut Parser) -> Expr {
    match p.current_kind() {
        TokenKind::Int => return Expr::Literal(Literal::Int(p.bump().text)),
        TokenKind::Float => return Expr::Literal(Literal::Float(p.bump().text)),
        TokenKind::String => return Expr::Literal(Literal::String(p.bump().text)),
        TokenKind::DateTime => return Expr::Literal(Literal::DateTime(p.bump().text)),
        TokenKind::NamedParam | TokenKind::PositionalParam => return Expr::Param(param(p)),
        TokenKind::SpelEscape => return Expr::SpelEscape(p.bump().text),
        TokenKind::LParen => return parenthesised_or_subquery(p),
        _ => {}
    }

    if p.at_keyword("TRUE") {
        p.bump();
        return Expr::Literal(Literal::Boolean(true));
    }
    if p.at_keyword("FALSE") {
        p.bump();
        return Expr::Literal(Literal::Boolean(false));
    }
    if p.at_keyword("NEW") {
        return Expr::New(constructor(p));
    }
    if p.at_keyword("CASE") {
        return Expr::Case(case_expr(p));
    }
    if p.at_keyword("COALESCE") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let mut items = vec![expr(p)];
        while p.eat_kind(TokenKind::Comma) {
            items.push(expr(p));
        }
        p.expect_kind(TokenKind::RParen);
        return Expr::Coalesce(items);
    }
    if p.at_keyword("NULLIF") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let a = expr(p);
        p.expect_kind(TokenKind::Comma);
        let b = expr(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::NullIf(Box::new(a), Box::new(b));
    }
    if p.at_keyword("EXTRACT") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let field = p.expect_ident_or_keyword();
        p.expect_keyword("FROM");
        let inner = expr(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::Extract {
            field,
            expr: Box::new(inner),
        };
    }
    if p.at_keyword("TRIM") {
        return trim_expr(p);
    }
    if p.at_keyword("SUBSTRING") {
        p.bump();
        return Expr::Function(generic_call(p, "substring"));
    }
    if p.at_keyword("CONCAT") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let mut items = vec![expr(p)];
        while p.eat_kind(TokenKind::Comma) {
            items.push(expr(p));
        }
        p.expect_kind(TokenKind::RParen);
        return Expr::Concat(items);
    }
    if p.at_keyword("FUNCTION") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let name = p.expect_kind(TokenKind::String);
        let mut args = Vec::new();
        while p.eat_kind(TokenKind::Comma) {
            args.push(expr(p));
        }
        p.expect_kind(TokenKind::RParen);
        return Expr::NamedFunction { name, args };
    }
    if p.at_keyword("TYPE") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let inner = expr(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::TypeOf(Box::new(inner));
    }
    if p.at_keyword("SIZE") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let path = dotted_path(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::Size(path);
    }
    if p.at_keyword("INDEX") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let path = dotted_path(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::Index(path);
    }
    if p.at_keyword("CURRENT_DATE") {
        p.bump();
        return Expr::CurrentDate;
    }
    if p.at_keyword("CURRENT_TIME") {
        p.bump();
        return Expr::CurrentTime;
    }
    if p.at_keyword("CURRENT_TIMESTAMP") {
        p.bump();
        return Expr::CurrentTimestamp;
    }
    if p.at_keyword("LOCAL") {
        p.bump();
        if p.eat_keyword("DATE") {
            return Expr::LocalDate;
        }
        if p.eat_keyword("TIME") {
            return Expr::LocalTime;
        }
        p.expect_keyword("DATETIME");
        return Expr::LocalDateTime;
    }
    if let Some(func) = aggregate_func(p) {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        if func == AggregateFunc::Count && p.at_kind(TokenKind::Star) {
            p.bump();
            p.expect_kind(TokenKind::RParen);
            return Expr::CountStar;
        }
        let distinct = p.eat_keyword("DISTINCT");
        let arg = expr(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::Aggregate {
            func,
            distinct,
            arg: Box::new(arg),
        };
    }
    if let Some(name) = unary_math_function(p) {
        p.bump();
        return Expr::Function(generic_call(p, name));
    }
    if p.at_keyword("MOD") || p.at_keyword("POWER") || p.at_keyword("LOCATE") {
        let name = p.text().to_ascii_lowercase();
        p.bump();
        return Expr::Function(generic_call(p, &name));
    }
    if p.at_keyword("TREAT") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let path = dotted_path(p);
        p.expect_keyword("AS");
        let as_type = p.parse_dotted_name();
        p.expect_kind(TokenKind::RParen);
        let mut suffix = Vec::new();
        while p.at_kind(TokenKind::Dot) {
            p.bump();
            suffix.push(p.expect_ident());
        }
        return Expr::Treat {
            path,
            as_type,
            suffix,
        };
    }
    if p.at_keyword("KEY") || p.at_keyword("VALUE") || p.at_keyword("ENTRY") {
        let qualifier = match p.text() {
            "KEY" => PathQualifier::Key,
            "VALUE" => PathQualifier::Value,
            _ => PathQualifier::Entry,
        };
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let alias = p.expect_ident();
        p.expect_kind(TokenKind::RParen);
        return path_continuation(
            p,
            PathExpr {
                qualifier,
                segments: vec![alias],
            },
        );
    }

    // Plain dotted path (also covers bare identifiers used as enum/entity
    // type literals and function calls like `lower(x)`/`upper(x)`/...).
    if p.at_kind(TokenKind::Ident) {
        let name = p.text().to_string();
        if p.at_kind_nth(1, TokenKind::LParen) {
            p.bump();
            return Expr::Function(generic_call(p, &name));
        }
        let path = dotted_path(p);
        return path_continuation(p, path);
    }

    p.err(format!("expected an expression, found `{}`", p.text()));
    p.bump();
    Expr::Literal(Literal::String(String::new()))
}

fn path_continuation(p: &mut Parser, mut path: PathExpr) -> Expr {
    while p.at_kind(TokenKind::Dot) {
        p.bump();
        path.segments.push(p.expect_ident());
    }
    Expr::Path(path)
}

fn dotted_path(p: &mut Parser) -> PathExpr {
    PathExpr {
        qualifier: PathQualifier::None,
        segments: p.parse_dotted_name(),
    }
}

fn constructor(p: &mut Parser) -> ConstructorExpr {
    super::select::constructor_expression(p)
}

fn case_expr(p: &mut Parser) -> CaseExpr {
    p.expect_keyword("CASE");
    let case_operand = if p.at_keyword("WHEN") {
        None
    } else {
        Some(Box::new(expr(p)))
    };
    let mut when_clauses = Vec::new();
    while p.eat_keyword("WHEN") {
        let when = expr(p);
        p.expect_keyword("THEN");
        let then = expr(p);
        when_clauses.push((when, then));
    }
    let else_expr = if p.eat_keyword("ELSE") {
        Some(Box::new(expr(p)))
    } else {
        None
    };
    p.expect_keyword("END");
    CaseExpr {
        case_operand,
        when_clauses,
        else_expr,
    }
}

fn trim_expr(p: &mut Parser) -> Expr {
    p.expect_keyword("TRIM");
    p.expect_kind(TokenKind::LParen);
    let spec = if p.eat_keyword("LEADING") {
        Some(TrimSpec::Leading)
    } else if p.eat_keyword("TRAILING") {
        Some(TrimSpec::Trailing)
    } else if p.eat_keyword("BOTH") {
        Some(TrimSpec::Both)
    } else {
        None
    };
    // An optional trim character precedes `FROM` only when it is present;
    // otherwise the token right before `FROM` (or, with no `FROM` at all,
    // the whole parenthesised contents) is the trimmed expression itself.
    let mut trim_char = None;
    if !p.at_keyword("FROM") {
        let first = expr(p);
        if p.at_keyword("FROM") {
            trim_char = Some(Box::new(first));
        } else {
            p.expect_kind(TokenKind::RParen);
            return Expr::Trim {
                spec,
                trim_char: None,
                expr: Box::new(first),
            };
        }
    }
    p.expect_keyword("FROM");
    let inner = expr(p);
    p.expect_kind(TokenKind::RParen);
    Expr::Trim {
        spec,
        trim_char,
        expr: Box::new(inner),
    }
}

fn aggregate_func(p: &mut Parser) -> Option<AggregateFunc> {
    Some(match p.text() {
        "AVG" if p.at_kind(TokenKind::Keyword) => AggregateFunc::Avg,
        "MAX" if p.at_kind(TokenKind::Keyword) => AggregateFunc::Max,
        "MIN" if p.at_kind(TokenKind::Keyword) => AggregateFunc::Min,
        "SUM" if p.at_kind(TokenKind::Keyword) => AggregateFunc::Sum,
        "COUNT" if p.at_kind(TokenKind::Keyword) => AggregateFunc::Count,
        _ => return None,
    })
}

/// Keyword-form unary math functions that take exactly one argument and are
/// otherwise rendered like any other function call.
fn unary_math_function(p: &mut Parser) -> Option<&'static str> {
    const NAMES: &[(&str, &str)] = &[
        ("LENGTH", "length"),
        ("LOWER", "lower"),
        ("UPPER", "upper"),
        ("ABS", "abs"),
        ("CEILING", "ceiling"),
        ("FLOOR", "floor"),
        ("EXP", "exp"),
        ("LN", "ln"),
        ("SIGN", "sign"),
        ("SQRT", "sqrt"),
        ("ROUND", "round"),
    ];
    if p.at_kind(TokenKind::Keyword) {
        if let Some(&(_, lower)) = NAMES.iter().find(|(kw, _)| *kw == p.text()) {
            return Some(lower);
        }
    }
    None
}

fn generic_call(p: &mut Parser, name: &str) -> FunctionCall {
    p.expect_kind(TokenKind::LParen);
    let mut args = Vec::new();
    if !p.at_kind(TokenKind::RParen) {
        args.push(expr(p));
        while p.eat_kind(TokenKind::Comma) {
            args.push(expr(p));
        }
    }
    p.expect_kind(TokenKind::RParen);
    FunctionCall {
        name: name.to_string(),
        args,
    }
}

fn parenthesised_or_subquery(p: &mut Parser) -> Expr {
    p.bump(); // '('
    if p.at_keyword("SELECT") {
        let sub = select::subquery(p);
        p.expect_kind(TokenKind::RParen);
        return Expr::Subquery(Box::new(sub));
    }
    let inner = expr(p);
    p.expect_kind(TokenKind::RParen);
    Expr::Grouped(Box::new(inner))
}
