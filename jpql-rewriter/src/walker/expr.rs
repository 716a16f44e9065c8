//! Expression, path and subquery emission.

use jpql_parser::ast::{
    AggregateFunc, AllAnyKind, ArithOp, CaseExpr, CompOp, Expr, InList, Literal, Param, PathExpr,
    PathQualifier, Subquery, TrimSpec,
};

use super::{emit_call, emit_comma_list, push_lit, push_owned, push_punct};
use crate::buffer::{close_path_run, nospace, TokenBuffer};
use crate::state::WalkerState;
use crate::token::{NodeKind, Trailing};

/// Emits a (possibly qualified) path expression as a single NO_SPACE run
/// terminated by SPACE.
pub(crate) fn path(buf: &mut TokenBuffer, path: &PathExpr) {
    let run_start = buf.len();
    match path.qualifier {
        PathQualifier::None => dotted(buf, &path.segments),
        PathQualifier::Key | PathQualifier::Value | PathQualifier::Entry => {
            let keyword = match path.qualifier {
                PathQualifier::Key => "key",
                PathQualifier::Value => "value",
                PathQualifier::Entry => "entry",
                PathQualifier::None => unreachable!(),
            };
            push_lit(buf, keyword, NodeKind::Path);
            push_punct(buf, "(");
            push_owned(buf, path.segments[0].clone(), NodeKind::Path);
            push_punct(buf, ")");
            dotted_continuation(buf, &path.segments[1..]);
        }
    }
    close_path_run(buf, run_start);
}

fn dotted(buf: &mut TokenBuffer, segments: &[String]) {
    let (first, rest) = segments.split_first().expect("path has at least one segment");
    push_owned(buf, first.clone(), NodeKind::Path);
    dotted_continuation(buf, rest);
}

fn dotted_continuation(buf: &mut TokenBuffer, segments: &[String]) {
    for segment in segments {
        push_punct(buf, ".");
        push_owned(buf, segment.clone(), NodeKind::Path);
    }
}

fn dotted_name(buf: &mut TokenBuffer, segments: &[String]) {
    let run_start = buf.len();
    dotted(buf, segments);
    close_path_run(buf, run_start);
}

pub(crate) fn expr(buf: &mut TokenBuffer, state: &mut WalkerState, e: &Expr) {
    match e {
        Expr::Path(p) => path(buf, p),
        Expr::Literal(lit) => literal(buf, lit),
        Expr::Param(p) => param(buf, p),
        Expr::Function(call) => emit_call(buf, state, call.name.clone(), &call.args, Trailing::Space),
        Expr::NamedFunction { name, args } => {
            push_lit(buf, "function", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            push_owned(buf, format!("'{name}'"), NodeKind::Literal);
            if args.is_empty() {
                push_punct(buf, ")");
            } else {
                nospace(buf);
                push_punct(buf, ",");
                emit_comma_list(buf, state, args, |buf, state, arg| expr(buf, state, arg));
                nospace(buf);
                push_punct(buf, ")");
            }
        }
        Expr::Aggregate { func, distinct, arg } => {
            push_owned(buf, aggregate_name(*func), NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            if *distinct {
                push_lit(buf, "distinct", NodeKind::Function);
            }
            expr(buf, state, arg);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::CountStar => {
            push_lit(buf, "count", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            push_punct(buf, "*");
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Arithmetic { op, lhs, rhs } => {
            expr(buf, state, lhs);
            push_lit(buf, arith_symbol(*op), NodeKind::Generic);
            expr(buf, state, rhs);
        }
        Expr::UnaryMinus(inner) => {
            push_punct(buf, "-");
            nospace(buf);
            expr(buf, state, inner);
        }
        Expr::UnaryPlus(inner) => {
            push_punct(buf, "+");
            nospace(buf);
            expr(buf, state, inner);
        }
        Expr::Concat(parts) => {
            push_lit(buf, "concat", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            emit_comma_list(buf, state, parts, |buf, state, p| expr(buf, state, p));
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Comparison { op, lhs, rhs } => {
            expr(buf, state, lhs);
            push_lit(buf, comp_symbol(*op), NodeKind::Generic);
            expr(buf, state, rhs);
        }
        Expr::Between { not, expr: inner, lower, upper } => {
            expr(buf, state, inner);
            not_prefix(buf, *not);
            push_lit(buf, "between", NodeKind::Generic);
            expr(buf, state, lower);
            push_lit(buf, "and", NodeKind::Generic);
            expr(buf, state, upper);
        }
        Expr::In { not, expr: inner, list } => {
            expr(buf, state, inner);
            not_prefix(buf, *not);
            push_lit(buf, "in", NodeKind::Generic);
            in_list(buf, state, list);
        }
        Expr::Like { not, expr: inner, pattern, escape } => {
            expr(buf, state, inner);
            not_prefix(buf, *not);
            push_lit(buf, "like", NodeKind::Generic);
            expr(buf, state, pattern);
            if let Some(escape) = escape {
                push_lit(buf, "escape", NodeKind::Generic);
                expr(buf, state, escape);
            }
        }
        Expr::IsNull { not, expr: inner } => {
            expr(buf, state, inner);
            push_lit(buf, "is", NodeKind::Generic);
            if *not {
                push_lit(buf, "not", NodeKind::Generic);
            }
            push_lit(buf, "null", NodeKind::Generic);
        }
        Expr::IsEmpty { not, expr: inner } => {
            expr(buf, state, inner);
            push_lit(buf, "is", NodeKind::Generic);
            if *not {
                push_lit(buf, "not", NodeKind::Generic);
            }
            push_lit(buf, "empty", NodeKind::Generic);
        }
        Expr::MemberOf { not, expr: inner, collection } => {
            expr(buf, state, inner);
            not_prefix(buf, *not);
            push_lit(buf, "member", NodeKind::Generic);
            push_lit(buf, "of", NodeKind::Generic);
            expr(buf, state, collection);
        }
        Expr::Exists { not, subquery: sub } => {
            if *not {
                push_lit(buf, "not", NodeKind::Generic);
            }
            push_lit(buf, "exists", NodeKind::Generic);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            subquery(buf, state, sub);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::AllOrAny { kind, subquery: sub } => {
            push_lit(buf, all_any_keyword(*kind), NodeKind::Generic);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            subquery(buf, state, sub);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::And(lhs, rhs) => {
            expr(buf, state, lhs);
            push_lit(buf, "and", NodeKind::Generic);
            expr(buf, state, rhs);
        }
        Expr::Or(lhs, rhs) => {
            expr(buf, state, lhs);
            push_lit(buf, "or", NodeKind::Generic);
            expr(buf, state, rhs);
        }
        Expr::Not(inner) => {
            push_lit(buf, "not", NodeKind::Generic);
            expr(buf, state, inner);
        }
        Expr::Grouped(inner) => {
            push_punct(buf, "(");
            nospace(buf);
            expr(buf, state, inner);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Case(case) => case_expr(buf, state, case),
        Expr::Coalesce(args) => {
            push_lit(buf, "coalesce", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            emit_comma_list(buf, state, args, |buf, state, a| expr(buf, state, a));
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::NullIf(a, b) => {
            push_lit(buf, "nullif", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            expr(buf, state, a);
            nospace(buf);
            push_punct(buf, ",");
            expr(buf, state, b);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Extract { field, expr: inner } => {
            push_lit(buf, "extract", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            push_owned(buf, field.clone(), NodeKind::Generic);
            push_lit(buf, "from", NodeKind::Generic);
            expr(buf, state, inner);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Trim { spec, trim_char, expr: inner } => {
            push_lit(buf, "trim", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            if let Some(spec) = spec {
                push_lit(buf, trim_spec_keyword(*spec), NodeKind::Generic);
            }
            if let Some(trim_char) = trim_char {
                expr(buf, state, trim_char);
            }
            if spec.is_some() || trim_char.is_some() {
                push_lit(buf, "from", NodeKind::Generic);
            }
            expr(buf, state, inner);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::CurrentDate => push_lit(buf, "current_date", NodeKind::Literal),
        Expr::CurrentTime => push_lit(buf, "current_time", NodeKind::Literal),
        Expr::CurrentTimestamp => push_lit(buf, "current_timestamp", NodeKind::Literal),
        Expr::LocalDate => {
            push_lit(buf, "local", NodeKind::Literal);
            push_lit(buf, "date", NodeKind::Literal);
        }
        Expr::LocalTime => {
            push_lit(buf, "local", NodeKind::Literal);
            push_lit(buf, "time", NodeKind::Literal);
        }
        Expr::LocalDateTime => {
            push_lit(buf, "local", NodeKind::Literal);
            push_lit(buf, "datetime", NodeKind::Literal);
        }
        Expr::TypeOf(inner) => {
            push_lit(buf, "type", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            expr(buf, state, inner);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Index(p) => {
            push_lit(buf, "index", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            path(buf, p);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Size(p) => {
            push_lit(buf, "size", NodeKind::Function);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            path(buf, p);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::Treat { path: inner, as_type, suffix } => {
            push_lit(buf, "treat", NodeKind::Path);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            path(buf, inner);
            push_lit(buf, "as", NodeKind::Path);
            let type_start = buf.len();
            for (i, segment) in as_type.iter().enumerate() {
                if i > 0 {
                    push_punct(buf, ".");
                }
                push_owned(buf, segment.clone(), NodeKind::Path);
            }
            close_path_run(buf, type_start);
            nospace(buf);
            let close_paren_start = buf.len();
            push_punct(buf, ")");
            dotted_continuation(buf, suffix);
            close_path_run(buf, close_paren_start);
        }
        Expr::Subquery(sub) => {
            push_punct(buf, "(");
            nospace(buf);
            subquery(buf, state, sub);
            nospace(buf);
            push_punct(buf, ")");
        }
        Expr::SpelEscape(raw) => {
            push_owned(buf, raw.clone(), NodeKind::SpelEscape);
        }
        Expr::New(ctor) => super::select::constructor(buf, state, ctor),
    }
}

fn not_prefix(buf: &mut TokenBuffer, not: bool) {
    if not {
        push_lit(buf, "not", NodeKind::Generic);
    }
}

fn in_list(buf: &mut TokenBuffer, state: &mut WalkerState, list: &InList) {
    push_punct(buf, "(");
    nospace(buf);
    match list {
        InList::Exprs(exprs) => emit_comma_list(buf, state, exprs, |buf, state, e| expr(buf, state, e)),
        InList::Subquery(sub) => subquery(buf, state, sub),
        InList::Param(p) => param(buf, p),
    }
    nospace(buf);
    push_punct(buf, ")");
}

fn case_expr(buf: &mut TokenBuffer, state: &mut WalkerState, case: &CaseExpr) {
    push_lit(buf, "case", NodeKind::Case);
    if let Some(operand) = &case.case_operand {
        expr(buf, state, operand);
    }
    for (when, then) in &case.when_clauses {
        push_lit(buf, "when", NodeKind::Case);
        expr(buf, state, when);
        push_lit(buf, "then", NodeKind::Case);
        expr(buf, state, then);
    }
    if let Some(else_expr) = &case.else_expr {
        push_lit(buf, "else", NodeKind::Case);
        expr(buf, state, else_expr);
    }
    push_lit(buf, "end", NodeKind::Case);
}

fn literal(buf: &mut TokenBuffer, lit: &Literal) {
    match lit {
        Literal::String(s) => push_owned(buf, format!("'{}'", s.replace('\'', "''")), NodeKind::Literal),
        Literal::Int(s) | Literal::Float(s) => push_owned(buf, s.clone(), NodeKind::Literal),
        Literal::Boolean(b) => push_lit(buf, if *b { "true" } else { "false" }, NodeKind::Literal),
        Literal::Enum(segments) => dotted_name(buf, segments),
        Literal::EntityType(name) => push_owned(buf, name.clone(), NodeKind::Literal),
        Literal::DateTime(raw) => push_owned(buf, raw.clone(), NodeKind::Literal),
    }
}

fn param(buf: &mut TokenBuffer, p: &Param) {
    match p {
        Param::Positional(Some(n)) => push_owned(buf, format!("?{n}"), NodeKind::Param),
        Param::Positional(None) => push_lit(buf, "?", NodeKind::Param),
        Param::Named(name) => push_owned(buf, format!(":{name}"), NodeKind::Param),
    }
}

pub(crate) fn subquery(buf: &mut TokenBuffer, state: &mut WalkerState, sub: &Subquery) {
    super::select::subquery_body(buf, state, sub);
}

fn aggregate_name(func: AggregateFunc) -> &'static str {
    match func {
        AggregateFunc::Avg => "avg",
        AggregateFunc::Max => "max",
        AggregateFunc::Min => "min",
        AggregateFunc::Sum => "sum",
        AggregateFunc::Count => "count",
    }
}

fn arith_symbol(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "+",
        ArithOp::Sub => "-",
        ArithOp::Mul => "*",
        ArithOp::Div => "/",
    }
}

fn comp_symbol(op: CompOp) -> &'static str {
    match op {
        CompOp::Eq => "=",
        CompOp::Neq => "<>",
        CompOp::Lt => "<",
        CompOp::Lte => "<=",
        CompOp::Gt => ">",
        CompOp::Gte => ">=",
    }
}

fn trim_spec_keyword(spec: TrimSpec) -> &'static str {
    match spec {
        TrimSpec::Leading => "leading",
        TrimSpec::Trailing => "trailing",
        TrimSpec::Both => "both",
    }
}

fn all_any_keyword(kind: AllAnyKind) -> &'static str {
    match kind {
        AllAnyKind::All => "all",
        AllAnyKind::Any => "any",
        AllAnyKind::Some => "some",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpql_parser::ast::{CompOp, Literal};

    #[test]
    fn path_collapses_to_single_nospace_run() {
        let mut buf = TokenBuffer::new();
        path(
            &mut buf,
            &PathExpr {
                qualifier: PathQualifier::None,
                segments: vec!["o".into(), "customer".into(), "name".into()],
            },
        );
        let tokens = buf.as_slice();
        assert_eq!(tokens.len(), 5);
        for t in &tokens[..4] {
            assert_eq!(t.trailing, Trailing::NoSpace);
        }
        assert_eq!(tokens[4].trailing, Trailing::Space);
    }

    #[test]
    fn qualified_path_wraps_first_segment() {
        let mut buf = TokenBuffer::new();
        path(
            &mut buf,
            &PathExpr {
                qualifier: PathQualifier::Key,
                segments: vec!["e".into(), "name".into()],
            },
        );
        let mut state = WalkerState::new();
        let rendered = crate::render::render(buf.as_slice(), &state);
        state.capture_alias("unused");
        assert_eq!(rendered, "key(e).name");
    }

    #[test]
    fn treat_keeps_interior_spaces_with_suffix() {
        let mut buf = TokenBuffer::new();
        let mut state = WalkerState::new();
        expr(
            &mut buf,
            &mut state,
            &Expr::Treat {
                path: PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["p".into(), "owner".into()],
                },
                as_type: vec!["Person".into()],
                suffix: vec!["name".into()],
            },
        );
        assert_eq!(
            crate::render::render(buf.as_slice(), &state),
            "treat(p.owner as Person).name"
        );
    }

    #[test]
    fn treat_keeps_interior_spaces_without_suffix() {
        let mut buf = TokenBuffer::new();
        let mut state = WalkerState::new();
        expr(
            &mut buf,
            &mut state,
            &Expr::Treat {
                path: PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["p".into(), "owner".into()],
                },
                as_type: vec!["Person".into()],
                suffix: vec![],
            },
        );
        assert_eq!(
            crate::render::render(buf.as_slice(), &state),
            "treat(p.owner as Person)"
        );
    }

    #[test]
    fn comparison_keeps_spaces_around_operator() {
        let mut buf = TokenBuffer::new();
        let mut state = WalkerState::new();
        expr(
            &mut buf,
            &mut state,
            &Expr::Comparison {
                op: CompOp::Eq,
                lhs: Box::new(Expr::Path(PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["o".into(), "id".into()],
                })),
                rhs: Box::new(Expr::Literal(Literal::Int("1".into()))),
            },
        );
        assert_eq!(crate::render::render(buf.as_slice(), &state), "o.id = 1");
    }
}
