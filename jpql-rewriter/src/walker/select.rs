//! `SELECT` statement emission: select clause, from clause and joins,
//! where/group-by/having, and the count-query and sort-injection control
//! flow that wraps the base clauses.

use jpql_parser::ast::{
    ConstructorExpr, FromClause, IdentificationVariableDeclaration, Join, JoinCondition, JoinKind,
    JoinTarget, OrderDirection, RangeVariableDeclaration, SelectClause, SelectItem,
    SelectStatement, Subquery,
};

use super::{emit_comma_list, emit_path, push_lit, push_owned, push_punct};
use crate::buffer::{nospace, TokenBuffer};
use crate::state::WalkerState;
use crate::token::{NodeKind, Token, TokenText, Trailing};

pub(crate) fn select_statement(stmt: &SelectStatement, state: &mut WalkerState) -> TokenBuffer {
    let mut buf = TokenBuffer::new();

    if state.count_mode {
        count_select_clause(&mut buf, state, stmt);
    } else {
        select_clause(&mut buf, state, &stmt.select);
    }

    from_clause(&mut buf, state, &stmt.from);

    if let Some(where_clause) = &stmt.where_clause {
        push_lit(&mut buf, "where", NodeKind::Where);
        super::emit_expr(&mut buf, state, where_clause);
    }

    if let Some(group_by) = &stmt.group_by {
        push_lit(&mut buf, "group by", NodeKind::GroupBy);
        emit_comma_list(&mut buf, state, group_by, |buf, state, e| super::emit_expr(buf, state, e));
    }

    if let Some(having) = &stmt.having {
        push_lit(&mut buf, "having", NodeKind::Having);
        super::emit_expr(&mut buf, state, having);
    }

    if !state.count_mode {
        if let Some(order_by) = &stmt.order_by {
            push_lit(&mut buf, "order by", NodeKind::OrderBy);
            emit_comma_list(&mut buf, state, order_by, |buf, state, item| {
                super::emit_expr(buf, state, &item.expr);
                match item.direction {
                    Some(OrderDirection::Asc) => push_lit(buf, "asc", NodeKind::OrderBy),
                    Some(OrderDirection::Desc) => push_lit(buf, "desc", NodeKind::OrderBy),
                    None => {}
                }
            });
        }
        super::inject_sort(&mut buf, state);
    }

    buf
}

fn select_clause(buf: &mut TokenBuffer, state: &mut WalkerState, select: &SelectClause) {
    push_lit(buf, "select", NodeKind::Select);
    if select.distinct {
        push_lit(buf, "distinct", NodeKind::Select);
    }
    let start = buf.len();
    emit_comma_list(buf, state, &select.items, |buf, state, item| select_item(buf, state, item));
    state.set_projection(buf.as_slice()[start..].to_vec());
}

fn select_item(buf: &mut TokenBuffer, state: &mut WalkerState, item: &SelectItem) {
    match item {
        SelectItem::Expr(e) => super::emit_expr(buf, state, e),
        SelectItem::Constructor(ctor) => constructor(buf, state, ctor),
        SelectItem::Object(alias) => {
            push_lit(buf, "object", NodeKind::Select);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            push_owned(buf, alias.clone(), NodeKind::Path);
            nospace(buf);
            push_punct(buf, ")");
        }
    }
}

/// `NEW com.example.Dto(args...)`: marks the walk's
/// constructor-expression flag, used by count-query synthesis to decide
/// whether the count falls back to the captured alias.
pub(crate) fn constructor(buf: &mut TokenBuffer, state: &mut WalkerState, ctor: &ConstructorExpr) {
    state.mark_constructor_expression();
    push_lit(buf, "new", NodeKind::Constructor);
    let run_start = buf.len();
    for (i, segment) in ctor.class_name.iter().enumerate() {
        if i > 0 {
            push_punct(buf, ".");
        }
        push_owned(buf, segment.clone(), NodeKind::Constructor);
    }
    crate::buffer::close_path_run(buf, run_start);
    nospace(buf);
    push_punct(buf, "(");
    nospace(buf);
    emit_comma_list(buf, state, &ctor.args, |buf, state, arg| super::emit_expr(buf, state, arg));
    nospace(buf);
    push_punct(buf, ")");
}

fn from_clause(buf: &mut TokenBuffer, state: &mut WalkerState, from: &FromClause) {
    push_lit(buf, "from", NodeKind::From);
    emit_comma_list(buf, state, &from.roots, |buf, state, root| {
        identification_variable_declaration(buf, state, root)
    });
}

fn identification_variable_declaration(
    buf: &mut TokenBuffer,
    state: &mut WalkerState,
    decl: &IdentificationVariableDeclaration,
) {
    range_variable_declaration(buf, state, &decl.range);
    for join in &decl.joins {
        join_clause(buf, state, join);
    }
}

/// Captures the walk's primary alias the first time a range-variable
/// declaration is visited — i.e. the root of the first `FROM` item, never
/// a join alias.
fn range_variable_declaration(buf: &mut TokenBuffer, state: &mut WalkerState, decl: &RangeVariableDeclaration) {
    state.capture_alias(&decl.alias);
    let run_start = buf.len();
    for (i, segment) in decl.entity_name.iter().enumerate() {
        if i > 0 {
            push_punct(buf, ".");
        }
        push_owned(buf, segment.clone(), NodeKind::From);
    }
    crate::buffer::close_path_run(buf, run_start);
    if decl.as_keyword {
        push_lit(buf, "as", NodeKind::From);
    }
    push_owned(buf, decl.alias.clone(), NodeKind::From);
}

fn join_clause(buf: &mut TokenBuffer, state: &mut WalkerState, join: &Join) {
    match join.kind {
        JoinKind::Inner => push_lit(buf, "join", NodeKind::Join),
        JoinKind::Left => push_lit(buf, "left join", NodeKind::Join),
        JoinKind::LeftOuter => push_lit(buf, "left outer join", NodeKind::Join),
    }
    if join.fetch {
        push_lit(buf, "fetch", NodeKind::Join);
    }
    match &join.target {
        JoinTarget::Path(p) => emit_path(buf, p),
        JoinTarget::Treat { path: p, as_type } => {
            push_lit(buf, "treat", NodeKind::Join);
            nospace(buf);
            push_punct(buf, "(");
            nospace(buf);
            emit_path(buf, p);
            push_lit(buf, "as", NodeKind::Join);
            let run_start = buf.len();
            for (i, segment) in as_type.iter().enumerate() {
                if i > 0 {
                    push_punct(buf, ".");
                }
                push_owned(buf, segment.clone(), NodeKind::Join);
            }
            crate::buffer::close_path_run(buf, run_start);
            nospace(buf);
            push_punct(buf, ")");
        }
    }
    if let Some(alias) = &join.alias {
        push_lit(buf, "as", NodeKind::Join);
        push_owned(buf, alias.clone(), NodeKind::Join);
    }
    if let Some(condition) = &join.condition {
        match condition {
            JoinCondition::On(e) => {
                push_lit(buf, "on", NodeKind::Join);
                super::emit_expr(buf, state, e);
            }
            JoinCondition::With(e) => {
                push_lit(buf, "with", NodeKind::Join);
                super::emit_expr(buf, state, e);
            }
        }
    }
}

pub(crate) fn subquery_body(buf: &mut TokenBuffer, state: &mut WalkerState, sub: &Subquery) {
    select_clause(buf, state, &sub.select);
    from_clause(buf, state, &sub.from);
    if let Some(where_clause) = &sub.where_clause {
        push_lit(buf, "where", NodeKind::Where);
        super::emit_expr(buf, state, where_clause);
    }
    if let Some(group_by) = &sub.group_by {
        push_lit(buf, "group by", NodeKind::GroupBy);
        emit_comma_list(buf, state, group_by, |buf, state, e| super::emit_expr(buf, state, e));
    }
    if let Some(having) = &sub.having {
        push_lit(buf, "having", NodeKind::Having);
        super::emit_expr(buf, state, having);
    }
}

/// Count-query synthesis: replaces the select clause with
/// `SELECT count(<projection>)`, where `<projection>` is:
///
/// - the caller's `count_projection` override, if one was supplied;
/// - otherwise, if the base select used `DISTINCT`: the captured alias when
///   the projection is constructor-shaped (a constructor can't be counted
///   directly, and `distinct` over a constructor call isn't valid JPQL
///   either way), else the `distinct` keyword followed by the base select's
///   own projection tokens, replayed verbatim
///   (`count(distinct item1, item2, …)`);
/// - otherwise (no `DISTINCT`) the captured alias, regardless of the
///   projection's own shape.
fn count_select_clause(buf: &mut TokenBuffer, state: &mut WalkerState, stmt: &SelectStatement) {
    // Walk (and discard) the base select clause first so alias capture and
    // the constructor-expression flag observe it exactly as the base walk
    // would, before we decide what to put inside `count(...)`.
    let mut scratch = TokenBuffer::new();
    select_clause(&mut scratch, state, &stmt.select);

    push_lit(buf, "select", NodeKind::Count);
    push_lit(buf, "count", NodeKind::Count);
    nospace(buf);
    push_punct(buf, "(");
    nospace(buf);

    if let Some(projection) = state.count_projection.clone() {
        push_owned(buf, projection, NodeKind::Count);
    } else if stmt.select.distinct {
        if state.has_constructor_expression() {
            push_alias_deferred(buf);
        } else {
            push_lit(buf, "distinct", NodeKind::Count);
            if let Some(tokens) = state.projection() {
                for token in tokens.to_vec() {
                    buf.push(token);
                }
            }
        }
    } else {
        push_alias_deferred(buf);
    }
    nospace(buf);
    push_punct(buf, ")");
}

/// Pushes the captured alias as a token resolved against the finished
/// walker state, not the alias known at emission time. `select_clause` runs
/// before `from_clause` (`select_statement` above), so at this point in the
/// walk `range_variable_declaration` — the only place that captures the
/// alias — has not run yet; an eager `push_owned(state.alias()...)` here
/// would always see the empty placeholder.
fn push_alias_deferred(buf: &mut TokenBuffer) {
    buf.push(Token::new(
        TokenText::deferred(|state| state.alias().to_string()),
        NodeKind::Count,
        Trailing::Space,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpql_parser::ast::{PathExpr, PathQualifier};

    #[test]
    fn range_variable_declaration_captures_alias_once() {
        let mut buf = TokenBuffer::new();
        let mut state = WalkerState::new();
        range_variable_declaration(
            &mut buf,
            &mut state,
            &RangeVariableDeclaration {
                entity_name: vec!["Order".into()],
                as_keyword: false,
                alias: "o".into(),
            },
        );
        range_variable_declaration(
            &mut buf,
            &mut state,
            &RangeVariableDeclaration {
                entity_name: vec!["Customer".into()],
                as_keyword: true,
                alias: "c".into(),
            },
        );
        assert_eq!(state.alias(), "o");
    }

    #[test]
    fn join_path_renders_with_fetch_and_on() {
        let mut buf = TokenBuffer::new();
        let mut state = WalkerState::new();
        join_clause(
            &mut buf,
            &mut state,
            &Join {
                kind: JoinKind::Left,
                fetch: true,
                target: JoinTarget::Path(PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["o".into(), "lineItems".into()],
                }),
                alias: Some("li".into()),
                condition: None,
            },
        );
        assert_eq!(
            crate::render::render(buf.as_slice(), &state),
            "left join fetch o.lineItems as li"
        );
    }
}
