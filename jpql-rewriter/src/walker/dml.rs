//! `UPDATE` and `DELETE` statement emission. Neither
//! participates in sort injection or count-query synthesis — those are
//! select-only concerns.

use jpql_parser::ast::{DeleteStatement, UpdateStatement};

use super::{emit_comma_list, emit_path, push_lit, push_owned};
use crate::buffer::TokenBuffer;
use crate::state::WalkerState;
use crate::token::NodeKind;

pub(crate) fn update_statement(stmt: &UpdateStatement, state: &mut WalkerState) -> TokenBuffer {
    let mut buf = TokenBuffer::new();
    push_lit(&mut buf, "update", NodeKind::From);
    entity_name(&mut buf, &stmt.entity_name);
    if let Some(alias) = &stmt.alias {
        state.capture_alias(alias);
        push_owned(&mut buf, alias.clone(), NodeKind::From);
    }
    push_lit(&mut buf, "set", NodeKind::Generic);
    emit_comma_list(&mut buf, state, &stmt.assignments, |buf, state, (path, value)| {
        emit_path(buf, path);
        push_lit(buf, "=", NodeKind::Generic);
        super::emit_expr(buf, state, value);
    });
    if let Some(where_clause) = &stmt.where_clause {
        push_lit(&mut buf, "where", NodeKind::Where);
        super::emit_expr(&mut buf, state, where_clause);
    }
    buf
}

pub(crate) fn delete_statement(stmt: &DeleteStatement, state: &mut WalkerState) -> TokenBuffer {
    let mut buf = TokenBuffer::new();
    push_lit(&mut buf, "delete", NodeKind::From);
    push_lit(&mut buf, "from", NodeKind::From);
    entity_name(&mut buf, &stmt.entity_name);
    if let Some(alias) = &stmt.alias {
        state.capture_alias(alias);
        push_owned(&mut buf, alias.clone(), NodeKind::From);
    }
    if let Some(where_clause) = &stmt.where_clause {
        push_lit(&mut buf, "where", NodeKind::Where);
        super::emit_expr(&mut buf, state, where_clause);
    }
    buf
}

fn entity_name(buf: &mut TokenBuffer, segments: &[String]) {
    let run_start = buf.len();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            push_lit(buf, ".", NodeKind::From);
        }
        push_owned(buf, segment.clone(), NodeKind::From);
    }
    crate::buffer::close_path_run(buf, run_start);
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpql_parser::ast::{CompOp, Expr, Literal, PathExpr, PathQualifier};

    #[test]
    fn update_statement_renders_set_and_where() {
        let stmt = UpdateStatement {
            entity_name: vec!["Order".into()],
            alias: Some("o".into()),
            assignments: vec![(
                PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["status".into()],
                },
                Expr::Literal(Literal::String("SHIPPED".into())),
            )],
            where_clause: Some(Expr::Comparison {
                op: CompOp::Eq,
                lhs: Box::new(Expr::Path(PathExpr {
                    qualifier: PathQualifier::None,
                    segments: vec!["o".into(), "id".into()],
                })),
                rhs: Box::new(Expr::Param(jpql_parser::ast::Param::Positional(Some(1)))),
            }),
        };
        let mut state = WalkerState::new();
        let buf = update_statement(&stmt, &mut state);
        assert_eq!(
            crate::render::render(buf.as_slice(), &state),
            "update Order o set status = 'SHIPPED' where o.id = ?1"
        );
    }
}
