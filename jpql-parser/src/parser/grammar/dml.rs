use super::expr;
use super::Parser;
use crate::ast::{DeleteStatement, PathExpr, PathQualifier, UpdateStatement};
use crate::lexer::TokenKind;

/// `update_statement ::= UPDATE entity_name [[AS] identification_variable]
///     SET update_item {, update_item} [where_clause]`
pub(crate) fn update_statement(p: &mut Parser) -> UpdateStatement {
    p.expect_keyword("UPDATE");
    let entity_name = p.parse_dotted_name();
    let alias = parse_optional_alias(p);
    p.expect_keyword("SET");
    let mut assignments = vec![update_item(p)];
    while p.eat_kind(TokenKind::Comma) {
        assignments.push(update_item(p));
    }
    let where_clause = if p.eat_keyword("WHERE") {
        Some(expr::expr(p))
    } else {
        None
    };
    UpdateStatement {
        entity_name,
        alias,
        assignments,
        where_clause,
    }
}

fn update_item(p: &mut Parser) -> (PathExpr, crate::ast::Expr) {
    let path = PathExpr {
        qualifier: PathQualifier::None,
        segments: p.parse_dotted_name(),
    };
    p.expect_kind(TokenKind::Eq);
    let value = expr::expr(p);
    (path, value)
}

/// `delete_statement ::= DELETE FROM entity_name [[AS] identification_variable] [where_clause]`
pub(crate) fn delete_statement(p: &mut Parser) -> DeleteStatement {
    p.expect_keyword("DELETE");
    p.expect_keyword("FROM");
    let entity_name = p.parse_dotted_name();
    let alias = parse_optional_alias(p);
    let where_clause = if p.eat_keyword("WHERE") {
        Some(expr::expr(p))
    } else {
        None
    };
    DeleteStatement {
        entity_name,
        alias,
        where_clause,
    }
}

fn parse_optional_alias(p: &mut Parser) -> Option<String> {
    let as_keyword = p.eat_keyword("AS");
    if as_keyword || p.at_kind(TokenKind::Ident) {
        Some(p.expect_ident())
    } else {
        None
    }
}
