use super::expr;
use super::Parser;
use crate::ast::{
    ConstructorExpr, FromClause, IdentificationVariableDeclaration, Join, JoinCondition,
    JoinKind, JoinTarget, OrderByItem, OrderDirection, PathExpr, PathQualifier,
    RangeVariableDeclaration, SelectClause, SelectItem, SelectStatement, Subquery,
};
use crate::lexer::TokenKind;

/// `select_statement ::= select_clause from_clause [where_clause]
///     [groupby_clause] [having_clause] [orderby_clause]`
pub(crate) fn select_statement(p: &mut Parser) -> SelectStatement {
    let select = select_clause(p);
    p.expect_keyword("FROM");
    let from = from_clause(p);
    let where_clause = where_clause(p);
    let group_by = group_by_clause(p);
    let having = having_clause(p);
    let order_by = order_by_clause(p);
    SelectStatement {
        select,
        from,
        where_clause,
        group_by,
        having,
        order_by,
    }
}

/// `select_clause ::= SELECT [DISTINCT] select_item {, select_item}`
pub(crate) fn select_clause(p: &mut Parser) -> SelectClause {
    p.expect_keyword("SELECT");
    let distinct = p.eat_keyword("DISTINCT");
    let mut items = vec![select_item(p)];
    while p.eat_kind(TokenKind::Comma) {
        items.push(select_item(p));
    }
    SelectClause { distinct, items }
}

fn select_item(p: &mut Parser) -> SelectItem {
    if p.at_keyword("NEW") {
        SelectItem::Constructor(constructor_expression(p))
    } else if p.at_keyword("OBJECT") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let alias = p.expect_ident();
        p.expect_kind(TokenKind::RParen);
        SelectItem::Object(alias)
    } else {
        SelectItem::Expr(expr::expr(p))
    }
}

/// `constructor_expression ::= NEW constructor_name (constructor_item {, constructor_item})`
pub(crate) fn constructor_expression(p: &mut Parser) -> ConstructorExpr {
    p.expect_keyword("NEW");
    let class_name = p.parse_dotted_name();
    p.expect_kind(TokenKind::LParen);
    let mut args = vec![expr::expr(p)];
    while p.eat_kind(TokenKind::Comma) {
        args.push(expr::expr(p));
    }
    p.expect_kind(TokenKind::RParen);
    ConstructorExpr { class_name, args }
}

/// `from_clause ::= FROM identification_variable_declaration {, identification_variable_declaration}`
pub(crate) fn from_clause(p: &mut Parser) -> FromClause {
    let mut roots = vec![identification_variable_declaration(p)];
    while p.eat_kind(TokenKind::Comma) {
        roots.push(identification_variable_declaration(p));
    }
    FromClause { roots }
}

fn identification_variable_declaration(p: &mut Parser) -> IdentificationVariableDeclaration {
    let range = range_variable_declaration(p);
    let mut joins = Vec::new();
    while let Some(join) = maybe_join(p) {
        joins.push(join);
    }
    IdentificationVariableDeclaration { range, joins }
}

/// `range_variable_declaration ::= entity_name [AS] identification_variable`
fn range_variable_declaration(p: &mut Parser) -> RangeVariableDeclaration {
    let entity_name = p.parse_dotted_name();
    let as_keyword = p.eat_keyword("AS");
    let alias = p.expect_ident();
    RangeVariableDeclaration {
        entity_name,
        as_keyword,
        alias,
    }
}

fn maybe_join(p: &mut Parser) -> Option<Join> {
    let kind = if p.at_keyword("JOIN") {
        Some(JoinKind::Inner)
    } else if p.at_keyword("INNER") && p.at_keyword_nth(1, "JOIN") {
        Some(JoinKind::Inner)
    } else if p.at_keyword("LEFT") && p.at_keyword_nth(1, "JOIN") {
        Some(JoinKind::Left)
    } else if p.at_keyword("LEFT") && p.at_keyword_nth(1, "OUTER") {
        Some(JoinKind::LeftOuter)
    } else {
        None
    };
    let kind = kind?;
    if p.at_keyword("INNER") {
        p.bump();
    } else if p.at_keyword("LEFT") {
        p.bump();
        if p.at_keyword("OUTER") {
            p.bump();
        }
    }
    p.expect_keyword("JOIN");
    let fetch = p.eat_keyword("FETCH");

    let target = if p.at_keyword("TREAT") {
        p.bump();
        p.expect_kind(TokenKind::LParen);
        let path = join_path(p);
        p.expect_keyword("AS");
        let as_type = p.parse_dotted_name();
        p.expect_kind(TokenKind::RParen);
        JoinTarget::Treat { path, as_type }
    } else {
        JoinTarget::Path(join_path(p))
    };

    let alias = if fetch {
        // A fetch join may still bind an identification variable in JPQL 3.1.
        if p.at_kind(TokenKind::Ident) || p.at_keyword("AS") {
            p.eat_keyword("AS");
            Some(p.expect_ident())
        } else {
            None
        }
    } else {
        p.eat_keyword("AS");
        Some(p.expect_ident())
    };

    let condition = if p.eat_keyword("ON") {
        Some(JoinCondition::On(expr::expr(p)))
    } else if p.eat_keyword("WITH") {
        Some(JoinCondition::With(expr::expr(p)))
    } else {
        None
    };

    Some(Join {
        kind,
        fetch,
        target,
        alias,
        condition,
    })
}

/// The join path is a dotted collection/single-valued path expression; it
/// does not carry the qualifier forms (`KEY`/`VALUE`/`ENTRY`) that a general
/// path expression can, since a join target must name a navigable
/// association.
fn join_path(p: &mut Parser) -> PathExpr {
    PathExpr {
        qualifier: PathQualifier::None,
        segments: p.parse_dotted_name(),
    }
}

fn where_clause(p: &mut Parser) -> Option<crate::ast::Expr> {
    if p.eat_keyword("WHERE") {
        Some(expr::expr(p))
    } else {
        None
    }
}

fn group_by_clause(p: &mut Parser) -> Option<Vec<crate::ast::Expr>> {
    if !p.at_keyword("GROUP") {
        return None;
    }
    p.bump();
    p.expect_keyword("BY");
    let mut items = vec![expr::expr(p)];
    while p.eat_kind(TokenKind::Comma) {
        items.push(expr::expr(p));
    }
    Some(items)
}

fn having_clause(p: &mut Parser) -> Option<crate::ast::Expr> {
    if p.eat_keyword("HAVING") {
        Some(expr::expr(p))
    } else {
        None
    }
}

fn order_by_clause(p: &mut Parser) -> Option<Vec<OrderByItem>> {
    if !p.at_keyword("ORDER") {
        return None;
    }
    p.bump();
    p.expect_keyword("BY");
    let mut items = vec![order_by_item(p)];
    while p.eat_kind(TokenKind::Comma) {
        items.push(order_by_item(p));
    }
    Some(items)
}

fn order_by_item(p: &mut Parser) -> OrderByItem {
    let e = expr::expr(p);
    let direction = if p.eat_keyword("DESC") {
        Some(OrderDirection::Desc)
    } else if p.eat_keyword("ASC") {
        Some(OrderDirection::Asc)
    } else {
        None
    };
    OrderByItem { expr: e, direction }
}

/// `subquery ::= simple_select_clause from_clause [where_clause] [groupby_clause] [having_clause]`
pub(crate) fn subquery(p: &mut Parser) -> Subquery {
    let select = select_clause(p);
    p.expect_keyword("FROM");
    let from = from_clause(p);
    let where_clause = where_clause(p);
    let group_by = group_by_clause(p);
    let having = having_clause(p);
    Subquery {
        select,
        from,
        where_clause,
        group_by,
        having,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse_select(input: &str) -> SelectStatement {
        let mut p = Parser::new(input);
        let stmt = super::select_statement(&mut p);
        assert!(p.errors().is_empty(), "unexpected errors: {:?}", p.errors());
        stmt
    }

    #[test]
    fn parses_basic_select() {
        let stmt = parse_select("select u from User u");
        assert_eq!(stmt.from.roots.len(), 1);
        assert_eq!(stmt.from.roots[0].range.alias, "u");
        assert!(stmt.where_clause.is_none());
    }

    #[test]
    fn parses_join_with_fetch_and_on() {
        let stmt = parse_select(
            "select o from Order o left join fetch o.lineItems li on li.active = true",
        );
        let join = &stmt.from.roots[0].joins[0];
        assert_eq!(join.kind, JoinKind::Left);
        assert!(join.fetch);
        assert!(matches!(join.condition, Some(JoinCondition::On(_))));
    }

    #[test]
    fn parses_treat_join() {
        let stmt = parse_select("select p from Pet p join treat(p.owner as Person) as per");
        let join = &stmt.from.roots[0].joins[0];
        assert!(matches!(join.target, JoinTarget::Treat { .. }));
    }

    #[test]
    fn parses_constructor_select_item() {
        let stmt = parse_select("select new com.example.Dto(u.a, u.b) from User u");
        assert!(matches!(
            stmt.select.items[0],
            SelectItem::Constructor(ref c) if c.class_name == vec!["com", "example", "Dto"] && c.args.len() == 2
        ));
    }
}
