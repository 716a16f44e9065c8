pub(crate) mod dml;
pub(crate) mod expr;
pub(crate) mod select;

use super::Parser;
use crate::ast::Statement;

/// `QL_statement ::= select_statement | update_statement | delete_statement`
pub(crate) fn statement(p: &mut Parser) -> Statement {
    if p.at_keyword("UPDATE") {
        Statement::Update(dml::update_statement(p))
    } else if p.at_keyword("DELETE") {
        Statement::Delete(dml::delete_statement(p))
    } else {
        Statement::Select(select::select_statement(p))
    }
}
