//! The syntax-directed token emitter: a tagged-variant
//! dispatch over [`jpql_parser::ast`] node kinds, rather than a deep visitor
//! class hierarchy. Each function
//! below corresponds to one or more grammar productions and returns the
//! token buffer for that subtree; the walker state threaded through by
//! mutable reference is the one place alias capture, projection capture,
//! and the constructor-expression flag live.

mod dml;
mod expr;
mod select;
mod sort;

use jpql_parser::ast::Statement;

use crate::buffer::{clip, nospace, space, TokenBuffer};
use crate::state::WalkerState;
use crate::token::{NodeKind, Token, Trailing};

pub(crate) use expr::path as emit_path;

/// Walks a complete statement, returning its token buffer. `state` carries
/// the sort list and count-mode flag the caller configured before the walk,
/// and accumulates alias/projection/constructor-flag as a side effect.
pub(crate) fn walk_statement(stmt: &Statement, state: &mut WalkerState) -> TokenBuffer {
    match stmt {
        Statement::Select(s) => select::select_statement(s, state),
        Statement::Update(u) => dml::update_statement(u, state),
        Statement::Delete(d) => dml::delete_statement(d, state),
    }
}

fn push_lit(buf: &mut TokenBuffer, text: &'static str, kind: NodeKind) {
    buf.push(Token::literal(text, kind, Trailing::Space));
}

fn push_owned(buf: &mut TokenBuffer, text: impl Into<String>, kind: NodeKind) {
    buf.push(Token::owned(text, kind, Trailing::Space));
}

fn push_punct(buf: &mut TokenBuffer, text: &'static str) {
    buf.push(Token::literal(text, NodeKind::Punctuation, Trailing::Space));
}

/// Comma-separated list rule shared by select items, group-by items,
/// order-by items, constructor args, subquery from-lists, and function
/// arguments: push a comma after
/// every item, then clip the final one and restore space.
fn emit_comma_list<T>(
    buf: &mut TokenBuffer,
    state: &mut WalkerState,
    items: &[T],
    mut emit_item: impl FnMut(&mut TokenBuffer, &mut WalkerState, &T),
) {
    for item in items {
        emit_item(buf, state, item);
        nospace(buf);
        push_punct(buf, ",");
    }
    if !items.is_empty() {
        clip(buf);
        space(buf);
    }
}

/// Emits a parenthesised `name(args...)` call: the name and `(` are
/// NO_SPACE, arguments are comma-separated, and the closing paren's
/// trailing policy is the caller's choice — SPACE normally, NO_SPACE when
/// the call sits inside a path run that will be collapsed anyway.
fn emit_call(
    buf: &mut TokenBuffer,
    state: &mut WalkerState,
    name: impl Into<String>,
    args: &[jpql_parser::ast::Expr],
    after_close: Trailing,
) {
    push_owned(buf, name, NodeKind::Function);
    nospace(buf);
    push_punct(buf, "(");
    nospace(buf);
    emit_comma_list(buf, state, args, |buf, state, arg| {
        expr::expr(buf, state, arg)
    });
    nospace(buf);
    push_punct(buf, ")");
    buf_set_last_trailing(buf, after_close);
}

fn buf_set_last_trailing(buf: &mut TokenBuffer, trailing: Trailing) {
    match trailing {
        Trailing::Space => space(buf),
        Trailing::NoSpace => nospace(buf),
    }
}

pub(crate) use dml::{delete_statement, update_statement};
pub(crate) use expr::{expr as emit_expr, subquery as emit_subquery};
pub(crate) use select::select_statement;
pub(crate) use sort::inject_sort;
