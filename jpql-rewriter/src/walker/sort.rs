//! Sort injection: appends the caller-supplied
//! [`crate::state::SortOrder`] list to whatever `ORDER BY` clause the base
//! query already has, or introduces one if it has none. Only applies to the
//! non-count walk — the count-query synthesis path never visits this.

use super::{emit_comma_list, push_lit, push_punct};
use crate::buffer::{nospace, TokenBuffer};
use crate::state::{Direction, WalkerState};
use crate::token::{NodeKind, Token, TokenText, Trailing};

pub(crate) fn inject_sort(buf: &mut TokenBuffer, state: &mut WalkerState) {
    if state.sort.is_empty() {
        return;
    }

    let already_has_order_by = buf.as_slice().iter().any(|t| t.context == NodeKind::OrderBy);
    if already_has_order_by {
        nospace(buf);
        push_punct(buf, ",");
    } else {
        push_lit(buf, "order by", NodeKind::OrderBy);
    }

    let sort = state.sort.clone();
    emit_comma_list(buf, state, &sort, |buf, _state, order| sort_item(buf, order));
}

fn sort_item(buf: &mut TokenBuffer, order: &crate::state::SortOrder) {
    let property = order.property.clone();
    let ignore_case = order.ignore_case;

    if ignore_case {
        push_lit(buf, "lower", NodeKind::Sort);
        nospace(buf);
        push_punct(buf, "(");
        nospace(buf);
    }

    // Deferred: the alias is not known until the first range-variable
    // declaration is visited, which for the count-query path (which never
    // reaches this function) or a `FROM` clause following the projection
    // may happen after sort injection is queued.
    buf.push(deferred_property_token(property));

    if ignore_case {
        nospace(buf);
        push_punct(buf, ")");
    }

    match order.direction {
        Direction::Asc => push_lit(buf, "asc", NodeKind::Sort),
        Direction::Desc => push_lit(buf, "desc", NodeKind::Sort),
    }
}

/// Builds the `alias.property` token resolved against the finished walker
/// state — the alias
/// is not known until `range_variable_declaration` runs, which for a query
/// with no existing `ORDER BY` happens after this token is already queued.
fn deferred_property_token(property: String) -> Token {
    Token::new(
        TokenText::deferred(move |state| format!("{}.{}", state.alias(), property)),
        NodeKind::Sort,
        Trailing::Space,
    )
}
