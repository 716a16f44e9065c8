use jpql_rewriter::{JpqlRewriter, SortOrder};
use pretty_assertions::assert_eq;

#[test]
fn introduces_order_by_when_absent() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite_with_sort("select u from User u", vec![SortOrder::asc("name")])
        .unwrap();
    assert_eq!(out, "select u from User u order by u.name asc");
}

#[test]
fn appends_after_existing_order_by() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite_with_sort(
            "select u from User u order by u.id asc",
            vec![SortOrder::desc("name")],
        )
        .unwrap();
    assert_eq!(out, "select u from User u order by u.id asc, u.name desc");
}

#[test]
fn ignore_case_wraps_property_in_lower() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite_with_sort("select u from User u order by u.id", vec![SortOrder::desc("name").ignore_case()])
        .unwrap();
    assert_eq!(out, "select u from User u order by u.id, lower(u.name) desc");
}

#[test]
fn multiple_sort_keys_are_comma_separated() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite_with_sort(
            "select u from User u",
            vec![SortOrder::asc("lastName"), SortOrder::desc("firstName")],
        )
        .unwrap();
    assert_eq!(
        out,
        "select u from User u order by u.lastName asc, u.firstName desc"
    );
}

#[test]
fn sort_qualifies_against_first_range_variable_alias() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite_with_sort(
            "select o from Order o join o.customer c",
            vec![SortOrder::asc("total")],
        )
        .unwrap();
    assert_eq!(out, "select o from Order o join o.customer as c order by o.total asc");
}
