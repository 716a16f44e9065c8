use jpql_rewriter::{JpqlRewriter, RewriteError};
use pretty_assertions::assert_eq;

#[test]
fn plain_select_counts_the_alias() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select u from User u", None).unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn projection_select_still_counts_the_alias() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select u.name from User u", None).unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn distinct_without_constructor_preserves_comma_separated_items() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select distinct u.name, u.role from User u", None)
            .unwrap(),
        "select count(distinct u.name, u.role) from User u"
    );
}

#[test]
fn constructor_expression_falls_back_to_alias_dropping_distinct() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query(
            "select distinct new com.example.Dto(u.a, u.b) from User u",
            None
        )
        .unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn constructor_expression_without_distinct_still_falls_back() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select new com.example.Dto(u.a, u.b) from User u", None)
            .unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn explicit_override_replaces_default_projection_logic() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select distinct u.name, u.role from User u", Some("u.id"))
            .unwrap(),
        "select count(u.id) from User u"
    );
}

#[test]
fn blank_override_is_treated_as_absent() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select u from User u", Some("   ")).unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn where_clause_is_preserved_unchanged() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select u from User u where u.active = true", None)
            .unwrap(),
        "select count(u) from User u where u.active = true"
    );
}

#[test]
fn order_by_is_dropped_in_count_mode() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.count_query("select u from User u order by u.name", None)
            .unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn invalid_query_surfaces_as_invalid_query_error() {
    let rw = JpqlRewriter::new();
    assert!(matches!(
        rw.count_query("select from", None),
        Err(RewriteError::InvalidQuery(_))
    ));
}

#[test]
fn non_select_statement_is_an_invariant_violation() {
    let rw = JpqlRewriter::new();
    assert!(matches!(
        rw.count_query("update User u set u.name = :name", None),
        Err(RewriteError::InternalInvariantViolation(_))
    ));
}
