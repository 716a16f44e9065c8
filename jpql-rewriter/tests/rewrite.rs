use jpql_rewriter::{JpqlRewriter, RewriteError};
use pretty_assertions::assert_eq;

#[test]
fn plain_select_is_faithful() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select u from User u").unwrap(),
        "select u from User u"
    );
}

#[test]
fn as_keyword_is_preserved() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select u from User as u").unwrap(),
        "select u from User as u"
    );
}

#[test]
fn join_fetch_and_on_condition() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite(
            "select o from Order o left join fetch o.lineItems li on li.quantity > 1"
        )
        .unwrap(),
        "select o from Order o left join fetch o.lineItems as li on li.quantity > 1"
    );
}

#[test]
fn treat_as_downcast_in_join() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select p from Pet p join treat(p.owner as Vip) v").unwrap(),
        "select p from Pet p join treat(p.owner as Vip) as v"
    );
}

#[test]
fn treat_expression_with_subpath_in_where_clause() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select p from Pet p where treat(p.owner as Person).name = 'Ann'")
            .unwrap(),
        "select p from Pet p where treat(p.owner as Person).name = 'Ann'"
    );
}

#[test]
fn where_clause_with_between_and_like() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite(
            "select u from User u where u.age between 18 and 65 and u.name like '%ann%'",
        )
        .unwrap();
    assert_eq!(
        out,
        "select u from User u where u.age between 18 and 65 and u.name like '%ann%'"
    );
}

#[test]
fn explicit_asc_in_existing_order_by_is_preserved() {
    // order_by_item's direction is only rendered when the source wrote one;
    // a prior bug dropped an explicit `ASC` entirely since only `DESC` was
    // tracked.
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select u from User u order by u.id asc").unwrap(),
        "select u from User u order by u.id asc"
    );
}

#[test]
fn order_by_with_no_direction_keyword_stays_bare() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select u from User u order by u.id").unwrap(),
        "select u from User u order by u.id"
    );
}

#[test]
fn invalid_query_surfaces_syntax_error() {
    let rw = JpqlRewriter::new();
    let err = rw.rewrite("select from").unwrap_err();
    assert!(matches!(err, RewriteError::InvalidQuery(_)));
    assert!(err.to_string().starts_with("invalid query:"));
}

#[test]
fn update_statement_is_faithful() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("update Order o set o.status = 'SHIPPED' where o.id = ?1")
            .unwrap(),
        "update Order o set o.status = 'SHIPPED' where o.id = ?1"
    );
}

#[test]
fn delete_statement_is_faithful() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("delete from Order o where o.status = :status")
            .unwrap(),
        "delete from Order o where o.status = :status"
    );
}

#[test]
fn idempotent_under_repeated_rewrite() {
    let rw = JpqlRewriter::new();
    let once = rw
        .rewrite("select o from Order o left join fetch o.lineItems li where o.total > 10")
        .unwrap();
    let twice = rw.rewrite(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn output_has_no_consecutive_or_trailing_whitespace() {
    let rw = JpqlRewriter::new();
    let out = rw
        .rewrite("select u.name from User u where u.active = true order by u.name")
        .unwrap();
    assert!(!out.contains("  "));
    assert_eq!(out, out.trim());
}

#[test]
fn spel_escape_forms_pass_through() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.rewrite("select u from User u where u.id = #{#id}").unwrap(),
        "select u from User u where u.id = #{#id}"
    );
    assert_eq!(
        rw.rewrite("select u from User u where u.id = #{#[0]}").unwrap(),
        "select u from User u where u.id = #{#[0]}"
    );
}
