use jpql_rewriter::{JpqlRewriter, RewriteError};
use pretty_assertions::assert_eq;

#[test]
fn true_for_constructor_select_item() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.has_constructor_expression("select new com.example.Dto(u.a, u.b) from User u")
            .unwrap(),
        true
    );
}

#[test]
fn false_for_plain_projection() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.has_constructor_expression("select u from User u").unwrap(),
        false
    );
}

#[test]
fn false_when_new_appears_only_as_an_identifier_elsewhere() {
    // Sanity check: the flag is set by visiting a `constructor_expression`
    // node, not by scanning rendered text for the word "new".
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.has_constructor_expression("select u from User u where u.name = 'new'")
            .unwrap(),
        false
    );
}

#[test]
fn true_for_constructor_nested_in_subquery_projection() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.has_constructor_expression(
            "select new com.example.Summary(u.id, (select count(o) from Order o where o.user = u)) from User u"
        )
        .unwrap(),
        true
    );
}

#[test]
fn invalid_query_propagates_instead_of_returning_false() {
    let rw = JpqlRewriter::new();
    assert!(matches!(
        rw.has_constructor_expression("select from"),
        Err(RewriteError::InvalidQuery(_))
    ));
}
