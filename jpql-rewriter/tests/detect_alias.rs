use jpql_rewriter::JpqlRewriter;
use pretty_assertions::assert_eq;

#[test]
fn bare_alias_without_as_keyword() {
    let rw = JpqlRewriter::new();
    assert_eq!(rw.detect_alias("select u from User u"), Some("u".to_string()));
}

#[test]
fn alias_with_as_keyword() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.detect_alias("select u from User as u"),
        Some("u".to_string())
    );
}

#[test]
fn alias_is_the_first_range_variable_not_a_join_alias() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.detect_alias("select o from Order o join o.customer c"),
        Some("o".to_string())
    );
}

#[test]
fn update_statement_alias_is_detected() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.detect_alias("update User u set u.name = :name"),
        Some("u".to_string())
    );
}

#[test]
fn delete_statement_alias_is_detected() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.detect_alias("delete from User u"),
        Some("u".to_string())
    );
}

#[test]
fn garbage_input_returns_none() {
    let rw = JpqlRewriter::new();
    assert_eq!(rw.detect_alias("not jpql at all &&&"), None);
}
