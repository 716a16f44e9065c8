use jpql_rewriter::JpqlRewriter;
use pretty_assertions::assert_eq;

#[test]
fn single_select_item() {
    let rw = JpqlRewriter::new();
    assert_eq!(rw.projection("select u from User u"), "u");
}

#[test]
fn multiple_select_items_are_comma_separated() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.projection("select u.name, u.id from User u"),
        "u.name, u.id"
    );
}

#[test]
fn distinct_keyword_is_not_part_of_the_projection() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.projection("select distinct u.name from User u"),
        "u.name"
    );
}

#[test]
fn constructor_expression_is_rendered_verbatim() {
    let rw = JpqlRewriter::new();
    assert_eq!(
        rw.projection("select new com.example.Dto(u.a, u.b) from User u"),
        "new com.example.Dto(u.a, u.b)"
    );
}

#[test]
fn unaffected_by_an_unrelated_count_override() {
    // `projection` always walks in ordinary mode — a caller driving
    // `count_query` separately with an override has no bearing here.
    let rw = JpqlRewriter::new();
    let plain = rw.projection("select distinct u.name, u.role from User u");
    let _ = rw.count_query("select distinct u.name, u.role from User u", Some("u.id"));
    assert_eq!(plain, "u.name, u.role");
}

#[test]
fn garbage_input_yields_empty_string() {
    let rw = JpqlRewriter::new();
    assert_eq!(rw.projection("not jpql at all &&&"), "");
}
