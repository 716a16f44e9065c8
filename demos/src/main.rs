//! Exercises the façade against a query passed on the command line, printing
//! each of its derived artifacts. Not part of the public API — a manual
//! sanity check, the way the teacher's `examples/` binaries exist to poke at
//! a crate from outside its own test suite.
//!
//! ```text
//! cargo run -p jpql-rewriter-demo -- "select u from User u order by u.id"
//! ```

use jpql_rewriter::JpqlRewriter;

fn main() {
    let query = std::env::args().nth(1).unwrap_or_else(|| {
        "select u.name, u.email from User u where u.active = true order by u.id".to_string()
    });

    let rw = JpqlRewriter::new();

    println!("input:              {query}");
    match rw.rewrite(&query) {
        Ok(rewritten) => println!("rewrite:            {rewritten}"),
        Err(e) => {
            eprintln!("rewrite failed:     {e}");
            std::process::exit(1);
        }
    }

    match rw.count_query(&query, None) {
        Ok(count) => println!("count_query:        {count}"),
        Err(e) => println!("count_query failed: {e}"),
    }

    println!("detect_alias:       {:?}", rw.detect_alias(&query));
    println!("projection:         {}", rw.projection(&query));
    match rw.has_constructor_expression(&query) {
        Ok(flag) => println!("has_constructor:    {flag}"),
        Err(e) => println!("has_constructor failed: {e}"),
    }
}
