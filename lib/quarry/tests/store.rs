#![allow(clippy::panic_in_result_fn, reason = "Assertions in tests")]

use quarry::io::RdfFormat;
use quarry::model::{Literal, NamedNode, Term};
use quarry::sparql::QueryEvaluationError;
use quarry::store::Store;
use std::error::Error;

const BOOKS: &str = r#"
@prefix : <http://example.org/books/> .

:b1 :title "A" ;
    :year "1980" .
:b2 :title "B" ;
    :year "2005" .
"#;

fn loaded_store() -> Result<Store, Box<dyn Error>> {
    let mut store = Store::new();
    store.load_from_reader(RdfFormat::Turtle, BOOKS.as_bytes())?;
    Ok(store)
}

fn literal(value: &str) -> Term {
    Literal::new_simple_literal(value).into()
}

#[test]
fn two_pattern_query_yields_one_row_per_book() -> Result<(), Box<dyn Error>> {
    let store = loaded_store()?;
    let solutions = store.query(
        "PREFIX : <http://example.org/books/> \
         SELECT ?x ?t ?y WHERE { ?x :title ?t . ?x :year ?y }",
    )?;

    assert_eq!(solutions.len(), 2);
    assert_eq!(
        solutions[0].get("x"),
        Some(&NamedNode::new("http://example.org/books/b1")?.into())
    );
    assert_eq!(solutions[0].get("t"), Some(&literal("A")));
    assert_eq!(solutions[0].get("y"), Some(&literal("1980")));
    assert_eq!(
        solutions[1].get("x"),
        Some(&NamedNode::new("http://example.org/books/b2")?.into())
    );
    assert_eq!(solutions[1].get("t"), Some(&literal("B")));
    assert_eq!(solutions[1].get("y"), Some(&literal("2005")));
    Ok(())
}

#[test]
fn numeric_filter_keeps_the_older_book() -> Result<(), Box<dyn Error>> {
    let store = loaded_store()?;
    let solutions = store.query(
        "PREFIX : <http://example.org/books/> \
         SELECT ?x WHERE { ?x :title ?t . ?x :year ?y . FILTER(?y < 2000) }",
    )?;

    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get("x"),
        Some(&NamedNode::new("http://example.org/books/b1")?.into())
    );
    Ok(())
}

#[test]
fn descending_order_puts_the_newer_book_first() -> Result<(), Box<dyn Error>> {
    let store = loaded_store()?;
    let solutions = store.query(
        "PREFIX : <http://example.org/books/> \
         SELECT ?t ?y WHERE { ?x :title ?t . ?x :year ?y } ORDER BY DESC(?y)",
    )?;

    let titles: Vec<_> = solutions.iter().map(|s| s.get("t").cloned()).collect();
    assert_eq!(titles, vec![Some(literal("B")), Some(literal("A"))]);
    Ok(())
}

#[test]
fn querying_before_load_fails_instead_of_returning_no_rows() {
    let store = Store::new();
    let result = store.query("SELECT ?s WHERE { ?s ?p ?o }");
    assert!(matches!(result, Err(QueryEvaluationError::NotLoaded)));
}

#[test]
fn loading_twice_is_a_no_op() -> Result<(), Box<dyn Error>> {
    let mut store = loaded_store()?;
    assert_eq!(store.len(), 4);

    store.load_from_reader(RdfFormat::Turtle, BOOKS.as_bytes())?;
    assert_eq!(store.len(), 4);
    Ok(())
}

#[test]
fn failed_load_leaves_the_store_unloaded_and_retryable() -> Result<(), Box<dyn Error>> {
    let mut store = Store::new();
    let broken = "<http://example.com/s> <http://example.com/p> ";
    assert!(store
        .load_from_reader(RdfFormat::Turtle, broken.as_bytes())
        .is_err());
    assert!(!store.is_loaded());
    assert!(matches!(
        store.query("SELECT ?s WHERE { ?s ?p ?o }"),
        Err(QueryEvaluationError::NotLoaded)
    ));

    store.load_from_reader(RdfFormat::Turtle, BOOKS.as_bytes())?;
    assert!(store.is_loaded());
    assert_eq!(store.len(), 4);
    Ok(())
}

#[test]
fn query_parse_errors_are_surfaced() -> Result<(), Box<dyn Error>> {
    let store = loaded_store()?;
    let result = store.query("SELECT WHERE");
    assert!(matches!(result, Err(QueryEvaluationError::Parsing(_))));
    Ok(())
}

#[test]
fn construct_queries_are_rejected() -> Result<(), Box<dyn Error>> {
    let store = loaded_store()?;
    let result = store.query(
        "PREFIX : <http://example.org/books/> \
         CONSTRUCT { ?x :title ?t } WHERE { ?x :title ?t }",
    );
    assert!(matches!(
        result,
        Err(QueryEvaluationError::UnsupportedQueryForm("CONSTRUCT"))
    ));
    Ok(())
}

#[test]
fn distinct_objects_for_predicate() -> Result<(), Box<dyn Error>> {
    let mut store = Store::new();
    let data = r#"
    @prefix : <http://example.org/books/> .
    :b1 :genre "Fantasy" .
    :b2 :genre "Science Fiction" .
    :b3 :genre "Fantasy" .
    "#;
    store.load_from_reader(RdfFormat::Turtle, data.as_bytes())?;

    let genre = NamedNode::new("http://example.org/books/genre")?;
    let objects = store.objects_for_predicate(genre.as_ref())?;
    assert_eq!(
        objects,
        vec![literal("Fantasy"), literal("Science Fiction")]
    );
    Ok(())
}

#[test]
fn objects_lookup_requires_a_loaded_store() -> Result<(), Box<dyn Error>> {
    let store = Store::new();
    let genre = NamedNode::new("http://example.org/books/genre")?;
    assert!(matches!(
        store.objects_for_predicate(genre.as_ref()),
        Err(QueryEvaluationError::NotLoaded)
    ));
    Ok(())
}
