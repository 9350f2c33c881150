//! Integration tests for `SqliteStore` against an in-memory database.

use oa_core::{
  Iri, Node, Term, Triple,
  store::{GraphStore, Pattern, PatternTerm},
  vocab::{cnt, oa, rdf},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn iri(s: &str) -> Iri { Iri::parse(s).unwrap() }

fn node(s: &str) -> Node { Node::Iri(iri(s)) }

// ─── Statements ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_then_statements_for_in_insertion_order() {
  let s = store().await;
  let a = node("http://example.org/a");

  s.put(vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::MOTIVATED_BY, oa::TAGGING),
    Triple::new(node("http://example.org/b"), rdf::TYPE, oa::TAG),
  ])
  .await
  .unwrap();

  let triples = s.statements_for(&a).await.unwrap();
  assert_eq!(triples.len(), 2);
  assert_eq!(triples[0].predicate, rdf::TYPE);
  assert_eq!(triples[1].object, Term::from(oa::TAGGING));
}

#[tokio::test]
async fn duplicate_triples_are_ignored() {
  let s = store().await;
  let t = Triple::new(node("http://example.org/a"), rdf::TYPE, oa::ANNOTATION);

  s.put(vec![t.clone(), t.clone()]).await.unwrap();
  s.put(vec![t]).await.unwrap();

  assert_eq!(s.len().await.unwrap(), 1);
}

#[tokio::test]
async fn literal_and_iri_objects_are_distinct() {
  let s = store().await;
  let a = node("http://example.org/a");
  let text = "http://www.w3.org/ns/oa#tagging";

  s.put(vec![
    Triple::new(a.clone(), oa::MOTIVATED_BY, Term::literal(text)),
    Triple::new(a.clone(), oa::MOTIVATED_BY, oa::TAGGING),
  ])
  .await
  .unwrap();

  let objects: Vec<Term> =
    s.statements_for(&a).await.unwrap().into_iter().map(|t| t.object).collect();
  assert_eq!(objects, vec![Term::literal(text), Term::from(oa::TAGGING)]);
}

#[tokio::test]
async fn blank_nodes_round_trip() {
  let s = store().await;
  let blank = Node::blank();
  let a = node("http://example.org/a");

  s.put(vec![
    Triple::new(a.clone(), oa::HAS_BODY, blank.clone()),
    Triple::new(blank.clone(), cnt::CHARS, Term::literal("hello")),
  ])
  .await
  .unwrap();

  let body = s.statements_for(&a).await.unwrap()[0].object.as_node();
  assert_eq!(body, Some(blank.clone()));
  assert!(s.has_subject(&blank).await.unwrap());
}

#[tokio::test]
async fn has_subject_ignores_object_positions() {
  let s = store().await;
  let a = node("http://example.org/a");
  let target = node("http://example.org/target");

  s.put(vec![Triple::new(a.clone(), oa::HAS_TARGET, target.clone())])
    .await
    .unwrap();

  assert!(s.has_subject(&a).await.unwrap());
  assert!(!s.has_subject(&target).await.unwrap());
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_reports_whether_triple_existed() {
  let s = store().await;
  let t = Triple::new(node("http://example.org/a"), rdf::TYPE, oa::ANNOTATION);
  s.put(vec![t.clone()]).await.unwrap();

  assert!(s.delete(&t).await.unwrap());
  assert!(!s.delete(&t).await.unwrap());
  assert!(s.is_empty().await.unwrap());
}

#[tokio::test]
async fn delete_subject_leaves_other_subjects() {
  let s = store().await;
  let a = node("http://example.org/a");
  let b = node("http://example.org/b");

  s.put(vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::HAS_BODY, b.clone()),
    Triple::new(b.clone(), rdf::TYPE, oa::TAG),
  ])
  .await
  .unwrap();

  assert_eq!(s.delete_subject(&a).await.unwrap(), 2);
  assert_eq!(s.delete_subject(&a).await.unwrap(), 0);
  assert_eq!(s.statements_for(&b).await.unwrap().len(), 1);
}

// ─── Replacement ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_subject_swaps_only_that_subject() {
  let s = store().await;
  let a = node("http://example.org/a");
  let b = node("http://example.org/b");

  s.put(vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::HAS_TARGET, node("http://example.org/book/1")),
    Triple::new(b.clone(), rdf::TYPE, oa::TAG),
  ])
  .await
  .unwrap();

  s.replace_subject(&a, vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::HAS_TARGET, node("http://example.org/book/2")),
  ])
  .await
  .unwrap();

  let triples = s.statements_for(&a).await.unwrap();
  assert_eq!(triples.len(), 2);
  assert_eq!(triples[1].object, Term::from(iri("http://example.org/book/2")));
  assert_eq!(s.statements_for(&b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_replace_keeps_old_triples() {
  let s = store().await;
  let a = node("http://example.org/a");
  s.execute_batch(
    "CREATE TRIGGER reject_boom BEFORE INSERT ON triples
     WHEN NEW.object = 'http://example.org/boom'
     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
  )
  .await
  .unwrap();

  let before = vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::HAS_TARGET, node("http://example.org/book/1")),
  ];
  s.put(before.clone()).await.unwrap();

  let result = s
    .replace_subject(&a, vec![
      Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
      Triple::new(a.clone(), oa::HAS_TARGET, node("http://example.org/boom")),
    ])
    .await;
  assert!(result.is_err());
  assert_eq!(s.statements_for(&a).await.unwrap(), before);
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_pattern_matches_nothing() {
  let s = store().await;
  s.put(vec![Triple::new(node("http://example.org/a"), rdf::TYPE, oa::TAG)])
    .await
    .unwrap();
  assert!(s.query(&Pattern::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn join_follows_shared_variable() {
  let s = store().await;
  let (a1, a2) = (node("http://example.org/a1"), node("http://example.org/a2"));
  let (b1, b2) = (node("http://example.org/b1"), node("http://example.org/b2"));

  s.put(vec![
    Triple::new(a1.clone(), oa::HAS_BODY, b1.clone()),
    Triple::new(a2.clone(), oa::HAS_BODY, b2.clone()),
    Triple::new(b1.clone(), rdf::TYPE, oa::TAG),
    Triple::new(b1.clone(), cnt::CHARS, Term::literal("rust")),
    Triple::new(b2.clone(), rdf::TYPE, oa::TAG),
    Triple::new(b2.clone(), cnt::CHARS, Term::literal("go")),
  ])
  .await
  .unwrap();

  let pattern = Pattern::new()
    .with(PatternTerm::var("annotation"), oa::HAS_BODY, PatternTerm::var("body"))
    .with(PatternTerm::var("body"), rdf::TYPE, oa::TAG)
    .with(PatternTerm::var("body"), cnt::CHARS, Term::literal("rust"));

  let rows = s.query(&pattern).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].node("annotation"), Some(a1));
  assert_eq!(rows[0].node("body"), Some(b1));
}

#[tokio::test]
async fn literal_constant_does_not_match_iri_object() {
  let s = store().await;
  let a = node("http://example.org/a");
  s.put(vec![Triple::new(a, oa::MOTIVATED_BY, oa::TAGGING)])
    .await
    .unwrap();

  let pattern = Pattern::new().with(
    PatternTerm::var("a"),
    oa::MOTIVATED_BY,
    Term::literal(oa::TAGGING.as_str()),
  );
  assert!(s.query(&pattern).await.unwrap().is_empty());
}

#[tokio::test]
async fn each_solution_binds_every_variable() {
  let s = store().await;
  let a = node("http://example.org/a");
  let target = iri("http://example.org/target");
  let (b1, b2) = (node("http://example.org/b1"), node("http://example.org/b2"));

  s.put(vec![
    Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION),
    Triple::new(a.clone(), oa::HAS_TARGET, target.clone()),
    Triple::new(a.clone(), oa::HAS_BODY, b1.clone()),
    Triple::new(a.clone(), oa::HAS_BODY, b2.clone()),
  ])
  .await
  .unwrap();

  let pattern = Pattern::new()
    .with(PatternTerm::var("annotation"), oa::HAS_TARGET, target)
    .with(PatternTerm::var("annotation"), oa::HAS_BODY, PatternTerm::var("body"));
  let rows = s.query(&pattern).await.unwrap();

  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r.node("annotation") == Some(a.clone())));
  assert_eq!(rows[0].node("body"), Some(b1));
  assert_eq!(rows[1].node("body"), Some(b2));
}

#[tokio::test]
async fn fully_constant_pattern_yields_one_empty_row() {
  let s = store().await;
  let a = node("http://example.org/a");
  s.put(vec![Triple::new(a.clone(), rdf::TYPE, oa::TAG)]).await.unwrap();

  let hit = Pattern::new().with(a.clone(), rdf::TYPE, oa::TAG);
  let miss = Pattern::new().with(a, rdf::TYPE, oa::ANNOTATION);

  let rows = s.query(&hit).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert!(rows[0].get("anything").is_none());
  assert!(s.query(&miss).await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_reopen() {
  let dir = std::env::temp_dir().join(format!("oa-store-{}", uuid::Uuid::new_v4().simple()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("graph.sqlite");
  let a = node("http://example.org/a");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.put(vec![Triple::new(a.clone(), rdf::TYPE, oa::ANNOTATION)])
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.has_subject(&a).await.unwrap());
  std::fs::remove_dir_all(&dir).ok();
}
