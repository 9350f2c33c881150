//! The `GraphStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `oa-store-sqlite`).
//! The annotation model depends on this abstraction, not on any concrete
//! backend.

use std::{
  collections::{BTreeMap, HashSet},
  future::Future,
};

use crate::{
  Iri,
  term::{Node, Term, Triple},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// One position of a [`TriplePattern`]: a fixed term or a named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
  Var(String),
  Term(Term),
}

impl PatternTerm {
  pub fn var(name: impl Into<String>) -> Self { Self::Var(name.into()) }
}

impl From<Term> for PatternTerm {
  fn from(term: Term) -> Self { Self::Term(term) }
}

impl From<Node> for PatternTerm {
  fn from(node: Node) -> Self { Self::Term(node.into()) }
}

impl From<Iri> for PatternTerm {
  fn from(iri: Iri) -> Self { Self::Term(iri.into()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
  pub subject:   PatternTerm,
  pub predicate: Iri,
  pub object:    PatternTerm,
}

/// A basic graph pattern: every triple pattern must match, with variables
/// of the same name bound to the same term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
  pub triples: Vec<TriplePattern>,
}

impl Pattern {
  pub fn new() -> Self { Self::default() }

  /// Append a triple pattern.
  pub fn with(
    mut self,
    subject: impl Into<PatternTerm>,
    predicate: Iri,
    object: impl Into<PatternTerm>,
  ) -> Self {
    self.triples.push(TriplePattern {
      subject: subject.into(),
      predicate,
      object: object.into(),
    });
    self
  }

  /// Variable names in order of first appearance.
  pub fn variables(&self) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for tp in &self.triples {
      for position in [&tp.subject, &tp.object] {
        if let PatternTerm::Var(name) = position
          && !names.contains(&name.as_str())
        {
          names.push(name);
        }
      }
    }
    names
  }
}

/// One solution of a [`Pattern`]: variable name → bound term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bindings(BTreeMap<String, Term>);

impl Bindings {
  pub fn new() -> Self { Self::default() }

  pub fn insert(&mut self, name: impl Into<String>, term: Term) {
    self.0.insert(name.into(), term);
  }

  pub fn get(&self, name: &str) -> Option<&Term> { self.0.get(name) }

  /// The bound term as a node; `None` if unbound or bound to a literal.
  pub fn node(&self, name: &str) -> Option<Node> {
    self.get(name).and_then(Term::as_node)
  }
}

/// The distinct nodes bound to `name` across `rows`, in row order.
pub fn distinct_nodes(rows: &[Bindings], name: &str) -> Vec<Node> {
  let mut seen: HashSet<Node> = HashSet::new();
  rows
    .iter()
    .filter_map(|row| row.node(name))
    .filter(|node| seen.insert(node.clone()))
    .collect()
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a triple store backend.
///
/// Validation errors raised by the annotation model travel through the
/// backend's own error type (hence the `From<crate::Error>` bound); backend
/// failures are returned unchanged.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait GraphStore: Send + Sync {
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  /// All persisted triples whose subject is `subject`, in insertion order.
  fn statements_for<'a>(
    &'a self,
    subject: &'a Node,
  ) -> impl Future<Output = Result<Vec<Triple>, Self::Error>> + Send + 'a;

  /// Whether any triple has `subject` as its subject.
  fn has_subject<'a>(
    &'a self,
    subject: &'a Node,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Evaluate a basic graph pattern. Rows follow the store's order of the
  /// first pattern's matches; identical rows are collapsed.
  fn query<'a>(
    &'a self,
    pattern: &'a Pattern,
  ) -> impl Future<Output = Result<Vec<Bindings>, Self::Error>> + Send + 'a;

  /// Insert triples. Inserting a triple that already exists is a no-op.
  fn put(
    &self,
    triples: Vec<Triple>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Atomically replace every triple of `subject` with `triples`. On error
  /// the subject's previously stored triples are left untouched.
  fn replace_subject<'a>(
    &'a self,
    subject: &'a Node,
    triples: Vec<Triple>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove one triple. Returns whether it existed.
  fn delete<'a>(
    &'a self,
    triple: &'a Triple,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove every triple with `subject` as its subject. Returns the count.
  fn delete_subject<'a>(
    &'a self,
    subject: &'a Node,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vocab::{oa, rdf};

  #[test]
  fn variables_are_listed_once_in_order() {
    let pattern = Pattern::new()
      .with(PatternTerm::var("annotation"), oa::HAS_BODY, PatternTerm::var("body"))
      .with(PatternTerm::var("body"), rdf::TYPE, oa::TAG);
    assert_eq!(pattern.variables(), vec!["annotation", "body"]);
  }

  #[test]
  fn bindings_node_skips_literals() {
    let mut row = Bindings::new();
    row.insert("s", Term::literal("x"));
    row.insert("t", Term::from(oa::TAG));
    assert_eq!(row.node("s"), None);
    assert_eq!(row.node("t"), Some(Node::Iri(oa::TAG)));
    assert_eq!(row.node("missing"), None);
  }

  #[test]
  fn distinct_nodes_keeps_first_occurrence_order() {
    let row = |iri: Iri| {
      let mut row = Bindings::new();
      row.insert("a", Term::from(iri));
      row
    };
    let rows = vec![row(oa::TAG), row(oa::ANNOTATION), row(oa::TAG), Bindings::new()];
    assert_eq!(
      distinct_nodes(&rows, "a"),
      vec![Node::Iri(oa::TAG), Node::Iri(oa::ANNOTATION)]
    );
  }
}
