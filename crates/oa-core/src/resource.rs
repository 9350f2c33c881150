//! [`Resource`]: a subject plus its property values, synchronised with a
//! [`GraphStore`] on demand.
//!
//! A resource is either fresh (nothing persisted yet) or loaded from the
//! store. Either way it always carries the `rdf:type` values of the Rust
//! type wrapping it; those are asserted in memory and written on persist.

use std::collections::BTreeMap;

use crate::{
  Error, Iri, Result,
  store::GraphStore,
  term::{Node, Term, Triple},
  vocab::rdf,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
  subject:    Node,
  /// Types asserted on construction and re-asserted on reload.
  types:      Vec<Iri>,
  properties: BTreeMap<Iri, Vec<Term>>,
}

impl Resource {
  /// A fresh resource identified by a blank node.
  pub fn blank(types: &[Iri]) -> Self { Self::fresh(Node::blank(), types) }

  /// A fresh resource identified by `iri`. Nothing is read from the store.
  pub fn new(iri: Iri, types: &[Iri]) -> Self { Self::fresh(Node::Iri(iri), types) }

  fn fresh(subject: Node, types: &[Iri]) -> Self {
    let mut resource = Self {
      subject,
      types: types.to_vec(),
      properties: BTreeMap::new(),
    };
    resource.assert_types();
    resource
  }

  /// Bind to `subject` and read whatever the store holds for it.
  pub async fn load<S: GraphStore>(
    store: &S,
    subject: Node,
    types: &[Iri],
  ) -> Result<Self, S::Error> {
    let mut resource = Self {
      subject,
      types: types.to_vec(),
      properties: BTreeMap::new(),
    };
    resource.reload(store).await?;
    Ok(resource)
  }

  fn assert_types(&mut self) {
    for ty in self.types.clone() {
      self.add(rdf::TYPE, Term::Iri(ty));
    }
  }

  // ── Identity ──────────────────────────────────────────────────────────

  pub fn subject(&self) -> &Node { &self.subject }

  /// Give a blank resource its IRI. Once a resource has an IRI it keeps it.
  pub fn set_subject(&mut self, iri: Iri) -> Result<()> {
    match &self.subject {
      Node::Blank(_) => {
        self.subject = Node::Iri(iri);
        Ok(())
      }
      Node::Iri(current) => Err(Error::SubjectAlreadySet {
        current:   current.to_string(),
        requested: iri.to_string(),
      }),
    }
  }

  // ── Properties ────────────────────────────────────────────────────────

  /// All values of `predicate`, in the order they were set or read.
  pub fn get(&self, predicate: &Iri) -> &[Term] {
    self.properties.get(predicate).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn first(&self, predicate: &Iri) -> Option<&Term> {
    self.get(predicate).first()
  }

  pub fn first_literal(&self, predicate: &Iri) -> Option<&str> {
    self.first(predicate).and_then(Term::as_literal)
  }

  pub fn first_node(&self, predicate: &Iri) -> Option<Node> {
    self.first(predicate).and_then(Term::as_node)
  }

  /// Replace every value of `predicate`. An empty `values` removes it.
  pub fn set(&mut self, predicate: Iri, values: Vec<Term>) {
    let mut unique: Vec<Term> = Vec::with_capacity(values.len());
    for value in values {
      if !unique.contains(&value) {
        unique.push(value);
      }
    }
    if unique.is_empty() {
      self.properties.remove(&predicate);
    } else {
      self.properties.insert(predicate, unique);
    }
  }

  pub fn set_one(&mut self, predicate: Iri, value: impl Into<Term>) {
    self.set(predicate, vec![value.into()]);
  }

  /// Add a value unless it is already present.
  pub fn add(&mut self, predicate: Iri, value: Term) {
    let values = self.properties.entry(predicate).or_default();
    if !values.contains(&value) {
      values.push(value);
    }
  }

  pub fn types(&self) -> impl Iterator<Item = &Iri> {
    self.get(&rdf::TYPE).iter().filter_map(Term::as_iri)
  }

  pub fn has_type(&self, ty: &Iri) -> bool { self.types().any(|t| t == ty) }

  pub fn is_empty(&self) -> bool { self.properties.is_empty() }

  /// The in-memory state as triples.
  pub fn statements(&self) -> Vec<Triple> {
    self
      .properties
      .iter()
      .flat_map(|(predicate, values)| {
        values
          .iter()
          .map(move |value| Triple::new(self.subject.clone(), predicate.clone(), value.clone()))
      })
      .collect()
  }

  // ── Store round trips ─────────────────────────────────────────────────

  /// Replace the subject's persisted triples with the in-memory ones, in
  /// one atomic store call.
  pub async fn persist<S: GraphStore>(&self, store: &S) -> Result<(), S::Error> {
    store.replace_subject(&self.subject, self.statements()).await
  }

  /// Delete the subject's own triples and clear memory. Resources this one
  /// refers to are left alone. Returns the number of triples removed.
  pub async fn destroy<S: GraphStore>(&mut self, store: &S) -> Result<usize, S::Error> {
    let removed = store.delete_subject(&self.subject).await?;
    self.properties.clear();
    Ok(removed)
  }

  /// Discard in-memory values and re-read them from the store.
  pub async fn reload<S: GraphStore>(&mut self, store: &S) -> Result<(), S::Error> {
    let triples = store.statements_for(&self.subject).await?;
    self.properties.clear();
    for triple in triples {
      self.add(triple.predicate, triple.object);
    }
    self.assert_types();
    Ok(())
  }

  pub async fn is_persisted<S: GraphStore>(&self, store: &S) -> Result<bool, S::Error> {
    store.has_subject(&self.subject).await
  }
}

// ─── Typed wrappers ──────────────────────────────────────────────────────────

/// Implemented by the typed views over a [`Resource`] (the annotation
/// bodies). Provides the store round trips on top of the wrapped resource.
pub trait GraphResource {
  fn resource(&self) -> &Resource;

  fn resource_mut(&mut self) -> &mut Resource;

  fn subject(&self) -> &Node { self.resource().subject() }

  async fn persist<S: GraphStore>(&self, store: &S) -> Result<(), S::Error> {
    self.resource().persist(store).await
  }

  async fn destroy<S: GraphStore>(&mut self, store: &S) -> Result<usize, S::Error> {
    self.resource_mut().destroy(store).await
  }

  async fn reload<S: GraphStore>(&mut self, store: &S) -> Result<(), S::Error> {
    self.resource_mut().reload(store).await
  }

  async fn is_persisted<S: GraphStore>(&self, store: &S) -> Result<bool, S::Error> {
    self.resource().is_persisted(store).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vocab::{cnt, oa};

  fn moomin() -> Iri { Iri::parse("http://example.org/moomin").unwrap() }

  #[test]
  fn fresh_resource_carries_its_types() {
    let r = Resource::blank(&[oa::TAG, cnt::CONTENT_AS_TEXT]);
    assert_eq!(r.types().count(), 2);
    assert!(r.has_type(&oa::TAG));
    assert!(r.has_type(&cnt::CONTENT_AS_TEXT));
  }

  #[test]
  fn blank_subject_can_be_set_once() {
    let mut r = Resource::blank(&[oa::TAG]);
    assert!(r.subject().is_blank());

    r.set_subject(moomin()).unwrap();
    assert_eq!(r.subject(), &Node::Iri(moomin()));

    let err = r
      .set_subject(Iri::parse("http://example.org/moomin2").unwrap())
      .unwrap_err();
    assert!(matches!(err, Error::SubjectAlreadySet { .. }));
    assert_eq!(r.subject(), &Node::Iri(moomin()));
  }

  #[test]
  fn statements_follow_the_subject() {
    let mut r = Resource::blank(&[]);
    r.set_one(cnt::CHARS, Term::literal("good"));
    r.set_subject(moomin()).unwrap();
    let statements = r.statements();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].subject, Node::Iri(moomin()));
  }

  #[test]
  fn set_replaces_and_empty_set_removes() {
    let mut r = Resource::new(moomin(), &[]);
    r.set_one(cnt::CHARS, Term::literal("good"));
    r.set_one(cnt::CHARS, Term::literal("new_good"));
    assert_eq!(r.get(&cnt::CHARS), &[Term::literal("new_good")]);

    r.set(cnt::CHARS, Vec::new());
    assert!(r.get(&cnt::CHARS).is_empty());
    assert!(r.is_empty());
  }

  #[test]
  fn set_collapses_duplicate_values() {
    let mut r = Resource::new(moomin(), &[]);
    r.set(cnt::CHARS, vec![Term::literal("a"), Term::literal("a"), Term::literal("b")]);
    assert_eq!(r.get(&cnt::CHARS).len(), 2);
  }
}
