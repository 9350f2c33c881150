//! [`TagBody`]: a free-text tag shared by every annotation using it.
//!
//! At most one persisted tag body should exist per distinct tag string.
//! That is upheld by looking the value up before creating a body (see
//! [`TagBody::fetch_by_tag_value`]), not by a constraint in the store.

use crate::{
  Context, Error, Iri, Result,
  resource::{GraphResource, Resource},
  store::{GraphStore, Pattern, PatternTerm, distinct_nodes},
  term::{Node, Term},
  vocab::{cnt, dcterms, oa, rdf},
};

const TYPES: [Iri; 2] = [oa::TAG, cnt::CONTENT_AS_TEXT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBody {
  resource: Resource,
}

impl TagBody {
  pub fn blank() -> Self { Self { resource: Resource::blank(&TYPES) } }

  pub fn new(iri: Iri) -> Self { Self { resource: Resource::new(iri, &TYPES) } }

  pub async fn load<S: GraphStore>(store: &S, node: Node) -> Result<Self, S::Error> {
    Ok(Self { resource: Resource::load(store, node, &TYPES).await? })
  }

  /// Give a blank tag body its IRI; fails once it already has one.
  pub fn set_subject(&mut self, iri: Iri) -> Result<()> {
    self.resource.set_subject(iri)
  }

  // ── Content ───────────────────────────────────────────────────────────

  /// The tag string. Stored as a set; only the first value is meaningful.
  pub fn tag(&self) -> Option<&str> { self.resource.first_literal(&cnt::CHARS) }

  pub fn tags(&self) -> impl Iterator<Item = &str> {
    self.resource.get(&cnt::CHARS).iter().filter_map(Term::as_literal)
  }

  pub fn set_tag(&mut self, tag: &str) {
    self.resource.set_one(cnt::CHARS, Term::literal(tag));
  }

  pub fn clear_tag(&mut self) { self.resource.set(cnt::CHARS, Vec::new()); }

  pub fn format(&self) -> Option<&str> { self.resource.first_literal(&dcterms::FORMAT) }

  pub fn set_format(&mut self, format: &str) {
    self.resource.set_one(dcterms::FORMAT, Term::literal(format));
  }

  // ── Lookup ────────────────────────────────────────────────────────────

  /// Find the persisted tag body carrying `value`.
  ///
  /// With the store unchanged, repeated calls return a body with the same
  /// subject. `Ok(None)` when no body carries the value.
  pub async fn fetch_by_tag_value<S: GraphStore>(
    ctx: &Context<S>,
    value: &str,
  ) -> Result<Option<Self>, S::Error> {
    let value = validate_tag_value(value)?;

    let pattern = Pattern::new()
      .with(PatternTerm::var("tag"), rdf::TYPE, oa::TAG)
      .with(PatternTerm::var("tag"), cnt::CHARS, Term::literal(value));

    let rows = ctx.store.query(&pattern).await?;
    let Some(node) = rows.iter().find_map(|row| row.node("tag")) else {
      tracing::debug!(tag = value, "no tag body found");
      return Ok(None);
    };

    tracing::debug!(tag = value, body = %node, "found existing tag body");
    Ok(Some(Self::load(ctx.store(), node).await?))
  }

  /// Subjects of every annotation whose body is a tag body carrying
  /// `value`. Unordered; empty when the tag is unused.
  pub async fn annotations_using<S: GraphStore>(
    ctx: &Context<S>,
    value: &str,
  ) -> Result<Vec<Node>, S::Error> {
    let value = validate_tag_value(value)?;

    let pattern = Pattern::new()
      .with(PatternTerm::var("annotation"), oa::HAS_BODY, PatternTerm::var("body"))
      .with(PatternTerm::var("body"), rdf::TYPE, oa::TAG)
      .with(PatternTerm::var("body"), cnt::CHARS, Term::literal(value));

    let rows = ctx.store.query(&pattern).await?;
    Ok(distinct_nodes(&rows, "annotation"))
  }
}

impl GraphResource for TagBody {
  fn resource(&self) -> &Resource { &self.resource }

  fn resource_mut(&mut self) -> &mut Resource { &mut self.resource }
}

/// Tag values must contain something other than whitespace.
pub(crate) fn validate_tag_value(value: &str) -> Result<&str> {
  if value.trim().is_empty() {
    return Err(Error::invalid("tag value must be a non-empty string"));
  }
  Ok(value)
}
