//! Annotations: resources linking a target to a body with a motivation.
//!
//! [`Annotation`] is the generic form. [`CommentAnnotation`],
//! [`TagAnnotation`] and [`SemanticTagAnnotation`] fix the motivation and
//! own a typed body. No discriminator is stored: [`Annotation::resume`]
//! works out the variant from `motivatedBy` and the body's types.

mod comment;
mod resolve;
mod semantic_tag;
mod tag;

pub use comment::CommentAnnotation;
pub use resolve::{AnyAnnotation, VariantKind, resolve_variant};
pub use semantic_tag::SemanticTagAnnotation;
pub use tag::TagAnnotation;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
  Context, Error, Iri, Result,
  body::Body,
  mint::mint_iri,
  resource::{GraphResource, Resource},
  store::{GraphStore, Pattern, PatternTerm, distinct_nodes},
  term::{Node, Term},
  vocab::{oa, prefix, rdf},
};

const TYPES: [Iri; 1] = [oa::ANNOTATION];

// ─── Persist outcome ─────────────────────────────────────────────────────────

/// What happened to the body when an annotation was persisted.
#[derive(Debug)]
pub enum BodyPersist<E> {
  /// No body handle was held, so nothing was written.
  Absent,
  Persisted,
  /// The annotation's own triples were written; the body's were not.
  Failed(E),
}

/// Result of [`Annotation::persist`] once the annotation itself is stored.
#[derive(Debug)]
pub struct PersistReport<E> {
  pub body: BodyPersist<E>,
}

impl<E> PersistReport<E> {
  /// False only when the body failed to persist.
  pub fn is_complete(&self) -> bool { !matches!(self.body, BodyPersist::Failed(_)) }
}

// ─── Annotation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
  resource:        Resource,
  pub(crate) body: Option<Body>,
}

impl Annotation {
  /// A fresh annotation with a minted `oa`-prefixed identifier.
  pub async fn new<S: GraphStore>(ctx: &Context<S>) -> Result<Self, S::Error> {
    let iri = mint_iri(ctx, prefix::ANNOTATION).await?;
    Ok(Self::fresh(iri))
  }

  /// Bind to `identifier` (absolute IRI or local name), reading whatever
  /// the store holds for it. Never resumes a body; see [`Self::resume`].
  pub async fn load<S: GraphStore>(
    ctx: &Context<S>,
    identifier: &str,
  ) -> Result<Self, S::Error> {
    let iri = ctx.resolve(identifier)?;
    let resource = Resource::load(ctx.store(), Node::Iri(iri), &TYPES).await?;
    Ok(Self { resource, body: None })
  }

  pub(crate) fn fresh(iri: Iri) -> Self {
    Self { resource: Resource::new(iri, &TYPES), body: None }
  }

  pub fn subject(&self) -> &Node { self.resource.subject() }

  pub fn resource(&self) -> &Resource { &self.resource }

  // ── Properties ────────────────────────────────────────────────────────

  pub fn target(&self) -> Option<&Iri> {
    self.resource.first(&oa::HAS_TARGET).and_then(Term::as_iri)
  }

  pub fn set_target(&mut self, target: Iri) {
    self.resource.set_one(oa::HAS_TARGET, target);
  }

  /// The agent (usually a `foaf:Person`) that made the annotation.
  pub fn annotated_by(&self) -> Option<Node> {
    self.resource.first_node(&oa::ANNOTATED_BY)
  }

  pub fn set_annotated_by(&mut self, agent: impl Into<Node>) {
    self.resource.set_one(oa::ANNOTATED_BY, agent.into());
  }

  /// ISO-8601 UTC timestamp of when the annotation was made.
  pub fn annotated_at(&self) -> Option<&str> {
    self.resource.first_literal(&oa::ANNOTATED_AT)
  }

  pub fn set_annotated_at(&mut self, at: DateTime<Utc>) -> String {
    let stamp = at.to_rfc3339_opts(SecondsFormat::Secs, true);
    self.resource.set_one(oa::ANNOTATED_AT, Term::literal(stamp.clone()));
    stamp
  }

  pub fn set_annotated_at_now(&mut self) -> String { self.set_annotated_at(Utc::now()) }

  /// The first `motivatedBy` value as an IRI. A literal holding an absolute
  /// IRI counts: motivations compare by IRI text, not representation.
  pub fn motivated_by(&self) -> Option<Iri> {
    match self.resource.first(&oa::MOTIVATED_BY)? {
      Term::Iri(iri) => Some(iri.clone()),
      Term::Literal(value) => Iri::parse(value.as_str()).ok(),
      Term::Blank(_) => None,
    }
  }

  /// Set `motivatedBy` unless some value is already present.
  pub(crate) fn ensure_motivation(&mut self, motivation: Iri) {
    if self.resource.get(&oa::MOTIVATED_BY).is_empty() {
      self.resource.set_one(oa::MOTIVATED_BY, motivation);
    }
  }

  // ── Body ──────────────────────────────────────────────────────────────

  /// The body handle held in memory, if any.
  pub fn body(&self) -> Option<&Body> { self.body.as_ref() }

  /// What `hasBody` points at, whether or not a handle is held.
  pub fn body_node(&self) -> Option<Node> { self.resource.first_node(&oa::HAS_BODY) }

  /// Point `hasBody` at `body` and hold it, replacing any previous handle.
  pub(crate) fn attach_body(&mut self, body: Body) -> Node {
    let node = body.subject().clone();
    self.resource.set_one(oa::HAS_BODY, node.clone());
    self.body = Some(body);
    node
  }

  // ── Store round trips ─────────────────────────────────────────────────

  /// Persist the annotation's own triples, then the held body's.
  ///
  /// `Err` means the annotation itself was not stored and the body was not
  /// attempted. A body failure after that is reported in the
  /// [`PersistReport`], not as an error.
  pub async fn persist<S: GraphStore>(
    &self,
    store: &S,
  ) -> Result<PersistReport<S::Error>, S::Error> {
    self.resource.persist(store).await?;

    let body = match &self.body {
      None => BodyPersist::Absent,
      Some(body) => match body.persist(store).await {
        Ok(()) => BodyPersist::Persisted,
        Err(e) => {
          tracing::warn!(
            annotation = %self.subject(),
            body = %body.subject(),
            error = %e,
            "annotation persisted but its body was not"
          );
          BodyPersist::Failed(e)
        }
      },
    };

    Ok(PersistReport { body })
  }

  /// Remove the annotation's own triples. Target, body and agent resources
  /// are left in the store. Returns the number of triples removed.
  pub async fn destroy<S: GraphStore>(&mut self, store: &S) -> Result<usize, S::Error> {
    let removed = self.resource.destroy(store).await?;
    self.body = None;
    Ok(removed)
  }

  /// Re-read the annotation from the store. A held body is reloaded while
  /// `hasBody` still points at it; if `hasBody` now points elsewhere the
  /// new body is loaded as the same kind. Without `hasBody` the handle is
  /// dropped. An annotation holding no handle gains none; use
  /// [`Self::resume`] for that.
  pub async fn reload<S: GraphStore>(&mut self, store: &S) -> Result<(), S::Error> {
    self.resource.reload(store).await?;

    self.body = match (self.body.take(), self.body_node()) {
      (Some(mut body), Some(node)) if body.subject() == &node => {
        body.reload(store).await?;
        Some(body)
      }
      (Some(body), Some(node)) => body.load_same_kind(store, node).await?,
      _ => None,
    };
    Ok(())
  }

  pub async fn is_persisted<S: GraphStore>(&self, store: &S) -> Result<bool, S::Error> {
    self.resource.is_persisted(store).await
  }

  // ── Queries ───────────────────────────────────────────────────────────

  /// Subjects of every annotation with `hasTarget` = `target`, which must be
  /// an absolute IRI. Unordered.
  pub async fn find_by_target<S: GraphStore>(
    ctx: &Context<S>,
    target: &str,
  ) -> Result<Vec<Node>, S::Error> {
    let target = Iri::parse(target).map_err(|_| {
      Error::invalid(format!("target must be an absolute IRI, got {target:?}"))
    })?;

    let pattern = Pattern::new()
      .with(PatternTerm::var("annotation"), rdf::TYPE, oa::ANNOTATION)
      .with(PatternTerm::var("annotation"), oa::HAS_TARGET, target);

    let rows = ctx.store.query(&pattern).await?;
    Ok(distinct_nodes(&rows, "annotation"))
  }
}
