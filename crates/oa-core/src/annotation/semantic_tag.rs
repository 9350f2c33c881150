//! [`SemanticTagAnnotation`]: motivated by `oa:tagging`, body is a
//! controlled-vocabulary term.

use std::ops::{Deref, DerefMut};

use super::Annotation;
use crate::{
  Context, Error, Iri,
  body::{Body, SemanticTagBody},
  mint::mint_iri,
  store::GraphStore,
  term::Node,
  vocab::{oa, prefix},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTagAnnotation {
  inner: Annotation,
}

impl SemanticTagAnnotation {
  /// A fresh semantic tag annotation with a minted `stg`-prefixed identifier.
  pub async fn new<S: GraphStore>(ctx: &Context<S>) -> Result<Self, S::Error> {
    let iri = mint_iri(ctx, prefix::SEMANTIC_TAG_ANNOTATION).await?;
    Self::from_annotation(ctx.store(), Annotation::fresh(iri)).await
  }

  /// Bind to `identifier`, resuming its term body if one is linked.
  pub async fn load<S: GraphStore>(ctx: &Context<S>, identifier: &str) -> Result<Self, S::Error> {
    let inner = Annotation::load(ctx, identifier).await?;
    Self::from_annotation(ctx.store(), inner).await
  }

  pub(crate) async fn from_annotation<S: GraphStore>(
    store: &S,
    mut inner: Annotation,
  ) -> Result<Self, S::Error> {
    inner.ensure_motivation(oa::TAGGING);
    // A vocabulary term always has an IRI; a blank body cannot be one.
    if let Some(Node::Iri(term)) = inner.body_node() {
      inner.body = Some(Body::SemanticTag(SemanticTagBody::load(store, term).await?));
    }
    Ok(Self { inner })
  }

  /// Use the vocabulary term `term` (an absolute IRI) as the body. Nothing
  /// is minted: the term's own IRI is the body's subject.
  pub async fn set_term<S: GraphStore>(
    &mut self,
    ctx: &Context<S>,
    term: &str,
  ) -> Result<(), S::Error> {
    let term = Iri::parse(term).map_err(|_| {
      Error::invalid(format!("term must be an absolute IRI, got {term:?}"))
    })?;
    let body = SemanticTagBody::load(ctx.store(), term).await?;
    self.inner.attach_body(Body::SemanticTag(body));
    Ok(())
  }

  pub fn term_body(&self) -> Option<&SemanticTagBody> {
    match &self.inner.body {
      Some(Body::SemanticTag(body)) => Some(body),
      _ => None,
    }
  }

  /// The vocabulary term's IRI, if one is set.
  pub fn term(&self) -> Option<&Iri> { self.term_body().map(SemanticTagBody::term) }
}

impl Deref for SemanticTagAnnotation {
  type Target = Annotation;

  fn deref(&self) -> &Annotation { &self.inner }
}

impl DerefMut for SemanticTagAnnotation {
  fn deref_mut(&mut self) -> &mut Annotation { &mut self.inner }
}
