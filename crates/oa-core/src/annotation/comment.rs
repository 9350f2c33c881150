//! [`CommentAnnotation`]: motivated by `oa:commenting`, body is a
//! [`CommentBody`].

use std::ops::{Deref, DerefMut};

use super::Annotation;
use crate::{
  Context,
  body::{Body, CommentBody},
  mint::mint_iri,
  store::GraphStore,
  term::Node,
  vocab::{oa, prefix},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAnnotation {
  inner: Annotation,
}

impl CommentAnnotation {
  /// A fresh comment annotation with a minted `ca`-prefixed identifier.
  pub async fn new<S: GraphStore>(ctx: &Context<S>) -> Result<Self, S::Error> {
    let iri = mint_iri(ctx, prefix::COMMENT_ANNOTATION).await?;
    Self::from_annotation(ctx.store(), Annotation::fresh(iri)).await
  }

  /// Bind to `identifier`, resuming its comment body if one is linked.
  pub async fn load<S: GraphStore>(ctx: &Context<S>, identifier: &str) -> Result<Self, S::Error> {
    let inner = Annotation::load(ctx, identifier).await?;
    Self::from_annotation(ctx.store(), inner).await
  }

  pub(crate) async fn from_annotation<S: GraphStore>(
    store: &S,
    mut inner: Annotation,
  ) -> Result<Self, S::Error> {
    inner.ensure_motivation(oa::COMMENTING);
    if let Some(node) = inner.body_node() {
      inner.body = Some(Body::Comment(CommentBody::load(store, node).await?));
    }
    Ok(Self { inner })
  }

  /// Attach a new plain-text comment body. Returns the body's subject.
  pub async fn set_comment<S: GraphStore>(
    &mut self,
    ctx: &Context<S>,
    comment: &str,
  ) -> Result<Node, S::Error> {
    let iri = mint_iri(ctx, prefix::COMMENT_BODY).await?;
    let mut body = CommentBody::new(iri);
    body.set_content(comment);
    body.set_format("text/plain");
    Ok(self.inner.attach_body(Body::Comment(body)))
  }

  pub fn comment_body(&self) -> Option<&CommentBody> {
    match &self.inner.body {
      Some(Body::Comment(body)) => Some(body),
      _ => None,
    }
  }

  /// The comment text; empty when there is no body or no content.
  pub fn comment(&self) -> &str {
    self.comment_body().and_then(CommentBody::content).unwrap_or_default()
  }
}

impl Deref for CommentAnnotation {
  type Target = Annotation;

  fn deref(&self) -> &Annotation { &self.inner }
}

impl DerefMut for CommentAnnotation {
  fn deref_mut(&mut self) -> &mut Annotation { &mut self.inner }
}
