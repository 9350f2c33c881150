//! [`TagAnnotation`]: motivated by `oa:tagging`, body is a shared
//! [`TagBody`].

use std::ops::{Deref, DerefMut};

use super::Annotation;
use crate::{
  Context,
  body::{Body, TagBody, validate_tag_value},
  mint::mint_iri,
  resource::GraphResource,
  store::GraphStore,
  term::Node,
  vocab::{oa, prefix},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnnotation {
  inner: Annotation,
}

impl TagAnnotation {
  /// A fresh tag annotation with a minted `tg`-prefixed identifier.
  pub async fn new<S: GraphStore>(ctx: &Context<S>) -> Result<Self, S::Error> {
    let iri = mint_iri(ctx, prefix::TAG_ANNOTATION).await?;
    Self::from_annotation(ctx.store(), Annotation::fresh(iri)).await
  }

  /// Bind to `identifier`, resuming its tag body if one is linked.
  pub async fn load<S: GraphStore>(ctx: &Context<S>, identifier: &str) -> Result<Self, S::Error> {
    let inner = Annotation::load(ctx, identifier).await?;
    Self::from_annotation(ctx.store(), inner).await
  }

  pub(crate) async fn from_annotation<S: GraphStore>(
    store: &S,
    mut inner: Annotation,
  ) -> Result<Self, S::Error> {
    inner.ensure_motivation(oa::TAGGING);
    if let Some(node) = inner.body_node() {
      inner.body = Some(Body::Tag(TagBody::load(store, node).await?));
    }
    Ok(Self { inner })
  }

  /// Tag the annotation with `tag`, reusing the persisted tag body that
  /// already carries it, or minting a new one. Returns the body's subject.
  ///
  /// Lookup and creation are separate round trips with no lock between
  /// them: two concurrent calls with a never-seen tag can each create a
  /// body. A newly minted body is only visible to later lookups once this
  /// annotation is persisted.
  pub async fn set_tag<S: GraphStore>(
    &mut self,
    ctx: &Context<S>,
    tag: &str,
  ) -> Result<Node, S::Error> {
    let tag = validate_tag_value(tag)?;

    if let Some(current) = self.tag_body()
      && current.tag() == Some(tag)
    {
      return Ok(current.subject().clone());
    }

    let body = match TagBody::fetch_by_tag_value(ctx, tag).await? {
      Some(existing) => existing,
      None => {
        let iri = mint_iri(ctx, prefix::TAG_BODY).await?;
        tracing::debug!(tag, body = %iri, "minting new tag body");
        let mut body = TagBody::new(iri);
        body.set_tag(tag);
        body
      }
    };

    Ok(self.inner.attach_body(Body::Tag(body)))
  }

  pub fn tag_body(&self) -> Option<&TagBody> {
    match &self.inner.body {
      Some(Body::Tag(body)) => Some(body),
      _ => None,
    }
  }

  /// The tag string; empty when there is no body or no tag.
  pub fn tag(&self) -> &str { self.tag_body().and_then(TagBody::tag).unwrap_or_default() }
}

impl Deref for TagAnnotation {
  type Target = Annotation;

  fn deref(&self) -> &Annotation { &self.inner }
}

impl DerefMut for TagAnnotation {
  fn deref_mut(&mut self) -> &mut Annotation { &mut self.inner }
}
