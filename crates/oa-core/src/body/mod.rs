//! Annotation bodies: the resources holding an annotation's content.

mod comment;
mod semantic_tag;
mod tag;

pub use comment::CommentBody;
pub use semantic_tag::SemanticTagBody;
pub use tag::TagBody;

pub(crate) use tag::validate_tag_value;

use crate::{
  resource::{GraphResource, Resource},
  store::GraphStore,
  term::Node,
};

/// The single body an annotation holds in memory. The body's subject is
/// what the annotation's `hasBody` points at, and what is used to re-fetch
/// it when the annotation is resumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
  Comment(CommentBody),
  Tag(TagBody),
  SemanticTag(SemanticTagBody),
}

impl Body {
  /// Load the body at `node` as the same kind as `self`. A semantic tag
  /// needs an IRI, so a blank `node` yields `None` for that kind.
  pub(crate) async fn load_same_kind<S: GraphStore>(
    &self,
    store: &S,
    node: Node,
  ) -> Result<Option<Self>, S::Error> {
    Ok(match (self, node) {
      (Self::Comment(_), node) => Some(Self::Comment(CommentBody::load(store, node).await?)),
      (Self::Tag(_), node) => Some(Self::Tag(TagBody::load(store, node).await?)),
      (Self::SemanticTag(_), Node::Iri(term)) => {
        Some(Self::SemanticTag(SemanticTagBody::load(store, term).await?))
      }
      (Self::SemanticTag(_), Node::Blank(_)) => None,
    })
  }
}

impl GraphResource for Body {
  fn resource(&self) -> &Resource {
    match self {
      Self::Comment(body) => body.resource(),
      Self::Tag(body) => body.resource(),
      Self::SemanticTag(body) => body.resource(),
    }
  }

  fn resource_mut(&mut self) -> &mut Resource {
    match self {
      Self::Comment(body) => body.resource_mut(),
      Self::Tag(body) => body.resource_mut(),
      Self::SemanticTag(body) => body.resource_mut(),
    }
  }
}
