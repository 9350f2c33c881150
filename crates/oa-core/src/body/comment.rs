//! [`CommentBody`]: free-text comment content with a MIME format.

use crate::{
  Iri, Result,
  resource::{GraphResource, Resource},
  store::GraphStore,
  term::{Node, Term},
  vocab::{cnt, dcterms, dctypes},
};

const TYPES: [Iri; 2] = [dctypes::TEXT, cnt::CONTENT_AS_TEXT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody {
  resource: Resource,
}

impl CommentBody {
  pub fn new(iri: Iri) -> Self { Self { resource: Resource::new(iri, &TYPES) } }

  pub async fn load<S: GraphStore>(store: &S, node: Node) -> Result<Self, S::Error> {
    Ok(Self { resource: Resource::load(store, node, &TYPES).await? })
  }

  pub fn content(&self) -> Option<&str> { self.resource.first_literal(&cnt::CHARS) }

  pub fn set_content(&mut self, content: &str) {
    self.resource.set_one(cnt::CHARS, Term::literal(content));
  }

  /// MIME type of the content, e.g. `text/plain`.
  pub fn format(&self) -> Option<&str> { self.resource.first_literal(&dcterms::FORMAT) }

  pub fn set_format(&mut self, format: &str) {
    self.resource.set_one(dcterms::FORMAT, Term::literal(format));
  }
}

impl GraphResource for CommentBody {
  fn resource(&self) -> &Resource { &self.resource }

  fn resource_mut(&mut self) -> &mut Resource { &mut self.resource }
}
