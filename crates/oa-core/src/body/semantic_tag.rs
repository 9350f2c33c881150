//! [`SemanticTagBody`]: a controlled-vocabulary term used as a tag.
//!
//! The body has no content of its own: its subject is the term's IRI, and
//! the only thing this crate asserts about it is `rdf:type oa:SemanticTag`.

use crate::{
  Iri, Result,
  resource::{GraphResource, Resource},
  store::GraphStore,
  term::Node,
  vocab::oa,
};

const TYPES: [Iri; 1] = [oa::SEMANTIC_TAG];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTagBody {
  term:     Iri,
  resource: Resource,
}

impl SemanticTagBody {
  pub fn new(term: Iri) -> Self {
    Self { resource: Resource::new(term.clone(), &TYPES), term }
  }

  /// Bind to `term`, keeping whatever the store already says about it.
  pub async fn load<S: GraphStore>(store: &S, term: Iri) -> Result<Self, S::Error> {
    let resource = Resource::load(store, Node::Iri(term.clone()), &TYPES).await?;
    Ok(Self { term, resource })
  }

  /// The vocabulary term's IRI.
  pub fn term(&self) -> &Iri { &self.term }
}

impl GraphResource for SemanticTagBody {
  fn resource(&self) -> &Resource { &self.resource }

  fn resource_mut(&mut self) -> &mut Resource { &mut self.resource }
}
