//! Nodes, terms and triples: the unit of storage in a [`GraphStore`].
//!
//! A triple is a single subject–predicate–object statement. Resources are
//! nothing more than the set of triples sharing a subject.
//!
//! [`GraphStore`]: crate::store::GraphStore

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Iri;

// ─── Node ────────────────────────────────────────────────────────────────────

/// Anything that can stand in subject position.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Node {
  Iri(Iri),
  /// A resource without an IRI yet. Rendered as `_:<uuid>`.
  Blank(Uuid),
}

impl Node {
  /// A fresh blank node.
  pub fn blank() -> Self { Self::Blank(Uuid::new_v4()) }

  pub fn as_iri(&self) -> Option<&Iri> {
    match self {
      Self::Iri(iri) => Some(iri),
      Self::Blank(_) => None,
    }
  }

  pub fn is_blank(&self) -> bool { matches!(self, Self::Blank(_)) }
}

impl From<Iri> for Node {
  fn from(iri: Iri) -> Self { Self::Iri(iri) }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Iri(iri) => write!(f, "{iri}"),
      Self::Blank(id) => write!(f, "_:{}", id.simple()),
    }
  }
}

// ─── Term ────────────────────────────────────────────────────────────────────

/// Anything that can stand in object position.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
  Iri(Iri),
  Blank(Uuid),
  /// A plain string literal.
  Literal(String),
}

impl Term {
  pub fn literal(value: impl Into<String>) -> Self { Self::Literal(value.into()) }

  pub fn as_iri(&self) -> Option<&Iri> {
    match self {
      Self::Iri(iri) => Some(iri),
      _ => None,
    }
  }

  pub fn as_literal(&self) -> Option<&str> {
    match self {
      Self::Literal(value) => Some(value),
      _ => None,
    }
  }

  /// The node this term refers to, if it is not a literal.
  pub fn as_node(&self) -> Option<Node> {
    match self {
      Self::Iri(iri) => Some(Node::Iri(iri.clone())),
      Self::Blank(id) => Some(Node::Blank(*id)),
      Self::Literal(_) => None,
    }
  }

  pub fn is_literal(&self) -> bool { matches!(self, Self::Literal(_)) }
}

impl From<Node> for Term {
  fn from(node: Node) -> Self {
    match node {
      Node::Iri(iri) => Self::Iri(iri),
      Node::Blank(id) => Self::Blank(id),
    }
  }
}

impl From<Iri> for Term {
  fn from(iri: Iri) -> Self { Self::Iri(iri) }
}

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Iri(iri) => write!(f, "{iri}"),
      Self::Blank(id) => write!(f, "_:{}", id.simple()),
      Self::Literal(value) => write!(f, "{value:?}"),
    }
  }
}

// ─── Triple ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
  pub subject:   Node,
  pub predicate: Iri,
  pub object:    Term,
}

impl Triple {
  pub fn new(subject: Node, predicate: Iri, object: impl Into<Term>) -> Self {
    Self { subject, predicate, object: object.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_nodes_render_with_prefix() {
    let node = Node::blank();
    assert!(node.to_string().starts_with("_:"));
    assert!(node.is_blank());
    assert!(node.as_iri().is_none());
  }

  #[test]
  fn literal_has_no_node() {
    assert_eq!(Term::literal("good").as_node(), None);
    assert_eq!(Term::literal("good").as_literal(), Some("good"));
  }

  #[test]
  fn iri_term_round_trips_through_node() {
    let iri = Iri::parse("http://example.org/a").unwrap();
    let term = Term::from(iri.clone());
    assert_eq!(term.as_node(), Some(Node::Iri(iri)));
  }
}
