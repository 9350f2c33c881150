//! Encoding and decoding helpers between graph terms and the plain-text
//! representations stored in SQLite columns.
//!
//! IRIs are stored verbatim. Blank nodes are stored as `_:` followed by the
//! simple (unhyphenated) UUID. Literal objects are stored as their lexical
//! value with `is_literal = 1`, so a literal that happens to look like an IRI
//! never compares equal to the IRI itself.

use oa_core::{Iri, Node, Term, Triple};
use uuid::Uuid;

use crate::{Error, Result};

const BLANK_PREFIX: &str = "_:";

// ─── Node ────────────────────────────────────────────────────────────────────

pub fn encode_node(node: &Node) -> String {
  match node {
    Node::Iri(iri) => iri.as_str().to_owned(),
    Node::Blank(id) => format!("{BLANK_PREFIX}{}", id.simple()),
  }
}

pub fn decode_node(s: &str) -> Result<Node> {
  match s.strip_prefix(BLANK_PREFIX) {
    Some(id) => Ok(Node::Blank(Uuid::parse_str(id)?)),
    None => Ok(Node::Iri(decode_iri(s)?)),
  }
}

// ─── Iri ─────────────────────────────────────────────────────────────────────

pub fn decode_iri(s: &str) -> Result<Iri> {
  Iri::parse(s).map_err(|e| Error::Decode(format!("stored IRI {s:?}: {e}")))
}

// ─── Term ────────────────────────────────────────────────────────────────────

/// `(text, is_literal)` for the `object` / `is_literal` column pair.
pub fn encode_term(term: &Term) -> (String, bool) {
  match term {
    Term::Literal(value) => (value.clone(), true),
    Term::Iri(iri) => (iri.as_str().to_owned(), false),
    Term::Blank(id) => (encode_node(&Node::Blank(*id)), false),
  }
}

pub fn decode_term(text: String, is_literal: bool) -> Result<Term> {
  if is_literal {
    Ok(Term::Literal(text))
  } else {
    Ok(decode_node(&text)?.into())
  }
}

// ─── Triple ──────────────────────────────────────────────────────────────────

/// A `triples` row as read from or written to SQLite.
#[derive(Debug, Clone)]
pub struct RawTriple {
  pub subject:    String,
  pub predicate:  String,
  pub object:     String,
  pub is_literal: bool,
}

impl RawTriple {
  pub fn encode(triple: &Triple) -> Self {
    let (object, is_literal) = encode_term(&triple.object);
    Self {
      subject: encode_node(&triple.subject),
      predicate: triple.predicate.as_str().to_owned(),
      object,
      is_literal,
    }
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject:    row.get(0)?,
      predicate:  row.get(1)?,
      object:     row.get(2)?,
      is_literal: row.get(3)?,
    })
  }

  pub fn into_triple(self) -> Result<Triple> {
    Ok(Triple {
      subject:   decode_node(&self.subject)?,
      predicate: decode_iri(&self.predicate)?,
      object:    decode_term(self.object, self.is_literal)?,
    })
  }
}
