//! Fixed vocabulary terms. Resolution depends on these matching exactly.

use crate::Iri;

pub mod rdf {
  use super::Iri;

  pub const TYPE: Iri =
    Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

/// W3C Open Annotation (`http://www.w3.org/ns/oa#`).
pub mod oa {
  use super::Iri;

  pub const ANNOTATION: Iri = Iri::from_static("http://www.w3.org/ns/oa#Annotation");
  pub const TAG: Iri = Iri::from_static("http://www.w3.org/ns/oa#Tag");
  pub const SEMANTIC_TAG: Iri = Iri::from_static("http://www.w3.org/ns/oa#SemanticTag");

  pub const HAS_TARGET: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasTarget");
  pub const HAS_BODY: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasBody");
  pub const ANNOTATED_BY: Iri = Iri::from_static("http://www.w3.org/ns/oa#annotatedBy");
  pub const ANNOTATED_AT: Iri = Iri::from_static("http://www.w3.org/ns/oa#annotatedAt");
  pub const MOTIVATED_BY: Iri = Iri::from_static("http://www.w3.org/ns/oa#motivatedBy");

  // Motivations
  pub const COMMENTING: Iri = Iri::from_static("http://www.w3.org/ns/oa#commenting");
  pub const TAGGING: Iri = Iri::from_static("http://www.w3.org/ns/oa#tagging");
}

/// Representing Content in RDF (`http://www.w3.org/2011/content#`).
pub mod cnt {
  use super::Iri;

  pub const CONTENT_AS_TEXT: Iri =
    Iri::from_static("http://www.w3.org/2011/content#ContentAsText");
  /// Character content; carries both tag strings and comment text.
  pub const CHARS: Iri = Iri::from_static("http://www.w3.org/2011/content#chars");
}

pub mod dcterms {
  use super::Iri;

  pub const FORMAT: Iri = Iri::from_static("http://purl.org/dc/terms/format");
}

pub mod dctypes {
  use super::Iri;

  pub const TEXT: Iri = Iri::from_static("http://purl.org/dc/dcmitype/Text");
}

/// Local-name prefixes used when minting identifiers for each resource type.
pub mod prefix {
  pub const ANNOTATION: &str = "oa";
  pub const COMMENT_ANNOTATION: &str = "ca";
  pub const TAG_ANNOTATION: &str = "tg";
  pub const SEMANTIC_TAG_ANNOTATION: &str = "stg";
  pub const TAG_BODY: &str = "tb";
  pub const COMMENT_BODY: &str = "cb";
}
