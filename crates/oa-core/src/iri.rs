//! [`Iri`]: an absolute IRI, compared by its string value.
//!
//! Vocabulary terms are `const` values built with [`Iri::from_static`];
//! runtime values go through [`Iri::parse`]. Both representations compare
//! equal when their text is equal, so a motivation read back from the store
//! matches the vocabulary constant it was written from.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(Cow<'static, str>);

impl Iri {
  /// Wrap a compile-time IRI without validation. Only for vocabulary tables.
  pub const fn from_static(iri: &'static str) -> Self {
    Self(Cow::Borrowed(iri))
  }

  /// Validate `value` as an absolute IRI.
  pub fn parse(value: impl Into<String>) -> Result<Self> {
    let value = value.into();
    if value.trim().is_empty() {
      return Err(Error::invalid("IRI must not be empty"));
    }
    if sophia_iri::Iri::new(value.as_str()).is_err() {
      return Err(Error::invalid(format!("not an absolute IRI: {value:?}")));
    }
    Ok(Self(Cow::Owned(value)))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Append a local name to this IRI and validate the result.
  pub fn join(&self, local_name: &str) -> Result<Self> {
    Self::parse(format!("{}{}", self.0, local_name))
  }
}

/// True if `value` parses as an absolute IRI.
pub fn is_absolute(value: &str) -> bool {
  sophia_iri::Iri::new(value).is_ok()
}

/// Turn a caller-supplied identifier into an absolute IRI.
///
/// An absolute IRI is taken as-is; anything else is a local name appended
/// to `base`. Blank input is rejected before any store is consulted.
pub fn resolve_identifier(input: &str, base: &Iri) -> Result<Iri> {
  if input.trim().is_empty() {
    return Err(Error::invalid(
      "identifier must be a non-empty local name or an absolute IRI",
    ));
  }
  if is_absolute(input) {
    return Iri::parse(input);
  }
  base.join(input)
}

impl fmt::Display for Iri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for Iri {
  fn as_ref(&self) -> &str { &self.0 }
}

impl FromStr for Iri {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Iri {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(value) }
}

impl TryFrom<&str> for Iri {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> { Self::parse(value) }
}

impl From<Iri> for String {
  fn from(iri: Iri) -> Self { iri.0.into_owned() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vocab::oa;

  fn base() -> Iri { Iri::parse("http://localhost/").unwrap() }

  #[test]
  fn parses_absolute_iri() {
    let iri = Iri::parse("http://example.org/ta1").unwrap();
    assert_eq!(iri.as_str(), "http://example.org/ta1");
  }

  #[test]
  fn rejects_relative_and_blank_values() {
    assert!(Iri::parse("ta1").unwrap_err().is_invalid_argument());
    assert!(Iri::parse("").unwrap_err().is_invalid_argument());
    assert!(Iri::parse("   ").unwrap_err().is_invalid_argument());
  }

  #[test]
  fn static_and_parsed_values_compare_by_text() {
    let parsed = Iri::parse(oa::COMMENTING.as_str()).unwrap();
    assert_eq!(parsed, oa::COMMENTING);
    assert_ne!(parsed, oa::TAGGING);
  }

  #[test]
  fn local_name_is_appended_to_base() {
    let iri = resolve_identifier("123", &base()).unwrap();
    assert_eq!(iri.as_str(), "http://localhost/123");
  }

  #[test]
  fn absolute_identifier_ignores_base() {
    let iri = resolve_identifier("http://example.org/moomin", &base()).unwrap();
    assert_eq!(iri.as_str(), "http://example.org/moomin");
  }

  #[test]
  fn blank_identifier_is_invalid() {
    assert!(resolve_identifier("", &base()).unwrap_err().is_invalid_argument());
    assert!(resolve_identifier("  ", &base()).unwrap_err().is_invalid_argument());
  }

  #[test]
  fn local_name_that_breaks_the_iri_is_invalid() {
    let err = resolve_identifier("has space", &base()).unwrap_err();
    assert!(err.is_invalid_argument());
  }

  #[test]
  fn deserialize_rejects_relative_iri() {
    let ok: Iri = serde_json::from_str("\"http://example.org/x\"").unwrap();
    assert_eq!(ok.as_str(), "http://example.org/x");
    assert!(serde_json::from_str::<Iri>("\"x\"").is_err());
  }
}
