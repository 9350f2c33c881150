//! Error types for `oa-core`.
//!
//! Only validation and identity errors originate here. Store failures are
//! never wrapped by this crate: every store backend's error type must be
//! constructible from [`Error`], and operations return the backend's error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing input, raised before any store access.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("subject is already set to {current}; cannot change it to {requested}")]
  SubjectAlreadySet { current: String, requested: String },

  #[error("could not mint an unused local name with prefix {prefix:?} after {attempts} attempts")]
  MintExhausted { prefix: String, attempts: u32 },
}

impl Error {
  pub(crate) fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }

  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, Self::InvalidArgument(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
