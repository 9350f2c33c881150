//! Error type for `oa-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] oa_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored value could not be turned back into a node or term.
  #[error("decode error: {0}")]
  Decode(String),
}

impl Error {
  /// True for validation failures raised by the annotation model.
  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, Self::Core(e) if e.is_invalid_argument())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
