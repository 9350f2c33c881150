//! Local-name minting: fresh identifiers under the configured base IRI.

use uuid::Uuid;

use crate::{Context, Error, Iri, store::GraphStore, term::Node};

/// Strategy for generating the local part of a new identifier.
///
/// Implementations only need to produce plausible names; collision checks
/// against the store happen in [`mint_iri`].
pub trait LocalNameMinter: Send + Sync {
  fn mint(&self, prefix: &str) -> String;
}

/// `<prefix><uuid-v4 without hyphens>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidMinter;

impl LocalNameMinter for UuidMinter {
  fn mint(&self, prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
  }
}

/// Mint an IRI under the context's base IRI that no stored subject uses yet.
///
/// Tries at most `config.mint_attempts` names before giving up with
/// [`Error::MintExhausted`].
pub async fn mint_iri<S: GraphStore>(
  ctx: &Context<S>,
  prefix: &str,
) -> Result<Iri, S::Error> {
  let attempts = ctx.config.mint_attempts.max(1);

  for _ in 0..attempts {
    let candidate = ctx.config.base_iri.join(&ctx.minter.mint(prefix))?;
    let node = Node::Iri(candidate.clone());
    if !ctx.store.has_subject(&node).await? {
      return Ok(candidate);
    }
    tracing::debug!(%candidate, "minted local name already in use");
  }

  Err(
    Error::MintExhausted {
      prefix: prefix.to_owned(),
      attempts,
    }
    .into(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uuid_minter_keeps_prefix() {
    let name = UuidMinter.mint("tb");
    assert!(name.starts_with("tb"));
    assert_eq!(name.len(), 2 + 32);
  }

  #[test]
  fn uuid_minter_does_not_repeat() {
    assert_ne!(UuidMinter.mint("oa"), UuidMinter.mint("oa"));
  }
}
