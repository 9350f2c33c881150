//! Explicit configuration threaded through every constructor and query.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
  Iri, Result,
  iri::resolve_identifier,
  mint::{LocalNameMinter, UuidMinter},
  store::GraphStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Library configuration, deserialisable from the host application's config.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Root for minted identifiers and for local names given by callers.
  pub base_iri:      Iri,
  /// How many minted names to try before giving up on a collision.
  #[serde(default = "default_mint_attempts")]
  pub mint_attempts: u32,
}

fn default_mint_attempts() -> u32 { 10 }

impl Config {
  pub fn new(base_iri: Iri) -> Self {
    Self { base_iri, mint_attempts: default_mint_attempts() }
  }
}

// ─── Context ─────────────────────────────────────────────────────────────────

/// Everything an annotation operation needs: the store handle, the
/// configuration and the local-name minting strategy.
///
/// Cloning is cheap; all fields are reference-counted.
pub struct Context<S> {
  pub store:  Arc<S>,
  pub config: Arc<Config>,
  pub minter: Arc<dyn LocalNameMinter>,
}

impl<S: GraphStore> Context<S> {
  /// A context using [`UuidMinter`].
  pub fn new(store: S, config: Config) -> Self {
    Self {
      store:  Arc::new(store),
      config: Arc::new(config),
      minter: Arc::new(UuidMinter),
    }
  }

  pub fn with_minter(mut self, minter: impl LocalNameMinter + 'static) -> Self {
    self.minter = Arc::new(minter);
    self
  }

  pub fn store(&self) -> &S { &self.store }

  /// Resolve a caller-supplied identifier against the configured base IRI.
  pub fn resolve(&self, identifier: &str) -> Result<Iri> {
    resolve_identifier(identifier, &self.config.base_iri)
  }
}

impl<S> Clone for Context<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
      minter: Arc::clone(&self.minter),
    }
  }
}
