//! Runtime settings, read from `oa.toml` and `OA_`-prefixed environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use oa_core::{Config, Iri};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_store_path")]
  pub store_path:    PathBuf,
  #[serde(default = "default_base_iri")]
  pub base_iri:      Iri,
  pub mint_attempts: Option<u32>,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/oa/graph.sqlite") }

fn default_base_iri() -> Iri { Iri::from_static("http://localhost/annotations/") }

impl Settings {
  /// Merge the file at `path` (optional) with the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("OA"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Settings for the annotation library itself.
  pub fn annotation_config(&self) -> Config {
    let mut config = Config::new(self.base_iri.clone());
    if let Some(attempts) = self.mint_attempts {
      config.mint_attempts = attempts;
    }
    config
  }

  /// `store_path` with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/oa.toml")).unwrap();
    assert_eq!(settings.base_iri.as_str(), "http://localhost/annotations/");
    assert_eq!(settings.annotation_config().mint_attempts, 10);
  }

  #[test]
  fn mint_attempts_override_is_applied() {
    let settings = Settings {
      store_path:    PathBuf::from(":memory:"),
      base_iri:      Iri::parse("http://example.org/a/").unwrap(),
      mint_attempts: Some(3),
    };
    let config = settings.annotation_config();
    assert_eq!(config.mint_attempts, 3);
    assert_eq!(config.base_iri.as_str(), "http://example.org/a/");
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("/var/lib/oa.sqlite");
    assert_eq!(expand_tilde(plain), plain);

    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x.sqlite")), PathBuf::from(home).join("x.sqlite"));
    }
  }
}
