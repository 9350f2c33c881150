//! `oa`: command-line access to an Open Annotation graph store.
//!
//! Reads `oa.toml` (or the path given with `--config`) and `OA_*`
//! environment variables, opens the SQLite store, runs one subcommand and
//! prints its result as JSON.

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use oa_core::Context;
use oa_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::Command;
use settings::Settings;

#[derive(Parser)]
#[command(author, version, about = "Open Annotation graph store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "oa.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store_path = settings.store_path();
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = ?store_path, base = %settings.base_iri, "store opened");

  let ctx = Context::new(store, settings.annotation_config());
  let output = commands::run(&ctx, cli.command).await?;

  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}
