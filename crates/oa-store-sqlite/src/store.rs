//! [`SqliteStore`]: the SQLite implementation of [`GraphStore`].

use std::{collections::HashSet, path::Path};

use oa_core::{
  Node, Triple,
  store::{Bindings, GraphStore, Pattern},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawTriple, decode_term, encode_node},
  query::compile,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A triple store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of stored triples.
  pub async fn len(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM triples", [], |r| r.get(0))?))
      .await?;
    Ok(count as usize)
  }

  pub async fn is_empty(&self) -> Result<bool> { Ok(self.len().await? == 0) }

  /// Run raw SQL against the connection, for fault injection in tests.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn insert_triples(tx: &rusqlite::Transaction<'_>, raws: &[RawTriple]) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(
    "INSERT OR IGNORE INTO triples (subject, predicate, object, is_literal)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for raw in raws {
    stmt.execute(rusqlite::params![raw.subject, raw.predicate, raw.object, raw.is_literal])?;
  }
  Ok(())
}

// ─── GraphStore impl ─────────────────────────────────────────────────────────

impl GraphStore for SqliteStore {
  type Error = Error;

  async fn statements_for(&self, subject: &Node) -> Result<Vec<Triple>> {
    let subject_str = encode_node(subject);

    let raws: Vec<RawTriple> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subject, predicate, object, is_literal
           FROM triples WHERE subject = ?1 ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![subject_str], RawTriple::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTriple::into_triple).collect()
  }

  async fn has_subject(&self, subject: &Node) -> Result<bool> {
    let subject_str = encode_node(subject);

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM triples WHERE subject = ?1 LIMIT 1",
              rusqlite::params![subject_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn query(&self, pattern: &Pattern) -> Result<Vec<Bindings>> {
    let Some(compiled) = compile(pattern) else {
      return Ok(Vec::new());
    };
    let width = compiled.variables.len();
    let (sql, params) = (compiled.sql, compiled.params);

    let raw_rows: Vec<Vec<(String, bool)>> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            (0..width)
              .map(|k| Ok((row.get(1 + 2 * k)?, row.get(2 + 2 * k)?)))
              .collect::<rusqlite::Result<Vec<(String, bool)>>>()
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut seen: HashSet<Bindings> = HashSet::new();
    let mut solutions: Vec<Bindings> = Vec::new();
    for raw in raw_rows {
      let mut row = Bindings::new();
      for (name, (text, is_literal)) in compiled.variables.iter().zip(raw) {
        row.insert(name.clone(), decode_term(text, is_literal)?);
      }
      if seen.insert(row.clone()) {
        solutions.push(row);
      }
    }

    tracing::trace!(patterns = pattern.triples.len(), rows = solutions.len(), "graph query");
    Ok(solutions)
  }

  async fn put(&self, triples: Vec<Triple>) -> Result<()> {
    if triples.is_empty() {
      return Ok(());
    }
    let raws: Vec<RawTriple> = triples.iter().map(RawTriple::encode).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_triples(&tx, &raws)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_subject(&self, subject: &Node, triples: Vec<Triple>) -> Result<()> {
    let subject_str = encode_node(subject);
    let raws: Vec<RawTriple> = triples.iter().map(RawTriple::encode).collect();

    // Dropping an uncommitted transaction rolls it back, so a failed insert
    // leaves the old triples in place.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM triples WHERE subject = ?1", rusqlite::params![subject_str])?;
        insert_triples(&tx, &raws)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete(&self, triple: &Triple) -> Result<bool> {
    let raw = RawTriple::encode(triple);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM triples
           WHERE subject = ?1 AND predicate = ?2 AND object = ?3 AND is_literal = ?4",
          rusqlite::params![raw.subject, raw.predicate, raw.object, raw.is_literal],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn delete_subject(&self, subject: &Node) -> Result<usize> {
    let subject_str = encode_node(subject);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM triples WHERE subject = ?1",
          rusqlite::params![subject_str],
        )?)
      })
      .await?;
    Ok(removed)
  }
}

