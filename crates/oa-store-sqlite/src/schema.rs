//! SQL schema for the triple store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per statement. `seq` records insertion order, which is the order
-- statements and query results are reported in.
CREATE TABLE IF NOT EXISTS triples (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    subject     TEXT    NOT NULL,   -- IRI, or '_:<uuid>' for blank nodes
    predicate   TEXT    NOT NULL,   -- IRI
    object      TEXT    NOT NULL,   -- IRI, '_:<uuid>', or literal text
    is_literal  INTEGER NOT NULL CHECK (is_literal IN (0, 1)),
    UNIQUE (subject, predicate, object, is_literal)
);

CREATE INDEX IF NOT EXISTS triples_subject_idx          ON triples(subject);
CREATE INDEX IF NOT EXISTS triples_predicate_object_idx ON triples(predicate, object);

PRAGMA user_version = 1;
";
