//! Compiles a basic graph [`Pattern`] into one SQL statement.
//!
//! Triple pattern `i` becomes the table alias `t{i}`. Fixed terms turn into
//! bound parameters; a variable seen more than once is joined on both its
//! text and its literal flag, so `"x"` and `<x>` never unify. Subjects are
//! never literals, so their flag is the constant `0`.

use oa_core::store::{Pattern, PatternTerm};
use rusqlite::types::Value;

use crate::encode::{encode_node, encode_term};

/// SQL text, positional parameters, and the variables selected, in column
/// order. Column 0 is `t0.seq`; variable `k` occupies columns `1 + 2k` (text)
/// and `2 + 2k` (literal flag).
#[derive(Debug, Clone)]
pub struct CompiledQuery {
  pub sql:       String,
  pub params:    Vec<Value>,
  pub variables: Vec<String>,
}

struct Column {
  text: String,
  flag: String,
}

impl Column {
  fn subject(i: usize) -> Self { Self { text: format!("t{i}.subject"), flag: "0".into() } }

  fn object(i: usize) -> Self {
    Self { text: format!("t{i}.object"), flag: format!("t{i}.is_literal") }
  }
}

#[derive(Default)]
struct Builder {
  conds:  Vec<String>,
  params: Vec<Value>,
  seen:   Vec<(String, Column)>,
}

impl Builder {
  fn param(&mut self, value: Value) -> String {
    self.params.push(value);
    format!("?{}", self.params.len())
  }

  fn bind(&mut self, position: &PatternTerm, column: Column, is_subject: bool) {
    match position {
      PatternTerm::Term(term) => match term.as_node() {
        Some(node) => {
          let p = self.param(Value::Text(encode_node(&node)));
          self.conds.push(format!("{} = {p}", column.text));
          if !is_subject {
            self.conds.push(format!("{} = 0", column.flag));
          }
        }
        None if is_subject => {
          // A literal can never be a subject.
          self.conds.push("0 = 1".into());
        }
        None => {
          let (text, _) = encode_term(term);
          let p = self.param(Value::Text(text));
          self.conds.push(format!("{} = {p}", column.text));
          self.conds.push(format!("{} = 1", column.flag));
        }
      },
      PatternTerm::Var(name) => {
        match self.seen.iter().find(|(seen, _)| seen == name) {
          Some((_, first)) => {
            let join = format!(
              "{} = {} AND {} = {}",
              first.text, column.text, first.flag, column.flag
            );
            self.conds.push(join);
          }
          None => self.seen.push((name.clone(), column)),
        }
      }
    }
  }
}

/// `None` for an empty pattern, which matches nothing.
pub fn compile(pattern: &Pattern) -> Option<CompiledQuery> {
  if pattern.triples.is_empty() {
    return None;
  }

  let mut b = Builder::default();
  for (i, tp) in pattern.triples.iter().enumerate() {
    let p = b.param(Value::Text(tp.predicate.as_str().to_owned()));
    b.conds.push(format!("t{i}.predicate = {p}"));
    b.bind(&tp.subject, Column::subject(i), true);
    b.bind(&tp.object, Column::object(i), false);
  }

  let mut select = vec!["t0.seq".to_owned()];
  for (_, column) in &b.seen {
    select.push(column.text.clone());
    select.push(column.flag.clone());
  }
  let from = (0..pattern.triples.len())
    .map(|i| format!("triples t{i}"))
    .collect::<Vec<_>>()
    .join(", ");

  let sql = format!(
    "SELECT {} FROM {from} WHERE {} ORDER BY t0.seq",
    select.join(", "),
    b.conds.join(" AND ")
  );

  Some(CompiledQuery {
    sql,
    params: b.params,
    variables: b.seen.into_iter().map(|(name, _)| name).collect(),
  })
}

#[cfg(test)]
mod tests {
  use oa_core::{Iri, Term, vocab::{cnt, oa, rdf}};

  use super::*;

  #[test]
  fn empty_pattern_compiles_to_nothing() {
    assert!(compile(&Pattern::new()).is_none());
  }

  #[test]
  fn shared_variable_becomes_a_join() {
    let pattern = Pattern::new()
      .with(PatternTerm::var("a"), oa::HAS_BODY, PatternTerm::var("b"))
      .with(PatternTerm::var("b"), rdf::TYPE, oa::TAG);
    let q = compile(&pattern).unwrap();

    assert_eq!(q.variables, vec!["a", "b"]);
    assert!(q.sql.contains("FROM triples t0, triples t1"));
    assert!(q.sql.contains("t0.object = t1.subject AND t0.is_literal = 0"));
    assert_eq!(q.params.len(), 3);
  }

  #[test]
  fn literal_constant_requires_literal_flag() {
    let pattern = Pattern::new().with(
      PatternTerm::var("tag"),
      cnt::CHARS,
      Term::literal("rust"),
    );
    let q = compile(&pattern).unwrap();
    assert!(q.sql.contains("t0.object = ?2 AND t0.is_literal = 1"));
    assert_eq!(q.params[1], Value::Text("rust".into()));
  }

  #[test]
  fn iri_constant_requires_non_literal_flag() {
    let target = Iri::parse("http://example.org/book").unwrap();
    let pattern = Pattern::new().with(PatternTerm::var("a"), oa::HAS_TARGET, target);
    let q = compile(&pattern).unwrap();
    assert!(q.sql.contains("t0.is_literal = 0"));
  }

  #[test]
  fn literal_subject_never_matches() {
    let pattern = Pattern::new().with(Term::literal("x"), rdf::TYPE, PatternTerm::var("t"));
    let q = compile(&pattern).unwrap();
    assert!(q.sql.contains("0 = 1"));
  }
}
