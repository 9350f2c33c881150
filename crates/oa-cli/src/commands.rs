//! Subcommands and their JSON output.

use anyhow::Context as _;
use clap::Subcommand;
use oa_core::{
  Annotation, AnyAnnotation, BodyPersist, CommentAnnotation, Context, Iri, PersistReport,
  SemanticTagAnnotation, TagAnnotation, TagBody, VariantKind,
};
use oa_store_sqlite::SqliteStore;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Subcommand)]
pub enum Command {
  /// Show the annotation stored under an identifier as its most specific
  /// variant.
  Resume {
    /// Absolute IRI or local name under the base IRI.
    id: String,
  },

  /// List the annotations whose target is the given IRI.
  FindByTarget { target: String },

  /// Create a comment annotation.
  Comment {
    #[arg(long)]
    target: String,
    /// IRI of the agent making the annotation.
    #[arg(long)]
    by:     Option<String>,
    text:   String,
  },

  /// Create a tag annotation, reusing the tag's existing body if any.
  Tag {
    #[arg(long)]
    target: String,
    #[arg(long)]
    by:     Option<String>,
    tag:    String,
  },

  /// Create a semantic tag annotation pointing at a vocabulary term.
  Term {
    #[arg(long)]
    target: String,
    #[arg(long)]
    by:     Option<String>,
    term:   String,
  },

  /// List the annotations tagged with the given value.
  TagsUsing { tag: String },

  /// Remove an annotation's own triples. Bodies and targets are kept.
  Destroy { id: String },
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// Flat JSON view of an annotation of any variant.
#[derive(Debug, Serialize)]
pub struct AnnotationView {
  pub id:           String,
  pub kind:         VariantKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub motivated_by: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub annotated_by: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub annotated_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content:      Option<String>,
}

impl AnnotationView {
  pub fn of(any: &AnyAnnotation) -> Self {
    let base = any.annotation();
    let content = match any {
      AnyAnnotation::Generic(_) => None,
      AnyAnnotation::Comment(a) => Some(a.comment().to_owned()),
      AnyAnnotation::Tag(a) => Some(a.tag().to_owned()),
      AnyAnnotation::SemanticTag(a) => a.term().map(Iri::to_string),
    };

    Self {
      id: base.subject().to_string(),
      kind: any.kind(),
      target: base.target().map(Iri::to_string),
      motivated_by: base.motivated_by().map(|m| m.to_string()),
      annotated_by: base.annotated_by().map(|n| n.to_string()),
      annotated_at: base.annotated_at().map(str::to_owned),
      body: base.body_node().map(|n| n.to_string()),
      content,
    }
  }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

pub async fn run(ctx: &Context<SqliteStore>, command: Command) -> anyhow::Result<Value> {
  match command {
    Command::Resume { id } => {
      let any = Annotation::resume(ctx, &id).await?;
      Ok(serde_json::to_value(AnnotationView::of(&any))?)
    }

    Command::FindByTarget { target } => {
      let found = Annotation::find_by_target(ctx, &target).await?;
      Ok(json!(found.iter().map(ToString::to_string).collect::<Vec<_>>()))
    }

    Command::Comment { target, by, text } => {
      let mut ca = CommentAnnotation::new(ctx).await?;
      stamp(&mut ca, &target, by.as_deref())?;
      ca.set_comment(ctx, &text).await?;
      check(ca.persist(ctx.store()).await?)?;
      Ok(serde_json::to_value(AnnotationView::of(&AnyAnnotation::Comment(ca)))?)
    }

    Command::Tag { target, by, tag } => {
      let mut ta = TagAnnotation::new(ctx).await?;
      stamp(&mut ta, &target, by.as_deref())?;
      ta.set_tag(ctx, &tag).await?;
      check(ta.persist(ctx.store()).await?)?;
      Ok(serde_json::to_value(AnnotationView::of(&AnyAnnotation::Tag(ta)))?)
    }

    Command::Term { target, by, term } => {
      let mut sta = SemanticTagAnnotation::new(ctx).await?;
      stamp(&mut sta, &target, by.as_deref())?;
      sta.set_term(ctx, &term).await?;
      check(sta.persist(ctx.store()).await?)?;
      Ok(serde_json::to_value(AnnotationView::of(&AnyAnnotation::SemanticTag(sta)))?)
    }

    Command::TagsUsing { tag } => {
      let found = TagBody::annotations_using(ctx, &tag).await?;
      Ok(json!(found.iter().map(ToString::to_string).collect::<Vec<_>>()))
    }

    Command::Destroy { id } => {
      let mut any = Annotation::resume(ctx, &id).await?;
      let removed = any.annotation_mut().destroy(ctx.store()).await?;
      tracing::info!(annotation = %any.subject(), removed, "destroyed annotation");
      Ok(json!({ "id": any.subject().to_string(), "removed": removed }))
    }
  }
}

/// Set the fields every new annotation gets from the command line.
fn stamp(annotation: &mut Annotation, target: &str, by: Option<&str>) -> anyhow::Result<()> {
  let target = Iri::parse(target).with_context(|| format!("invalid target {target:?}"))?;
  annotation.set_target(target);
  if let Some(by) = by {
    let agent = Iri::parse(by).with_context(|| format!("invalid agent {by:?}"))?;
    annotation.set_annotated_by(agent);
  }
  annotation.set_annotated_at_now();
  Ok(())
}

/// Turn a partial persist into an error; the annotation itself is stored.
fn check(report: PersistReport<oa_store_sqlite::Error>) -> anyhow::Result<()> {
  match report.body {
    BodyPersist::Failed(e) => Err(e).context("annotation stored but its body was not"),
    BodyPersist::Absent | BodyPersist::Persisted => Ok(()),
  }
}
