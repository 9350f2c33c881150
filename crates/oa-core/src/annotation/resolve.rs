//! Variant resolution for [`Annotation::resume`].
//!
//! Deciding the variant ([`resolve_variant`]) is a pure function of the
//! persisted motivation and the body's persisted types. Building the
//! variant is a separate step keyed on the resulting [`VariantKind`].

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use super::{Annotation, CommentAnnotation, SemanticTagAnnotation, TagAnnotation};
use crate::{
  Context, Iri,
  store::GraphStore,
  term::Node,
  vocab::{oa, rdf},
};

// ─── Kind ────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VariantKind {
  Generic,
  Comment,
  Tag,
  SemanticTag,
}

/// Pick the most specific variant consistent with the persisted facts.
///
/// Anything unrecognised or incomplete falls back to
/// [`VariantKind::Generic`]: an unknown motivation, or a `tagging`
/// annotation whose body is missing or typed neither `SemanticTag` nor
/// `Tag`. `SemanticTag` wins if a body carries both types.
pub fn resolve_variant(motivation: Option<&Iri>, body_types: &[Iri]) -> VariantKind {
  match motivation {
    Some(m) if *m == oa::COMMENTING => VariantKind::Comment,
    Some(m) if *m == oa::TAGGING => {
      if body_types.contains(&oa::SEMANTIC_TAG) {
        VariantKind::SemanticTag
      } else if body_types.contains(&oa::TAG) {
        VariantKind::Tag
      } else {
        VariantKind::Generic
      }
    }
    _ => VariantKind::Generic,
  }
}

// ─── AnyAnnotation ───────────────────────────────────────────────────────────

/// An annotation of whichever variant [`Annotation::resume`] resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyAnnotation {
  Generic(Annotation),
  Comment(CommentAnnotation),
  Tag(TagAnnotation),
  SemanticTag(SemanticTagAnnotation),
}

impl AnyAnnotation {
  pub fn kind(&self) -> VariantKind {
    match self {
      Self::Generic(_) => VariantKind::Generic,
      Self::Comment(_) => VariantKind::Comment,
      Self::Tag(_) => VariantKind::Tag,
      Self::SemanticTag(_) => VariantKind::SemanticTag,
    }
  }

  /// The shared annotation fields, whatever the variant.
  pub fn annotation(&self) -> &Annotation {
    match self {
      Self::Generic(a) => a,
      Self::Comment(a) => a,
      Self::Tag(a) => a,
      Self::SemanticTag(a) => a,
    }
  }

  pub fn annotation_mut(&mut self) -> &mut Annotation {
    match self {
      Self::Generic(a) => a,
      Self::Comment(a) => a,
      Self::Tag(a) => a,
      Self::SemanticTag(a) => a,
    }
  }

  pub fn subject(&self) -> &Node { self.annotation().subject() }

  pub fn as_comment(&self) -> Option<&CommentAnnotation> {
    match self {
      Self::Comment(a) => Some(a),
      _ => None,
    }
  }

  pub fn as_tag(&self) -> Option<&TagAnnotation> {
    match self {
      Self::Tag(a) => Some(a),
      _ => None,
    }
  }

  pub fn as_semantic_tag(&self) -> Option<&SemanticTagAnnotation> {
    match self {
      Self::SemanticTag(a) => Some(a),
      _ => None,
    }
  }
}

// ─── Resume ──────────────────────────────────────────────────────────────────

impl Annotation {
  /// Reconstruct the most specific annotation variant stored under
  /// `identifier` (absolute IRI or local name).
  ///
  /// A blank identifier fails with `InvalidArgument` before the store is
  /// touched. Missing or unrecognised facts yield the generic variant.
  pub async fn resume<S: GraphStore>(
    ctx: &Context<S>,
    identifier: &str,
  ) -> Result<AnyAnnotation, S::Error> {
    let base = Annotation::load(ctx, identifier).await?;
    let motivation = base.motivated_by();

    // Only tagging needs the body's types to pick a variant.
    let body_types = match (&motivation, base.body_node()) {
      (Some(m), Some(body)) if *m == oa::TAGGING => {
        persisted_types(ctx.store(), &body).await?
      }
      _ => Vec::new(),
    };

    let kind = resolve_variant(motivation.as_ref(), &body_types);
    tracing::debug!(annotation = %base.subject(), %kind, "resolved annotation variant");

    build(ctx.store(), kind, base).await
  }
}

/// The `rdf:type` values the store holds for `node`. In-memory type
/// assertions are ignored on purpose: every typed wrapper asserts its own.
async fn persisted_types<S: GraphStore>(store: &S, node: &Node) -> Result<Vec<Iri>, S::Error> {
  Ok(
    store
      .statements_for(node)
      .await?
      .into_iter()
      .filter(|triple| triple.predicate == rdf::TYPE)
      .filter_map(|triple| triple.object.as_iri().cloned())
      .collect(),
  )
}

async fn build<S: GraphStore>(
  store: &S,
  kind: VariantKind,
  base: Annotation,
) -> Result<AnyAnnotation, S::Error> {
  Ok(match kind {
    VariantKind::Generic => AnyAnnotation::Generic(base),
    VariantKind::Comment => {
      AnyAnnotation::Comment(CommentAnnotation::from_annotation(store, base).await?)
    }
    VariantKind::Tag => AnyAnnotation::Tag(TagAnnotation::from_annotation(store, base).await?),
    VariantKind::SemanticTag => {
      AnyAnnotation::SemanticTag(SemanticTagAnnotation::from_annotation(store, base).await?)
    }
  })
}
