//! Core types and the annotation model for the Open Annotation graph store.
//!
//! This crate is deliberately free of database dependencies. Storage
//! backends implement [`store::GraphStore`]; the annotation types in
//! [`annotation`] and [`body`] are generic over it and reconstruct typed
//! variants from the triples a store already holds.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod annotation;
pub mod body;
pub mod context;
pub mod error;
pub mod iri;
pub mod mint;
pub mod resource;
pub mod store;
pub mod term;
pub mod vocab;

pub use annotation::{
  AnyAnnotation, Annotation, BodyPersist, CommentAnnotation, PersistReport,
  SemanticTagAnnotation, TagAnnotation, VariantKind,
};
pub use body::{Body, CommentBody, SemanticTagBody, TagBody};
pub use context::{Config, Context};
pub use error::{Error, Result};
pub use iri::Iri;
pub use term::{Node, Term, Triple};
