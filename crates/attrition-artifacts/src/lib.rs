//! # attrition-artifacts
//!
//! Loading of the two read-only startup artifacts and the typed model of the
//! fitted pipeline.
//!
//! - [`loader`]: existence checks, JSON pipeline decoding, CSV defaults row
//! - [`compat`]: compatibility shims keyed by deserialization error signature
//! - [`pipeline`]: column transformer + classifier, implementing
//!   [`attrition_core::Classifier`]
//!
//! Both artifacts are immutable after loading and safe to share across
//! threads.

pub mod compat;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod pipeline;

pub use error::{ArtifactError, ArtifactKind, LoadFailure};
pub use loader::{DecodedPipeline, LoadedArtifacts, decode_pipeline, load};
pub use pipeline::FittedPipeline;
