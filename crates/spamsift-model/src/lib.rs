//! spamsift Model
//!
//! Classifier artifact acquisition and inference.
//!
//! This crate provides:
//! - [`ArtifactProvider`] — downloads the serialized classifier from its
//!   fixed URL on first use, caches it as a single local file, and memoizes
//!   the deserialized handle for the process lifetime behind a single-flight
//!   guard
//! - [`SpamModel`] — the two-method capability interface the pre-trained
//!   artifact is consumed through
//! - [`OnnxArtifactLoader`] — the production deserialization backend
//! - [`classify`] — the stateless inference facade mapping email text to a
//!   labeled, confidence-scored prediction

pub mod artifact;
pub mod classifier;
pub mod facade;
pub mod fetch;
pub mod onnx;
pub mod provider;

pub use artifact::{ArtifactLocation, DEFAULT_ARTIFACT_URL, DEFAULT_CACHE_PATH};
pub use classifier::{ArtifactLoader, LoadedArtifact, SpamModel};
pub use facade::classify;
pub use onnx::{OnnxArtifactLoader, OnnxSpamModel};
pub use provider::ArtifactProvider;
