//! spamsift Core
//!
//! Core types shared across spamsift components.
//!
//! This crate provides:
//! - The spam/ham label and prediction value types
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassProbabilities, Prediction, SpamLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassProbabilities, Prediction, SpamLabel};
}
