//! Crate-level error type.
//!
//! Every entry point reports failures as a tagged [`Error`]: one of the four
//! [`FailureKind`]s plus a human readable message. Layer-specific errors
//! convert into it.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use crate::ooxml::error::FailureKind;
pub use types::{Error, Result};
