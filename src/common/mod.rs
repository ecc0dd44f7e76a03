//! Types shared by the path-based entry points and the batch layer.
pub mod error;

pub use error::{Error, FailureKind, Result};
