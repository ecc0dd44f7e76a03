//! Tagged error type returned by the public entry points.
use crate::ooxml::error::FailureKind;
use serde::Serialize;
use thiserror::Error;

/// Main error type for unlatch operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct Error {
    pub kind: FailureKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }
}

/// Result type for unlatch operations.
pub type Result<T> = std::result::Result<T, Error>;
