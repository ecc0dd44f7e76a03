//! Error types for the package (OPC) layer.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    /// The path given to `open` does not exist.
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// The bytes are not a ZIP archive, or the archive is unreadable.
    #[error("not a ZIP package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("duplicate part: {0}")]
    DuplicatePart(String),

    #[error("relationship not found: {0}")]
    RelationshipNotFound(String),

    #[error("content type not found for partname: {0}")]
    ContentTypeNotFound(String),

    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),

    /// `[Content_Types].xml` or a `.rels` item could not be parsed.
    #[error("malformed package item {item}: {message}")]
    MalformedItem { item: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpcError {
    pub(crate) fn malformed(item: impl Into<String>, message: impl ToString) -> Self {
        OpcError::MalformedItem {
            item: item.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
