/// Error types for docx operations.
use crate::ooxml::opc::error::OpcError;
use serde::Serialize;
use thiserror::Error;

/// Result type for docx operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for docx operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// The package is not a WordprocessingML document
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// The main document has no body
    #[error("Missing body: {0}")]
    MissingBody(String),

    /// Structure the transforms cannot handle
    #[error("Unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

/// Coarse classification of a failure, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidPackage,
    MissingBody,
    UnsupportedStructure,
    IoFailure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InvalidPackage => "invalid package",
            Self::MissingBody => "missing body",
            Self::UnsupportedStructure => "unsupported structure",
            Self::IoFailure => "I/O failure",
        })
    }
}

impl OoxmlError {
    /// Failure kind this error belongs to.
    ///
    /// Anything wrong with the archive or its XML counts as an invalid
    /// package; only genuine file system errors are I/O failures.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Io(_) | Self::Opc(OpcError::Io(_)) => FailureKind::IoFailure,
            Self::Opc(OpcError::PackageNotFound(_)) => FailureKind::IoFailure,
            Self::Opc(_) | Self::Xml(_) | Self::InvalidPackage(_) => FailureKind::InvalidPackage,
            Self::MissingBody(_) => FailureKind::MissingBody,
            Self::UnsupportedStructure(_) => FailureKind::UnsupportedStructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let io = OoxmlError::from(std::io::Error::other("disk"));
        assert_eq!(io.kind(), FailureKind::IoFailure);

        let missing = OoxmlError::Opc(OpcError::PackageNotFound("x.docx".into()));
        assert_eq!(missing.kind(), FailureKind::IoFailure);

        let part = OoxmlError::Opc(OpcError::PartNotFound("/word/document.xml".into()));
        assert_eq!(part.kind(), FailureKind::InvalidPackage);

        assert_eq!(
            OoxmlError::MissingBody("no w:body".into()).kind(),
            FailureKind::MissingBody
        );
        assert_eq!(FailureKind::IoFailure.to_string(), "I/O failure");
    }
}
