//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.
use super::types::Error;
use crate::ooxml::error::{FailureKind, OoxmlError};
use crate::ooxml::opc::error::OpcError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        Error::new(err.kind(), err.to_string())
    }
}

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        Error::from(OoxmlError::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(FailureKind::IoFailure, format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_conversion() {
        let err = Error::from(OoxmlError::MissingBody("/word/document.xml".into()));
        assert_eq!(err.kind(), FailureKind::MissingBody);
        assert_eq!(err.to_string(), "Missing body: /word/document.xml");

        let err = Error::from(OpcError::PartNotFound("/word/styles.xml".into()));
        assert_eq!(err.kind(), FailureKind::InvalidPackage);

        let json = serde_json::to_value(Error::new(FailureKind::IoFailure, "disk full")).unwrap();
        assert_eq!(json["kind"], "IoFailure");
        assert_eq!(json["message"], "disk full");
    }
}
