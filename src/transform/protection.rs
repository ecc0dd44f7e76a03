//! Editing-restriction removal.
use crate::ooxml::docx::Package;
use serde::Serialize;
use tracing::debug;

/// Which settings declarations [`strip_protection`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripReport {
    /// `w:documentProtection` was present and removed
    pub document_protection: bool,
    /// `w:evenAndOddHeaders` was present and removed
    pub even_and_odd_headers: bool,
}

impl StripReport {
    pub fn removed_anything(&self) -> bool {
        self.document_protection || self.even_and_odd_headers
    }
}

/// Remove document protection and the even/odd header switch from the
/// settings part.
///
/// A document without a settings part, or whose settings declare neither,
/// is left untouched.
pub fn strip_protection(package: &mut Package) -> StripReport {
    let Some(mut settings) = package.settings_mut() else {
        debug!("no settings part, nothing to strip");
        return StripReport::default();
    };

    let report = StripReport {
        document_protection: settings.remove_document_protection(),
        even_and_odd_headers: settings.remove_even_and_odd_headers(),
    };
    debug!(
        document_protection = report.document_protection,
        even_and_odd_headers = report.even_and_odd_headers,
        "stripped settings"
    );
    report
}
