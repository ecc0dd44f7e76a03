//! Document transforms.
//!
//! Each transform works on in-memory [`Package`]s and never touches the
//! filesystem; the path-based entry points live in [`crate::api`].
//!
//! - [`strip_protection`]: drop editing restrictions from the settings
//! - [`normalize`]: one default header and footer and one page geometry for
//!   every section
//! - [`ContentCopier`]: recursive copy of paragraphs and tables
//! - [`merge_into_model`]: source body content in a model document's shell
//! - [`rebuild_simple`]: source body content in a blank shell
pub mod copy;
pub mod merge;
pub mod normalize;
pub mod protection;
pub mod rebuild;

pub use copy::{ContentCopier, CopyStats};
pub use merge::{MergeReport, merge_into_model};
pub use normalize::{NormalizeReport, normalize, resolve_reference};
pub use protection::{StripReport, strip_protection};
pub use rebuild::{RebuildReport, rebuild_simple};

use crate::ooxml::docx::Package;
use crate::ooxml::error::Result;
use serde::Serialize;

/// Outcome of [`strip_and_normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripNormalizeReport {
    pub protection: StripReport,
    pub normalize: NormalizeReport,
}

/// Unlock a document and normalize its header/footer wiring.
pub fn strip_and_normalize(package: &mut Package) -> Result<StripNormalizeReport> {
    let protection = strip_protection(package);
    let normalized = normalize(package)?;
    Ok(StripNormalizeReport {
        protection,
        normalize: normalized,
    })
}
