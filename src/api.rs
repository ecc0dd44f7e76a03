//! Path-based entry points.
//!
//! Each function loads its inputs, runs the in-memory transform from
//! [`crate::transform`] and writes the result. Nothing is written when any
//! step fails.
use crate::common::Result;
use crate::ooxml::docx::Package;
use crate::transform::{self, MergeReport, RebuildReport, StripNormalizeReport};
use std::path::Path;
use tracing::info;

/// Unlock `input` and normalize its headers and footers, writing the result
/// to `output`.
///
/// # Examples
///
/// ```rust,no_run
/// let report = unlatch::strip_and_normalize("locked.docx", "unlocked_locked.docx")?;
/// println!("protection removed: {}", report.protection.document_protection);
/// # Ok::<(), unlatch::Error>(())
/// ```
pub fn strip_and_normalize<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<StripNormalizeReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let mut package = Package::open(input)?;
    let report = transform::strip_and_normalize(&mut package)?;
    package.save(output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        sections = report.normalize.sections,
        "unlocked document"
    );
    Ok(report)
}

/// Pour the body of `content` into the shell of `model`, writing the merged
/// document to `output`. The model file itself is not modified.
pub fn merge_into_model<P: AsRef<Path>, M: AsRef<Path>, Q: AsRef<Path>>(
    content: P,
    model: M,
    output: Q,
) -> Result<MergeReport> {
    let (content, model, output) = (content.as_ref(), model.as_ref(), output.as_ref());
    let source = Package::open(content)?;
    let model_package = Package::open(model)?;
    let (mut merged, report) = transform::merge_into_model(&source, model_package)?;
    merged.save(output)?;
    info!(
        content = %content.display(),
        model = %model.display(),
        output = %output.display(),
        "merged document into model"
    );
    Ok(report)
}

/// Rebuild the content of `input` in a blank document written to `output`.
pub fn rebuild_simple<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<RebuildReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = Package::open(input)?;
    let (mut rebuilt, report) = transform::rebuild_simple(&source)?;
    rebuilt.save(output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        "rebuilt document"
    );
    Ok(report)
}
