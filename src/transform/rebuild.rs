//! Rebuild a document's content inside a fresh blank shell.
use crate::ooxml::docx::block::BlockContainer;
use crate::ooxml::docx::enums::{HeaderFooterKind, WdHeaderFooter};
use crate::ooxml::docx::Package;
use crate::ooxml::error::Result;
use crate::transform::copy::ContentCopier;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of [`rebuild_simple`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub paragraphs: usize,
    pub tables: usize,
    /// Whether the source's default footer was carried over
    pub footer_copied: bool,
}

fn first_default_footer(package: &Package) -> Result<Option<String>> {
    Ok(package
        .body()?
        .sections()
        .first()
        .and_then(|s| s.reference_id(HeaderFooterKind::Footer, WdHeaderFooter::Primary)))
}

/// Copy the paragraphs and tables of `source` into a blank US Letter
/// document, along with the content of the source's first-section default
/// footer. Nothing else of the source survives: no protection, no other
/// headers or footers, no section layout.
pub fn rebuild_simple(source: &Package) -> Result<(Package, RebuildReport)> {
    let mut shell = Package::blank()?;
    let target_styles = shell.style_catalog().clone();
    let copier = ContentCopier::new(source.style_catalog(), &target_styles);

    let stats = {
        let mut body = shell.body_mut()?;
        copier.copy_blocks(source.body()?.blocks(), &mut body)
    };

    let mut footer_copied = false;
    if let Some(source_id) = first_default_footer(source)? {
        let shell_id = first_default_footer(&shell)?;
        match (
            source.header_footer(&source_id),
            shell_id.and_then(|id| shell.header_footer_mut(&id)),
        ) {
            (Some(source_footer), Some(mut footer)) => {
                footer.clear_content();
                let copied = copier.copy_blocks(source_footer.blocks(), &mut footer);
                if copied.paragraphs + copied.tables == 0 {
                    footer.add_paragraph();
                }
                footer_copied = true;
            },
            (None, _) => warn!(r_id = %source_id, "source footer part not found"),
            (_, None) => warn!("blank shell has no default footer"),
        }
    }

    let report = RebuildReport {
        paragraphs: stats.paragraphs,
        tables: stats.tables,
        footer_copied,
    };
    info!(
        paragraphs = report.paragraphs,
        tables = report.tables,
        footer_copied,
        "rebuilt document in blank shell"
    );
    Ok((shell, report))
}
