//! Header/footer wiring normalization.
//!
//! Word documents assembled from several sources often carry divergent
//! first-page, even-page and default header/footer references per section.
//! [`normalize`] rewires every section to the header and footer the reader
//! sees on page one, as plain `default` references, and gives every section
//! the first section's page geometry.
use crate::ooxml::docx::enums::{HeaderFooterKind, WdHeaderFooter};
use crate::ooxml::docx::section::Section;
use crate::ooxml::docx::Package;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::XmlElement;
use serde::Serialize;
use std::ops::Deref;
use tracing::debug;

/// Outcome of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Number of sections rewritten
    pub sections: usize,
    /// Header part every section now references, if one was resolved
    pub header_id: Option<String>,
    /// Footer part every section now references, if one was resolved
    pub footer_id: Option<String>,
    /// Whether page size or margins were copied from the first section
    pub geometry_propagated: bool,
}

/// The reference the first page of `section` shows for `kind`: the `first`
/// variant when the section has a distinct title page and declares one,
/// the `default` variant otherwise.
pub fn resolve_reference<E: Deref<Target = XmlElement>>(
    section: &Section<E>,
    kind: HeaderFooterKind,
) -> Option<String> {
    section
        .title_page()
        .then(|| section.reference_id(kind, WdHeaderFooter::FirstPage))
        .flatten()
        .or_else(|| section.reference_id(kind, WdHeaderFooter::Primary))
}

/// Rewire every section to the first section's page-one header and footer
/// and page geometry.
///
/// For each section the title page flag is cleared, `w:pgSz` and `w:pgMar`
/// are replaced by copies of the first section's, and each kind with a
/// resolved reference is reduced to a single `default` reference, headers
/// ahead of footers. Kinds the first section does not reference are left
/// as they are. Running it twice gives the same tree as running it once.
///
/// Fails with [`OoxmlError::UnsupportedStructure`] when the first section
/// carries a header or footer reference without a relationship id.
pub fn normalize(package: &mut Package) -> Result<NormalizeReport> {
    let mut body = package.body_mut()?;
    let mut sections = body.sections_mut();

    let Some(canonical) = sections.first() else {
        debug!("document has no sections");
        return Ok(NormalizeReport::default());
    };

    if let Some(kind) = canonical.reference_without_id() {
        return Err(OoxmlError::UnsupportedStructure(format!(
            "first section has a {kind} reference without r:id"
        )));
    }

    let header_id = resolve_reference(canonical, HeaderFooterKind::Header);
    let footer_id = resolve_reference(canonical, HeaderFooterKind::Footer);
    let pg_sz = canonical.page_size_element().cloned();
    let pg_mar = canonical.margins_element().cloned();
    debug!(
        title_page = canonical.title_page(),
        header = ?header_id,
        footer = ?footer_id,
        has_page_size = pg_sz.is_some(),
        has_margins = pg_mar.is_some(),
        "resolved canonical section"
    );

    for (idx, section) in sections.iter_mut().enumerate() {
        section.set_title_page(false);

        if let Some(pg_mar) = &pg_mar {
            section.replace_margins_element(pg_mar);
        }
        if let Some(pg_sz) = &pg_sz {
            section.replace_page_size_element(pg_sz);
        }

        if let Some(id) = &header_id {
            section.set_sole_default_reference(HeaderFooterKind::Header, id);
        }
        if let Some(id) = &footer_id {
            section.set_sole_default_reference(HeaderFooterKind::Footer, id);
        }
        debug!(section = idx, "normalized section");
    }

    Ok(NormalizeReport {
        sections: sections.len(),
        header_id,
        footer_id,
        geometry_propagated: pg_sz.is_some() || pg_mar.is_some(),
    })
}
