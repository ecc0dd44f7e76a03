//! Body merge: source content poured into a model document's shell.
use crate::ooxml::docx::block::BlockContainer;
use crate::ooxml::docx::Package;
use crate::ooxml::error::Result;
use crate::transform::copy::{ContentCopier, CopyStats};
use crate::transform::normalize::{NormalizeReport, normalize};
use crate::transform::protection::{StripReport, strip_protection};
use serde::Serialize;
use tracing::info;

/// Outcome of [`merge_into_model`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub protection: StripReport,
    pub normalize: NormalizeReport,
    /// Top-level paragraphs copied from the source body
    pub paragraphs: usize,
    /// Top-level tables copied from the source body
    pub tables: usize,
}

/// Replace the body content of `model` with the content of `source`.
///
/// The model keeps its section properties, headers, footers, styles and
/// every other part; it is unlocked and normalized first. Source section
/// properties are not carried over. Returns the merged model.
pub fn merge_into_model(source: &Package, mut model: Package) -> Result<(Package, MergeReport)> {
    let protection = strip_protection(&mut model);
    let normalized = normalize(&mut model)?;

    let source_body = source.body()?;
    let target_styles = model.style_catalog().clone();
    let copier = ContentCopier::new(source.style_catalog(), &target_styles);

    let mut body = model.body_mut()?;
    body.clear_content();
    let CopyStats { paragraphs, tables } = copier.copy_blocks(source_body.blocks(), &mut body);

    info!(paragraphs, tables, "merged source body into model");
    let report = MergeReport {
        protection,
        normalize: normalized,
        paragraphs,
        tables,
    };
    Ok((model, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::{HeaderFooterKind, WdHeaderFooter};
    use crate::ooxml::docx::section::Twips;
    use crate::ooxml::docx::testing::DocxBuilder;
    use crate::ooxml::xml::ElementKind;

    fn model() -> Package {
        DocxBuilder::new(
            r#"<w:p><w:r><w:t>Model text</w:t></w:r></w:p>
            <w:tbl><w:tblPr/><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>
            <w:sectPr><w:headerReference w:type="first" r:id="rIdH1"/><w:footerReference w:type="default" r:id="rIdF1"/><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="2000" w:right="1000" w:bottom="2000" w:left="1000" w:header="500" w:footer="500" w:gutter="0"/><w:titlePg/></w:sectPr>"#,
        )
        .settings(r#"<w:documentProtection w:edit="readOnly" w:enforcement="1"/>"#)
        .header("rIdH1", "<w:p><w:r><w:t>Letterhead</w:t></w:r></w:p>")
        .footer("rIdF1", "<w:p><w:r><w:t>Address</w:t></w:r></w:p>")
        .package()
    }

    fn source() -> Package {
        DocxBuilder::new(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>First</w:t></w:r></w:p>
            <w:p><w:pPr><w:sectPr><w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/></w:sectPr></w:pPr></w:p>
            <w:tbl><w:tblPr/><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>
            <w:p><w:r><w:t>Last</w:t></w:r></w:p>
            <w:sectPr><w:pgSz w:w="1" w:h="1"/></w:sectPr>"#,
        )
        .package()
    }

    #[test]
    fn test_merge_keeps_shell_and_replaces_content() {
        let (mut merged, report) = merge_into_model(&source(), model()).unwrap();
        assert!(report.protection.document_protection);
        assert_eq!(report.paragraphs, 3);
        assert_eq!(report.tables, 1);

        {
            let body = merged.body().unwrap();
            let text: Vec<_> = body.paragraphs().map(|p| p.text()).collect();
            assert_eq!(text, vec!["First", "", "Last"]);
            assert_eq!(body.tables().count(), 1);

            // Only the model's trailing section survives, still last.
            let sections = body.sections();
            assert_eq!(sections.len(), 1);
            assert!(body.element().last_element().unwrap().is(ElementKind::SectionProperties));
            let section = &sections[0];
            assert_eq!(section.page_size().unwrap().width, Some(Twips(11906)));
            assert_eq!(section.margins().unwrap().top, Some(Twips(2000)));
            assert!(!section.title_page());
            assert_eq!(
                section.reference_id(HeaderFooterKind::Header, WdHeaderFooter::Primary).as_deref(),
                Some("rIdH1")
            );
            assert_eq!(
                section.reference_id(HeaderFooterKind::Footer, WdHeaderFooter::Primary).as_deref(),
                Some("rIdF1")
            );
        }
        assert_eq!(merged.header_footer("rIdH1").unwrap().text(), "Letterhead");
        assert!(!merged.settings().unwrap().has_document_protection());

        let reopened = Package::from_bytes(&merged.to_bytes().unwrap()).unwrap();
        assert_eq!(reopened.body().unwrap().paragraphs().count(), 3);
        assert_eq!(reopened.header_footer("rIdF1").unwrap().text(), "Address");
    }

    #[test]
    fn test_merge_empty_source_clears_model() {
        let empty = DocxBuilder::new("<w:sectPr/>").package();
        let (merged, report) = merge_into_model(&empty, model()).unwrap();
        assert_eq!((report.paragraphs, report.tables), (0, 0));
        let body = merged.body().unwrap();
        assert_eq!(body.blocks().count(), 0);
        assert_eq!(body.element().elements().count(), 1);
    }

    #[test]
    fn test_merge_into_unprotected_model() {
        let plain = DocxBuilder::new(r#"<w:p/><w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>"#).package();
        let (merged, report) = merge_into_model(&source(), plain).unwrap();
        assert!(!report.protection.removed_anything());
        assert_eq!(report.normalize.header_id, None);
        assert!(merged.settings().is_none());
        assert_eq!(merged.body().unwrap().paragraphs().count(), 3);
    }
}
