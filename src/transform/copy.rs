//! Structural copy of paragraphs and tables between documents.
use crate::ooxml::docx::block::{Block, BlockContainer};
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::styles::{Style, StyleCatalog, resolve_style, resolve_table_style};
use crate::ooxml::docx::table::Table;
use crate::ooxml::xml::{ElementKind, XmlElement};
use smallvec::SmallVec;
use tracing::debug;

/// Copies block content from a source document into containers of a
/// target document.
///
/// Every copy is built from fresh elements through the typed setters, so
/// nothing of the source tree (relationship ids, revision marks, drawings)
/// leaks into the target. Styles are carried over by name against the
/// target's own catalog.
#[derive(Debug, Clone, Copy)]
pub struct ContentCopier<'a> {
    source_styles: &'a StyleCatalog,
    target_styles: &'a StyleCatalog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub paragraphs: usize,
    pub tables: usize,
}

impl<'a> ContentCopier<'a> {
    pub fn new(source_styles: &'a StyleCatalog, target_styles: &'a StyleCatalog) -> Self {
        Self {
            source_styles,
            target_styles,
        }
    }

    /// Copy `blocks` in order to the end of `target`. Returns how many top
    /// level paragraphs and tables were added.
    pub fn copy_blocks<'b, C>(&self, blocks: impl Iterator<Item = Block<'b>>, target: &mut C) -> CopyStats
    where
        C: BlockContainer + ?Sized,
    {
        let mut stats = CopyStats::default();
        for block in blocks {
            match block {
                Block::Paragraph(p) => {
                    self.copy_paragraph(&p, target);
                    stats.paragraphs += 1;
                },
                Block::Table(t) => {
                    if self.copy_table(&t, target) {
                        stats.tables += 1;
                    }
                },
            }
        }
        stats
    }

    /// Append a copy of `source` to `target`: alignment, paragraph style and
    /// every run with its text and character formatting. Formatting the
    /// source leaves unset stays unset.
    pub fn copy_paragraph<C>(&self, source: &Paragraph<&XmlElement>, target: &mut C)
    where
        C: BlockContainer + ?Sized,
    {
        let style_id = self.paragraph_style(source.style_id());
        let mut para = target.add_paragraph();
        para.set_alignment(source.alignment());
        para.set_style_id(style_id);

        for run in source.runs() {
            let mut copy = para.add_run();
            copy.set_bold(run.bold());
            copy.set_italic(run.italic());
            copy.set_underline(run.underline().as_ref());
            copy.set_font_name(run.font_name());
            copy.set_font_size(run.font_size());
            copy.set_color(run.color());
            for item in run.content() {
                copy.push_content(&item);
            }
        }

        let skipped = source
            .element()
            .elements()
            .filter(|e| {
                !matches!(e.kind(), ElementKind::ParagraphProperties | ElementKind::Run)
                    && e.local_name() != "hyperlink"
            })
            .count();
        if skipped > 0 {
            debug!(skipped, "paragraph children without a copy rule dropped");
        }
    }

    /// Append a copy of `source` to `target`, recursing into cells.
    ///
    /// A table with no rows or no columns is skipped and `false` returned.
    /// Each source row becomes a target row with the table's full column
    /// count; cells beyond a short source row stay empty.
    pub fn copy_table<C>(&self, source: &Table<&XmlElement>, target: &mut C) -> bool
    where
        C: BlockContainer + ?Sized,
    {
        let rows = source.rows();
        let columns = source.column_count();
        if rows.is_empty() || columns == 0 {
            debug!(rows = rows.len(), columns, "skipping empty table");
            return false;
        }

        let mut grid = source.grid();
        if grid.len() != columns {
            grid = SmallVec::from_elem(None, columns);
        }
        let style_id = self.table_style(source.style_id());

        let mut table = target.add_table(&grid);
        table.set_style_id(style_id);

        for row in &rows {
            let mut new_row = table.add_row(columns);
            for (cell, mut new_cell) in row.cells().iter().zip(new_row.cells_mut()) {
                new_cell.clear_content();
                self.copy_blocks(cell.blocks(), &mut new_cell);
                new_cell.ensure_trailing_paragraph();
            }
        }
        true
    }

    /// Target style id for a source paragraph style: the target style with
    /// the same name, else the target's default paragraph style, which is
    /// expressed by omitting `w:pStyle`.
    fn paragraph_style(&self, source_id: Option<&str>) -> Option<&'a str> {
        let name = self.source_styles.name_for_id(source_id?);
        resolve_style(name, WdStyleType::Paragraph, self.target_styles)
            .filter(|style| !style.is_default())
            .map(Style::style_id)
    }

    fn table_style(&self, source_id: Option<&str>) -> Option<&'a str> {
        let name = source_id.map(|id| self.source_styles.name_for_id(id));
        resolve_table_style(name, self.target_styles).map(Style::style_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::document::Body;
    use crate::ooxml::docx::enums::WdParagraphAlignment;
    use crate::ooxml::docx::format::{HalfPoints, RgbColor, UnderlineStyle};
    use crate::ooxml::docx::paragraph::{BreakType, RunContent};
    use crate::ooxml::xml::parse;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn element(xml: &str) -> XmlElement {
        parse(xml.as_bytes()).unwrap().root
    }

    fn body(inner: &str) -> XmlElement {
        element(&format!("<w:body {NS}>{inner}</w:body>"))
    }

    fn catalog(inner: &str) -> StyleCatalog {
        StyleCatalog::from_element(&element(&format!("<w:styles {NS}>{inner}</w:styles>")))
    }

    fn source_catalog() -> StyleCatalog {
        catalog(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
            <w:style w:type="paragraph" w:styleId="Titre1"><w:name w:val="heading 1"/></w:style>
            <w:style w:type="paragraph" w:styleId="Quote"><w:name w:val="Quote"/></w:style>
            <w:style w:type="table" w:styleId="Fancy"><w:name w:val="Fancy Table"/></w:style>"#,
        )
    }

    fn target_catalog() -> StyleCatalog {
        catalog(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
            <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
            <w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style>"#,
        )
    }

    fn ends_with_paragraph(container: &XmlElement) -> bool {
        container
            .elements()
            .filter(|e| e.kind().is_block())
            .last()
            .is_some_and(|e| e.is(ElementKind::Paragraph))
    }

    fn copy_into_empty(source: &XmlElement) -> XmlElement {
        let (src, dst) = (source_catalog(), target_catalog());
        let copier = ContentCopier::new(&src, &dst);
        let mut target = body("<w:sectPr/>");
        {
            let mut view = Body::new(&mut target);
            copier.copy_blocks(Body::new(source).blocks(), &mut view);
        }
        target
    }

    #[test]
    fn test_run_formatting_fidelity() {
        let source = body(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>
                <w:r><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial"/><w:b/><w:i w:val="0"/><w:u w:val="double"/><w:color w:val="1F4E79"/><w:sz w:val="28"/></w:rPr><w:t xml:space="preserve">Bold </w:t><w:tab/><w:t>text</w:t><w:br w:type="page"/></w:r>
                <w:r><w:t>plain</w:t></w:r>
            </w:p>"#,
        );

        let target = copy_into_empty(&source);
        let view = Body::new(&target);
        let paragraphs: Vec<_> = view.paragraphs().collect();
        assert_eq!(paragraphs.len(), 1);
        let para = &paragraphs[0];
        assert_eq!(para.alignment(), Some(WdParagraphAlignment::Center));
        assert_eq!(para.style_id(), None);

        let runs = para.runs();
        assert_eq!(runs.len(), 2);
        let styled = &runs[0];
        assert_eq!(styled.bold(), Some(true));
        assert_eq!(styled.italic(), Some(false));
        assert_eq!(styled.underline(), Some(UnderlineStyle::Double));
        assert_eq!(styled.font_name(), Some("Arial"));
        assert_eq!(styled.font_size(), Some(HalfPoints(28)));
        assert_eq!(styled.color(), Some(RgbColor(0x1F, 0x4E, 0x79)));
        assert_eq!(
            styled.content().into_vec(),
            vec![
                RunContent::Text("Bold ".to_string()),
                RunContent::Tab,
                RunContent::Text("text".to_string()),
                RunContent::Break(BreakType::Page),
            ]
        );

        let plain = &runs[1];
        assert_eq!(plain.text(), "plain");
        assert_eq!(plain.bold(), None);
        assert_eq!(plain.italic(), None);
        assert_eq!(plain.underline(), None);
        assert_eq!(plain.font_name(), None);
        assert_eq!(plain.font_size(), None);
        assert_eq!(plain.color(), None);
        assert!(plain.element().find(ElementKind::RunProperties).is_none());

        // Copies land ahead of the trailing section properties.
        assert!(target.last_element().unwrap().is(ElementKind::SectionProperties));
    }

    #[test]
    fn test_paragraph_style_by_name() {
        let source = body(
            r#"<w:p><w:pPr><w:pStyle w:val="Titre1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
            <w:p><w:pPr><w:pStyle w:val="Quote"/></w:pPr></w:p>
            <w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr></w:p>"#,
        );
        let target = copy_into_empty(&source);
        let styles: Vec<_> = Body::new(&target)
            .paragraphs()
            .map(|p| p.style_id().map(str::to_string))
            .collect();
        assert_eq!(styles, vec![Some("Heading1".to_string()), None, None]);
    }

    #[test]
    fn test_dropped_content_is_not_fabricated() {
        let source = body(
            r#"<w:p><w:bookmarkStart w:id="0" w:name="x"/><w:r><w:drawing/></w:r><w:hyperlink r:id="rId5" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let target = copy_into_empty(&source);
        let view = Body::new(&target);
        let para = view.paragraphs().next().unwrap();
        assert_eq!(para.text(), "link");
        let names: Vec<_> = para.element().elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["r", "r"]);
    }

    #[test]
    fn test_zero_row_and_zero_column_tables_skipped() {
        let source = body(
            r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol w:w="100"/></w:tblGrid></w:tbl>
            <w:tbl><w:tblPr/><w:tr/></w:tbl>
            <w:p/>"#,
        );
        let (src, dst) = (source_catalog(), target_catalog());
        let copier = ContentCopier::new(&src, &dst);
        let mut target = body("<w:sectPr/>");
        let stats = copier.copy_blocks(Body::new(&source).blocks(), &mut Body::new(&mut target));
        assert_eq!(stats, CopyStats { paragraphs: 1, tables: 0 });
        assert_eq!(Body::new(&target).tables().count(), 0);
    }

    #[test]
    fn test_table_shape_and_style() {
        let source = body(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="Fancy"/></w:tblPr><w:tblGrid><w:gridCol w:w="2000"/><w:gridCol w:w="3000"/><w:gridCol w:w="4000"/></w:tblGrid>
                <w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc></w:tr>
                <w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>wide</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>d</w:t></w:r></w:p></w:tc></w:tr>
            </w:tbl>"#,
        );
        let target = copy_into_empty(&source);
        let view = Body::new(&target);
        let table = view.tables().next().unwrap();

        assert_eq!(table.style_id(), Some("TableGrid"));
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        let rows = table.rows();
        assert!(rows.iter().all(|r| r.cell_count() == 3));
        let first: Vec<_> = rows[0].cells().iter().map(|c| c.text()).collect();
        assert_eq!(first, vec!["a", "b", "c"]);
        let second: Vec<_> = rows[1].cells().iter().map(|c| c.text()).collect();
        assert_eq!(second, vec!["wide", "d", ""]);
        for row in &rows {
            for cell in row.cells() {
                assert_eq!(cell.paragraphs().count(), 1);
            }
        }
    }

    #[test]
    fn test_nested_table_depth_two() {
        let source = body(
            r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid><w:tr>
                <w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p>
                    <w:tbl><w:tblPr/><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc>
                        <w:tbl><w:tblPr/><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p><w:r><w:t>deep</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                    </w:tc></w:tr></w:tbl>
                </w:tc>
                <w:tc><w:p><w:r><w:t>side</w:t></w:r></w:p></w:tc>
            </w:tr></w:tbl>"#,
        );
        let target = copy_into_empty(&source);
        let view = Body::new(&target);
        let outer = view.tables().next().unwrap();
        let outer_rows = outer.rows();
        let cells = outer_rows[0].cells();
        assert_eq!(cells[1].text(), "side");

        let outer_cell = &cells[0];
        assert_eq!(outer_cell.text(), "outer\n");
        assert!(ends_with_paragraph(outer_cell.element()));
        let Some(Block::Table(middle)) = outer_cell.blocks().nth(1) else {
            panic!("expected a nested table");
        };
        let middle_rows = middle.rows();
        let middle_cells = middle_rows[0].cells();
        let Some(Block::Table(inner)) = middle_cells[0].blocks().next() else {
            panic!("expected a table at depth two");
        };
        assert!(ends_with_paragraph(middle_cells[0].element()));
        assert_eq!(inner.rows()[0].cells()[0].text(), "deep");
    }

    #[test]
    fn test_table_style_omitted_when_catalog_lacks_grid() {
        let src = source_catalog();
        let dst = StyleCatalog::default();
        let copier = ContentCopier::new(&src, &dst);
        let source = body(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="Fancy"/></w:tblPr><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>"#,
        );
        let mut target = body("");
        copier.copy_blocks(Body::new(&source).blocks(), &mut Body::new(&mut target));
        let view = Body::new(&target);
        let table = view.tables().next().unwrap();
        assert_eq!(table.style_id(), None);
        assert_eq!(
            table.element().find(ElementKind::TableProperties).unwrap().find(ElementKind::TableStyle),
            None
        );
    }
}
