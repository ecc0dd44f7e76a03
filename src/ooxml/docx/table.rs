/// Table, Row and Cell views over `<w:tbl>`, `<w:tr>` and `<w:tc>`.
use crate::ooxml::docx::block::{Block, BlockContainer, iter_blocks};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::schema;
use crate::ooxml::docx::section::Twips;
use crate::ooxml::xml::{ElementKind, XmlElement, XmlNode};
use smallvec::SmallVec;
use std::ops::{Deref, DerefMut};

/// A fresh `<w:tbl>` with auto width, a grid and no rows.
pub fn new_table_element(grid: &[Option<Twips>]) -> XmlElement {
    let mut tbl = XmlElement::new(ElementKind::Table);
    let tbl_pr = tbl.push_element(XmlElement::new(ElementKind::TableProperties));
    tbl_pr.push(
        XmlElement::with_name("w:tblW", ElementKind::Other)
            .with_attr("w:w", "0")
            .with_attr("w:type", "auto"),
    );
    tbl.push(grid_element(grid));
    tbl
}

fn grid_element(grid: &[Option<Twips>]) -> XmlElement {
    let mut tbl_grid = XmlElement::new(ElementKind::TableGrid);
    for width in grid {
        let mut col = XmlElement::new(ElementKind::GridColumn);
        if let Some(Twips(w)) = width {
            col.set_attr("w:w", w.to_string());
        }
        tbl_grid.push(col);
    }
    tbl_grid
}

/// A table in a Word document.
///
/// Wraps a `<w:tbl>` element.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// for table in pkg.body()?.tables() {
///     println!("{} x {}", table.row_count(), table.column_count());
///     for row in table.rows() {
///         for cell in row.cells() {
///             println!("Cell: {}", cell.text());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Table<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Table<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// Style id from `w:tblStyle`.
    pub fn style_id(&self) -> Option<&str> {
        self.element
            .find(ElementKind::TableProperties)?
            .find(ElementKind::TableStyle)?
            .attr("w:val")
    }

    /// Widths of the grid columns; `None` for a column without `w:w`.
    pub fn grid(&self) -> SmallVec<[Option<Twips>; 16]> {
        self.element
            .find(ElementKind::TableGrid)
            .map(|grid| {
                grid.find_all(ElementKind::GridColumn)
                    .map(|col| col.attr("w:w").and_then(|w| w.trim().parse().ok()).map(Twips))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of grid columns, or the widest row when the grid is missing.
    pub fn column_count(&self) -> usize {
        let grid = self.grid().len();
        if grid > 0 {
            return grid;
        }
        self.rows().iter().map(Row::cell_count).max().unwrap_or(0)
    }

    pub fn rows(&self) -> SmallVec<[Row<&XmlElement>; 16]> {
        self.element
            .find_all(ElementKind::TableRow)
            .map(Row::new)
            .collect()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.element.find_all(ElementKind::TableRow).count()
    }
}

impl<E: DerefMut<Target = XmlElement>> Table<E> {
    #[inline]
    pub fn element_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    /// Set or clear the style id.
    pub fn set_style_id(&mut self, style_id: Option<&str>) {
        match style_id {
            Some(id) => {
                let tbl_pr = self.element.get_or_insert(ElementKind::TableProperties, schema::TBL);
                tbl_pr
                    .get_or_insert(ElementKind::TableStyle, schema::TBL_PR)
                    .set_attr("w:val", id);
            },
            None => {
                if let Some(tbl_pr) = self.element.find_mut(ElementKind::TableProperties) {
                    tbl_pr.remove_all(ElementKind::TableStyle);
                }
            },
        }
    }

    /// Append a row of `cells` cells, each holding one empty paragraph.
    ///
    /// Cell widths follow the grid where it has them.
    pub fn add_row(&mut self, cells: usize) -> Row<&mut XmlElement> {
        let grid = self.grid();
        let mut tr = XmlElement::new(ElementKind::TableRow);
        for idx in 0..cells {
            let mut tc = XmlElement::new(ElementKind::TableCell);
            if let Some(Some(Twips(w))) = grid.get(idx) {
                let tc_pr = tc.push_element(XmlElement::new(ElementKind::TableCellProperties));
                tc_pr.push(
                    XmlElement::with_name("w:tcW", ElementKind::Other)
                        .with_attr("w:w", w.to_string())
                        .with_attr("w:type", "dxa"),
                );
            }
            tc.push(XmlElement::new(ElementKind::Paragraph));
            tr.push(tc);
        }
        Row::new(self.element.push_element(tr))
    }
}

/// A row in a table.
///
/// Wraps a `<w:tr>` element. The number of cells is fixed when the row is
/// created.
#[derive(Debug)]
pub struct Row<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Row<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    pub fn cells(&self) -> SmallVec<[Cell<&XmlElement>; 16]> {
        self.element
            .find_all(ElementKind::TableCell)
            .map(Cell::new)
            .collect()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.element.find_all(ElementKind::TableCell).count()
    }
}

impl<E: DerefMut<Target = XmlElement>> Row<E> {
    /// Mutable handles to every cell, in order.
    pub fn cells_mut(&mut self) -> SmallVec<[Cell<&mut XmlElement>; 16]> {
        self.element
            .find_all_mut(ElementKind::TableCell)
            .map(Cell::new)
            .collect()
    }
}

/// A cell in a table.
///
/// Wraps a `<w:tc>` element. Cells hold paragraphs and nested tables and
/// must end with a paragraph.
#[derive(Debug)]
pub struct Cell<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Cell<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        iter_blocks(&self.element)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<&XmlElement>> {
        self.element.find_all(ElementKind::Paragraph).map(Paragraph::new)
    }

    /// Text of the cell's direct paragraphs, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<E: DerefMut<Target = XmlElement>> BlockContainer for Cell<E> {
    fn container(&self) -> &XmlElement {
        &self.element
    }

    fn container_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    /// Keeps `w:tcPr`.
    fn clear_content(&mut self) {
        self.element
            .retain_children(|n| n.kind() == Some(ElementKind::TableCellProperties));
    }
}

impl<E: DerefMut<Target = XmlElement>> Cell<E> {
    /// Append an empty paragraph unless the cell already ends with one.
    pub fn ensure_trailing_paragraph(&mut self) {
        if !self.ends_with_paragraph() {
            self.element.push(XmlNode::Element(XmlElement::new(ElementKind::Paragraph)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::parse;

    fn table(inner: &str) -> XmlElement {
        let xml = format!(
            r#"<w:tbl xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{}</w:tbl>"#,
            inner
        );
        parse(xml.as_bytes()).unwrap().root
    }

    #[test]
    fn test_read_table() {
        let t = table(
            r#"<w:tblPr><w:tblStyle w:val="TableGrid"/></w:tblPr><w:tblGrid><w:gridCol w:w="4675"/><w:gridCol w:w="4675"/></w:tblGrid><w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>"#,
        );
        let tbl = Table::new(&t);
        assert_eq!(tbl.style_id(), Some("TableGrid"));
        assert_eq!(tbl.column_count(), 2);
        assert_eq!(tbl.row_count(), 1);
        assert_eq!(tbl.grid().as_slice(), &[Some(Twips(4675)), Some(Twips(4675))]);
        assert_eq!(tbl.rows()[0].cells()[0].text(), "a");
    }

    #[test]
    fn test_column_count_without_grid() {
        let t = table(r#"<w:tr><w:tc><w:p/></w:tc></w:tr><w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr>"#);
        assert_eq!(Table::new(&t).column_count(), 3);
        let empty = table("");
        assert_eq!(Table::new(&empty).column_count(), 0);
    }

    #[test]
    fn test_build_table() {
        let mut t = new_table_element(&[Some(Twips(1000)), None]);
        let mut tbl = Table::new(&mut t);
        tbl.set_style_id(Some("TableGrid"));
        {
            let mut row = tbl.add_row(2);
            assert_eq!(row.cell_count(), 2);
            let mut cells = row.cells_mut();
            cells[0].clear_content();
            assert!(!cells[0].ends_with_paragraph());
            cells[0].ensure_trailing_paragraph();
            assert!(cells[0].ends_with_paragraph());
        }
        assert_eq!(
            t.to_xml(),
            concat!(
                r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/></w:tblPr>"#,
                r#"<w:tblGrid><w:gridCol w:w="1000"/><w:gridCol/></w:tblGrid>"#,
                r#"<w:tr><w:tc><w:tcPr><w:tcW w:w="1000" w:type="dxa"/></w:tcPr><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#
            )
        );
    }

    #[test]
    fn test_cell_ending_in_table_needs_paragraph() {
        let mut t = table(r#"<w:tr><w:tc><w:tcPr/><w:p/><w:tbl/></w:tc></w:tr>"#);
        let mut tbl = Table::new(&mut t);
        let tr = tbl.element_mut().find_mut(ElementKind::TableRow).unwrap();
        let mut row = Row::new(tr);
        let mut cells = row.cells_mut();
        assert!(!cells[0].ends_with_paragraph());
        cells[0].ensure_trailing_paragraph();
        assert!(cells[0].ends_with_paragraph());
    }
}
