/// Body - the block content and sections of the main document.
use crate::ooxml::docx::block::{Block, BlockContainer, iter_blocks};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::section::Section;
use crate::ooxml::docx::table::Table;
use crate::ooxml::xml::{ElementKind, XmlElement, XmlNode};
use std::ops::{Deref, DerefMut};

/// The `<w:body>` of a Word document.
///
/// Holds paragraphs and tables terminated by one trailing `<w:sectPr>`.
/// Earlier section boundaries are paragraphs whose properties carry a
/// `<w:sectPr>` of their own.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let body = pkg.body()?;
/// println!("{} sections", body.sections().len());
/// for para in body.paragraphs() {
///     println!("Paragraph: {}", para.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Body<E> {
    element: E,
}

fn is_trailing_sect_pr(body: &XmlElement) -> Option<usize> {
    let idx = body.last_element_position()?;
    body.children()[idx]
        .kind()
        .filter(|k| *k == ElementKind::SectionProperties)
        .map(|_| idx)
}

impl<E: Deref<Target = XmlElement>> Body<E> {
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

    pub fn tables(&self) -> impl Iterator<Item = Table<&XmlElement>> {
        self.element.find_all(ElementKind::Table).map(Table::new)
    }

    /// The trailing `<w:sectPr>`, if the body ends with one.
    pub fn section_properties(&self) -> Option<&XmlElement> {
        let idx = is_trailing_sect_pr(&self.element)?;
        self.element.children()[idx].as_element()
    }

    /// Every section in document order: paragraph-embedded ones first, the
    /// trailing one last.
    pub fn sections(&self) -> Vec<Section<&XmlElement>> {
        self.element
            .elements()
            .filter_map(|e| match e.kind() {
                ElementKind::Paragraph => e
                    .find(ElementKind::ParagraphProperties)?
                    .find(ElementKind::SectionProperties),
                ElementKind::SectionProperties => Some(e),
                _ => None,
            })
            .map(Section::new)
            .collect()
    }

    /// Text of the body paragraphs, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<E: DerefMut<Target = XmlElement>> Body<E> {
    /// Mutable handles to every section, in the same order as
    /// [`sections`](Self::sections).
    pub fn sections_mut(&mut self) -> Vec<Section<&mut XmlElement>> {
        self.element
            .elements_mut()
            .filter_map(|e| match e.kind() {
                ElementKind::Paragraph => e
                    .find_mut(ElementKind::ParagraphProperties)?
                    .find_mut(ElementKind::SectionProperties),
                ElementKind::SectionProperties => Some(e),
                _ => None,
            })
            .map(Section::new)
            .collect()
    }
}

impl<E: DerefMut<Target = XmlElement>> BlockContainer for Body<E> {
    fn container(&self) -> &XmlElement {
        &self.element
    }

    fn container_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    /// Before the trailing `<w:sectPr>`.
    fn insertion_index(&self) -> usize {
        is_trailing_sect_pr(&self.element).unwrap_or(self.element.children().len())
    }

    /// Everything but the trailing `<w:sectPr>` goes.
    fn clear_content(&mut self) {
        let keep = is_trailing_sect_pr(&self.element);
        let children = std::mem::take(self.element.children_mut());
        *self.element.children_mut() = children
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) == keep)
            .map(|(_, node)| node)
            .collect::<Vec<XmlNode>>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::parse;

    fn body(inner: &str) -> XmlElement {
        let xml = format!(
            r#"<w:body xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{}</w:body>"#,
            inner
        );
        parse(xml.as_bytes()).unwrap().root
    }

    const TWO_SECTIONS: &str = concat!(
        r#"<w:p><w:r><w:t>one</w:t></w:r></w:p>"#,
        r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="1"/></w:sectPr></w:pPr></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>"#,
        r#"<w:sectPr><w:pgSz w:w="2"/></w:sectPr>"#,
        "\n"
    );

    #[test]
    fn test_sections_in_document_order() {
        let b = body(TWO_SECTIONS);
        let body = Body::new(&b);
        let widths: Vec<_> = body
            .sections()
            .iter()
            .map(|s| s.page_size().unwrap().width.unwrap().0)
            .collect();
        assert_eq!(widths, vec![1, 2]);
        assert!(body.section_properties().is_some());
        assert_eq!(body.blocks().count(), 3);
        assert_eq!(body.tables().count(), 1);
    }

    #[test]
    fn test_sections_mut_matches_sections() {
        let mut b = body(TWO_SECTIONS);
        let mut body = Body::new(&mut b);
        for mut section in body.sections_mut() {
            section.set_title_page(true);
        }
        assert!(body.sections().iter().all(|s| s.title_page()));
    }

    #[test]
    fn test_insert_before_trailing_sect_pr() {
        let mut b = body(TWO_SECTIONS);
        let mut body = Body::new(&mut b);
        body.clear_content();
        assert_eq!(body.element().children().len(), 1);
        body.add_paragraph().add_run().add_text("new");
        body.add_table(&[None]);
        let kinds: Vec<_> = body.element().elements().map(XmlElement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Paragraph,
                ElementKind::Table,
                ElementKind::SectionProperties
            ]
        );
    }

    #[test]
    fn test_body_without_sect_pr_appends() {
        let mut b = body("<w:p/>");
        let mut body = Body::new(&mut b);
        assert!(body.section_properties().is_none());
        body.add_paragraph();
        assert_eq!(body.paragraphs().count(), 2);
        body.clear_content();
        assert!(body.element().children().is_empty());
    }
}
