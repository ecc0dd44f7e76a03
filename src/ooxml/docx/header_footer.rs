/// Header and footer parts (`<w:hdr>` / `<w:ftr>`).
use crate::ooxml::docx::block::{Block, BlockContainer, iter_blocks};
use crate::ooxml::docx::enums::HeaderFooterKind;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::xml::{ElementKind, XmlElement};
use std::ops::{Deref, DerefMut};

/// A header or footer part in a Word document.
///
/// Headers and footers contain paragraphs and tables just like the main
/// document body. They live in separate parts (`/word/header*.xml` and
/// `/word/footer*.xml`) addressed from sections by relationship id, and
/// several sections may share one part.
#[derive(Debug)]
pub struct HeaderFooter<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> HeaderFooter<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// Header or footer, from the root element; `None` for anything else.
    pub fn kind(&self) -> Option<HeaderFooterKind> {
        match self.element.kind() {
            ElementKind::Header => Some(HeaderFooterKind::Header),
            ElementKind::Footer => Some(HeaderFooterKind::Footer),
            _ => None,
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        iter_blocks(&self.element)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<&XmlElement>> {
        self.element.find_all(ElementKind::Paragraph).map(Paragraph::new)
    }

    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<E: DerefMut<Target = XmlElement>> BlockContainer for HeaderFooter<E> {
    fn container(&self) -> &XmlElement {
        &self.element
    }

    fn container_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    fn clear_content(&mut self) {
        self.element.children_mut().clear();
    }
}
