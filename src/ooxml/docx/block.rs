//! Block-level content shared by the body, table cells, headers and footers.
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::section::Twips;
use crate::ooxml::docx::table::{Table, new_table_element};
use crate::ooxml::xml::{ElementKind, XmlElement, XmlNode};

/// A paragraph or a table.
#[derive(Debug)]
pub enum Block<'a> {
    Paragraph(Paragraph<&'a XmlElement>),
    Table(Table<&'a XmlElement>),
}

/// Paragraphs and tables of `container`, in order. Every other child is
/// skipped.
pub fn iter_blocks(container: &XmlElement) -> impl Iterator<Item = Block<'_>> {
    container.elements().filter_map(|e| match e.kind() {
        ElementKind::Paragraph => Some(Block::Paragraph(Paragraph::new(e))),
        ElementKind::Table => Some(Block::Table(Table::new(e))),
        _ => None,
    })
}

/// Something that holds paragraphs and tables and accepts new ones.
pub trait BlockContainer {
    fn container(&self) -> &XmlElement;

    fn container_mut(&mut self) -> &mut XmlElement;

    /// Index into the container's children where new blocks go.
    fn insertion_index(&self) -> usize {
        self.container().children().len()
    }

    /// Remove the block content, keeping whatever the container must keep
    /// (properties, trailing section properties).
    fn clear_content(&mut self);

    /// Insert a block element at [`insertion_index`](Self::insertion_index).
    fn insert_block(&mut self, block: XmlElement) -> &mut XmlElement {
        let idx = self.insertion_index();
        match self.container_mut().insert(idx, block) {
            XmlNode::Element(e) => e,
            _ => unreachable!("just inserted an element"),
        }
    }

    /// Add an empty paragraph.
    fn add_paragraph(&mut self) -> Paragraph<&mut XmlElement> {
        Paragraph::new(self.insert_block(XmlElement::new(ElementKind::Paragraph)))
    }

    /// Add a table with no rows and one grid column per entry of `grid`.
    fn add_table(&mut self, grid: &[Option<Twips>]) -> Table<&mut XmlElement> {
        Table::new(self.insert_block(new_table_element(grid)))
    }

    /// Whether the last block is a paragraph; cells must end in one.
    fn ends_with_paragraph(&self) -> bool {
        self.container()
            .elements()
            .filter(|e| e.kind().is_block())
            .last()
            .is_some_and(|e| e.is(ElementKind::Paragraph))
    }
}
