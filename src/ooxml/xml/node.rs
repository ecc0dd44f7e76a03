//! Mutable XML element tree.

use crate::ooxml::xml::kind::ElementKind;

/// Prefix used for every element and attribute this crate creates in the
/// WordprocessingML main namespace.
pub const WML_PREFIX: &str = "w";

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, entity references already resolved
    Text(String),
    CData(String),
    Comment(String),
    /// Processing instruction content between `<?` and `?>`
    ProcessingInstruction(String),
}

impl XmlNode {
    #[inline]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Kind of the element, `None` for non-element nodes.
    #[inline]
    pub fn kind(&self) -> Option<ElementKind> {
        self.as_element().map(XmlElement::kind)
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        Self::Element(element)
    }
}

/// An element with its qualified name, attributes in document order and
/// children.
///
/// Namespace declarations are kept as ordinary `xmlns`/`xmlns:*` attributes so
/// a parsed element serializes back with the declarations it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    kind: ElementKind,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with an explicit qualified name and kind.
    pub fn with_name(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty `w:` element of a known kind.
    ///
    /// [`ElementKind::Other`] has no name of its own; use
    /// [`with_name`](Self::with_name) for opaque elements.
    pub fn new(kind: ElementKind) -> Self {
        let local = kind.local_name().unwrap_or("unknown");
        Self::with_name(format!("{}:{}", WML_PREFIX, local), kind)
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Qualified name, e.g. `w:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub fn is(&self, kind: ElementKind) -> bool {
        self.kind == kind
    }

    // ---- attributes -------------------------------------------------------

    /// Attributes in document order.
    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Value of the attribute with the qualified name `name` (e.g. `w:val`).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the value in place if it exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(idx).1)
    }

    /// Declare `xmlns:prefix="uri"` on this element unless the prefix is
    /// already declared here.
    pub fn ensure_namespace(&mut self, prefix: &str, uri: &str) {
        let key = format!("xmlns:{}", prefix);
        if self.attr(&key).is_none() {
            self.attributes.push((key, uri.to_string()));
        }
    }

    // ---- children ---------------------------------------------------------

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// First child element of `kind`.
    pub fn find(&self, kind: ElementKind) -> Option<&XmlElement> {
        self.elements().find(|e| e.kind == kind)
    }

    pub fn find_mut(&mut self, kind: ElementKind) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.kind == kind)
    }

    /// Every child element of `kind`, in order.
    pub fn find_all(&self, kind: ElementKind) -> impl Iterator<Item = &XmlElement> {
        self.elements().filter(move |e| e.kind == kind)
    }

    pub fn find_all_mut(&mut self, kind: ElementKind) -> impl Iterator<Item = &mut XmlElement> {
        self.elements_mut().filter(move |e| e.kind == kind)
    }

    /// Whether any child element has `kind`.
    #[inline]
    pub fn contains(&self, kind: ElementKind) -> bool {
        self.find(kind).is_some()
    }

    /// Index into [`children`](Self::children) of the first element of `kind`.
    pub fn position(&self, kind: ElementKind) -> Option<usize> {
        self.children.iter().position(|n| n.kind() == Some(kind))
    }

    /// Index of the last child element, ignoring trailing whitespace text.
    pub fn last_element_position(&self) -> Option<usize> {
        self.children.iter().rposition(|n| n.as_element().is_some())
    }

    /// The last child element.
    pub fn last_element(&self) -> Option<&XmlElement> {
        self.children.iter().rev().find_map(XmlNode::as_element)
    }

    /// Append a child node.
    pub fn push(&mut self, node: impl Into<XmlNode>) {
        self.children.push(node.into());
    }

    /// Append a child element and return a mutable reference to it.
    pub fn push_element(&mut self, element: XmlElement) -> &mut XmlElement {
        let idx = self.children.len();
        self.children.push(XmlNode::Element(element));
        match &mut self.children[idx] {
            XmlNode::Element(e) => e,
            _ => unreachable!("just pushed an element"),
        }
    }

    /// Insert a child node at `index` into [`children`](Self::children).
    pub fn insert(&mut self, index: usize, node: impl Into<XmlNode>) -> &mut XmlNode {
        let index = index.min(self.children.len());
        self.children.insert(index, node.into());
        &mut self.children[index]
    }

    /// Insert `element` at its position in `sequence`, the content model of
    /// this element given as local names in schema order.
    ///
    /// The element goes before the first existing child that the sequence
    /// places after it. Children whose names are not in the sequence never
    /// count as successors.
    pub fn insert_ordered(&mut self, element: XmlElement, sequence: &[&str]) -> &mut XmlElement {
        let rank = |name: &str| sequence.iter().position(|s| *s == name);
        let index = match rank(element.local_name()) {
            Some(own) => self
                .children
                .iter()
                .position(|n| {
                    n.as_element()
                        .and_then(|e| rank(e.local_name()))
                        .is_some_and(|r| r > own)
                })
                .unwrap_or(self.children.len()),
            None => self.children.len(),
        };
        self.children.insert(index, XmlNode::Element(element));
        match &mut self.children[index] {
            XmlNode::Element(e) => e,
            _ => unreachable!("just inserted an element"),
        }
    }

    /// First child of `kind`, inserted empty at its schema position when
    /// missing.
    pub fn get_or_insert(&mut self, kind: ElementKind, sequence: &[&str]) -> &mut XmlElement {
        match self.position(kind) {
            Some(idx) => match &mut self.children[idx] {
                XmlNode::Element(e) => e,
                _ => unreachable!("position only matches elements"),
            },
            None => self.insert_ordered(XmlElement::new(kind), sequence),
        }
    }

    /// Replace the first child of the same kind in place, or insert
    /// `element` at its schema position when there is none.
    pub fn replace_or_insert(&mut self, element: XmlElement, sequence: &[&str]) {
        match self.position(element.kind) {
            Some(idx) => self.children[idx] = XmlNode::Element(element),
            None => {
                self.insert_ordered(element, sequence);
            },
        }
    }

    /// Remove every child element of `kind`, returning how many were removed.
    pub fn remove_all(&mut self, kind: ElementKind) -> usize {
        let before = self.children.len();
        self.children.retain(|n| n.kind() != Some(kind));
        before - self.children.len()
    }

    /// Keep only the children for which `keep` returns true.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&XmlNode) -> bool,
    {
        self.children.retain(keep);
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
                _ => {},
            }
        }
    }
}

/// A parsed XML part: the root element plus anything around it.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Comments and processing instructions before the root
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self {
            prolog: Vec::new(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECT_PR: &[&str] = &["headerReference", "pgSz", "pgMar", "cols", "titlePg"];

    #[test]
    fn test_new_uses_wml_prefix() {
        let p = XmlElement::new(ElementKind::Paragraph);
        assert_eq!(p.name(), "w:p");
        assert_eq!(p.local_name(), "p");
        assert!(p.is(ElementKind::Paragraph));
    }

    #[test]
    fn test_attributes() {
        let mut e = XmlElement::new(ElementKind::Justification).with_attr("w:val", "left");
        e.set_attr("w:val", "center");
        assert_eq!(e.attr("w:val"), Some("center"));
        assert_eq!(e.attributes().len(), 1);
        assert_eq!(e.remove_attr("w:val").as_deref(), Some("center"));
        assert_eq!(e.attr("w:val"), None);
    }

    #[test]
    fn test_insert_ordered() {
        let mut sect = XmlElement::new(ElementKind::SectionProperties);
        sect.push(XmlElement::new(ElementKind::TitlePage));
        sect.insert_ordered(XmlElement::new(ElementKind::PageSize), SECT_PR);
        let kinds: Vec<_> = sect.elements().map(XmlElement::kind).collect();
        assert_eq!(kinds, vec![ElementKind::PageSize, ElementKind::TitlePage]);

        // Opaque successors count too
        let mut sect = XmlElement::new(ElementKind::SectionProperties);
        sect.push(XmlElement::new(ElementKind::HeaderReference));
        sect.push(XmlElement::with_name("w:cols", ElementKind::Other));
        sect.insert_ordered(XmlElement::new(ElementKind::PageMargins), SECT_PR);
        let names: Vec<_> = sect.elements().map(XmlElement::local_name).collect();
        assert_eq!(names, vec!["headerReference", "pgMar", "cols"]);

        // No successor present: appended
        let mut empty = XmlElement::new(ElementKind::SectionProperties);
        empty.insert_ordered(XmlElement::new(ElementKind::PageSize), SECT_PR);
        assert_eq!(empty.children().len(), 1);
    }

    #[test]
    fn test_replace_or_insert_keeps_position() {
        let mut sect = XmlElement::new(ElementKind::SectionProperties);
        sect.push(XmlElement::new(ElementKind::PageSize).with_attr("w:w", "1"));
        sect.push(XmlElement::new(ElementKind::TitlePage));
        sect.replace_or_insert(
            XmlElement::new(ElementKind::PageSize).with_attr("w:w", "2"),
            SECT_PR,
        );
        assert_eq!(sect.position(ElementKind::PageSize), Some(0));
        assert_eq!(sect.find(ElementKind::PageSize).unwrap().attr("w:w"), Some("2"));
    }

    #[test]
    fn test_remove_all_and_text() {
        let mut r = XmlElement::new(ElementKind::Run);
        r.push_element(XmlElement::new(ElementKind::Text)).push(XmlNode::Text("ab".into()));
        r.push(XmlElement::new(ElementKind::Tab));
        r.push_element(XmlElement::new(ElementKind::Text)).push(XmlNode::Text("c".into()));
        assert_eq!(r.text_content(), "abc");
        assert_eq!(r.remove_all(ElementKind::Text), 2);
        assert_eq!(r.children().len(), 1);
    }
}
