/// Styles - the style catalog of a document.
use crate::ooxml::docx::enums::{WdStyleType, parse_on_off};
use crate::ooxml::xml::{ElementKind, XmlElement};
use smallvec::SmallVec;

/// Name of the generic grid table style used when a table's own style is
/// unavailable.
pub const TABLE_GRID: &str = "Table Grid";

/// A single style definition in a Word document.
///
/// Represents a `<w:style>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Style identifier, what `w:pStyle`/`w:tblStyle` reference
    style_id: String,
    /// UI-visible name
    name: Option<String>,
    /// Type of style (paragraph, character, table, or list)
    style_type: WdStyleType,
    /// Whether this is the default style for its type
    is_default: bool,
}

impl Style {
    pub fn new(style_id: impl Into<String>, name: Option<&str>, style_type: WdStyleType, is_default: bool) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.map(str::to_string),
            style_type,
            is_default,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Get the style name, falling back to the id for unnamed styles.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.style_id)
    }

    #[inline]
    pub fn style_type(&self) -> WdStyleType {
        self.style_type
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    fn from_element(e: &XmlElement) -> Option<Self> {
        let style_id = e.attr("w:styleId")?;
        let style_type = e
            .attr("w:type")
            .and_then(WdStyleType::from_xml)
            .unwrap_or_default();
        let name = e.find(ElementKind::StyleName).and_then(|n| n.attr("w:val"));
        let is_default = e.attr("w:default").is_some_and(|v| parse_on_off(Some(v)));
        Some(Self::new(style_id, name, style_type, is_default))
    }
}

/// The styles of a document, read once from its styles part.
///
/// A document without a styles part has an empty catalog.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    styles: SmallVec<[Style; 32]>,
}

impl StyleCatalog {
    /// Read every `<w:style>` of a `<w:styles>` root.
    pub fn from_element(styles: &XmlElement) -> Self {
        Self {
            styles: styles
                .find_all(ElementKind::Style)
                .filter_map(Style::from_element)
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    pub fn get_by_id(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    /// Look up a style of `style_type` by name, ignoring ASCII case so that
    /// UI names ("Heading 1") match the stored built-in names ("heading 1").
    pub fn get_by_name(&self, name: &str, style_type: WdStyleType) -> Option<&Style> {
        self.styles
            .iter()
            .find(|s| s.style_type == style_type && s.name().eq_ignore_ascii_case(name))
    }

    /// Get the default style for a given style type.
    pub fn get_default(&self, style_type: WdStyleType) -> Option<&Style> {
        self.styles
            .iter()
            .find(|s| s.is_default && s.style_type == style_type)
    }

    /// Name of the style with `style_id`, or the id itself when the catalog
    /// does not define it.
    pub fn name_for_id<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.get_by_id(style_id).map_or(style_id, Style::name)
    }
}

/// Resolve a style name against `catalog`.
///
/// Returns the style of that name and type when the catalog has it, the
/// catalog's default style of the type otherwise. `None` only when neither
/// exists.
pub fn resolve_style<'a>(name: &str, style_type: WdStyleType, catalog: &'a StyleCatalog) -> Option<&'a Style> {
    catalog
        .get_by_name(name, style_type)
        .or_else(|| catalog.get_default(style_type))
}

/// Resolve a table style name, falling back to [`TABLE_GRID`].
pub fn resolve_table_style<'a>(name: Option<&str>, catalog: &'a StyleCatalog) -> Option<&'a Style> {
    name.and_then(|n| catalog.get_by_name(n, WdStyleType::Table))
        .or_else(|| catalog.get_by_name(TABLE_GRID, WdStyleType::Table))
}
