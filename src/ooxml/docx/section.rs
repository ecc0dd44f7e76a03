/// Section - page setup and header/footer wiring of a `<w:sectPr>`.
use crate::ooxml::docx::enums::{HeaderFooterKind, WdHeaderFooter, WdOrientation, parse_on_off};
use crate::ooxml::docx::schema;
use crate::ooxml::xml::{ElementKind, XmlElement};
use smallvec::SmallVec;
use std::ops::{Deref, DerefMut};

/// Twips per inch (1 twip = 1/20 of a point).
pub const TWIPS_PER_INCH: i64 = 1440;

/// Length in twentieths of a point, the unit of every section measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Twips(pub i64);

impl Twips {
    /// Create from inches.
    #[inline]
    pub const fn from_inches(inches: f64) -> Self {
        Self((inches * TWIPS_PER_INCH as f64) as i64)
    }

    /// Convert to inches.
    #[inline]
    pub fn to_inches(self) -> f64 {
        self.0 as f64 / TWIPS_PER_INCH as f64
    }

    /// Convert to points.
    #[inline]
    pub fn to_pt(self) -> f64 {
        self.0 as f64 / 20.0
    }

    fn parse(value: Option<&str>) -> Option<Self> {
        value?.trim().parse::<i64>().ok().map(Self)
    }
}

/// Page size for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSize {
    /// Page width
    pub width: Option<Twips>,
    /// Page height
    pub height: Option<Twips>,
    /// Page orientation
    pub orientation: WdOrientation,
}

impl PageSize {
    /// US Letter, 8.5" x 11".
    pub const fn letter() -> Self {
        Self {
            width: Some(Twips(12240)),
            height: Some(Twips(15840)),
            orientation: WdOrientation::Portrait,
        }
    }
}

/// Page margins for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Top margin
    pub top: Option<Twips>,
    /// Right margin
    pub right: Option<Twips>,
    /// Bottom margin
    pub bottom: Option<Twips>,
    /// Left margin
    pub left: Option<Twips>,
    /// Header distance from top edge
    pub header: Option<Twips>,
    /// Footer distance from bottom edge
    pub footer: Option<Twips>,
    /// Gutter margin (for binding)
    pub gutter: Option<Twips>,
}

impl Margins {
    /// One inch on every side, half an inch for header and footer.
    pub const fn one_inch() -> Self {
        Self {
            top: Some(Twips(1440)),
            right: Some(Twips(1440)),
            bottom: Some(Twips(1440)),
            left: Some(Twips(1440)),
            header: Some(Twips(720)),
            footer: Some(Twips(720)),
            gutter: Some(Twips(0)),
        }
    }
}

/// A `w:headerReference` or `w:footerReference` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFooterReference {
    pub kind: HeaderFooterKind,
    pub index: WdHeaderFooter,
    /// Relationship id of the header/footer part
    pub r_id: String,
}

const R_ID: &str = "r:id";
const W_TYPE: &str = "w:type";

fn reference_kind(kind: HeaderFooterKind) -> ElementKind {
    match kind {
        HeaderFooterKind::Header => ElementKind::HeaderReference,
        HeaderFooterKind::Footer => ElementKind::FooterReference,
    }
}

/// A section in a Word document.
///
/// Wraps a `<w:sectPr>` element, either the trailing one of the body or one
/// embedded in a paragraph's properties. Reads work on any element handle;
/// setters need a mutable one.
#[derive(Debug)]
pub struct Section<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Section<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// The `w:pgSz` element, if any.
    pub fn page_size_element(&self) -> Option<&XmlElement> {
        self.element.find(ElementKind::PageSize)
    }

    /// The `w:pgMar` element, if any.
    pub fn margins_element(&self) -> Option<&XmlElement> {
        self.element.find(ElementKind::PageMargins)
    }

    /// Page size, `None` when the section has no `w:pgSz`.
    pub fn page_size(&self) -> Option<PageSize> {
        let pg_sz = self.page_size_element()?;
        Some(PageSize {
            width: Twips::parse(pg_sz.attr("w:w")),
            height: Twips::parse(pg_sz.attr("w:h")),
            orientation: pg_sz
                .attr("w:orient")
                .and_then(WdOrientation::from_xml)
                .unwrap_or_default(),
        })
    }

    /// Margins, `None` when the section has no `w:pgMar`.
    pub fn margins(&self) -> Option<Margins> {
        let pg_mar = self.margins_element()?;
        Some(Margins {
            top: Twips::parse(pg_mar.attr("w:top")),
            right: Twips::parse(pg_mar.attr("w:right")),
            bottom: Twips::parse(pg_mar.attr("w:bottom")),
            left: Twips::parse(pg_mar.attr("w:left")),
            header: Twips::parse(pg_mar.attr("w:header")),
            footer: Twips::parse(pg_mar.attr("w:footer")),
            gutter: Twips::parse(pg_mar.attr("w:gutter")),
        })
    }

    /// Whether the section has a distinct first page header/footer.
    pub fn title_page(&self) -> bool {
        self.element
            .find(ElementKind::TitlePage)
            .is_some_and(|e| parse_on_off(e.attr("w:val")))
    }

    /// Header and footer references in document order.
    pub fn references(&self) -> SmallVec<[HeaderFooterReference; 6]> {
        self.element
            .elements()
            .filter_map(|e| {
                let kind = match e.kind() {
                    ElementKind::HeaderReference => HeaderFooterKind::Header,
                    ElementKind::FooterReference => HeaderFooterKind::Footer,
                    _ => return None,
                };
                let index = match e.attr(W_TYPE) {
                    None => WdHeaderFooter::Primary,
                    Some(value) => WdHeaderFooter::from_xml(value)?,
                };
                Some(HeaderFooterReference {
                    kind,
                    index,
                    r_id: e.attr(R_ID)?.to_string(),
                })
            })
            .collect()
    }

    /// Kind of the first header or footer reference that has no `r:id`.
    pub fn reference_without_id(&self) -> Option<HeaderFooterKind> {
        self.element.elements().find_map(|e| match e.kind() {
            ElementKind::HeaderReference if e.attr(R_ID).is_none() => Some(HeaderFooterKind::Header),
            ElementKind::FooterReference if e.attr(R_ID).is_none() => Some(HeaderFooterKind::Footer),
            _ => None,
        })
    }

    /// Relationship id of the first reference of `kind` with type `index`.
    pub fn reference_id(&self, kind: HeaderFooterKind, index: WdHeaderFooter) -> Option<String> {
        self.references()
            .into_iter()
            .find(|r| r.kind == kind && r.index == index)
            .map(|r| r.r_id)
    }
}

impl<E: DerefMut<Target = XmlElement>> Section<E> {
    #[inline]
    pub fn element_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    /// Set page size attributes, creating `w:pgSz` when missing.
    pub fn set_page_size(&mut self, size: PageSize) {
        let pg_sz = self.element.get_or_insert(ElementKind::PageSize, schema::SECT_PR);
        set_twips(pg_sz, "w:w", size.width);
        set_twips(pg_sz, "w:h", size.height);
        match size.orientation {
            WdOrientation::Landscape => pg_sz.set_attr("w:orient", WdOrientation::Landscape.to_xml()),
            WdOrientation::Portrait => {
                pg_sz.remove_attr("w:orient");
            },
        }
    }

    /// Set margin attributes, creating `w:pgMar` when missing.
    pub fn set_margins(&mut self, margins: Margins) {
        let pg_mar = self.element.get_or_insert(ElementKind::PageMargins, schema::SECT_PR);
        set_twips(pg_mar, "w:top", margins.top);
        set_twips(pg_mar, "w:right", margins.right);
        set_twips(pg_mar, "w:bottom", margins.bottom);
        set_twips(pg_mar, "w:left", margins.left);
        set_twips(pg_mar, "w:header", margins.header);
        set_twips(pg_mar, "w:footer", margins.footer);
        set_twips(pg_mar, "w:gutter", margins.gutter);
    }

    /// Replace `w:pgSz` with a copy of `pg_sz`, in place when present.
    pub fn replace_page_size_element(&mut self, pg_sz: &XmlElement) {
        self.element.replace_or_insert(pg_sz.clone(), schema::SECT_PR);
    }

    /// Replace `w:pgMar` with a copy of `pg_mar`, in place when present.
    pub fn replace_margins_element(&mut self, pg_mar: &XmlElement) {
        self.element.replace_or_insert(pg_mar.clone(), schema::SECT_PR);
    }

    /// Turn the distinct first page on or off. Turning it off deletes
    /// `w:titlePg`.
    pub fn set_title_page(&mut self, on: bool) {
        if on {
            let title_pg = self.element.get_or_insert(ElementKind::TitlePage, schema::SECT_PR);
            title_pg.remove_attr("w:val");
        } else {
            self.element.remove_all(ElementKind::TitlePage);
        }
    }

    /// Remove every reference of `kind`, returning how many were removed.
    pub fn remove_references(&mut self, kind: HeaderFooterKind) -> usize {
        self.element.remove_all(reference_kind(kind))
    }

    /// Insert a reference at its schema position: header references ahead
    /// of footer references, both ahead of the page setup.
    pub fn insert_reference(&mut self, kind: HeaderFooterKind, index: WdHeaderFooter, r_id: &str) {
        let reference = XmlElement::new(reference_kind(kind))
            .with_attr(W_TYPE, index.to_xml())
            .with_attr(R_ID, r_id);
        self.element.insert_ordered(reference, schema::SECT_PR);
    }

    /// Make `r_id` the only reference of `kind`, as the `default` variant.
    pub fn set_sole_default_reference(&mut self, kind: HeaderFooterKind, r_id: &str) {
        self.remove_references(kind);
        self.insert_reference(kind, WdHeaderFooter::Primary, r_id);
    }
}

fn set_twips(element: &mut XmlElement, name: &str, value: Option<Twips>) {
    match value {
        Some(Twips(v)) => element.set_attr(name, v.to_string()),
        None => {
            element.remove_attr(name);
        },
    }
}
