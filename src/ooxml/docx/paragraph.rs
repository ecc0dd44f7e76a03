/// Paragraph and Run views over `<w:p>` and `<w:r>` elements.
use crate::ooxml::docx::enums::{WdParagraphAlignment, parse_on_off};
use crate::ooxml::docx::format::{HalfPoints, RgbColor, UnderlineStyle};
use crate::ooxml::docx::schema;
use crate::ooxml::xml::{ElementKind, XmlElement, XmlNode};
use smallvec::SmallVec;
use std::ops::{Deref, DerefMut};

/// First child of `parent` of `kind`, created as the first child when missing.
///
/// Property elements (`w:pPr`, `w:rPr`, `w:tcPr`) always lead their parent.
fn leading_child(parent: &mut XmlElement, kind: ElementKind) -> &mut XmlElement {
    let idx = match parent.position(kind) {
        Some(idx) => idx,
        None => {
            parent.insert(0, XmlElement::new(kind));
            0
        },
    };
    match &mut parent.children_mut()[idx] {
        XmlNode::Element(e) => e,
        _ => unreachable!("index points at an element"),
    }
}

/// A paragraph in a Word document.
///
/// Wraps a `<w:p>` element. Reads work on any element handle; setters need a
/// mutable one.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// for para in pkg.body()?.paragraphs() {
///     println!("{:?}: {}", para.alignment(), para.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Paragraph<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Paragraph<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    fn properties(&self) -> Option<&XmlElement> {
        self.element.find(ElementKind::ParagraphProperties)
    }

    /// Explicit alignment, `None` when inherited.
    pub fn alignment(&self) -> Option<WdParagraphAlignment> {
        self.properties()?
            .find(ElementKind::Justification)?
            .attr("w:val")
            .and_then(WdParagraphAlignment::from_xml)
    }

    /// Style id from `w:pStyle`, `None` for the default paragraph style.
    pub fn style_id(&self) -> Option<&str> {
        self.properties()?
            .find(ElementKind::ParagraphStyle)?
            .attr("w:val")
    }

    /// Section properties carried by this paragraph, which marks it as the
    /// last paragraph of a section.
    pub fn section_properties(&self) -> Option<&XmlElement> {
        self.properties()?.find(ElementKind::SectionProperties)
    }

    /// Runs of the paragraph, including those nested in hyperlinks.
    pub fn runs(&self) -> SmallVec<[Run<&XmlElement>; 8]> {
        let mut runs = SmallVec::new();
        for child in self.element.elements() {
            match child.kind() {
                ElementKind::Run => runs.push(Run::new(child)),
                ElementKind::Other if child.local_name() == "hyperlink" => {
                    runs.extend(child.find_all(ElementKind::Run).map(Run::new));
                },
                _ => {},
            }
        }
        runs
    }

    /// Plain text with tabs as `\t` and breaks as `\n`.
    pub fn text(&self) -> String {
        self.runs().iter().map(Run::text).collect()
    }
}

impl<E: DerefMut<Target = XmlElement>> Paragraph<E> {
    #[inline]
    pub fn element_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    /// Set or clear the alignment. Clearing deletes `w:jc`.
    pub fn set_alignment(&mut self, alignment: Option<WdParagraphAlignment>) {
        match alignment {
            Some(jc) => {
                let p_pr = leading_child(&mut self.element, ElementKind::ParagraphProperties);
                p_pr.get_or_insert(ElementKind::Justification, schema::P_PR)
                    .set_attr("w:val", jc.to_xml());
            },
            None => {
                if let Some(p_pr) = self.element.find_mut(ElementKind::ParagraphProperties) {
                    p_pr.remove_all(ElementKind::Justification);
                }
            },
        }
    }

    /// Set or clear the style id. Clearing deletes `w:pStyle`.
    pub fn set_style_id(&mut self, style_id: Option<&str>) {
        match style_id {
            Some(id) => {
                let p_pr = leading_child(&mut self.element, ElementKind::ParagraphProperties);
                p_pr.get_or_insert(ElementKind::ParagraphStyle, schema::P_PR)
                    .set_attr("w:val", id);
            },
            None => {
                if let Some(p_pr) = self.element.find_mut(ElementKind::ParagraphProperties) {
                    p_pr.remove_all(ElementKind::ParagraphStyle);
                }
            },
        }
    }

    /// Append an empty run.
    pub fn add_run(&mut self) -> Run<&mut XmlElement> {
        Run::new(self.element.push_element(XmlElement::new(ElementKind::Run)))
    }
}

/// Break kinds of `w:br`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakType {
    /// Text wrapping (line) break, the default
    Line,
    Page,
    Column,
}

impl BreakType {
    fn from_xml(s: Option<&str>) -> Self {
        match s {
            Some("page") => Self::Page,
            Some("column") => Self::Column,
            _ => Self::Line,
        }
    }
}

/// Run content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Plain text
    Text(String),
    /// Tab character
    Tab,
    /// Line, page or column break
    Break(BreakType),
    /// Carriage return
    CarriageReturn,
}

/// A text run with character formatting.
///
/// Wraps a `<w:r>` element.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// for para in pkg.body()?.paragraphs() {
///     for run in para.runs() {
///         println!("{:?} bold={:?} size={:?}", run.text(), run.bold(), run.font_size());
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Run<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Run<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    fn property(&self, kind: ElementKind) -> Option<&XmlElement> {
        self.element.find(ElementKind::RunProperties)?.find(kind)
    }

    fn toggle(&self, kind: ElementKind) -> Option<bool> {
        self.property(kind).map(|e| parse_on_off(e.attr("w:val")))
    }

    /// Content items in order. Elements other than text, tabs and breaks are
    /// skipped.
    pub fn content(&self) -> SmallVec<[RunContent; 4]> {
        self.element
            .elements()
            .filter_map(|e| match e.kind() {
                ElementKind::Text => Some(RunContent::Text(e.text_content())),
                ElementKind::Tab => Some(RunContent::Tab),
                ElementKind::Break => Some(RunContent::Break(BreakType::from_xml(e.attr("w:type")))),
                ElementKind::CarriageReturn => Some(RunContent::CarriageReturn),
                _ => None,
            })
            .collect()
    }

    /// Text of the run.
    ///
    /// - `<w:tab/>` → tab character
    /// - `<w:br/>` and `<w:cr/>` → newline character
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in self.content() {
            match item {
                RunContent::Text(t) => text.push_str(&t),
                RunContent::Tab => text.push('\t'),
                RunContent::Break(_) | RunContent::CarriageReturn => text.push('\n'),
            }
        }
        text
    }

    /// `Some(true)` if bold is explicitly enabled, `Some(false)` if explicitly
    /// disabled, `None` if inherited.
    pub fn bold(&self) -> Option<bool> {
        self.toggle(ElementKind::Bold)
    }

    /// Same tri-state as [`bold`](Self::bold).
    pub fn italic(&self) -> Option<bool> {
        self.toggle(ElementKind::Italic)
    }

    /// Underline style, `None` if inherited. A `w:u` without a value is a
    /// single underline.
    pub fn underline(&self) -> Option<UnderlineStyle> {
        self.property(ElementKind::Underline).map(|u| {
            u.attr("w:val")
                .map(UnderlineStyle::from_xml)
                .unwrap_or(UnderlineStyle::Single)
        })
    }

    /// Font name from `w:rFonts`, preferring the ASCII slot.
    pub fn font_name(&self) -> Option<&str> {
        let fonts = self.property(ElementKind::RunFonts)?;
        fonts.attr("w:ascii").or_else(|| fonts.attr("w:hAnsi"))
    }

    pub fn font_size(&self) -> Option<HalfPoints> {
        self.property(ElementKind::FontSize)?
            .attr("w:val")?
            .trim()
            .parse()
            .ok()
            .map(HalfPoints)
    }

    /// Explicit RGB color; `auto` and theme-only colors read as `None`.
    pub fn color(&self) -> Option<RgbColor> {
        RgbColor::from_hex(self.property(ElementKind::Color)?.attr("w:val")?)
    }
}

impl<E: DerefMut<Target = XmlElement>> Run<E> {
    #[inline]
    pub fn element_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    fn properties_mut(&mut self) -> &mut XmlElement {
        leading_child(&mut self.element, ElementKind::RunProperties)
    }

    fn clear_property(&mut self, kind: ElementKind) {
        if let Some(r_pr) = self.element.find_mut(ElementKind::RunProperties) {
            r_pr.remove_all(kind);
        }
    }

    fn set_toggle(&mut self, kind: ElementKind, value: Option<bool>) {
        match value {
            Some(on) => {
                let e = self.properties_mut().get_or_insert(kind, schema::R_PR);
                if on {
                    e.remove_attr("w:val");
                } else {
                    e.set_attr("w:val", "0");
                }
            },
            None => self.clear_property(kind),
        }
    }

    pub fn set_bold(&mut self, value: Option<bool>) {
        self.set_toggle(ElementKind::Bold, value);
    }

    pub fn set_italic(&mut self, value: Option<bool>) {
        self.set_toggle(ElementKind::Italic, value);
    }

    pub fn set_underline(&mut self, value: Option<&UnderlineStyle>) {
        match value {
            Some(style) => self
                .properties_mut()
                .get_or_insert(ElementKind::Underline, schema::R_PR)
                .set_attr("w:val", style.as_str()),
            None => self.clear_property(ElementKind::Underline),
        }
    }

    /// Set the font for the ASCII and high-ANSI slots.
    pub fn set_font_name(&mut self, value: Option<&str>) {
        match value {
            Some(name) => {
                let fonts = self
                    .properties_mut()
                    .get_or_insert(ElementKind::RunFonts, schema::R_PR);
                fonts.set_attr("w:ascii", name);
                fonts.set_attr("w:hAnsi", name);
            },
            None => self.clear_property(ElementKind::RunFonts),
        }
    }

    pub fn set_font_size(&mut self, value: Option<HalfPoints>) {
        match value {
            Some(HalfPoints(size)) => self
                .properties_mut()
                .get_or_insert(ElementKind::FontSize, schema::R_PR)
                .set_attr("w:val", size.to_string()),
            None => self.clear_property(ElementKind::FontSize),
        }
    }

    pub fn set_color(&mut self, value: Option<RgbColor>) {
        match value {
            Some(color) => self
                .properties_mut()
                .get_or_insert(ElementKind::Color, schema::R_PR)
                .set_attr("w:val", color.to_string()),
            None => self.clear_property(ElementKind::Color),
        }
    }

    /// Append one content item.
    pub fn push_content(&mut self, item: &RunContent) {
        let element = match item {
            RunContent::Text(text) => {
                let mut t = XmlElement::new(ElementKind::Text);
                if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
                    t.set_attr("xml:space", "preserve");
                }
                t.push(XmlNode::Text(text.clone()));
                t
            },
            RunContent::Tab => XmlElement::new(ElementKind::Tab),
            RunContent::Break(BreakType::Line) => XmlElement::new(ElementKind::Break),
            RunContent::Break(BreakType::Page) => {
                XmlElement::new(ElementKind::Break).with_attr("w:type", "page")
            },
            RunContent::Break(BreakType::Column) => {
                XmlElement::new(ElementKind::Break).with_attr("w:type", "column")
            },
            RunContent::CarriageReturn => XmlElement::new(ElementKind::CarriageReturn),
        };
        self.element.push(element);
    }

    /// Append text, turning `\t` into tabs and `\n` into line breaks.
    pub fn add_text(&mut self, text: &str) {
        let mut pending = String::new();
        for ch in text.chars() {
            let item = match ch {
                '\t' => RunContent::Tab,
                '\n' => RunContent::Break(BreakType::Line),
                '\r' => RunContent::CarriageReturn,
                _ => {
                    pending.push(ch);
                    continue;
                },
            };
            if !pending.is_empty() {
                self.push_content(&RunContent::Text(std::mem::take(&mut pending)));
            }
            self.push_content(&item);
        }
        if !pending.is_empty() {
            self.push_content(&RunContent::Text(pending));
        }
    }
}
