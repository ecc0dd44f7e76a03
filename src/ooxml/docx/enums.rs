//! Enumerations for WordprocessingML attribute values.
use std::fmt;

/// Page orientation of a section.
///
/// Corresponds to the VBA `WdOrientation` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WdOrientation {
    /// Portrait orientation.
    #[default]
    Portrait = 0,
    /// Landscape orientation.
    Landscape = 1,
}

impl WdOrientation {
    /// Convert the orientation to its XML attribute value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unlatch::ooxml::docx::enums::WdOrientation;
    ///
    /// assert_eq!(WdOrientation::Landscape.to_xml(), "landscape");
    /// ```
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Parse orientation from XML attribute value.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

/// Specifies one of the three possible header/footer definitions for a section.
///
/// Corresponds to the VBA `WdHeaderFooterIndex` enumeration.
///
/// # Examples
///
/// ```rust
/// use unlatch::ooxml::docx::enums::WdHeaderFooter;
///
/// let index = WdHeaderFooter::Primary;
/// assert_eq!(index.to_xml(), "default");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WdHeaderFooter {
    /// Header/footer for odd pages or all pages if no even header/footer.
    #[default]
    Primary = 1,
    /// Header/footer for first page of section.
    FirstPage = 2,
    /// Header/footer for even pages of recto/verso section.
    EvenPage = 3,
}

impl WdHeaderFooter {
    /// Convert the header/footer index to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Primary => "default",
            Self::FirstPage => "first",
            Self::EvenPage => "even",
        }
    }

    /// Parse header/footer index from XML attribute value.
    ///
    /// A missing `w:type` means `default`, so callers map `None` input to
    /// [`WdHeaderFooter::Primary`] themselves.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Primary),
            "first" => Some(Self::FirstPage),
            "even" => Some(Self::EvenPage),
            _ => None,
        }
    }
}

impl fmt::Display for WdHeaderFooter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::FirstPage => write!(f, "First Page"),
            Self::EvenPage => write!(f, "Even Page"),
        }
    }
}

/// Which of the two header/footer reference kinds a section entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

impl fmt::Display for HeaderFooterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Specifies one of the four style types: paragraph, character, list, or table.
///
/// Corresponds to the VBA `WdStyleType` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WdStyleType {
    /// Paragraph style, also the type of a style without `w:type`.
    #[default]
    Paragraph = 1,
    /// Character style.
    Character = 2,
    /// Table style.
    Table = 3,
    /// List (numbering) style.
    List = 4,
}

impl WdStyleType {
    /// Convert the style type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::List => "numbering",
        }
    }

    /// Parse style type from XML attribute value.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::List),
            _ => None,
        }
    }
}

/// Paragraph alignment (`w:jc` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WdParagraphAlignment {
    Left,
    Center,
    Right,
    /// `both`
    Justify,
    Distribute,
    /// Bidi-aware `start`
    Start,
    /// Bidi-aware `end`
    End,
}

impl WdParagraphAlignment {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
            Self::Distribute => "distribute",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "both" => Some(Self::Justify),
            "distribute" => Some(Self::Distribute),
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Parse an `ST_OnOff` value. A missing `w:val` means on.
#[inline]
pub fn parse_on_off(val: Option<&str>) -> bool {
    !matches!(val, Some("0" | "false" | "off"))
}
