//! Closed set of element kinds the docx layer understands.
//!
//! The kind of every element is resolved once at parse time from its
//! namespace URI and local name. Anything outside the WordprocessingML main
//! namespace, or a WML element nobody here reads, is [`ElementKind::Other`]
//! and passes through untouched.

use crate::ooxml::opc::constants::namespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    // Parts
    Document,
    Header,
    Footer,
    Settings,
    Styles,

    // Block level
    Body,
    Paragraph,
    ParagraphProperties,
    ParagraphStyle,
    Justification,

    // Runs
    Run,
    RunProperties,
    Bold,
    Italic,
    Underline,
    RunFonts,
    FontSize,
    Color,
    Text,
    Tab,
    Break,
    CarriageReturn,

    // Tables
    Table,
    TableProperties,
    TableStyle,
    TableGrid,
    GridColumn,
    TableRow,
    TableCell,
    TableCellProperties,

    // Sections
    SectionProperties,
    HeaderReference,
    FooterReference,
    PageSize,
    PageMargins,
    TitlePage,

    // Settings
    DocumentProtection,
    EvenAndOddHeaders,

    // Styles
    Style,
    StyleName,

    Other,
}

impl ElementKind {
    /// Resolve the kind of an element from its namespace URI and local name.
    pub fn resolve(namespace_uri: Option<&str>, local_name: &str) -> Self {
        if namespace_uri != Some(namespace::WML_MAIN) {
            return Self::Other;
        }
        Self::from_wml_local_name(local_name)
    }

    fn from_wml_local_name(local_name: &str) -> Self {
        match local_name {
            "document" => Self::Document,
            "hdr" => Self::Header,
            "ftr" => Self::Footer,
            "settings" => Self::Settings,
            "styles" => Self::Styles,
            "body" => Self::Body,
            "p" => Self::Paragraph,
            "pPr" => Self::ParagraphProperties,
            "pStyle" => Self::ParagraphStyle,
            "jc" => Self::Justification,
            "r" => Self::Run,
            "rPr" => Self::RunProperties,
            "b" => Self::Bold,
            "i" => Self::Italic,
            "u" => Self::Underline,
            "rFonts" => Self::RunFonts,
            "sz" => Self::FontSize,
            "color" => Self::Color,
            "t" => Self::Text,
            "tab" => Self::Tab,
            "br" => Self::Break,
            "cr" => Self::CarriageReturn,
            "tbl" => Self::Table,
            "tblPr" => Self::TableProperties,
            "tblStyle" => Self::TableStyle,
            "tblGrid" => Self::TableGrid,
            "gridCol" => Self::GridColumn,
            "tr" => Self::TableRow,
            "tc" => Self::TableCell,
            "tcPr" => Self::TableCellProperties,
            "sectPr" => Self::SectionProperties,
            "headerReference" => Self::HeaderReference,
            "footerReference" => Self::FooterReference,
            "pgSz" => Self::PageSize,
            "pgMar" => Self::PageMargins,
            "titlePg" => Self::TitlePage,
            "documentProtection" => Self::DocumentProtection,
            "evenAndOddHeaders" => Self::EvenAndOddHeaders,
            "style" => Self::Style,
            "name" => Self::StyleName,
            _ => Self::Other,
        }
    }

    /// WML local name for a known kind; `None` for [`ElementKind::Other`].
    pub const fn local_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Document => "document",
            Self::Header => "hdr",
            Self::Footer => "ftr",
            Self::Settings => "settings",
            Self::Styles => "styles",
            Self::Body => "body",
            Self::Paragraph => "p",
            Self::ParagraphProperties => "pPr",
            Self::ParagraphStyle => "pStyle",
            Self::Justification => "jc",
            Self::Run => "r",
            Self::RunProperties => "rPr",
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::RunFonts => "rFonts",
            Self::FontSize => "sz",
            Self::Color => "color",
            Self::Text => "t",
            Self::Tab => "tab",
            Self::Break => "br",
            Self::CarriageReturn => "cr",
            Self::Table => "tbl",
            Self::TableProperties => "tblPr",
            Self::TableStyle => "tblStyle",
            Self::TableGrid => "tblGrid",
            Self::GridColumn => "gridCol",
            Self::TableRow => "tr",
            Self::TableCell => "tc",
            Self::TableCellProperties => "tcPr",
            Self::SectionProperties => "sectPr",
            Self::HeaderReference => "headerReference",
            Self::FooterReference => "footerReference",
            Self::PageSize => "pgSz",
            Self::PageMargins => "pgMar",
            Self::TitlePage => "titlePg",
            Self::DocumentProtection => "documentProtection",
            Self::EvenAndOddHeaders => "evenAndOddHeaders",
            Self::Style => "style",
            Self::StyleName => "name",
            Self::Other => return None,
        })
    }

    /// Kinds that can appear as block-level content of a body, cell, header
    /// or footer.
    #[inline]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Paragraph | Self::Table)
    }
}
