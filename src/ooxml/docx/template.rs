//! Document template module.
//!
//! Minimal parts for the blank shell used by the rebuild path: US Letter
//! portrait, one-inch margins, a `Normal` paragraph style, a `Table Grid`
//! table style and a single empty footer.

/// Main document with one empty section.
pub fn default_document_xml() -> &'static str {
    include_str!("../../../resources/document.xml")
}

/// Styles part with `Normal`, `Table Grid` and `Footer` styles.
pub fn default_styles_xml() -> &'static str {
    include_str!("../../../resources/styles.xml")
}

pub fn default_settings_xml() -> &'static str {
    include_str!("../../../resources/settings.xml")
}

/// Footer part holding one empty paragraph.
pub fn default_footer_xml() -> &'static str {
    include_str!("../../../resources/footer.xml")
}
