/// Document settings and protection support.
///
/// Wraps the `<w:settings>` root of the settings part.
use crate::ooxml::docx::enums::parse_on_off;
use crate::ooxml::xml::{ElementKind, XmlElement};
use std::ops::{Deref, DerefMut};

/// Type of protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionType {
    /// No editing allowed
    ReadOnly,
    /// Only comments allowed
    Comments,
    /// Only tracked changes allowed
    TrackedChanges,
    /// Only form fields allowed
    Forms,
    /// Explicitly unrestricted
    None,
}

impl ProtectionType {
    /// Parse protection type from XML value.
    fn from_xml(s: &str) -> Option<Self> {
        match s {
            "readOnly" => Some(Self::ReadOnly),
            "comments" => Some(Self::Comments),
            "trackedChanges" => Some(Self::TrackedChanges),
            "forms" => Some(Self::Forms),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Get XML value for this protection type.
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::ReadOnly => "readOnly",
            Self::Comments => "comments",
            Self::TrackedChanges => "trackedChanges",
            Self::Forms => "forms",
            Self::None => "none",
        }
    }
}

/// Document settings.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// if let Some(settings) = pkg.settings() {
///     if settings.is_protected() {
///         println!("Protection type: {:?}", settings.protection_type());
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Settings<E> {
    element: E,
}

impl<E: Deref<Target = XmlElement>> Settings<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// Whether a `w:documentProtection` declaration is present, enforced
    /// or not.
    #[inline]
    pub fn has_document_protection(&self) -> bool {
        self.element.contains(ElementKind::DocumentProtection)
    }

    /// Whether editing restrictions are actually enforced. A declaration
    /// without `w:enforcement` is not.
    pub fn is_protected(&self) -> bool {
        self.element
            .find(ElementKind::DocumentProtection)
            .and_then(|e| e.attr("w:enforcement"))
            .is_some_and(|v| parse_on_off(Some(v)))
    }

    /// Get the type of protection applied.
    pub fn protection_type(&self) -> Option<ProtectionType> {
        self.element
            .find(ElementKind::DocumentProtection)?
            .attr("w:edit")
            .and_then(ProtectionType::from_xml)
    }

    /// Whether odd and even pages get different headers and footers.
    pub fn even_and_odd_headers(&self) -> bool {
        self.element
            .find(ElementKind::EvenAndOddHeaders)
            .is_some_and(|e| parse_on_off(e.attr("w:val")))
    }
}

impl<E: DerefMut<Target = XmlElement>> Settings<E> {
    /// Remove `w:documentProtection`. Returns whether anything was removed.
    pub fn remove_document_protection(&mut self) -> bool {
        self.element.remove_all(ElementKind::DocumentProtection) > 0
    }

    /// Remove `w:evenAndOddHeaders`. Returns whether anything was removed.
    pub fn remove_even_and_odd_headers(&mut self) -> bool {
        self.element.remove_all(ElementKind::EvenAndOddHeaders) > 0
    }
}
