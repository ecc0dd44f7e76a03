//! Character formatting value types shared by reading and writing runs.
use std::fmt;

/// Underline styles for text (`w:u/@w:val`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnderlineStyle {
    /// Explicitly not underlined
    None,
    Single,
    Words,
    Double,
    Thick,
    Dotted,
    Dashed,
    DotDash,
    DotDotDash,
    Wave,
    /// Any other `ST_Underline` value, kept verbatim
    Other(String),
}

impl UnderlineStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Words => "words",
            Self::Double => "double",
            Self::Thick => "thick",
            Self::Dotted => "dotted",
            Self::Dashed => "dash",
            Self::DotDash => "dotDash",
            Self::DotDotDash => "dotDotDash",
            Self::Wave => "wave",
            Self::Other(s) => s,
        }
    }

    pub fn from_xml(s: &str) -> Self {
        match s {
            "none" => Self::None,
            "single" => Self::Single,
            "words" => Self::Words,
            "double" => Self::Double,
            "thick" => Self::Thick,
            "dotted" => Self::Dotted,
            "dash" => Self::Dashed,
            "dotDash" => Self::DotDash,
            "dotDotDash" => Self::DotDotDash,
            "wave" => Self::Wave,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether text with this style shows an underline.
    #[inline]
    pub fn is_underlined(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Font size in half-points (`w:sz/@w:val`); 24 is 12pt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfPoints(pub u32);

impl HalfPoints {
    #[inline]
    pub const fn from_pt(pt: u32) -> Self {
        Self(pt * 2)
    }

    #[inline]
    pub fn to_pt(self) -> f32 {
        self.0 as f32 / 2.0
    }
}

/// 24-bit RGB color (`w:color/@w:val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse a six digit hex value such as `1F4E79`. `auto` and anything
    /// malformed yield `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
