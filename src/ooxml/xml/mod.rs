//! Lossless XML element tree used for every part the docx layer edits.
//!
//! Parts are parsed into an [`XmlDocument`], edited through the typed views
//! in [`crate::ooxml::docx`], and serialized back. Nodes the views do not
//! know about are carried along unchanged.

pub mod escape;
pub mod kind;
pub mod node;
pub mod parser;
pub mod writer;

pub use escape::escape_xml;
pub use kind::ElementKind;
pub use node::{WML_PREFIX, XmlDocument, XmlElement, XmlNode};
pub use parser::parse;
