//! Office Open XML support for Word documents.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **XML tree** (`xml`): owned element tree for part content
//! 3. **WordprocessingML** (`docx`): typed views over the main document,
//!    settings, styles, headers and footers
//!
//! # Example
//!
//! ```rust,no_run
//! use unlatch::ooxml::docx::Package;
//!
//! let pkg = Package::open("document.docx")?;
//! println!("{}", pkg.body()?.text());
//! # Ok::<(), unlatch::ooxml::OoxmlError>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;
pub mod xml;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
