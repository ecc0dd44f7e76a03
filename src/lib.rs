//! Unlatch - remove editing protection from Word documents
//!
//! This library opens `.docx` packages, strips their editing restrictions,
//! rewires every section to a single default header and footer, and can
//! move a document's content into another document's shell.
//!
//! # Features
//!
//! - **Protection stripping**: drop `documentProtection` and
//!   `evenAndOddHeaders` from the settings
//! - **Header/footer normalization**: one default header and footer, one
//!   page size and one set of margins for all sections
//! - **Merge**: pour a document's paragraphs and tables into a model
//!   document, keeping the model's headers, footers and layout
//! - **Rebuild**: copy a document's content into a blank document
//! - **Batch processing**: run any of the above over many files
//!
//! # Example - Unlocking a file
//!
//! ```no_run
//! # fn main() -> Result<(), unlatch::Error> {
//! let report = unlatch::strip_and_normalize("locked.docx", "unlocked_locked.docx")?;
//! if report.protection.removed_anything() {
//!     println!("protection removed");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Working in memory
//!
//! ```no_run
//! use unlatch::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Package::open("content.docx")?;
//! let model = Package::open("letterhead.docx")?;
//! let (mut merged, report) = unlatch::transform::merge_into_model(&source, model)?;
//! println!("copied {} paragraphs", report.paragraphs);
//! merged.save("merged.docx")?;
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod batch;
pub mod common;
pub mod ooxml;
pub mod templates;
pub mod transform;

pub use api::{merge_into_model, rebuild_simple, strip_and_normalize};
pub use batch::{BatchReport, FileFailure, FileSuccess, Mode, process_batch};
pub use common::{Error, FailureKind, Result};
pub use ooxml::docx::Package;
pub use templates::{TemplateError, TemplateInfo, TemplateStore};
pub use transform::{MergeReport, RebuildReport, StripNormalizeReport};
