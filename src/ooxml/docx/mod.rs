/// Word (.docx) document support.
///
/// Typed views over the parsed WordprocessingML tree of a .docx package.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Package`: The .docx package with its main document, settings, styles
///   and header/footer parts parsed
/// - `Body`: The block content and sections of the main document
/// - `Paragraph` and `Run`: Paragraph and character content with formatting
/// - `Table`, `Row` and `Cell`: Tables, whose cells hold blocks again
/// - `Section`: Page geometry and header/footer references
/// - `HeaderFooter`: A header or footer part
///
/// Every view is generic over how it holds its element: `View<&XmlElement>`
/// reads, `View<&mut XmlElement>` also edits.
///
/// # Example
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let body = pkg.body()?;
///
/// for para in body.paragraphs() {
///     println!("Paragraph: {}", para.text());
///     for run in para.runs() {
///         println!("  Run: {} (bold: {:?})", run.text(), run.bold());
///     }
/// }
///
/// for table in body.tables() {
///     for row in table.rows() {
///         for cell in row.cells() {
///             println!("Cell: {}", cell.text());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod block;
pub mod document;
pub mod enums;
pub mod format;
pub mod header_footer;
pub mod package;
pub mod paragraph;
pub mod schema;
pub mod section;
pub mod settings;
pub mod styles;
pub mod table;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use block::{Block, BlockContainer};
pub use document::Body;
pub use enums::{HeaderFooterKind, WdHeaderFooter, WdParagraphAlignment, WdStyleType};
pub use format::{HalfPoints, RgbColor, UnderlineStyle};
pub use header_footer::HeaderFooter;
pub use package::Package;
pub use paragraph::{BreakType, Paragraph, Run, RunContent};
pub use section::{Margins, PageSize, Section, Twips};
pub use settings::{ProtectionType, Settings};
pub use styles::{Style, StyleCatalog};
pub use table::{Cell, Row, Table};
