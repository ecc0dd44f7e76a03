/// Open Packaging Conventions (OPC) implementation.
///
/// The container layer of every `.docx`: a ZIP archive of parts, each with a
/// content type declared in `[Content_Types].xml`, linked to one another by
/// relationships stored in `_rels/*.rels` items.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use rel::{Relationship, Relationships};
