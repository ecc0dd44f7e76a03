//! Parts: the units of content inside an OPC package.
//!
//! Every part has a partname, a content type, a byte payload and the
//! relationships it owns. XML parts are kept as bytes here; the docx layer
//! parses the few it needs into element trees and writes them back with
//! [`Part::set_blob`].
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

#[derive(Debug, Clone)]
pub struct Part {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    /// Create a part with no relationships.
    pub fn new(partname: PackURI, content_type: impl Into<String>, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            rels,
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Replace the payload, e.g. after re-serializing an edited XML tree.
    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    pub(crate) fn set_rels(&mut self, rels: Relationships) {
        self.rels = rels;
    }

    /// Whether the content type denotes XML.
    #[inline]
    pub fn is_xml(&self) -> bool {
        self.content_type.ends_with("+xml") || self.content_type.ends_with("/xml")
    }

    /// Relate this part to `target`, reusing an existing relationship of the
    /// same type. Returns the relationship id.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname.base_uri());
        self.rels.get_or_add(reltype, &target_ref).r_id().to_string()
    }

    /// Partname of the part an internal relationship of this part points at.
    pub fn related_partname(&self, r_id: &str) -> Result<PackURI> {
        self.rels
            .get(r_id)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(format!("{} in {}", r_id, self.partname))
            })?
            .target_partname()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};

    #[test]
    fn test_is_xml() {
        let uri = PackURI::new("/word/document.xml").unwrap();
        assert!(Part::new(uri.clone(), ct::WML_DOCUMENT_MAIN, vec![]).is_xml());
        assert!(Part::new(uri.clone(), ct::XML, vec![]).is_xml());
        assert!(!Part::new(uri, ct::PNG, vec![]).is_xml());
    }

    #[test]
    fn test_relate_to_and_resolve() {
        let mut part = Part::new(
            PackURI::new("/word/document.xml").unwrap(),
            ct::WML_DOCUMENT_MAIN,
            Vec::new(),
        );
        let footer = PackURI::new("/word/footer1.xml").unwrap();
        let r_id = part.relate_to(&footer, rt::FOOTER);
        assert_eq!(r_id, "rId1");
        assert_eq!(part.relate_to(&footer, rt::FOOTER), "rId1");
        assert_eq!(part.related_partname(&r_id).unwrap(), footer);
        assert!(part.related_partname("rId42").is_err());
    }
}
