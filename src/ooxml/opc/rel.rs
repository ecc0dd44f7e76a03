//! Relationship-related objects for OPC packages.
//!
//! A `.rels` item lists the relationships of one source (a part or the
//! package itself). Word-processing parts refer to these by id: the main
//! document's `w:headerReference r:id="rId8"` names a relationship whose
//! target is the header part.
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::xml::escape_xml;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    target_ref: String,
    /// Directory of the source, used to resolve relative targets
    base_uri: String,
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    /// Relationship ID, e.g. `rId1`.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// The Target attribute as written: relative part reference or external URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no target part",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Relationships of a single source, kept in their original order so that a
/// saved package lists them the way they were read.
#[derive(Debug, Clone)]
pub struct Relationships {
    base_uri: String,
    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Create a new empty collection whose relative targets resolve against `base_uri`.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: SmallVec::new(),
        }
    }

    /// Parse the XML of a `.rels` item.
    ///
    /// `item` only names the item in error messages.
    pub fn from_xml(xml: &[u8], base_uri: &str, item: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri.to_string());
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target_ref = None;
                    let mut external = false;

                    for attr in e.attributes() {
                        let attr = attr.map_err(|err| OpcError::malformed(item, err))?;
                        let value = attr
                            .unescape_value()
                            .map_err(|err| OpcError::malformed(item, err))?
                            .into_owned();
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(value),
                            b"Type" => reltype = Some(value),
                            b"Target" => target_ref = Some(value),
                            b"TargetMode" => external = value == target_mode::EXTERNAL,
                            _ => {},
                        }
                    }

                    match (r_id, reltype, target_ref) {
                        (Some(id), Some(rt), Some(tr)) => {
                            rels.add_relationship(rt, tr, id, external);
                        },
                        _ => {
                            return Err(OpcError::malformed(
                                item,
                                "Relationship element lacks Id, Type or Target",
                            ));
                        },
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::malformed(item, e)),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Add a relationship, replacing any existing one with the same id.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        self.rels.retain(|rel| rel.r_id != r_id);
        self.rels.push(Relationship::new(
            r_id,
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        ));
        &self.rels[self.rels.len() - 1]
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the internal relationship of `reltype` to `target_ref`, creating it
    /// with the next free id if none exists.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> &Relationship {
        let existing = self.rels.iter().position(|rel| {
            rel.reltype == reltype && rel.target_ref == target_ref && !rel.is_external
        });
        match existing {
            Some(idx) => &self.rels[idx],
            None => {
                let r_id = self.next_r_id();
                self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id, false)
            },
        }
    }

    /// Next free id of the form `rIdN`, filling gaps first.
    pub fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self
            .rels
            .iter()
            .filter_map(|rel| rel.r_id.strip_prefix("rId")?.parse::<u32>().ok())
            .collect();
        used.sort_unstable();

        let mut next = 1u32;
        for num in used {
            match num.cmp(&next) {
                std::cmp::Ordering::Equal => next += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }
        format!("rId{}", next)
    }

    /// The first relationship of a given type.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        self.rels
            .iter()
            .find(|rel| rel.reltype == reltype)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(format!("no relationship of type '{}'", reltype))
            })
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to the XML of a `.rels` item.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str("\r\n");
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for rel in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
                if rel.is_external {
                    r#" TargetMode="External""#
                } else {
                    ""
                }
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const DOCUMENT_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_from_xml_keeps_order() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word", "document.xml.rels").unwrap();
        let ids: Vec<&str> = rels.iter().map(|r| r.r_id()).collect();
        assert_eq!(ids, vec!["rId3", "rId1", "rId9"]);

        let styles = rels.part_with_reltype(rt::STYLES).unwrap();
        assert_eq!(styles.target_partname().unwrap().as_str(), "/word/styles.xml");

        let link = rels.get("rId9").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
        assert!(link.target_partname().is_err());
    }

    #[test]
    fn test_next_r_id_fills_gaps() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word", "document.xml.rels").unwrap();
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add() {
        let mut rels = Relationships::new("/word".to_string());
        assert_eq!(rels.get_or_add(rt::FOOTER, "footer1.xml").r_id(), "rId1");
        assert_eq!(rels.get_or_add(rt::FOOTER, "footer1.xml").r_id(), "rId1");
        assert_eq!(rels.get_or_add(rt::FOOTER, "footer2.xml").r_id(), "rId2");
    }

    #[test]
    fn test_to_xml_escapes_and_round_trips() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word", "document.xml.rels").unwrap();
        let xml = rels.to_xml();
        assert!(xml.contains("a=1&amp;b=2"));
        assert!(xml.contains(r#"TargetMode="External""#));

        let reparsed = Relationships::from_xml(xml.as_bytes(), "/word", "again").unwrap();
        assert_eq!(reparsed.len(), 3);
        assert_eq!(reparsed.get("rId1"), rels.get("rId1"));
    }

    #[test]
    fn test_missing_attribute_is_malformed() {
        let xml = br#"<Relationships><Relationship Id="rId1" Target="x.xml"/></Relationships>"#;
        let err = Relationships::from_xml(xml, "/", ".rels").unwrap_err();
        assert!(matches!(err, OpcError::MalformedItem { .. }));
    }
}
