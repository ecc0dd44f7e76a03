//! Low-level, read-only view of a serialized OPC package.
//!
//! Splits the physical members into the three kinds of package items:
//! `[Content_Types].xml`, `.rels` items and ordinary parts. Unlike a
//! relationship-graph walk, every member is kept, so parts nobody points at
//! survive a load/save cycle.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use tracing::warn;

/// Fallback for members the content-type map does not cover.
const OCTET_STREAM: &str = "application/octet-stream";

/// Part as read from the physical package, before relationships are attached.
#[derive(Debug)]
pub struct SerializedPart {
    pub partname: PackURI,
    pub content_type: String,
    pub blob: Vec<u8>,
}

/// Content type lookup built from `[Content_Types].xml`.
///
/// Implements the OPC discovery rule: an Override for the exact partname
/// wins, otherwise the Default for the (case-insensitive) extension.
#[derive(Debug, Default)]
pub(crate) struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if matches!(e.local_name().as_ref(), b"Default" | b"Override") =>
                {
                    let is_default = e.local_name().as_ref() == b"Default";
                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(|err| OpcError::malformed(CONTENT_TYPES_URI, err))?;
                        let value = attr
                            .unescape_value()
                            .map_err(|err| OpcError::malformed(CONTENT_TYPES_URI, err))?
                            .into_owned();
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => key = Some(value),
                            b"ContentType" => content_type = Some(value),
                            _ => {},
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if is_default {
                            map.defaults.insert(key.to_lowercase(), ct);
                        } else {
                            map.overrides.insert(key.to_lowercase(), ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::malformed(CONTENT_TYPES_URI, e)),
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    pub(crate) fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_lowercase()) {
            return Ok(ct);
        }
        self.defaults
            .get(&pack_uri.ext().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

/// Package reader exposing parts and relationships by source.
pub struct PackageReader {
    pkg_rels: Relationships,
    parts: Vec<SerializedPart>,
    part_rels: HashMap<PackURI, Relationships>,
}

impl PackageReader {
    pub fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypeMap::from_xml(phys_reader.blob_for(&content_types_uri)?)?;

        let mut pkg_rels = Relationships::new(PACKAGE_URI.to_string());
        let mut part_rels = HashMap::new();
        let mut parts = Vec::new();

        for member in phys_reader.into_members() {
            let uri = PackURI::from_membername(&member.name).map_err(OpcError::InvalidPackUri)?;
            if uri == content_types_uri {
                continue;
            }

            if let Some(source) = uri.rels_source() {
                let rels = Relationships::from_xml(&member.data, source.base_uri(), uri.as_str())?;
                if source.as_str() == PACKAGE_URI {
                    pkg_rels = rels;
                } else {
                    part_rels.insert(source, rels);
                }
                continue;
            }

            let content_type = match content_types.get(&uri) {
                Ok(ct) => ct.to_string(),
                Err(_) => {
                    warn!(part = %uri, "no content type declared, treating as binary");
                    OCTET_STREAM.to_string()
                },
            };
            parts.push(SerializedPart {
                partname: uri,
                content_type,
                blob: member.data,
            });
        }

        Ok(Self {
            pkg_rels,
            parts,
            part_rels,
        })
    }

    /// Take the package-level relationships.
    pub fn take_pkg_rels(&mut self) -> Relationships {
        std::mem::take(&mut self.pkg_rels)
    }

    /// Take every part, in archive order, paired with its relationships.
    pub fn take_parts(&mut self) -> Vec<(SerializedPart, Option<Relationships>)> {
        let parts = std::mem::take(&mut self.parts);
        parts
            .into_iter()
            .map(|spart| {
                let rels = self.part_rels.remove(&spart.partname);
                (spart, rels)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
            <Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
                <Default Extension="xml" ContentType="application/xml"/>
                <Default Extension="PNG" ContentType="image/png"/>
                <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
            </Types>"#;

        let ct_map = ContentTypeMap::from_xml(xml).unwrap();

        let uri = PackURI::new("/word/styles.xml").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), "application/xml");

        let uri = PackURI::new("/word/media/image1.png").unwrap();
        assert_eq!(ct_map.get(&uri).unwrap(), "image/png");

        let uri = PackURI::new("/word/document.xml").unwrap();
        assert_eq!(
            ct_map.get(&uri).unwrap(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
        );

        let uri = PackURI::new("/word/vbaProject.bin").unwrap();
        assert!(matches!(
            ct_map.get(&uri),
            Err(OpcError::ContentTypeNotFound(_))
        ));
    }
}
