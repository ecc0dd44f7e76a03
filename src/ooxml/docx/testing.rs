//! In-memory .docx fixtures for tests.
use crate::ooxml::docx::Package;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub(crate) const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

struct FixturePart {
    r_id: String,
    reltype: &'static str,
    content_type: &'static str,
    name: String,
    xml: String,
}

/// Builds a .docx archive from XML fragments.
pub(crate) struct DocxBuilder {
    document: String,
    main_content_type: String,
    parts: Vec<FixturePart>,
    headers: usize,
    footers: usize,
}

impl DocxBuilder {
    /// A document whose `<w:body>` holds `body`.
    pub fn new(body: &str) -> Self {
        Self::raw_document(&format!("<w:document {NS}><w:body>{body}</w:body></w:document>"))
    }

    /// A document with a literal main part.
    pub fn raw_document(xml: &str) -> Self {
        Self {
            document: xml.to_string(),
            main_content_type: ct::WML_DOCUMENT_MAIN.to_string(),
            parts: Vec::new(),
            headers: 0,
            footers: 0,
        }
    }

    pub fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    pub fn settings(mut self, inner: &str) -> Self {
        self.parts.push(FixturePart {
            r_id: "rIdSettings".to_string(),
            reltype: rt::SETTINGS,
            content_type: ct::WML_SETTINGS,
            name: "settings.xml".to_string(),
            xml: format!("<w:settings {NS}>{inner}</w:settings>"),
        });
        self
    }

    pub fn styles(mut self, inner: &str) -> Self {
        self.parts.push(FixturePart {
            r_id: "rIdStyles".to_string(),
            reltype: rt::STYLES,
            content_type: ct::WML_STYLES,
            name: "styles.xml".to_string(),
            xml: format!("<w:styles {NS}>{inner}</w:styles>"),
        });
        self
    }

    pub fn header(mut self, r_id: &str, inner: &str) -> Self {
        self.headers += 1;
        self.parts.push(FixturePart {
            r_id: r_id.to_string(),
            reltype: rt::HEADER,
            content_type: ct::WML_HEADER,
            name: format!("header{}.xml", self.headers),
            xml: format!("<w:hdr {NS}>{inner}</w:hdr>"),
        });
        self
    }

    pub fn footer(mut self, r_id: &str, inner: &str) -> Self {
        self.footers += 1;
        self.parts.push(FixturePart {
            r_id: r_id.to_string(),
            reltype: rt::FOOTER,
            content_type: ct::WML_FOOTER,
            name: format!("footer{}.xml", self.footers),
            xml: format!("<w:ftr {NS}>{inner}</w:ftr>"),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut overrides = format!(
            r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#,
            self.main_content_type
        );
        let mut rels = String::new();
        for part in &self.parts {
            overrides.push_str(&format!(
                r#"<Override PartName="/word/{}" ContentType="{}"/>"#,
                part.name, part.content_type
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                part.r_id, part.reltype, part.name
            ));
        }

        let mut zip_data = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            write!(
                writer,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>{}</Types>"#,
                ct::OPC_RELATIONSHIPS,
                ct::XML,
                overrides
            )
            .unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            write!(
                writer,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="word/document.xml"/></Relationships>"#,
                rt::OFFICE_DOCUMENT
            )
            .unwrap();

            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(self.document.as_bytes()).unwrap();

            writer
                .start_file("word/_rels/document.xml.rels", options)
                .unwrap();
            write!(
                writer,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rels
            )
            .unwrap();

            for part in &self.parts {
                writer
                    .start_file(format!("word/{}", part.name), options)
                    .unwrap();
                writer.write_all(part.xml.as_bytes()).unwrap();
            }

            writer.finish().unwrap();
        }
        zip_data
    }

    pub fn package(&self) -> Package {
        Package::from_bytes(&self.build()).unwrap()
    }
}
