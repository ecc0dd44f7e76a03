//! Serialization of an element tree back to part XML.

use crate::ooxml::xml::escape::escape_xml;
use crate::ooxml::xml::node::{XmlDocument, XmlElement, XmlNode};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

impl XmlDocument {
    /// Serialize with a standalone UTF-8 declaration.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        xml.push_str("\r\n");
        for node in &self.prolog {
            write_node(node, &mut xml);
        }
        write_element(&self.root, &mut xml);
        xml
    }

    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}

impl XmlElement {
    /// Serialize this element and its subtree without a declaration.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        write_element(self, &mut xml);
        xml
    }
}

fn write_node(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Element(e) => write_element(e, out),
        XmlNode::Text(t) => out.push_str(&escape_xml(t)),
        XmlNode::CData(c) => {
            out.push_str("<![CDATA[");
            out.push_str(c);
            out.push_str("]]>");
        },
        XmlNode::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        },
        XmlNode::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(pi);
            out.push_str("?>");
        },
    }
}

fn write_element(element: &XmlElement, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for (key, value) in element.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in element.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}
