//! XML part parser built on `quick-xml` events.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::escape::resolve_entity;
use crate::ooxml::xml::kind::ElementKind;
use crate::ooxml::xml::node::{XmlDocument, XmlElement, XmlNode};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// In-scope namespace declarations, innermost last.
#[derive(Default)]
struct NamespaceScopes {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScopes {
    fn push(&mut self, declarations: Vec<(String, String)>) {
        self.frames.push(declarations);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    /// URI bound to `prefix` (`""` for the default namespace).
    fn lookup(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }
}

fn utf8(bytes: &[u8], what: &str) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| OoxmlError::Xml(format!("Invalid UTF-8 in {}", what)))
}

/// Append text to the last child if it is a text node, so that text split
/// around entity references ends up in a single node.
fn push_text(parent: &mut XmlElement, text: &str) {
    if let Some(XmlNode::Text(last)) = parent.children_mut().last_mut() {
        last.push_str(text);
    } else {
        parent.push(XmlNode::Text(text.to_string()));
    }
}

fn open_element(e: &BytesStart<'_>, scopes: &mut NamespaceScopes) -> Result<XmlElement> {
    let name = utf8(e.name().as_ref(), "element name")?;

    let mut attributes = Vec::new();
    let mut declarations = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| OoxmlError::Xml(format!("Invalid attribute: {}", err)))?;
        let key = utf8(attr.key.as_ref(), "attribute name")?;
        let value = attr
            .unescape_value()
            .map_err(|err| OoxmlError::Xml(format!("Invalid attribute value: {}", err)))?
            .into_owned();
        if key == "xmlns" {
            declarations.push((String::new(), value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push((prefix.to_string(), value.clone()));
        }
        attributes.push((key, value));
    }
    scopes.push(declarations);

    let (prefix, local) = match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name.as_str()),
    };
    let kind = ElementKind::resolve(scopes.lookup(prefix), local);

    let mut element = XmlElement::with_name(name.clone(), kind);
    for (key, value) in attributes {
        element.set_attr(&key, value);
    }
    Ok(element)
}

/// Parse a complete XML part into a tree.
///
/// Whitespace, comments and CDATA sections are kept; entity references are
/// resolved into the surrounding text.
pub fn parse(xml: &[u8]) -> Result<XmlDocument> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut scopes = NamespaceScopes::default();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut prolog = Vec::new();
    let mut root = None;

    // Route a finished node to the open parent, or to the prolog when no
    // element is open yet.
    macro_rules! emit {
        ($node:expr) => {
            match stack.last_mut() {
                Some(parent) => parent.push($node),
                None if root.is_none() => prolog.push($node),
                None => {},
            }
        };
    }

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let element = open_element(e, &mut scopes)?;
                stack.push(element);
            },
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e, &mut scopes)?;
                scopes.pop();
                match stack.last_mut() {
                    Some(parent) => parent.push(element),
                    None => root = Some(element),
                }
            },
            Ok(Event::End(_)) => {
                scopes.pop();
                let element = stack
                    .pop()
                    .ok_or_else(|| OoxmlError::Xml("Unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.push(element),
                    None => root = Some(element),
                }
            },
            Ok(Event::Text(ref t)) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &utf8(&**t, "text content")?);
                }
            },
            Ok(Event::GeneralRef(ref r)) => {
                let name = utf8(&**r, "entity reference")?;
                let text = resolve_entity(&name)
                    .ok_or_else(|| OoxmlError::Xml(format!("Unknown entity &{};", name)))?;
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &text);
                }
            },
            Ok(Event::CData(ref c)) => {
                emit!(XmlNode::CData(utf8(&**c, "CDATA section")?));
            },
            Ok(Event::Comment(ref c)) => {
                emit!(XmlNode::Comment(utf8(&**c, "comment")?));
            },
            Ok(Event::PI(ref pi)) => {
                emit!(XmlNode::ProcessingInstruction(utf8(
                    &**pi,
                    "processing instruction"
                )?));
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML parsing error: {}", e))),
            // Declaration and DOCTYPE are regenerated/dropped on write
            Ok(_) => {},
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(OoxmlError::Xml("Unexpected end of document".to_string()));
    }
    let root = root.ok_or_else(|| OoxmlError::Xml("No root element found".to_string()))?;
    Ok(XmlDocument { prolog, root })
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    #[test]
    fn test_parse_kinds_through_namespace_scope() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W}" xmlns:x="urn:other"><w:body><w:p/><x:p/><w:sectPr/></w:body></w:document>"#
        );
        let doc = parse(xml.as_bytes()).unwrap();
        assert_eq!(doc.root.kind(), ElementKind::Document);
        let body = doc.root.find(ElementKind::Body).unwrap();
        let kinds: Vec<_> = body.elements().map(XmlElement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Paragraph,
                ElementKind::Other,
                ElementKind::SectionProperties
            ]
        );
    }

    #[test]
    fn test_parse_default_namespace_and_other_prefix() {
        let xml = format!(r#"<document xmlns="{W}"><body><ns0:p xmlns:ns0="{W}"/></body></document>"#);
        let doc = parse(xml.as_bytes()).unwrap();
        let body = doc.root.find(ElementKind::Body).unwrap();
        assert!(body.contains(ElementKind::Paragraph));
    }

    #[test]
    fn test_parse_resolves_entities_into_one_text_node() {
        let xml = format!(r#"<w:t xmlns:w="{W}" xml:space="preserve"> a &amp; b &#x41;</w:t>"#);
        let doc = parse(xml.as_bytes()).unwrap();
        assert_eq!(doc.root.children(), &[XmlNode::Text(" a & b A".to_string())]);
        assert_eq!(doc.root.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_parse_keeps_comments_and_cdata() {
        let xml = b"<!--lead--><root><!--c--><![CDATA[<x>]]></root>";
        let doc = parse(xml).unwrap();
        assert_eq!(doc.prolog, vec![XmlNode::Comment("lead".to_string())]);
        assert_eq!(
            doc.root.children(),
            &[
                XmlNode::Comment("c".to_string()),
                XmlNode::CData("<x>".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(b"").is_err());
        assert!(parse(b"<a><b></a>").is_err());
        assert!(parse(b"<a>&bogus;</a>").is_err());
    }
}
