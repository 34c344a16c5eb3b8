//! Reading XML bytes into element trees and typed documents.
//!
//! Parsing goes through quick-xml's namespace-aware reader, so every element
//! carries its resolved namespace URI regardless of which prefix (or default
//! namespace) the producer used. Namespace declarations and prefixed
//! attributes such as `xsi:schemaLocation` are dropped; only unqualified
//! attributes reach the tree.

use std::io::BufRead;

use ech_wire::{Element, WireRoot, decode_root};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use tracing::debug;

use crate::error::{Result, XmlError};
use crate::utils::{is_blank, is_namespace_declaration, resolve_reference, strip_bom, unescape};

/// Decode a typed document from XML bytes.
///
/// # Example
///
/// ```ignore
/// let delivery: Delivery = from_xml_slice(&bytes)?;
/// ```
pub fn from_xml_slice<N: WireRoot>(xml: &[u8]) -> Result<N> {
    let root = parse_element(xml)?;
    Ok(decode_root(&root)?)
}

/// Decode a typed document from an XML string.
pub fn from_xml_str<N: WireRoot>(xml: &str) -> Result<N> {
    from_xml_slice(xml.as_bytes())
}

/// Decode a typed document from a buffered reader.
pub fn from_xml_reader<R: BufRead, N: WireRoot>(reader: R) -> Result<N> {
    let root = read_element(reader)?;
    Ok(decode_root(&root)?)
}

/// Parse XML bytes into a namespace-resolved element tree.
pub fn parse_element(xml: &[u8]) -> Result<Element> {
    read_element(strip_bom(xml))
}

/// Parse a document from any buffered reader.
pub fn read_element<R: BufRead>(reader: R) -> Result<Element> {
    let mut reader = NsReader::from_reader(reader);
    let mut buf = Vec::new();
    let mut stack: Vec<(Element, String)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(start) => {
                let element = start_element(&resolved, &start)?;
                stack.push((element, String::new()));
            }
            Event::Empty(start) => {
                let element = start_element(&resolved, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let (element, text) = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unbalanced end tag".to_string()))?;
                let element = close_element(element, text)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                push_text(&mut stack, std::str::from_utf8(&text)?)?;
            }
            Event::CData(data) => {
                push_text(&mut stack, std::str::from_utf8(&data)?)?;
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference)?;
                let resolved = resolve_reference(name)
                    .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?;
                push_text(&mut stack, resolved.encode_utf8(&mut [0; 4]))?;
            }
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some((open, _)) = stack.last() {
        return Err(XmlError::Malformed(format!("unclosed element {}", open.name)));
    }
    let root = root.ok_or_else(|| XmlError::Malformed("no root element".to_string()))?;
    debug!(root = %root.name, namespace = root.namespace_uri(), "parsed XML document");
    Ok(root)
}

/// Name, namespace and attributes of a document's root element, read
/// without parsing the rest of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInfo {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl RootInfo {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub fn peek_root(xml: &[u8]) -> Result<RootInfo> {
    let mut reader = NsReader::from_reader(strip_bom(xml));
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(start) | Event::Empty(start) => {
                let element = start_element(&resolved, &start)?;
                return Ok(RootInfo {
                    namespace: element.namespace,
                    name: element.name,
                    attributes: element.attributes,
                });
            }
            Event::Text(text) if !is_blank(std::str::from_utf8(&text)?) => {
                return Err(XmlError::Malformed("text before root element".to_string()));
            }
            Event::Eof => return Err(XmlError::Malformed("no root element".to_string())),
            _ => {}
        }
    }
}

fn start_element(resolved: &ResolveResult, start: &BytesStart) -> Result<Element> {
    let qname = start.name();
    let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
    let prefix = match qname.prefix() {
        Some(prefix) => Some(std::str::from_utf8(prefix.as_ref())?.to_string()),
        None => None,
    };
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_string()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(p) => {
            return Err(XmlError::UnknownPrefix(String::from_utf8_lossy(p).to_string()));
        }
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if is_namespace_declaration(key) || attr.key.prefix().is_some() {
            continue;
        }
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(XmlError::UnknownEntity)?;
        attributes.push((key.to_string(), value));
    }

    Ok(Element {
        namespace,
        prefix,
        name,
        attributes,
        text: None,
        children: Vec::new(),
    })
}

fn push_text(stack: &mut [(Element, String)], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some((_, buffer)) => buffer.push_str(text),
        None if is_blank(text) => {}
        None => return Err(XmlError::Malformed("text outside the root element".to_string())),
    }
    Ok(())
}

fn close_element(mut element: Element, text: String) -> Result<Element> {
    if element.children.is_empty() {
        element.text = (!text.is_empty()).then_some(text);
    } else if !is_blank(&text) {
        return Err(XmlError::MixedContent {
            element: element.name,
        });
    }
    Ok(element)
}

fn attach(
    stack: &mut [(Element, String)],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    if let Some((parent, text)) = stack.last_mut() {
        if !is_blank(text) {
            return Err(XmlError::MixedContent {
                element: parent.name.clone(),
            });
        }
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed("more than one root element".to_string()));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- header comment -->
<a:root xmlns:a="urn:a" xmlns:b="urn:b" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        version="3.0" xsi:schemaLocation="urn:a a.xsd">
  <a:first>Müller &amp; S&#246;hne</a:first>
  <b:second><b:inner/></b:second>
  <plain>x</plain>
</a:root>"#;

    #[test]
    fn test_parse_resolves_namespaces() -> Result<()> {
        let root = parse_element(NESTED.as_bytes())?;
        assert_eq!(root.namespace.as_deref(), Some("urn:a"));
        assert_eq!(root.prefix.as_deref(), Some("a"));
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[1].namespace.as_deref(), Some("urn:b"));
        assert_eq!(root.children[1].children[0].name, "inner");
        assert_eq!(root.children[2].namespace, None);
        Ok(())
    }

    #[test]
    fn test_only_unqualified_attributes_kept() -> Result<()> {
        let root = parse_element(NESTED.as_bytes())?;
        assert_eq!(root.attributes, vec![("version".to_string(), "3.0".to_string())]);
        Ok(())
    }

    #[test]
    fn test_references_are_resolved() -> Result<()> {
        let root = parse_element(NESTED.as_bytes())?;
        assert_eq!(root.children[0].text.as_deref(), Some("Müller & Söhne"));
        Ok(())
    }

    #[test]
    fn test_default_namespace() -> Result<()> {
        let root = parse_element(br#"<r xmlns="urn:d"><c>1</c></r>"#)?;
        assert_eq!(root.namespace.as_deref(), Some("urn:d"));
        assert_eq!(root.children[0].namespace.as_deref(), Some("urn:d"));
        assert_eq!(root.prefix, None);
        Ok(())
    }

    #[test]
    fn test_mixed_content_rejected() {
        let err = parse_element(b"<r>text<c/></r>").unwrap_err();
        assert!(matches!(err, XmlError::MixedContent { element } if element == "r"));

        let err = parse_element(b"<r><c/>tail</r>").unwrap_err();
        assert!(matches!(err, XmlError::MixedContent { .. }));
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        let err = parse_element(b"<x:r/>").unwrap_err();
        assert!(matches!(err, XmlError::UnknownPrefix(p) if p == "x"));
    }

    #[test]
    fn test_unknown_entity_rejected() {
        let err = parse_element(b"<r>&nbsp;</r>").unwrap_err();
        assert!(matches!(err, XmlError::UnknownEntity(name) if name == "nbsp"));
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse_element(b"").is_err());
        assert!(parse_element(b"<r><c></r>").is_err());
        assert!(parse_element(b"<r/><r/>").is_err());
        assert!(parse_element(b"<r>\xFF</r>").is_err());
    }

    #[test]
    fn test_bom_is_skipped() -> Result<()> {
        let root = parse_element(b"\xEF\xBB\xBF<r>1</r>")?;
        assert_eq!(root.text.as_deref(), Some("1"));
        Ok(())
    }

    #[test]
    fn test_peek_root() -> Result<()> {
        let info = peek_root(NESTED.as_bytes())?;
        assert_eq!(info.name, "root");
        assert_eq!(info.namespace.as_deref(), Some("urn:a"));
        assert_eq!(info.attribute("version"), Some("3.0"));
        Ok(())
    }
}
