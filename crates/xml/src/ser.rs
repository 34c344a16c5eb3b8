//! Writing element trees and typed documents as XML bytes.
//!
//! Every namespace used anywhere in the tree is declared once, on the root,
//! in order of first use. Child elements are written with their prefix and
//! never repeat a declaration. Output always starts with a UTF-8 XML
//! declaration.

use std::io::Write;

use ech_wire::{Element, WireRoot, encode_root};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::error::Result;
use crate::utils::{PrefixTable, XMLNS, qualified_name};

/// Encode a typed document as compact XML bytes.
pub fn to_xml_vec<N: WireRoot>(document: &N) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_xml_writer(&mut out, document)?;
    Ok(out)
}

/// Encode a typed document as indented XML, for inspection.
pub fn to_xml_vec_pretty<N: WireRoot>(document: &N) -> Result<Vec<u8>> {
    let root = encode_root(document)?;
    let mut out = Vec::new();
    write_element(&mut out, &root, true)?;
    Ok(out)
}

pub fn to_xml_string<N: WireRoot>(document: &N) -> Result<String> {
    let bytes = to_xml_vec(document)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn to_xml_writer<W: Write, N: WireRoot>(writer: W, document: &N) -> Result<()> {
    let root = encode_root(document)?;
    write_element(writer, &root, false)
}

/// Write an element tree as a complete document.
pub fn write_element<W: Write>(writer: W, root: &Element, indent: bool) -> Result<()> {
    let prefixes = PrefixTable::collect(root);
    let mut writer = if indent {
        Writer::new_with_indent(writer, b' ', 2)
    } else {
        Writer::new(writer)
    };
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_node(&mut writer, root, &prefixes, true)?;
    debug!(
        root = %root.name,
        namespaces = prefixes.entries().count(),
        "wrote XML document"
    );
    Ok(())
}

fn write_node<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    prefixes: &PrefixTable,
    is_root: bool,
) -> Result<()> {
    let prefix = element
        .namespace
        .as_deref()
        .and_then(|uri| prefixes.prefix(uri));
    let name = qualified_name(prefix, &element.name);

    let mut start = BytesStart::new(name.as_str());
    if is_root {
        for (uri, prefix) in prefixes.entries() {
            let key = format!("{XMLNS}:{prefix}");
            start.push_attribute((key.as_str(), uri));
        }
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_node(writer, child, prefixes, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}
