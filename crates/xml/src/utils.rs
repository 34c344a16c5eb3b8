//! Helpers shared by the reader and writer: reference resolution, namespace
//! declaration handling and prefix bookkeeping.

use ech_wire::Element;

/// Attribute name (or prefix) that introduces a namespace declaration.
pub const XMLNS: &str = "xmlns";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Checks if an attribute key declares a namespace (`xmlns` or `xmlns:p`).
pub fn is_namespace_declaration(key: &str) -> bool {
    key == XMLNS || key.starts_with("xmlns:")
}

/// Resolves the body of an `&...;` reference: one of the five predefined
/// entities or a decimal/hex character reference.
pub fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Expands references inside a raw attribute value. Returns the name of the
/// first reference that cannot be resolved.
pub fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(';') else {
            return Err(after.to_string());
        };
        let name = &after[..end];
        out.push(resolve_reference(name).ok_or_else(|| name.to_string())?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

pub fn qualified_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_string(),
    }
}

/// Namespace URIs of a tree paired with the prefix each is written under,
/// in order of first use (pre-order).
///
/// An element's own prefix is kept when no earlier namespace claimed it;
/// otherwise `ns1`, `ns2`, ... are handed out.
#[derive(Debug, Default)]
pub struct PrefixTable {
    entries: Vec<(String, String)>,
}

impl PrefixTable {
    pub fn collect(root: &Element) -> Self {
        let mut table = Self::default();
        table.visit(root);
        table
    }

    fn visit(&mut self, element: &Element) {
        if let Some(uri) = element.namespace.as_deref()
            && self.prefix(uri).is_none()
        {
            let prefix = match element.prefix.as_deref() {
                Some(p) if !p.is_empty() && !self.is_taken(p) => p.to_string(),
                _ => self.generated(),
            };
            self.entries.push((uri.to_string(), prefix));
        }
        for child in &element.children {
            self.visit(child);
        }
    }

    fn is_taken(&self, prefix: &str) -> bool {
        self.entries.iter().any(|(_, p)| p == prefix)
    }

    fn generated(&self) -> String {
        (1..)
            .map(|n| format!("ns{n}"))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_default()
    }

    pub fn prefix(&self, uri: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(u, _)| u == uri)
            .map(|(_, p)| p.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, p)| (u.as_str(), p.as_str()))
    }
}
