//! The namespace-qualified element tree shared by the encoder and decoder.
//!
//! An [`Element`] either carries text (a scalar) or child elements (a node);
//! mixed content does not occur in the supported schemas and is rejected by
//! the parser before a tree is built.

use crate::namespace::Namespace;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Namespace URI, `None` for unqualified elements.
    pub namespace: Option<String>,
    /// Prefix preference for serialization.
    pub prefix: Option<String>,
    pub name: String,
    /// Unqualified attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.uri.to_string()),
            prefix: Some(namespace.prefix.to_string()),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Namespace URI, or the empty string when unqualified.
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    pub fn is(&self, namespace: &Namespace, name: &str) -> bool {
        self.name == name && self.namespace_uri() == namespace.uri
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given local name, in any namespace.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Follows a chain of local names, taking the first match at each step.
    pub fn descend(&self, steps: &[&str]) -> Option<&Element> {
        steps
            .iter()
            .try_fold(self, |element, step| element.child(step))
    }

    pub fn descend_mut(&mut self, steps: &[&str]) -> Option<&mut Element> {
        let mut current = self;
        for step in steps {
            current = current.child_mut(step)?;
        }
        Some(current)
    }

    /// Text of a descendant scalar element.
    pub fn text_at(&self, steps: &[&str]) -> Option<&str> {
        self.descend(steps).and_then(|e| e.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: Namespace = Namespace::new("t", "urn:test");
    const OTHER: Namespace = Namespace::new("o", "urn:other");

    fn sample() -> Element {
        Element::new(NS, "root").with_child(
            Element::new(NS, "outer").with_child(Element::new(OTHER, "inner").with_text("42")),
        )
    }

    #[test]
    fn test_descend_and_text() {
        let root = sample();
        assert_eq!(root.text_at(&["outer", "inner"]), Some("42"));
        assert!(root.descend(&["outer", "missing"]).is_none());
        assert!(root.descend(&["outer", "inner"]).is_some_and(|e| e.is(&OTHER, "inner")));
    }

    #[test]
    fn test_descend_mut_edits_in_place() {
        let mut root = sample();
        if let Some(inner) = root.descend_mut(&["outer", "inner"]) {
            inner.text = Some("43".to_string());
        }
        assert_eq!(root.text_at(&["outer", "inner"]), Some("43"));
    }

    #[test]
    fn test_is_compares_uri_not_prefix() {
        let mut element = Element::new(NS, "root");
        element.prefix = Some("different".to_string());
        assert!(element.is(&NS, "root"));
        assert!(!element.is(&OTHER, "root"));
    }
}
