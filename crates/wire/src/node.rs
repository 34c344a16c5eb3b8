//! Traits implemented by every wire type.

use tracing::debug;

use crate::element::Element;
use crate::error::{Result, WireError};
use crate::namespace::Namespace;
use crate::reader::FieldReader;
use crate::slot::{ChoiceSchema, NodeSchema};
use crate::writer::FieldWriter;

/// A complex type with a declared, ordered content model.
///
/// `write_fields` may emit its slots in any order; the writer re-sorts them
/// into schema sequence. `read_fields` pulls slots by name from a reader that
/// has already partitioned the element's children against the slot table.
pub trait WireNode: Sized {
    fn schema() -> &'static NodeSchema;

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()>;

    fn read_fields(r: &mut FieldReader) -> Result<Self>;
}

/// An `xs:choice`: exactly one arm, each arm an ordered run of slots that
/// appear inline in the owning node.
pub trait ChoiceGroup: Sized {
    fn schema() -> &'static ChoiceSchema;

    /// Name of the populated arm.
    fn arm_name(&self) -> &'static str;

    /// Writes the populated arm's slots.
    fn write_arm(&self, w: &mut FieldWriter) -> Result<()>;

    /// Reads the named arm from a reader framed on that arm's slots.
    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self>;
}

/// A node that can stand as a document root.
pub trait WireRoot: WireNode {
    const ROOT: &'static str;
}

/// Builds the element tree for a root node.
pub fn encode_root<N: WireRoot>(node: &N) -> Result<Element> {
    let schema = N::schema();
    encode_node(node, schema.namespace, N::ROOT)
}

/// Rebuilds a root node, checking the root element's name and namespace.
pub fn decode_root<N: WireRoot>(root: &Element) -> Result<N> {
    let schema = N::schema();
    if root.namespace_uri() != schema.namespace.uri {
        return Err(WireError::NamespaceMismatch {
            path: root.name.clone(),
            expected: schema.namespace.uri.to_string(),
            actual: root.namespace_uri().to_string(),
        });
    }
    if root.name != N::ROOT {
        return Err(WireError::UnexpectedElement {
            path: String::new(),
            name: root.name.clone(),
        });
    }
    decode_node(root)
}

/// Encodes any node under an explicit element name and namespace.
pub fn encode_node<N: WireNode>(node: &N, namespace: Namespace, name: &str) -> Result<Element> {
    let schema = N::schema();
    let mut writer = FieldWriter::new(schema.slots, schema.namespace, name.to_string());
    node.write_fields(&mut writer)?;
    let (attributes, children) = writer.finish()?;
    debug!(
        element = name,
        type_name = schema.type_name,
        children = children.len(),
        "encoded wire node"
    );
    let mut element = Element::new(namespace, name);
    element.attributes = attributes;
    element.children = children;
    Ok(element)
}

/// Decodes any node from an element, without checking the element's own
/// name or namespace.
pub fn decode_node<N: WireNode>(element: &Element) -> Result<N> {
    FieldReader::read_node(element.clone(), element.name.clone())
}
