//! Sequence-ordered element construction.
//!
//! A [`FieldWriter`] is framed on one slot table. Values written into it are
//! tagged with their slot position and stably sorted at [`FieldWriter::finish`],
//! so the emitted child order is the declared sequence regardless of the order
//! a `write_fields` implementation touched the fields in.

use tracing::trace;

use crate::element::Element;
use crate::error::{Result, WireError};
use crate::namespace::Namespace;
use crate::node::{ChoiceGroup, WireNode};
use crate::slot::{FieldSlot, Occurs, SlotKind};
use crate::value::WireValue;

pub struct FieldWriter {
    slots: &'static [FieldSlot],
    namespace: Namespace,
    path: String,
    attributes: Vec<(String, String)>,
    entries: Vec<(usize, Element)>,
    filled: Vec<bool>,
}

impl FieldWriter {
    pub(crate) fn new(slots: &'static [FieldSlot], namespace: Namespace, path: String) -> Self {
        Self {
            slots,
            namespace,
            path,
            attributes: Vec::new(),
            entries: Vec::new(),
            filled: vec![false; slots.len()],
        }
    }

    /// Path of the element being written.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        }
    }

    fn slot(&self, name: &str) -> Result<(usize, &'static FieldSlot)> {
        self.slots
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.name == name && !slot.is_choice())
            .ok_or_else(|| WireError::UnexpectedElement {
                path: self.path.clone(),
                name: name.to_string(),
            })
    }

    fn check_count(&self, slot: &FieldSlot, count: usize) -> Result<()> {
        slot.occurs
            .check_count(count)
            .map_err(|rule| WireError::constraint(self.child_path(slot.name), rule))
    }

    fn push(&mut self, index: usize, element: Element) {
        self.filled[index] = true;
        self.entries.push((index, element));
    }

    fn scalar<V: WireValue>(&self, slot: &FieldSlot, value: &V) -> Element {
        Element::new(slot.namespace_or(self.namespace), slot.name).with_text(value.to_wire())
    }

    fn nested<N: WireNode>(&self, slot: &FieldSlot, node: &N, path: String) -> Result<Element> {
        let schema = N::schema();
        let mut inner = FieldWriter::new(schema.slots, schema.namespace, path);
        node.write_fields(&mut inner)?;
        let (attributes, children) = inner.finish()?;
        let mut element = Element::new(slot.namespace_or(self.namespace), slot.name);
        element.attributes = attributes;
        element.children = children;
        Ok(element)
    }

    /// Sets an unqualified attribute on the element being written.
    pub fn attribute(&mut self, name: &str, value: &impl WireValue) {
        self.attributes.push((name.to_string(), value.to_wire()));
    }

    pub fn value<V: WireValue>(&mut self, name: &str, value: &V) -> Result<()> {
        let (index, slot) = self.slot(name)?;
        let element = self.scalar(slot, value);
        self.push(index, element);
        Ok(())
    }

    pub fn opt_value<V: WireValue>(&mut self, name: &str, value: &Option<V>) -> Result<()> {
        match value {
            Some(value) => self.value(name, value),
            None => Ok(()),
        }
    }

    pub fn values<V: WireValue>(&mut self, name: &str, values: &[V]) -> Result<()> {
        let (index, slot) = self.slot(name)?;
        self.check_count(slot, values.len())?;
        for value in values {
            let element = self.scalar(slot, value);
            self.push(index, element);
        }
        Ok(())
    }

    pub fn node<N: WireNode>(&mut self, name: &str, node: &N) -> Result<()> {
        let (index, slot) = self.slot(name)?;
        let element = self.nested(slot, node, self.child_path(name))?;
        self.push(index, element);
        Ok(())
    }

    pub fn opt_node<N: WireNode>(&mut self, name: &str, node: &Option<N>) -> Result<()> {
        match node {
            Some(node) => self.node(name, node),
            None => Ok(()),
        }
    }

    /// Writes one sibling element per item, preserving list order.
    pub fn nodes<N: WireNode>(&mut self, name: &str, nodes: &[N]) -> Result<()> {
        let (index, slot) = self.slot(name)?;
        self.check_count(slot, nodes.len())?;
        for (position, node) in nodes.iter().enumerate() {
            let path = format!("{}[{}]", self.child_path(name), position + 1);
            let element = self.nested(slot, node, path)?;
            self.push(index, element);
        }
        Ok(())
    }

    /// Writes the populated arm of a choice at the choice slot's position.
    pub fn choice<C: ChoiceGroup>(&mut self, choice: &C) -> Result<()> {
        let schema = C::schema();
        let index = self
            .slots
            .iter()
            .position(|slot| matches!(slot.kind, SlotKind::Choice(s) if std::ptr::eq(s, schema)))
            .ok_or_else(|| WireError::UnexpectedElement {
                path: self.path.clone(),
                name: schema.group.to_string(),
            })?;
        let (_, arm) = schema
            .arm(choice.arm_name())
            .ok_or_else(|| WireError::choice_none(self.child_path(schema.group)))?;

        let mut inner = FieldWriter::new(arm.slots, self.namespace, self.path.clone());
        choice.write_arm(&mut inner)?;
        let (_, children) = inner.finish()?;
        trace!(group = schema.group, arm = arm.name, path = %self.path, "writing choice arm");
        for child in children {
            self.push(index, child);
        }
        Ok(())
    }

    pub fn opt_choice<C: ChoiceGroup>(&mut self, choice: &Option<C>) -> Result<()> {
        match choice {
            Some(choice) => self.choice(choice),
            None => Ok(()),
        }
    }

    /// Returns attributes and children in declared sequence order.
    pub(crate) fn finish(mut self) -> Result<(Vec<(String, String)>, Vec<Element>)> {
        for (index, slot) in self.slots.iter().enumerate() {
            let required = match slot.occurs {
                Occurs::Required => true,
                Occurs::Repeated { min, .. } => min > 0,
                Occurs::Optional => false,
            };
            if required && !self.filled[index] {
                return Err(WireError::missing(self.child_path(slot.name)));
            }
        }
        self.entries.sort_by_key(|(index, _)| *index);
        let children = self.entries.into_iter().map(|(_, element)| element).collect();
        Ok((self.attributes, children))
    }
}
