//! Slot-table driven decoding of an element's children.
//!
//! [`FieldReader`] partitions the children of one element against a slot
//! table up front. Partitioning is where structural errors surface: an
//! element matching no slot, a known name in the wrong namespace, a sibling
//! that appears after a later-declared slot, or a second occurrence of a
//! non-repeating slot. Typed getters then pull values out of the buckets.

use std::collections::VecDeque;

use tracing::trace;

use crate::element::Element;
use crate::error::{Result, WireError};
use crate::namespace::Namespace;
use crate::node::{ChoiceGroup, WireNode};
use crate::slot::{FieldSlot, SlotKind};
use crate::value::WireValue;

enum Bucket {
    Elements(VecDeque<Element>),
    /// Elements of an inline choice, each tagged with the arm it matched.
    Choice(Vec<(usize, Element)>),
}

impl Bucket {
    fn is_empty(&self) -> bool {
        match self {
            Bucket::Elements(items) => items.is_empty(),
            Bucket::Choice(items) => items.is_empty(),
        }
    }
}

enum Located {
    Slot(usize, Option<usize>),
    WrongNamespace(Namespace),
    Unknown,
}

fn locate(slots: &[FieldSlot], owner: Namespace, element: &Element) -> Located {
    let mut wrong = None;
    let mut check = |slot: &FieldSlot| {
        if slot.name != element.name {
            return false;
        }
        let expected = slot.namespace_or(owner);
        if element.namespace_uri() == expected.uri {
            return true;
        }
        wrong.get_or_insert(expected);
        false
    };
    for (index, slot) in slots.iter().enumerate() {
        match slot.kind {
            SlotKind::Choice(schema) => {
                for (arm_index, arm) in schema.arms.iter().enumerate() {
                    if arm.slots.iter().any(&mut check) {
                        return Located::Slot(index, Some(arm_index));
                    }
                }
            }
            _ => {
                if check(slot) {
                    return Located::Slot(index, None);
                }
            }
        }
    }
    match wrong {
        Some(expected) => Located::WrongNamespace(expected),
        None => Located::Unknown,
    }
}

pub struct FieldReader {
    slots: &'static [FieldSlot],
    namespace: Namespace,
    path: String,
    attributes: Vec<(String, String)>,
    buckets: Vec<Bucket>,
}

impl FieldReader {
    pub(crate) fn new(
        slots: &'static [FieldSlot],
        namespace: Namespace,
        path: String,
        attributes: Vec<(String, String)>,
        children: Vec<Element>,
    ) -> Result<Self> {
        let mut buckets: Vec<Bucket> = slots
            .iter()
            .map(|slot| match slot.kind {
                SlotKind::Choice(_) => Bucket::Choice(Vec::new()),
                _ => Bucket::Elements(VecDeque::new()),
            })
            .collect();

        let child_path = |name: &str| join(&path, name);
        let mut cursor = 0;
        for child in children {
            let (index, arm) = match locate(slots, namespace, &child) {
                Located::Slot(index, arm) => (index, arm),
                Located::WrongNamespace(expected) => {
                    return Err(WireError::NamespaceMismatch {
                        path: child_path(&child.name),
                        expected: expected.uri.to_string(),
                        actual: child.namespace_uri().to_string(),
                    });
                }
                Located::Unknown => {
                    return Err(WireError::UnexpectedElement {
                        path: path.clone(),
                        name: child.name,
                    });
                }
            };
            if index < cursor {
                return Err(WireError::OutOfOrder {
                    path: path.clone(),
                    name: child.name,
                });
            }
            cursor = index;
            match (&mut buckets[index], arm) {
                (Bucket::Choice(items), Some(arm)) => items.push((arm, child)),
                (Bucket::Elements(items), None) => {
                    if !items.is_empty() && !slots[index].occurs.is_repeated() {
                        return Err(WireError::UnexpectedElement {
                            path: path.clone(),
                            name: child.name,
                        });
                    }
                    items.push_back(child);
                }
                _ => {
                    return Err(WireError::UnexpectedElement {
                        path: path.clone(),
                        name: child.name,
                    });
                }
            }
        }

        Ok(Self {
            slots,
            namespace,
            path,
            attributes,
            buckets,
        })
    }

    /// Decodes a node from an element already known to be in the right place.
    pub(crate) fn read_node<N: WireNode>(element: Element, path: String) -> Result<N> {
        if element.text.as_deref().is_some_and(|t| !t.trim().is_empty()) {
            return Err(WireError::constraint(path, "unexpected text content"));
        }
        let schema = N::schema();
        let mut reader = FieldReader::new(
            schema.slots,
            schema.namespace,
            path,
            element.attributes,
            element.children,
        )?;
        let node = N::read_fields(&mut reader)?;
        reader.finish()?;
        Ok(node)
    }

    /// Path of the element being read.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path of a child slot, for diagnostics raised by `read_fields`.
    pub fn child_path(&self, name: &str) -> String {
        join(&self.path, name)
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

    fn take(&mut self, name: &str) -> Result<(&'static FieldSlot, VecDeque<Element>)> {
        let (index, slot) = self.slot(name)?;
        match &mut self.buckets[index] {
            Bucket::Elements(items) => Ok((slot, std::mem::take(items))),
            Bucket::Choice(_) => Err(WireError::UnexpectedElement {
                path: self.path.clone(),
                name: name.to_string(),
            }),
        }
    }

    fn scalar<V: WireValue>(element: Element, path: String) -> Result<V> {
        if let Some(child) = element.children.first() {
            return Err(WireError::UnexpectedElement {
                path,
                name: child.name.clone(),
            });
        }
        let raw = element.text.unwrap_or_default();
        V::from_wire(&raw).map_err(|e| e.at(path))
    }

    fn check_count(&self, slot: &FieldSlot, count: usize) -> Result<()> {
        slot.occurs
            .check_count(count)
            .map_err(|rule| WireError::constraint(self.child_path(slot.name), rule))
    }

    /// Reads a required unqualified attribute.
    pub fn attribute(&self, name: &str) -> Result<String> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| WireError::missing(format!("{}/@{}", self.path, name)))
    }

    pub fn value<V: WireValue>(&mut self, name: &str) -> Result<V> {
        self.opt_value(name)?
            .ok_or_else(|| WireError::missing(self.child_path(name)))
    }

    pub fn opt_value<V: WireValue>(&mut self, name: &str) -> Result<Option<V>> {
        let (_, mut items) = self.take(name)?;
        match items.pop_front() {
            Some(element) => Self::scalar(element, self.child_path(name)).map(Some),
            None => Ok(None),
        }
    }

    /// Collects all occurrences in document order.
    pub fn values<V: WireValue>(&mut self, name: &str) -> Result<Vec<V>> {
        let (slot, items) = self.take(name)?;
        self.check_count(slot, items.len())?;
        let path = self.child_path(name);
        items
            .into_iter()
            .map(|element| Self::scalar(element, path.clone()))
            .collect()
    }

    pub fn node<N: WireNode>(&mut self, name: &str) -> Result<N> {
        self.opt_node(name)?
            .ok_or_else(|| WireError::missing(self.child_path(name)))
    }

    pub fn opt_node<N: WireNode>(&mut self, name: &str) -> Result<Option<N>> {
        let (_, mut items) = self.take(name)?;
        match items.pop_front() {
            Some(element) => Self::read_node(element, self.child_path(name)).map(Some),
            None => Ok(None),
        }
    }

    /// Collects all occurrences in document order.
    pub fn nodes<N: WireNode>(&mut self, name: &str) -> Result<Vec<N>> {
        let (slot, items) = self.take(name)?;
        self.check_count(slot, items.len())?;
        let base = self.child_path(name);
        items
            .into_iter()
            .enumerate()
            .map(|(position, element)| {
                Self::read_node(element, format!("{}[{}]", base, position + 1))
            })
            .collect()
    }

    pub fn choice<C: ChoiceGroup>(&mut self) -> Result<C> {
        let group = self.child_path(C::schema().group);
        self.opt_choice()?
            .ok_or_else(|| WireError::choice_none(group))
    }

    /// Reads an optional choice; zero arms present yields `None`, more than
    /// one is a violation.
    pub fn opt_choice<C: ChoiceGroup>(&mut self) -> Result<Option<C>> {
        let schema = C::schema();
        let group = self.child_path(schema.group);
        let index = self
            .slots
            .iter()
            .position(|slot| matches!(slot.kind, SlotKind::Choice(s) if std::ptr::eq(s, schema)))
            .ok_or_else(|| WireError::UnexpectedElement {
                path: self.path.clone(),
                name: schema.group.to_string(),
            })?;
        let items = match &mut self.buckets[index] {
            Bucket::Choice(items) => std::mem::take(items),
            Bucket::Elements(_) => return Err(WireError::choice_none(group)),
        };
        let Some((first_arm, _)) = items.first() else {
            return Ok(None);
        };
        let first_arm = *first_arm;

        let mut present: Vec<usize> = Vec::new();
        for (arm, _) in &items {
            if !present.contains(arm) {
                present.push(*arm);
            }
        }
        if present.len() > 1 {
            return Err(WireError::choice_multiple(
                group,
                present.iter().map(|&arm| schema.arms[arm].name),
            ));
        }

        let arm = &schema.arms[first_arm];
        trace!(group = schema.group, arm = arm.name, path = %self.path, "reading choice arm");
        let elements = items.into_iter().map(|(_, element)| element).collect();
        let mut inner = FieldReader::new(
            arm.slots,
            self.namespace,
            self.path.clone(),
            Vec::new(),
            elements,
        )?;
        let value = C::read_arm(arm.name, &mut inner)?;
        inner.finish()?;
        Ok(Some(value))
    }

    /// Fails if any partitioned element was never read.
    pub(crate) fn finish(self) -> Result<()> {
        for (slot, bucket) in self.slots.iter().zip(&self.buckets) {
            if !bucket.is_empty() {
                return Err(WireError::UnexpectedElement {
                    path: self.path.clone(),
                    name: slot.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}/{name}")
    }
}
