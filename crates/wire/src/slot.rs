//! Declarative slot tables.
//!
//! Each wire node type declares one `static` [`NodeSchema`] listing its child
//! elements in schema sequence order. The writer and reader consume these
//! tables uniformly, so ordering and namespace rules live here rather than in
//! per-type serialization code.
//!
//! ```ignore
//! static NAME_DATA: NodeSchema = NodeSchema {
//!     type_name: "nameDataType",
//!     namespace: ECH_0011,
//!     slots: &[
//!         FieldSlot::value("officialName"),
//!         FieldSlot::value("firstName"),
//!         FieldSlot::value("originalName").optional(),
//!         FieldSlot::choice(&FOREIGN_NAME).optional(),
//!     ],
//! };
//! ```

use crate::namespace::Namespace;

/// Cardinality of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    Required,
    Optional,
    Repeated { min: usize, max: Option<usize> },
}

impl Occurs {
    pub fn is_repeated(self) -> bool {
        matches!(self, Occurs::Repeated { .. })
    }

    /// Checks an item count against the declared bounds.
    pub fn check_count(self, count: usize) -> Result<(), String> {
        let (min, max) = match self {
            Occurs::Required => (1, Some(1)),
            Occurs::Optional => (0, Some(1)),
            Occurs::Repeated { min, max } => (min, max),
        };
        if count < min {
            return Err(format!("expected at least {min} occurrence(s), found {count}"));
        }
        if let Some(max) = max
            && count > max
        {
            return Err(format!("expected at most {max} occurrence(s), found {count}"));
        }
        Ok(())
    }
}

/// What a slot holds.
#[derive(Debug, Clone, Copy)]
pub enum SlotKind {
    /// A scalar carried as element text.
    Value,
    /// A nested node with its own slot table.
    Node,
    /// An inline choice group; its arms' elements appear directly in the
    /// owning node at this position.
    Choice(&'static ChoiceSchema),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub name: &'static str,
    /// Element namespace; `None` means the owning node's namespace.
    pub namespace: Option<Namespace>,
    pub occurs: Occurs,
    pub kind: SlotKind,
}

impl FieldSlot {
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            namespace: None,
            occurs: Occurs::Required,
            kind: SlotKind::Value,
        }
    }

    pub const fn node(name: &'static str) -> Self {
        Self {
            name,
            namespace: None,
            occurs: Occurs::Required,
            kind: SlotKind::Node,
        }
    }

    pub const fn choice(schema: &'static ChoiceSchema) -> Self {
        Self {
            name: schema.group,
            namespace: None,
            occurs: Occurs::Required,
            kind: SlotKind::Choice(schema),
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            occurs: Occurs::Optional,
            ..self
        }
    }

    /// Zero or more.
    pub const fn repeated(self) -> Self {
        self.bounded(0, None)
    }

    /// One or more.
    pub const fn at_least_one(self) -> Self {
        self.bounded(1, None)
    }

    pub const fn bounded(self, min: usize, max: Option<usize>) -> Self {
        Self {
            occurs: Occurs::Repeated { min, max },
            ..self
        }
    }

    /// Places the element itself in another standard's namespace.
    pub const fn in_namespace(self, namespace: Namespace) -> Self {
        Self {
            namespace: Some(namespace),
            ..self
        }
    }

    pub fn namespace_or(&self, owner: Namespace) -> Namespace {
        self.namespace.unwrap_or(owner)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, SlotKind::Choice(_))
    }
}

/// One alternative of a choice group: an ordered run of slots.
#[derive(Debug)]
pub struct ChoiceArm {
    pub name: &'static str,
    pub slots: &'static [FieldSlot],
}

#[derive(Debug)]
pub struct ChoiceSchema {
    /// Logical group name used in diagnostics.
    pub group: &'static str,
    pub arms: &'static [ChoiceArm],
}

impl ChoiceSchema {
    pub fn arm(&'static self, name: &str) -> Option<(usize, &'static ChoiceArm)> {
        self.arms.iter().enumerate().find(|(_, arm)| arm.name == name)
    }

    pub fn arm_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.arms.iter().map(|arm| arm.name)
    }
}

/// The declared content model of a complex type.
#[derive(Debug)]
pub struct NodeSchema {
    /// Schema type name, for diagnostics.
    pub type_name: &'static str,
    /// Namespace of the type's child elements.
    pub namespace: Namespace,
    pub slots: &'static [FieldSlot],
}

impl NodeSchema {
    pub fn slot(&self, name: &str) -> Option<(usize, &'static FieldSlot)> {
        self.slots
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.name == name && !slot.is_choice())
    }
}
