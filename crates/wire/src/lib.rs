//! # eCH wire model
//!
//! Shared machinery for the wire-faithful representation of eCH documents.
//!
//! ## Architecture
//!
//! - **Slot tables** ([`slot`]): every complex type declares a `static`
//!   [`NodeSchema`] listing its child elements in schema sequence order, with
//!   cardinality, value kind, and an optional per-slot namespace override.
//! - **Choice groups** ([`ChoiceGroup`]): each `xs:choice` is a Rust enum whose
//!   arms are ordered runs of slots appearing inline in the owning node.
//! - **Writer** ([`FieldWriter`]): builds an [`Element`] tree, re-sorting
//!   children into declared order so output never depends on call order.
//! - **Reader** ([`FieldReader`]): partitions an element's children against
//!   the slot table, rejecting unknown, misplaced, misordered or
//!   wrongly-namespaced elements before typed values are pulled out.
//!
//! Byte-level XML lives in `ech-xml`; this crate only knows element trees.
//!
//! ## Namespaces
//!
//! A slot's element takes the owning node's namespace unless the slot says
//! otherwise, and a nested node's children take the nested type's namespace.
//! This gives the wrapper/content split of cross-standard embedding:
//!
//! ```xml
//! <eCH-0020:personIdentification>        <!-- slot of an eCH-0020 type -->
//!   <eCH-0044:officialName>Müller</eCH-0044:officialName>
//! </eCH-0020:personIdentification>
//! ```

pub mod choice;
pub mod element;
pub mod error;
pub mod namespace;
pub mod node;
pub mod reader;
pub mod slot;
pub mod value;
pub mod writer;

pub use choice::{ChoiceCandidates, select_arm, select_optional_arm};
pub use element::Element;
pub use error::{ChoiceArity, Result, ValueError, WireError};
pub use namespace::Namespace;
pub use node::{ChoiceGroup, WireNode, WireRoot, decode_node, decode_root, encode_node, encode_root};
pub use reader::FieldReader;
pub use slot::{ChoiceArm, ChoiceSchema, FieldSlot, NodeSchema, Occurs, SlotKind};
pub use value::{FixedDigits, WireValue, Year, YearMonth, bool_to_string};
pub use writer::FieldWriter;
