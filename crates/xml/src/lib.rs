//! # eCH XML
//!
//! Byte-level XML for eCH documents, built on quick-xml.
//!
//! - [`de`]: namespace-aware parsing into [`ech_wire::Element`] trees and
//!   typed documents. Mixed content and undeclared prefixes are rejected.
//! - [`ser`]: writing trees with an XML declaration and every namespace
//!   declared once on the root element.
//! - [`gateway`]: the interface to an external XSD validator, plus a schema
//!   cache that loads each schema once.
//!
//! ```ignore
//! use ech_xml::{from_xml_slice, to_xml_vec};
//!
//! let bytes = to_xml_vec(&delivery)?;
//! let back: Delivery = from_xml_slice(&bytes)?;
//! ```

pub mod de;
pub mod error;
pub mod gateway;
pub mod ser;
pub mod utils;

pub use de::{
    RootInfo, from_xml_reader, from_xml_slice, from_xml_str, parse_element, peek_root,
    read_element,
};
pub use error::{Result, XmlError};
pub use gateway::{
    CachedGateway, Diagnostic, SchemaCache, SchemaGateway, SchemaSource, validate_with,
};
pub use ser::{to_xml_string, to_xml_vec, to_xml_vec_pretty, to_xml_writer, write_element};
