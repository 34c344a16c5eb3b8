//! Supported delivery schema versions.

use std::fmt;
use std::str::FromStr;

use ech_model::namespaces::{ECH_0020, ECH_0099};
use ech_model::{ech0020, ech0099};
use ech_xml::peek_root;

use crate::error::{DeliveryError, Result};

/// A delivery document type and version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// eCH-0020 v3 base delivery.
    Ech0020V3,
    /// eCH-0099 v2 statistics delivery.
    Ech0099V2,
}

impl SchemaVersion {
    pub const ALL: &'static [SchemaVersion] = &[SchemaVersion::Ech0020V3, SchemaVersion::Ech0099V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::Ech0020V3 => "eCH-0020-3",
            SchemaVersion::Ech0099V2 => "eCH-0099-2",
        }
    }

    /// Identifier of the XSD file a gateway validates against.
    pub fn schema_id(&self) -> &'static str {
        match self {
            SchemaVersion::Ech0020V3 => "eCH-0020-3-0.xsd",
            SchemaVersion::Ech0099V2 => "eCH-0099-2-1.xsd",
        }
    }

    pub fn namespace_uri(&self) -> &'static str {
        match self {
            SchemaVersion::Ech0020V3 => ECH_0020.uri,
            SchemaVersion::Ech0099V2 => ECH_0099.uri,
        }
    }

    /// Value of the root `version` attribute.
    pub fn delivery_version(&self) -> &'static str {
        match self {
            SchemaVersion::Ech0020V3 => ech0020::DELIVERY_VERSION,
            SchemaVersion::Ech0099V2 => ech0099::DELIVERY_VERSION,
        }
    }

    /// Picks the version of a document from its root element.
    ///
    /// The root namespace decides. A root without a namespace falls back to
    /// the `version` attribute.
    pub fn detect(xml: &[u8]) -> Result<Self> {
        let root = peek_root(xml)?;
        if let Some(namespace) = root.namespace.as_deref() {
            return Self::ALL
                .iter()
                .copied()
                .find(|v| v.namespace_uri() == namespace)
                .ok_or_else(|| DeliveryError::UnsupportedVersion(namespace.to_string()));
        }
        let version = root.attribute("version").unwrap_or_default();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.delivery_version() == version)
            .ok_or_else(|| {
                DeliveryError::UnsupportedVersion(format!("{} version {version:?}", root.name))
            })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DeliveryError::UnsupportedVersion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("eCH-0020-3".parse::<SchemaVersion>().unwrap(), SchemaVersion::Ech0020V3);
        assert_eq!("ech-0099-2".parse::<SchemaVersion>().unwrap(), SchemaVersion::Ech0099V2);
        assert_eq!(SchemaVersion::Ech0099V2.to_string(), "eCH-0099-2");
        assert!(matches!(
            "eCH-0020-4".parse::<SchemaVersion>(),
            Err(DeliveryError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_detect_by_namespace() {
        let xml = br#"<?xml version="1.0"?><eCH-0020:delivery xmlns:eCH-0020="http://www.ech.ch/xmlns/eCH-0020/3" version="3.0"/>"#;
        assert_eq!(SchemaVersion::detect(xml).unwrap(), SchemaVersion::Ech0020V3);

        let xml = br#"<delivery xmlns="http://www.ech.ch/xmlns/eCH-0099/2" version="2.1"/>"#;
        assert_eq!(SchemaVersion::detect(xml).unwrap(), SchemaVersion::Ech0099V2);
    }

    #[test]
    fn test_detect_rejects_unknown_namespace() {
        let xml = br#"<delivery xmlns="http://www.ech.ch/xmlns/eCH-0020/2" version="2.0"/>"#;
        assert!(matches!(
            SchemaVersion::detect(xml),
            Err(DeliveryError::UnsupportedVersion(ref ns)) if ns.ends_with("eCH-0020/2")
        ));
    }

    #[test]
    fn test_detect_falls_back_to_version_attribute() {
        assert_eq!(
            SchemaVersion::detect(br#"<delivery version="2.1"/>"#).unwrap(),
            SchemaVersion::Ech0099V2
        );
        assert!(SchemaVersion::detect(br#"<delivery/>"#).is_err());
    }

    #[test]
    fn test_schema_ids() {
        assert_eq!(SchemaVersion::Ech0020V3.schema_id(), "eCH-0020-3-0.xsd");
        assert_eq!(SchemaVersion::Ech0099V2.delivery_version(), "2.1");
    }
}
