//! Error types for delivery construction and conversion.

use thiserror::Error;

use ech_wire::WireError;
use ech_xml::XmlError;

/// Any failure while turning records into deliveries or back.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Mapping or wire-tree errors, carrying the logical or element path.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// XML syntax, encoding and schema validation errors.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The delivery configuration failed validation.
    #[error("invalid delivery configuration: {}", .0.join("; "))]
    Config(Vec<String>),

    #[error("unsupported schema version: {0}")]
    UnsupportedVersion(String),
}

impl DeliveryError {
    /// The wire error underneath, whether raised by the mapper or while
    /// decoding XML.
    pub fn as_wire(&self) -> Option<&WireError> {
        match self {
            DeliveryError::Wire(err) | DeliveryError::Xml(XmlError::Wire(err)) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_error_is_transparent() {
        let err: DeliveryError = WireError::missing("official_name").into();
        assert_eq!(err.to_string(), "missing required field: official_name");
        assert_eq!(err.as_wire(), Some(&WireError::missing("official_name")));
    }

    #[test]
    fn test_wire_error_inside_xml_error() {
        let err: DeliveryError = XmlError::Wire(WireError::missing("delivery/@version")).into();
        assert!(matches!(
            err.as_wire(),
            Some(WireError::MissingRequiredField { path }) if path == "delivery/@version"
        ));
    }

    #[test]
    fn test_config_error_lists_problems() {
        let err = DeliveryError::Config(vec![
            "sender_id is required".to_string(),
            "product is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid delivery configuration: sender_id is required; product is required"
        );
    }
}
