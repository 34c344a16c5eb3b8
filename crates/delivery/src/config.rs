//! Deployment configuration for building eCH deliveries.
//!
//! The values identify the sending system inside the sedex network and stay
//! the same for every delivery one deployment produces. They are read from
//! the environment (or command line), or deserialized from JSON.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ECH_SENDER_ID` | (required) | Sedex participant id, e.g. `1-351-1` |
//! | `ECH_MANUFACTURER` | (required) | Software manufacturer, 1-30 characters |
//! | `ECH_PRODUCT` | (required) | Product name, 1-30 characters |
//! | `ECH_PRODUCT_VERSION` | (required) | Product version, 1-10 characters |
//! | `ECH_TEST_DELIVERY` | true | Mark deliveries as test deliveries |
//! | `ECH_MESSAGE_TYPE` | | Overrides the eCH-0020 message type |
//! | `ECH_ORIGINAL_SENDER_ID` | | Sender a forwarded delivery came from |
//! | `ECH_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use ech_delivery::DeliveryConfig;
//!
//! let config = DeliveryConfig {
//!     sender_id: "1-351-1".to_string(),
//!     manufacturer: "Gemeinde Bern".to_string(),
//!     product: "Einwohnerregister".to_string(),
//!     product_version: "2.4".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::{ArgAction, Parser};
use ech_wire::value::check_pattern;
use serde::{Deserialize, Serialize};

/// Sedex participant ids: type, organisation, instance.
const SEDEX_ID: &str = r"\d-[\w-]+-\d+";

const SEDEX_ID_MAX: usize = 50;

/// Configuration of the sending deployment.
///
/// Government identifiers have no defaults: [`Default`] leaves them empty and
/// [`DeliveryConfig::validate`] reports them as missing.
#[derive(Debug, Clone, PartialEq, Parser, Serialize, Deserialize)]
#[command(name = "ech-delivery")]
#[command(about = "eCH-0020 base delivery conversion")]
#[serde(default)]
pub struct DeliveryConfig {
    /// Sedex participant id of the sender.
    #[arg(long, env = "ECH_SENDER_ID", default_value = "")]
    pub sender_id: String,

    /// Manufacturer of the sending application.
    #[arg(long, env = "ECH_MANUFACTURER", default_value = "")]
    pub manufacturer: String,

    /// Product name of the sending application.
    #[arg(long, env = "ECH_PRODUCT", default_value = "")]
    pub product: String,

    /// Product version of the sending application.
    #[arg(long, env = "ECH_PRODUCT_VERSION", default_value = "")]
    pub product_version: String,

    /// Mark deliveries as test deliveries (`--test-delivery-flag false` to turn off).
    #[arg(long, env = "ECH_TEST_DELIVERY", default_value = "true", action = ArgAction::Set)]
    pub test_delivery_flag: bool,

    /// Message type written instead of the eCH-0020 namespace URI.
    #[arg(long, env = "ECH_MESSAGE_TYPE")]
    pub message_type_override: Option<String>,

    /// Sedex id of the original sender, for forwarded deliveries.
    #[arg(long, env = "ECH_ORIGINAL_SENDER_ID")]
    pub original_sender_id: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ECH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            sender_id: String::new(),
            manufacturer: String::new(),
            product: String::new(),
            product_version: String::new(),
            test_delivery_flag: true,
            message_type_override: None,
            original_sender_id: None,
            log_level: "info".to_string(),
        }
    }
}

fn check_length(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(format!("{field} is required"));
    } else if len > max {
        errors.push(format!("{field} must be at most {max} characters"));
    }
}

fn check_sedex_id(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(format!("{field} is required"));
    } else if value.len() > SEDEX_ID_MAX || check_pattern(value, SEDEX_ID).is_err() {
        errors.push(format!(
            "{field} {value:?} is not a sedex participant id (e.g. 1-351-1)"
        ));
    }
}

impl DeliveryConfig {
    /// Creates a configuration from environment variables.
    ///
    /// Falls back to [`Default`] when the environment does not parse, which
    /// [`DeliveryConfig::validate`] then rejects.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Loads a configuration from JSON. Absent keys take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_sedex_id(&mut errors, "sender_id", &self.sender_id);
        check_length(&mut errors, "manufacturer", &self.manufacturer, 30);
        check_length(&mut errors, "product", &self.product, 30);
        check_length(&mut errors, "product_version", &self.product_version, 10);

        if let Some(original) = &self.original_sender_id {
            check_sedex_id(&mut errors, "original_sender_id", original);
        }

        if self
            .message_type_override
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            errors.push("message_type_override cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a valid configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            sender_id: "1-351-1".to_string(),
            manufacturer: "Testhersteller".to_string(),
            product: "Testregister".to_string(),
            product_version: "0.1".to_string(),
            test_delivery_flag: true,
            message_type_override: None,
            original_sender_id: None,
            log_level: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_invalid() {
        let config = DeliveryConfig::default();
        assert!(config.test_delivery_flag);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e == "sender_id is required"));
    }

    #[test]
    fn test_for_testing_is_valid() {
        assert_eq!(DeliveryConfig::for_testing().validate(), Ok(()));
    }

    #[test]
    fn test_sender_id_pattern() {
        for good in ["1-351-1", "3-CH-12", "2-sedex-test-7"] {
            let config = DeliveryConfig {
                sender_id: good.to_string(),
                ..DeliveryConfig::for_testing()
            };
            assert!(config.validate().is_ok(), "{good}");
        }
        for bad in ["351", "1-351", "a-351-1", "1-351-x"] {
            let config = DeliveryConfig {
                sender_id: bad.to_string(),
                ..DeliveryConfig::for_testing()
            };
            let errors = config.validate().unwrap_err();
            assert!(errors[0].contains("sedex participant id"), "{bad}");
        }
    }

    #[test]
    fn test_lengths_and_original_sender() {
        let config = DeliveryConfig {
            manufacturer: "x".repeat(31),
            product_version: "1.0.0-beta.1".to_string(),
            original_sender_id: Some("nope".to_string()),
            message_type_override: Some(" ".to_string()),
            ..DeliveryConfig::for_testing()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.starts_with("manufacturer")));
        assert!(errors.iter().any(|e| e.starts_with("product_version")));
        assert!(errors.iter().any(|e| e.starts_with("original_sender_id")));
    }

    #[test]
    fn test_json_round_trip() {
        let config = DeliveryConfig {
            message_type_override: Some("http://example.org/type".to_string()),
            ..DeliveryConfig::for_testing()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""sender_id":"1-351-1""#));
        assert_eq!(DeliveryConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_missing_keys_take_defaults() {
        let config = DeliveryConfig::from_json(r#"{"sender_id":"1-351-1"}"#).unwrap();
        assert_eq!(config.sender_id, "1-351-1");
        assert!(config.test_delivery_flag);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_delivery_flag_takes_a_value() {
        let config = DeliveryConfig::try_parse_from(["ech-delivery"]).unwrap();
        assert!(config.test_delivery_flag);

        let config =
            DeliveryConfig::try_parse_from(["ech-delivery", "--test-delivery-flag", "false"])
                .unwrap();
        assert!(!config.test_delivery_flag);

        let config =
            DeliveryConfig::try_parse_from(["ech-delivery", "--test-delivery-flag=true"]).unwrap();
        assert!(config.test_delivery_flag);
    }
}
