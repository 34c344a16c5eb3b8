//! Wrapping payloads into complete deliveries with an eCH-0058 header.
//!
//! The header is built once per delivery from the deployment configuration
//! and per-call [`FinalizeOptions`]. One eCH-0020 base delivery carries any
//! number of persons in `baseDelivery/messages`.

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use ech_model::codes::Action;
use ech_model::ech0020::{Delivery, EventBaseDelivery};
use ech_model::ech0058::{
    ApplicationName, Comment, Header, HeaderV4, HeaderV5, MessageId, ProductVersion,
    SendingApplication,
};
use ech_model::ech0099::{StatisticsDelivery, StatisticsPerson};
use ech_model::namespaces::{ECH_0020, ECH_0099};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::DeliveryConfig;
use crate::error::{DeliveryError, Result};
use crate::event::BaseDeliveryEvent;
use crate::fields::{checked, opt_text, text};

/// Per-delivery header values. Everything left unset gets its default.
#[derive(Debug, Clone, Default)]
pub struct FinalizeOptions {
    /// Defaults to a fresh UUID v4.
    pub message_id: Option<String>,
    /// Defaults to now, truncated to seconds.
    pub message_date: Option<NaiveDateTime>,
    /// Defaults to [`Action::New`].
    pub action: Option<Action>,
    pub recipient_ids: Vec<String>,
    pub reference_message_id: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

impl FinalizeOptions {
    /// Options with a fixed message id and date, for reproducible output.
    pub fn fixed(message_id: impl Into<String>, message_date: NaiveDateTime) -> Self {
        Self {
            message_id: Some(message_id.into()),
            message_date: Some(message_date),
            ..Self::default()
        }
    }
}

fn build_header(
    config: &DeliveryConfig,
    options: &FinalizeOptions,
    message_type: String,
) -> Result<Header> {
    config.validate().map_err(DeliveryError::Config)?;

    let message_id = options
        .message_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let message_date = options
        .message_date
        .unwrap_or_else(|| Local::now().naive_local())
        .trunc_subsecs(0);

    Ok(Header {
        sender_id: config.sender_id.clone(),
        original_sender_id: config.original_sender_id.clone(),
        declaration_local_reference: None,
        recipient_id: options.recipient_ids.clone(),
        message_id: checked("message_id", MessageId::new(message_id))?,
        reference_message_id: opt_text(
            "reference_message_id",
            options.reference_message_id.as_deref(),
            MessageId::new,
        )?,
        business_process_id: None,
        our_business_reference_id: None,
        your_business_reference_id: None,
        unique_id_business_transaction: None,
        message_type,
        sub_message_type: None,
        sending_application: SendingApplication {
            manufacturer: text("manufacturer", &config.manufacturer, ApplicationName::new)?,
            product: text("product", &config.product, ApplicationName::new)?,
            product_version: text(
                "product_version",
                &config.product_version,
                ProductVersion::new,
            )?,
        },
        partial_delivery: None,
        subject: None,
        comment: opt_text("comment", options.comment.as_deref(), Comment::new)?,
        message_date,
        initial_message_date: None,
        event_date: options.event_date,
        modification_date: None,
        action: options.action.unwrap_or(Action::New),
        test_delivery_flag: config.test_delivery_flag,
        response_expected: None,
        business_case_closed: None,
        named_meta_data: Vec::new(),
    })
}

/// Builds an eCH-0020 v3 base delivery holding every event, in order.
#[instrument(skip_all, fields(events = events.len()))]
pub fn finalize_0020_base(
    events: &[BaseDeliveryEvent],
    config: &DeliveryConfig,
    options: &FinalizeOptions,
) -> Result<Delivery> {
    let message_type = config
        .message_type_override
        .clone()
        .unwrap_or_else(|| ECH_0020.uri.to_string());
    let header = HeaderV5(build_header(config, options, message_type)?);
    let events = events
        .iter()
        .map(BaseDeliveryEvent::to_wire)
        .collect::<std::result::Result<Vec<EventBaseDelivery>, _>>()?;
    debug!(message_id = %header.0.message_id, "finalized eCH-0020 base delivery");
    Ok(Delivery::new(header, events))
}

/// Builds an eCH-0099 v2 statistics delivery.
#[instrument(skip_all, fields(persons = persons.len()))]
pub fn finalize_0099(
    persons: Vec<StatisticsPerson>,
    config: &DeliveryConfig,
    options: &FinalizeOptions,
) -> Result<StatisticsDelivery> {
    let header = HeaderV4(build_header(config, options, ECH_0099.uri.to_string())?);
    debug!(message_id = %header.0.message_id, "finalized eCH-0099 delivery");
    Ok(StatisticsDelivery {
        delivery_header: header,
        reported_person: persons,
        general_data: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ech_wire::WireError;

    fn date_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(8, 30, 15, 250)
            .unwrap()
    }

    #[test]
    fn test_header_defaults() -> Result<()> {
        let delivery = finalize_0020_base(&[], &DeliveryConfig::for_testing(), &FinalizeOptions::default())?;
        let header = &delivery.delivery_header.0;
        assert_eq!(header.message_type, "http://www.ech.ch/xmlns/eCH-0020/3");
        assert_eq!(header.action, Action::New);
        assert!(header.test_delivery_flag);
        assert!(Uuid::parse_str(header.message_id.as_str()).is_ok());
        assert_eq!(header.message_date.and_utc().timestamp_subsec_nanos(), 0);
        Ok(())
    }

    #[test]
    fn test_supplied_values_win() -> Result<()> {
        let config = DeliveryConfig {
            message_type_override: Some("urn:test:base".to_string()),
            test_delivery_flag: false,
            ..DeliveryConfig::for_testing()
        };
        let options = FinalizeOptions {
            action: Some(Action::Correction),
            ..FinalizeOptions::fixed("msg-1", date_time())
        };
        let delivery = finalize_0020_base(&[], &config, &options)?;
        let header = &delivery.delivery_header.0;
        assert_eq!(header.message_id.as_str(), "msg-1");
        assert_eq!(header.message_type, "urn:test:base");
        assert_eq!(header.message_date, date_time().trunc_subsecs(0));
        assert_eq!(header.action, Action::Correction);
        assert!(!header.test_delivery_flag);
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = finalize_0099(Vec::new(), &DeliveryConfig::default(), &FinalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Config(ref problems) if problems.len() == 4));
    }

    #[test]
    fn test_statistics_message_type() -> Result<()> {
        let delivery = finalize_0099(Vec::new(), &DeliveryConfig::for_testing(), &FinalizeOptions::default())?;
        assert_eq!(
            delivery.delivery_header.0.message_type,
            "http://www.ech.ch/xmlns/eCH-0099/2"
        );
        Ok(())
    }

    #[test]
    fn test_message_id_length() {
        let options = FinalizeOptions::fixed("x".repeat(37), date_time());
        let err = finalize_0020_base(&[], &DeliveryConfig::for_testing(), &options).unwrap_err();
        assert!(matches!(
            err.as_wire(),
            Some(WireError::ConstraintViolation { path, .. }) if path == "message_id"
        ));
    }
}
