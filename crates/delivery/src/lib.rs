//! # eCH deliveries
//!
//! Flattened records for eCH-0020 base deliveries and everything needed to
//! turn them into delivery documents and back.
//!
//! - [`person`], [`relationship`], [`place`], [`address`]: the flattened
//!   person and its groups, mapped to and from the wire model of
//!   `ech-model`. Fields the wire model stores in two places are set once
//!   here; on the way back both copies must agree.
//! - [`event`]: a person plus residence data, one `eventBaseDelivery`.
//! - [`finalize`]: wraps events into a complete delivery with an eCH-0058
//!   header built from [`DeliveryConfig`].
//! - [`batch`]: converts many records or documents in parallel, one result
//!   per input, in input order.
//!
//! Mapping errors carry the logical field path of the record, such as
//! `parents[2].person.official_name`. Decoding errors carry the element
//! path of the document.
//!
//! ```ignore
//! use ech_delivery::{DeliveryConfig, SchemaVersion, convert_batch, decode_batch};
//!
//! let config = DeliveryConfig::from_env();
//! let documents = convert_batch(&records, SchemaVersion::Ech0020V3, &config);
//! ```

pub mod address;
pub mod batch;
pub mod config;
pub mod error;
pub mod event;
mod fields;
pub mod finalize;
pub mod logging;
pub mod person;
pub mod place;
pub mod relationship;
pub mod version;

pub use address::{AddressFields, MailAddressFields};
pub use batch::{
    convert_batch, convert_batch_validated, decode_batch, decode_document, encode_record,
};
pub use config::DeliveryConfig;
pub use error::{DeliveryError, Result};
pub use event::{BaseDeliveryEvent, DestinationInfo, DwellingAddressInfo, ResidenceType};
pub use finalize::{FinalizeOptions, finalize_0020_base, finalize_0099};
pub use logging::init_logging;
pub use person::{
    BaseDeliveryPerson, ContactInfo, DeathInfo, ForeignNameFields, HealthInsuranceInfo, JobInfo,
    NationalityInfo, OccupationInfo, ParentNameInfo, PlaceOfOriginFields, ResidencePermitInfo,
};
pub use place::{CountryFields, MunicipalityInfo, PlaceFields, SecondaryResidenceInfo};
pub use relationship::{
    GuardianInfo, NamedId, OrganisationIdentity, ParentInfo, PartnerFields, PersonIdentity,
    SpouseInfo,
};
pub use version::SchemaVersion;
