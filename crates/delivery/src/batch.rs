//! Batch conversion between flattened records and delivery documents.
//!
//! Inputs are processed on rayon's global pool. Output order matches input
//! order, and a failing item never affects the others.

use std::fmt::Display;

use ech_model::ech0020::Delivery;
use ech_model::ech0099::{StatisticsDelivery, StatisticsPerson};
use ech_xml::{SchemaGateway, from_xml_slice, to_xml_vec, validate_with};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::config::DeliveryConfig;
use crate::error::Result;
use crate::event::BaseDeliveryEvent;
use crate::finalize::{FinalizeOptions, finalize_0020_base, finalize_0099};
use crate::version::SchemaVersion;

/// Encodes one record as a complete delivery document.
///
/// Every call gets a fresh message id and date.
pub fn encode_record(
    record: &BaseDeliveryEvent,
    version: SchemaVersion,
    config: &DeliveryConfig,
) -> Result<Vec<u8>> {
    let options = FinalizeOptions::default();
    let bytes = match version {
        SchemaVersion::Ech0020V3 => {
            let delivery = finalize_0020_base(std::slice::from_ref(record), config, &options)?;
            to_xml_vec(&delivery)?
        }
        SchemaVersion::Ech0099V2 => {
            let person = StatisticsPerson {
                base_data: record.to_reported_person()?,
                person_extended_data: Vec::new(),
            };
            let delivery = finalize_0099(vec![person], config, &options)?;
            to_xml_vec(&delivery)?
        }
    };
    debug!(%version, bytes = bytes.len(), "encoded delivery");
    Ok(bytes)
}

/// Decodes a delivery document of any supported version into its events.
pub fn decode_document(xml: &[u8]) -> Result<Vec<BaseDeliveryEvent>> {
    let version = SchemaVersion::detect(xml)?;
    let events = match version {
        SchemaVersion::Ech0020V3 => {
            let delivery: Delivery = from_xml_slice(xml)?;
            delivery
                .events()
                .iter()
                .map(BaseDeliveryEvent::from_wire)
                .collect::<ech_wire::Result<Vec<_>>>()?
        }
        SchemaVersion::Ech0099V2 => {
            let delivery: StatisticsDelivery = from_xml_slice(xml)?;
            delivery
                .reported_person
                .iter()
                .map(|person| BaseDeliveryEvent::from_reported_person(&person.base_data))
                .collect::<ech_wire::Result<Vec<_>>>()?
        }
    };
    debug!(%version, bytes = xml.len(), events = events.len(), "decoded delivery");
    Ok(events)
}

/// Converts each record into its own delivery document.
#[instrument(skip_all, fields(records = records.len(), %version))]
pub fn convert_batch(
    records: &[BaseDeliveryEvent],
    version: SchemaVersion,
    config: &DeliveryConfig,
) -> Vec<Result<Vec<u8>>> {
    let results: Vec<_> = records
        .par_iter()
        .map(|record| encode_record(record, version, config))
        .collect();
    summarize("convert", &results);
    results
}

/// Like [`convert_batch`], but every document must also pass the gateway.
#[instrument(skip_all, fields(records = records.len(), %version))]
pub fn convert_batch_validated(
    records: &[BaseDeliveryEvent],
    version: SchemaVersion,
    config: &DeliveryConfig,
    gateway: &dyn SchemaGateway,
) -> Vec<Result<Vec<u8>>> {
    let results: Vec<_> = records
        .par_iter()
        .map(|record| {
            let bytes = encode_record(record, version, config)?;
            validate_with(gateway, &bytes, version.schema_id())?;
            Ok(bytes)
        })
        .collect();
    summarize("convert", &results);
    results
}

/// Decodes each document independently.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn decode_batch<D>(documents: &[D]) -> Vec<Result<Vec<BaseDeliveryEvent>>>
where
    D: AsRef<[u8]> + Sync,
{
    let results: Vec<_> = documents
        .par_iter()
        .map(|document| decode_document(document.as_ref()))
        .collect();
    summarize("decode", &results);
    results
}

fn summarize<T, E: Display>(operation: &str, results: &[std::result::Result<T, E>]) {
    let mut failed = 0usize;
    for (index, result) in results.iter().enumerate() {
        if let Err(err) = result {
            failed += 1;
            warn!(operation, index, error = %err, "batch item failed");
        }
    }
    info!(
        operation,
        total = results.len(),
        ok = results.len() - failed,
        failed,
        "batch finished"
    );
}
