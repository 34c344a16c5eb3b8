//! # eCH models
//!
//! Wire-faithful Rust types for the eCH population-register standards. Each
//! module mirrors one standard version; each complex type declares its slot
//! table and implements [`ech_wire::WireNode`], each `xs:choice` is an enum
//! implementing [`ech_wire::ChoiceGroup`].
//!
//! | Module | Standard |
//! |---|---|
//! | [`ech0007`] | eCH-0007 v5, municipalities |
//! | [`ech0008`] | eCH-0008 v3, countries |
//! | [`ech0010`] | eCH-0010 v5, postal addresses |
//! | [`ech0044`] | eCH-0044 v4, person identification |
//! | [`ech0011`] | eCH-0011 v8, person data |
//! | [`ech0021`] | eCH-0021 v7, additional person data |
//! | [`ech0021_v8`] | eCH-0021 v8, lock and additional data |
//! | [`ech0058`] | eCH-0058 v4 and v5, message headers |
//! | [`ech0020`] | eCH-0020 v3, base delivery |
//! | [`ech0099`] | eCH-0099 v2.1, statistics delivery |
//!
//! Code lists shared across standards live in [`codes`].

pub mod codes;
pub mod ech0007;
pub mod ech0008;
pub mod ech0010;
pub mod ech0011;
pub mod ech0020;
pub mod ech0021;
pub mod ech0021_v8;
pub mod ech0044;
pub mod ech0058;
pub mod ech0099;
pub mod namespaces;

pub use ech0020::Delivery;
pub use ech0099::StatisticsDelivery;
