//! eCH-0021 v8 lock and additional data.
//!
//! v8 splits the address lock out of `dataLock` and turns all three locks
//! into yes/no flags.

use chrono::NaiveDate;
use ech_wire::{FieldReader, FieldSlot, FieldWriter, NodeSchema, Result, WireNode};

use crate::codes::YesNo;
use crate::ech0021::{self, PERSON_ADDITIONAL_DATA_SLOTS};
use crate::namespaces::ECH_0021_V8;

#[derive(Debug, Clone, PartialEq)]
pub struct LockData {
    pub address_lock: YesNo,
    pub address_lock_valid_from: Option<NaiveDate>,
    pub address_lock_valid_till: Option<NaiveDate>,
    pub data_lock: YesNo,
    pub data_lock_valid_from: Option<NaiveDate>,
    pub data_lock_valid_till: Option<NaiveDate>,
    pub paper_lock: YesNo,
    pub paper_lock_valid_from: Option<NaiveDate>,
    pub paper_lock_valid_till: Option<NaiveDate>,
}

impl Default for LockData {
    fn default() -> Self {
        Self {
            address_lock: YesNo::No,
            address_lock_valid_from: None,
            address_lock_valid_till: None,
            data_lock: YesNo::No,
            data_lock_valid_from: None,
            data_lock_valid_till: None,
            paper_lock: YesNo::No,
            paper_lock_valid_from: None,
            paper_lock_valid_till: None,
        }
    }
}

static LOCK_DATA: NodeSchema = NodeSchema {
    type_name: "lockDataType",
    namespace: ECH_0021_V8,
    slots: &[
        FieldSlot::value("addressLock"),
        FieldSlot::value("addressLockValidFrom").optional(),
        FieldSlot::value("addressLockValidTill").optional(),
        FieldSlot::value("dataLock"),
        FieldSlot::value("dataLockValidFrom").optional(),
        FieldSlot::value("dataLockValidTill").optional(),
        FieldSlot::value("paperLock"),
        FieldSlot::value("paperLockValidFrom").optional(),
        FieldSlot::value("paperLockValidTill").optional(),
    ],
};

impl WireNode for LockData {
    fn schema() -> &'static NodeSchema {
        &LOCK_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("addressLock", &self.address_lock)?;
        w.opt_value("addressLockValidFrom", &self.address_lock_valid_from)?;
        w.opt_value("addressLockValidTill", &self.address_lock_valid_till)?;
        w.value("dataLock", &self.data_lock)?;
        w.opt_value("dataLockValidFrom", &self.data_lock_valid_from)?;
        w.opt_value("dataLockValidTill", &self.data_lock_valid_till)?;
        w.value("paperLock", &self.paper_lock)?;
        w.opt_value("paperLockValidFrom", &self.paper_lock_valid_from)?;
        w.opt_value("paperLockValidTill", &self.paper_lock_valid_till)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            address_lock: r.value("addressLock")?,
            address_lock_valid_from: r.opt_value("addressLockValidFrom")?,
            address_lock_valid_till: r.opt_value("addressLockValidTill")?,
            data_lock: r.value("dataLock")?,
            data_lock_valid_from: r.opt_value("dataLockValidFrom")?,
            data_lock_valid_till: r.opt_value("dataLockValidTill")?,
            paper_lock: r.value("paperLock")?,
            paper_lock_valid_from: r.opt_value("paperLockValidFrom")?,
            paper_lock_valid_till: r.opt_value("paperLockValidTill")?,
        })
    }
}

/// Same content as v7, declared in the v8 namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonAdditionalData(pub ech0021::PersonAdditionalData);

static PERSON_ADDITIONAL_DATA: NodeSchema = NodeSchema {
    type_name: "personAdditionalData",
    namespace: ECH_0021_V8,
    slots: PERSON_ADDITIONAL_DATA_SLOTS,
};

impl WireNode for PersonAdditionalData {
    fn schema() -> &'static NodeSchema {
        &PERSON_ADDITIONAL_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        self.0.write_to(w)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        ech0021::PersonAdditionalData::read_from(r).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::MrMrs;
    use crate::namespaces::ECH_0021_V7;
    use ech_wire::{Element, WireError, decode_node, encode_node};

    #[test]
    fn test_lock_data_order() -> Result<()> {
        let lock = LockData {
            address_lock: YesNo::Yes,
            paper_lock_valid_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..LockData::default()
        };
        let element = encode_node(&lock, ECH_0021_V8, "lockData")?;
        let names: Vec<&str> = element.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["addressLock", "dataLock", "paperLock", "paperLockValidFrom"]
        );
        assert_eq!(element.text_at(&["addressLock"]), Some("1"));
        assert_eq!(decode_node::<LockData>(&element)?, lock);
        Ok(())
    }

    #[test]
    fn test_v7_content_rejected_under_v8() {
        let element = Element::new(ECH_0021_V8, "personAdditionalData")
            .with_child(Element::new(ECH_0021_V7, "mrMrs").with_text("2"));
        let err = decode_node::<PersonAdditionalData>(&element).unwrap_err();
        assert!(matches!(err, WireError::NamespaceMismatch { .. }));

        let element = Element::new(ECH_0021_V8, "personAdditionalData")
            .with_child(Element::new(ECH_0021_V8, "mrMrs").with_text("2"));
        let data = decode_node::<PersonAdditionalData>(&element).unwrap();
        assert_eq!(data.0.mr_mrs, Some(MrMrs::Mr));
    }
}
