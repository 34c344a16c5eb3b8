//! eCH-0008 v3: countries.

use ech_wire::{
    FieldReader, FieldSlot, FieldWriter, FixedDigits, NodeSchema, Result, WireNode, wire_string,
};

use crate::namespaces::ECH_0008;

/// BFS country number, four digits (Switzerland is `8100`).
pub type CountryId = FixedDigits<4>;

wire_string! {
    /// ISO 3166-1 alpha-2 code.
    pub struct CountryIso2 { min: 2, max: 2, pattern: "[A-Z]{2}" }
}

wire_string! {
    pub struct CountryNameShort { min: 1, max: 50 }
}

/// `countryType`.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub country_id: Option<CountryId>,
    pub country_id_iso2: Option<CountryIso2>,
    pub country_name_short: CountryNameShort,
}

static COUNTRY: NodeSchema = NodeSchema {
    type_name: "countryType",
    namespace: ECH_0008,
    slots: &[
        FieldSlot::value("countryId").optional(),
        FieldSlot::value("countryIdISO2").optional(),
        FieldSlot::value("countryNameShort"),
    ],
};

impl WireNode for Country {
    fn schema() -> &'static NodeSchema {
        &COUNTRY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("countryId", &self.country_id)?;
        w.opt_value("countryIdISO2", &self.country_id_iso2)?;
        w.value("countryNameShort", &self.country_name_short)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            country_id: r.opt_value("countryId")?,
            country_id_iso2: r.opt_value("countryIdISO2")?,
            country_name_short: r.value("countryNameShort")?,
        })
    }
}
