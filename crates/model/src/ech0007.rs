//! eCH-0007 v5: Swiss municipalities.

use ech_wire::{
    FieldReader, FieldSlot, FieldWriter, NodeSchema, Result, WireNode, wire_number, wire_string,
};

use crate::codes::Canton;
use crate::namespaces::ECH_0007;

wire_number! {
    /// BFS municipality number.
    pub struct MunicipalityId(u16) { min: 1, max: 9999 }
}

wire_number! {
    pub struct HistoryMunicipalityId(u64) { min: 1, max: 999_999_999_999 }
}

wire_string! {
    pub struct MunicipalityName { min: 1, max: 40 }
}

/// `swissMunicipalityType`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwissMunicipality {
    pub municipality_id: Option<MunicipalityId>,
    pub municipality_name: MunicipalityName,
    pub canton_abbreviation: Option<Canton>,
    pub history_municipality_id: Option<HistoryMunicipalityId>,
}

static SWISS_MUNICIPALITY: NodeSchema = NodeSchema {
    type_name: "swissMunicipalityType",
    namespace: ECH_0007,
    slots: &[
        FieldSlot::value("municipalityId").optional(),
        FieldSlot::value("municipalityName"),
        FieldSlot::value("cantonAbbreviation").optional(),
        FieldSlot::value("historyMunicipalityId").optional(),
    ],
};

impl WireNode for SwissMunicipality {
    fn schema() -> &'static NodeSchema {
        &SWISS_MUNICIPALITY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("municipalityId", &self.municipality_id)?;
        w.value("municipalityName", &self.municipality_name)?;
        w.opt_value("cantonAbbreviation", &self.canton_abbreviation)?;
        w.opt_value("historyMunicipalityId", &self.history_municipality_id)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            municipality_id: r.opt_value("municipalityId")?,
            municipality_name: r.value("municipalityName")?,
            canton_abbreviation: r.opt_value("cantonAbbreviation")?,
            history_municipality_id: r.opt_value("historyMunicipalityId")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::ECH_0011;
    use ech_wire::{decode_node, encode_node};

    #[test]
    fn test_content_takes_ech0007_namespace() -> Result<()> {
        let bern = SwissMunicipality {
            municipality_id: Some(MunicipalityId::new(351).map_err(|e| e.at("id"))?),
            municipality_name: MunicipalityName::new("Bern").map_err(|e| e.at("name"))?,
            canton_abbreviation: Some(Canton::BE),
            history_municipality_id: None,
        };
        let element = encode_node(&bern, ECH_0011, "swissTown")?;
        assert!(element.is(&ECH_0011, "swissTown"));
        assert_eq!(element.children.len(), 3);
        assert!(element.children.iter().all(|c| c.namespace_uri() == ECH_0007.uri));
        assert_eq!(element.text_at(&["municipalityId"]), Some("351"));

        let back: SwissMunicipality = decode_node(&element)?;
        assert_eq!(back, bern);
        Ok(())
    }

    #[test]
    fn test_out_of_range_municipality_id() {
        assert!(MunicipalityId::new(0).is_err());
        assert!(MunicipalityId::new(10_000).is_err());
    }
}
