//! eCH-0099 v2.1: person data delivery to the federal statistics office.

use ech_wire::{
    FieldReader, FieldSlot, FieldWriter, NodeSchema, Result, WireError, WireNode, WireRoot,
    wire_string,
};

use crate::ech0011::ReportedPerson;
use crate::ech0058::HeaderV4;
use crate::namespaces::ECH_0099;

pub const DELIVERY_VERSION: &str = "2.1";

wire_string! {
    pub struct DataField { min: 1, max: 100 }
}

wire_string! {
    pub struct DataValue { min: 1, max: 1000 }
}

/// `dataType`: a free field/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub field: DataField,
    pub value: DataValue,
}

static DATA: NodeSchema = NodeSchema {
    type_name: "dataType",
    namespace: ECH_0099,
    slots: &[FieldSlot::value("field"), FieldSlot::value("value")],
};

impl WireNode for Data {
    fn schema() -> &'static NodeSchema {
        &DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("field", &self.field)?;
        w.value("value", &self.value)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            field: r.value("field")?,
            value: r.value("value")?,
        })
    }
}

/// `reportedPersonType`: eCH-0011 base data plus statistics extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsPerson {
    pub base_data: ReportedPerson,
    pub person_extended_data: Vec<Data>,
}

static STATISTICS_PERSON: NodeSchema = NodeSchema {
    type_name: "reportedPersonType",
    namespace: ECH_0099,
    slots: &[
        FieldSlot::node("baseData"),
        FieldSlot::node("personExtendedData").repeated(),
    ],
};

impl WireNode for StatisticsPerson {
    fn schema() -> &'static NodeSchema {
        &STATISTICS_PERSON
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("baseData", &self.base_data)?;
        w.nodes("personExtendedData", &self.person_extended_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base_data: r.node("baseData")?,
            person_extended_data: r.nodes("personExtendedData")?,
        })
    }
}

/// Root of an eCH-0099 document.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsDelivery {
    pub delivery_header: HeaderV4,
    pub reported_person: Vec<StatisticsPerson>,
    pub general_data: Vec<Data>,
}

static STATISTICS_DELIVERY: NodeSchema = NodeSchema {
    type_name: "delivery",
    namespace: ECH_0099,
    slots: &[
        FieldSlot::node("deliveryHeader"),
        FieldSlot::node("reportedPerson").at_least_one(),
        FieldSlot::node("generalData").repeated(),
    ],
};

impl WireNode for StatisticsDelivery {
    fn schema() -> &'static NodeSchema {
        &STATISTICS_DELIVERY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.attribute("version", &DELIVERY_VERSION.to_string());
        w.node("deliveryHeader", &self.delivery_header)?;
        w.nodes("reportedPerson", &self.reported_person)?;
        w.nodes("generalData", &self.general_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        let version = r.attribute("version")?;
        if version != DELIVERY_VERSION {
            return Err(WireError::constraint(
                format!("{}/@version", r.path()),
                format!("expected {DELIVERY_VERSION:?}, found {version:?}"),
            ));
        }
        Ok(Self {
            delivery_header: r.node("deliveryHeader")?,
            reported_person: r.nodes("reportedPerson")?,
            general_data: r.nodes("generalData")?,
        })
    }
}

impl WireRoot for StatisticsDelivery {
    const ROOT: &'static str = "delivery";
}

#[cfg(test)]
mod tests {
    use super::*;
    use ech_wire::{Element, decode_node};

    #[test]
    fn test_data_lengths() {
        assert!(DataField::new("").is_err());
        assert!(DataValue::new("x".repeat(1000)).is_ok());
        assert!(DataValue::new("x".repeat(1001)).is_err());
    }

    #[test]
    fn test_version_attribute_required() {
        let root = Element::new(ECH_0099, "delivery");
        let err = decode_node::<StatisticsDelivery>(&root).unwrap_err();
        assert_eq!(err, WireError::missing("delivery/@version"));

        let root = Element::new(ECH_0099, "delivery").with_attribute("version", "2.0");
        let err = decode_node::<StatisticsDelivery>(&root).unwrap_err();
        assert!(matches!(err, WireError::ConstraintViolation { ref path, .. } if path == "delivery/@version"));
    }
}
