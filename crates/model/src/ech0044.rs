//! eCH-0044 v4: person identification.

use chrono::NaiveDate;
use ech_wire::{
    ChoiceArm, ChoiceGroup, ChoiceSchema, FieldReader, FieldSlot, FieldWriter, NodeSchema, Result,
    WireNode, Year, YearMonth, wire_string,
};

use crate::codes::Sex;
use crate::namespaces::ECH_0044;

wire_string! {
    /// AHV-13 social security number.
    pub struct Vn { min: 13, max: 13, pattern: r"756\d{10}" }
}

wire_string! {
    /// `baseNameType`: official, first and original names.
    pub struct BaseName { min: 1, max: 100 }
}

wire_string! {
    pub struct PersonIdCategory { min: 1, max: 20 }
}

wire_string! {
    pub struct PersonIdValue { min: 1, max: 36 }
}

/// `namedPersonIdType`: an identifier qualified by the register issuing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPersonId {
    pub category: PersonIdCategory,
    pub id: PersonIdValue,
}

static NAMED_PERSON_ID: NodeSchema = NodeSchema {
    type_name: "namedPersonIdType",
    namespace: ECH_0044,
    slots: &[
        FieldSlot::value("personIdCategory"),
        FieldSlot::value("personId"),
    ],
};

impl WireNode for NamedPersonId {
    fn schema() -> &'static NodeSchema {
        &NAMED_PERSON_ID
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("personIdCategory", &self.category)?;
        w.value("personId", &self.id)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            category: r.value("personIdCategory")?,
            id: r.value("personId")?,
        })
    }
}

/// `datePartiallyKnownType`: a full date, or only the month or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePartiallyKnown {
    YearMonthDay(NaiveDate),
    YearMonth(YearMonth),
    Year(Year),
}

static DATE_PARTIALLY_KNOWN: ChoiceSchema = ChoiceSchema {
    group: "datePartiallyKnown",
    arms: &[
        ChoiceArm {
            name: "yearMonthDay",
            slots: &[FieldSlot::value("yearMonthDay")],
        },
        ChoiceArm {
            name: "yearMonth",
            slots: &[FieldSlot::value("yearMonth")],
        },
        ChoiceArm {
            name: "year",
            slots: &[FieldSlot::value("year")],
        },
    ],
};

static DATE_PARTIALLY_KNOWN_TYPE: NodeSchema = NodeSchema {
    type_name: "datePartiallyKnownType",
    namespace: ECH_0044,
    slots: &[FieldSlot::choice(&DATE_PARTIALLY_KNOWN)],
};

impl ChoiceGroup for DatePartiallyKnown {
    fn schema() -> &'static ChoiceSchema {
        &DATE_PARTIALLY_KNOWN
    }

    fn arm_name(&self) -> &'static str {
        match self {
            DatePartiallyKnown::YearMonthDay(_) => "yearMonthDay",
            DatePartiallyKnown::YearMonth(_) => "yearMonth",
            DatePartiallyKnown::Year(_) => "year",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            DatePartiallyKnown::YearMonthDay(date) => w.value("yearMonthDay", date),
            DatePartiallyKnown::YearMonth(month) => w.value("yearMonth", month),
            DatePartiallyKnown::Year(year) => w.value("year", year),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "yearMonthDay" => Ok(DatePartiallyKnown::YearMonthDay(r.value("yearMonthDay")?)),
            "yearMonth" => Ok(DatePartiallyKnown::YearMonth(r.value("yearMonth")?)),
            _ => Ok(DatePartiallyKnown::Year(r.value("year")?)),
        }
    }
}

// The type is also used as an element of its own, e.g. `dateOfBirth`.
impl WireNode for DatePartiallyKnown {
    fn schema() -> &'static NodeSchema {
        &DATE_PARTIALLY_KNOWN_TYPE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(self)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        r.choice()
    }
}

/// `personIdentificationType`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonIdentification {
    pub vn: Option<Vn>,
    pub local_person_id: NamedPersonId,
    pub other_person_id: Vec<NamedPersonId>,
    pub eu_person_id: Vec<NamedPersonId>,
    pub official_name: BaseName,
    pub first_name: BaseName,
    pub original_name: Option<BaseName>,
    pub sex: Sex,
    pub date_of_birth: DatePartiallyKnown,
}

static PERSON_IDENTIFICATION: NodeSchema = NodeSchema {
    type_name: "personIdentificationType",
    namespace: ECH_0044,
    slots: &[
        FieldSlot::value("vn").optional(),
        FieldSlot::node("localPersonId"),
        FieldSlot::node("otherPersonId").repeated(),
        FieldSlot::node("euPersonId").repeated(),
        FieldSlot::value("officialName"),
        FieldSlot::value("firstName"),
        FieldSlot::value("originalName").optional(),
        FieldSlot::value("sex"),
        FieldSlot::node("dateOfBirth"),
    ],
};

impl WireNode for PersonIdentification {
    fn schema() -> &'static NodeSchema {
        &PERSON_IDENTIFICATION
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("vn", &self.vn)?;
        w.node("localPersonId", &self.local_person_id)?;
        w.nodes("otherPersonId", &self.other_person_id)?;
        w.nodes("euPersonId", &self.eu_person_id)?;
        w.value("officialName", &self.official_name)?;
        w.value("firstName", &self.first_name)?;
        w.opt_value("originalName", &self.original_name)?;
        w.value("sex", &self.sex)?;
        w.node("dateOfBirth", &self.date_of_birth)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            vn: r.opt_value("vn")?,
            local_person_id: r.node("localPersonId")?,
            other_person_id: r.nodes("otherPersonId")?,
            eu_person_id: r.nodes("euPersonId")?,
            official_name: r.value("officialName")?,
            first_name: r.value("firstName")?,
            original_name: r.opt_value("originalName")?,
            sex: r.value("sex")?,
            date_of_birth: r.node("dateOfBirth")?,
        })
    }
}

/// `personIdentificationLightType`: names are required, everything else
/// may be unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonIdentificationLight {
    pub vn: Option<Vn>,
    pub local_person_id: Option<NamedPersonId>,
    pub other_person_id: Vec<NamedPersonId>,
    pub official_name: BaseName,
    pub first_name: BaseName,
    pub original_name: Option<BaseName>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<DatePartiallyKnown>,
}

static PERSON_IDENTIFICATION_LIGHT: NodeSchema = NodeSchema {
    type_name: "personIdentificationLightType",
    namespace: ECH_0044,
    slots: &[
        FieldSlot::value("vn").optional(),
        FieldSlot::node("localPersonId").optional(),
        FieldSlot::node("otherPersonId").repeated(),
        FieldSlot::value("officialName"),
        FieldSlot::value("firstName"),
        FieldSlot::value("originalName").optional(),
        FieldSlot::value("sex").optional(),
        FieldSlot::node("dateOfBirth").optional(),
    ],
};

impl WireNode for PersonIdentificationLight {
    fn schema() -> &'static NodeSchema {
        &PERSON_IDENTIFICATION_LIGHT
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("vn", &self.vn)?;
        w.opt_node("localPersonId", &self.local_person_id)?;
        w.nodes("otherPersonId", &self.other_person_id)?;
        w.value("officialName", &self.official_name)?;
        w.value("firstName", &self.first_name)?;
        w.opt_value("originalName", &self.original_name)?;
        w.opt_value("sex", &self.sex)?;
        w.opt_node("dateOfBirth", &self.date_of_birth)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            vn: r.opt_value("vn")?,
            local_person_id: r.opt_node("localPersonId")?,
            other_person_id: r.nodes("otherPersonId")?,
            official_name: r.value("officialName")?,
            first_name: r.value("firstName")?,
            original_name: r.opt_value("originalName")?,
            sex: r.opt_value("sex")?,
            date_of_birth: r.opt_node("dateOfBirth")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::ECH_0020;
    use ech_wire::{Element, WireError, decode_node, encode_node};

    fn sample() -> PersonIdentification {
        PersonIdentification {
            vn: Some(Vn::new("7561234567897").unwrap()),
            local_person_id: NamedPersonId {
                category: PersonIdCategory::new("MU.6172").unwrap(),
                id: PersonIdValue::new("4711").unwrap(),
            },
            other_person_id: Vec::new(),
            eu_person_id: Vec::new(),
            official_name: BaseName::new("Müller").unwrap(),
            first_name: BaseName::new("Anna").unwrap(),
            original_name: None,
            sex: Sex::Female,
            date_of_birth: DatePartiallyKnown::YearMonth(YearMonth::new(1980, 4).unwrap()),
        }
    }

    #[test]
    fn test_wrapper_and_content_namespaces() -> Result<()> {
        let element = encode_node(&sample(), ECH_0020, "personIdentification")?;
        assert!(element.is(&ECH_0020, "personIdentification"));
        let name = element.child("officialName").unwrap();
        assert!(name.is(&ECH_0044, "officialName"));
        assert_eq!(element.text_at(&["dateOfBirth", "yearMonth"]), Some("1980-04"));
        assert_eq!(element.text_at(&["localPersonId", "personId"]), Some("4711"));
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let element = encode_node(&sample(), ECH_0020, "personIdentification")?;
        assert_eq!(decode_node::<PersonIdentification>(&element)?, sample());
        Ok(())
    }

    #[test]
    fn test_missing_first_name_reports_path() -> Result<()> {
        let mut element = encode_node(&sample(), ECH_0020, "personIdentification")?;
        element.children.retain(|c| c.name != "firstName");
        let err = decode_node::<PersonIdentification>(&element).unwrap_err();
        assert_eq!(err, WireError::missing("personIdentification/firstName"));
        Ok(())
    }

    #[test]
    fn test_date_with_two_precisions_rejected() {
        let element = Element::new(ECH_0044, "dateOfBirth")
            .with_child(Element::new(ECH_0044, "yearMonthDay").with_text("1980-04-01"))
            .with_child(Element::new(ECH_0044, "year").with_text("1980"));
        let err = decode_node::<DatePartiallyKnown>(&element).unwrap_err();
        assert!(matches!(err, WireError::ChoiceViolation { .. }));
    }

    #[test]
    fn test_vn_pattern() {
        assert!(Vn::new("7561234567897").is_ok());
        assert!(Vn::new("7571234567897").is_err());
        assert!(Vn::new("756123456789").is_err());
    }
}
