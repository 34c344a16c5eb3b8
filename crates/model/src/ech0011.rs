//! eCH-0011 v8: person data.
//!
//! Most types here embed other standards: `swissTown` wraps eCH-0007
//! content, `country` wraps eCH-0008, `dateOfBirth` and the identification
//! elements wrap eCH-0044, and the address elements wrap eCH-0010. The
//! wrapping element itself is always in the eCH-0011 namespace.

use chrono::NaiveDate;
use ech_wire::{
    ChoiceArm, ChoiceGroup, ChoiceSchema, FieldReader, FieldSlot, FieldWriter, NodeSchema, Result,
    WireError, WireNode, wire_number, wire_string,
};

use crate::codes::{
    CancelationReason, Canton, Language, MaritalStatus, NationalityStatus, Religion,
    ResidencePermit, Separation, Sex, TypeOfHousehold,
};
use crate::ech0007::{HistoryMunicipalityId, SwissMunicipality};
use crate::ech0008::Country;
use crate::ech0010::{AddressInformation, MailAddress, SwissAddressInformation};
use crate::ech0044::{
    BaseName, DatePartiallyKnown, NamedPersonId, PersonIdentification, PersonIdentificationLight,
};
use crate::namespaces::ECH_0011;

wire_string! {
    /// Town name abroad.
    pub struct PlaceName { min: 1, max: 100 }
}

wire_string! {
    pub struct OriginName { min: 1, max: 50 }
}

wire_string! {
    pub struct HouseholdId { min: 1, max: 100 }
}

wire_number! {
    /// Federal building identifier.
    pub struct Egid(u32) { min: 1, max: 999_999_999 }
}

wire_number! {
    /// Federal dwelling identifier, unique within a building.
    pub struct Ewid(u16) { min: 1, max: 999 }
}

/// Text of the `unknown` place marker.
const UNKNOWN_PLACE: &str = "0";

/// `foreignerNameType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignerName {
    pub name: Option<BaseName>,
    pub first_name: Option<BaseName>,
}

static FOREIGNER_NAME: NodeSchema = NodeSchema {
    type_name: "foreignerNameType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("name").optional(),
        FieldSlot::value("firstName").optional(),
    ],
};

impl WireNode for ForeignerName {
    fn schema() -> &'static NodeSchema {
        &FOREIGNER_NAME
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("name", &self.name)?;
        w.opt_value("firstName", &self.first_name)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            name: r.opt_value("name")?,
            first_name: r.opt_value("firstName")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForeignName {
    NameOnForeignPassport(ForeignerName),
    DeclaredForeignName(ForeignerName),
}

static FOREIGN_NAME: ChoiceSchema = ChoiceSchema {
    group: "foreignName",
    arms: &[
        ChoiceArm {
            name: "nameOnForeignPassport",
            slots: &[FieldSlot::node("nameOnForeignPassport")],
        },
        ChoiceArm {
            name: "declaredForeignName",
            slots: &[FieldSlot::node("declaredForeignName")],
        },
    ],
};

impl ChoiceGroup for ForeignName {
    fn schema() -> &'static ChoiceSchema {
        &FOREIGN_NAME
    }

    fn arm_name(&self) -> &'static str {
        match self {
            ForeignName::NameOnForeignPassport(_) => "nameOnForeignPassport",
            ForeignName::DeclaredForeignName(_) => "declaredForeignName",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            ForeignName::NameOnForeignPassport(name) => w.node("nameOnForeignPassport", name),
            ForeignName::DeclaredForeignName(name) => w.node("declaredForeignName", name),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "nameOnForeignPassport" => Ok(ForeignName::NameOnForeignPassport(
                r.node("nameOnForeignPassport")?,
            )),
            _ => Ok(ForeignName::DeclaredForeignName(r.node("declaredForeignName")?)),
        }
    }
}

/// `nameDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameData {
    pub official_name: BaseName,
    pub first_name: BaseName,
    pub original_name: Option<BaseName>,
    pub alliance_name: Option<BaseName>,
    pub alias_name: Option<BaseName>,
    pub other_name: Option<BaseName>,
    pub call_name: Option<BaseName>,
    pub foreign_name: Option<ForeignName>,
}

static NAME_DATA: NodeSchema = NodeSchema {
    type_name: "nameDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("officialName"),
        FieldSlot::value("firstName"),
        FieldSlot::value("originalName").optional(),
        FieldSlot::value("allianceName").optional(),
        FieldSlot::value("aliasName").optional(),
        FieldSlot::value("otherName").optional(),
        FieldSlot::value("callName").optional(),
        FieldSlot::choice(&FOREIGN_NAME).optional(),
    ],
};

impl WireNode for NameData {
    fn schema() -> &'static NodeSchema {
        &NAME_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("officialName", &self.official_name)?;
        w.value("firstName", &self.first_name)?;
        w.opt_value("originalName", &self.original_name)?;
        w.opt_value("allianceName", &self.alliance_name)?;
        w.opt_value("aliasName", &self.alias_name)?;
        w.opt_value("otherName", &self.other_name)?;
        w.opt_value("callName", &self.call_name)?;
        w.opt_choice(&self.foreign_name)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            official_name: r.value("officialName")?,
            first_name: r.value("firstName")?,
            original_name: r.opt_value("originalName")?,
            alliance_name: r.opt_value("allianceName")?,
            alias_name: r.opt_value("aliasName")?,
            other_name: r.opt_value("otherName")?,
            call_name: r.opt_value("callName")?,
            foreign_name: r.opt_choice()?,
        })
    }
}

/// `foreignCountry` arm of a general place.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignCountry {
    pub country: Country,
    pub town: Option<PlaceName>,
}

static FOREIGN_COUNTRY: NodeSchema = NodeSchema {
    type_name: "foreignCountryType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("country"),
        FieldSlot::value("town").optional(),
    ],
};

impl WireNode for ForeignCountry {
    fn schema() -> &'static NodeSchema {
        &FOREIGN_COUNTRY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("country", &self.country)?;
        w.opt_value("town", &self.town)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            country: r.node("country")?,
            town: r.opt_value("town")?,
        })
    }
}

/// `generalPlaceType`: unknown, a Swiss municipality, or a place abroad.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneralPlace {
    Unknown,
    SwissTown(SwissMunicipality),
    ForeignCountry(ForeignCountry),
}

static GENERAL_PLACE: ChoiceSchema = ChoiceSchema {
    group: "generalPlace",
    arms: &[
        ChoiceArm {
            name: "unknown",
            slots: &[FieldSlot::value("unknown")],
        },
        ChoiceArm {
            name: "swissTown",
            slots: &[FieldSlot::node("swissTown")],
        },
        ChoiceArm {
            name: "foreignCountry",
            slots: &[FieldSlot::node("foreignCountry")],
        },
    ],
};

static GENERAL_PLACE_TYPE: NodeSchema = NodeSchema {
    type_name: "generalPlaceType",
    namespace: ECH_0011,
    slots: &[FieldSlot::choice(&GENERAL_PLACE)],
};

impl ChoiceGroup for GeneralPlace {
    fn schema() -> &'static ChoiceSchema {
        &GENERAL_PLACE
    }

    fn arm_name(&self) -> &'static str {
        match self {
            GeneralPlace::Unknown => "unknown",
            GeneralPlace::SwissTown(_) => "swissTown",
            GeneralPlace::ForeignCountry(_) => "foreignCountry",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            GeneralPlace::Unknown => w.value("unknown", &UNKNOWN_PLACE.to_string()),
            GeneralPlace::SwissTown(town) => w.node("swissTown", town),
            GeneralPlace::ForeignCountry(foreign) => w.node("foreignCountry", foreign),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "unknown" => {
                let marker: String = r.value("unknown")?;
                if marker != UNKNOWN_PLACE {
                    return Err(WireError::constraint(
                        r.child_path("unknown"),
                        format!("expected {UNKNOWN_PLACE:?}, found {marker:?}"),
                    ));
                }
                Ok(GeneralPlace::Unknown)
            }
            "swissTown" => Ok(GeneralPlace::SwissTown(r.node("swissTown")?)),
            _ => Ok(GeneralPlace::ForeignCountry(r.node("foreignCountry")?)),
        }
    }
}

impl WireNode for GeneralPlace {
    fn schema() -> &'static NodeSchema {
        &GENERAL_PLACE_TYPE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(self)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        r.choice()
    }
}

/// `birthDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthData {
    pub date_of_birth: DatePartiallyKnown,
    pub place_of_birth: GeneralPlace,
    pub sex: Sex,
}

static BIRTH_DATA: NodeSchema = NodeSchema {
    type_name: "birthDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("dateOfBirth"),
        FieldSlot::node("placeOfBirth"),
        FieldSlot::value("sex"),
    ],
};

impl WireNode for BirthData {
    fn schema() -> &'static NodeSchema {
        &BIRTH_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("dateOfBirth", &self.date_of_birth)?;
        w.node("placeOfBirth", &self.place_of_birth)?;
        w.value("sex", &self.sex)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            date_of_birth: r.node("dateOfBirth")?,
            place_of_birth: r.node("placeOfBirth")?,
            sex: r.value("sex")?,
        })
    }
}

/// `religionDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReligionData {
    pub religion: Religion,
    pub religion_valid_from: Option<NaiveDate>,
}

static RELIGION_DATA: NodeSchema = NodeSchema {
    type_name: "religionDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("religion"),
        FieldSlot::value("religionValidFrom").optional(),
    ],
};

impl WireNode for ReligionData {
    fn schema() -> &'static NodeSchema {
        &RELIGION_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("religion", &self.religion)?;
        w.opt_value("religionValidFrom", &self.religion_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            religion: r.value("religion")?,
            religion_valid_from: r.opt_value("religionValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeparationData {
    pub separation: Option<Separation>,
    pub separation_valid_from: Option<NaiveDate>,
    pub separation_valid_till: Option<NaiveDate>,
}

static SEPARATION_DATA: NodeSchema = NodeSchema {
    type_name: "separationDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("separation").optional(),
        FieldSlot::value("separationValidFrom").optional(),
        FieldSlot::value("separationValidTill").optional(),
    ],
};

impl WireNode for SeparationData {
    fn schema() -> &'static NodeSchema {
        &SEPARATION_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("separation", &self.separation)?;
        w.opt_value("separationValidFrom", &self.separation_valid_from)?;
        w.opt_value("separationValidTill", &self.separation_valid_till)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            separation: r.opt_value("separation")?,
            separation_valid_from: r.opt_value("separationValidFrom")?,
            separation_valid_till: r.opt_value("separationValidTill")?,
        })
    }
}

/// `maritalDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaritalData {
    pub marital_status: MaritalStatus,
    pub date_of_marital_status: Option<NaiveDate>,
    pub cancelation_reason: Option<CancelationReason>,
    pub official_proof_of_marital_status: Option<bool>,
    pub separation_data: Option<SeparationData>,
}

static MARITAL_DATA: NodeSchema = NodeSchema {
    type_name: "maritalDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("maritalStatus"),
        FieldSlot::value("dateOfMaritalStatus").optional(),
        FieldSlot::value("cancelationReason").optional(),
        FieldSlot::value("officialProofOfMaritalStatusYesNo").optional(),
        FieldSlot::node("separationData").optional(),
    ],
};

impl WireNode for MaritalData {
    fn schema() -> &'static NodeSchema {
        &MARITAL_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("maritalStatus", &self.marital_status)?;
        w.opt_value("dateOfMaritalStatus", &self.date_of_marital_status)?;
        w.opt_value("cancelationReason", &self.cancelation_reason)?;
        w.opt_value(
            "officialProofOfMaritalStatusYesNo",
            &self.official_proof_of_marital_status,
        )?;
        w.opt_node("separationData", &self.separation_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            marital_status: r.value("maritalStatus")?,
            date_of_marital_status: r.opt_value("dateOfMaritalStatus")?,
            cancelation_reason: r.opt_value("cancelationReason")?,
            official_proof_of_marital_status: r.opt_value("officialProofOfMaritalStatusYesNo")?,
            separation_data: r.opt_node("separationData")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfo {
    pub country: Country,
    pub nationality_valid_from: Option<NaiveDate>,
}

static COUNTRY_INFO: NodeSchema = NodeSchema {
    type_name: "countryInfoType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("country"),
        FieldSlot::value("nationalityValidFrom").optional(),
    ],
};

impl WireNode for CountryInfo {
    fn schema() -> &'static NodeSchema {
        &COUNTRY_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("country", &self.country)?;
        w.opt_value("nationalityValidFrom", &self.nationality_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            country: r.node("country")?,
            nationality_valid_from: r.opt_value("nationalityValidFrom")?,
        })
    }
}

/// `nationalityDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct NationalityData {
    pub nationality_status: NationalityStatus,
    pub country_info: Vec<CountryInfo>,
}

static NATIONALITY_DATA: NodeSchema = NodeSchema {
    type_name: "nationalityDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("nationalityStatus"),
        FieldSlot::node("countryInfo").repeated(),
    ],
};

impl WireNode for NationalityData {
    fn schema() -> &'static NodeSchema {
        &NATIONALITY_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("nationalityStatus", &self.nationality_status)?;
        w.nodes("countryInfo", &self.country_info)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            nationality_status: r.value("nationalityStatus")?,
            country_info: r.nodes("countryInfo")?,
        })
    }
}

/// `placeOfOriginType`: a Swiss citizen's municipality of citizenship.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOfOrigin {
    pub origin_name: OriginName,
    pub canton: Canton,
    pub place_of_origin_id: Option<u32>,
    pub history_municipality_id: Option<HistoryMunicipalityId>,
}

static PLACE_OF_ORIGIN: NodeSchema = NodeSchema {
    type_name: "placeOfOriginType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("originName"),
        FieldSlot::value("canton"),
        FieldSlot::value("placeOfOriginId").optional(),
        FieldSlot::value("historyMunicipalityId").optional(),
    ],
};

impl WireNode for PlaceOfOrigin {
    fn schema() -> &'static NodeSchema {
        &PLACE_OF_ORIGIN
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("originName", &self.origin_name)?;
        w.value("canton", &self.canton)?;
        w.opt_value("placeOfOriginId", &self.place_of_origin_id)?;
        w.opt_value("historyMunicipalityId", &self.history_municipality_id)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            origin_name: r.value("originName")?,
            canton: r.value("canton")?,
            place_of_origin_id: r.opt_value("placeOfOriginId")?,
            history_municipality_id: r.opt_value("historyMunicipalityId")?,
        })
    }
}

/// `residencePermitDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidencePermitData {
    pub residence_permit: ResidencePermit,
    pub residence_permit_valid_from: Option<NaiveDate>,
    pub residence_permit_valid_till: Option<NaiveDate>,
    pub entry_date: Option<NaiveDate>,
}

static RESIDENCE_PERMIT_DATA: NodeSchema = NodeSchema {
    type_name: "residencePermitDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("residencePermit"),
        FieldSlot::value("residencePermitValidFrom").optional(),
        FieldSlot::value("residencePermitValidTill").optional(),
        FieldSlot::value("entryDate").optional(),
    ],
};

impl WireNode for ResidencePermitData {
    fn schema() -> &'static NodeSchema {
        &RESIDENCE_PERMIT_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("residencePermit", &self.residence_permit)?;
        w.opt_value("residencePermitValidFrom", &self.residence_permit_valid_from)?;
        w.opt_value("residencePermitValidTill", &self.residence_permit_valid_till)?;
        w.opt_value("entryDate", &self.entry_date)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            residence_permit: r.value("residencePermit")?,
            residence_permit_valid_from: r.opt_value("residencePermitValidFrom")?,
            residence_permit_valid_till: r.opt_value("residencePermitValidTill")?,
            entry_date: r.opt_value("entryDate")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathPeriod {
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
}

static DEATH_PERIOD: NodeSchema = NodeSchema {
    type_name: "deathPeriodType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("dateFrom"),
        FieldSlot::value("dateTo").optional(),
    ],
};

impl WireNode for DeathPeriod {
    fn schema() -> &'static NodeSchema {
        &DEATH_PERIOD
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("dateFrom", &self.date_from)?;
        w.opt_value("dateTo", &self.date_to)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            date_from: r.value("dateFrom")?,
            date_to: r.opt_value("dateTo")?,
        })
    }
}

/// `deathDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathData {
    pub death_period: DeathPeriod,
    pub place_of_death: Option<GeneralPlace>,
}

static DEATH_DATA: NodeSchema = NodeSchema {
    type_name: "deathDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("deathPeriod"),
        FieldSlot::node("placeOfDeath").optional(),
    ],
};

impl WireNode for DeathData {
    fn schema() -> &'static NodeSchema {
        &DEATH_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("deathPeriod", &self.death_period)?;
        w.opt_node("placeOfDeath", &self.place_of_death)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            death_period: r.node("deathPeriod")?,
            place_of_death: r.opt_node("placeOfDeath")?,
        })
    }
}

/// `partnerIdOrganisationType`: an organisation known only by register ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerIdOrganisation {
    pub local_person_id: NamedPersonId,
    pub other_person_id: Vec<NamedPersonId>,
}

static PARTNER_ID_ORGANISATION: NodeSchema = NodeSchema {
    type_name: "partnerIdOrganisationType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("localPersonId"),
        FieldSlot::node("otherPersonId").repeated(),
    ],
};

impl WireNode for PartnerIdOrganisation {
    fn schema() -> &'static NodeSchema {
        &PARTNER_ID_ORGANISATION
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("localPersonId", &self.local_person_id)?;
        w.nodes("otherPersonId", &self.other_person_id)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            local_person_id: r.node("localPersonId")?,
            other_person_id: r.nodes("otherPersonId")?,
        })
    }
}

/// Who a contact address belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactPartner {
    Person(PersonIdentification),
    PersonPartner(PersonIdentificationLight),
    Organisation(PartnerIdOrganisation),
}

pub(crate) static CONTACT_PARTNER: ChoiceSchema = ChoiceSchema {
    group: "contactPartner",
    arms: &[
        ChoiceArm {
            name: "personIdentification",
            slots: &[FieldSlot::node("personIdentification")],
        },
        ChoiceArm {
            name: "personIdentificationPartner",
            slots: &[FieldSlot::node("personIdentificationPartner")],
        },
        ChoiceArm {
            name: "partnerIdOrganisation",
            slots: &[FieldSlot::node("partnerIdOrganisation")],
        },
    ],
};

impl ChoiceGroup for ContactPartner {
    fn schema() -> &'static ChoiceSchema {
        &CONTACT_PARTNER
    }

    fn arm_name(&self) -> &'static str {
        match self {
            ContactPartner::Person(_) => "personIdentification",
            ContactPartner::PersonPartner(_) => "personIdentificationPartner",
            ContactPartner::Organisation(_) => "partnerIdOrganisation",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            ContactPartner::Person(person) => w.node("personIdentification", person),
            ContactPartner::PersonPartner(person) => w.node("personIdentificationPartner", person),
            ContactPartner::Organisation(org) => w.node("partnerIdOrganisation", org),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "personIdentification" => Ok(ContactPartner::Person(r.node("personIdentification")?)),
            "personIdentificationPartner" => Ok(ContactPartner::PersonPartner(
                r.node("personIdentificationPartner")?,
            )),
            _ => Ok(ContactPartner::Organisation(r.node("partnerIdOrganisation")?)),
        }
    }
}

/// `contactDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactData {
    pub partner: Option<ContactPartner>,
    pub contact_address: MailAddress,
    pub contact_valid_from: Option<NaiveDate>,
    pub contact_valid_till: Option<NaiveDate>,
}

static CONTACT_DATA: NodeSchema = NodeSchema {
    type_name: "contactDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::choice(&CONTACT_PARTNER).optional(),
        FieldSlot::node("contactAddress"),
        FieldSlot::value("contactValidFrom").optional(),
        FieldSlot::value("contactValidTill").optional(),
    ],
};

impl WireNode for ContactData {
    fn schema() -> &'static NodeSchema {
        &CONTACT_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_choice(&self.partner)?;
        w.node("contactAddress", &self.contact_address)?;
        w.opt_value("contactValidFrom", &self.contact_valid_from)?;
        w.opt_value("contactValidTill", &self.contact_valid_till)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            partner: r.opt_choice()?,
            contact_address: r.node("contactAddress")?,
            contact_valid_from: r.opt_value("contactValidFrom")?,
            contact_valid_till: r.opt_value("contactValidTill")?,
        })
    }
}

/// `destinationType`: where a person came from or moved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub place: GeneralPlace,
    pub mail_address: Option<AddressInformation>,
}

static DESTINATION: NodeSchema = NodeSchema {
    type_name: "destinationType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::choice(&GENERAL_PLACE),
        FieldSlot::node("mailAddress").optional(),
    ],
};

impl WireNode for Destination {
    fn schema() -> &'static NodeSchema {
        &DESTINATION
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.place)?;
        w.opt_node("mailAddress", &self.mail_address)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            place: r.choice()?,
            mail_address: r.opt_node("mailAddress")?,
        })
    }
}

/// `dwellingAddressType`.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellingAddress {
    pub egid: Option<Egid>,
    pub ewid: Option<Ewid>,
    pub household_id: Option<HouseholdId>,
    pub address: SwissAddressInformation,
    pub type_of_household: TypeOfHousehold,
    pub moving_date: Option<NaiveDate>,
}

static DWELLING_ADDRESS: NodeSchema = NodeSchema {
    type_name: "dwellingAddressType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::value("EGID").optional(),
        FieldSlot::value("EWID").optional(),
        FieldSlot::value("householdID").optional(),
        FieldSlot::node("address"),
        FieldSlot::value("typeOfHousehold"),
        FieldSlot::value("movingDate").optional(),
    ],
};

impl WireNode for DwellingAddress {
    fn schema() -> &'static NodeSchema {
        &DWELLING_ADDRESS
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("EGID", &self.egid)?;
        w.opt_value("EWID", &self.ewid)?;
        w.opt_value("householdID", &self.household_id)?;
        w.node("address", &self.address)?;
        w.value("typeOfHousehold", &self.type_of_household)?;
        w.opt_value("movingDate", &self.moving_date)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            egid: r.opt_value("EGID")?,
            ewid: r.opt_value("EWID")?,
            household_id: r.opt_value("householdID")?,
            address: r.node("address")?,
            type_of_household: r.value("typeOfHousehold")?,
            moving_date: r.opt_value("movingDate")?,
        })
    }
}

/// `residenceDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidenceData {
    pub reporting_municipality: SwissMunicipality,
    pub arrival_date: NaiveDate,
    pub comes_from: Option<Destination>,
    pub dwelling_address: DwellingAddress,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<Destination>,
}

static RESIDENCE_DATA: NodeSchema = NodeSchema {
    type_name: "residenceDataType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("reportingMunicipality"),
        FieldSlot::value("arrivalDate"),
        FieldSlot::node("comesFrom").optional(),
        FieldSlot::node("dwellingAddress"),
        FieldSlot::value("departureDate").optional(),
        FieldSlot::node("goesTo").optional(),
    ],
};

impl WireNode for ResidenceData {
    fn schema() -> &'static NodeSchema {
        &RESIDENCE_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("reportingMunicipality", &self.reporting_municipality)?;
        w.value("arrivalDate", &self.arrival_date)?;
        w.opt_node("comesFrom", &self.comes_from)?;
        w.node("dwellingAddress", &self.dwelling_address)?;
        w.opt_value("departureDate", &self.departure_date)?;
        w.opt_node("goesTo", &self.goes_to)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            reporting_municipality: r.node("reportingMunicipality")?,
            arrival_date: r.value("arrivalDate")?,
            comes_from: r.opt_node("comesFrom")?,
            dwelling_address: r.node("dwellingAddress")?,
            departure_date: r.opt_value("departureDate")?,
            goes_to: r.opt_node("goesTo")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainResidence {
    pub main_residence: ResidenceData,
    pub secondary_residence: Vec<SwissMunicipality>,
}

static MAIN_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "mainResidenceType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("mainResidence"),
        FieldSlot::node("secondaryResidence").repeated(),
    ],
};

impl WireNode for MainResidence {
    fn schema() -> &'static NodeSchema {
        &MAIN_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("mainResidence", &self.main_residence)?;
        w.nodes("secondaryResidence", &self.secondary_residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            main_residence: r.node("mainResidence")?,
            secondary_residence: r.nodes("secondaryResidence")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryResidence {
    pub main_residence: SwissMunicipality,
    pub secondary_residence: ResidenceData,
}

static SECONDARY_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "secondaryResidenceType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("mainResidence"),
        FieldSlot::node("secondaryResidence"),
    ],
};

impl WireNode for SecondaryResidence {
    fn schema() -> &'static NodeSchema {
        &SECONDARY_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("mainResidence", &self.main_residence)?;
        w.node("secondaryResidence", &self.secondary_residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            main_residence: r.node("mainResidence")?,
            secondary_residence: r.node("secondaryResidence")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherResidence {
    pub secondary_residence: ResidenceData,
}

static OTHER_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "otherResidenceType",
    namespace: ECH_0011,
    slots: &[FieldSlot::node("secondaryResidence")],
};

impl WireNode for OtherResidence {
    fn schema() -> &'static NodeSchema {
        &OTHER_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("secondaryResidence", &self.secondary_residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            secondary_residence: r.node("secondaryResidence")?,
        })
    }
}

/// Swiss citizens carry places of origin, foreigners a residence permit.
#[derive(Debug, Clone, PartialEq)]
pub enum Citizenship {
    PlacesOfOrigin(Vec<PlaceOfOrigin>),
    ResidencePermit(ResidencePermitData),
}

static CITIZENSHIP: ChoiceSchema = ChoiceSchema {
    group: "citizenship",
    arms: &[
        ChoiceArm {
            name: "placeOfOrigin",
            slots: &[FieldSlot::node("placeOfOrigin").at_least_one()],
        },
        ChoiceArm {
            name: "residencePermit",
            slots: &[FieldSlot::node("residencePermit")],
        },
    ],
};

impl ChoiceGroup for Citizenship {
    fn schema() -> &'static ChoiceSchema {
        &CITIZENSHIP
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Citizenship::PlacesOfOrigin(_) => "placeOfOrigin",
            Citizenship::ResidencePermit(_) => "residencePermit",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Citizenship::PlacesOfOrigin(places) => w.nodes("placeOfOrigin", places),
            Citizenship::ResidencePermit(permit) => w.node("residencePermit", permit),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "placeOfOrigin" => Ok(Citizenship::PlacesOfOrigin(r.nodes("placeOfOrigin")?)),
            _ => Ok(Citizenship::ResidencePermit(r.node("residencePermit")?)),
        }
    }
}

/// `personType`: the complete eCH-0011 person.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub person_identification: PersonIdentification,
    pub name_data: NameData,
    pub birth_data: BirthData,
    pub religion_data: ReligionData,
    pub marital_data: MaritalData,
    pub nationality_data: NationalityData,
    pub death_data: Option<DeathData>,
    pub contact_data: Option<ContactData>,
    pub language_of_correspondance: Option<Language>,
    pub restricted_voting_and_election_right_federation: Option<bool>,
    pub citizenship: Citizenship,
}

static PERSON: NodeSchema = NodeSchema {
    type_name: "personType",
    namespace: ECH_0011,
    slots: &[
        FieldSlot::node("personIdentification"),
        FieldSlot::node("nameData"),
        FieldSlot::node("birthData"),
        FieldSlot::node("religionData"),
        FieldSlot::node("maritalData"),
        FieldSlot::node("nationalityData"),
        FieldSlot::node("deathData").optional(),
        FieldSlot::node("contactData").optional(),
        FieldSlot::value("languageOfCorrespondance").optional(),
        FieldSlot::value("restrictedVotingAndElectionRightFederation").optional(),
        FieldSlot::choice(&CITIZENSHIP),
    ],
};

impl WireNode for Person {
    fn schema() -> &'static NodeSchema {
        &PERSON
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("personIdentification", &self.person_identification)?;
        w.node("nameData", &self.name_data)?;
        w.node("birthData", &self.birth_data)?;
        w.node("religionData", &self.religion_data)?;
        w.node("maritalData", &self.marital_data)?;
        w.node("nationalityData", &self.nationality_data)?;
        w.opt_node("deathData", &self.death_data)?;
        w.opt_node("contactData", &self.contact_data)?;
        w.opt_value("languageOfCorrespondance", &self.language_of_correspondance)?;
        w.opt_value(
            "restrictedVotingAndElectionRightFederation",
            &self.restricted_voting_and_election_right_federation,
        )?;
        w.choice(&self.citizenship)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            person_identification: r.node("personIdentification")?,
            name_data: r.node("nameData")?,
            birth_data: r.node("birthData")?,
            religion_data: r.node("religionData")?,
            marital_data: r.node("maritalData")?,
            nationality_data: r.node("nationalityData")?,
            death_data: r.opt_node("deathData")?,
            contact_data: r.opt_node("contactData")?,
            language_of_correspondance: r.opt_value("languageOfCorrespondance")?,
            restricted_voting_and_election_right_federation: r
                .opt_value("restrictedVotingAndElectionRightFederation")?,
            citizenship: r.choice()?,
        })
    }
}

/// Residence block of a reported person.
#[derive(Debug, Clone, PartialEq)]
pub enum Residence {
    Main(MainResidence),
    Secondary(SecondaryResidence),
    Other(OtherResidence),
}

static RESIDENCE: ChoiceSchema = ChoiceSchema {
    group: "residence",
    arms: &[
        ChoiceArm {
            name: "hasMainResidence",
            slots: &[FieldSlot::node("hasMainResidence")],
        },
        ChoiceArm {
            name: "hasSecondaryResidence",
            slots: &[FieldSlot::node("hasSecondaryResidence")],
        },
        ChoiceArm {
            name: "hasOtherResidence",
            slots: &[FieldSlot::node("hasOtherResidence")],
        },
    ],
};

impl ChoiceGroup for Residence {
    fn schema() -> &'static ChoiceSchema {
        &RESIDENCE
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Residence::Main(_) => "hasMainResidence",
            Residence::Secondary(_) => "hasSecondaryResidence",
            Residence::Other(_) => "hasOtherResidence",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Residence::Main(main) => w.node("hasMainResidence", main),
            Residence::Secondary(secondary) => w.node("hasSecondaryResidence", secondary),
            Residence::Other(other) => w.node("hasOtherResidence", other),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "hasMainResidence" => Ok(Residence::Main(r.node("hasMainResidence")?)),
            "hasSecondaryResidence" => Ok(Residence::Secondary(r.node("hasSecondaryResidence")?)),
            _ => Ok(Residence::Other(r.node("hasOtherResidence")?)),
        }
    }
}

/// `reportedPersonType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPerson {
    pub person: Person,
    pub residence: Residence,
}

static REPORTED_PERSON: NodeSchema = NodeSchema {
    type_name: "reportedPersonType",
    namespace: ECH_0011,
    slots: &[FieldSlot::node("person"), FieldSlot::choice(&RESIDENCE)],
};

impl WireNode for ReportedPerson {
    fn schema() -> &'static NodeSchema {
        &REPORTED_PERSON
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("person", &self.person)?;
        w.choice(&self.residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            person: r.node("person")?,
            residence: r.choice()?,
        })
    }
}
