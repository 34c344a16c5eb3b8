//! eCH-0021 v7: additional person data.
//!
//! Lock data, parent names, occupation and the relationship blocks that
//! eCH-0020 v3 attaches to a base-delivery person. The v8 lock and
//! additional-data types live in [`crate::ech0021_v8`].

use chrono::NaiveDate;
use ech_wire::{
    ChoiceArm, ChoiceGroup, ChoiceSchema, FieldReader, FieldSlot, FieldWriter, FixedDigits,
    NodeSchema, Result, WireNode, wire_string,
};

use crate::codes::{
    Care, DataLock, GuardianMeasureLaw, GuardianRelationshipType, KindOfEmployment, Language,
    MaritalRelationshipType, MrMrs, ParentNameType, ParentalRelationshipType, UidCategory, YesNo,
};
use crate::ech0010::{AddressInformation, MailAddress, OrganisationMailAddress, Title};
use crate::ech0011::{CONTACT_PARTNER, ContactPartner, GeneralPlace};
use crate::ech0044::{BaseName, PersonIdentification, PersonIdentificationLight};
use crate::namespaces::ECH_0021_V7;

wire_string! {
    /// Free text up to 100 characters (employer, job title, insurer).
    pub struct Text100 { min: 1, max: 100 }
}

wire_string! {
    pub struct GuardianRelationshipId { min: 1, max: 36 }
}

/// Nine-digit enterprise number without the `CHE-` formatting.
pub type UidOrganisationId = FixedDigits<9>;

/// `personAdditionalData`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonAdditionalData {
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<Title>,
    pub language_of_correspondance: Option<Language>,
}

pub(crate) const PERSON_ADDITIONAL_DATA_SLOTS: &[FieldSlot] = &[
    FieldSlot::value("mrMrs").optional(),
    FieldSlot::value("title").optional(),
    FieldSlot::value("languageOfCorrespondance").optional(),
];

static PERSON_ADDITIONAL_DATA: NodeSchema = NodeSchema {
    type_name: "personAdditionalData",
    namespace: ECH_0021_V7,
    slots: PERSON_ADDITIONAL_DATA_SLOTS,
};

impl PersonAdditionalData {
    pub(crate) fn write_to(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("mrMrs", &self.mr_mrs)?;
        w.opt_value("title", &self.title)?;
        w.opt_value("languageOfCorrespondance", &self.language_of_correspondance)
    }

    pub(crate) fn read_from(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            mr_mrs: r.opt_value("mrMrs")?,
            title: r.opt_value("title")?,
            language_of_correspondance: r.opt_value("languageOfCorrespondance")?,
        })
    }
}

impl WireNode for PersonAdditionalData {
    fn schema() -> &'static NodeSchema {
        &PERSON_ADDITIONAL_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        self.write_to(w)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Self::read_from(r)
    }
}

/// `lockData` as of v7: data lock is a three-valued code.
#[derive(Debug, Clone, PartialEq)]
pub struct LockData {
    pub data_lock: DataLock,
    pub data_lock_valid_from: Option<NaiveDate>,
    pub data_lock_valid_till: Option<NaiveDate>,
    pub paper_lock: YesNo,
    pub paper_lock_valid_from: Option<NaiveDate>,
    pub paper_lock_valid_till: Option<NaiveDate>,
}

impl Default for LockData {
    fn default() -> Self {
        Self {
            data_lock: DataLock::NoLock,
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
    namespace: ECH_0021_V7,
    slots: &[
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
        w.value("dataLock", &self.data_lock)?;
        w.opt_value("dataLockValidFrom", &self.data_lock_valid_from)?;
        w.opt_value("dataLockValidTill", &self.data_lock_valid_till)?;
        w.value("paperLock", &self.paper_lock)?;
        w.opt_value("paperLockValidFrom", &self.paper_lock_valid_from)?;
        w.opt_value("paperLockValidTill", &self.paper_lock_valid_till)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            data_lock: r.value("dataLock")?,
            data_lock_valid_from: r.opt_value("dataLockValidFrom")?,
            data_lock_valid_till: r.opt_value("dataLockValidTill")?,
            paper_lock: r.value("paperLock")?,
            paper_lock_valid_from: r.opt_value("paperLockValidFrom")?,
            paper_lock_valid_till: r.opt_value("paperLockValidTill")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceOfOriginAddonData {
    pub naturalization_date: Option<NaiveDate>,
    pub expatriation_date: Option<NaiveDate>,
}

static PLACE_OF_ORIGIN_ADDON_DATA: NodeSchema = NodeSchema {
    type_name: "placeOfOriginAddonDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("naturalizationDate").optional(),
        FieldSlot::value("expatriationDate").optional(),
    ],
};

impl WireNode for PlaceOfOriginAddonData {
    fn schema() -> &'static NodeSchema {
        &PLACE_OF_ORIGIN_ADDON_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("naturalizationDate", &self.naturalization_date)?;
        w.opt_value("expatriationDate", &self.expatriation_date)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            naturalization_date: r.opt_value("naturalizationDate")?,
            expatriation_date: r.opt_value("expatriationDate")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaritalDataAddon {
    pub place_of_marriage: Option<GeneralPlace>,
}

static MARITAL_DATA_ADDON: NodeSchema = NodeSchema {
    type_name: "maritalDataAddonType",
    namespace: ECH_0021_V7,
    slots: &[FieldSlot::node("placeOfMarriage").optional()],
};

impl WireNode for MaritalDataAddon {
    fn schema() -> &'static NodeSchema {
        &MARITAL_DATA_ADDON
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_node("placeOfMarriage", &self.place_of_marriage)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            place_of_marriage: r.opt_node("placeOfMarriage")?,
        })
    }
}

/// How much of a parent's name is known.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentName {
    Full {
        first_name: BaseName,
        official_name: BaseName,
    },
    FirstNameOnly(BaseName),
    OfficialNameOnly(BaseName),
}

static PARENT_NAME: ChoiceSchema = ChoiceSchema {
    group: "parentName",
    arms: &[
        ChoiceArm {
            name: "fullName",
            slots: &[FieldSlot::value("firstName"), FieldSlot::value("officialName")],
        },
        ChoiceArm {
            name: "firstNameOnly",
            slots: &[FieldSlot::value("firstNameOnly")],
        },
        ChoiceArm {
            name: "officialNameOnly",
            slots: &[FieldSlot::value("officialNameOnly")],
        },
    ],
};

impl ChoiceGroup for ParentName {
    fn schema() -> &'static ChoiceSchema {
        &PARENT_NAME
    }

    fn arm_name(&self) -> &'static str {
        match self {
            ParentName::Full { .. } => "fullName",
            ParentName::FirstNameOnly(_) => "firstNameOnly",
            ParentName::OfficialNameOnly(_) => "officialNameOnly",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            ParentName::Full {
                first_name,
                official_name,
            } => {
                w.value("firstName", first_name)?;
                w.value("officialName", official_name)
            }
            ParentName::FirstNameOnly(name) => w.value("firstNameOnly", name),
            ParentName::OfficialNameOnly(name) => w.value("officialNameOnly", name),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "fullName" => Ok(ParentName::Full {
                first_name: r.value("firstName")?,
                official_name: r.value("officialName")?,
            }),
            "firstNameOnly" => Ok(ParentName::FirstNameOnly(r.value("firstNameOnly")?)),
            _ => Ok(ParentName::OfficialNameOnly(r.value("officialNameOnly")?)),
        }
    }
}

/// `nameOfParentType`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameOfParent {
    pub name: ParentName,
    pub type_of_relationship: Option<ParentNameType>,
    pub official_proof_of_name_of_parents: Option<bool>,
}

static NAME_OF_PARENT: NodeSchema = NodeSchema {
    type_name: "nameOfParentType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::choice(&PARENT_NAME),
        FieldSlot::value("typeOfRelationship").optional(),
        FieldSlot::value("officialProofOfNameOfParentsYesNo").optional(),
    ],
};

impl WireNode for NameOfParent {
    fn schema() -> &'static NodeSchema {
        &NAME_OF_PARENT
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.name)?;
        w.opt_value("typeOfRelationship", &self.type_of_relationship)?;
        w.opt_value(
            "officialProofOfNameOfParentsYesNo",
            &self.official_proof_of_name_of_parents,
        )
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            name: r.choice()?,
            type_of_relationship: r.opt_value("typeOfRelationship")?,
            official_proof_of_name_of_parents: r.opt_value("officialProofOfNameOfParentsYesNo")?,
        })
    }
}

/// `birthAddonDataType`: at most two parent names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BirthAddonData {
    pub name_of_parent: Vec<NameOfParent>,
}

static BIRTH_ADDON_DATA: NodeSchema = NodeSchema {
    type_name: "birthAddonDataType",
    namespace: ECH_0021_V7,
    slots: &[FieldSlot::node("nameOfParent").bounded(0, Some(2))],
};

impl WireNode for BirthAddonData {
    fn schema() -> &'static NodeSchema {
        &BIRTH_ADDON_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.nodes("nameOfParent", &self.name_of_parent)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            name_of_parent: r.nodes("nameOfParent")?,
        })
    }
}

/// `uidStructureType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uid {
    pub category: UidCategory,
    pub id: UidOrganisationId,
}

static UID: NodeSchema = NodeSchema {
    type_name: "uidStructureType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("uidOrganisationIdCategorie"),
        FieldSlot::value("uidOrganisationId"),
    ],
};

impl WireNode for Uid {
    fn schema() -> &'static NodeSchema {
        &UID
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("uidOrganisationIdCategorie", &self.category)?;
        w.value("uidOrganisationId", &self.id)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            category: r.value("uidOrganisationIdCategorie")?,
            id: r.value("uidOrganisationId")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupationData {
    pub uid: Option<Uid>,
    pub employer: Option<Text100>,
    pub place_of_work: Option<AddressInformation>,
    pub place_of_employer: Option<AddressInformation>,
    pub occupation_valid_from: Option<NaiveDate>,
    pub occupation_valid_till: Option<NaiveDate>,
}

static OCCUPATION_DATA: NodeSchema = NodeSchema {
    type_name: "occupationDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::node("UID").optional(),
        FieldSlot::value("employer").optional(),
        FieldSlot::node("placeOfWork").optional(),
        FieldSlot::node("placeOfEmployer").optional(),
        FieldSlot::value("occupationValidFrom").optional(),
        FieldSlot::value("occupationValidTill").optional(),
    ],
};

impl WireNode for OccupationData {
    fn schema() -> &'static NodeSchema {
        &OCCUPATION_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_node("UID", &self.uid)?;
        w.opt_value("employer", &self.employer)?;
        w.opt_node("placeOfWork", &self.place_of_work)?;
        w.opt_node("placeOfEmployer", &self.place_of_employer)?;
        w.opt_value("occupationValidFrom", &self.occupation_valid_from)?;
        w.opt_value("occupationValidTill", &self.occupation_valid_till)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            uid: r.opt_node("UID")?,
            employer: r.opt_value("employer")?,
            place_of_work: r.opt_node("placeOfWork")?,
            place_of_employer: r.opt_node("placeOfEmployer")?,
            occupation_valid_from: r.opt_value("occupationValidFrom")?,
            occupation_valid_till: r.opt_value("occupationValidTill")?,
        })
    }
}

/// `jobDataType`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobData {
    pub kind_of_employment: KindOfEmployment,
    pub job_title: Option<Text100>,
    pub occupation_data: Vec<OccupationData>,
}

static JOB_DATA: NodeSchema = NodeSchema {
    type_name: "jobDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("kindOfEmployment"),
        FieldSlot::value("jobTitle").optional(),
        FieldSlot::node("occupationData").repeated(),
    ],
};

impl WireNode for JobData {
    fn schema() -> &'static NodeSchema {
        &JOB_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("kindOfEmployment", &self.kind_of_employment)?;
        w.opt_value("jobTitle", &self.job_title)?;
        w.nodes("occupationData", &self.occupation_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            kind_of_employment: r.value("kindOfEmployment")?,
            job_title: r.opt_value("jobTitle")?,
            occupation_data: r.nodes("occupationData")?,
        })
    }
}

/// Identification of a spouse or parent: full or light.
#[derive(Debug, Clone, PartialEq)]
pub enum PartnerIdentification {
    Person(PersonIdentification),
    PersonPartner(PersonIdentificationLight),
}

static PARTNER_IDENTIFICATION: ChoiceSchema = ChoiceSchema {
    group: "partnerIdentification",
    arms: &[
        ChoiceArm {
            name: "personIdentification",
            slots: &[FieldSlot::node("personIdentification")],
        },
        ChoiceArm {
            name: "personIdentificationPartner",
            slots: &[FieldSlot::node("personIdentificationPartner")],
        },
    ],
};

impl ChoiceGroup for PartnerIdentification {
    fn schema() -> &'static ChoiceSchema {
        &PARTNER_IDENTIFICATION
    }

    fn arm_name(&self) -> &'static str {
        match self {
            PartnerIdentification::Person(_) => "personIdentification",
            PartnerIdentification::PersonPartner(_) => "personIdentificationPartner",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            PartnerIdentification::Person(person) => w.node("personIdentification", person),
            PartnerIdentification::PersonPartner(person) => {
                w.node("personIdentificationPartner", person)
            }
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "personIdentification" => Ok(PartnerIdentification::Person(
                r.node("personIdentification")?,
            )),
            _ => Ok(PartnerIdentification::PersonPartner(
                r.node("personIdentificationPartner")?,
            )),
        }
    }
}

/// `partner` of a marital or parental relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub identification: PartnerIdentification,
    pub address: Option<MailAddress>,
}

static PARTNER: NodeSchema = NodeSchema {
    type_name: "partnerType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::choice(&PARTNER_IDENTIFICATION),
        FieldSlot::node("address").optional(),
    ],
};

impl WireNode for Partner {
    fn schema() -> &'static NodeSchema {
        &PARTNER
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.identification)?;
        w.opt_node("address", &self.address)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            identification: r.choice()?,
            address: r.opt_node("address")?,
        })
    }
}

/// `maritalRelationshipType`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaritalRelationship {
    pub partner: Partner,
    pub type_of_relationship: MaritalRelationshipType,
}

static MARITAL_RELATIONSHIP: NodeSchema = NodeSchema {
    type_name: "maritalRelationshipType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::node("partner"),
        FieldSlot::value("typeOfRelationship"),
    ],
};

impl WireNode for MaritalRelationship {
    fn schema() -> &'static NodeSchema {
        &MARITAL_RELATIONSHIP
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("partner", &self.partner)?;
        w.value("typeOfRelationship", &self.type_of_relationship)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            partner: r.node("partner")?,
            type_of_relationship: r.value("typeOfRelationship")?,
        })
    }
}

/// `parentalRelationshipType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentalRelationship {
    pub partner: Partner,
    pub relationship_valid_from: Option<NaiveDate>,
    pub type_of_relationship: ParentalRelationshipType,
    pub care: Care,
}

static PARENTAL_RELATIONSHIP: NodeSchema = NodeSchema {
    type_name: "parentalRelationshipType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::node("partner"),
        FieldSlot::value("relationshipValidFrom").optional(),
        FieldSlot::value("typeOfRelationship"),
        FieldSlot::value("care"),
    ],
};

impl WireNode for ParentalRelationship {
    fn schema() -> &'static NodeSchema {
        &PARENTAL_RELATIONSHIP
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("partner", &self.partner)?;
        w.opt_value("relationshipValidFrom", &self.relationship_valid_from)?;
        w.value("typeOfRelationship", &self.type_of_relationship)?;
        w.value("care", &self.care)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            partner: r.node("partner")?,
            relationship_valid_from: r.opt_value("relationshipValidFrom")?,
            type_of_relationship: r.value("typeOfRelationship")?,
            care: r.value("care")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardianMeasureInfo {
    pub based_on_law: Vec<GuardianMeasureLaw>,
    pub based_on_law_add_on: Option<Text100>,
    pub guardian_measure_valid_from: NaiveDate,
}

static GUARDIAN_MEASURE_INFO: NodeSchema = NodeSchema {
    type_name: "guardianMeasureInfoType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("basedOnLaw").repeated(),
        FieldSlot::value("basedOnLawAddOn").optional(),
        FieldSlot::value("guardianMeasureValidFrom"),
    ],
};

impl WireNode for GuardianMeasureInfo {
    fn schema() -> &'static NodeSchema {
        &GUARDIAN_MEASURE_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.values("basedOnLaw", &self.based_on_law)?;
        w.opt_value("basedOnLawAddOn", &self.based_on_law_add_on)?;
        w.value("guardianMeasureValidFrom", &self.guardian_measure_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            based_on_law: r.values("basedOnLaw")?,
            based_on_law_add_on: r.opt_value("basedOnLawAddOn")?,
            guardian_measure_valid_from: r.value("guardianMeasureValidFrom")?,
        })
    }
}

/// Guardian partner: a person or an organisation known by its register ids.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardianPartner {
    pub identification: ContactPartner,
    pub address: Option<MailAddress>,
}

static GUARDIAN_PARTNER: NodeSchema = NodeSchema {
    type_name: "guardianPartnerType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::choice(&CONTACT_PARTNER),
        FieldSlot::node("address").optional(),
    ],
};

impl WireNode for GuardianPartner {
    fn schema() -> &'static NodeSchema {
        &GUARDIAN_PARTNER
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.identification)?;
        w.opt_node("address", &self.address)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            identification: r.choice()?,
            address: r.opt_node("address")?,
        })
    }
}

/// `guardianRelationshipType`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardianRelationship {
    pub guardian_relationship_id: GuardianRelationshipId,
    pub partner: Option<GuardianPartner>,
    pub type_of_relationship: GuardianRelationshipType,
    pub guardian_measure_info: GuardianMeasureInfo,
    pub care: Option<Care>,
}

static GUARDIAN_RELATIONSHIP: NodeSchema = NodeSchema {
    type_name: "guardianRelationshipType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("guardianRelationshipId"),
        FieldSlot::node("partner").optional(),
        FieldSlot::value("typeOfRelationship"),
        FieldSlot::node("guardianMeasureInfo"),
        FieldSlot::value("care").optional(),
    ],
};

impl WireNode for GuardianRelationship {
    fn schema() -> &'static NodeSchema {
        &GUARDIAN_RELATIONSHIP
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("guardianRelationshipId", &self.guardian_relationship_id)?;
        w.opt_node("partner", &self.partner)?;
        w.value("typeOfRelationship", &self.type_of_relationship)?;
        w.node("guardianMeasureInfo", &self.guardian_measure_info)?;
        w.opt_value("care", &self.care)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            guardian_relationship_id: r.value("guardianRelationshipId")?,
            partner: r.opt_node("partner")?,
            type_of_relationship: r.value("typeOfRelationship")?,
            guardian_measure_info: r.node("guardianMeasureInfo")?,
            care: r.opt_value("care")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArmedForcesData {
    pub armed_forces_service: Option<YesNo>,
    pub armed_forces_liability: Option<YesNo>,
    pub armed_forces_valid_from: Option<NaiveDate>,
}

static ARMED_FORCES_DATA: NodeSchema = NodeSchema {
    type_name: "armedForcesDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("armedForcesService").optional(),
        FieldSlot::value("armedForcesLiability").optional(),
        FieldSlot::value("armedForcesValidFrom").optional(),
    ],
};

impl WireNode for ArmedForcesData {
    fn schema() -> &'static NodeSchema {
        &ARMED_FORCES_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("armedForcesService", &self.armed_forces_service)?;
        w.opt_value("armedForcesLiability", &self.armed_forces_liability)?;
        w.opt_value("armedForcesValidFrom", &self.armed_forces_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            armed_forces_service: r.opt_value("armedForcesService")?,
            armed_forces_liability: r.opt_value("armedForcesLiability")?,
            armed_forces_valid_from: r.opt_value("armedForcesValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CivilDefenseData {
    pub civil_defense: Option<YesNo>,
    pub civil_defense_valid_from: Option<NaiveDate>,
}

static CIVIL_DEFENSE_DATA: NodeSchema = NodeSchema {
    type_name: "civilDefenseDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("civilDefense").optional(),
        FieldSlot::value("civilDefenseValidFrom").optional(),
    ],
};

impl WireNode for CivilDefenseData {
    fn schema() -> &'static NodeSchema {
        &CIVIL_DEFENSE_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("civilDefense", &self.civil_defense)?;
        w.opt_value("civilDefenseValidFrom", &self.civil_defense_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            civil_defense: r.opt_value("civilDefense")?,
            civil_defense_valid_from: r.opt_value("civilDefenseValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireServiceData {
    pub fire_service: Option<YesNo>,
    pub fire_service_liability: Option<YesNo>,
    pub fire_service_valid_from: Option<NaiveDate>,
}

static FIRE_SERVICE_DATA: NodeSchema = NodeSchema {
    type_name: "fireServiceDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("fireService").optional(),
        FieldSlot::value("fireServiceLiability").optional(),
        FieldSlot::value("fireServiceValidFrom").optional(),
    ],
};

impl WireNode for FireServiceData {
    fn schema() -> &'static NodeSchema {
        &FIRE_SERVICE_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("fireService", &self.fire_service)?;
        w.opt_value("fireServiceLiability", &self.fire_service_liability)?;
        w.opt_value("fireServiceValidFrom", &self.fire_service_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            fire_service: r.opt_value("fireService")?,
            fire_service_liability: r.opt_value("fireServiceLiability")?,
            fire_service_valid_from: r.opt_value("fireServiceValidFrom")?,
        })
    }
}

/// The insurer, by name or by postal address.
#[derive(Debug, Clone, PartialEq)]
pub enum Insurance {
    Name(Text100),
    Address(OrganisationMailAddress),
}

static INSURANCE: ChoiceSchema = ChoiceSchema {
    group: "insurance",
    arms: &[
        ChoiceArm {
            name: "insuranceName",
            slots: &[FieldSlot::value("insuranceName")],
        },
        ChoiceArm {
            name: "insuranceAddress",
            slots: &[FieldSlot::node("insuranceAddress")],
        },
    ],
};

impl ChoiceGroup for Insurance {
    fn schema() -> &'static ChoiceSchema {
        &INSURANCE
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Insurance::Name(_) => "insuranceName",
            Insurance::Address(_) => "insuranceAddress",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Insurance::Name(name) => w.value("insuranceName", name),
            Insurance::Address(address) => w.node("insuranceAddress", address),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "insuranceName" => Ok(Insurance::Name(r.value("insuranceName")?)),
            _ => Ok(Insurance::Address(r.node("insuranceAddress")?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthInsuranceData {
    pub health_insured: YesNo,
    pub insurance: Option<Insurance>,
    pub health_insurance_valid_from: Option<NaiveDate>,
}

static HEALTH_INSURANCE_DATA: NodeSchema = NodeSchema {
    type_name: "healthInsuranceDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("healthInsured"),
        FieldSlot::choice(&INSURANCE).optional(),
        FieldSlot::value("healthInsuranceValidFrom").optional(),
    ],
};

impl WireNode for HealthInsuranceData {
    fn schema() -> &'static NodeSchema {
        &HEALTH_INSURANCE_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("healthInsured", &self.health_insured)?;
        w.opt_choice(&self.insurance)?;
        w.opt_value("healthInsuranceValidFrom", &self.health_insurance_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            health_insured: r.value("healthInsured")?,
            insurance: r.opt_choice()?,
            health_insurance_valid_from: r.opt_value("healthInsuranceValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrimonialInheritanceArrangementData {
    pub matrimonial_inheritance_arrangement: YesNo,
    pub matrimonial_inheritance_arrangement_valid_from: Option<NaiveDate>,
}

static MATRIMONIAL_INHERITANCE_ARRANGEMENT_DATA: NodeSchema = NodeSchema {
    type_name: "matrimonialInheritanceArrangementDataType",
    namespace: ECH_0021_V7,
    slots: &[
        FieldSlot::value("matrimonialInheritanceArrangement"),
        FieldSlot::value("matrimonialInheritanceArrangementValidFrom").optional(),
    ],
};

impl WireNode for MatrimonialInheritanceArrangementData {
    fn schema() -> &'static NodeSchema {
        &MATRIMONIAL_INHERITANCE_ARRANGEMENT_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value(
            "matrimonialInheritanceArrangement",
            &self.matrimonial_inheritance_arrangement,
        )?;
        w.opt_value(
            "matrimonialInheritanceArrangementValidFrom",
            &self.matrimonial_inheritance_arrangement_valid_from,
        )
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            matrimonial_inheritance_arrangement: r.value("matrimonialInheritanceArrangement")?,
            matrimonial_inheritance_arrangement_valid_from: r
                .opt_value("matrimonialInheritanceArrangementValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoliticalRightData {
    pub restricted_voting_and_election_right_federation: Option<bool>,
}

static POLITICAL_RIGHT_DATA: NodeSchema = NodeSchema {
    type_name: "politicalRightDataType",
    namespace: ECH_0021_V7,
    slots: &[FieldSlot::value("restrictedVotingAndElectionRightFederation").optional()],
};

impl WireNode for PoliticalRightData {
    fn schema() -> &'static NodeSchema {
        &POLITICAL_RIGHT_DATA
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value(
            "restrictedVotingAndElectionRightFederation",
            &self.restricted_voting_and_election_right_federation,
        )
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            restricted_voting_and_election_right_federation: r
                .opt_value("restrictedVotingAndElectionRightFederation")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::Sex;
    use crate::ech0044::{NamedPersonId, PersonIdCategory, PersonIdValue};
    use crate::namespaces::{ECH_0020, ECH_0044};
    use ech_wire::{Element, WireError, decode_node, encode_node};

    fn name(value: &str) -> BaseName {
        BaseName::new(value).unwrap()
    }

    #[test]
    fn test_lock_data_defaults_to_unlocked() -> Result<()> {
        let element = encode_node(&LockData::default(), ECH_0020, "lockData")?;
        let names: Vec<&str> = element.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["dataLock", "paperLock"]);
        assert_eq!(element.text_at(&["dataLock"]), Some("0"));
        assert_eq!(element.text_at(&["paperLock"]), Some("0"));
        Ok(())
    }

    #[test]
    fn test_parent_name_arms() -> Result<()> {
        let full = NameOfParent {
            name: ParentName::Full {
                first_name: name("Maria"),
                official_name: name("Rossi"),
            },
            type_of_relationship: Some(ParentNameType::Mother),
            official_proof_of_name_of_parents: None,
        };
        let element = encode_node(&full, ECH_0020, "nameOfParent")?;
        let names: Vec<&str> = element.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["firstName", "officialName", "typeOfRelationship"]);
        assert_eq!(decode_node::<NameOfParent>(&element)?, full);

        let mixed = Element::new(ECH_0021_V7, "nameOfParent")
            .with_child(Element::new(ECH_0021_V7, "firstName").with_text("Maria"))
            .with_child(Element::new(ECH_0021_V7, "officialNameOnly").with_text("Rossi"));
        let err = decode_node::<NameOfParent>(&mixed).unwrap_err();
        assert!(matches!(err, WireError::ChoiceViolation { .. }));
        Ok(())
    }

    #[test]
    fn test_at_most_two_parents() {
        let parent = NameOfParent {
            name: ParentName::FirstNameOnly(name("Maria")),
            type_of_relationship: None,
            official_proof_of_name_of_parents: None,
        };
        let addon = BirthAddonData {
            name_of_parent: vec![parent.clone(), parent.clone(), parent],
        };
        let err = encode_node(&addon, ECH_0020, "birthAddonData").unwrap_err();
        assert!(matches!(err, WireError::ConstraintViolation { ref path, .. } if path == "birthAddonData/nameOfParent"));
    }

    #[test]
    fn test_uid_is_zero_padded() -> Result<()> {
        let uid = Uid {
            category: UidCategory::Enterprise,
            id: UidOrganisationId::new(1234567).map_err(|e| e.at("uid"))?,
        };
        let element = encode_node(&uid, ECH_0021_V7, "UID")?;
        assert_eq!(element.text_at(&["uidOrganisationId"]), Some("001234567"));
        assert_eq!(element.text_at(&["uidOrganisationIdCategorie"]), Some("CHE"));
        Ok(())
    }

    #[test]
    fn test_parental_partner_keeps_identification_in_ech0044() -> Result<()> {
        let relationship = ParentalRelationship {
            partner: Partner {
                identification: PartnerIdentification::PersonPartner(PersonIdentificationLight {
                    vn: None,
                    local_person_id: Some(NamedPersonId {
                        category: PersonIdCategory::new("MU.6172").unwrap(),
                        id: PersonIdValue::new("9").unwrap(),
                    }),
                    other_person_id: Vec::new(),
                    official_name: name("Rossi"),
                    first_name: name("Maria"),
                    original_name: None,
                    sex: Some(Sex::Female),
                    date_of_birth: None,
                }),
                address: None,
            },
            relationship_valid_from: None,
            type_of_relationship: ParentalRelationshipType::Mother,
            care: Care::Joint,
        };
        let element = encode_node(&relationship, ECH_0020, "parentalRelationship")?;
        let light = element
            .descend(&["partner", "personIdentificationPartner"])
            .unwrap();
        assert!(light.is(&ECH_0021_V7, "personIdentificationPartner"));
        assert!(light.children.iter().all(|c| c.namespace_uri() == ECH_0044.uri));
        assert_eq!(element.text_at(&["care"]), Some("1"));
        assert_eq!(decode_node::<ParentalRelationship>(&element)?, relationship);
        Ok(())
    }
}
