//! eCH-0020 v3: base delivery of the population register.
//!
//! ```xml
//! <eCH-0020:delivery version="3.0">
//!   <eCH-0020:deliveryHeader>...</eCH-0020:deliveryHeader>
//!   <eCH-0020:baseDelivery>
//!     <eCH-0020:messages>
//!       <eCH-0020:eventBaseDelivery>...</eCH-0020:eventBaseDelivery>
//!     </eCH-0020:messages>
//!   </eCH-0020:baseDelivery>
//! </eCH-0020:delivery>
//! ```

use chrono::NaiveDate;
use ech_wire::{
    ChoiceArm, ChoiceGroup, ChoiceSchema, FieldReader, FieldSlot, FieldWriter, NodeSchema, Result,
    WireError, WireNode, WireRoot,
};

use crate::codes::FederalRegister;
use crate::ech0007::SwissMunicipality;
use crate::ech0011::{
    BirthData, ContactData, DeathData, Destination, DwellingAddress, MaritalData, NameData,
    NationalityData, PlaceOfOrigin, ReligionData, ResidencePermitData,
};
use crate::ech0021::{
    ArmedForcesData, BirthAddonData, CivilDefenseData, FireServiceData, GuardianRelationship,
    HealthInsuranceData, JobData, LockData, MaritalDataAddon, MaritalRelationship,
    MatrimonialInheritanceArrangementData, ParentalRelationship, PersonAdditionalData,
    PlaceOfOriginAddonData, PoliticalRightData,
};
use crate::ech0044::PersonIdentification;
use crate::ech0058::HeaderV5;
use crate::namespaces::ECH_0020;

/// Value of the root `version` attribute.
pub const DELIVERY_VERSION: &str = "3.0";

#[derive(Debug, Clone, PartialEq)]
pub struct NameInfo {
    pub name_data: NameData,
    pub name_valid_from: Option<NaiveDate>,
}

static NAME_INFO: NodeSchema = NodeSchema {
    type_name: "nameInfoType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("nameData"),
        FieldSlot::value("nameValidFrom").optional(),
    ],
};

impl WireNode for NameInfo {
    fn schema() -> &'static NodeSchema {
        &NAME_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("nameData", &self.name_data)?;
        w.opt_value("nameValidFrom", &self.name_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            name_data: r.node("nameData")?,
            name_valid_from: r.opt_value("nameValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthInfo {
    pub birth_data: BirthData,
    pub birth_addon_data: Option<BirthAddonData>,
}

static BIRTH_INFO: NodeSchema = NodeSchema {
    type_name: "birthInfoType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("birthData"),
        FieldSlot::node("birthAddonData").optional(),
    ],
};

impl WireNode for BirthInfo {
    fn schema() -> &'static NodeSchema {
        &BIRTH_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("birthData", &self.birth_data)?;
        w.opt_node("birthAddonData", &self.birth_addon_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            birth_data: r.node("birthData")?,
            birth_addon_data: r.opt_node("birthAddonData")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaritalInfo {
    pub marital_data: MaritalData,
    pub marital_data_addon: Option<MaritalDataAddon>,
}

static MARITAL_INFO: NodeSchema = NodeSchema {
    type_name: "maritalInfoType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("maritalData"),
        FieldSlot::node("maritalDataAddon").optional(),
    ],
};

impl WireNode for MaritalInfo {
    fn schema() -> &'static NodeSchema {
        &MARITAL_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("maritalData", &self.marital_data)?;
        w.opt_node("maritalDataAddon", &self.marital_data_addon)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            marital_data: r.node("maritalData")?,
            marital_data_addon: r.opt_node("maritalDataAddon")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOfOriginInfo {
    pub place_of_origin: PlaceOfOrigin,
    pub place_of_origin_addon_data: Option<PlaceOfOriginAddonData>,
}

static PLACE_OF_ORIGIN_INFO: NodeSchema = NodeSchema {
    type_name: "placeOfOriginInfoType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("placeOfOrigin"),
        FieldSlot::node("placeOfOriginAddonData").optional(),
    ],
};

impl WireNode for PlaceOfOriginInfo {
    fn schema() -> &'static NodeSchema {
        &PLACE_OF_ORIGIN_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("placeOfOrigin", &self.place_of_origin)?;
        w.opt_node("placeOfOriginAddonData", &self.place_of_origin_addon_data)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            place_of_origin: r.node("placeOfOrigin")?,
            place_of_origin_addon_data: r.opt_node("placeOfOriginAddonData")?,
        })
    }
}

/// Swiss citizens list their places of origin, foreigners their permit.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseDeliveryCitizenship {
    PlacesOfOrigin(Vec<PlaceOfOriginInfo>),
    ResidencePermit(ResidencePermitData),
}

static CITIZENSHIP: ChoiceSchema = ChoiceSchema {
    group: "citizenship",
    arms: &[
        ChoiceArm {
            name: "placeOfOriginInfo",
            slots: &[FieldSlot::node("placeOfOriginInfo").at_least_one()],
        },
        ChoiceArm {
            name: "residencePermitData",
            slots: &[FieldSlot::node("residencePermitData")],
        },
    ],
};

impl ChoiceGroup for BaseDeliveryCitizenship {
    fn schema() -> &'static ChoiceSchema {
        &CITIZENSHIP
    }

    fn arm_name(&self) -> &'static str {
        match self {
            BaseDeliveryCitizenship::PlacesOfOrigin(_) => "placeOfOriginInfo",
            BaseDeliveryCitizenship::ResidencePermit(_) => "residencePermitData",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            BaseDeliveryCitizenship::PlacesOfOrigin(places) => w.nodes("placeOfOriginInfo", places),
            BaseDeliveryCitizenship::ResidencePermit(permit) => {
                w.node("residencePermitData", permit)
            }
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "placeOfOriginInfo" => Ok(BaseDeliveryCitizenship::PlacesOfOrigin(
                r.nodes("placeOfOriginInfo")?,
            )),
            _ => Ok(BaseDeliveryCitizenship::ResidencePermit(
                r.node("residencePermitData")?,
            )),
        }
    }
}

/// `baseDeliveryPersonType`: the full register extract of one person.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDeliveryPerson {
    pub person_identification: PersonIdentification,
    pub name_info: NameInfo,
    pub birth_info: BirthInfo,
    pub religion_data: ReligionData,
    pub marital_info: MaritalInfo,
    pub nationality_data: NationalityData,
    pub death_data: Option<DeathData>,
    pub contact_data: Option<ContactData>,
    pub person_additional_data: Option<PersonAdditionalData>,
    pub political_right_data: Option<PoliticalRightData>,
    pub citizenship: BaseDeliveryCitizenship,
    pub lock_data: LockData,
    pub job_data: Option<JobData>,
    pub marital_relationship: Option<MaritalRelationship>,
    pub parental_relationship: Vec<ParentalRelationship>,
    pub guardian_relationship: Vec<GuardianRelationship>,
    pub armed_forces_data: Option<ArmedForcesData>,
    pub civil_defense_data: Option<CivilDefenseData>,
    pub fire_service_data: Option<FireServiceData>,
    pub health_insurance_data: Option<HealthInsuranceData>,
    pub matrimonial_inheritance_arrangement_data: Option<MatrimonialInheritanceArrangementData>,
}

static BASE_DELIVERY_PERSON: NodeSchema = NodeSchema {
    type_name: "baseDeliveryPersonType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("personIdentification"),
        FieldSlot::node("nameInfo"),
        FieldSlot::node("birthInfo"),
        FieldSlot::node("religionData"),
        FieldSlot::node("maritalInfo"),
        FieldSlot::node("nationalityData"),
        FieldSlot::node("deathData").optional(),
        FieldSlot::node("contactData").optional(),
        FieldSlot::node("personAdditionalData").optional(),
        FieldSlot::node("politicalRightData").optional(),
        FieldSlot::choice(&CITIZENSHIP),
        FieldSlot::node("lockData"),
        FieldSlot::node("jobData").optional(),
        FieldSlot::node("maritalRelationship").optional(),
        FieldSlot::node("parentalRelationship").repeated(),
        FieldSlot::node("guardianRelationship").repeated(),
        FieldSlot::node("armedForcesData").optional(),
        FieldSlot::node("civilDefenseData").optional(),
        FieldSlot::node("fireServiceData").optional(),
        FieldSlot::node("healthInsuranceData").optional(),
        FieldSlot::node("matrimonialInheritanceArrangementData").optional(),
    ],
};

impl WireNode for BaseDeliveryPerson {
    fn schema() -> &'static NodeSchema {
        &BASE_DELIVERY_PERSON
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("personIdentification", &self.person_identification)?;
        w.node("nameInfo", &self.name_info)?;
        w.node("birthInfo", &self.birth_info)?;
        w.node("religionData", &self.religion_data)?;
        w.node("maritalInfo", &self.marital_info)?;
        w.node("nationalityData", &self.nationality_data)?;
        w.opt_node("deathData", &self.death_data)?;
        w.opt_node("contactData", &self.contact_data)?;
        w.opt_node("personAdditionalData", &self.person_additional_data)?;
        w.opt_node("politicalRightData", &self.political_right_data)?;
        w.choice(&self.citizenship)?;
        w.node("lockData", &self.lock_data)?;
        w.opt_node("jobData", &self.job_data)?;
        w.opt_node("maritalRelationship", &self.marital_relationship)?;
        w.nodes("parentalRelationship", &self.parental_relationship)?;
        w.nodes("guardianRelationship", &self.guardian_relationship)?;
        w.opt_node("armedForcesData", &self.armed_forces_data)?;
        w.opt_node("civilDefenseData", &self.civil_defense_data)?;
        w.opt_node("fireServiceData", &self.fire_service_data)?;
        w.opt_node("healthInsuranceData", &self.health_insurance_data)?;
        w.opt_node(
            "matrimonialInheritanceArrangementData",
            &self.matrimonial_inheritance_arrangement_data,
        )
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            person_identification: r.node("personIdentification")?,
            name_info: r.node("nameInfo")?,
            birth_info: r.node("birthInfo")?,
            religion_data: r.node("religionData")?,
            marital_info: r.node("maritalInfo")?,
            nationality_data: r.node("nationalityData")?,
            death_data: r.opt_node("deathData")?,
            contact_data: r.opt_node("contactData")?,
            person_additional_data: r.opt_node("personAdditionalData")?,
            political_right_data: r.opt_node("politicalRightData")?,
            citizenship: r.choice()?,
            lock_data: r.node("lockData")?,
            job_data: r.opt_node("jobData")?,
            marital_relationship: r.opt_node("maritalRelationship")?,
            parental_relationship: r.nodes("parentalRelationship")?,
            guardian_relationship: r.nodes("guardianRelationship")?,
            armed_forces_data: r.opt_node("armedForcesData")?,
            civil_defense_data: r.opt_node("civilDefenseData")?,
            fire_service_data: r.opt_node("fireServiceData")?,
            health_insurance_data: r.opt_node("healthInsuranceData")?,
            matrimonial_inheritance_arrangement_data: r
                .opt_node("matrimonialInheritanceArrangementData")?,
        })
    }
}

/// Who reports the residence: a municipality or a federal register.
#[derive(Debug, Clone, PartialEq)]
pub enum Reporting {
    Municipality(SwissMunicipality),
    FederalRegister(FederalRegister),
}

static REPORTING: ChoiceSchema = ChoiceSchema {
    group: "reporting",
    arms: &[
        ChoiceArm {
            name: "reportingMunicipality",
            slots: &[FieldSlot::node("reportingMunicipality")],
        },
        ChoiceArm {
            name: "federalRegister",
            slots: &[FieldSlot::value("federalRegister")],
        },
    ],
};

impl ChoiceGroup for Reporting {
    fn schema() -> &'static ChoiceSchema {
        &REPORTING
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Reporting::Municipality(_) => "reportingMunicipality",
            Reporting::FederalRegister(_) => "federalRegister",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Reporting::Municipality(municipality) => w.node("reportingMunicipality", municipality),
            Reporting::FederalRegister(register) => w.value("federalRegister", register),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "reportingMunicipality" => Ok(Reporting::Municipality(
                r.node("reportingMunicipality")?,
            )),
            _ => Ok(Reporting::FederalRegister(r.value("federalRegister")?)),
        }
    }
}

/// `hasMainResidence`: the municipality of main residence reports.
#[derive(Debug, Clone, PartialEq)]
pub struct HasMainResidence {
    pub reporting: Reporting,
    pub arrival_date: NaiveDate,
    pub comes_from: Option<Destination>,
    pub dwelling_address: DwellingAddress,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<Destination>,
    pub secondary_residence: Vec<SwissMunicipality>,
}

static HAS_MAIN_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "hasMainResidenceType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::choice(&REPORTING),
        FieldSlot::value("arrivalDate"),
        FieldSlot::node("comesFrom").optional(),
        FieldSlot::node("dwellingAddress"),
        FieldSlot::value("departureDate").optional(),
        FieldSlot::node("goesTo").optional(),
        FieldSlot::node("secondaryResidence").repeated(),
    ],
};

impl WireNode for HasMainResidence {
    fn schema() -> &'static NodeSchema {
        &HAS_MAIN_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.reporting)?;
        w.value("arrivalDate", &self.arrival_date)?;
        w.opt_node("comesFrom", &self.comes_from)?;
        w.node("dwellingAddress", &self.dwelling_address)?;
        w.opt_value("departureDate", &self.departure_date)?;
        w.opt_node("goesTo", &self.goes_to)?;
        w.nodes("secondaryResidence", &self.secondary_residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            reporting: r.choice()?,
            arrival_date: r.value("arrivalDate")?,
            comes_from: r.opt_node("comesFrom")?,
            dwelling_address: r.node("dwellingAddress")?,
            departure_date: r.opt_value("departureDate")?,
            goes_to: r.opt_node("goesTo")?,
            secondary_residence: r.nodes("secondaryResidence")?,
        })
    }
}

/// `hasSecondaryResidence`: reported by the secondary municipality, which
/// names the main residence.
#[derive(Debug, Clone, PartialEq)]
pub struct HasSecondaryResidence {
    pub reporting: Reporting,
    pub arrival_date: NaiveDate,
    pub comes_from: Destination,
    pub dwelling_address: DwellingAddress,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<Destination>,
    pub main_residence: SwissMunicipality,
}

static HAS_SECONDARY_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "hasSecondaryResidenceType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::choice(&REPORTING),
        FieldSlot::value("arrivalDate"),
        FieldSlot::node("comesFrom"),
        FieldSlot::node("dwellingAddress"),
        FieldSlot::value("departureDate").optional(),
        FieldSlot::node("goesTo").optional(),
        FieldSlot::node("mainResidence"),
    ],
};

impl WireNode for HasSecondaryResidence {
    fn schema() -> &'static NodeSchema {
        &HAS_SECONDARY_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.reporting)?;
        w.value("arrivalDate", &self.arrival_date)?;
        w.node("comesFrom", &self.comes_from)?;
        w.node("dwellingAddress", &self.dwelling_address)?;
        w.opt_value("departureDate", &self.departure_date)?;
        w.opt_node("goesTo", &self.goes_to)?;
        w.node("mainResidence", &self.main_residence)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            reporting: r.choice()?,
            arrival_date: r.value("arrivalDate")?,
            comes_from: r.node("comesFrom")?,
            dwelling_address: r.node("dwellingAddress")?,
            departure_date: r.opt_value("departureDate")?,
            goes_to: r.opt_node("goesTo")?,
            main_residence: r.node("mainResidence")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HasOtherResidence {
    pub reporting: Reporting,
    pub arrival_date: NaiveDate,
    pub comes_from: Destination,
    pub dwelling_address: DwellingAddress,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<Destination>,
}

static HAS_OTHER_RESIDENCE: NodeSchema = NodeSchema {
    type_name: "hasOtherResidenceType",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::choice(&REPORTING),
        FieldSlot::value("arrivalDate"),
        FieldSlot::node("comesFrom"),
        FieldSlot::node("dwellingAddress"),
        FieldSlot::value("departureDate").optional(),
        FieldSlot::node("goesTo").optional(),
    ],
};

impl WireNode for HasOtherResidence {
    fn schema() -> &'static NodeSchema {
        &HAS_OTHER_RESIDENCE
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.reporting)?;
        w.value("arrivalDate", &self.arrival_date)?;
        w.node("comesFrom", &self.comes_from)?;
        w.node("dwellingAddress", &self.dwelling_address)?;
        w.opt_value("departureDate", &self.departure_date)?;
        w.opt_node("goesTo", &self.goes_to)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            reporting: r.choice()?,
            arrival_date: r.value("arrivalDate")?,
            comes_from: r.node("comesFrom")?,
            dwelling_address: r.node("dwellingAddress")?,
            departure_date: r.opt_value("departureDate")?,
            goes_to: r.opt_node("goesTo")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResidence {
    Main(HasMainResidence),
    Secondary(HasSecondaryResidence),
    Other(HasOtherResidence),
}

static EVENT_RESIDENCE: ChoiceSchema = ChoiceSchema {
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

impl ChoiceGroup for EventResidence {
    fn schema() -> &'static ChoiceSchema {
        &EVENT_RESIDENCE
    }

    fn arm_name(&self) -> &'static str {
        match self {
            EventResidence::Main(_) => "hasMainResidence",
            EventResidence::Secondary(_) => "hasSecondaryResidence",
            EventResidence::Other(_) => "hasOtherResidence",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            EventResidence::Main(main) => w.node("hasMainResidence", main),
            EventResidence::Secondary(secondary) => w.node("hasSecondaryResidence", secondary),
            EventResidence::Other(other) => w.node("hasOtherResidence", other),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "hasMainResidence" => Ok(EventResidence::Main(r.node("hasMainResidence")?)),
            "hasSecondaryResidence" => Ok(EventResidence::Secondary(
                r.node("hasSecondaryResidence")?,
            )),
            _ => Ok(EventResidence::Other(r.node("hasOtherResidence")?)),
        }
    }
}

/// `eventBaseDelivery`: one person with one residence.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBaseDelivery {
    pub base_delivery_person: BaseDeliveryPerson,
    pub residence: EventResidence,
    pub base_delivery_valid_from: Option<NaiveDate>,
}

static EVENT_BASE_DELIVERY: NodeSchema = NodeSchema {
    type_name: "eventBaseDelivery",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("baseDeliveryPerson"),
        FieldSlot::choice(&EVENT_RESIDENCE),
        FieldSlot::value("baseDeliveryValidFrom").optional(),
    ],
};

impl WireNode for EventBaseDelivery {
    fn schema() -> &'static NodeSchema {
        &EVENT_BASE_DELIVERY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("baseDeliveryPerson", &self.base_delivery_person)?;
        w.choice(&self.residence)?;
        w.opt_value("baseDeliveryValidFrom", &self.base_delivery_valid_from)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base_delivery_person: r.node("baseDeliveryPerson")?,
            residence: r.choice()?,
            base_delivery_valid_from: r.opt_value("baseDeliveryValidFrom")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub event_base_delivery: Vec<EventBaseDelivery>,
}

static MESSAGES: NodeSchema = NodeSchema {
    type_name: "messagesType",
    namespace: ECH_0020,
    slots: &[FieldSlot::node("eventBaseDelivery").at_least_one()],
};

impl WireNode for Messages {
    fn schema() -> &'static NodeSchema {
        &MESSAGES
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.nodes("eventBaseDelivery", &self.event_base_delivery)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            event_base_delivery: r.nodes("eventBaseDelivery")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseDelivery {
    pub messages: Messages,
}

static BASE_DELIVERY: NodeSchema = NodeSchema {
    type_name: "baseDeliveryType",
    namespace: ECH_0020,
    slots: &[FieldSlot::node("messages")],
};

impl WireNode for BaseDelivery {
    fn schema() -> &'static NodeSchema {
        &BASE_DELIVERY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("messages", &self.messages)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            messages: r.node("messages")?,
        })
    }
}

/// Root of an eCH-0020 v3 document.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub delivery_header: HeaderV5,
    pub base_delivery: BaseDelivery,
}

impl Delivery {
    pub fn new(delivery_header: HeaderV5, events: Vec<EventBaseDelivery>) -> Self {
        Self {
            delivery_header,
            base_delivery: BaseDelivery {
                messages: Messages {
                    event_base_delivery: events,
                },
            },
        }
    }

    pub fn events(&self) -> &[EventBaseDelivery] {
        &self.base_delivery.messages.event_base_delivery
    }

    pub fn into_events(self) -> Vec<EventBaseDelivery> {
        self.base_delivery.messages.event_base_delivery
    }
}

static DELIVERY: NodeSchema = NodeSchema {
    type_name: "delivery",
    namespace: ECH_0020,
    slots: &[
        FieldSlot::node("deliveryHeader"),
        FieldSlot::node("baseDelivery"),
    ],
};

impl WireNode for Delivery {
    fn schema() -> &'static NodeSchema {
        &DELIVERY
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.attribute("version", &DELIVERY_VERSION.to_string());
        w.node("deliveryHeader", &self.delivery_header)?;
        w.node("baseDelivery", &self.base_delivery)
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
            base_delivery: r.node("baseDelivery")?,
        })
    }
}

impl WireRoot for Delivery {
    const ROOT: &'static str = "delivery";
}
