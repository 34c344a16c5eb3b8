//! The flattened person of an eCH-0020 base delivery.
//!
//! Identification fields are duplicated into `nameInfo/nameData` and
//! `birthInfo/birthData` on encode. On decode the copies are compared with
//! `personIdentification`, which is read as the canonical source.

use chrono::NaiveDate;
use ech_model::codes::{
    CancelationReason, Canton, DataLock, KindOfEmployment, Language, MaritalStatus, MrMrs,
    NationalityStatus, ParentNameType, Religion, ResidencePermit, Separation, Sex, UidCategory,
    YesNo,
};
use ech_model::ech0007::HistoryMunicipalityId;
use ech_model::ech0010::Title;
use ech_model::ech0011::{
    BirthData, Citizenship, ContactData, CountryInfo, DeathData, DeathPeriod, ForeignName,
    ForeignerName, MaritalData, NameData, NationalityData, OriginName, Person, PlaceOfOrigin,
    ReligionData, ResidencePermitData, SeparationData,
};
use ech_model::ech0020::{
    self, BaseDeliveryCitizenship, BirthInfo, MaritalInfo, NameInfo, PlaceOfOriginInfo,
};
use ech_model::ech0021::{
    ArmedForcesData, BirthAddonData, CivilDefenseData, FireServiceData, HealthInsuranceData,
    Insurance, JobData, LockData, MaritalDataAddon, MatrimonialInheritanceArrangementData,
    NameOfParent, OccupationData, ParentName, PersonAdditionalData, PlaceOfOriginAddonData,
    PoliticalRightData, Text100, Uid, UidOrganisationId,
};
use ech_model::ech0044::{BaseName, DatePartiallyKnown, PersonIdentification};
use ech_wire::{Result, WireError, select_arm, select_optional_arm};
use tracing::trace;

use crate::address::{AddressFields, MailAddressFields};
use crate::fields::{
    checked, forbidden, item, join, opt_checked, opt_string, opt_text, required, text,
};
use crate::place::{CountryFields, PlaceFields};
use crate::relationship::{
    GuardianInfo, NamedId, ParentInfo, PartnerFields, SpouseInfo, ids_from_wire, ids_to_wire,
};

/// A name as written in a foreign passport or declared by the person.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForeignNameFields {
    pub name: Option<String>,
    pub first_name: Option<String>,
}

impl ForeignNameFields {
    fn to_wire(&self, path: &str) -> Result<ForeignerName> {
        Ok(ForeignerName {
            name: opt_text(&join(path, "name"), self.name.as_deref(), BaseName::new)?,
            first_name: opt_text(
                &join(path, "first_name"),
                self.first_name.as_deref(),
                BaseName::new,
            )?,
        })
    }

    fn from_wire(name: &ForeignerName) -> Self {
        Self {
            name: opt_string(&name.name),
            first_name: opt_string(&name.first_name),
        }
    }
}

/// A parent's name as recorded at birth. At least one of the names is needed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentNameInfo {
    pub first_name: Option<String>,
    pub official_name: Option<String>,
    pub relationship: Option<ParentNameType>,
    pub official_proof: Option<bool>,
}

impl ParentNameInfo {
    fn to_wire(&self, path: &str) -> Result<NameOfParent> {
        let first_name = opt_text(
            &join(path, "first_name"),
            self.first_name.as_deref(),
            BaseName::new,
        )?;
        let official_name = opt_text(
            &join(path, "official_name"),
            self.official_name.as_deref(),
            BaseName::new,
        )?;
        let name = match (first_name, official_name) {
            (Some(first_name), Some(official_name)) => ParentName::Full {
                first_name,
                official_name,
            },
            (Some(first_name), None) => ParentName::FirstNameOnly(first_name),
            (None, Some(official_name)) => ParentName::OfficialNameOnly(official_name),
            (None, None) => return Err(WireError::choice_none(path)),
        };
        Ok(NameOfParent {
            name,
            type_of_relationship: self.relationship,
            official_proof_of_name_of_parents: self.official_proof,
        })
    }

    fn from_wire(parent: &NameOfParent) -> Self {
        let (first_name, official_name) = match &parent.name {
            ParentName::Full {
                first_name,
                official_name,
            } => (Some(first_name), Some(official_name)),
            ParentName::FirstNameOnly(first_name) => (Some(first_name), None),
            ParentName::OfficialNameOnly(official_name) => (None, Some(official_name)),
        };
        Self {
            first_name: first_name.map(|n| n.as_str().to_string()),
            official_name: official_name.map(|n| n.as_str().to_string()),
            relationship: parent.type_of_relationship,
            official_proof: parent.official_proof_of_name_of_parents,
        }
    }
}

/// One nationality.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NationalityInfo {
    pub country: CountryFields,
    pub valid_from: Option<NaiveDate>,
}

/// A Swiss place of origin with its naturalization history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceOfOriginFields {
    pub origin_name: String,
    pub canton: Option<Canton>,
    pub place_of_origin_id: Option<u32>,
    pub history_municipality_id: Option<u64>,
    pub naturalization_date: Option<NaiveDate>,
    pub expatriation_date: Option<NaiveDate>,
}

impl PlaceOfOriginFields {
    fn place_of_origin(&self, path: &str) -> Result<PlaceOfOrigin> {
        Ok(PlaceOfOrigin {
            origin_name: text(&join(path, "origin_name"), &self.origin_name, OriginName::new)?,
            canton: required(&join(path, "canton"), self.canton)?,
            place_of_origin_id: self.place_of_origin_id,
            history_municipality_id: opt_checked(
                &join(path, "history_municipality_id"),
                self.history_municipality_id.map(HistoryMunicipalityId::new),
            )?,
        })
    }

    fn to_wire(&self, path: &str) -> Result<PlaceOfOriginInfo> {
        let addon = (self.naturalization_date.is_some() || self.expatriation_date.is_some())
            .then_some(PlaceOfOriginAddonData {
                naturalization_date: self.naturalization_date,
                expatriation_date: self.expatriation_date,
            });
        Ok(PlaceOfOriginInfo {
            place_of_origin: self.place_of_origin(path)?,
            place_of_origin_addon_data: addon,
        })
    }

    fn from_wire(place: &PlaceOfOrigin, addon: Option<&PlaceOfOriginAddonData>) -> Self {
        Self {
            origin_name: place.origin_name.as_str().to_string(),
            canton: Some(place.canton),
            place_of_origin_id: place.place_of_origin_id,
            history_municipality_id: place.history_municipality_id.map(|id| id.get()),
            naturalization_date: addon.and_then(|a| a.naturalization_date),
            expatriation_date: addon.and_then(|a| a.expatriation_date),
        }
    }
}

/// Residence permit of a foreign national.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResidencePermitInfo {
    pub permit: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_till: Option<NaiveDate>,
    pub entry_date: Option<NaiveDate>,
}

impl ResidencePermitInfo {
    fn to_wire(&self, path: &str) -> Result<ResidencePermitData> {
        Ok(ResidencePermitData {
            residence_permit: text(&join(path, "permit"), &self.permit, ResidencePermit::new)?,
            residence_permit_valid_from: self.valid_from,
            residence_permit_valid_till: self.valid_till,
            entry_date: self.entry_date,
        })
    }

    fn from_wire(permit: &ResidencePermitData) -> Self {
        Self {
            permit: permit.residence_permit.as_str().to_string(),
            valid_from: permit.residence_permit_valid_from,
            valid_till: permit.residence_permit_valid_till,
            entry_date: permit.entry_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeathInfo {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub place: PlaceFields,
}

impl DeathInfo {
    fn to_wire(&self, path: &str) -> Result<DeathData> {
        Ok(DeathData {
            death_period: DeathPeriod {
                date_from: required(&join(path, "date_from"), self.date_from)?,
                date_to: self.date_to,
            },
            place_of_death: self.place.to_wire(&join(path, "place"))?,
        })
    }

    fn from_wire(death: &DeathData) -> Self {
        Self {
            date_from: Some(death.death_period.date_from),
            date_to: death.death_period.date_to,
            place: PlaceFields::from_optional(death.place_of_death.as_ref()),
        }
    }
}

/// Where mail for the person goes, and who receives it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactInfo {
    pub partner: PartnerFields,
    pub address: MailAddressFields,
    pub valid_from: Option<NaiveDate>,
    pub valid_till: Option<NaiveDate>,
}

impl ContactInfo {
    fn to_wire(&self, path: &str) -> Result<ContactData> {
        Ok(ContactData {
            partner: self.partner.to_wire(&join(path, "partner"))?,
            contact_address: self.address.to_wire(&join(path, "address"))?,
            contact_valid_from: self.valid_from,
            contact_valid_till: self.valid_till,
        })
    }

    fn from_wire(contact: &ContactData) -> Self {
        Self {
            partner: PartnerFields::from_wire(contact.partner.as_ref()),
            address: MailAddressFields::from_wire(&contact.contact_address),
            valid_from: contact.contact_valid_from,
            valid_till: contact.contact_valid_till,
        }
    }
}

/// One employment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OccupationInfo {
    /// Business identification number, e.g. `CHE-123.456.789`.
    pub uid: Option<String>,
    pub employer: Option<String>,
    pub place_of_work: Option<AddressFields>,
    pub place_of_employer: Option<AddressFields>,
    pub valid_from: Option<NaiveDate>,
    pub valid_till: Option<NaiveDate>,
}

impl OccupationInfo {
    fn to_wire(&self, path: &str) -> Result<OccupationData> {
        Ok(OccupationData {
            uid: self
                .uid
                .as_deref()
                .map(|uid| parse_uid(&join(path, "uid"), uid))
                .transpose()?,
            employer: opt_text(&join(path, "employer"), self.employer.as_deref(), Text100::new)?,
            place_of_work: self
                .place_of_work
                .as_ref()
                .map(|a| a.to_wire(&join(path, "place_of_work")))
                .transpose()?,
            place_of_employer: self
                .place_of_employer
                .as_ref()
                .map(|a| a.to_wire(&join(path, "place_of_employer")))
                .transpose()?,
            occupation_valid_from: self.valid_from,
            occupation_valid_till: self.valid_till,
        })
    }

    fn from_wire(occupation: &OccupationData) -> Self {
        Self {
            uid: occupation.uid.as_ref().map(format_uid),
            employer: opt_string(&occupation.employer),
            place_of_work: occupation.place_of_work.as_ref().map(AddressFields::from_wire),
            place_of_employer: occupation
                .place_of_employer
                .as_ref()
                .map(AddressFields::from_wire),
            valid_from: occupation.occupation_valid_from,
            valid_till: occupation.occupation_valid_till,
        }
    }
}

/// Parses `CHE-123.456.789` (separators optional) into its category and number.
fn parse_uid(path: &str, raw: &str) -> Result<Uid> {
    let raw = raw.trim();
    let category = raw.get(..3).unwrap_or(raw);
    let category = checked(path, category.parse::<UidCategory>())?;
    let rest = raw.get(3..).unwrap_or_default();
    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let well_formed = rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == '.');
    if !well_formed || digits.len() != 9 {
        return Err(WireError::constraint(
            path,
            "UID must have the form CHE-123.456.789",
        ));
    }
    let number = digits
        .parse::<u64>()
        .map_err(|e| WireError::constraint(path, e.to_string()))?;
    Ok(Uid {
        category,
        id: checked(path, UidOrganisationId::new(number))?,
    })
}

fn format_uid(uid: &Uid) -> String {
    let n = uid.id.value();
    format!(
        "{}-{:03}.{:03}.{:03}",
        uid.category.code(),
        n / 1_000_000,
        n / 1_000 % 1_000,
        n % 1_000
    )
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobInfo {
    pub kind_of_employment: Option<KindOfEmployment>,
    pub job_title: Option<String>,
    pub occupations: Vec<OccupationInfo>,
}

impl JobInfo {
    fn to_wire(&self, path: &str) -> Result<JobData> {
        let occupations = join(path, "occupations");
        Ok(JobData {
            kind_of_employment: required(
                &join(path, "kind_of_employment"),
                self.kind_of_employment,
            )?,
            job_title: opt_text(&join(path, "job_title"), self.job_title.as_deref(), Text100::new)?,
            occupation_data: self
                .occupations
                .iter()
                .enumerate()
                .map(|(i, o)| o.to_wire(&item(&occupations, i)))
                .collect::<Result<_>>()?,
        })
    }

    fn from_wire(job: &JobData) -> Self {
        Self {
            kind_of_employment: Some(job.kind_of_employment),
            job_title: opt_string(&job.job_title),
            occupations: job.occupation_data.iter().map(OccupationInfo::from_wire).collect(),
        }
    }
}

/// Health insurance. The insurer is named or addressed, not both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthInsuranceInfo {
    pub insured: Option<YesNo>,
    pub insurance_name: Option<String>,
    pub insurance_address: Option<MailAddressFields>,
    pub valid_from: Option<NaiveDate>,
}

impl HealthInsuranceInfo {
    fn to_wire(&self, path: &str) -> Result<HealthInsuranceData> {
        let group = join(path, "insurance");
        let arm = select_optional_arm(
            &group,
            &[
                ("insuranceName", self.insurance_name.is_some()),
                ("insuranceAddress", self.insurance_address.is_some()),
            ],
        )?;
        let insurance = match (arm, &self.insurance_name, &self.insurance_address) {
            (Some(_), Some(name), _) => Some(Insurance::Name(text(
                &join(path, "insurance_name"),
                name,
                Text100::new,
            )?)),
            (Some(_), None, Some(address)) => Some(Insurance::Address(
                address.to_organisation_wire(&join(path, "insurance_address"))?,
            )),
            _ => None,
        };
        Ok(HealthInsuranceData {
            health_insured: required(&join(path, "insured"), self.insured)?,
            insurance,
            health_insurance_valid_from: self.valid_from,
        })
    }

    fn from_wire(data: &HealthInsuranceData) -> Self {
        let (insurance_name, insurance_address) = match &data.insurance {
            Some(Insurance::Name(name)) => (Some(name.as_str().to_string()), None),
            Some(Insurance::Address(address)) => {
                (None, Some(MailAddressFields::from_organisation_wire(address)))
            }
            None => (None, None),
        };
        Self {
            insured: Some(data.health_insured),
            insurance_name,
            insurance_address,
            valid_from: data.health_insurance_valid_from,
        }
    }
}

/// A person as a register holds it: one field per fact, however many times
/// the delivery repeats it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseDeliveryPerson {
    pub vn: Option<String>,
    pub local_person_id: NamedId,
    pub other_person_ids: Vec<NamedId>,
    pub eu_person_ids: Vec<NamedId>,
    pub official_name: String,
    pub first_name: String,
    pub original_name: Option<String>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<DatePartiallyKnown>,

    pub alliance_name: Option<String>,
    pub alias_name: Option<String>,
    pub other_name: Option<String>,
    pub call_name: Option<String>,
    pub name_on_foreign_passport: Option<ForeignNameFields>,
    pub declared_foreign_name: Option<ForeignNameFields>,
    pub name_valid_from: Option<NaiveDate>,

    pub birth_place: PlaceFields,
    /// Up to two entries.
    pub parent_names: Vec<ParentNameInfo>,

    /// BFS religion code.
    pub religion: String,
    pub religion_valid_from: Option<NaiveDate>,

    pub marital_status: Option<MaritalStatus>,
    pub date_of_marital_status: Option<NaiveDate>,
    pub cancelation_reason: Option<CancelationReason>,
    pub official_proof_of_marital_status: Option<bool>,
    pub separation: Option<Separation>,
    pub separation_valid_from: Option<NaiveDate>,
    pub separation_valid_till: Option<NaiveDate>,
    pub marriage_place: PlaceFields,

    pub nationality_status: Option<NationalityStatus>,
    pub nationalities: Vec<NationalityInfo>,

    /// Swiss citizens list their places of origin; foreigners carry a
    /// residence permit instead.
    pub places_of_origin: Vec<PlaceOfOriginFields>,
    pub residence_permit: Option<ResidencePermitInfo>,

    pub data_lock: Option<DataLock>,
    pub data_lock_valid_from: Option<NaiveDate>,
    pub data_lock_valid_till: Option<NaiveDate>,
    pub paper_lock: bool,
    pub paper_lock_valid_from: Option<NaiveDate>,
    pub paper_lock_valid_till: Option<NaiveDate>,

    pub death: Option<DeathInfo>,
    pub contact: Option<ContactInfo>,

    pub mr_mrs: Option<MrMrs>,
    pub title: Option<String>,
    pub language_of_correspondance: Option<String>,
    pub restricted_voting_and_election_right_federation: Option<bool>,

    pub job: Option<JobInfo>,

    pub spouse: Option<SpouseInfo>,
    pub parents: Vec<ParentInfo>,
    pub guardians: Vec<GuardianInfo>,

    pub armed_forces_service: Option<YesNo>,
    pub armed_forces_liability: Option<YesNo>,
    pub armed_forces_valid_from: Option<NaiveDate>,
    pub civil_defense: Option<YesNo>,
    pub civil_defense_valid_from: Option<NaiveDate>,
    pub fire_service: Option<YesNo>,
    pub fire_service_liability: Option<YesNo>,
    pub fire_service_valid_from: Option<NaiveDate>,
    pub health_insurance: Option<HealthInsuranceInfo>,
    pub matrimonial_inheritance_arrangement: Option<YesNo>,
    pub matrimonial_inheritance_arrangement_valid_from: Option<NaiveDate>,
}

/// Blocks shared by the eCH-0020 person and the eCH-0011 person.
struct CoreParts {
    identification: PersonIdentification,
    name_data: NameData,
    birth_data: BirthData,
    religion_data: ReligionData,
    marital_data: MaritalData,
    nationality_data: NationalityData,
    death_data: Option<DeathData>,
    contact_data: Option<ContactData>,
    citizenship: BaseDeliveryCitizenship,
}

/// Borrowed view of the same blocks, for flattening.
struct CoreView<'a> {
    identification: &'a PersonIdentification,
    name_data: &'a NameData,
    birth_data: &'a BirthData,
    religion_data: &'a ReligionData,
    marital_data: &'a MaritalData,
    nationality_data: &'a NationalityData,
    death_data: Option<&'a DeathData>,
    contact_data: Option<&'a ContactData>,
}

/// Where the duplicated fields sit besides `personIdentification`.
struct MirrorLocations {
    name_data: &'static str,
    birth_data: &'static str,
}

const BASE_DELIVERY_MIRRORS: MirrorLocations = MirrorLocations {
    name_data: "nameInfo/nameData",
    birth_data: "birthInfo/birthData",
};

const PERSON_MIRRORS: MirrorLocations = MirrorLocations {
    name_data: "nameData",
    birth_data: "birthData",
};

fn mirror<T: PartialEq + ?Sized>(
    field: &str,
    canonical: &T,
    copy: &T,
    element: &str,
    copy_parent: &str,
) -> Result<()> {
    if canonical == copy {
        return Ok(());
    }
    Err(WireError::DuplicateFieldMismatch {
        path: field.to_string(),
        locations: vec![
            format!("personIdentification/{element}"),
            format!("{copy_parent}/{element}"),
        ],
    })
}

fn check_mirrors(view: &CoreView<'_>, at: &MirrorLocations) -> Result<()> {
    let id = view.identification;
    let names = view.name_data;
    let birth = view.birth_data;
    mirror("official_name", &id.official_name, &names.official_name, "officialName", at.name_data)?;
    mirror("first_name", &id.first_name, &names.first_name, "firstName", at.name_data)?;
    mirror("original_name", &id.original_name, &names.original_name, "originalName", at.name_data)?;
    mirror("sex", &id.sex, &birth.sex, "sex", at.birth_data)?;
    mirror("date_of_birth", &id.date_of_birth, &birth.date_of_birth, "dateOfBirth", at.birth_data)
}

fn yes_no(flag: bool) -> YesNo {
    if flag { YesNo::Yes } else { YesNo::No }
}

impl BaseDeliveryPerson {
    fn identification(&self) -> Result<PersonIdentification> {
        Ok(PersonIdentification {
            vn: opt_text("vn", self.vn.as_deref(), ech_model::ech0044::Vn::new)?,
            local_person_id: self.local_person_id.to_wire("local_person_id")?,
            other_person_id: ids_to_wire("other_person_ids", &self.other_person_ids)?,
            eu_person_id: ids_to_wire("eu_person_ids", &self.eu_person_ids)?,
            official_name: text("official_name", &self.official_name, BaseName::new)?,
            first_name: text("first_name", &self.first_name, BaseName::new)?,
            original_name: opt_text("original_name", self.original_name.as_deref(), BaseName::new)?,
            sex: required("sex", self.sex)?,
            date_of_birth: required("date_of_birth", self.date_of_birth)?,
        })
    }

    fn foreign_name(&self) -> Result<Option<ForeignName>> {
        let arm = select_optional_arm(
            "foreign_name",
            &[
                ("nameOnForeignPassport", self.name_on_foreign_passport.is_some()),
                ("declaredForeignName", self.declared_foreign_name.is_some()),
            ],
        )?;
        if let Some(arm) = arm {
            trace!(group = "foreign_name", arm, "selected foreign name arm");
        }
        match (&self.name_on_foreign_passport, &self.declared_foreign_name) {
            (Some(name), _) => Ok(Some(ForeignName::NameOnForeignPassport(
                name.to_wire("name_on_foreign_passport")?,
            ))),
            (None, Some(name)) => Ok(Some(ForeignName::DeclaredForeignName(
                name.to_wire("declared_foreign_name")?,
            ))),
            (None, None) => Ok(None),
        }
    }

    fn name_data(&self, id: &PersonIdentification) -> Result<NameData> {
        Ok(NameData {
            official_name: id.official_name.clone(),
            first_name: id.first_name.clone(),
            original_name: id.original_name.clone(),
            alliance_name: opt_text("alliance_name", self.alliance_name.as_deref(), BaseName::new)?,
            alias_name: opt_text("alias_name", self.alias_name.as_deref(), BaseName::new)?,
            other_name: opt_text("other_name", self.other_name.as_deref(), BaseName::new)?,
            call_name: opt_text("call_name", self.call_name.as_deref(), BaseName::new)?,
            foreign_name: self.foreign_name()?,
        })
    }

    fn marital_data(&self) -> Result<MaritalData> {
        let separated = self.separation.is_some()
            || self.separation_valid_from.is_some()
            || self.separation_valid_till.is_some();
        Ok(MaritalData {
            marital_status: required("marital_status", self.marital_status)?,
            date_of_marital_status: self.date_of_marital_status,
            cancelation_reason: self.cancelation_reason,
            official_proof_of_marital_status: self.official_proof_of_marital_status,
            separation_data: separated.then_some(SeparationData {
                separation: self.separation,
                separation_valid_from: self.separation_valid_from,
                separation_valid_till: self.separation_valid_till,
            }),
        })
    }

    fn nationality_data(&self) -> Result<NationalityData> {
        Ok(NationalityData {
            nationality_status: required("nationality_status", self.nationality_status)?,
            country_info: self
                .nationalities
                .iter()
                .enumerate()
                .map(|(i, nationality)| {
                    Ok(CountryInfo {
                        country: nationality
                            .country
                            .to_wire(&join(&item("nationalities", i), "country"))?,
                        nationality_valid_from: nationality.valid_from,
                    })
                })
                .collect::<Result<_>>()?,
        })
    }

    fn citizenship(&self) -> Result<BaseDeliveryCitizenship> {
        let arm = select_arm(
            "citizenship",
            &[
                ("placeOfOrigin", !self.places_of_origin.is_empty()),
                ("residencePermit", self.residence_permit.is_some()),
            ],
        )?;
        trace!(group = "citizenship", arm, "selected citizenship arm");
        if let Some(permit) = &self.residence_permit {
            return Ok(BaseDeliveryCitizenship::ResidencePermit(
                permit.to_wire("residence_permit")?,
            ));
        }
        let places = self
            .places_of_origin
            .iter()
            .enumerate()
            .map(|(i, place)| place.to_wire(&item("places_of_origin", i)))
            .collect::<Result<_>>()?;
        Ok(BaseDeliveryCitizenship::PlacesOfOrigin(places))
    }

    fn core(&self) -> Result<CoreParts> {
        let identification = self.identification()?;
        let name_data = self.name_data(&identification)?;
        let birth_data = BirthData {
            date_of_birth: identification.date_of_birth,
            place_of_birth: self.birth_place.to_required("birth_place")?,
            sex: identification.sex,
        };
        Ok(CoreParts {
            name_data,
            birth_data,
            religion_data: ReligionData {
                religion: text("religion", &self.religion, Religion::new)?,
                religion_valid_from: self.religion_valid_from,
            },
            marital_data: self.marital_data()?,
            nationality_data: self.nationality_data()?,
            death_data: self.death.as_ref().map(|d| d.to_wire("death")).transpose()?,
            contact_data: self.contact.as_ref().map(|c| c.to_wire("contact")).transpose()?,
            citizenship: self.citizenship()?,
            identification,
        })
    }

    fn language(&self) -> Result<Option<Language>> {
        opt_text(
            "language_of_correspondance",
            self.language_of_correspondance.as_deref(),
            Language::new,
        )
    }

    fn birth_addon(&self) -> Result<Option<BirthAddonData>> {
        if self.parent_names.is_empty() {
            return Ok(None);
        }
        forbidden(
            "parent_names",
            self.parent_names.len() > 2,
            "at most two parent names",
        )?;
        let name_of_parent = self
            .parent_names
            .iter()
            .enumerate()
            .map(|(i, parent)| parent.to_wire(&item("parent_names", i)))
            .collect::<Result<_>>()?;
        Ok(Some(BirthAddonData { name_of_parent }))
    }

    fn additional_data(&self) -> Result<Option<PersonAdditionalData>> {
        if self.mr_mrs.is_none() && self.title.is_none() && self.language_of_correspondance.is_none() {
            return Ok(None);
        }
        Ok(Some(PersonAdditionalData {
            mr_mrs: self.mr_mrs,
            title: opt_text("title", self.title.as_deref(), Title::new)?,
            language_of_correspondance: self.language()?,
        }))
    }

    fn lock_data(&self) -> Result<LockData> {
        Ok(LockData {
            data_lock: required("data_lock", self.data_lock)?,
            data_lock_valid_from: self.data_lock_valid_from,
            data_lock_valid_till: self.data_lock_valid_till,
            paper_lock: yes_no(self.paper_lock),
            paper_lock_valid_from: self.paper_lock_valid_from,
            paper_lock_valid_till: self.paper_lock_valid_till,
        })
    }

    fn armed_forces_data(&self) -> Option<ArmedForcesData> {
        let present = self.armed_forces_service.is_some()
            || self.armed_forces_liability.is_some()
            || self.armed_forces_valid_from.is_some();
        present.then_some(ArmedForcesData {
            armed_forces_service: self.armed_forces_service,
            armed_forces_liability: self.armed_forces_liability,
            armed_forces_valid_from: self.armed_forces_valid_from,
        })
    }

    fn civil_defense_data(&self) -> Option<CivilDefenseData> {
        let present = self.civil_defense.is_some() || self.civil_defense_valid_from.is_some();
        present.then_some(CivilDefenseData {
            civil_defense: self.civil_defense,
            civil_defense_valid_from: self.civil_defense_valid_from,
        })
    }

    fn fire_service_data(&self) -> Option<FireServiceData> {
        let present = self.fire_service.is_some()
            || self.fire_service_liability.is_some()
            || self.fire_service_valid_from.is_some();
        present.then_some(FireServiceData {
            fire_service: self.fire_service,
            fire_service_liability: self.fire_service_liability,
            fire_service_valid_from: self.fire_service_valid_from,
        })
    }

    fn matrimonial_inheritance_data(&self) -> Result<Option<MatrimonialInheritanceArrangementData>> {
        match self.matrimonial_inheritance_arrangement {
            Some(arrangement) => Ok(Some(MatrimonialInheritanceArrangementData {
                matrimonial_inheritance_arrangement: arrangement,
                matrimonial_inheritance_arrangement_valid_from: self
                    .matrimonial_inheritance_arrangement_valid_from,
            })),
            None => {
                forbidden(
                    "matrimonial_inheritance_arrangement_valid_from",
                    self.matrimonial_inheritance_arrangement_valid_from.is_some(),
                    "a validity date needs matrimonial_inheritance_arrangement",
                )?;
                Ok(None)
            }
        }
    }

    /// Maps the record onto an eCH-0020 `baseDeliveryPerson`.
    pub fn to_wire(&self) -> Result<ech0020::BaseDeliveryPerson> {
        let core = self.core()?;
        Ok(ech0020::BaseDeliveryPerson {
            person_identification: core.identification,
            name_info: NameInfo {
                name_data: core.name_data,
                name_valid_from: self.name_valid_from,
            },
            birth_info: BirthInfo {
                birth_data: core.birth_data,
                birth_addon_data: self.birth_addon()?,
            },
            religion_data: core.religion_data,
            marital_info: MaritalInfo {
                marital_data: core.marital_data,
                marital_data_addon: self
                    .marriage_place
                    .to_wire("marriage_place")?
                    .map(|place| MaritalDataAddon {
                        place_of_marriage: Some(place),
                    }),
            },
            nationality_data: core.nationality_data,
            death_data: core.death_data,
            contact_data: core.contact_data,
            person_additional_data: self.additional_data()?,
            political_right_data: self
                .restricted_voting_and_election_right_federation
                .map(|restricted| PoliticalRightData {
                    restricted_voting_and_election_right_federation: Some(restricted),
                }),
            citizenship: core.citizenship,
            lock_data: self.lock_data()?,
            job_data: self.job.as_ref().map(|job| job.to_wire("job")).transpose()?,
            marital_relationship: self
                .spouse
                .as_ref()
                .map(|spouse| spouse.to_wire("spouse"))
                .transpose()?,
            parental_relationship: self
                .parents
                .iter()
                .enumerate()
                .map(|(i, parent)| parent.to_wire(&item("parents", i)))
                .collect::<Result<_>>()?,
            guardian_relationship: self
                .guardians
                .iter()
                .enumerate()
                .map(|(i, guardian)| guardian.to_wire(&item("guardians", i)))
                .collect::<Result<_>>()?,
            armed_forces_data: self.armed_forces_data(),
            civil_defense_data: self.civil_defense_data(),
            fire_service_data: self.fire_service_data(),
            health_insurance_data: self
                .health_insurance
                .as_ref()
                .map(|insurance| insurance.to_wire("health_insurance"))
                .transpose()?,
            matrimonial_inheritance_arrangement_data: self.matrimonial_inheritance_data()?,
        })
    }

    /// Maps the record onto an eCH-0011 `person`, as reported to statistics.
    ///
    /// Only the eCH-0011 subset is written; add-on data, locks and
    /// relationships have no place in it.
    pub fn to_person(&self) -> Result<Person> {
        let core = self.core()?;
        let citizenship = match core.citizenship {
            BaseDeliveryCitizenship::PlacesOfOrigin(places) => Citizenship::PlacesOfOrigin(
                places.into_iter().map(|info| info.place_of_origin).collect(),
            ),
            BaseDeliveryCitizenship::ResidencePermit(permit) => Citizenship::ResidencePermit(permit),
        };
        Ok(Person {
            person_identification: core.identification,
            name_data: core.name_data,
            birth_data: core.birth_data,
            religion_data: core.religion_data,
            marital_data: core.marital_data,
            nationality_data: core.nationality_data,
            death_data: core.death_data,
            contact_data: core.contact_data,
            language_of_correspondance: self.language()?,
            restricted_voting_and_election_right_federation: self
                .restricted_voting_and_election_right_federation,
            citizenship,
        })
    }

    fn from_core(view: CoreView<'_>) -> Self {
        let id = view.identification;
        let names = view.name_data;
        let marital = view.marital_data;
        let separation = marital.separation_data.as_ref();
        let (name_on_foreign_passport, declared_foreign_name) = match &names.foreign_name {
            Some(ForeignName::NameOnForeignPassport(name)) => {
                (Some(ForeignNameFields::from_wire(name)), None)
            }
            Some(ForeignName::DeclaredForeignName(name)) => {
                (None, Some(ForeignNameFields::from_wire(name)))
            }
            None => (None, None),
        };
        Self {
            vn: opt_string(&id.vn),
            local_person_id: NamedId::from_wire(&id.local_person_id),
            other_person_ids: ids_from_wire(&id.other_person_id),
            eu_person_ids: ids_from_wire(&id.eu_person_id),
            official_name: id.official_name.as_str().to_string(),
            first_name: id.first_name.as_str().to_string(),
            original_name: opt_string(&id.original_name),
            sex: Some(id.sex),
            date_of_birth: Some(id.date_of_birth),
            alliance_name: opt_string(&names.alliance_name),
            alias_name: opt_string(&names.alias_name),
            other_name: opt_string(&names.other_name),
            call_name: opt_string(&names.call_name),
            name_on_foreign_passport,
            declared_foreign_name,
            birth_place: PlaceFields::from_wire(&view.birth_data.place_of_birth),
            religion: view.religion_data.religion.as_str().to_string(),
            religion_valid_from: view.religion_data.religion_valid_from,
            marital_status: Some(marital.marital_status),
            date_of_marital_status: marital.date_of_marital_status,
            cancelation_reason: marital.cancelation_reason,
            official_proof_of_marital_status: marital.official_proof_of_marital_status,
            separation: separation.and_then(|s| s.separation),
            separation_valid_from: separation.and_then(|s| s.separation_valid_from),
            separation_valid_till: separation.and_then(|s| s.separation_valid_till),
            nationality_status: Some(view.nationality_data.nationality_status),
            nationalities: view
                .nationality_data
                .country_info
                .iter()
                .map(|info| NationalityInfo {
                    country: CountryFields::from_wire(&info.country),
                    valid_from: info.nationality_valid_from,
                })
                .collect(),
            death: view.death_data.map(DeathInfo::from_wire),
            contact: view.contact_data.map(ContactInfo::from_wire),
            ..Self::default()
        }
    }

    /// Flattens an eCH-0020 `baseDeliveryPerson`.
    ///
    /// Fails with `DuplicateFieldMismatch` when a duplicated field disagrees
    /// with `personIdentification`.
    pub fn from_wire(person: &ech0020::BaseDeliveryPerson) -> Result<Self> {
        let view = CoreView {
            identification: &person.person_identification,
            name_data: &person.name_info.name_data,
            birth_data: &person.birth_info.birth_data,
            religion_data: &person.religion_data,
            marital_data: &person.marital_info.marital_data,
            nationality_data: &person.nationality_data,
            death_data: person.death_data.as_ref(),
            contact_data: person.contact_data.as_ref(),
        };
        check_mirrors(&view, &BASE_DELIVERY_MIRRORS)?;

        let (places_of_origin, residence_permit) = match &person.citizenship {
            BaseDeliveryCitizenship::PlacesOfOrigin(places) => (
                places
                    .iter()
                    .map(|info| {
                        PlaceOfOriginFields::from_wire(
                            &info.place_of_origin,
                            info.place_of_origin_addon_data.as_ref(),
                        )
                    })
                    .collect(),
                None,
            ),
            BaseDeliveryCitizenship::ResidencePermit(permit) => {
                (Vec::new(), Some(ResidencePermitInfo::from_wire(permit)))
            }
        };
        let additional = person.person_additional_data.as_ref();
        let lock = &person.lock_data;
        let armed_forces = person.armed_forces_data.as_ref();
        let civil_defense = person.civil_defense_data.as_ref();
        let fire_service = person.fire_service_data.as_ref();
        let inheritance = person.matrimonial_inheritance_arrangement_data.as_ref();

        Ok(Self {
            name_valid_from: person.name_info.name_valid_from,
            parent_names: person
                .birth_info
                .birth_addon_data
                .iter()
                .flat_map(|addon| addon.name_of_parent.iter().map(ParentNameInfo::from_wire))
                .collect(),
            marriage_place: PlaceFields::from_optional(
                person
                    .marital_info
                    .marital_data_addon
                    .as_ref()
                    .and_then(|addon| addon.place_of_marriage.as_ref()),
            ),
            places_of_origin,
            residence_permit,
            data_lock: Some(lock.data_lock),
            data_lock_valid_from: lock.data_lock_valid_from,
            data_lock_valid_till: lock.data_lock_valid_till,
            paper_lock: lock.paper_lock == YesNo::Yes,
            paper_lock_valid_from: lock.paper_lock_valid_from,
            paper_lock_valid_till: lock.paper_lock_valid_till,
            mr_mrs: additional.and_then(|a| a.mr_mrs),
            title: additional.and_then(|a| opt_string(&a.title)),
            language_of_correspondance: additional
                .and_then(|a| opt_string(&a.language_of_correspondance)),
            restricted_voting_and_election_right_federation: person
                .political_right_data
                .as_ref()
                .and_then(|p| p.restricted_voting_and_election_right_federation),
            job: person.job_data.as_ref().map(JobInfo::from_wire),
            spouse: person.marital_relationship.as_ref().map(SpouseInfo::from_wire),
            parents: person
                .parental_relationship
                .iter()
                .map(ParentInfo::from_wire)
                .collect(),
            guardians: person
                .guardian_relationship
                .iter()
                .map(GuardianInfo::from_wire)
                .collect(),
            armed_forces_service: armed_forces.and_then(|a| a.armed_forces_service),
            armed_forces_liability: armed_forces.and_then(|a| a.armed_forces_liability),
            armed_forces_valid_from: armed_forces.and_then(|a| a.armed_forces_valid_from),
            civil_defense: civil_defense.and_then(|c| c.civil_defense),
            civil_defense_valid_from: civil_defense.and_then(|c| c.civil_defense_valid_from),
            fire_service: fire_service.and_then(|f| f.fire_service),
            fire_service_liability: fire_service.and_then(|f| f.fire_service_liability),
            fire_service_valid_from: fire_service.and_then(|f| f.fire_service_valid_from),
            health_insurance: person
                .health_insurance_data
                .as_ref()
                .map(HealthInsuranceInfo::from_wire),
            matrimonial_inheritance_arrangement: inheritance
                .map(|i| i.matrimonial_inheritance_arrangement),
            matrimonial_inheritance_arrangement_valid_from: inheritance
                .and_then(|i| i.matrimonial_inheritance_arrangement_valid_from),
            ..Self::from_core(view)
        })
    }

    /// Flattens an eCH-0011 `person`. Fields it does not carry stay unset.
    pub fn from_person(person: &Person) -> Result<Self> {
        let view = CoreView {
            identification: &person.person_identification,
            name_data: &person.name_data,
            birth_data: &person.birth_data,
            religion_data: &person.religion_data,
            marital_data: &person.marital_data,
            nationality_data: &person.nationality_data,
            death_data: person.death_data.as_ref(),
            contact_data: person.contact_data.as_ref(),
        };
        check_mirrors(&view, &PERSON_MIRRORS)?;

        let (places_of_origin, residence_permit) = match &person.citizenship {
            Citizenship::PlacesOfOrigin(places) => (
                places
                    .iter()
                    .map(|place| PlaceOfOriginFields::from_wire(place, None))
                    .collect(),
                None,
            ),
            Citizenship::ResidencePermit(permit) => {
                (Vec::new(), Some(ResidencePermitInfo::from_wire(permit)))
            }
        };
        Ok(Self {
            places_of_origin,
            residence_permit,
            language_of_correspondance: opt_string(&person.language_of_correspondance),
            restricted_voting_and_election_right_federation: person
                .restricted_voting_and_election_right_federation,
            ..Self::from_core(view)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::MunicipalityInfo;
    use ech_model::codes::{Care, ParentalRelationshipType};
    use ech_wire::ChoiceArity;

    use crate::relationship::PersonIdentity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person() -> BaseDeliveryPerson {
        BaseDeliveryPerson {
            vn: Some("7561234567897".to_string()),
            local_person_id: NamedId::new("CH.ZAR", "4711"),
            official_name: "Müller".to_string(),
            first_name: "Anna".to_string(),
            sex: Some(Sex::Female),
            date_of_birth: Some(DatePartiallyKnown::YearMonthDay(date(1980, 5, 17))),
            birth_place: PlaceFields::swiss(MunicipalityInfo::new(351, "Bern", Canton::BE)),
            religion: "111".to_string(),
            marital_status: Some(MaritalStatus::Single),
            nationality_status: Some(NationalityStatus::Known),
            nationalities: vec![NationalityInfo {
                country: CountryFields {
                    country_id: Some(8100),
                    country_iso2: Some("CH".to_string()),
                    country_name_short: "Schweiz".to_string(),
                },
                valid_from: None,
            }],
            places_of_origin: vec![PlaceOfOriginFields {
                origin_name: "Bern".to_string(),
                canton: Some(Canton::BE),
                ..PlaceOfOriginFields::default()
            }],
            data_lock: Some(DataLock::NoLock),
            ..BaseDeliveryPerson::default()
        }
    }

    #[test]
    fn test_duplicated_fields_are_written_twice() -> Result<()> {
        let wire = person().to_wire()?;
        assert_eq!(wire.person_identification.official_name.as_str(), "Müller");
        assert_eq!(wire.name_info.name_data.official_name.as_str(), "Müller");
        assert_eq!(wire.birth_info.birth_data.sex, Sex::Female);
        assert_eq!(BaseDeliveryPerson::from_wire(&wire)?, person());
        Ok(())
    }

    #[test]
    fn test_mirror_disagreement() -> Result<()> {
        let mut wire = person().to_wire()?;
        wire.name_info.name_data.official_name = BaseName::new("Meier").unwrap();
        assert_eq!(
            BaseDeliveryPerson::from_wire(&wire).unwrap_err(),
            WireError::DuplicateFieldMismatch {
                path: "official_name".to_string(),
                locations: vec![
                    "personIdentification/officialName".to_string(),
                    "nameInfo/nameData/officialName".to_string(),
                ],
            }
        );

        let mut wire = person().to_wire()?;
        wire.birth_info.birth_data.sex = Sex::Male;
        assert!(matches!(
            BaseDeliveryPerson::from_wire(&wire),
            Err(WireError::DuplicateFieldMismatch { ref path, .. }) if path == "sex"
        ));
        Ok(())
    }

    #[test]
    fn test_original_name_in_one_place_only() -> Result<()> {
        let mut wire = person().to_wire()?;
        wire.name_info.name_data.original_name = Some(BaseName::new("Keller").unwrap());
        assert!(matches!(
            BaseDeliveryPerson::from_wire(&wire),
            Err(WireError::DuplicateFieldMismatch { ref path, .. }) if path == "original_name"
        ));
        Ok(())
    }

    #[test]
    fn test_citizenship_needs_exactly_one_arm() {
        let mut record = person();
        record.residence_permit = Some(ResidencePermitInfo {
            permit: "03".to_string(),
            ..ResidencePermitInfo::default()
        });
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::ChoiceViolation {
                group: "citizenship".to_string(),
                arity: ChoiceArity::Multiple(vec![
                    "placeOfOrigin".to_string(),
                    "residencePermit".to_string()
                ]),
            }
        );

        record.residence_permit = None;
        record.places_of_origin.clear();
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::choice_none("citizenship")
        );
    }

    #[test]
    fn test_foreign_name_choice() {
        let mut record = person();
        record.name_on_foreign_passport = Some(ForeignNameFields {
            name: Some("Muller".to_string()),
            first_name: None,
        });
        record.declared_foreign_name = Some(ForeignNameFields::default());
        assert!(matches!(
            record.to_wire(),
            Err(WireError::ChoiceViolation { ref group, .. }) if group == "foreign_name"
        ));
    }

    #[test]
    fn test_parent_name_variants() -> Result<()> {
        let mut record = person();
        record.parent_names = vec![
            ParentNameInfo {
                first_name: Some("Erika".to_string()),
                official_name: Some("Müller".to_string()),
                relationship: Some(ParentNameType::Mother),
                official_proof: Some(true),
            },
            ParentNameInfo {
                first_name: Some("Peter".to_string()),
                relationship: Some(ParentNameType::Father),
                ..ParentNameInfo::default()
            },
        ];
        let wire = record.to_wire()?;
        let parents = &wire.birth_info.birth_addon_data.as_ref().unwrap().name_of_parent;
        assert!(matches!(parents[0].name, ParentName::Full { .. }));
        assert!(matches!(parents[1].name, ParentName::FirstNameOnly(_)));
        assert_eq!(BaseDeliveryPerson::from_wire(&wire)?, record);

        record.parent_names[1].first_name = None;
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::choice_none("parent_names[2]")
        );
        Ok(())
    }

    #[test]
    fn test_required_codes_are_not_invented() {
        let record = BaseDeliveryPerson {
            marital_status: None,
            ..person()
        };
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::missing("marital_status")
        );

        let record = BaseDeliveryPerson {
            data_lock: None,
            ..person()
        };
        assert_eq!(record.to_wire().unwrap_err(), WireError::missing("data_lock"));
    }

    #[test]
    fn test_uid_forms() -> Result<()> {
        let uid = parse_uid("job.occupations[1].uid", "CHE-123.456.789")?;
        assert_eq!(uid.category, UidCategory::Enterprise);
        assert_eq!(uid.id.value(), 123_456_789);
        assert_eq!(format_uid(&uid), "CHE-123.456.789");
        assert_eq!(parse_uid("uid", "ADM000001002")?.id.value(), 1002);
        assert!(parse_uid("uid", "CHE-123.456").is_err());
        assert!(matches!(
            parse_uid("uid", "XYZ-123.456.789"),
            Err(WireError::EnumValueUnknown { .. }) | Err(WireError::ConstraintViolation { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_optional_blocks_round_trip() -> Result<()> {
        let mut record = person();
        record.paper_lock = true;
        record.mr_mrs = Some(MrMrs::Mrs);
        record.language_of_correspondance = Some("de".to_string());
        record.marriage_place = PlaceFields::unknown();
        record.separation = Some(Separation::Voluntary);
        record.civil_defense = Some(YesNo::No);
        record.death = Some(DeathInfo {
            date_from: Some(date(2024, 1, 3)),
            date_to: None,
            place: PlaceFields::default(),
        });
        record.job = Some(JobInfo {
            kind_of_employment: Some(KindOfEmployment::Employed),
            job_title: Some("Schreinerin".to_string()),
            occupations: vec![OccupationInfo {
                uid: Some("CHE-105.805.080".to_string()),
                employer: Some("Holzbau AG".to_string()),
                ..OccupationInfo::default()
            }],
        });
        record.health_insurance = Some(HealthInsuranceInfo {
            insured: Some(YesNo::Yes),
            insurance_name: Some("Krankenkasse Bern".to_string()),
            ..HealthInsuranceInfo::default()
        });
        record.parents = vec![ParentInfo::new(
            PersonIdentity::named("Müller", "Erika"),
            ParentalRelationshipType::Mother,
            Care::Joint,
        )];
        let wire = record.to_wire()?;
        assert!(wire.political_right_data.is_none());
        assert_eq!(wire.lock_data.paper_lock, YesNo::Yes);
        assert_eq!(BaseDeliveryPerson::from_wire(&wire)?, record);
        Ok(())
    }

    #[test]
    fn test_blank_title_is_rejected() -> Result<()> {
        let mut record = person();
        record.title = Some("  ".to_string());
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::constraint("title", "must not be blank")
        );

        record.title = Some("Dr.".to_string());
        let wire = record.to_wire()?;
        let additional = wire.person_additional_data.as_ref().unwrap();
        assert_eq!(additional.title.as_ref().map(|t| t.as_str()), Some("Dr."));
        assert_eq!(BaseDeliveryPerson::from_wire(&wire)?, record);
        Ok(())
    }

    #[test]
    fn test_statistics_person_subset() -> Result<()> {
        let mut record = person();
        record.language_of_correspondance = Some("fr".to_string());
        record.places_of_origin[0].naturalization_date = Some(date(2001, 1, 1));
        let wire = record.to_person()?;
        assert!(matches!(wire.citizenship, Citizenship::PlacesOfOrigin(ref p) if p.len() == 1));
        let back = BaseDeliveryPerson::from_person(&wire)?;
        assert_eq!(back.language_of_correspondance.as_deref(), Some("fr"));
        assert_eq!(back.places_of_origin[0].naturalization_date, None);
        assert_eq!(back.data_lock, None);
        Ok(())
    }
}
