//! Related parties: spouse, parents, guardians and contact partners.
//!
//! Each related party is a sub-identity that expands into its own subtree
//! of identification, address and relationship codes.

use chrono::NaiveDate;
use ech_model::codes::{
    Care, GuardianMeasureLaw, GuardianRelationshipType, MaritalRelationshipType,
    ParentalRelationshipType, Sex,
};
use ech_model::ech0011::{ContactPartner, PartnerIdOrganisation};
use ech_model::ech0021::{
    GuardianMeasureInfo, GuardianPartner, GuardianRelationship, GuardianRelationshipId,
    MaritalRelationship, ParentalRelationship, Partner, PartnerIdentification, Text100,
};
use ech_model::ech0044::{
    BaseName, DatePartiallyKnown, NamedPersonId, PersonIdCategory, PersonIdValue,
    PersonIdentification, PersonIdentificationLight, Vn,
};
use ech_wire::{Result, WireError, select_optional_arm};
use tracing::trace;

use crate::address::MailAddressFields;
use crate::fields::{forbidden, item, join, opt_string, opt_text, required, text};

/// A register id with the register it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedId {
    pub category: String,
    pub id: String,
}

impl NamedId {
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
        }
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<NamedPersonId> {
        Ok(NamedPersonId {
            category: text(&join(path, "category"), &self.category, PersonIdCategory::new)?,
            id: text(&join(path, "id"), &self.id, PersonIdValue::new)?,
        })
    }

    pub(crate) fn from_wire(id: &NamedPersonId) -> Self {
        Self::new(id.category.as_str(), id.id.as_str())
    }
}

pub(crate) fn ids_to_wire(path: &str, ids: &[NamedId]) -> Result<Vec<NamedPersonId>> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| id.to_wire(&item(path, i)))
        .collect()
}

pub(crate) fn ids_from_wire(ids: &[NamedPersonId]) -> Vec<NamedId> {
    ids.iter().map(NamedId::from_wire).collect()
}

/// Identification of a related person.
///
/// Complete identities (local id, sex and date of birth known) are written as
/// `personIdentification`; anything less as `personIdentificationPartner`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonIdentity {
    pub vn: Option<String>,
    pub local_person_id: Option<NamedId>,
    pub other_person_ids: Vec<NamedId>,
    /// Only a complete identification carries EU ids.
    pub eu_person_ids: Vec<NamedId>,
    pub official_name: String,
    pub first_name: String,
    pub original_name: Option<String>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<DatePartiallyKnown>,
}

impl PersonIdentity {
    pub fn named(official_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            official_name: official_name.into(),
            first_name: first_name.into(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.local_person_id.is_some() && self.sex.is_some() && self.date_of_birth.is_some()
    }

    fn vn_wire(&self, path: &str) -> Result<Option<Vn>> {
        opt_text(&join(path, "vn"), self.vn.as_deref(), Vn::new)
    }

    pub(crate) fn to_full(&self, path: &str) -> Result<PersonIdentification> {
        let local_person_id = required(
            &join(path, "local_person_id"),
            self.local_person_id.as_ref(),
        )?;
        Ok(PersonIdentification {
            vn: self.vn_wire(path)?,
            local_person_id: local_person_id.to_wire(&join(path, "local_person_id"))?,
            other_person_id: ids_to_wire(&join(path, "other_person_ids"), &self.other_person_ids)?,
            eu_person_id: ids_to_wire(&join(path, "eu_person_ids"), &self.eu_person_ids)?,
            official_name: text(&join(path, "official_name"), &self.official_name, BaseName::new)?,
            first_name: text(&join(path, "first_name"), &self.first_name, BaseName::new)?,
            original_name: opt_text(
                &join(path, "original_name"),
                self.original_name.as_deref(),
                BaseName::new,
            )?,
            sex: required(&join(path, "sex"), self.sex)?,
            date_of_birth: required(&join(path, "date_of_birth"), self.date_of_birth)?,
        })
    }

    pub(crate) fn to_light(&self, path: &str) -> Result<PersonIdentificationLight> {
        forbidden(
            &join(path, "eu_person_ids"),
            !self.eu_person_ids.is_empty(),
            "only a complete identification carries EU person ids",
        )?;
        Ok(PersonIdentificationLight {
            vn: self.vn_wire(path)?,
            local_person_id: self
                .local_person_id
                .as_ref()
                .map(|id| id.to_wire(&join(path, "local_person_id")))
                .transpose()?,
            other_person_id: ids_to_wire(&join(path, "other_person_ids"), &self.other_person_ids)?,
            official_name: text(&join(path, "official_name"), &self.official_name, BaseName::new)?,
            first_name: text(&join(path, "first_name"), &self.first_name, BaseName::new)?,
            original_name: opt_text(
                &join(path, "original_name"),
                self.original_name.as_deref(),
                BaseName::new,
            )?,
            sex: self.sex,
            date_of_birth: self.date_of_birth,
        })
    }

    pub(crate) fn to_partner(&self, path: &str) -> Result<PartnerIdentification> {
        if self.is_complete() {
            trace!(group = path, arm = "personIdentification", "selected partner arm");
            Ok(PartnerIdentification::Person(self.to_full(path)?))
        } else {
            trace!(group = path, arm = "personIdentificationPartner", "selected partner arm");
            Ok(PartnerIdentification::PersonPartner(self.to_light(path)?))
        }
    }

    pub(crate) fn from_full(person: &PersonIdentification) -> Self {
        Self {
            vn: opt_string(&person.vn),
            local_person_id: Some(NamedId::from_wire(&person.local_person_id)),
            other_person_ids: ids_from_wire(&person.other_person_id),
            eu_person_ids: ids_from_wire(&person.eu_person_id),
            official_name: person.official_name.as_str().to_string(),
            first_name: person.first_name.as_str().to_string(),
            original_name: opt_string(&person.original_name),
            sex: Some(person.sex),
            date_of_birth: Some(person.date_of_birth),
        }
    }

    pub(crate) fn from_light(person: &PersonIdentificationLight) -> Self {
        Self {
            vn: opt_string(&person.vn),
            local_person_id: person.local_person_id.as_ref().map(NamedId::from_wire),
            other_person_ids: ids_from_wire(&person.other_person_id),
            eu_person_ids: Vec::new(),
            official_name: person.official_name.as_str().to_string(),
            first_name: person.first_name.as_str().to_string(),
            original_name: opt_string(&person.original_name),
            sex: person.sex,
            date_of_birth: person.date_of_birth,
        }
    }

    pub(crate) fn from_partner(partner: &PartnerIdentification) -> Self {
        match partner {
            PartnerIdentification::Person(person) => Self::from_full(person),
            PartnerIdentification::PersonPartner(person) => Self::from_light(person),
        }
    }
}

/// An organisation known by its register ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrganisationIdentity {
    pub local_person_id: NamedId,
    pub other_person_ids: Vec<NamedId>,
}

/// The party behind a contact or guardian: a person (complete or partial)
/// or an organisation. At most one may be set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartnerFields {
    pub person: Option<PersonIdentity>,
    pub person_partner: Option<PersonIdentity>,
    pub organisation: Option<OrganisationIdentity>,
}

impl PartnerFields {
    pub fn person(person: PersonIdentity) -> Self {
        Self {
            person: Some(person),
            ..Self::default()
        }
    }

    pub fn person_partner(person: PersonIdentity) -> Self {
        Self {
            person_partner: Some(person),
            ..Self::default()
        }
    }

    pub fn organisation(organisation: OrganisationIdentity) -> Self {
        Self {
            organisation: Some(organisation),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.person.is_none() && self.person_partner.is_none() && self.organisation.is_none()
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<Option<ContactPartner>> {
        let arm = select_optional_arm(
            path,
            &[
                ("personIdentification", self.person.is_some()),
                ("personIdentificationPartner", self.person_partner.is_some()),
                ("partnerIdOrganisation", self.organisation.is_some()),
            ],
        )?;
        if let Some(arm) = arm {
            trace!(group = path, arm, "selected partner arm");
        }
        let partner = match (&self.person, &self.person_partner, &self.organisation) {
            (Some(person), _, _) => ContactPartner::Person(person.to_full(&join(path, "person"))?),
            (_, Some(person), _) => {
                ContactPartner::PersonPartner(person.to_light(&join(path, "person_partner"))?)
            }
            (_, _, Some(organisation)) => {
                let path = join(path, "organisation");
                ContactPartner::Organisation(PartnerIdOrganisation {
                    local_person_id: organisation
                        .local_person_id
                        .to_wire(&join(&path, "local_person_id"))?,
                    other_person_id: ids_to_wire(
                        &join(&path, "other_person_ids"),
                        &organisation.other_person_ids,
                    )?,
                })
            }
            (None, None, None) => return Ok(None),
        };
        Ok(Some(partner))
    }

    pub(crate) fn from_wire(partner: Option<&ContactPartner>) -> Self {
        match partner {
            None => Self::default(),
            Some(ContactPartner::Person(person)) => Self::person(PersonIdentity::from_full(person)),
            Some(ContactPartner::PersonPartner(person)) => {
                Self::person_partner(PersonIdentity::from_light(person))
            }
            Some(ContactPartner::Organisation(organisation)) => {
                Self::organisation(OrganisationIdentity {
                    local_person_id: NamedId::from_wire(&organisation.local_person_id),
                    other_person_ids: ids_from_wire(&organisation.other_person_id),
                })
            }
        }
    }
}

fn address_to_wire(
    path: &str,
    address: Option<&MailAddressFields>,
) -> Result<Option<ech_model::ech0010::MailAddress>> {
    address
        .map(|address| address.to_wire(&join(path, "address")))
        .transpose()
}

/// The person's spouse or registered partner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpouseInfo {
    pub person: PersonIdentity,
    pub address: Option<MailAddressFields>,
    /// Required whenever a spouse is given.
    pub relationship_type: Option<MaritalRelationshipType>,
}

impl SpouseInfo {
    pub(crate) fn to_wire(&self, path: &str) -> Result<MaritalRelationship> {
        Ok(MaritalRelationship {
            partner: Partner {
                identification: self.person.to_partner(&join(path, "person"))?,
                address: address_to_wire(path, self.address.as_ref())?,
            },
            type_of_relationship: required(
                &join(path, "relationship_type"),
                self.relationship_type,
            )?,
        })
    }

    pub(crate) fn from_wire(relationship: &MaritalRelationship) -> Self {
        Self {
            person: PersonIdentity::from_partner(&relationship.partner.identification),
            address: relationship
                .partner
                .address
                .as_ref()
                .map(MailAddressFields::from_wire),
            relationship_type: Some(relationship.type_of_relationship),
        }
    }
}

/// A parent (or foster parent) relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentInfo {
    pub person: PersonIdentity,
    pub relationship_type: ParentalRelationshipType,
    pub care: Care,
    pub valid_from: Option<NaiveDate>,
    pub address: Option<MailAddressFields>,
}

impl ParentInfo {
    pub fn new(person: PersonIdentity, relationship_type: ParentalRelationshipType, care: Care) -> Self {
        Self {
            person,
            relationship_type,
            care,
            valid_from: None,
            address: None,
        }
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<ParentalRelationship> {
        Ok(ParentalRelationship {
            partner: Partner {
                identification: self.person.to_partner(&join(path, "person"))?,
                address: address_to_wire(path, self.address.as_ref())?,
            },
            relationship_valid_from: self.valid_from,
            type_of_relationship: self.relationship_type,
            care: self.care,
        })
    }

    pub(crate) fn from_wire(relationship: &ParentalRelationship) -> Self {
        Self {
            person: PersonIdentity::from_partner(&relationship.partner.identification),
            relationship_type: relationship.type_of_relationship,
            care: relationship.care,
            valid_from: relationship.relationship_valid_from,
            address: relationship
                .partner
                .address
                .as_ref()
                .map(MailAddressFields::from_wire),
        }
    }
}

/// A guardianship measure and the guardian appointed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardianInfo {
    pub guardian_relationship_id: String,
    pub partner: PartnerFields,
    /// Only written together with a partner.
    pub address: Option<MailAddressFields>,
    pub relationship_type: GuardianRelationshipType,
    pub based_on_law: Vec<GuardianMeasureLaw>,
    pub based_on_law_add_on: Option<String>,
    pub measure_valid_from: NaiveDate,
    pub care: Option<Care>,
}

impl GuardianInfo {
    pub fn new(
        guardian_relationship_id: impl Into<String>,
        relationship_type: GuardianRelationshipType,
        measure_valid_from: NaiveDate,
    ) -> Self {
        Self {
            guardian_relationship_id: guardian_relationship_id.into(),
            partner: PartnerFields::default(),
            address: None,
            relationship_type,
            based_on_law: Vec::new(),
            based_on_law_add_on: None,
            measure_valid_from,
            care: None,
        }
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<GuardianRelationship> {
        let partner_path = join(path, "partner");
        let identification = self.partner.to_wire(&partner_path)?;
        let partner = match identification {
            Some(identification) => Some(GuardianPartner {
                identification,
                address: address_to_wire(path, self.address.as_ref())?,
            }),
            None if self.address.is_some() => return Err(WireError::choice_none(partner_path)),
            None => None,
        };
        Ok(GuardianRelationship {
            guardian_relationship_id: text(
                &join(path, "guardian_relationship_id"),
                &self.guardian_relationship_id,
                GuardianRelationshipId::new,
            )?,
            partner,
            type_of_relationship: self.relationship_type,
            guardian_measure_info: GuardianMeasureInfo {
                based_on_law: self.based_on_law.clone(),
                based_on_law_add_on: opt_text(
                    &join(path, "based_on_law_add_on"),
                    self.based_on_law_add_on.as_deref(),
                    Text100::new,
                )?,
                guardian_measure_valid_from: self.measure_valid_from,
            },
            care: self.care,
        })
    }

    pub(crate) fn from_wire(relationship: &GuardianRelationship) -> Self {
        let partner = relationship.partner.as_ref();
        Self {
            guardian_relationship_id: relationship.guardian_relationship_id.as_str().to_string(),
            partner: PartnerFields::from_wire(partner.map(|p| &p.identification)),
            address: partner
                .and_then(|p| p.address.as_ref())
                .map(MailAddressFields::from_wire),
            relationship_type: relationship.type_of_relationship,
            based_on_law: relationship.guardian_measure_info.based_on_law.clone(),
            based_on_law_add_on: opt_string(&relationship.guardian_measure_info.based_on_law_add_on),
            measure_valid_from: relationship.guardian_measure_info.guardian_measure_valid_from,
            care: relationship.care,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressFields;
    use ech_wire::ChoiceArity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_identity() -> PersonIdentity {
        PersonIdentity {
            vn: Some("7569876543210".to_string()),
            local_person_id: Some(NamedId::new("CH.ZAR", "4712")),
            sex: Some(Sex::Male),
            date_of_birth: Some(DatePartiallyKnown::YearMonthDay(date(1978, 2, 1))),
            ..PersonIdentity::named("Müller", "Hans")
        }
    }

    #[test]
    fn test_spouse_with_complete_identity_uses_full_arm() -> Result<()> {
        let spouse = SpouseInfo {
            person: complete_identity(),
            address: None,
            relationship_type: Some(MaritalRelationshipType::Married),
        };
        let wire = spouse.to_wire("spouse")?;
        assert!(matches!(
            wire.partner.identification,
            PartnerIdentification::Person(_)
        ));
        assert_eq!(SpouseInfo::from_wire(&wire), spouse);
        Ok(())
    }

    #[test]
    fn test_spouse_needs_relationship_type() {
        let spouse = SpouseInfo {
            person: complete_identity(),
            ..SpouseInfo::default()
        };
        assert_eq!(
            spouse.to_wire("spouse").unwrap_err(),
            WireError::missing("spouse.relationship_type")
        );
    }

    #[test]
    fn test_partial_parent_uses_light_arm() -> Result<()> {
        let mut parent = ParentInfo::new(
            PersonIdentity::named("Müller", "Erika"),
            ParentalRelationshipType::Mother,
            Care::Joint,
        );
        parent.address = Some(MailAddressFields::person(
            None,
            "Erika",
            "Müller",
            AddressFields::swiss("Bundesgasse", "3", 3011, "Bern"),
        ));
        let wire = parent.to_wire("parents[1]")?;
        assert!(matches!(
            wire.partner.identification,
            PartnerIdentification::PersonPartner(_)
        ));
        assert_eq!(ParentInfo::from_wire(&wire), parent);
        Ok(())
    }

    #[test]
    fn test_missing_name_in_nested_identity() {
        let parent = ParentInfo::new(
            PersonIdentity::named("", "Erika"),
            ParentalRelationshipType::Mother,
            Care::Joint,
        );
        assert_eq!(
            parent.to_wire("parents[2]").unwrap_err(),
            WireError::missing("parents[2].person.official_name")
        );
    }

    #[test]
    fn test_light_identity_rejects_eu_ids() {
        let person = PersonIdentity {
            eu_person_ids: vec![NamedId::new("EU.X", "1")],
            ..PersonIdentity::named("Rossi", "Mario")
        };
        assert!(matches!(
            person.to_light("spouse.person"),
            Err(WireError::ConstraintViolation { ref path, .. }) if path == "spouse.person.eu_person_ids"
        ));
    }

    #[test]
    fn test_guardian_partner_choice() -> Result<()> {
        let mut guardian = GuardianInfo::new("G-1", GuardianRelationshipType::Curator, date(2020, 1, 1));
        guardian.partner = PartnerFields {
            person: Some(complete_identity()),
            organisation: Some(OrganisationIdentity {
                local_person_id: NamedId::new("CH.KESB", "99"),
                other_person_ids: Vec::new(),
            }),
            ..PartnerFields::default()
        };
        assert_eq!(
            guardian.to_wire("guardians[1]").unwrap_err(),
            WireError::ChoiceViolation {
                group: "guardians[1].partner".to_string(),
                arity: ChoiceArity::Multiple(vec![
                    "personIdentification".to_string(),
                    "partnerIdOrganisation".to_string()
                ]),
            }
        );

        guardian.partner.person = None;
        guardian.based_on_law = vec![GuardianMeasureLaw::Art393, GuardianMeasureLaw::Art394];
        let wire = guardian.to_wire("guardians[1]")?;
        assert_eq!(GuardianInfo::from_wire(&wire), guardian);
        Ok(())
    }

    #[test]
    fn test_guardian_address_needs_partner() {
        let mut guardian = GuardianInfo::new("G-2", GuardianRelationshipType::Guardian, date(2021, 6, 1));
        guardian.address = Some(MailAddressFields::organisation(
            "KESB Bern",
            AddressFields::swiss("Bundesgasse", "3", 3011, "Bern"),
        ));
        assert_eq!(
            guardian.to_wire("guardians[1]").unwrap_err(),
            WireError::choice_none("guardians[1].partner")
        );
    }
}
