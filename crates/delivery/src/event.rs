//! The flattened `eventBaseDelivery`: a person and where they live.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use ech_model::codes::{FederalRegister, TypeOfHousehold};
use ech_model::ech0007::SwissMunicipality;
use ech_model::ech0008::CountryIso2;
use ech_model::ech0010::{
    AddressLine, DwellingNumber, HouseNumber, SwissAddressInformation, SwissZipCode,
    SwissZipCodeAddOn, TownName,
};
use ech_model::ech0011::{
    Destination, DwellingAddress, Egid, Ewid, HouseholdId, MainResidence, OtherResidence,
    ReportedPerson, Residence, ResidenceData, SecondaryResidence,
};
use ech_model::ech0020::{
    EventBaseDelivery, EventResidence, HasMainResidence, HasOtherResidence,
    HasSecondaryResidence, Reporting,
};
use ech_wire::{Result, WireError, select_arm};
use tracing::trace;

use crate::address::AddressFields;
use crate::fields::{
    checked, forbidden, item, join, opt_checked, opt_string, opt_text, required, text,
};
use crate::person::BaseDeliveryPerson;
use crate::place::{MunicipalityInfo, PlaceFields, SecondaryResidenceInfo};

/// The kind of residence a municipality reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidenceType {
    #[default]
    Main,
    Secondary,
    Other,
}

impl ResidenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidenceType::Main => "main",
            ResidenceType::Secondary => "secondary",
            ResidenceType::Other => "other",
        }
    }
}

impl fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResidenceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(ResidenceType::Main),
            "secondary" => Ok(ResidenceType::Secondary),
            "other" => Ok(ResidenceType::Other),
            other => Err(format!("unknown residence type: {other}")),
        }
    }
}

/// Where a person came from or moved to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DestinationInfo {
    pub place: PlaceFields,
    pub mail_address: Option<AddressFields>,
}

impl DestinationInfo {
    pub fn new(place: PlaceFields) -> Self {
        Self {
            place,
            mail_address: None,
        }
    }

    fn to_wire(&self, path: &str) -> Result<Destination> {
        Ok(Destination {
            place: self.place.to_required(&join(path, "place"))?,
            mail_address: self
                .mail_address
                .as_ref()
                .map(|address| address.to_wire(&join(path, "mail_address")))
                .transpose()?,
        })
    }

    fn from_wire(destination: &Destination) -> Self {
        Self {
            place: PlaceFields::from_wire(&destination.place),
            mail_address: destination.mail_address.as_ref().map(AddressFields::from_wire),
        }
    }
}

/// The dwelling a person lives in, with its building and dwelling ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DwellingAddressInfo {
    /// Federal building id.
    pub egid: Option<u32>,
    /// Federal dwelling id within the building.
    pub ewid: Option<u16>,
    pub household_id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub dwelling_number: Option<String>,
    pub locality: Option<String>,
    pub town: String,
    pub swiss_zip_code: Option<u16>,
    pub swiss_zip_code_add_on: Option<String>,
    pub swiss_zip_code_id: Option<u32>,
    pub country: String,
    pub type_of_household: Option<TypeOfHousehold>,
    pub moving_date: Option<NaiveDate>,
}

impl DwellingAddressInfo {
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        swiss_zip_code: u16,
        town: impl Into<String>,
        type_of_household: TypeOfHousehold,
    ) -> Self {
        Self {
            street: Some(street.into()),
            house_number: Some(house_number.into()),
            swiss_zip_code: Some(swiss_zip_code),
            town: town.into(),
            country: "CH".to_string(),
            type_of_household: Some(type_of_household),
            ..Self::default()
        }
    }

    fn to_wire(&self, path: &str) -> Result<DwellingAddress> {
        let line = |field: &str, value: &Option<String>| {
            opt_text(&join(path, field), value.as_deref(), AddressLine::new)
        };
        let zip_path = join(path, "swiss_zip_code");
        let zip = required(&zip_path, self.swiss_zip_code)?;
        let address = SwissAddressInformation {
            address_line1: line("address_line1", &self.address_line1)?,
            address_line2: line("address_line2", &self.address_line2)?,
            street: line("street", &self.street)?,
            house_number: opt_text(
                &join(path, "house_number"),
                self.house_number.as_deref(),
                HouseNumber::new,
            )?,
            dwelling_number: opt_text(
                &join(path, "dwelling_number"),
                self.dwelling_number.as_deref(),
                DwellingNumber::new,
            )?,
            locality: opt_text(&join(path, "locality"), self.locality.as_deref(), TownName::new)?,
            town: text(&join(path, "town"), &self.town, TownName::new)?,
            swiss_zip_code: checked(&zip_path, SwissZipCode::new(zip))?,
            swiss_zip_code_add_on: opt_text(
                &join(path, "swiss_zip_code_add_on"),
                self.swiss_zip_code_add_on.as_deref(),
                SwissZipCodeAddOn::new,
            )?,
            swiss_zip_code_id: self.swiss_zip_code_id,
            country: text(&join(path, "country"), &self.country, CountryIso2::new)?,
        };
        Ok(DwellingAddress {
            egid: opt_checked(&join(path, "egid"), self.egid.map(Egid::new))?,
            ewid: opt_checked(&join(path, "ewid"), self.ewid.map(Ewid::new))?,
            household_id: opt_text(
                &join(path, "household_id"),
                self.household_id.as_deref(),
                HouseholdId::new,
            )?,
            address,
            type_of_household: required(&join(path, "type_of_household"), self.type_of_household)?,
            moving_date: self.moving_date,
        })
    }

    fn from_wire(dwelling: &DwellingAddress) -> Self {
        let address = &dwelling.address;
        Self {
            egid: dwelling.egid.map(|egid| egid.get()),
            ewid: dwelling.ewid.map(|ewid| ewid.get()),
            household_id: opt_string(&dwelling.household_id),
            address_line1: opt_string(&address.address_line1),
            address_line2: opt_string(&address.address_line2),
            street: opt_string(&address.street),
            house_number: opt_string(&address.house_number),
            dwelling_number: opt_string(&address.dwelling_number),
            locality: opt_string(&address.locality),
            town: address.town.as_str().to_string(),
            swiss_zip_code: Some(address.swiss_zip_code.get()),
            swiss_zip_code_add_on: opt_string(&address.swiss_zip_code_add_on),
            swiss_zip_code_id: address.swiss_zip_code_id,
            country: address.country.as_str().to_string(),
            type_of_household: Some(dwelling.type_of_household),
            moving_date: dwelling.moving_date,
        }
    }
}

/// One person's base delivery event.
///
/// Which fields a residence type needs:
///
/// | Residence type | `comes_from` | `main_residence` | `secondary_residences` |
/// |---|---|---|---|
/// | `Main` | optional | forbidden | allowed |
/// | `Secondary` | required | required | forbidden |
/// | `Other` | required | forbidden | forbidden |
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseDeliveryEvent {
    pub person: BaseDeliveryPerson,
    pub residence_type: ResidenceType,
    /// Exactly one of `reporting_municipality` and `federal_register`.
    pub reporting_municipality: Option<MunicipalityInfo>,
    pub federal_register: Option<FederalRegister>,
    pub arrival_date: Option<NaiveDate>,
    pub comes_from: Option<DestinationInfo>,
    pub dwelling_address: DwellingAddressInfo,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<DestinationInfo>,
    pub main_residence: Option<MunicipalityInfo>,
    pub secondary_residences: Vec<SecondaryResidenceInfo>,
    pub base_delivery_valid_from: Option<NaiveDate>,
}

/// Residence blocks common to every residence type.
struct ResidenceParts {
    reporting: Reporting,
    arrival_date: NaiveDate,
    comes_from: Option<Destination>,
    dwelling_address: DwellingAddress,
    departure_date: Option<NaiveDate>,
    goes_to: Option<Destination>,
}

impl BaseDeliveryEvent {
    fn check_residence_rules(&self) -> Result<()> {
        let kind = self.residence_type;
        match kind {
            ResidenceType::Main => {}
            ResidenceType::Secondary | ResidenceType::Other => {
                required("comes_from", self.comes_from.as_ref())?;
            }
        }
        match kind {
            ResidenceType::Secondary => {
                required("main_residence", self.main_residence.as_ref())?;
            }
            ResidenceType::Main | ResidenceType::Other => forbidden(
                "main_residence",
                self.main_residence.is_some(),
                &format!("only a secondary residence names a main residence (residence type {kind})"),
            )?,
        }
        forbidden(
            "secondary_residences",
            kind != ResidenceType::Main && !self.secondary_residences.is_empty(),
            &format!("only a main residence lists secondary residences (residence type {kind})"),
        )
    }

    fn reporting(&self) -> Result<Reporting> {
        let arm = select_arm(
            "reporting",
            &[
                ("reportingMunicipality", self.reporting_municipality.is_some()),
                ("federalRegister", self.federal_register.is_some()),
            ],
        )?;
        trace!(group = "reporting", arm, "selected reporting arm");
        match (&self.reporting_municipality, self.federal_register) {
            (Some(municipality), _) => Ok(Reporting::Municipality(
                municipality.to_wire("reporting_municipality")?,
            )),
            (None, Some(register)) => Ok(Reporting::FederalRegister(register)),
            (None, None) => Err(WireError::choice_none("reporting")),
        }
    }

    fn residence_parts(&self) -> Result<ResidenceParts> {
        self.check_residence_rules()?;
        Ok(ResidenceParts {
            reporting: self.reporting()?,
            arrival_date: required("arrival_date", self.arrival_date)?,
            comes_from: self
                .comes_from
                .as_ref()
                .map(|d| d.to_wire("comes_from"))
                .transpose()?,
            dwelling_address: self.dwelling_address.to_wire("dwelling_address")?,
            departure_date: self.departure_date,
            goes_to: self.goes_to.as_ref().map(|d| d.to_wire("goes_to")).transpose()?,
        })
    }

    fn secondary_residence_list(&self) -> Result<Vec<SwissMunicipality>> {
        self.secondary_residences
            .iter()
            .enumerate()
            .map(|(i, m)| m.to_wire(&item("secondary_residences", i)))
            .collect()
    }

    fn main_residence_wire(&self) -> Result<SwissMunicipality> {
        required("main_residence", self.main_residence.as_ref())?.to_wire("main_residence")
    }

    /// Maps the event onto an eCH-0020 `eventBaseDelivery`.
    pub fn to_wire(&self) -> Result<EventBaseDelivery> {
        let base_delivery_person = self.person.to_wire()?;
        let parts = self.residence_parts()?;
        let comes_from = |parts: &ResidenceParts| {
            parts
                .comes_from
                .clone()
                .ok_or_else(|| WireError::missing("comes_from"))
        };
        let residence = match self.residence_type {
            ResidenceType::Main => EventResidence::Main(HasMainResidence {
                secondary_residence: self.secondary_residence_list()?,
                reporting: parts.reporting,
                arrival_date: parts.arrival_date,
                comes_from: parts.comes_from,
                dwelling_address: parts.dwelling_address,
                departure_date: parts.departure_date,
                goes_to: parts.goes_to,
            }),
            ResidenceType::Secondary => EventResidence::Secondary(HasSecondaryResidence {
                comes_from: comes_from(&parts)?,
                main_residence: self.main_residence_wire()?,
                reporting: parts.reporting,
                arrival_date: parts.arrival_date,
                dwelling_address: parts.dwelling_address,
                departure_date: parts.departure_date,
                goes_to: parts.goes_to,
            }),
            ResidenceType::Other => EventResidence::Other(HasOtherResidence {
                comes_from: comes_from(&parts)?,
                reporting: parts.reporting,
                arrival_date: parts.arrival_date,
                dwelling_address: parts.dwelling_address,
                departure_date: parts.departure_date,
                goes_to: parts.goes_to,
            }),
        };
        Ok(EventBaseDelivery {
            base_delivery_person,
            residence,
            base_delivery_valid_from: self.base_delivery_valid_from,
        })
    }

    /// Flattens an eCH-0020 `eventBaseDelivery`.
    pub fn from_wire(event: &EventBaseDelivery) -> Result<Self> {
        let person = BaseDeliveryPerson::from_wire(&event.base_delivery_person)?;
        let (residence_type, reporting, arrival_date, comes_from, dwelling, departure_date, goes_to) =
            match &event.residence {
                EventResidence::Main(r) => (
                    ResidenceType::Main,
                    &r.reporting,
                    r.arrival_date,
                    r.comes_from.as_ref(),
                    &r.dwelling_address,
                    r.departure_date,
                    r.goes_to.as_ref(),
                ),
                EventResidence::Secondary(r) => (
                    ResidenceType::Secondary,
                    &r.reporting,
                    r.arrival_date,
                    Some(&r.comes_from),
                    &r.dwelling_address,
                    r.departure_date,
                    r.goes_to.as_ref(),
                ),
                EventResidence::Other(r) => (
                    ResidenceType::Other,
                    &r.reporting,
                    r.arrival_date,
                    Some(&r.comes_from),
                    &r.dwelling_address,
                    r.departure_date,
                    r.goes_to.as_ref(),
                ),
            };
        let (reporting_municipality, federal_register) = match reporting {
            Reporting::Municipality(m) => (Some(MunicipalityInfo::from_wire(m)), None),
            Reporting::FederalRegister(register) => (None, Some(*register)),
        };
        let (main_residence, secondary_residences) = match &event.residence {
            EventResidence::Main(r) => (
                None,
                r.secondary_residence
                    .iter()
                    .map(MunicipalityInfo::from_wire)
                    .collect(),
            ),
            EventResidence::Secondary(r) => {
                (Some(MunicipalityInfo::from_wire(&r.main_residence)), Vec::new())
            }
            EventResidence::Other(_) => (None, Vec::new()),
        };
        Ok(Self {
            person,
            residence_type,
            reporting_municipality,
            federal_register,
            arrival_date: Some(arrival_date),
            comes_from: comes_from.map(DestinationInfo::from_wire),
            dwelling_address: DwellingAddressInfo::from_wire(dwelling),
            departure_date,
            goes_to: goes_to.map(DestinationInfo::from_wire),
            main_residence,
            secondary_residences,
            base_delivery_valid_from: event.base_delivery_valid_from,
        })
    }

    /// Maps the event onto an eCH-0011 `reportedPerson` for statistics.
    ///
    /// Statistics only know municipalities as reporters; an event reported
    /// by a federal register cannot be expressed.
    pub fn to_reported_person(&self) -> Result<ReportedPerson> {
        let person = self.person.to_person()?;
        let parts = self.residence_parts()?;
        let reporting_municipality = match parts.reporting {
            Reporting::Municipality(municipality) => municipality,
            Reporting::FederalRegister(_) => {
                return Err(WireError::constraint(
                    "federal_register",
                    "statistics deliveries need a reporting municipality",
                ));
            }
        };
        let data = ResidenceData {
            reporting_municipality,
            arrival_date: parts.arrival_date,
            comes_from: parts.comes_from,
            dwelling_address: parts.dwelling_address,
            departure_date: parts.departure_date,
            goes_to: parts.goes_to,
        };
        let residence = match self.residence_type {
            ResidenceType::Main => Residence::Main(MainResidence {
                main_residence: data,
                secondary_residence: self.secondary_residence_list()?,
            }),
            ResidenceType::Secondary => Residence::Secondary(SecondaryResidence {
                main_residence: self.main_residence_wire()?,
                secondary_residence: data,
            }),
            ResidenceType::Other => Residence::Other(OtherResidence {
                secondary_residence: data,
            }),
        };
        Ok(ReportedPerson { person, residence })
    }

    /// Flattens an eCH-0011 `reportedPerson`.
    pub fn from_reported_person(reported: &ReportedPerson) -> Result<Self> {
        let person = BaseDeliveryPerson::from_person(&reported.person)?;
        let (residence_type, data, main_residence, secondary_residences) = match &reported.residence {
            Residence::Main(r) => (
                ResidenceType::Main,
                &r.main_residence,
                None,
                r.secondary_residence
                    .iter()
                    .map(MunicipalityInfo::from_wire)
                    .collect(),
            ),
            Residence::Secondary(r) => (
                ResidenceType::Secondary,
                &r.secondary_residence,
                Some(MunicipalityInfo::from_wire(&r.main_residence)),
                Vec::new(),
            ),
            Residence::Other(r) => (ResidenceType::Other, &r.secondary_residence, None, Vec::new()),
        };
        Ok(Self {
            person,
            residence_type,
            reporting_municipality: Some(MunicipalityInfo::from_wire(&data.reporting_municipality)),
            federal_register: None,
            arrival_date: Some(data.arrival_date),
            comes_from: data.comes_from.as_ref().map(DestinationInfo::from_wire),
            dwelling_address: DwellingAddressInfo::from_wire(&data.dwelling_address),
            departure_date: data.departure_date,
            goes_to: data.goes_to.as_ref().map(DestinationInfo::from_wire),
            main_residence,
            secondary_residences,
            base_delivery_valid_from: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{NationalityInfo, PlaceOfOriginFields};
    use crate::place::CountryFields;
    use crate::relationship::NamedId;
    use ech_model::codes::{Canton, DataLock, MaritalStatus, NationalityStatus, Sex};
    use ech_model::ech0044::DatePartiallyKnown;
    use ech_wire::ChoiceArity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bern() -> MunicipalityInfo {
        MunicipalityInfo::new(351, "Bern", Canton::BE)
    }

    fn event(residence_type: ResidenceType) -> BaseDeliveryEvent {
        BaseDeliveryEvent {
            person: BaseDeliveryPerson {
                local_person_id: NamedId::new("CH.ZAR", "4711"),
                official_name: "Müller".to_string(),
                first_name: "Anna".to_string(),
                sex: Some(Sex::Female),
                date_of_birth: Some(DatePartiallyKnown::YearMonthDay(date(1980, 5, 17))),
                birth_place: PlaceFields::unknown(),
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
            },
            residence_type,
            reporting_municipality: Some(bern()),
            arrival_date: Some(date(2020, 4, 1)),
            dwelling_address: DwellingAddressInfo::new(
                "Bundesgasse",
                "3",
                3011,
                "Bern",
                TypeOfHousehold::Private,
            ),
            ..BaseDeliveryEvent::default()
        }
    }

    #[test]
    fn test_main_residence_round_trip() -> Result<()> {
        let mut record = event(ResidenceType::Main);
        record.secondary_residences = vec![MunicipalityInfo::new(371, "Biel/Bienne", Canton::BE)];
        let wire = record.to_wire()?;
        assert!(matches!(wire.residence, EventResidence::Main(ref r) if r.secondary_residence.len() == 1));
        assert_eq!(BaseDeliveryEvent::from_wire(&wire)?, record);
        Ok(())
    }

    #[test]
    fn test_secondary_residence_rules() -> Result<()> {
        let mut record = event(ResidenceType::Secondary);
        assert_eq!(record.to_wire().unwrap_err(), WireError::missing("comes_from"));

        record.comes_from = Some(DestinationInfo::new(PlaceFields::swiss(bern())));
        assert_eq!(record.to_wire().unwrap_err(), WireError::missing("main_residence"));

        record.main_residence = Some(MunicipalityInfo::new(261, "Zürich", Canton::ZH));
        record.secondary_residences = vec![bern()];
        assert!(matches!(
            record.to_wire(),
            Err(WireError::ConstraintViolation { ref path, .. }) if path == "secondary_residences"
        ));

        record.secondary_residences.clear();
        let wire = record.to_wire()?;
        assert_eq!(BaseDeliveryEvent::from_wire(&wire)?, record);
        Ok(())
    }

    #[test]
    fn test_other_residence_forbids_main_residence() {
        let mut record = event(ResidenceType::Other);
        record.comes_from = Some(DestinationInfo::new(PlaceFields::unknown()));
        record.main_residence = Some(bern());
        assert!(matches!(
            record.to_wire(),
            Err(WireError::ConstraintViolation { ref path, .. }) if path == "main_residence"
        ));
    }

    #[test]
    fn test_reporting_choice() -> Result<()> {
        let mut record = event(ResidenceType::Main);
        record.federal_register = Some(FederalRegister::Zemis);
        assert_eq!(
            record.to_wire().unwrap_err(),
            WireError::ChoiceViolation {
                group: "reporting".to_string(),
                arity: ChoiceArity::Multiple(vec![
                    "reportingMunicipality".to_string(),
                    "federalRegister".to_string()
                ]),
            }
        );

        record.reporting_municipality = None;
        let wire = record.to_wire()?;
        assert_eq!(BaseDeliveryEvent::from_wire(&wire)?, record);
        assert!(matches!(
            record.to_reported_person(),
            Err(WireError::ConstraintViolation { ref path, .. }) if path == "federal_register"
        ));
        Ok(())
    }

    #[test]
    fn test_reported_person_round_trip() -> Result<()> {
        let record = event(ResidenceType::Main);
        let reported = record.to_reported_person()?;
        assert!(matches!(reported.residence, Residence::Main(_)));
        let back = BaseDeliveryEvent::from_reported_person(&reported)?;
        assert_eq!(back.dwelling_address, record.dwelling_address);
        assert_eq!(back.person.official_name, "Müller");
        Ok(())
    }

    #[test]
    fn test_residence_type_text() {
        assert_eq!("Secondary".parse::<ResidenceType>(), Ok(ResidenceType::Secondary));
        assert_eq!(ResidenceType::Other.to_string(), "other");
        assert!("primary".parse::<ResidenceType>().is_err());
    }
}
