//! Flattened places: municipalities, countries and the general place choice.

use ech_model::codes::Canton;
use ech_model::ech0007::{HistoryMunicipalityId, MunicipalityId, MunicipalityName, SwissMunicipality};
use ech_model::ech0008::{Country, CountryId, CountryIso2, CountryNameShort};
use ech_model::ech0011::{ForeignCountry, GeneralPlace, PlaceName};
use ech_wire::{Result, WireError, select_optional_arm};
use tracing::trace;

use crate::fields::{join, opt_checked, opt_text, text};

/// A Swiss municipality.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MunicipalityInfo {
    /// BFS number.
    pub municipality_id: Option<u16>,
    pub municipality_name: String,
    pub canton: Option<Canton>,
    pub history_municipality_id: Option<u64>,
}

/// Municipality of a secondary residence, listed by the main residence.
pub type SecondaryResidenceInfo = MunicipalityInfo;

impl MunicipalityInfo {
    pub fn new(municipality_id: u16, municipality_name: impl Into<String>, canton: Canton) -> Self {
        Self {
            municipality_id: Some(municipality_id),
            municipality_name: municipality_name.into(),
            canton: Some(canton),
            history_municipality_id: None,
        }
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<SwissMunicipality> {
        Ok(SwissMunicipality {
            municipality_id: opt_checked(
                &join(path, "municipality_id"),
                self.municipality_id.map(MunicipalityId::new),
            )?,
            municipality_name: text(
                &join(path, "municipality_name"),
                &self.municipality_name,
                MunicipalityName::new,
            )?,
            canton_abbreviation: self.canton,
            history_municipality_id: opt_checked(
                &join(path, "history_municipality_id"),
                self.history_municipality_id.map(HistoryMunicipalityId::new),
            )?,
        })
    }

    pub(crate) fn from_wire(municipality: &SwissMunicipality) -> Self {
        Self {
            municipality_id: municipality.municipality_id.map(|id| id.get()),
            municipality_name: municipality.municipality_name.as_str().to_string(),
            canton: municipality.canton_abbreviation,
            history_municipality_id: municipality.history_municipality_id.map(|id| id.get()),
        }
    }
}

/// A country, by BFS number, ISO code and short name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountryFields {
    pub country_id: Option<u16>,
    pub country_iso2: Option<String>,
    pub country_name_short: String,
}

impl CountryFields {
    pub(crate) fn to_wire(&self, path: &str) -> Result<Country> {
        Ok(Country {
            country_id: opt_checked(
                &join(path, "country_id"),
                self.country_id.map(|id| CountryId::new(u64::from(id))),
            )?,
            country_id_iso2: opt_text(
                &join(path, "country_iso2"),
                self.country_iso2.as_deref(),
                CountryIso2::new,
            )?,
            country_name_short: text(
                &join(path, "country_name_short"),
                &self.country_name_short,
                CountryNameShort::new,
            )?,
        })
    }

    pub(crate) fn from_wire(country: &Country) -> Self {
        Self {
            // four digits always fit
            country_id: country.country_id.map(|id| id.value() as u16),
            country_iso2: country
                .country_id_iso2
                .as_ref()
                .map(|iso| iso.as_str().to_string()),
            country_name_short: country.country_name_short.as_str().to_string(),
        }
    }
}

/// A general place: unknown, a Swiss municipality, or a country abroad.
///
/// The arm is inferred from which fields are set. Setting fields of two arms
/// is a choice violation; setting none means no place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceFields {
    pub unknown: bool,
    pub municipality_id: Option<u16>,
    pub municipality_name: Option<String>,
    pub canton: Option<Canton>,
    pub history_municipality_id: Option<u64>,
    pub country_id: Option<u16>,
    pub country_iso2: Option<String>,
    pub country_name_short: Option<String>,
    /// Town abroad.
    pub town: Option<String>,
}

impl PlaceFields {
    pub fn unknown() -> Self {
        Self {
            unknown: true,
            ..Self::default()
        }
    }

    pub fn swiss(municipality: MunicipalityInfo) -> Self {
        Self {
            municipality_id: municipality.municipality_id,
            municipality_name: Some(municipality.municipality_name),
            canton: municipality.canton,
            history_municipality_id: municipality.history_municipality_id,
            ..Self::default()
        }
    }

    pub fn foreign(country: CountryFields, town: Option<String>) -> Self {
        Self {
            country_id: country.country_id,
            country_iso2: country.country_iso2,
            country_name_short: Some(country.country_name_short),
            town,
            ..Self::default()
        }
    }

    fn has_swiss(&self) -> bool {
        self.municipality_id.is_some()
            || self.municipality_name.is_some()
            || self.canton.is_some()
            || self.history_municipality_id.is_some()
    }

    fn has_foreign(&self) -> bool {
        self.country_id.is_some()
            || self.country_iso2.is_some()
            || self.country_name_short.is_some()
            || self.town.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.unknown && !self.has_swiss() && !self.has_foreign()
    }

    /// Builds the place, or `None` when no field is set.
    pub(crate) fn to_wire(&self, path: &str) -> Result<Option<GeneralPlace>> {
        let arm = select_optional_arm(
            path,
            &[
                ("unknown", self.unknown),
                ("swissTown", self.has_swiss()),
                ("foreignCountry", self.has_foreign()),
            ],
        )?;
        if let Some(arm) = arm {
            trace!(group = path, arm, "selected place arm");
        }
        let place = match arm {
            None => return Ok(None),
            Some("unknown") => GeneralPlace::Unknown,
            Some("swissTown") => GeneralPlace::SwissTown(
                MunicipalityInfo {
                    municipality_id: self.municipality_id,
                    municipality_name: self.municipality_name.clone().unwrap_or_default(),
                    canton: self.canton,
                    history_municipality_id: self.history_municipality_id,
                }
                .to_wire(path)?,
            ),
            Some(_) => GeneralPlace::ForeignCountry(ForeignCountry {
                country: CountryFields {
                    country_id: self.country_id,
                    country_iso2: self.country_iso2.clone(),
                    country_name_short: self.country_name_short.clone().unwrap_or_default(),
                }
                .to_wire(path)?,
                town: opt_text(&join(path, "town"), self.town.as_deref(), PlaceName::new)?,
            }),
        };
        Ok(Some(place))
    }

    /// Builds a place that must be present.
    pub(crate) fn to_required(&self, path: &str) -> Result<GeneralPlace> {
        self.to_wire(path)?
            .ok_or_else(|| WireError::choice_none(path))
    }

    pub(crate) fn from_wire(place: &GeneralPlace) -> Self {
        match place {
            GeneralPlace::Unknown => Self::unknown(),
            GeneralPlace::SwissTown(municipality) => {
                Self::swiss(MunicipalityInfo::from_wire(municipality))
            }
            GeneralPlace::ForeignCountry(foreign) => Self::foreign(
                CountryFields::from_wire(&foreign.country),
                foreign.town.as_ref().map(|town| town.as_str().to_string()),
            ),
        }
    }

    pub(crate) fn from_optional(place: Option<&GeneralPlace>) -> Self {
        place.map(Self::from_wire).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ech_wire::ChoiceArity;

    fn bern() -> MunicipalityInfo {
        MunicipalityInfo::new(351, "Bern", Canton::BE)
    }

    fn germany() -> CountryFields {
        CountryFields {
            country_id: Some(8207),
            country_iso2: Some("DE".to_string()),
            country_name_short: "Deutschland".to_string(),
        }
    }

    #[test]
    fn test_unknown_place_has_no_other_fields() -> Result<()> {
        let place = PlaceFields::unknown().to_required("birth_place")?;
        assert_eq!(place, GeneralPlace::Unknown);
        let back = PlaceFields::from_wire(&place);
        assert_eq!(back, PlaceFields::unknown());
        assert!(back.municipality_name.is_none() && back.country_name_short.is_none());
        Ok(())
    }

    #[test]
    fn test_swiss_and_foreign_fields_conflict() {
        let place = PlaceFields {
            municipality_id: Some(351),
            country_id: Some(8207),
            ..PlaceFields::default()
        };
        let err = place.to_wire("birth_place").unwrap_err();
        assert_eq!(
            err,
            WireError::ChoiceViolation {
                group: "birth_place".to_string(),
                arity: ChoiceArity::Multiple(vec![
                    "swissTown".to_string(),
                    "foreignCountry".to_string()
                ]),
            }
        );
    }

    #[test]
    fn test_empty_place() {
        assert_eq!(PlaceFields::default().to_wire("death_place"), Ok(None));
        assert_eq!(
            PlaceFields::default().to_required("birth_place"),
            Err(WireError::choice_none("birth_place"))
        );
    }

    #[test]
    fn test_swiss_place_needs_name() {
        let place = PlaceFields {
            municipality_id: Some(351),
            ..PlaceFields::default()
        };
        assert_eq!(
            place.to_wire("birth_place"),
            Err(WireError::missing("birth_place.municipality_name"))
        );
    }

    #[test]
    fn test_round_trips() -> Result<()> {
        for place in [
            PlaceFields::swiss(bern()),
            PlaceFields::foreign(germany(), Some("Berlin".to_string())),
        ] {
            let wire = place.to_required("place")?;
            assert_eq!(PlaceFields::from_wire(&wire), place);
        }
        Ok(())
    }

    #[test]
    fn test_blank_iso_code_is_rejected() {
        let country = CountryFields {
            country_iso2: Some(" ".to_string()),
            ..germany()
        };
        assert_eq!(
            country.to_wire("nationalities[1]"),
            Err(WireError::constraint(
                "nationalities[1].country_iso2",
                "must not be blank"
            ))
        );
    }

    #[test]
    fn test_country_id_range() {
        let country = CountryFields {
            country_id: Some(10000),
            ..germany()
        };
        assert!(matches!(
            country.to_wire("nationalities[1]"),
            Err(WireError::ConstraintViolation { ref path, .. }) if path == "nationalities[1].country_id"
        ));
    }
}
