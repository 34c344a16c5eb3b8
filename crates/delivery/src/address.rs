//! Flattened postal addresses.

use ech_model::codes::MrMrs;
use ech_model::ech0008::CountryIso2;
use ech_model::ech0010::{
    AddressInformation, AddressLine, DwellingNumber, ForeignZipCode, HouseNumber, MailAddress,
    MailName, OrganisationMailAddress, OrganisationMailAddressInfo, OrganisationName,
    PersonMailAddressInfo, PostOfficeBoxNumber, PostOfficeBoxText, Recipient, SwissZipCode,
    SwissZipCodeAddOn, Title, TownName, Zip,
};
use ech_wire::{Result, select_arm};

use crate::fields::{checked, join, opt_checked, opt_string, opt_text, required, text};

/// Address lines, town, postal code and country.
///
/// The postal code is either Swiss (`swiss_zip_code` with its add-on and id)
/// or foreign (`foreign_zip_code`), never both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressFields {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub dwelling_number: Option<String>,
    pub post_office_box_number: Option<u32>,
    pub post_office_box_text: Option<String>,
    pub locality: Option<String>,
    pub town: String,
    pub swiss_zip_code: Option<u16>,
    pub swiss_zip_code_add_on: Option<String>,
    pub swiss_zip_code_id: Option<u32>,
    pub foreign_zip_code: Option<String>,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

impl AddressFields {
    /// A Swiss street address.
    pub fn swiss(
        street: impl Into<String>,
        house_number: impl Into<String>,
        swiss_zip_code: u16,
        town: impl Into<String>,
    ) -> Self {
        Self {
            street: Some(street.into()),
            house_number: Some(house_number.into()),
            swiss_zip_code: Some(swiss_zip_code),
            town: town.into(),
            country: "CH".to_string(),
            ..Self::default()
        }
    }

    fn zip(&self, path: &str) -> Result<Zip> {
        let group = join(path, "zip");
        let arm = select_arm(
            &group,
            &[
                (
                    "swiss",
                    self.swiss_zip_code.is_some()
                        || self.swiss_zip_code_add_on.is_some()
                        || self.swiss_zip_code_id.is_some(),
                ),
                ("foreign", self.foreign_zip_code.is_some()),
            ],
        )?;
        if arm == "foreign" {
            return Ok(Zip::Foreign(text(
                &join(path, "foreign_zip_code"),
                self.foreign_zip_code.as_deref().unwrap_or_default(),
                ForeignZipCode::new,
            )?));
        }
        let zip_path = join(path, "swiss_zip_code");
        Ok(Zip::Swiss {
            zip_code: checked(
                &zip_path,
                SwissZipCode::new(required(&zip_path, self.swiss_zip_code)?),
            )?,
            add_on: opt_text(
                &join(path, "swiss_zip_code_add_on"),
                self.swiss_zip_code_add_on.as_deref(),
                SwissZipCodeAddOn::new,
            )?,
            zip_code_id: self.swiss_zip_code_id,
        })
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<AddressInformation> {
        Ok(AddressInformation {
            address_line1: opt_text(
                &join(path, "address_line1"),
                self.address_line1.as_deref(),
                AddressLine::new,
            )?,
            address_line2: opt_text(
                &join(path, "address_line2"),
                self.address_line2.as_deref(),
                AddressLine::new,
            )?,
            street: opt_text(&join(path, "street"), self.street.as_deref(), AddressLine::new)?,
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
            post_office_box_number: opt_checked(
                &join(path, "post_office_box_number"),
                self.post_office_box_number.map(PostOfficeBoxNumber::new),
            )?,
            post_office_box_text: opt_text(
                &join(path, "post_office_box_text"),
                self.post_office_box_text.as_deref(),
                PostOfficeBoxText::new,
            )?,
            locality: opt_text(&join(path, "locality"), self.locality.as_deref(), TownName::new)?,
            town: text(&join(path, "town"), &self.town, TownName::new)?,
            zip: self.zip(path)?,
            country: text(&join(path, "country"), &self.country, CountryIso2::new)?,
        })
    }

    pub(crate) fn from_wire(address: &AddressInformation) -> Self {
        let (swiss_zip_code, swiss_zip_code_add_on, swiss_zip_code_id, foreign_zip_code) =
            match &address.zip {
                Zip::Swiss {
                    zip_code,
                    add_on,
                    zip_code_id,
                } => (Some(zip_code.get()), opt_string(add_on), *zip_code_id, None),
                Zip::Foreign(zip) => (None, None, None, Some(zip.as_str().to_string())),
            };
        Self {
            address_line1: opt_string(&address.address_line1),
            address_line2: opt_string(&address.address_line2),
            street: opt_string(&address.street),
            house_number: opt_string(&address.house_number),
            dwelling_number: opt_string(&address.dwelling_number),
            post_office_box_number: address.post_office_box_number.map(|n| n.get()),
            post_office_box_text: opt_string(&address.post_office_box_text),
            locality: opt_string(&address.locality),
            town: address.town.as_str().to_string(),
            swiss_zip_code,
            swiss_zip_code_add_on,
            swiss_zip_code_id,
            foreign_zip_code,
            country: address.country.as_str().to_string(),
        }
    }
}

/// A mail address with its recipient.
///
/// The recipient is an organisation when `organisation_name` is set, and a
/// person (who needs a `last_name`) otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MailAddressFields {
    pub organisation_name: Option<String>,
    pub organisation_name_add_on1: Option<String>,
    pub organisation_name_add_on2: Option<String>,
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: AddressFields,
}

impl MailAddressFields {
    pub fn person(
        mr_mrs: Option<MrMrs>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: AddressFields,
    ) -> Self {
        Self {
            mr_mrs,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            address,
            ..Self::default()
        }
    }

    pub fn organisation(name: impl Into<String>, address: AddressFields) -> Self {
        Self {
            organisation_name: Some(name.into()),
            address,
            ..Self::default()
        }
    }

    fn organisation_info(&self, path: &str) -> Result<OrganisationMailAddressInfo> {
        Ok(OrganisationMailAddressInfo {
            organisation_name: text(
                &join(path, "organisation_name"),
                self.organisation_name.as_deref().unwrap_or_default(),
                OrganisationName::new,
            )?,
            organisation_name_add_on1: opt_text(
                &join(path, "organisation_name_add_on1"),
                self.organisation_name_add_on1.as_deref(),
                OrganisationName::new,
            )?,
            organisation_name_add_on2: opt_text(
                &join(path, "organisation_name_add_on2"),
                self.organisation_name_add_on2.as_deref(),
                OrganisationName::new,
            )?,
            mr_mrs: self.mr_mrs,
            title: opt_text(&join(path, "title"), self.title.as_deref(), Title::new)?,
            first_name: opt_text(
                &join(path, "first_name"),
                self.first_name.as_deref(),
                MailName::new,
            )?,
            last_name: opt_text(
                &join(path, "last_name"),
                self.last_name.as_deref(),
                MailName::new,
            )?,
        })
    }

    pub(crate) fn to_wire(&self, path: &str) -> Result<MailAddress> {
        let recipient = if self.organisation_name.is_some() {
            Recipient::Organisation(self.organisation_info(path)?)
        } else {
            Recipient::Person(PersonMailAddressInfo {
                mr_mrs: self.mr_mrs,
                title: opt_text(&join(path, "title"), self.title.as_deref(), Title::new)?,
                first_name: opt_text(
                    &join(path, "first_name"),
                    self.first_name.as_deref(),
                    MailName::new,
                )?,
                last_name: text(
                    &join(path, "last_name"),
                    self.last_name.as_deref().unwrap_or_default(),
                    MailName::new,
                )?,
            })
        };
        Ok(MailAddress {
            recipient,
            address_information: self.address.to_wire(&join(path, "address"))?,
        })
    }

    /// An organisation address; `organisation_name` is required.
    pub(crate) fn to_organisation_wire(&self, path: &str) -> Result<OrganisationMailAddress> {
        Ok(OrganisationMailAddress {
            organisation: self.organisation_info(path)?,
            address_information: self.address.to_wire(&join(path, "address"))?,
        })
    }

    fn from_organisation_info(info: &OrganisationMailAddressInfo, address: AddressFields) -> Self {
        Self {
            organisation_name: Some(info.organisation_name.as_str().to_string()),
            organisation_name_add_on1: opt_string(&info.organisation_name_add_on1),
            organisation_name_add_on2: opt_string(&info.organisation_name_add_on2),
            mr_mrs: info.mr_mrs,
            title: opt_string(&info.title),
            first_name: opt_string(&info.first_name),
            last_name: opt_string(&info.last_name),
            address,
        }
    }

    pub(crate) fn from_wire(mail: &MailAddress) -> Self {
        let address = AddressFields::from_wire(&mail.address_information);
        match &mail.recipient {
            Recipient::Person(person) => Self {
                mr_mrs: person.mr_mrs,
                title: opt_string(&person.title),
                first_name: opt_string(&person.first_name),
                last_name: Some(person.last_name.as_str().to_string()),
                address,
                ..Self::default()
            },
            Recipient::Organisation(organisation) => {
                Self::from_organisation_info(organisation, address)
            }
        }
    }

    pub(crate) fn from_organisation_wire(mail: &OrganisationMailAddress) -> Self {
        Self::from_organisation_info(
            &mail.organisation,
            AddressFields::from_wire(&mail.address_information),
        )
    }
}
