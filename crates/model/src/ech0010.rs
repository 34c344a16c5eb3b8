//! eCH-0010 v5: postal addresses.

use ech_wire::{
    ChoiceArm, ChoiceGroup, ChoiceSchema, FieldReader, FieldSlot, FieldWriter, NodeSchema, Result,
    WireError, WireNode, wire_number, wire_string,
};

use crate::codes::MrMrs;
use crate::ech0008::CountryIso2;
use crate::namespaces::ECH_0010;

wire_string! {
    pub struct AddressLine { min: 1, max: 60 }
}

wire_string! {
    pub struct OrganisationName { min: 1, max: 60 }
}

wire_string! {
    pub struct Title { min: 1, max: 50 }
}

wire_string! {
    /// First or last name on an address label.
    pub struct MailName { min: 1, max: 30 }
}

wire_string! {
    pub struct HouseNumber { min: 1, max: 12 }
}

wire_string! {
    pub struct DwellingNumber { min: 1, max: 10 }
}

wire_string! {
    pub struct PostOfficeBoxText { min: 1, max: 15 }
}

wire_string! {
    /// Town or locality name.
    pub struct TownName { min: 1, max: 40 }
}

wire_string! {
    pub struct ForeignZipCode { min: 1, max: 15 }
}

wire_string! {
    pub struct SwissZipCodeAddOn { min: 1, max: 2 }
}

wire_number! {
    pub struct SwissZipCode(u16) { min: 1000, max: 9999 }
}

wire_number! {
    pub struct PostOfficeBoxNumber(u32) { min: 0, max: 99_999_999 }
}

/// `personMailAddressInfoType`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonMailAddressInfo {
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<Title>,
    pub first_name: Option<MailName>,
    pub last_name: MailName,
}

static PERSON_MAIL_ADDRESS_INFO: NodeSchema = NodeSchema {
    type_name: "personMailAddressInfoType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::value("mrMrs").optional(),
        FieldSlot::value("title").optional(),
        FieldSlot::value("firstName").optional(),
        FieldSlot::value("lastName"),
    ],
};

impl WireNode for PersonMailAddressInfo {
    fn schema() -> &'static NodeSchema {
        &PERSON_MAIL_ADDRESS_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("mrMrs", &self.mr_mrs)?;
        w.opt_value("title", &self.title)?;
        w.opt_value("firstName", &self.first_name)?;
        w.value("lastName", &self.last_name)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            mr_mrs: r.opt_value("mrMrs")?,
            title: r.opt_value("title")?,
            first_name: r.opt_value("firstName")?,
            last_name: r.value("lastName")?,
        })
    }
}

/// `organisationMailAddressInfoType`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganisationMailAddressInfo {
    pub organisation_name: OrganisationName,
    pub organisation_name_add_on1: Option<OrganisationName>,
    pub organisation_name_add_on2: Option<OrganisationName>,
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<Title>,
    pub first_name: Option<MailName>,
    pub last_name: Option<MailName>,
}

static ORGANISATION_MAIL_ADDRESS_INFO: NodeSchema = NodeSchema {
    type_name: "organisationMailAddressInfoType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::value("organisationName"),
        FieldSlot::value("organisationNameAddOn1").optional(),
        FieldSlot::value("organisationNameAddOn2").optional(),
        FieldSlot::value("mrMrs").optional(),
        FieldSlot::value("title").optional(),
        FieldSlot::value("firstName").optional(),
        FieldSlot::value("lastName").optional(),
    ],
};

impl WireNode for OrganisationMailAddressInfo {
    fn schema() -> &'static NodeSchema {
        &ORGANISATION_MAIL_ADDRESS_INFO
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("organisationName", &self.organisation_name)?;
        w.opt_value("organisationNameAddOn1", &self.organisation_name_add_on1)?;
        w.opt_value("organisationNameAddOn2", &self.organisation_name_add_on2)?;
        w.opt_value("mrMrs", &self.mr_mrs)?;
        w.opt_value("title", &self.title)?;
        w.opt_value("firstName", &self.first_name)?;
        w.opt_value("lastName", &self.last_name)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            organisation_name: r.value("organisationName")?,
            organisation_name_add_on1: r.opt_value("organisationNameAddOn1")?,
            organisation_name_add_on2: r.opt_value("organisationNameAddOn2")?,
            mr_mrs: r.opt_value("mrMrs")?,
            title: r.opt_value("title")?,
            first_name: r.opt_value("firstName")?,
            last_name: r.opt_value("lastName")?,
        })
    }
}

/// Swiss or foreign postal code.
#[derive(Debug, Clone, PartialEq)]
pub enum Zip {
    Swiss {
        zip_code: SwissZipCode,
        add_on: Option<SwissZipCodeAddOn>,
        zip_code_id: Option<u32>,
    },
    Foreign(ForeignZipCode),
}

static ZIP: ChoiceSchema = ChoiceSchema {
    group: "zipCode",
    arms: &[
        ChoiceArm {
            name: "swiss",
            slots: &[
                FieldSlot::value("swissZipCode"),
                FieldSlot::value("swissZipCodeAddOn").optional(),
                FieldSlot::value("swissZipCodeId").optional(),
            ],
        },
        ChoiceArm {
            name: "foreign",
            slots: &[FieldSlot::value("foreignZipCode")],
        },
    ],
};

impl ChoiceGroup for Zip {
    fn schema() -> &'static ChoiceSchema {
        &ZIP
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Zip::Swiss { .. } => "swiss",
            Zip::Foreign(_) => "foreign",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Zip::Swiss {
                zip_code,
                add_on,
                zip_code_id,
            } => {
                w.value("swissZipCode", zip_code)?;
                w.opt_value("swissZipCodeAddOn", add_on)?;
                w.opt_value("swissZipCodeId", zip_code_id)
            }
            Zip::Foreign(code) => w.value("foreignZipCode", code),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "swiss" => Ok(Zip::Swiss {
                zip_code: r.value("swissZipCode")?,
                add_on: r.opt_value("swissZipCodeAddOn")?,
                zip_code_id: r.opt_value("swissZipCodeId")?,
            }),
            _ => Ok(Zip::Foreign(r.value("foreignZipCode")?)),
        }
    }
}

/// `addressInformationType`.
///
/// A post office box number needs its box text; the text alone is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressInformation {
    pub address_line1: Option<AddressLine>,
    pub address_line2: Option<AddressLine>,
    pub street: Option<AddressLine>,
    pub house_number: Option<HouseNumber>,
    pub dwelling_number: Option<DwellingNumber>,
    pub post_office_box_number: Option<PostOfficeBoxNumber>,
    pub post_office_box_text: Option<PostOfficeBoxText>,
    pub locality: Option<TownName>,
    pub town: TownName,
    pub zip: Zip,
    pub country: CountryIso2,
}

static ADDRESS_INFORMATION: NodeSchema = NodeSchema {
    type_name: "addressInformationType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::value("addressLine1").optional(),
        FieldSlot::value("addressLine2").optional(),
        FieldSlot::value("street").optional(),
        FieldSlot::value("houseNumber").optional(),
        FieldSlot::value("dwellingNumber").optional(),
        FieldSlot::value("postOfficeBoxNumber").optional(),
        FieldSlot::value("postOfficeBoxText").optional(),
        FieldSlot::value("locality").optional(),
        FieldSlot::value("town"),
        FieldSlot::choice(&ZIP),
        FieldSlot::value("country"),
    ],
};

impl WireNode for AddressInformation {
    fn schema() -> &'static NodeSchema {
        &ADDRESS_INFORMATION
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        if self.post_office_box_number.is_some() && self.post_office_box_text.is_none() {
            return Err(WireError::missing(format!("{}/postOfficeBoxText", w.path())));
        }
        w.opt_value("addressLine1", &self.address_line1)?;
        w.opt_value("addressLine2", &self.address_line2)?;
        w.opt_value("street", &self.street)?;
        w.opt_value("houseNumber", &self.house_number)?;
        w.opt_value("dwellingNumber", &self.dwelling_number)?;
        w.opt_value("postOfficeBoxNumber", &self.post_office_box_number)?;
        w.opt_value("postOfficeBoxText", &self.post_office_box_text)?;
        w.opt_value("locality", &self.locality)?;
        w.value("town", &self.town)?;
        w.choice(&self.zip)?;
        w.value("country", &self.country)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        let address = Self {
            address_line1: r.opt_value("addressLine1")?,
            address_line2: r.opt_value("addressLine2")?,
            street: r.opt_value("street")?,
            house_number: r.opt_value("houseNumber")?,
            dwelling_number: r.opt_value("dwellingNumber")?,
            post_office_box_number: r.opt_value("postOfficeBoxNumber")?,
            post_office_box_text: r.opt_value("postOfficeBoxText")?,
            locality: r.opt_value("locality")?,
            town: r.value("town")?,
            zip: r.choice()?,
            country: r.value("country")?,
        };
        if address.post_office_box_number.is_some() && address.post_office_box_text.is_none() {
            return Err(WireError::missing(r.child_path("postOfficeBoxText")));
        }
        Ok(address)
    }
}

/// Who a mail address is for.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    Person(PersonMailAddressInfo),
    Organisation(OrganisationMailAddressInfo),
}

static RECIPIENT: ChoiceSchema = ChoiceSchema {
    group: "recipient",
    arms: &[
        ChoiceArm {
            name: "person",
            slots: &[FieldSlot::node("person")],
        },
        ChoiceArm {
            name: "organisation",
            slots: &[FieldSlot::node("organisation")],
        },
    ],
};

impl ChoiceGroup for Recipient {
    fn schema() -> &'static ChoiceSchema {
        &RECIPIENT
    }

    fn arm_name(&self) -> &'static str {
        match self {
            Recipient::Person(_) => "person",
            Recipient::Organisation(_) => "organisation",
        }
    }

    fn write_arm(&self, w: &mut FieldWriter) -> Result<()> {
        match self {
            Recipient::Person(person) => w.node("person", person),
            Recipient::Organisation(organisation) => w.node("organisation", organisation),
        }
    }

    fn read_arm(arm: &str, r: &mut FieldReader) -> Result<Self> {
        match arm {
            "person" => Ok(Recipient::Person(r.node("person")?)),
            _ => Ok(Recipient::Organisation(r.node("organisation")?)),
        }
    }
}

/// `mailAddressType`.
#[derive(Debug, Clone, PartialEq)]
pub struct MailAddress {
    pub recipient: Recipient,
    pub address_information: AddressInformation,
}

static MAIL_ADDRESS: NodeSchema = NodeSchema {
    type_name: "mailAddressType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::choice(&RECIPIENT),
        FieldSlot::node("addressInformation"),
    ],
};

impl WireNode for MailAddress {
    fn schema() -> &'static NodeSchema {
        &MAIL_ADDRESS
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.choice(&self.recipient)?;
        w.node("addressInformation", &self.address_information)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            recipient: r.choice()?,
            address_information: r.node("addressInformation")?,
        })
    }
}

/// `organisationMailAddressType`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganisationMailAddress {
    pub organisation: OrganisationMailAddressInfo,
    pub address_information: AddressInformation,
}

static ORGANISATION_MAIL_ADDRESS: NodeSchema = NodeSchema {
    type_name: "organisationMailAddressType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::node("organisation"),
        FieldSlot::node("addressInformation"),
    ],
};

impl WireNode for OrganisationMailAddress {
    fn schema() -> &'static NodeSchema {
        &ORGANISATION_MAIL_ADDRESS
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.node("organisation", &self.organisation)?;
        w.node("addressInformation", &self.address_information)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            organisation: r.node("organisation")?,
            address_information: r.node("addressInformation")?,
        })
    }
}

/// `swissAddressInformationType`: a Swiss address with a mandatory Swiss
/// postal code and no post office box.
#[derive(Debug, Clone, PartialEq)]
pub struct SwissAddressInformation {
    pub address_line1: Option<AddressLine>,
    pub address_line2: Option<AddressLine>,
    pub street: Option<AddressLine>,
    pub house_number: Option<HouseNumber>,
    pub dwelling_number: Option<DwellingNumber>,
    pub locality: Option<TownName>,
    pub town: TownName,
    pub swiss_zip_code: SwissZipCode,
    pub swiss_zip_code_add_on: Option<SwissZipCodeAddOn>,
    pub swiss_zip_code_id: Option<u32>,
    pub country: CountryIso2,
}

static SWISS_ADDRESS_INFORMATION: NodeSchema = NodeSchema {
    type_name: "swissAddressInformationType",
    namespace: ECH_0010,
    slots: &[
        FieldSlot::value("addressLine1").optional(),
        FieldSlot::value("addressLine2").optional(),
        FieldSlot::value("street").optional(),
        FieldSlot::value("houseNumber").optional(),
        FieldSlot::value("dwellingNumber").optional(),
        FieldSlot::value("locality").optional(),
        FieldSlot::value("town"),
        FieldSlot::value("swissZipCode"),
        FieldSlot::value("swissZipCodeAddOn").optional(),
        FieldSlot::value("swissZipCodeId").optional(),
        FieldSlot::value("country"),
    ],
};

impl WireNode for SwissAddressInformation {
    fn schema() -> &'static NodeSchema {
        &SWISS_ADDRESS_INFORMATION
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        w.opt_value("addressLine1", &self.address_line1)?;
        w.opt_value("addressLine2", &self.address_line2)?;
        w.opt_value("street", &self.street)?;
        w.opt_value("houseNumber", &self.house_number)?;
        w.opt_value("dwellingNumber", &self.dwelling_number)?;
        w.opt_value("locality", &self.locality)?;
        w.value("town", &self.town)?;
        w.value("swissZipCode", &self.swiss_zip_code)?;
        w.opt_value("swissZipCodeAddOn", &self.swiss_zip_code_add_on)?;
        w.opt_value("swissZipCodeId", &self.swiss_zip_code_id)?;
        w.value("country", &self.country)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            address_line1: r.opt_value("addressLine1")?,
            address_line2: r.opt_value("addressLine2")?,
            street: r.opt_value("street")?,
            house_number: r.opt_value("houseNumber")?,
            dwelling_number: r.opt_value("dwellingNumber")?,
            locality: r.opt_value("locality")?,
            town: r.value("town")?,
            swiss_zip_code: r.value("swissZipCode")?,
            swiss_zip_code_add_on: r.opt_value("swissZipCodeAddOn")?,
            swiss_zip_code_id: r.opt_value("swissZipCodeId")?,
            country: r.value("country")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::ECH_0011;
    use ech_wire::{decode_node, encode_node};

    fn address(zip: Zip) -> AddressInformation {
        AddressInformation {
            address_line1: None,
            address_line2: None,
            street: Some(AddressLine::new("Bahnhofstrasse").unwrap()),
            house_number: Some(HouseNumber::new("12a").unwrap()),
            dwelling_number: None,
            post_office_box_number: None,
            post_office_box_text: None,
            locality: None,
            town: TownName::new("Zürich").unwrap(),
            zip,
            country: CountryIso2::new("CH").unwrap(),
        }
    }

    fn swiss_zip() -> Zip {
        Zip::Swiss {
            zip_code: SwissZipCode::new(8001).unwrap(),
            add_on: None,
            zip_code_id: None,
        }
    }

    #[test]
    fn test_zip_arm_sits_between_town_and_country() -> Result<()> {
        let element = encode_node(&address(swiss_zip()), ECH_0011, "mailAddress")?;
        let names: Vec<&str> = element.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["street", "houseNumber", "town", "swissZipCode", "country"]
        );
        let back: AddressInformation = decode_node(&element)?;
        assert_eq!(back.zip, swiss_zip());
        Ok(())
    }

    #[test]
    fn test_both_zip_arms_rejected() -> Result<()> {
        let mut element = encode_node(&address(swiss_zip()), ECH_0011, "a")?;
        let mut foreign = element.children[3].clone();
        foreign.name = "foreignZipCode".to_string();
        element.children.insert(4, foreign);
        let err = decode_node::<AddressInformation>(&element).unwrap_err();
        assert!(matches!(err, WireError::ChoiceViolation { .. }));
        Ok(())
    }

    #[test]
    fn test_post_office_box_needs_text() {
        let mut boxed = address(Zip::Foreign(ForeignZipCode::new("D-10115").unwrap()));
        boxed.post_office_box_number = Some(PostOfficeBoxNumber::new(1234).unwrap());
        let err = encode_node(&boxed, ECH_0011, "a").unwrap_err();
        assert_eq!(err, WireError::missing("a/postOfficeBoxText"));
    }

    #[test]
    fn test_mail_address_recipient_choice() -> Result<()> {
        let mail = MailAddress {
            recipient: Recipient::Person(PersonMailAddressInfo {
                mr_mrs: Some(MrMrs::Mr),
                title: None,
                first_name: Some(MailName::new("Hans").unwrap()),
                last_name: MailName::new("Muster").unwrap(),
            }),
            address_information: address(swiss_zip()),
        };
        let element = encode_node(&mail, ECH_0011, "contactAddress")?;
        assert_eq!(element.children[0].name, "person");
        assert_eq!(element.text_at(&["person", "mrMrs"]), Some("2"));
        assert_eq!(decode_node::<MailAddress>(&element)?, mail);
        Ok(())
    }
}
