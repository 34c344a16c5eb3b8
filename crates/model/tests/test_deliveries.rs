use chrono::{NaiveDate, NaiveDateTime};
use ech_model::codes::{
    Action, Canton, Care, MaritalStatus, NationalityStatus, ParentalRelationshipType, Religion,
    Sex, TypeOfHousehold,
};
use ech_model::ech0007::{MunicipalityId, MunicipalityName, SwissMunicipality};
use ech_model::ech0008::{Country, CountryIso2, CountryNameShort};
use ech_model::ech0010::{SwissAddressInformation, SwissZipCode, TownName};
use ech_model::ech0011::{
    BirthData, Citizenship, DwellingAddress, GeneralPlace, MainResidence, MaritalData, NameData,
    NationalityData, OriginName, Person, PlaceOfOrigin, ReligionData, ReportedPerson, Residence,
    ResidenceData,
};
use ech_model::ech0020::{
    BaseDeliveryCitizenship, BaseDeliveryPerson, BirthInfo, Delivery, EventBaseDelivery,
    EventResidence, HasMainResidence, MaritalInfo, NameInfo, PlaceOfOriginInfo, Reporting,
};
use ech_model::ech0021::{LockData, Partner, PartnerIdentification, ParentalRelationship};
use ech_model::ech0044::{
    BaseName, DatePartiallyKnown, NamedPersonId, PersonIdCategory, PersonIdValue,
    PersonIdentification, PersonIdentificationLight, Vn,
};
use ech_model::ech0058::{
    ApplicationName, Header, HeaderV4, HeaderV5, MessageId, ProductVersion, SendingApplication,
};
use ech_model::ech0099::{Data, DataField, DataValue, StatisticsDelivery, StatisticsPerson};
use ech_wire::{WireError, decode_root, encode_root};
use ech_xml::{XmlError, from_xml_slice, parse_element, to_xml_vec};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn name(value: &str) -> BaseName {
    BaseName::new(value).unwrap()
}

fn bern() -> SwissMunicipality {
    SwissMunicipality {
        municipality_id: Some(MunicipalityId::new(351).unwrap()),
        municipality_name: MunicipalityName::new("Bern").unwrap(),
        canton_abbreviation: Some(Canton::BE),
        history_municipality_id: None,
    }
}

fn identification() -> PersonIdentification {
    PersonIdentification {
        vn: Some(Vn::new("7561234567897").unwrap()),
        local_person_id: NamedPersonId {
            category: PersonIdCategory::new("CH.ZAR").unwrap(),
            id: PersonIdValue::new("4711").unwrap(),
        },
        other_person_id: Vec::new(),
        eu_person_id: Vec::new(),
        official_name: name("Müller"),
        first_name: name("Anna"),
        original_name: None,
        sex: Sex::Female,
        date_of_birth: DatePartiallyKnown::YearMonthDay(date(1980, 5, 17)),
    }
}

fn name_data() -> NameData {
    NameData {
        official_name: name("Müller"),
        first_name: name("Anna"),
        original_name: None,
        alliance_name: None,
        alias_name: None,
        other_name: None,
        call_name: Some(name("Anni")),
        foreign_name: None,
    }
}

fn birth_data() -> BirthData {
    BirthData {
        date_of_birth: DatePartiallyKnown::YearMonthDay(date(1980, 5, 17)),
        place_of_birth: GeneralPlace::SwissTown(bern()),
        sex: Sex::Female,
    }
}

fn marital_data() -> MaritalData {
    MaritalData {
        marital_status: MaritalStatus::Single,
        date_of_marital_status: None,
        cancelation_reason: None,
        official_proof_of_marital_status: None,
        separation_data: None,
    }
}

fn nationality_data() -> NationalityData {
    NationalityData {
        nationality_status: NationalityStatus::Known,
        country_info: vec![ech_model::ech0011::CountryInfo {
            country: Country {
                country_id: Some(ech_wire::FixedDigits::new(8100).unwrap()),
                country_id_iso2: Some(CountryIso2::new("CH").unwrap()),
                country_name_short: CountryNameShort::new("Schweiz").unwrap(),
            },
            nationality_valid_from: None,
        }],
    }
}

fn place_of_origin() -> PlaceOfOrigin {
    PlaceOfOrigin {
        origin_name: OriginName::new("Bern").unwrap(),
        canton: Canton::BE,
        place_of_origin_id: None,
        history_municipality_id: None,
    }
}

fn dwelling_address() -> DwellingAddress {
    DwellingAddress {
        egid: None,
        ewid: None,
        household_id: None,
        address: SwissAddressInformation {
            address_line1: None,
            address_line2: None,
            street: Some(ech_model::ech0010::AddressLine::new("Bundesgasse").unwrap()),
            house_number: Some(ech_model::ech0010::HouseNumber::new("3").unwrap()),
            dwelling_number: None,
            locality: None,
            town: TownName::new("Bern").unwrap(),
            swiss_zip_code: SwissZipCode::new(3011).unwrap(),
            swiss_zip_code_add_on: None,
            swiss_zip_code_id: None,
            country: CountryIso2::new("CH").unwrap(),
        },
        type_of_household: TypeOfHousehold::Private,
        moving_date: None,
    }
}

fn header() -> Header {
    Header {
        sender_id: "1-351-1".to_string(),
        original_sender_id: None,
        declaration_local_reference: None,
        recipient_id: Vec::new(),
        message_id: MessageId::new("7f0c5e1a-2b0f-4f86-9d55-3c1b0d8e8a11").unwrap(),
        reference_message_id: None,
        business_process_id: None,
        our_business_reference_id: None,
        your_business_reference_id: None,
        unique_id_business_transaction: None,
        message_type: "http://www.ech.ch/xmlns/eCH-0020/3".to_string(),
        sub_message_type: None,
        sending_application: SendingApplication {
            manufacturer: ApplicationName::new("Gemeinde").unwrap(),
            product: ApplicationName::new("Register").unwrap(),
            product_version: ProductVersion::new("1.0").unwrap(),
        },
        partial_delivery: None,
        subject: None,
        comment: None,
        message_date: NaiveDateTime::new(date(2024, 3, 1), chrono::NaiveTime::MIN),
        initial_message_date: None,
        event_date: None,
        modification_date: None,
        action: Action::New,
        test_delivery_flag: true,
        response_expected: None,
        business_case_closed: None,
        named_meta_data: Vec::new(),
    }
}

fn mother() -> ParentalRelationship {
    ParentalRelationship {
        partner: Partner {
            identification: PartnerIdentification::PersonPartner(PersonIdentificationLight {
                vn: None,
                local_person_id: None,
                other_person_id: Vec::new(),
                official_name: name("Müller"),
                first_name: name("Erika"),
                original_name: None,
                sex: Some(Sex::Female),
                date_of_birth: None,
            }),
            address: None,
        },
        relationship_valid_from: None,
        type_of_relationship: ParentalRelationshipType::Mother,
        care: Care::Joint,
    }
}

fn base_delivery_person() -> BaseDeliveryPerson {
    BaseDeliveryPerson {
        person_identification: identification(),
        name_info: NameInfo {
            name_data: name_data(),
            name_valid_from: None,
        },
        birth_info: BirthInfo {
            birth_data: birth_data(),
            birth_addon_data: None,
        },
        religion_data: ReligionData {
            religion: Religion::new("111").unwrap(),
            religion_valid_from: None,
        },
        marital_info: MaritalInfo {
            marital_data: marital_data(),
            marital_data_addon: None,
        },
        nationality_data: nationality_data(),
        death_data: None,
        contact_data: None,
        person_additional_data: None,
        political_right_data: None,
        citizenship: BaseDeliveryCitizenship::PlacesOfOrigin(vec![PlaceOfOriginInfo {
            place_of_origin: place_of_origin(),
            place_of_origin_addon_data: None,
        }]),
        lock_data: LockData::default(),
        job_data: None,
        marital_relationship: None,
        parental_relationship: vec![mother()],
        guardian_relationship: Vec::new(),
        armed_forces_data: None,
        civil_defense_data: None,
        fire_service_data: None,
        health_insurance_data: None,
        matrimonial_inheritance_arrangement_data: None,
    }
}

fn delivery() -> Delivery {
    let event = EventBaseDelivery {
        base_delivery_person: base_delivery_person(),
        residence: EventResidence::Main(HasMainResidence {
            reporting: Reporting::Municipality(bern()),
            arrival_date: date(2010, 1, 1),
            comes_from: None,
            dwelling_address: dwelling_address(),
            departure_date: None,
            goes_to: None,
            secondary_residence: Vec::new(),
        }),
        base_delivery_valid_from: Some(date(2024, 3, 1)),
    };
    Delivery::new(HeaderV5(header()), vec![event])
}

#[test]
fn test_base_delivery_round_trip() -> Result<(), XmlError> {
    let delivery = delivery();
    let bytes = to_xml_vec(&delivery)?;
    let xml = String::from_utf8(bytes.clone()).unwrap();

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<eCH-0020:delivery"));
    assert!(xml.contains(r#"version="3.0""#));
    assert!(xml.contains(r#"xmlns:eCH-0020="http://www.ech.ch/xmlns/eCH-0020/3""#));
    assert!(xml.contains(r#"xmlns:eCH-0058="http://www.ech.ch/xmlns/eCH-0058/5""#));
    assert!(xml.contains("<eCH-0044:officialName>Müller</eCH-0044:officialName>"));
    assert!(xml.contains("<eCH-0011:officialName>Müller</eCH-0011:officialName>"));
    assert!(xml.contains("<eCH-0021:typeOfRelationship>3</eCH-0021:typeOfRelationship>"));
    assert!(xml.contains("<eCH-0020:reportingMunicipality>"));

    let back: Delivery = from_xml_slice(&bytes)?;
    assert_eq!(back, delivery);
    assert_eq!(back.events().len(), 1);
    Ok(())
}

#[test]
fn test_person_sequence_follows_declaration() -> Result<(), WireError> {
    let root = encode_root(&delivery())?;
    let person = root
        .descend(&[
            "baseDelivery",
            "messages",
            "eventBaseDelivery",
            "baseDeliveryPerson",
        ])
        .unwrap();
    let names: Vec<&str> = person.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "personIdentification",
            "nameInfo",
            "birthInfo",
            "religionData",
            "maritalInfo",
            "nationalityData",
            "placeOfOriginInfo",
            "lockData",
            "parentalRelationship",
        ]
    );
    Ok(())
}

#[test]
fn test_swapped_siblings_rejected() -> Result<(), WireError> {
    let mut root = encode_root(&delivery())?;
    let person = root
        .descend_mut(&[
            "baseDelivery",
            "messages",
            "eventBaseDelivery",
            "baseDeliveryPerson",
        ])
        .unwrap();
    person.children.swap(1, 2);
    let err = decode_root::<Delivery>(&root).unwrap_err();
    assert!(matches!(err, WireError::OutOfOrder { ref name, .. } if name == "nameInfo"));
    Ok(())
}

#[test]
fn test_namespace_mismatch_rejected() -> Result<(), XmlError> {
    let xml = String::from_utf8(to_xml_vec(&delivery())?).unwrap();
    // an eCH-0044 child declared in the eCH-0011 namespace
    let tampered = xml.replacen(
        "<eCH-0044:vn>7561234567897</eCH-0044:vn>",
        "<eCH-0011:vn>7561234567897</eCH-0011:vn>",
        1,
    );
    assert_ne!(tampered, xml);
    let err = from_xml_slice::<Delivery>(tampered.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        XmlError::Wire(WireError::NamespaceMismatch { ref expected, .. })
            if expected == "http://www.ech.ch/xmlns/eCH-0044/4"
    ));
    Ok(())
}

#[test]
fn test_wrong_delivery_version_rejected() -> Result<(), XmlError> {
    let xml = String::from_utf8(to_xml_vec(&delivery())?).unwrap();
    let tampered = xml.replacen(r#"version="3.0""#, r#"version="2.0""#, 1);
    let root = parse_element(tampered.as_bytes())?;
    let err = decode_root::<Delivery>(&root).unwrap_err();
    assert!(matches!(err, WireError::ConstraintViolation { ref path, .. } if path == "delivery/@version"));
    Ok(())
}

#[test]
fn test_statistics_delivery_round_trip() -> Result<(), XmlError> {
    let person = Person {
        person_identification: identification(),
        name_data: name_data(),
        birth_data: birth_data(),
        religion_data: ReligionData {
            religion: Religion::new("211").unwrap(),
            religion_valid_from: None,
        },
        marital_data: marital_data(),
        nationality_data: nationality_data(),
        death_data: None,
        contact_data: None,
        language_of_correspondance: None,
        restricted_voting_and_election_right_federation: None,
        citizenship: Citizenship::PlacesOfOrigin(vec![place_of_origin()]),
    };
    let mut header = header();
    header.message_type = "http://www.ech.ch/xmlns/eCH-0099/2".to_string();
    let delivery = StatisticsDelivery {
        delivery_header: HeaderV4(header),
        reported_person: vec![StatisticsPerson {
            base_data: ReportedPerson {
                person,
                residence: Residence::Main(MainResidence {
                    main_residence: ResidenceData {
                        reporting_municipality: bern(),
                        arrival_date: date(2010, 1, 1),
                        comes_from: None,
                        dwelling_address: dwelling_address(),
                        departure_date: None,
                        goes_to: None,
                    },
                    secondary_residence: Vec::new(),
                }),
            },
            person_extended_data: vec![Data {
                field: DataField::new("household").unwrap(),
                value: DataValue::new("2").unwrap(),
            }],
        }],
        general_data: Vec::new(),
    };

    let bytes = to_xml_vec(&delivery)?;
    let xml = String::from_utf8(bytes.clone()).unwrap();
    assert!(xml.contains("<eCH-0099:delivery"));
    assert!(xml.contains(r#"version="2.1""#));
    assert!(xml.contains(r#"xmlns:eCH-0058="http://www.ech.ch/xmlns/eCH-0058/4""#));
    assert!(xml.contains("<eCH-0011:mainResidence>"));

    let back: StatisticsDelivery = from_xml_slice(&bytes)?;
    assert_eq!(back, delivery);

    // an eCH-0020 reader refuses the eCH-0099 root
    assert!(from_xml_slice::<Delivery>(&bytes).is_err());
    Ok(())
}
