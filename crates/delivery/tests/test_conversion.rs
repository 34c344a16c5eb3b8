use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use ech_delivery::{
    BaseDeliveryEvent, BaseDeliveryPerson, CountryFields, DeliveryConfig, DeliveryError,
    DwellingAddressInfo, FinalizeOptions, GuardianInfo, MunicipalityInfo, NamedId, ParentInfo,
    PartnerFields, PersonIdentity, PlaceFields, PlaceOfOriginFields, ResidenceType, Result,
    SchemaVersion, SpouseInfo, convert_batch, convert_batch_validated, decode_batch,
    decode_document, finalize_0020_base,
};
use ech_model::codes::{
    Canton, Care, DataLock, GuardianMeasureLaw, GuardianRelationshipType, MaritalRelationshipType,
    MaritalStatus, NationalityStatus, ParentalRelationshipType, Sex, TypeOfHousehold,
};
use ech_model::ech0044::DatePartiallyKnown;
use ech_wire::{ChoiceArity, WireError, Year};
use ech_xml::{Diagnostic, SchemaGateway, XmlError, to_xml_vec};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn message_date() -> NaiveDateTime {
    date(2024, 3, 1).and_hms_opt(8, 30, 0).unwrap()
}

fn options() -> FinalizeOptions {
    FinalizeOptions::fixed("a6a4b5e2-2c1d-4f3e-9d7a-0e8f1c2b3a4d", message_date())
}

fn bern() -> MunicipalityInfo {
    MunicipalityInfo::new(351, "Bern", Canton::BE)
}

fn person() -> BaseDeliveryPerson {
    BaseDeliveryPerson {
        vn: Some("7561234567897".to_string()),
        local_person_id: NamedId::new("CH.ZAR", "4711"),
        official_name: "Müller".to_string(),
        first_name: "Anna".to_string(),
        sex: Some(Sex::Female),
        date_of_birth: Some(DatePartiallyKnown::YearMonthDay(date(1980, 5, 17))),
        birth_place: PlaceFields::swiss(bern()),
        religion: "111".to_string(),
        marital_status: Some(MaritalStatus::Single),
        nationality_status: Some(NationalityStatus::Unknown),
        places_of_origin: vec![PlaceOfOriginFields {
            origin_name: "Bern".to_string(),
            canton: Some(Canton::BE),
            ..PlaceOfOriginFields::default()
        }],
        data_lock: Some(DataLock::NoLock),
        ..BaseDeliveryPerson::default()
    }
}

fn record() -> BaseDeliveryEvent {
    BaseDeliveryEvent {
        person: person(),
        residence_type: ResidenceType::Main,
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

fn encode(records: &[BaseDeliveryEvent]) -> Result<Vec<u8>> {
    let delivery = finalize_0020_base(records, &DeliveryConfig::for_testing(), &options())?;
    Ok(to_xml_vec(&delivery)?)
}

fn three_parents() -> Vec<ParentInfo> {
    let complete = PersonIdentity {
        local_person_id: Some(NamedId::new("CH.ZAR", "4712")),
        sex: Some(Sex::Male),
        date_of_birth: Some(DatePartiallyKnown::Year(Year(1950))),
        ..PersonIdentity::named("Müller", "Hans")
    };
    vec![
        ParentInfo::new(
            PersonIdentity::named("Müller", "Erika"),
            ParentalRelationshipType::Mother,
            Care::Joint,
        ),
        ParentInfo::new(complete, ParentalRelationshipType::Father, Care::Joint),
        ParentInfo {
            valid_from: Some(date(1995, 8, 1)),
            ..ParentInfo::new(
                PersonIdentity::named("Keller", "Beat"),
                ParentalRelationshipType::FosterFather,
                Care::Sole,
            )
        },
    ]
}

#[test]
fn test_unknown_birth_place_round_trip() -> Result<()> {
    let mut input = record();
    input.person.birth_place = PlaceFields::unknown();
    let bytes = encode(std::slice::from_ref(&input))?;
    let xml = String::from_utf8_lossy(&bytes);
    assert!(xml.contains(":unknown>0</"));
    assert!(!xml.contains(":swissTown>"));

    let back = decode_document(&bytes)?;
    assert_eq!(back[0].person.birth_place, PlaceFields::unknown());
    assert_eq!(back[0].person.birth_place.municipality_id, None);
    assert_eq!(back[0].person.birth_place.country_id, None);
    assert_eq!(back, vec![input]);
    Ok(())
}

#[test]
fn test_duplicated_name_written_twice_read_once() -> Result<()> {
    let bytes = encode(&[record()])?;
    let xml = String::from_utf8_lossy(&bytes);
    assert!(xml.contains("<eCH-0044:officialName>Müller</eCH-0044:officialName>"));
    assert!(xml.contains("<eCH-0011:officialName>Müller</eCH-0011:officialName>"));

    let back = decode_document(&bytes)?;
    assert_eq!(back[0].person.official_name, "Müller");
    Ok(())
}

#[test]
fn test_duplicated_name_disagreement() -> Result<()> {
    let bytes = encode(&[record()])?;
    let edited = String::from_utf8_lossy(&bytes).replace(
        "<eCH-0011:officialName>Müller</eCH-0011:officialName>",
        "<eCH-0011:officialName>Meier</eCH-0011:officialName>",
    );
    let err = decode_document(edited.as_bytes()).unwrap_err();
    assert_eq!(
        err.as_wire(),
        Some(&WireError::DuplicateFieldMismatch {
            path: "official_name".to_string(),
            locations: vec![
                "personIdentification/officialName".to_string(),
                "nameInfo/nameData/officialName".to_string(),
            ],
        })
    );
    Ok(())
}

#[test]
fn test_swiss_and_foreign_place_rejected_before_encoding() {
    let mut input = record();
    input.person.birth_place.country_id = Some(8207);
    input.person.birth_place.country_name_short = Some("Deutschland".to_string());

    let err = finalize_0020_base(&[input], &DeliveryConfig::for_testing(), &options()).unwrap_err();
    assert_eq!(
        err.as_wire(),
        Some(&WireError::ChoiceViolation {
            group: "birth_place".to_string(),
            arity: ChoiceArity::Multiple(vec![
                "swissTown".to_string(),
                "foreignCountry".to_string()
            ]),
        })
    );
}

#[test]
fn test_relationships_keep_their_order() -> Result<()> {
    let mut input = record();
    input.person.parents = three_parents();
    let bytes = encode(&[input])?;

    let back = decode_document(&bytes)?;
    let names: Vec<_> = back[0]
        .person
        .parents
        .iter()
        .map(|parent| parent.person.first_name.as_str())
        .collect();
    assert_eq!(names, ["Erika", "Hans", "Beat"]);
    assert!(back[0].person.parents[1].person.is_complete());

    assert_eq!(encode(&back)?, bytes);
    Ok(())
}

#[test]
fn test_missing_name_in_nested_relationship() {
    let mut input = record();
    input.person.parents = three_parents();
    input.person.parents[1].person.official_name.clear();

    let err = encode(&[input]).unwrap_err();
    assert_eq!(
        err.as_wire(),
        Some(&WireError::missing("parents[2].person.official_name"))
    );
}

#[test]
fn test_rich_record_round_trip() -> Result<()> {
    let mut input = record();
    input.person.marital_status = Some(MaritalStatus::Married);
    input.person.date_of_marital_status = Some(date(2005, 6, 10));
    input.person.marriage_place = PlaceFields::foreign(
        CountryFields {
            country_id: Some(8212),
            country_iso2: Some("FR".to_string()),
            country_name_short: "Frankreich".to_string(),
        },
        Some("Paris".to_string()),
    );
    input.person.spouse = Some(SpouseInfo {
        person: PersonIdentity::named("Müller", "Marc"),
        address: None,
        relationship_type: Some(MaritalRelationshipType::Married),
    });
    input.person.parents = three_parents();

    let mut guardian = GuardianInfo::new("g-1", GuardianRelationshipType::Curator, date(2019, 2, 1));
    guardian.partner = PartnerFields::person_partner(PersonIdentity::named("Keller", "Rita"));
    guardian.based_on_law = vec![GuardianMeasureLaw::Art327A, GuardianMeasureLaw::Art363];
    input.person.guardians = vec![
        guardian,
        GuardianInfo::new("g-2", GuardianRelationshipType::Guardian, date(2020, 1, 1)),
    ];
    input.secondary_residences = vec![MunicipalityInfo::new(371, "Biel/Bienne", Canton::BE)];
    input.base_delivery_valid_from = Some(date(2024, 1, 1));

    let bytes = encode(std::slice::from_ref(&input))?;
    let back = decode_document(&bytes)?;
    assert_eq!(back, vec![input]);
    assert_eq!(encode(&back)?, bytes);
    Ok(())
}

#[test]
fn test_output_does_not_depend_on_assignment_order() -> Result<()> {
    let mut first = record();
    first.person.call_name = Some("Anni".to_string());
    first.person.religion_valid_from = Some(date(1980, 6, 1));
    first.departure_date = Some(date(2024, 2, 1));

    let mut second = record();
    second.departure_date = Some(date(2024, 2, 1));
    second.person.religion_valid_from = Some(date(1980, 6, 1));
    second.person.call_name = Some("Anni".to_string());

    assert_eq!(encode(&[first])?, encode(&[second])?);
    Ok(())
}

#[test]
fn test_secondary_residence_through_xml() -> Result<()> {
    let mut input = record();
    input.residence_type = ResidenceType::Secondary;
    input.comes_from = Some(ech_delivery::DestinationInfo::new(PlaceFields::unknown()));
    input.main_residence = Some(MunicipalityInfo::new(261, "Zürich", Canton::ZH));

    let bytes = encode(std::slice::from_ref(&input))?;
    let xml = String::from_utf8_lossy(&bytes);
    assert!(xml.contains("<eCH-0020:hasSecondaryResidence>"));
    assert_eq!(decode_document(&bytes)?, vec![input]);
    Ok(())
}

#[test]
fn test_batch_order_and_failure_isolation() -> Result<()> {
    let mut broken = record();
    broken.person.sex = None;
    let mut second = record();
    second.person.first_name = "Beat".to_string();
    let records = vec![record(), broken, second];

    let results = convert_batch(&records, SchemaVersion::Ech0020V3, &DeliveryConfig::for_testing());
    assert_eq!(results.len(), 3);
    assert!(matches!(
        results[1].as_ref().unwrap_err().as_wire(),
        Some(WireError::MissingRequiredField { path }) if path == "sex"
    ));

    let documents: Vec<Vec<u8>> = results.into_iter().filter_map(|r| r.ok()).collect();
    let decoded = decode_batch(&documents);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].as_ref().unwrap()[0].person.first_name, "Anna");
    assert_eq!(decoded[1].as_ref().unwrap()[0].person.first_name, "Beat");
    Ok(())
}

#[test]
fn test_statistics_batch_round_trip() -> Result<()> {
    let results = convert_batch(&[record()], SchemaVersion::Ech0099V2, &DeliveryConfig::for_testing());
    let bytes = results.into_iter().next().unwrap()?;
    let xml = String::from_utf8_lossy(&bytes);
    assert!(xml.contains("<eCH-0099:delivery"));
    assert!(xml.contains(r#"version="2.1""#));
    assert_eq!(SchemaVersion::detect(&bytes)?, SchemaVersion::Ech0099V2);

    let back = decode_document(&bytes)?;
    assert_eq!(back[0].person.official_name, "Müller");
    assert_eq!(back[0].dwelling_address, record().dwelling_address);
    assert_eq!(back[0].reporting_municipality, Some(bern()));
    Ok(())
}

#[test]
fn test_unsupported_document() {
    let xml = br#"<delivery xmlns="http://www.ech.ch/xmlns/eCH-0020/2" version="2.0"/>"#;
    assert!(matches!(
        decode_document(xml),
        Err(DeliveryError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_file_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("delivery.xml");
    std::fs::write(&path, encode(&[record()])?)?;

    let bytes = std::fs::read(&path)?;
    assert!(bytes.starts_with(b"<?xml"));
    assert_eq!(decode_document(&bytes)?, vec![record()]);
    Ok(())
}

/// Gateway that rejects documents naming a marker and remembers what it saw.
#[derive(Default)]
struct MarkerGateway {
    seen: Mutex<Vec<String>>,
}

impl SchemaGateway for MarkerGateway {
    fn validate(&self, xml: &[u8], schema_id: &str) -> std::result::Result<(), Vec<Diagnostic>> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(schema_id.to_string());
        }
        if String::from_utf8_lossy(xml).contains("Rejected") {
            Err(vec![
                Diagnostic::new("value not allowed")
                    .at_path("/delivery/baseDelivery/messages/eventBaseDelivery"),
            ])
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_gateway_rejection_is_per_document() {
    let gateway = MarkerGateway::default();
    let mut rejected = record();
    rejected.person.first_name = "Rejected".to_string();

    let results = convert_batch_validated(
        &[record(), rejected],
        SchemaVersion::Ech0020V3,
        &DeliveryConfig::for_testing(),
        &gateway,
    );
    assert!(results[0].is_ok());
    match &results[1] {
        Err(DeliveryError::Xml(XmlError::SchemaValidationFailed {
            schema_id,
            diagnostics,
        })) => {
            assert_eq!(schema_id, "eCH-0020-3-0.xsd");
            assert_eq!(diagnostics.len(), 1);
        }
        other => panic!("expected a schema validation failure, got {other:?}"),
    }
    assert_eq!(gateway.seen.lock().unwrap().len(), 2);
}
