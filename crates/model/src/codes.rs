//! Closed code lists shared across the standards.
//!
//! Every list carries its exact wire code; decoding an unlisted code fails
//! with `EnumValueUnknown` at the element's path.

use ech_wire::{wire_enum, wire_string};

wire_enum! {
    /// eCH-0044 `sexType`.
    pub enum Sex {
        Male = "1",
        Female = "2",
        Unknown = "3",
    }
}

wire_enum! {
    /// Canton abbreviations of eCH-0007 `cantonAbbreviationType`.
    pub enum Canton {
        AG = "AG", AI = "AI", AR = "AR", BE = "BE", BL = "BL", BS = "BS",
        FR = "FR", GE = "GE", GL = "GL", GR = "GR", JU = "JU", LU = "LU",
        NE = "NE", NW = "NW", OW = "OW", SG = "SG", SH = "SH", SO = "SO",
        SZ = "SZ", TG = "TG", TI = "TI", UR = "UR", VD = "VD", VS = "VS",
        ZG = "ZG", ZH = "ZH",
    }
}

wire_enum! {
    /// eCH-0010 `mrMrsType`.
    pub enum MrMrs {
        Mrs = "1",
        Mr = "2",
        Miss = "3",
    }
}

wire_enum! {
    pub enum MaritalStatus {
        Single = "1",
        Married = "2",
        Widowed = "3",
        Divorced = "4",
        Unmarried = "5",
        RegisteredPartnership = "6",
        DissolvedPartnership = "7",
        Unknown = "9",
    }
}

wire_enum! {
    /// Reason a registered partnership ended (`partnershipAbolitionType`).
    pub enum CancelationReason {
        JudicialDissolution = "1",
        Annulment = "2",
        DeclaredMissing = "3",
        Death = "4",
        Unknown = "9",
    }
}

wire_enum! {
    pub enum Separation {
        Voluntary = "1",
        Judicial = "2",
    }
}

wire_enum! {
    pub enum NationalityStatus {
        Unknown = "0",
        Stateless = "1",
        Known = "2",
    }
}

wire_enum! {
    pub enum TypeOfHousehold {
        Unknown = "0",
        Private = "1",
        Collective = "2",
        Administrative = "3",
    }
}

wire_enum! {
    /// Register reporting a person when no municipality does.
    pub enum FederalRegister {
        Infostar = "1",
        Ordipro = "2",
        Zemis = "3",
    }
}

wire_enum! {
    /// eCH-0011 `yesNoType`, also used for the eCH-0021 v8 locks.
    pub enum YesNo {
        No = "0",
        Yes = "1",
    }
}

wire_enum! {
    /// eCH-0021 v7 `dataLockType`. Version 8 replaced it with [`YesNo`].
    pub enum DataLock {
        NoLock = "0",
        AddressLock = "1",
        InformationLock = "2",
    }
}

wire_enum! {
    pub enum MaritalRelationshipType {
        Married = "1",
        RegisteredPartnership = "2",
    }
}

wire_enum! {
    pub enum ParentalRelationshipType {
        Mother = "3",
        Father = "4",
        FosterFather = "5",
        FosterMother = "6",
    }
}

wire_enum! {
    /// Which parent a `nameOfParent` entry names.
    pub enum ParentNameType {
        Mother = "3",
        Father = "4",
    }
}

wire_enum! {
    pub enum GuardianRelationshipType {
        LegalAssistant = "7",
        Guardian = "8",
        HealthCareProxy = "9",
        Curator = "10",
    }
}

wire_enum! {
    /// Parental custody (`careType`).
    pub enum Care {
        Unknown = "0",
        Joint = "1",
        Sole = "2",
        NoCustody = "3",
        Other = "4",
    }
}

wire_enum! {
    pub enum KindOfEmployment {
        Unknown = "0",
        Employed = "1",
        SelfEmployed = "2",
        Unemployed = "3",
        NotInLabourForce = "4",
    }
}

wire_enum! {
    pub enum UidCategory {
        Enterprise = "CHE",
        Administration = "ADM",
    }
}

wire_enum! {
    /// Civil code article a guardian measure is based on.
    pub enum GuardianMeasureLaw {
        Art306 = "306",
        Art310 = "310",
        Art311 = "311",
        Art312 = "312",
        Art327A = "327-a",
        Art363 = "363",
        Art368 = "368",
        Art369 = "369",
        Art370 = "370",
        Art371 = "371",
        Art372 = "372",
        Art393 = "393",
        Art394 = "394",
        Art395 = "395",
        Art396 = "396",
        Art397 = "397",
        Art398 = "398",
        Art399 = "399",
    }
}

wire_enum! {
    /// eCH-0058 `actionType`.
    pub enum Action {
        New = "1",
        Recall = "3",
        Correction = "4",
        Request = "5",
        Response = "6",
        Negative = "8",
        Positive = "9",
        Forward = "10",
        Commit = "12",
    }
}

wire_string! {
    /// BFS religion code, three to six digits.
    pub struct Religion { min: 3, max: 6, pattern: r"\d{3,6}" }
}

wire_string! {
    /// eCH-0006 residence permit code: category, optionally refined to
    /// four or six digits.
    pub struct ResidencePermit { min: 2, max: 6, pattern: r"\d{2}(\d{2}(\d{2})?)?" }
}

wire_string! {
    /// Correspondence language (`de`, `fr`, `it`, `rm`, `en`, ...).
    pub struct Language { min: 2, max: 2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ech_wire::WireValue;

    #[test]
    fn test_codes_round_trip_through_text() {
        assert_eq!(Sex::from_wire("2"), Ok(Sex::Female));
        assert_eq!(Canton::ALL.len(), 26);
        assert_eq!(GuardianMeasureLaw::Art327A.to_wire(), "327-a");
        assert_eq!("ADM".parse::<UidCategory>(), Ok(UidCategory::Administration));
        assert!(MaritalStatus::from_wire("8").is_err());
    }

    #[test]
    fn test_lock_types_differ() {
        assert!(DataLock::from_wire("2").is_ok());
        assert!(YesNo::from_wire("2").is_err());
    }

    #[test]
    fn test_pattern_codes() {
        assert!(Religion::new("111").is_ok());
        assert!(Religion::new("11").is_err());
        assert!(Religion::new("11a").is_err());
        assert!(ResidencePermit::new("0102").is_ok());
        assert!(ResidencePermit::new("010").is_err());
        assert!(Language::new("de").is_ok());
        assert!(Language::new("deu").is_err());
    }
}
