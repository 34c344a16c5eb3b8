//! Scalar wire values.
//!
//! Formatting is fixed per type: booleans as `true`/`false`, dates as
//! `YYYY-MM-DD`, timestamps as ISO-8601 with seconds precision, and
//! fixed-width codes zero-padded.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;

use crate::error::ValueError;

/// A value carried as element text.
pub trait WireValue: Sized {
    fn to_wire(&self) -> String;
    fn from_wire(raw: &str) -> Result<Self, ValueError>;
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

impl WireValue for String {
    fn to_wire(&self) -> String {
        self.clone()
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

impl WireValue for bool {
    fn to_wire(&self) -> String {
        bool_to_string(*self).to_string()
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        // xs:boolean also admits the numeric forms
        match raw {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ValueError::Unknown(other.to_string())),
        }
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl WireValue for NaiveDate {
    fn to_wire(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| ValueError::Constraint(format!("invalid date {raw:?}: {e}")))
    }
}

impl WireValue for NaiveDateTime {
    fn to_wire(&self) -> String {
        self.format(DATE_TIME_FORMAT).to_string()
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|value| value.with_nanosecond(0).unwrap_or(value))
            .map_err(|e| ValueError::Constraint(format!("invalid timestamp {raw:?}: {e}")))
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty),+) => {
        $(
            impl WireValue for $ty {
                fn to_wire(&self) -> String {
                    self.to_string()
                }

                fn from_wire(raw: &str) -> Result<Self, ValueError> {
                    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(ValueError::Constraint(format!(
                            "expected an unsigned integer, found {raw:?}"
                        )));
                    }
                    raw.parse::<$ty>().map_err(|e| {
                        ValueError::Constraint(format!("integer {raw:?} out of range: {e}"))
                    })
                }
            }
        )+
    };
}

impl_unsigned!(u8, u16, u32, u64);

/// A numeric code written zero-padded to exactly `WIDTH` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedDigits<const WIDTH: usize>(u64);

impl<const WIDTH: usize> FixedDigits<WIDTH> {
    pub fn new(value: u64) -> Result<Self, ValueError> {
        let digits = value.checked_ilog10().map_or(1, |d| d as usize + 1);
        if digits > WIDTH {
            return Err(ValueError::Constraint(format!(
                "{value} does not fit in {WIDTH} digits"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl<const WIDTH: usize> WireValue for FixedDigits<WIDTH> {
    fn to_wire(&self) -> String {
        format!("{:0width$}", self.0, width = WIDTH)
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        if raw.len() != WIDTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValueError::Constraint(format!(
                "expected exactly {WIDTH} digits, found {raw:?}"
            )));
        }
        let value = raw
            .parse::<u64>()
            .map_err(|e| ValueError::Constraint(e.to_string()))?;
        Ok(Self(value))
    }
}

impl<const WIDTH: usize> fmt::Display for FixedDigits<WIDTH> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// `xs:gYear`, written as four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(pub u16);

impl WireValue for Year {
    fn to_wire(&self) -> String {
        format!("{:04}", self.0)
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        if raw.len() != 4 {
            return Err(ValueError::Constraint(format!("invalid year {raw:?}")));
        }
        u16::from_wire(raw).map(Year)
    }
}

/// `xs:gYearMonth`, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8,
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Result<Self, ValueError> {
        if !(1..=12).contains(&month) {
            return Err(ValueError::Constraint(format!("invalid month {month}")));
        }
        Ok(Self { year, month })
    }
}

impl WireValue for YearMonth {
    fn to_wire(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    fn from_wire(raw: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::Constraint(format!("invalid year-month {raw:?}"));
        let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = u16::from_wire(year).map_err(|_| invalid())?;
        let month = u8::from_wire(month).map_err(|_| invalid())?;
        YearMonth::new(year, month)
    }
}

/// Checks a value's length in characters.
pub fn check_length(value: &str, min: usize, max: usize) -> Result<(), ValueError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValueError::Constraint(format!(
            "shorter than {min} character(s)"
        )));
    }
    if len > max {
        return Err(ValueError::Constraint(format!(
            "longer than {max} characters"
        )));
    }
    Ok(())
}

static PATTERNS: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Checks a value against an XSD-style pattern, which always matches the
/// whole value.
pub fn check_pattern(value: &str, pattern: &'static str) -> Result<(), ValueError> {
    let mut patterns = PATTERNS.lock();
    if !patterns.contains_key(pattern) {
        let compiled = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| ValueError::Constraint(format!("invalid pattern {pattern:?}: {e}")))?;
        patterns.insert(pattern, compiled);
    }
    if patterns.get(pattern).is_some_and(|regex| regex.is_match(value)) {
        Ok(())
    } else {
        Err(ValueError::Constraint(format!(
            "{value:?} does not match pattern {pattern}"
        )))
    }
}

/// Checks an integer against an inclusive range.
pub fn check_range<T>(value: T, min: T, max: T) -> Result<T, ValueError>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(ValueError::Constraint(format!(
            "{value} outside {min}..={max}"
        )));
    }
    Ok(value)
}

/// Declares a closed code list with fixed wire strings.
///
/// ```ignore
/// wire_enum! {
///     pub enum Sex {
///         Male = "1",
///         Female = "2",
///         Unknown = "3",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }
        }

        impl $crate::WireValue for $name {
            fn to_wire(&self) -> String {
                self.code().to_string()
            }

            fn from_wire(raw: &str) -> ::std::result::Result<Self, $crate::ValueError> {
                match raw {
                    $( $code => Ok($name::$variant), )+
                    other => Err($crate::ValueError::Unknown(other.to_string())),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ValueError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::WireValue>::from_wire(s)
            }
        }
    };
}

/// Declares a string newtype with length bounds and an optional pattern.
///
/// ```ignore
/// wire_string! {
///     /// eCH-0044 baseNameType
///     pub struct BaseName { min: 1, max: 100 }
/// }
/// ```
#[macro_export]
macro_rules! wire_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { min: $min:expr, max: $max:expr $(, pattern: $pattern:literal)? $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> ::std::result::Result<Self, $crate::ValueError> {
                let value = value.into();
                $crate::value::check_length(&value, $min, $max)?;
                $( $crate::value::check_pattern(&value, $pattern)?; )?
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl $crate::WireValue for $name {
            fn to_wire(&self) -> String {
                self.0.clone()
            }

            fn from_wire(raw: &str) -> ::std::result::Result<Self, $crate::ValueError> {
                $name::new(raw)
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ValueError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $name::new(s)
            }
        }
    };
}

/// Declares an unsigned integer newtype restricted to an inclusive range.
#[macro_export]
macro_rules! wire_number {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($inner:ty) { min: $min:expr, max: $max:expr $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($inner);

        impl $name {
            pub fn new(value: $inner) -> ::std::result::Result<Self, $crate::ValueError> {
                $crate::value::check_range(value, $min, $max).map(Self)
            }

            pub fn get(&self) -> $inner {
                self.0
            }
        }

        impl $crate::WireValue for $name {
            fn to_wire(&self) -> String {
                self.0.to_string()
            }

            fn from_wire(raw: &str) -> ::std::result::Result<Self, $crate::ValueError> {
                <$inner as $crate::WireValue>::from_wire(raw).and_then($name::new)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        enum Colour {
            Red = "1",
            Blue = "2",
        }
    }

    wire_string! {
        struct ShortName { min: 1, max: 5, pattern: "[A-Za-z]+" }
    }

    wire_number! {
        struct Zip(u32) { min: 1000, max: 9999 }
    }

    #[test]
    fn test_bool_to_string() {
        assert_eq!(bool_to_string(true), "true");
        assert_eq!(bool_to_string(false), "false");
        assert_eq!(true.to_wire(), "true");
        assert_eq!(bool::from_wire("1"), Ok(true));
        assert!(bool::from_wire("yes").is_err());
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(1980, 3, 7).unwrap();
        assert_eq!(date.to_wire(), "1980-03-07");
        assert_eq!(NaiveDate::from_wire("1980-03-07"), Ok(date));
        assert!(NaiveDate::from_wire("07.03.1980").is_err());

        let ts = date.and_hms_opt(9, 5, 1).unwrap();
        assert_eq!(ts.to_wire(), "1980-03-07T09:05:01");
        assert_eq!(NaiveDateTime::from_wire("1980-03-07T09:05:01.250"), Ok(ts));
    }

    #[test]
    fn test_fixed_digits_are_zero_padded() {
        let uid = FixedDigits::<9>::new(12345).unwrap();
        assert_eq!(uid.to_wire(), "000012345");
        assert_eq!(FixedDigits::<9>::from_wire("000012345"), Ok(uid));
        assert!(FixedDigits::<9>::from_wire("12345").is_err());
        assert!(FixedDigits::<3>::new(1000).is_err());
        assert_eq!(FixedDigits::<3>::new(0).unwrap().to_wire(), "000");
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(Year(987).to_wire(), "0987");
        assert_eq!(Year::from_wire("1987"), Ok(Year(1987)));
        let ym = YearMonth::new(1987, 4).unwrap();
        assert_eq!(ym.to_wire(), "1987-04");
        assert_eq!(YearMonth::from_wire("1987-04"), Ok(ym));
        assert!(YearMonth::from_wire("1987-13").is_err());
    }

    #[test]
    fn test_unsigned_rejects_signs() {
        assert_eq!(u32::from_wire("42"), Ok(42));
        assert!(u32::from_wire("+42").is_err());
        assert!(u32::from_wire("").is_err());
        assert!(u8::from_wire("300").is_err());
    }

    #[test]
    fn test_wire_enum() {
        assert_eq!(Colour::Blue.to_wire(), "2");
        assert_eq!("1".parse::<Colour>(), Ok(Colour::Red));
        assert_eq!(
            Colour::from_wire("9"),
            Err(ValueError::Unknown("9".to_string()))
        );
        assert_eq!(Colour::ALL.len(), 2);
    }

    #[test]
    fn test_wire_string_constraints() {
        assert!(ShortName::new("Anna").is_ok());
        assert!(ShortName::new("").is_err());
        assert!(ShortName::new("Annabel").is_err());
        assert!(ShortName::new("An1").is_err());
        // characters, not bytes
        assert!(check_length("Jürg", 1, 4).is_ok());
    }

    #[test]
    fn test_wire_number_range() {
        assert_eq!(Zip::from_wire("8000").map(|z| z.get()), Ok(8000));
        assert!(Zip::from_wire("999").is_err());
        assert!(Zip::new(10000).is_err());
    }
}
