//! Error types for building and reading wire trees.
//!
//! Every variant carries the `/`-joined element path at which the problem was
//! detected, so a failure deep inside a relationship block names the full
//! nested location rather than the top-level field.

use std::fmt;

use thiserror::Error;

/// How a choice group was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceArity {
    /// No arm was supplied or present.
    None,
    /// More than one arm was supplied or present.
    Multiple(Vec<String>),
}

impl fmt::Display for ChoiceArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceArity::None => f.write_str("none present"),
            ChoiceArity::Multiple(arms) => {
                write!(f, "multiple present ({})", arms.join(", "))
            }
        }
    }
}

/// Structural and value errors raised while encoding or decoding a wire tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("missing required field: {path}")]
    MissingRequiredField { path: String },

    #[error("choice violation in {group}: {arity}")]
    ChoiceViolation { group: String, arity: ChoiceArity },

    #[error("namespace mismatch at {path}: expected {expected:?}, found {actual:?}")]
    NamespaceMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("unknown value {raw:?} at {path}")]
    EnumValueUnknown { path: String, raw: String },

    #[error("constraint violation at {path}: {rule}")]
    ConstraintViolation { path: String, rule: String },

    #[error("duplicated field {path} disagrees between {}", .locations.join(" and "))]
    DuplicateFieldMismatch { path: String, locations: Vec<String> },

    #[error("unexpected element {name:?} at {path}")]
    UnexpectedElement { path: String, name: String },

    #[error("element {name:?} at {path} appears out of declared order")]
    OutOfOrder { path: String, name: String },
}

impl WireError {
    pub fn missing(path: impl Into<String>) -> Self {
        WireError::MissingRequiredField { path: path.into() }
    }

    pub fn constraint(path: impl Into<String>, rule: impl Into<String>) -> Self {
        WireError::ConstraintViolation {
            path: path.into(),
            rule: rule.into(),
        }
    }

    pub fn choice_none(group: impl Into<String>) -> Self {
        WireError::ChoiceViolation {
            group: group.into(),
            arity: ChoiceArity::None,
        }
    }

    pub fn choice_multiple<I, S>(group: impl Into<String>, arms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WireError::ChoiceViolation {
            group: group.into(),
            arity: ChoiceArity::Multiple(arms.into_iter().map(Into::into).collect()),
        }
    }

    /// The path the error was reported at.
    pub fn path(&self) -> &str {
        match self {
            WireError::MissingRequiredField { path }
            | WireError::NamespaceMismatch { path, .. }
            | WireError::EnumValueUnknown { path, .. }
            | WireError::ConstraintViolation { path, .. }
            | WireError::DuplicateFieldMismatch { path, .. }
            | WireError::UnexpectedElement { path, .. }
            | WireError::OutOfOrder { path, .. } => path,
            WireError::ChoiceViolation { group, .. } => group,
        }
    }
}

/// Failure to parse or validate a single scalar, before a path is known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("unknown code {0:?}")]
    Unknown(String),

    #[error("{0}")]
    Constraint(String),
}

impl ValueError {
    /// Attaches the location the value was read from or written to.
    pub fn at(self, path: impl Into<String>) -> WireError {
        match self {
            ValueError::Unknown(raw) => WireError::EnumValueUnknown {
                path: path.into(),
                raw,
            },
            ValueError::Constraint(rule) => WireError::ConstraintViolation {
                path: path.into(),
                rule,
            },
        }
    }
}

/// Result type alias for wire tree operations.
pub type Result<T> = std::result::Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_violation_display() {
        let err = WireError::choice_multiple("birthPlace", ["swissTown", "foreignCountry"]);
        assert_eq!(
            err.to_string(),
            "choice violation in birthPlace: multiple present (swissTown, foreignCountry)"
        );
        assert_eq!(
            WireError::choice_none("dateOfBirth").to_string(),
            "choice violation in dateOfBirth: none present"
        );
    }

    #[test]
    fn test_duplicate_mismatch_lists_locations() {
        let err = WireError::DuplicateFieldMismatch {
            path: "official_name".to_string(),
            locations: vec![
                "personIdentification/officialName".to_string(),
                "nameInfo/nameData/officialName".to_string(),
            ],
        };
        assert!(err.to_string().contains(
            "personIdentification/officialName and nameInfo/nameData/officialName"
        ));
        assert_eq!(err.path(), "official_name");
    }

    #[test]
    fn test_value_error_gets_path() {
        let err = ValueError::Unknown("7".to_string()).at("person/sex");
        assert_eq!(
            err,
            WireError::EnumValueUnknown {
                path: "person/sex".to_string(),
                raw: "7".to_string()
            }
        );

        let err = ValueError::Constraint("longer than 100 characters".to_string()).at("x");
        assert!(matches!(err, WireError::ConstraintViolation { .. }));
    }
}
