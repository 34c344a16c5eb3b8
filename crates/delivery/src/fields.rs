//! Helpers shared by the record mappers.
//!
//! Logical field paths are `.`-joined record field names, with 1-based
//! positions for list items: `parents[2].person.official_name`.

use ech_wire::{Result, ValueError, WireError};

/// Path of a nested logical field.
pub(crate) fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Path of the `index`th (0-based) item of a list field.
pub(crate) fn item(parent: &str, index: usize) -> String {
    format!("{parent}[{}]", index + 1)
}

/// Builds a required text value. Blank input counts as absent.
pub(crate) fn text<T>(
    path: &str,
    value: &str,
    new: impl FnOnce(String) -> std::result::Result<T, ValueError>,
) -> Result<T> {
    if value.trim().is_empty() {
        return Err(WireError::missing(path));
    }
    new(value.to_string()).map_err(|e| e.at(path))
}

/// Builds an optional text value. A present but blank value is rejected.
pub(crate) fn opt_text<T>(
    path: &str,
    value: Option<&str>,
    new: impl FnOnce(String) -> std::result::Result<T, ValueError>,
) -> Result<Option<T>> {
    match value {
        Some(value) if value.trim().is_empty() => {
            Err(WireError::constraint(path, "must not be blank"))
        }
        Some(value) => new(value.to_string()).map(Some).map_err(|e| e.at(path)),
        None => Ok(None),
    }
}

/// Attaches `path` to a scalar construction result.
pub(crate) fn checked<T>(path: &str, value: std::result::Result<T, ValueError>) -> Result<T> {
    value.map_err(|e| e.at(path))
}

pub(crate) fn opt_checked<T>(
    path: &str,
    value: Option<std::result::Result<T, ValueError>>,
) -> Result<Option<T>> {
    value.transpose().map_err(|e| e.at(path))
}

/// Text of an optional wire string.
pub(crate) fn opt_string<T: AsRef<str>>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(|v| v.as_ref().to_string())
}

pub(crate) fn required<T>(path: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| WireError::missing(path))
}

/// Rejects a field that the surrounding record does not allow.
pub(crate) fn forbidden(path: &str, present: bool, rule: &str) -> Result<()> {
    if present {
        Err(WireError::constraint(path, rule))
    } else {
        Ok(())
    }
}
