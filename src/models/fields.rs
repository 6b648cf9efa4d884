//! Field helpers shared by the request payloads.

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};

pub const MAX_NAME_LEN: usize = 255;

/// Distinguish an absent field from an explicit `null`.
///
/// Used with `#[serde(default)]`: absent stays `None`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(v))`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reject an explicit `null` for a field that is optional in an update but
/// not nullable on the record.
pub fn reject_null<T>(field: &str, value: &Option<Option<T>>) -> Result<()> {
    match value {
        Some(None) => Err(AppError::Validation(format!(
            "{}: This field may not be null.",
            field
        ))),
        _ => Ok(()),
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name: This field may not be blank.".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "name: Ensure this field has no more than {} characters.",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

pub fn validate_count(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!(
            "{}: Ensure this value is greater than or equal to 0.",
            field
        ))),
        _ => Ok(()),
    }
}

pub fn validate_measure(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if v < 0.0 => Err(AppError::Validation(format!(
            "{}: Ensure this value is greater than or equal to 0.",
            field
        ))),
        _ => Ok(()),
    }
}
