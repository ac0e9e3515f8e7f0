//! Field validation shared by the create and patch payloads

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// Reject empty or whitespace-only text
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Check email syntax and return the normalized address (domain lowercased)
pub fn normalize_email(value: &str) -> Result<String> {
    let value = value.trim();
    if value.len() > 254 || !EMAIL_RE.is_match(value) {
        return Err(Error::InvalidInput(format!(
            "email is not a valid email address: {}",
            value
        )));
    }

    match value.rsplit_once('@') {
        Some((local, domain)) => Ok(format!("{}@{}", local, domain.to_ascii_lowercase())),
        None => Err(Error::InvalidInput(format!(
            "email is not a valid email address: {}",
            value
        ))),
    }
}

/// Ids referenced from payloads are positive
pub fn require_positive_id(field: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(Error::InvalidInput(format!(
            "{} must be a positive integer",
            field
        )));
    }
    Ok(())
}

/// Keeps "present but null" apart from "absent" for nullable patch slots.
///
/// Used with `#[serde(default)]`: an absent key stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
