//! Conference record, registration payload and patch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{deserialize_some, require_non_empty};
use crate::Result;

/// A stored conference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: Option<String>,
}

/// Registration payload (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConference {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewConference {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("location", &self.location)?;
        Ok(())
    }

    /// Whether `other` would collide with this registration on (name, date)
    pub fn conflicts_with(&self, other: &Conference) -> bool {
        self.name == other.name && self.date == other.date
    }
}

/// Partial update; absent slots leave the stored value untouched when the
/// patch is written by `db::conferences::update_conference`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConferencePatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    /// `Some(None)` clears the description
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

impl ConferencePatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(location) = &self.location {
            require_non_empty("location", location)?;
        }
        Ok(())
    }
}
