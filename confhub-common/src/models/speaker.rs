//! Speaker record, registration payload and patch

use serde::{Deserialize, Serialize};

use super::validation::{normalize_email, require_non_empty, require_positive_id};
use crate::Result;

/// A stored speaker assigned to a conference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub conference_id: i64,
}

/// Registration payload (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpeaker {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub conference_id: i64,
}

impl NewSpeaker {
    /// Validate fields and normalize the email address in place
    pub fn validate(&mut self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("specialty", &self.specialty)?;
        self.email = normalize_email(&self.email)?;
        require_positive_id("conference_id", self.conference_id)?;
        Ok(())
    }

    pub fn conflicts_with(&self, other: &Speaker) -> bool {
        self.email == other.email
    }
}

/// Partial update; absent (or null) slots leave the stored value untouched
/// when the patch is written by `db::speakers::update_speaker`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpeakerPatch {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub conference_id: Option<i64>,
}

impl SpeakerPatch {
    /// Validate present fields and normalize the email address in place
    pub fn validate(&mut self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(specialty) = &self.specialty {
            require_non_empty("specialty", specialty)?;
        }
        if let Some(email) = self.email.as_deref() {
            let normalized = normalize_email(email)?;
            self.email = Some(normalized);
        }
        if let Some(conference_id) = self.conference_id {
            require_positive_id("conference_id", conference_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_slots_follow_json_keys() {
        let patch: SpeakerPatch = serde_json::from_str(r#"{"specialty": "Type systems"}"#).unwrap();
        assert_eq!(patch.specialty.as_deref(), Some("Type systems"));
        assert_eq!(patch.email, None);
        assert_eq!(patch.conference_id, None);
    }

    #[test]
    fn test_patch_null_is_absent() {
        let patch: SpeakerPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(patch, SpeakerPatch::default());
    }

    #[test]
    fn test_patch_validates_email() {
        let mut patch = SpeakerPatch {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let mut patch = SpeakerPatch {
            email: Some("grace@NAVY.mil".to_string()),
            ..Default::default()
        };
        patch.validate().unwrap();
        assert_eq!(patch.email.as_deref(), Some("grace@navy.mil"));
    }

    #[test]
    fn test_new_speaker_validation() {
        let mut new = NewSpeaker {
            name: "Ada".to_string(),
            specialty: "Compilers".to_string(),
            email: "ada@example.com".to_string(),
            conference_id: 1,
        };
        assert!(new.validate().is_ok());

        new.specialty = String::new();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_conflict_is_email_only() {
        let existing = Speaker {
            id: 7,
            name: "Ada".to_string(),
            specialty: "Compilers".to_string(),
            email: "ada@example.com".to_string(),
            conference_id: 1,
        };
        let candidate = NewSpeaker {
            name: "Someone else".to_string(),
            specialty: "Databases".to_string(),
            email: "ada@example.com".to_string(),
            conference_id: 99,
        };
        assert!(candidate.conflicts_with(&existing));
    }
}
