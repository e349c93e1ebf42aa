use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::ValidationError;

/// Author entity - a writer identified by a unique name.
///
/// `id` and both timestamps are assigned by the store, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for an author that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub phone_number: Option<String>,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>, phone_number: Option<String>) -> Self {
        Self {
            name: name.into(),
            phone_number,
        }
    }

    /// Check every supplied field. An absent phone number is not checked;
    /// a present one must be exactly ten digits, so `Some("")` is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_name(&self.name)?;
        if let Some(phone_number) = &self.phone_number {
            validate::validate_phone_number(phone_number)?;
        }
        Ok(())
    }
}

/// Partial update for an author. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the phone number without validation;
    /// `Some(Some(v))` validates and sets it.
    pub phone_number: Option<Option<String>>,
}

impl AuthorPatch {
    /// Check exactly the fields present in the patch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate::validate_name(name)?;
        }
        if let Some(Some(phone_number)) = &self.phone_number {
            validate::validate_phone_number(phone_number)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }
}

impl Author {
    /// Apply an already-validated patch. `updated_at` is re-stamped by the
    /// store when the record is written back.
    pub fn apply(&mut self, patch: AuthorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_author_validates_name_and_phone() {
        assert!(NewAuthor::new("Jane Doe", None).validate().is_ok());
        assert!(
            NewAuthor::new("Jane Doe", Some("5551234567".into()))
                .validate()
                .is_ok()
        );
        assert!(NewAuthor::new("", None).validate().is_err());
        assert!(
            NewAuthor::new("Jane Doe", Some("555123456".into()))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn absent_phone_number_skips_the_check_but_empty_fails_it() {
        assert!(NewAuthor::new("Jane Doe", None).validate().is_ok());
        let err = NewAuthor::new("Jane Doe", Some(String::new()))
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "phone_number");
    }

    #[test]
    fn patch_only_checks_present_fields() {
        let patch = AuthorPatch {
            name: None,
            phone_number: Some(Some("5551234567".into())),
        };
        assert!(patch.validate().is_ok());

        let patch = AuthorPatch {
            name: Some(String::new()),
            phone_number: None,
        };
        assert_eq!(patch.validate().unwrap_err().field, "name");

        // Clearing the phone number is not a validation failure.
        let patch = AuthorPatch {
            name: None,
            phone_number: Some(None),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn apply_overwrites_only_patched_fields() {
        let mut author = Author {
            id: 1,
            name: "Jane Doe".into(),
            phone_number: Some("5551234567".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        author.apply(AuthorPatch {
            name: Some("J. Doe".into()),
            phone_number: None,
        });
        assert_eq!(author.name, "J. Doe");
        assert_eq!(author.phone_number.as_deref(), Some("5551234567"));

        author.apply(AuthorPatch {
            name: None,
            phone_number: Some(None),
        });
        assert_eq!(author.phone_number, None);
    }
}
