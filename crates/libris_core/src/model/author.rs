//! Author domain model.
//!
//! # Invariants
//! - `name` is globally unique across authors.
//! - `birth_date` is strictly before the creation day.

use crate::model::validate::{check_name_length, check_strictly_past, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 50;

/// Persisted author record with its storage-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
}

/// Creation input for an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
}

impl NewAuthor {
    /// Checks all field rules against the given reference day.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        check_name_length("name", &self.name, NAME_MIN_CHARS, NAME_MAX_CHARS)?;
        check_strictly_past("birth_date", self.birth_date, today)?;
        Ok(())
    }
}
