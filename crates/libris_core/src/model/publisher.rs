//! Publisher domain model.
//!
//! Standalone catalog entity; carries no modeled relationship to books.
//!
//! # Invariants
//! - `name` is globally unique across publishers.
//! - `established_year` is positive and not beyond the current year.

use crate::model::validate::{check_established_year, check_name_length, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;

/// Persisted publisher record with its storage-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    pub established_year: i32,
}

/// Creation input for a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPublisher {
    pub name: String,
    pub established_year: i32,
}

impl NewPublisher {
    /// Checks all field rules against the given reference day.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        check_name_length("name", &self.name, NAME_MIN_CHARS, NAME_MAX_CHARS)?;
        check_established_year("established_year", self.established_year, today)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_year_passes_next_year_fails() {
        let today = day(2024, 6, 1);
        let mut input = NewPublisher {
            name: "Smoloskyp".to_string(),
            established_year: today.year(),
        };
        input.validate(today).unwrap();

        input.established_year = today.year() + 1;
        let err = input.validate(today).unwrap_err();
        assert_eq!(err.field, "established_year");
    }

    #[test]
    fn non_positive_year_is_rejected() {
        let today = day(2024, 6, 1);
        let input = NewPublisher {
            name: "Osnovy".to_string(),
            established_year: 0,
        };
        assert!(input.validate(today).is_err());
    }
}
