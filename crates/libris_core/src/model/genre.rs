//! Genre domain model.
//!
//! Standalone catalog entity; carries no modeled relationship to books.
//!
//! # Invariants
//! - `name` is globally unique across genres.

use crate::model::validate::{check_name_length, ValidationError};
use serde::{Deserialize, Serialize};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

/// Persisted genre record with its storage-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Creation input for a genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    /// Checks all field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name_length("name", &self.name, NAME_MIN_CHARS, NAME_MAX_CHARS)?;
        Ok(())
    }
}
