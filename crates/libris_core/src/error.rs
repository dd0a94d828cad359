//! Domain error taxonomy surfaced to boundary layers.
//!
//! # Responsibility
//! - Classify every operation failure into a stable category.
//! - Keep raw storage errors out of caller-visible conflict/reference paths.
//!
//! # Invariants
//! - None of these conditions are transient; callers must not retry without
//!   changing input.
//! - A storage-level uniqueness violation is reclassified as `Conflict`,
//!   never surfaced as `Db`.

use crate::db::DbError;
use crate::model::validate::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of one domain operation, scoped to one request.
#[derive(Debug)]
pub enum DomainError {
    /// Malformed or out-of-range input, detected before persistence.
    Validation(ValidationError),
    /// Uniqueness or state conflict, detected pre-check or at storage.
    Conflict(String),
    /// Referenced entity or record is absent.
    NotFound(String),
    /// Foreign-key target is absent.
    Reference(String),
    /// Business-rule cap exceeded.
    LimitExceeded(String),
    /// Storage transport failure.
    Db(DbError),
}

/// Stable classification for boundary-layer error mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Reference,
    LimitExceeded,
    Storage,
}

impl ErrorKind {
    /// Stable machine-readable classification code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::Conflict => "conflict_error",
            Self::NotFound => "not_found_error",
            Self::Reference => "reference_error",
            Self::LimitExceeded => "limit_exceeded_error",
            Self::Storage => "storage_error",
        }
    }
}

impl DomainError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Reference(_) => ErrorKind::Reference,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Db(_) => ErrorKind::Storage,
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(message)
            | Self::NotFound(message)
            | Self::Reference(message)
            | Self::LimitExceeded(message) => write!(f, "{message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for DomainError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_codes_are_stable() {
        let cases = [
            (
                DomainError::Validation(ValidationError::new("name", "too short")),
                "validation_error",
            ),
            (DomainError::Conflict("dup".into()), "conflict_error"),
            (DomainError::NotFound("gone".into()), "not_found_error"),
            (DomainError::Reference("dangling".into()), "reference_error"),
            (DomainError::LimitExceeded("cap".into()), "limit_exceeded_error"),
        ];
        for (err, code) in cases {
            assert_eq!(err.kind().as_str(), code);
        }
    }

    #[test]
    fn validation_display_names_the_field() {
        let err = DomainError::Validation(ValidationError::new("isbn", "bad pattern"));
        assert!(err.to_string().contains("isbn"));
    }
}
