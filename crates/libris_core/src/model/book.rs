//! Book domain model and list-query contract.
//!
//! # Invariants
//! - `isbn` is globally unique and matches the ISBN-10/13 pattern.
//! - `author_id` references an existing author at creation time.
//! - `publish_date` is not later than the creation day.
//! - List sorting is restricted to the whitelisted keys below; arbitrary
//!   field names are unrepresentable.

use crate::model::validate::{
    check_isbn, check_name_length, check_not_future, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const TITLE_MIN_CHARS: usize = 1;
const TITLE_MAX_CHARS: usize = 100;

/// Default page size for book listings.
pub const BOOKS_DEFAULT_LIMIT: u32 = 10;
/// Upper bound for the book listing page size.
pub const BOOKS_LIMIT_MAX: u32 = 100;

/// Persisted book record with its storage-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publish_date: NaiveDate,
    pub author_id: i64,
}

/// Creation input for a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    pub publish_date: NaiveDate,
    pub author_id: i64,
}

impl NewBook {
    /// Checks all field rules against the given reference day.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        check_name_length("title", &self.title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        check_isbn("isbn", &self.isbn)?;
        check_not_future("publish_date", self.publish_date, today)?;
        Ok(())
    }
}

/// Whitelisted sort key for book listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSortKey {
    Title,
    PublishDate,
}

impl BookSortKey {
    /// Parses an external sort key, rejecting anything outside the whitelist.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "publish_date" => Some(Self::PublishDate),
            _ => None,
        }
    }

    /// Storage column backing this sort key.
    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PublishDate => "publish_date",
        }
    }
}

/// Sort direction for book listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses an external direction value (`asc`/`desc`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query options for book listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListQuery {
    pub sort_by: BookSortKey,
    pub order: SortOrder,
    /// Maximum rows to return. Defaults to 10; values outside 1–100 are
    /// rejected.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            sort_by: BookSortKey::Title,
            order: SortOrder::Asc,
            limit: None,
            offset: 0,
        }
    }
}

/// Resolves a list limit according to the books contract.
///
/// An absent limit falls back to the default page size; explicit values
/// outside 1–100 are rejected, not silently adjusted.
pub fn resolve_book_limit(limit: Option<u32>) -> Result<u32, ValidationError> {
    match limit {
        None => Ok(BOOKS_DEFAULT_LIMIT),
        Some(value) if (1..=BOOKS_LIMIT_MAX).contains(&value) => Ok(value),
        Some(value) => Err(ValidationError::new(
            "limit",
            format!("must be between 1 and {BOOKS_LIMIT_MAX}, got {value}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_book() -> NewBook {
        NewBook {
            title: "Kobzar".to_string(),
            isbn: "9780306406157".to_string(),
            publish_date: day(1840, 5, 1),
            author_id: 1,
        }
    }

    #[test]
    fn valid_book_passes_and_publish_today_is_allowed() {
        let today = day(2024, 6, 1);
        valid_book().validate(today).unwrap();

        let mut published_today = valid_book();
        published_today.publish_date = today;
        published_today.validate(today).unwrap();
    }

    #[test]
    fn empty_title_and_bad_isbn_are_rejected() {
        let today = day(2024, 6, 1);

        let mut no_title = valid_book();
        no_title.title = String::new();
        assert_eq!(no_title.validate(today).unwrap_err().field, "title");

        let mut bad_isbn = valid_book();
        bad_isbn.isbn = "not-an-isbn".to_string();
        assert_eq!(bad_isbn.validate(today).unwrap_err().field, "isbn");
    }

    #[test]
    fn future_publish_date_is_rejected() {
        let today = day(2024, 6, 1);
        let mut future = valid_book();
        future.publish_date = day(2024, 6, 2);
        assert_eq!(future.validate(today).unwrap_err().field, "publish_date");
    }

    #[test]
    fn sort_whitelist_rejects_unknown_fields() {
        assert_eq!(BookSortKey::parse("title"), Some(BookSortKey::Title));
        assert_eq!(
            BookSortKey::parse("publish_date"),
            Some(BookSortKey::PublishDate)
        );
        assert_eq!(BookSortKey::parse("isbn"), None);
        assert_eq!(BookSortKey::parse("id; DROP TABLE books"), None);

        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("random"), None);
    }

    #[test]
    fn limit_defaults_when_absent_and_rejects_out_of_range_values() {
        assert_eq!(resolve_book_limit(None).unwrap(), BOOKS_DEFAULT_LIMIT);
        assert_eq!(resolve_book_limit(Some(1)).unwrap(), 1);
        assert_eq!(resolve_book_limit(Some(2)).unwrap(), 2);
        assert_eq!(resolve_book_limit(Some(100)).unwrap(), 100);

        for bad in [0, 101, 500] {
            let err = resolve_book_limit(Some(bad)).unwrap_err();
            assert_eq!(err.field, "limit");
        }
    }
}
