//! Loan and loan-history domain models.
//!
//! A book is Available when no `Loan` row references it and Borrowed when
//! exactly one does. Returning converts the `Loan` into a `LoanHistory` row.
//!
//! # Invariants
//! - At most one active `Loan` exists per book (unique `book_id`).
//! - `LoanHistory` rows are immutable once created and always carry a
//!   `return_date` when produced by the return path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Active loan: a book currently checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub borrower_name: String,
    pub borrow_date: NaiveDate,
}

/// Closed loan record appended when a book is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanHistory {
    pub id: i64,
    pub book_id: i64,
    pub borrower_name: String,
    pub borrow_date: NaiveDate,
    /// Nullable in storage; always set for rows created by the return path.
    pub return_date: Option<NaiveDate>,
}
