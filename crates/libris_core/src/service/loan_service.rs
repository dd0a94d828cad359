//! Borrow/return use-case service.
//!
//! The one state machine in this core: a book is Available when no loan row
//! references it and Borrowed when exactly one does.
//! `Available --borrow--> Borrowed --return--> Available`; no renew, reserve
//! or overdue transitions exist.
//!
//! # Invariants
//! - A borrower holds at most `MAX_ACTIVE_LOANS` active loans. This is a
//!   read-then-write check with a tolerated race window under concurrency;
//!   the per-book UNIQUE constraint remains the authoritative conflict guard.
//! - Returning matches on both book and borrower, rejecting impersonated
//!   returns.

use crate::error::{DomainError, DomainResult};
use crate::model::loan::{Loan, LoanHistory};
use crate::model::validate::{check_non_blank, today};
use crate::repo::loan_repo::LoanRepository;
use log::info;

/// Maximum number of concurrently active loans one borrower may hold.
pub const MAX_ACTIVE_LOANS: u32 = 5;

/// Loan service facade over repository implementations.
pub struct LoanService<R: LoanRepository> {
    repo: R,
}

impl<R: LoanRepository> LoanService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows one book for one borrower, transitioning it to Borrowed.
    ///
    /// # Errors
    /// - `Validation` when `borrower_name` is blank.
    /// - `NotFound` when the book does not exist.
    /// - `Conflict` when the book already carries an active loan.
    /// - `LimitExceeded` when the borrower already holds the cap.
    pub fn borrow_book(&self, book_id: i64, borrower_name: &str) -> DomainResult<Loan> {
        check_non_blank("borrower_name", borrower_name)?;

        if !self.repo.book_exists(book_id)? {
            return Err(DomainError::NotFound("book not found".to_string()));
        }
        if self.repo.active_loan_for_book(book_id)?.is_some() {
            return Err(DomainError::Conflict(
                "book is already borrowed".to_string(),
            ));
        }
        if self.repo.active_loan_count(borrower_name)? >= MAX_ACTIVE_LOANS {
            return Err(DomainError::LimitExceeded(format!(
                "borrower cannot borrow more than {MAX_ACTIVE_LOANS} books"
            )));
        }

        let loan = self.repo.insert_loan(book_id, borrower_name, today())?;
        info!(
            "event=borrow_book module=loan status=ok book_id={} loan_id={}",
            loan.book_id, loan.id
        );
        Ok(loan)
    }

    /// Returns one book, transitioning it back to Available.
    ///
    /// The active loan is converted into a history row carrying
    /// `return_date = today` in a single transaction.
    ///
    /// # Errors
    /// - `NotFound` when no loan matches both the book and the borrower.
    pub fn return_book(&mut self, book_id: i64, borrower_name: &str) -> DomainResult<LoanHistory> {
        let record = self.repo.close_loan(book_id, borrower_name, today())?;
        info!(
            "event=return_book module=loan status=ok book_id={} history_id={}",
            record.book_id, record.id
        );
        Ok(record)
    }

    /// Lists the full borrow history of one book, oldest first.
    ///
    /// # Errors
    /// - `NotFound` when the book does not exist.
    pub fn book_history(&self, book_id: i64) -> DomainResult<Vec<LoanHistory>> {
        if !self.repo.book_exists(book_id)? {
            return Err(DomainError::NotFound("book not found".to_string()));
        }
        self.repo.history_for_book(book_id)
    }
}
