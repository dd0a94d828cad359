//! Loan repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the borrow/return lifecycle over `loans` and `loan_history`.
//! - Own the transactional close path (history insert + loan delete).
//!
//! # Invariants
//! - `close_loan` inserts the history row and deletes the loan row in one
//!   transaction; a crash between the two cannot leave a book stuck
//!   Borrowed or produce a duplicate/missing history record.
//! - The UNIQUE constraint on `loans.book_id` is the authoritative
//!   one-loan-per-book guard; its violation maps to `Conflict`.

use crate::error::{DomainError, DomainResult};
use crate::model::loan::{Loan, LoanHistory};
use crate::repo::{classify_insert_error, ensure_connection_ready};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, TransactionBehavior};

const RETURN_MISMATCH_MESSAGE: &str = "this borrower did not borrow this book";

/// Repository interface for borrow/return persistence.
pub trait LoanRepository {
    /// Returns whether the referenced book exists in the catalog.
    fn book_exists(&self, book_id: i64) -> DomainResult<bool>;
    /// Returns the active loan for a book, if any.
    fn active_loan_for_book(&self, book_id: i64) -> DomainResult<Option<Loan>>;
    /// Counts active loans held by one borrower.
    fn active_loan_count(&self, borrower_name: &str) -> DomainResult<u32>;
    /// Creates an active loan row.
    fn insert_loan(
        &self,
        book_id: i64,
        borrower_name: &str,
        borrow_date: NaiveDate,
    ) -> DomainResult<Loan>;
    /// Atomically converts the matching loan into a history row.
    fn close_loan(
        &mut self,
        book_id: i64,
        borrower_name: &str,
        return_date: NaiveDate,
    ) -> DomainResult<LoanHistory>;
    /// Lists all history rows for a book, oldest first.
    fn history_for_book(&self, book_id: i64) -> DomainResult<Vec<LoanHistory>>;
}

/// SQLite-backed loan repository.
pub struct SqliteLoanRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteLoanRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> DomainResult<Self> {
        ensure_connection_ready(conn, &["books", "loans", "loan_history"])?;
        Ok(Self { conn })
    }
}

impl LoanRepository for SqliteLoanRepository<'_> {
    fn book_exists(&self, book_id: i64) -> DomainResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1);",
            [book_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn active_loan_for_book(&self, book_id: i64) -> DomainResult<Option<Loan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, book_id, borrower_name, borrow_date
             FROM loans
             WHERE book_id = ?1;",
        )?;
        let mut rows = stmt.query([book_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_loan_row(row)?));
        }
        Ok(None)
    }

    fn active_loan_count(&self, borrower_name: &str) -> DomainResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM loans WHERE borrower_name = ?1;",
            [borrower_name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn insert_loan(
        &self,
        book_id: i64,
        borrower_name: &str,
        borrow_date: NaiveDate,
    ) -> DomainResult<Loan> {
        self.conn
            .execute(
                "INSERT INTO loans (book_id, borrower_name, borrow_date)
                 VALUES (?1, ?2, ?3);",
                params![book_id, borrower_name, borrow_date],
            )
            .map_err(|err| {
                classify_insert_error(err, "book is already borrowed", "book does not exist")
            })?;

        Ok(Loan {
            id: self.conn.last_insert_rowid(),
            book_id,
            borrower_name: borrower_name.to_string(),
            borrow_date,
        })
    }

    fn close_loan(
        &mut self,
        book_id: i64,
        borrower_name: &str,
        return_date: NaiveDate,
    ) -> DomainResult<LoanHistory> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Matching on both book and borrower rejects impersonated returns.
        let loan = {
            let mut stmt = tx.prepare(
                "SELECT id, book_id, borrower_name, borrow_date
                 FROM loans
                 WHERE book_id = ?1 AND borrower_name = ?2;",
            )?;
            let mut rows = stmt.query(params![book_id, borrower_name])?;
            match rows.next()? {
                Some(row) => parse_loan_row(row)?,
                None => return Err(DomainError::NotFound(RETURN_MISMATCH_MESSAGE.to_string())),
            }
        };

        tx.execute(
            "INSERT INTO loan_history (book_id, borrower_name, borrow_date, return_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![loan.book_id, loan.borrower_name, loan.borrow_date, return_date],
        )?;
        let history_id = tx.last_insert_rowid();

        tx.execute("DELETE FROM loans WHERE id = ?1;", [loan.id])?;
        tx.commit()?;

        Ok(LoanHistory {
            id: history_id,
            book_id: loan.book_id,
            borrower_name: loan.borrower_name,
            borrow_date: loan.borrow_date,
            return_date: Some(return_date),
        })
    }

    fn history_for_book(&self, book_id: i64) -> DomainResult<Vec<LoanHistory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, book_id, borrower_name, borrow_date, return_date
             FROM loan_history
             WHERE book_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([book_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(LoanHistory {
                id: row.get("id")?,
                book_id: row.get("book_id")?,
                borrower_name: row.get("borrower_name")?,
                borrow_date: row.get("borrow_date")?,
                return_date: row.get("return_date")?,
            });
        }
        Ok(records)
    }
}

fn parse_loan_row(row: &Row<'_>) -> DomainResult<Loan> {
    Ok(Loan {
        id: row.get("id")?,
        book_id: row.get("book_id")?,
        borrower_name: row.get("borrower_name")?,
        borrow_date: row.get("borrow_date")?,
    })
}
