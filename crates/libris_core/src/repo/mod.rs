//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Constraint violations raised by SQLite are translated into domain
//!   classifications (`Conflict`, `Reference`); raw storage errors never
//!   reach callers for constraint failures.
//! - Repositories refuse connections without fully applied migrations.

use crate::db::{migrations::latest_version, DbError};
use crate::error::{DomainError, DomainResult};
use rusqlite::Connection;

pub mod catalog_repo;
pub mod loan_repo;

/// Translates an insert failure into its domain classification.
///
/// The storage constraint is the authoritative guard under concurrency: two
/// requests can both pass a pre-read probe, and only one insert survives.
/// Used for tables carrying a foreign key (books, loans).
pub(crate) fn classify_insert_error(
    err: rusqlite::Error,
    on_unique: &str,
    on_foreign_key: &str,
) -> DomainError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return DomainError::Conflict(on_unique.to_string());
        }
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
            return DomainError::Reference(on_foreign_key.to_string());
        }
    }
    DomainError::Db(DbError::Sqlite(err))
}

/// Translates an insert failure for tables whose only constraint is a
/// natural-key UNIQUE (authors, genres, publishers).
pub(crate) fn classify_unique_violation(err: rusqlite::Error, on_unique: &str) -> DomainError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return DomainError::Conflict(on_unique.to_string());
        }
    }
    DomainError::Db(DbError::Sqlite(err))
}

/// Verifies migrations ran and the given tables exist on this connection.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> DomainResult<()> {
    let version = crate::db::migrations::current_user_version(conn)?;
    if version == 0 {
        return Err(DomainError::Db(DbError::UninitializedConnection {
            expected_version: latest_version(),
        }));
    }

    for table in required_tables {
        if !table_exists(conn, table)? {
            return Err(DomainError::Db(DbError::MissingTable(table)));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DomainResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
