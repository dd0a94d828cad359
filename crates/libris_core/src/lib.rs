//! Core domain logic for the libris library record-keeping service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use error::{DomainError, DomainResult, ErrorKind};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, NewAuthor};
pub use model::book::{
    resolve_book_limit, Book, BookListQuery, BookSortKey, NewBook, SortOrder,
    BOOKS_DEFAULT_LIMIT, BOOKS_LIMIT_MAX,
};
pub use model::genre::{Genre, NewGenre};
pub use model::loan::{Loan, LoanHistory};
pub use model::publisher::{NewPublisher, Publisher};
pub use model::validate::ValidationError;
pub use repo::catalog_repo::{CatalogRepository, SqliteCatalogRepository};
pub use repo::loan_repo::{LoanRepository, SqliteLoanRepository};
pub use service::catalog_service::CatalogService;
pub use service::loan_service::{LoanService, MAX_ACTIVE_LOANS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
