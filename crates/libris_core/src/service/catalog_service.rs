//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide create/read entry points for authors, books, genres and
//!   publishers.
//! - Run field validation and natural-key pre-checks before every insert.
//!
//! # Invariants
//! - Validation failures surface before any storage mutation.
//! - Uniqueness pre-checks are advisory; repository inserts reclassify a
//!   racing constraint violation into the same `Conflict`.

use crate::error::{DomainError, DomainResult};
use crate::model::author::{Author, NewAuthor};
use crate::model::book::{Book, BookListQuery, NewBook};
use crate::model::genre::{Genre, NewGenre};
use crate::model::publisher::{NewPublisher, Publisher};
use crate::model::validate::today;
use crate::repo::catalog_repo::CatalogRepository;
use log::info;

/// Catalog service facade over repository implementations.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one author after validating fields and name uniqueness.
    pub fn create_author(&self, input: NewAuthor) -> DomainResult<Author> {
        input.validate(today())?;
        if self.repo.author_name_taken(&input.name)? {
            return Err(DomainError::Conflict(
                "author name must be unique".to_string(),
            ));
        }

        let author = self.repo.insert_author(&input)?;
        info!(
            "event=create_author module=catalog status=ok author_id={}",
            author.id
        );
        Ok(author)
    }

    /// Gets one author by id.
    pub fn get_author(&self, id: i64) -> DomainResult<Option<Author>> {
        self.repo.get_author(id)
    }

    /// Creates one genre after validating fields and name uniqueness.
    pub fn create_genre(&self, input: NewGenre) -> DomainResult<Genre> {
        input.validate()?;
        if self.repo.genre_name_taken(&input.name)? {
            return Err(DomainError::Conflict(
                "genre name must be unique".to_string(),
            ));
        }

        let genre = self.repo.insert_genre(&input)?;
        info!(
            "event=create_genre module=catalog status=ok genre_id={}",
            genre.id
        );
        Ok(genre)
    }

    /// Lists all genres.
    pub fn list_genres(&self) -> DomainResult<Vec<Genre>> {
        self.repo.list_genres()
    }

    /// Creates one publisher after validating fields and name uniqueness.
    pub fn create_publisher(&self, input: NewPublisher) -> DomainResult<Publisher> {
        input.validate(today())?;
        if self.repo.publisher_name_taken(&input.name)? {
            return Err(DomainError::Conflict(
                "publisher name must be unique".to_string(),
            ));
        }

        let publisher = self.repo.insert_publisher(&input)?;
        info!(
            "event=create_publisher module=catalog status=ok publisher_id={}",
            publisher.id
        );
        Ok(publisher)
    }

    /// Lists all publishers.
    pub fn list_publishers(&self) -> DomainResult<Vec<Publisher>> {
        self.repo.list_publishers()
    }

    /// Creates one book after validating fields, ISBN uniqueness and the
    /// author reference.
    pub fn create_book(&self, input: NewBook) -> DomainResult<Book> {
        input.validate(today())?;
        if self.repo.isbn_taken(&input.isbn)? {
            return Err(DomainError::Conflict("ISBN already exists".to_string()));
        }
        if !self.repo.author_exists(input.author_id)? {
            return Err(DomainError::Reference(
                "author does not exist".to_string(),
            ));
        }

        let book = self.repo.insert_book(&input)?;
        info!(
            "event=create_book module=catalog status=ok book_id={} author_id={}",
            book.id, book.author_id
        );
        Ok(book)
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: i64) -> DomainResult<Option<Book>> {
        self.repo.get_book(id)
    }

    /// Lists books with whitelisted sorting and normalized pagination.
    pub fn list_books(&self, query: &BookListQuery) -> DomainResult<Vec<Book>> {
        self.repo.list_books(query)
    }

    /// Lists the books of one author, requiring the author to exist.
    pub fn books_by_author(&self, author_id: i64) -> DomainResult<Vec<Book>> {
        if !self.repo.author_exists(author_id)? {
            return Err(DomainError::NotFound("author not found".to_string()));
        }
        self.repo.books_by_author(author_id)
    }
}
