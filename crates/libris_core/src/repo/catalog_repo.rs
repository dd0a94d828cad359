//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read APIs over authors, books, genres and publishers.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Book listings only ever order by whitelisted columns; the sort key and
//!   direction are compiled from enums, never caller strings.
//! - Natural-key probes (`*_taken`) are advisory; the UNIQUE constraints are
//!   the authoritative guard and their violations map to `Conflict`.

use crate::error::DomainResult;
use crate::model::author::{Author, NewAuthor};
use crate::model::book::{resolve_book_limit, Book, BookListQuery, NewBook};
use crate::model::genre::{Genre, NewGenre};
use crate::model::publisher::{NewPublisher, Publisher};
use crate::repo::{classify_insert_error, classify_unique_violation, ensure_connection_ready};
use rusqlite::{params, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT id, title, isbn, publish_date, author_id FROM books";

/// Repository interface for catalog create/read operations.
pub trait CatalogRepository {
    fn insert_author(&self, input: &NewAuthor) -> DomainResult<Author>;
    fn get_author(&self, id: i64) -> DomainResult<Option<Author>>;
    fn author_exists(&self, id: i64) -> DomainResult<bool>;
    fn author_name_taken(&self, name: &str) -> DomainResult<bool>;

    fn insert_genre(&self, input: &NewGenre) -> DomainResult<Genre>;
    fn genre_name_taken(&self, name: &str) -> DomainResult<bool>;
    fn list_genres(&self) -> DomainResult<Vec<Genre>>;

    fn insert_publisher(&self, input: &NewPublisher) -> DomainResult<Publisher>;
    fn publisher_name_taken(&self, name: &str) -> DomainResult<bool>;
    fn list_publishers(&self) -> DomainResult<Vec<Publisher>>;

    fn insert_book(&self, input: &NewBook) -> DomainResult<Book>;
    fn get_book(&self, id: i64) -> DomainResult<Option<Book>>;
    fn isbn_taken(&self, isbn: &str) -> DomainResult<bool>;
    fn list_books(&self, query: &BookListQuery) -> DomainResult<Vec<Book>>;
    fn books_by_author(&self, author_id: i64) -> DomainResult<Vec<Book>>;
}

/// SQLite-backed catalog repository.
#[derive(Debug)]
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> DomainResult<Self> {
        ensure_connection_ready(conn, &["authors", "books", "genres", "publishers"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn insert_author(&self, input: &NewAuthor) -> DomainResult<Author> {
        self.conn
            .execute(
                "INSERT INTO authors (name, birth_date) VALUES (?1, ?2);",
                params![input.name.as_str(), input.birth_date],
            )
            .map_err(|err| classify_unique_violation(err, "author name must be unique"))?;

        Ok(Author {
            id: self.conn.last_insert_rowid(),
            name: input.name.clone(),
            birth_date: input.birth_date,
        })
    }

    fn get_author(&self, id: i64) -> DomainResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, birth_date FROM authors WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Author {
                id: row.get("id")?,
                name: row.get("name")?,
                birth_date: row.get("birth_date")?,
            }));
        }
        Ok(None)
    }

    fn author_exists(&self, id: i64) -> DomainResult<bool> {
        exists(self.conn, "SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?1);", id)
    }

    fn author_name_taken(&self, name: &str) -> DomainResult<bool> {
        let taken: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(taken == 1)
    }

    fn insert_genre(&self, input: &NewGenre) -> DomainResult<Genre> {
        self.conn
            .execute(
                "INSERT INTO genres (name) VALUES (?1);",
                [input.name.as_str()],
            )
            .map_err(|err| classify_unique_violation(err, "genre name must be unique"))?;

        Ok(Genre {
            id: self.conn.last_insert_rowid(),
            name: input.name.clone(),
        })
    }

    fn genre_name_taken(&self, name: &str) -> DomainResult<bool> {
        let taken: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM genres WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(taken == 1)
    }

    fn list_genres(&self) -> DomainResult<Vec<Genre>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM genres ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(Genre {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(genres)
    }

    fn insert_publisher(&self, input: &NewPublisher) -> DomainResult<Publisher> {
        self.conn
            .execute(
                "INSERT INTO publishers (name, established_year) VALUES (?1, ?2);",
                params![input.name.as_str(), input.established_year],
            )
            .map_err(|err| classify_unique_violation(err, "publisher name must be unique"))?;

        Ok(Publisher {
            id: self.conn.last_insert_rowid(),
            name: input.name.clone(),
            established_year: input.established_year,
        })
    }

    fn publisher_name_taken(&self, name: &str) -> DomainResult<bool> {
        let taken: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM publishers WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(taken == 1)
    }

    fn list_publishers(&self) -> DomainResult<Vec<Publisher>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, established_year FROM publishers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut publishers = Vec::new();
        while let Some(row) = rows.next()? {
            publishers.push(Publisher {
                id: row.get("id")?,
                name: row.get("name")?,
                established_year: row.get("established_year")?,
            });
        }
        Ok(publishers)
    }

    fn insert_book(&self, input: &NewBook) -> DomainResult<Book> {
        self.conn
            .execute(
                "INSERT INTO books (title, isbn, publish_date, author_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    input.title.as_str(),
                    input.isbn.as_str(),
                    input.publish_date,
                    input.author_id,
                ],
            )
            .map_err(|err| {
                classify_insert_error(err, "ISBN must be unique", "author does not exist")
            })?;

        Ok(Book {
            id: self.conn.last_insert_rowid(),
            title: input.title.clone(),
            isbn: input.isbn.clone(),
            publish_date: input.publish_date,
            author_id: input.author_id,
        })
    }

    fn get_book(&self, id: i64) -> DomainResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn isbn_taken(&self, isbn: &str) -> DomainResult<bool> {
        let taken: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?1);",
            [isbn],
            |row| row.get(0),
        )?;
        Ok(taken == 1)
    }

    fn list_books(&self, query: &BookListQuery) -> DomainResult<Vec<Book>> {
        // Column and direction come from whitelisted enums; only limit and
        // offset are bound from caller data.
        let sql = format!(
            "{BOOK_SELECT_SQL} ORDER BY {} {}, id ASC LIMIT ?1 OFFSET ?2;",
            query.sort_by.column(),
            query.order.sql(),
        );

        let limit = resolve_book_limit(query.limit)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![i64::from(limit), i64::from(query.offset)])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn books_by_author(&self, author_id: i64) -> DomainResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE author_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([author_id])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> DomainResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        isbn: row.get("isbn")?,
        publish_date: row.get("publish_date")?,
        author_id: row.get("author_id")?,
    })
}

fn exists(conn: &Connection, sql: &str, id: i64) -> DomainResult<bool> {
    let found: i64 = conn.query_row(sql, [id], |row| row.get(0))?;
    Ok(found == 1)
}
