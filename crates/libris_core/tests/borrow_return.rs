use chrono::{Local, NaiveDate};
use libris_core::db::open_db_in_memory;
use libris_core::{
    CatalogService, DomainError, ErrorKind, LoanService, NewAuthor, NewBook,
    SqliteCatalogRepository, SqliteLoanRepository, MAX_ACTIVE_LOANS,
};
use rusqlite::Connection;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Creates one author and `count` books, returning the book ids.
fn seed_books(conn: &Connection, count: usize) -> Vec<i64> {
    let service = CatalogService::new(SqliteCatalogRepository::try_new(conn).unwrap());
    let author = service
        .create_author(NewAuthor {
            name: "Hryhorii Skovoroda".to_string(),
            birth_date: day(1722, 12, 3),
        })
        .unwrap();

    (0..count)
        .map(|index| {
            service
                .create_book(NewBook {
                    title: format!("Fable {index}"),
                    isbn: format!("{:010}", index + 1),
                    publish_date: day(1774, 1, 1),
                    author_id: author.id,
                })
                .unwrap()
                .id
        })
        .collect()
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn borrow_then_return_roundtrip_leaves_single_history_row() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];
    let today = Local::now().date_naive();

    {
        let mut service =
            LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());

        let loan = service.borrow_book(book_id, "Alice").unwrap();
        assert_eq!(loan.book_id, book_id);
        assert_eq!(loan.borrower_name, "Alice");
        assert_eq!(loan.borrow_date, today);

        let record = service.return_book(book_id, "Alice").unwrap();
        assert_eq!(record.book_id, book_id);
        assert_eq!(record.borrow_date, loan.borrow_date);
        assert_eq!(record.return_date, Some(today));

        let history = service.book_history(book_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);

        // Book is Available again; another borrower may take it.
        service.borrow_book(book_id, "Bob").unwrap();
    }

    assert_eq!(count_rows(&conn, "loans"), 1);
    assert_eq!(count_rows(&conn, "loan_history"), 1);
}

#[test]
fn borrowing_an_already_borrowed_book_conflicts_and_keeps_the_loan() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];

    {
        let service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
        service.borrow_book(book_id, "Alice").unwrap();

        let err = service.borrow_book(book_id, "Bob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    let holder: String = conn
        .query_row(
            "SELECT borrower_name FROM loans WHERE book_id = ?1;",
            [book_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(holder, "Alice");
}

#[test]
fn borrow_limit_allows_fifth_and_rejects_sixth() {
    let mut conn = open_db_in_memory().unwrap();
    let book_ids = seed_books(&conn, (MAX_ACTIVE_LOANS + 1) as usize);

    let service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    for book_id in &book_ids[..(MAX_ACTIVE_LOANS - 1) as usize] {
        service.borrow_book(*book_id, "Alice").unwrap();
    }

    // Fifth succeeds at exactly the cap boundary.
    service
        .borrow_book(book_ids[(MAX_ACTIVE_LOANS - 1) as usize], "Alice")
        .unwrap();

    let err = service
        .borrow_book(book_ids[MAX_ACTIVE_LOANS as usize], "Alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);

    // The cap is per borrower, not global.
    service
        .borrow_book(book_ids[MAX_ACTIVE_LOANS as usize], "Bob")
        .unwrap();
}

#[test]
fn returning_with_wrong_borrower_is_not_found_and_mutates_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];

    {
        let mut service =
            LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
        service.borrow_book(book_id, "Alice").unwrap();

        let err = service.return_book(book_id, "Bob").unwrap_err();
        match err {
            DomainError::NotFound(message) => {
                assert!(message.contains("did not borrow"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(count_rows(&conn, "loans"), 1);
    assert_eq!(count_rows(&conn, "loan_history"), 0);
}

#[test]
fn returning_a_book_nobody_borrowed_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];

    let mut service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    let err = service.return_book(book_id, "Alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn borrowing_a_nonexistent_book_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_books(&conn, 1);

    let service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    let err = service.borrow_book(999, "Alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn blank_borrower_name_fails_validation_before_any_lookup() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];

    let service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    let err = service.borrow_book(book_id, "   ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn history_accumulates_across_repeated_loans() {
    let mut conn = open_db_in_memory().unwrap();
    let book_id = seed_books(&conn, 1)[0];

    let mut service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    for borrower in ["Alice", "Bob", "Alice"] {
        service.borrow_book(book_id, borrower).unwrap();
        service.return_book(book_id, borrower).unwrap();
    }

    let history = service.book_history(book_id).unwrap();
    assert_eq!(history.len(), 3);
    let borrowers: Vec<&str> = history
        .iter()
        .map(|record| record.borrower_name.as_str())
        .collect();
    assert_eq!(borrowers, ["Alice", "Bob", "Alice"]);
    assert!(history.iter().all(|record| record.return_date.is_some()));
}

#[test]
fn history_for_unknown_book_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_books(&conn, 1);

    let service = LoanService::new(SqliteLoanRepository::try_new(&mut conn).unwrap());
    let err = service.book_history(999).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
