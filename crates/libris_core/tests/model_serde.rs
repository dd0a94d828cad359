use chrono::NaiveDate;
use libris_core::{Author, Book, BookSortKey, LoanHistory, NewBook, SortOrder};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn book_roundtrips_through_json_with_iso_dates() {
    let book = Book {
        id: 7,
        title: "Kobzar".to_string(),
        isbn: "9780306406157".to_string(),
        publish_date: day(1840, 4, 18),
        author_id: 3,
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["publish_date"], "1840-04-18");
    assert_eq!(json["isbn"], "9780306406157");

    let back: Book = serde_json::from_value(json).unwrap();
    assert_eq!(back, book);
}

#[test]
fn creation_input_deserializes_from_boundary_shape() {
    let input: NewBook = serde_json::from_str(
        r#"{
            "title": "Zakhar Berkut",
            "isbn": "0306406152",
            "publish_date": "1883-01-01",
            "author_id": 1
        }"#,
    )
    .unwrap();

    assert_eq!(input.title, "Zakhar Berkut");
    assert_eq!(input.publish_date, day(1883, 1, 1));
}

#[test]
fn author_roundtrips_through_json() {
    let author = Author {
        id: 1,
        name: "Lesya Ukrainka".to_string(),
        birth_date: day(1871, 2, 25),
    };

    let json = serde_json::to_string(&author).unwrap();
    let back: Author = serde_json::from_str(&json).unwrap();
    assert_eq!(back, author);
}

#[test]
fn loan_history_serializes_nullable_return_date() {
    let record = LoanHistory {
        id: 2,
        book_id: 7,
        borrower_name: "Alice".to_string(),
        borrow_date: day(2024, 5, 1),
        return_date: None,
    };

    let json = serde_json::to_value(&record).unwrap();
    assert!(json["return_date"].is_null());

    let closed = LoanHistory {
        return_date: Some(day(2024, 5, 20)),
        ..record
    };
    let json = serde_json::to_value(&closed).unwrap();
    assert_eq!(json["return_date"], "2024-05-20");
}

#[test]
fn sort_enums_use_snake_case_wire_names() {
    assert_eq!(
        serde_json::to_value(BookSortKey::PublishDate).unwrap(),
        "publish_date"
    );
    assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), "desc");

    let key: BookSortKey = serde_json::from_str("\"title\"").unwrap();
    assert_eq!(key, BookSortKey::Title);
    assert!(serde_json::from_str::<BookSortKey>("\"isbn\"").is_err());
}
