//! Dashboard-facing query wrappers.
//!
//! Every wrapper catches the query error, logs it and hands back an empty
//! result together with the message shown to the user, so a failing query
//! never takes the page down.

use bks_db::models::{BookListing, BookPrice, PricedBook, RecentBook, SummaryStatistics};
use bks_db::url::ConnectionString;
use bks_db::Database;

/// A query result plus the user-facing error, if the query failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fetched<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T: Default> Fetched<T> {
    fn recover(what: &str, result: anyhow::Result<T>) -> Self {
        match result {
            Ok(data) => Self { data, error: None },
            Err(e) => {
                let message = format!("Error fetching {}: {:#}", what, e);
                log::error!("{}", message);
                Self {
                    data: T::default(),
                    error: Some(message),
                }
            }
        }
    }
}

pub fn books(db: &Database) -> Fetched<Vec<BookListing>> {
    Fetched::recover("books", db.query_books())
}

pub fn books_by_category(db: &Database, category: &str) -> Fetched<Vec<BookPrice>> {
    Fetched::recover("books by category", db.query_books_by_category(category))
}

pub fn books_by_category_and_price(
    db: &Database,
    category: &str,
    max_price: f64,
) -> Fetched<Vec<PricedBook>> {
    Fetched::recover(
        "books by category and price",
        db.query_books_by_category_and_price(category, max_price),
    )
}

pub fn summary_statistics(db: &Database) -> Fetched<Option<SummaryStatistics>> {
    Fetched::recover(
        "summary statistics",
        db.query_summary_statistics().map(Some),
    )
}

pub fn most_recent_book(db: &Database, category: &str) -> Fetched<Option<RecentBook>> {
    Fetched::recover("most recent book", db.query_most_recent_book(category))
}

/// Sidebar text describing where `DATABASE_URL` points.
pub fn connection_info() -> Result<String, String> {
    ConnectionString::from_env()
        .map(|source| source.describe())
        .map_err(|e| e.to_string())
}

/// Open the database named by `DATABASE_URL`, as the Connect button does.
pub fn connect() -> Result<Database, String> {
    Database::from_env().map_err(|e| {
        let message = format!("Failed to connect to database: {:#}", e);
        log::error!("{}", message);
        message
    })
}
