//! Query result and load report structs.
//!
//! All structs derive `Serialize` so the CLI can print them as JSON.

use serde::Serialize;

/// One book/price pairing with every parent resolved, for the "All Books" table.
///
/// A book with several price rows appears once per price.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookListing {
    pub book_id: i64,
    pub title: Option<String>,
    pub author: String,
    pub category: String,
    pub publisher: String,
    pub publication_year: Option<i32>,
    /// Starting price in dollars
    pub price: f64,
    /// Publish date in `YYYY-MM-DD` format
    pub publish_date: Option<String>,
}

/// A (title, price, category) row for the category search.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookPrice {
    pub title: Option<String>,
    pub price: f64,
    pub category: String,
}

/// A category search row that also carries the publication year,
/// used by the price-ceiling search and its scatter plot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PricedBook {
    pub title: Option<String>,
    pub price: f64,
    pub category: String,
    pub publication_year: Option<i32>,
}

/// Headline numbers for the statistics view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryStatistics {
    /// Distinct books that have at least one price
    pub total_books: i64,
    /// Mean of all joined price rows, rounded to cents; 0 when there are none
    pub average_price: f64,
    /// Distinct categories among those books
    pub total_categories: i64,
}

/// The newest book of a category.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentBook {
    pub title: Option<String>,
    pub publication_year: Option<i32>,
}

/// Counters from one catalog load.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LoadReport {
    /// Data rows in the CSV, accepted or not
    pub rows_read: usize,
    /// Rows rejected for a missing column or bad price
    pub rows_skipped: usize,
    pub authors_inserted: usize,
    pub categories_inserted: usize,
    pub publishers_inserted: usize,
    pub books_inserted: usize,
    pub prices_inserted: usize,
    /// Tables whose insert batch was rolled back, with the cause
    pub failed_batches: Vec<FailedBatch>,
}

/// An insert batch that failed and was rolled back.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedBatch {
    pub table: String,
    pub error: String,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rows_skipped == 0 && self.failed_batches.is_empty()
    }
}
