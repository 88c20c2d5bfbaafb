//! Typed query methods behind the dashboard views.
//!
//! All queries return typed structs from [`crate::models`].
//!
//! # Category Search Convention
//!
//! Category filters are case-insensitive substring matches. Runs of
//! whitespace in the search term collapse to a single space before
//! matching, so `"Science  Fiction"` finds `"science fiction"`. Both sides
//! are lowercased in Rust (the `fold` SQL function registered on every
//! connection), so non-ASCII names like `"Ficción"` match `"FICCIÓN"`.

use crate::models::{BookListing, BookPrice, PricedBook, RecentBook, SummaryStatistics};
use crate::Database;
use bks_catalog::sanitize::category_like_pattern;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Every book joined with its author, category, publisher and prices.
    ///
    /// Books missing a parent or a price are left out (inner joins). Ordered
    /// by book id.
    pub fn query_books(&self) -> anyhow::Result<Vec<BookListing>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT b.book_id, b.title, a.author_name, c.category_name, p.publisher_name,
                    b.publication_year, pr.price, pr.publish_date
             FROM books b
             JOIN authors a ON b.author_id = a.author_id
             JOIN categories c ON b.category_id = c.category_id
             JOIN publishers p ON b.publisher_id = p.publisher_id
             JOIN prices pr ON b.book_id = pr.book_id
             ORDER BY b.book_id, pr.price_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(BookListing {
                    book_id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    category: row.get(3)?,
                    publisher: row.get(4)?,
                    publication_year: row.get(5)?,
                    price: row.get(6)?,
                    publish_date: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_books returned {} records", rows.len());
        Ok(rows)
    }

    /// Books whose category matches `category`, cheapest first.
    pub fn query_books_by_category(&self, category: &str) -> anyhow::Result<Vec<BookPrice>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT b.title, pr.price, c.category_name
             FROM books b
             JOIN categories c ON b.category_id = c.category_id
             JOIN prices pr ON b.book_id = pr.book_id
             WHERE fold(c.category_name) LIKE ?1 ESCAPE '\\'
             ORDER BY pr.price, b.book_id",
        )?;
        let rows = stmt
            .query_map(params![category_like_pattern(category)], |row| {
                Ok(BookPrice {
                    title: row.get(0)?,
                    price: row.get(1)?,
                    category: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_books_by_category('{}') returned {} records",
            category,
            rows.len()
        );
        Ok(rows)
    }

    /// Books whose category matches `category` priced at or below
    /// `max_price`, cheapest first.
    pub fn query_books_by_category_and_price(
        &self,
        category: &str,
        max_price: f64,
    ) -> anyhow::Result<Vec<PricedBook>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT b.title, pr.price, c.category_name, b.publication_year
             FROM books b
             JOIN categories c ON b.category_id = c.category_id
             JOIN prices pr ON b.book_id = pr.book_id
             WHERE fold(c.category_name) LIKE ?1 ESCAPE '\\' AND pr.price <= ?2
             ORDER BY pr.price, b.book_id",
        )?;
        let rows = stmt
            .query_map(params![category_like_pattern(category), max_price], |row| {
                Ok(PricedBook {
                    title: row.get(0)?,
                    price: row.get(1)?,
                    category: row.get(2)?,
                    publication_year: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_books_by_category_and_price('{}', {}) returned {} records",
            category,
            max_price,
            rows.len()
        );
        Ok(rows)
    }

    /// Book count, average price and category count over priced books.
    ///
    /// The average is rounded to cents and is 0 when there are no prices.
    pub fn query_summary_statistics(&self) -> anyhow::Result<SummaryStatistics> {
        let conn = self.conn.borrow();
        let stats = conn.query_row(
            "SELECT COUNT(DISTINCT b.book_id), AVG(pr.price), COUNT(DISTINCT c.category_id)
             FROM books b
             JOIN prices pr ON b.book_id = pr.book_id
             JOIN categories c ON b.category_id = c.category_id",
            [],
            |row| {
                let average: Option<f64> = row.get(1)?;
                Ok(SummaryStatistics {
                    total_books: row.get(0)?,
                    average_price: average.map(round_cents).unwrap_or(0.0),
                    total_categories: row.get(2)?,
                })
            },
        )?;
        log::info!("query: query_summary_statistics returned {:?}", stats);
        Ok(stats)
    }

    /// The book with the latest publication year among matching categories.
    ///
    /// Books without a year sort last. Returns `None` when nothing matches.
    pub fn query_most_recent_book(&self, category: &str) -> anyhow::Result<Option<RecentBook>> {
        let conn = self.conn.borrow();
        let book = conn
            .query_row(
                "SELECT b.title, b.publication_year
                 FROM books b
                 JOIN categories c ON b.category_id = c.category_id
                 WHERE fold(c.category_name) LIKE ?1 ESCAPE '\\'
                 ORDER BY b.publication_year IS NULL, b.publication_year DESC, b.book_id
                 LIMIT 1",
                params![category_like_pattern(category)],
                |row| {
                    Ok(RecentBook {
                        title: row.get(0)?,
                        publication_year: row.get(1)?,
                    })
                },
            )
            .optional()?;
        log::info!(
            "query: query_most_recent_book('{}') found {}",
            category,
            if book.is_some() { "a book" } else { "nothing" }
        );
        Ok(book)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        let csv = "\
Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)
Dune,Frank Herbert,Desert planet,Science Fiction,Chilton,9.99,1965
Children of Dune,Frank Herbert,Sequel,Science Fiction,Putnam,7.50,1976
Neuromancer,William Gibson,Cyberpunk,Science  Fiction,Ace,12.00,1984
Emma,Jane Austen,Matchmaking,Classics,Penguin,4.50,1815
Persuasion,Jane Austen,Second chances,Classics,Penguin,3.25,
100% Cotton,Ann Other,Fabric guide,Crafts_Sewing,Thread Press,20.00,2010
";
        db.load_catalog(csv.as_bytes()).unwrap();
        db
    }

    #[test]
    fn round_cents_rounds_half_up() {
        assert_eq!(round_cents(7.125), 7.13);
        assert_eq!(round_cents(3.0), 3.0);
    }

    #[test]
    fn query_books_joins_everything_in_id_order() {
        let db = sample_db();
        let books = db.query_books().unwrap();
        assert_eq!(books.len(), 6);
        assert!(books.windows(2).all(|w| w[0].book_id < w[1].book_id));

        let dune = &books[0];
        assert_eq!(dune.title.as_deref(), Some("Dune"));
        assert_eq!(dune.author, "Frank Herbert");
        assert_eq!(dune.category, "Science Fiction");
        assert_eq!(dune.publisher, "Chilton");
        assert_eq!(dune.publication_year, Some(1965));
        assert_eq!(dune.publish_date.as_deref(), Some("1965-01-01"));
    }

    #[test]
    fn query_books_empty_database() {
        let db = Database::new().unwrap();
        assert!(db.query_books().unwrap().is_empty());
    }

    #[test]
    fn category_search_is_case_insensitive_and_whitespace_tolerant() {
        let db = sample_db();
        let books = db.query_books_by_category("Science  Fiction").unwrap();
        // "Science Fiction" matches; the stored "Science  Fiction" (two spaces) does not.
        assert_eq!(books.len(), 2);

        let lower = db.query_books_by_category("  science fiction ").unwrap();
        assert_eq!(lower, books);
    }

    #[test]
    fn category_search_folds_non_ascii_case() {
        let db = Database::new().unwrap();
        db.load_catalog(
            "Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)\n\
             Rayuela,Julio Cortázar,Novela,Ficción,Sudamericana,11.00,1963\n\
             Ficciones,Jorge Luis Borges,Cuentos,Ficción,Sur,8.00,1944\n"
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(db.query_books_by_category("Ficción").unwrap().len(), 2);
        assert_eq!(db.query_books_by_category("FICCIÓN").unwrap().len(), 2);
        assert_eq!(
            db.query_books_by_category_and_price("fICCIóN", 10.0).unwrap().len(),
            1
        );
        let recent = db.query_most_recent_book("FICCIÓN").unwrap().unwrap();
        assert_eq!(recent.title.as_deref(), Some("Rayuela"));
    }

    #[test]
    fn category_search_matches_substrings_ordered_by_price() {
        let db = sample_db();
        let books = db.query_books_by_category("class").unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["Persuasion", "Emma"]);
        assert!(books.iter().all(|b| b.category == "Classics"));
    }

    #[test]
    fn category_search_treats_wildcards_literally() {
        let db = sample_db();
        assert_eq!(db.query_books_by_category("Crafts_Sewing").unwrap().len(), 1);
        assert!(db.query_books_by_category("Crafts_X").unwrap().is_empty());
        assert!(db.query_books_by_category("%").unwrap().is_empty());
    }

    #[test]
    fn category_search_nonexistent_category_is_empty() {
        let db = sample_db();
        assert!(db.query_books_by_category("Cookbooks").unwrap().is_empty());
    }

    #[test]
    fn price_search_applies_ceiling() {
        let db = sample_db();
        let books = db.query_books_by_category_and_price("science fiction", 9.99).unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["Children of Dune", "Dune"]);
        assert_eq!(books[0].publication_year, Some(1976));
    }

    #[test]
    fn price_search_nonexistent_category_is_empty() {
        let db = sample_db();
        let books = db.query_books_by_category_and_price("Cookbooks", 100.0).unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn summary_statistics_average_is_mean_of_prices() {
        let db = sample_db();
        let stats = db.query_summary_statistics().unwrap();
        assert_eq!(stats.total_books, 6);
        assert_eq!(stats.total_categories, 4);

        let expected = (9.99 + 7.50 + 12.00 + 4.50 + 3.25 + 20.00) / 6.0;
        assert!((stats.average_price - round_cents(expected)).abs() < 1e-9);
    }

    #[test]
    fn summary_statistics_ignore_unpriced_books() {
        let db = sample_db();
        db.conn
            .borrow()
            .execute(
                "INSERT INTO books (title, category_id) VALUES ('Unpriced', 1)",
                [],
            )
            .unwrap();
        let stats = db.query_summary_statistics().unwrap();
        assert_eq!(stats.total_books, 6);
    }

    #[test]
    fn summary_statistics_empty_database() {
        let db = Database::new().unwrap();
        let stats = db.query_summary_statistics().unwrap();
        assert_eq!(
            stats,
            SummaryStatistics {
                total_books: 0,
                average_price: 0.0,
                total_categories: 0,
            }
        );
    }

    #[test]
    fn most_recent_book_picks_latest_year() {
        let db = sample_db();
        let book = db.query_most_recent_book("SCIENCE FICTION").unwrap().unwrap();
        assert_eq!(book.title.as_deref(), Some("Children of Dune"));
        assert_eq!(book.publication_year, Some(1976));
    }

    #[test]
    fn most_recent_book_sorts_missing_years_last() {
        let db = sample_db();
        let book = db.query_most_recent_book("classics").unwrap().unwrap();
        assert_eq!(book.title.as_deref(), Some("Emma"));
    }

    #[test]
    fn most_recent_book_nonexistent_category() {
        let db = sample_db();
        assert!(db.query_most_recent_book("Cookbooks").unwrap().is_none());
    }

    #[test]
    fn queries_fail_without_schema() {
        let db = Database::connect(":memory:").unwrap();
        assert!(db.query_books().is_err());
        assert!(db.query_summary_statistics().is_err());
    }

    #[test]
    fn full_load_and_query_workflow() {
        let db = Database::new().unwrap();
        let csv = "\
Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)
Gardening 101,Green Thumb,Basics,Home & Garden,Acre,15.00,2019
Short Row,Nobody
Gardening 202,Green Thumb,More,Home & Garden,Acre,25.00,2021
";
        let report = db.load_catalog(csv.as_bytes()).unwrap();
        assert_eq!(report.rows_skipped, 1);

        let found = db.query_books_by_category("home  &  garden").unwrap();
        assert_eq!(found.len(), 2);

        let cheap = db.query_books_by_category_and_price("garden", 20.0).unwrap();
        assert_eq!(cheap.len(), 1);

        let recent = db.query_most_recent_book("garden").unwrap().unwrap();
        assert_eq!(recent.title.as_deref(), Some("Gardening 202"));

        let stats = db.query_summary_statistics().unwrap();
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.average_price, 20.0);
    }
}
