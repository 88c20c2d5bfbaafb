//! CSV catalog loading for populating the bookstore database.
//!
//! The loader reads the whole catalog first (see [`bks_catalog::read_catalog`]),
//! then writes five batches in dependency order:
//!
//! 1. distinct author names
//! 2. distinct category names
//! 3. distinct publisher names
//! 4. books, resolving each parent id by name with a sub-query
//! 5. prices, resolving the book id by title (first match)
//!
//! Every batch is its own transaction. A failing batch is rolled back and
//! recorded in the [`LoadReport`]; the remaining batches still run.
//!
//! # CSV Format
//!
//! Headers (any order): `Authors, Category, Publisher, Title, Description,
//! Price Starting With ($), Publish Date (Year)`

use crate::models::{FailedBatch, LoadReport};
use crate::Database;
use anyhow::Context;
use bks_catalog::{read_catalog, CatalogRecord};
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

impl Database {
    /// Load a catalog CSV from any reader.
    ///
    /// Applies the schema first. A missing header aborts before anything is
    /// inserted; rows with a missing column or bad price are skipped and
    /// logged.
    ///
    /// # Example CSV
    /// ```text
    /// Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)
    /// Dune,Frank Herbert,Desert planet,Science Fiction,Chilton,9.99,1965
    /// ```
    pub fn load_catalog<R: Read>(&self, reader: R) -> anyhow::Result<LoadReport> {
        self.ensure_schema()?;
        let read = read_catalog(reader)?;

        for rejected in &read.rejected {
            log::warn!("loader: Skipping row: {}", rejected);
        }

        let mut report = LoadReport {
            rows_read: read.rows_read(),
            rows_skipped: read.rejected.len(),
            ..LoadReport::default()
        };

        let mut authors = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut publishers = BTreeSet::new();
        for record in &read.records {
            if let Some(author) = &record.author {
                authors.insert(author.as_str());
            }
            if let Some(category) = &record.category {
                categories.insert(category.as_str());
            }
            if let Some(publisher) = &record.publisher {
                publishers.insert(publisher.as_str());
            }
        }

        let mut conn = self.conn.borrow_mut();
        report.authors_inserted = run_batch(&mut conn, "authors", &mut report, |tx| {
            insert_names(tx, "authors", "author_name", &authors)
        });
        report.categories_inserted = run_batch(&mut conn, "categories", &mut report, |tx| {
            insert_names(tx, "categories", "category_name", &categories)
        });
        report.publishers_inserted = run_batch(&mut conn, "publishers", &mut report, |tx| {
            insert_names(tx, "publishers", "publisher_name", &publishers)
        });
        report.books_inserted = run_batch(&mut conn, "books", &mut report, |tx| {
            insert_books(tx, &read.records)
        });
        report.prices_inserted = run_batch(&mut conn, "prices", &mut report, |tx| {
            insert_prices(tx, &read.records)
        });

        log::info!(
            "loader: Loaded {} of {} rows ({} skipped, {} failed batches)",
            report.rows_read - report.rows_skipped,
            report.rows_read,
            report.rows_skipped,
            report.failed_batches.len()
        );
        Ok(report)
    }

    /// Load a catalog CSV from a file path.
    ///
    /// A missing or unreadable file aborts the load.
    pub fn load_catalog_file(&self, path: impl AsRef<Path>) -> anyhow::Result<LoadReport> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("File '{}' not found", path.display());
        }
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        log::info!("loader: Loading catalog from {}", path.display());
        self.load_catalog(file)
    }
}

/// Run one insert batch in its own transaction.
///
/// Returns the number of rows inserted, or 0 after rolling back a failure.
fn run_batch<F>(conn: &mut Connection, table: &str, report: &mut LoadReport, batch: F) -> usize
where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<usize>,
{
    let result = conn.transaction().and_then(|tx| {
        let inserted = batch(&tx)?;
        tx.commit()?;
        Ok(inserted)
    });
    match result {
        Ok(inserted) => {
            log::info!("loader: Inserted {} rows into {}", inserted, table);
            inserted
        }
        Err(e) => {
            log::error!("loader: Error inserting data into {}: {}", table, e);
            report.failed_batches.push(FailedBatch {
                table: table.to_string(),
                error: e.to_string(),
            });
            0
        }
    }
}

fn insert_names(
    tx: &Transaction<'_>,
    table: &str,
    column: &str,
    names: &BTreeSet<&str>,
) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {table} ({column}) VALUES (?1) ON CONFLICT DO NOTHING"
    ))?;
    let mut inserted = 0;
    for name in names {
        inserted += stmt.execute([name])?;
    }
    Ok(inserted)
}

fn insert_books(tx: &Transaction<'_>, records: &[CatalogRecord]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare(
        "INSERT INTO books (title, author_id, publisher_id, category_id, description, publication_year)
         VALUES (?1,
                 (SELECT author_id FROM authors WHERE author_name = ?2 LIMIT 1),
                 (SELECT publisher_id FROM publishers WHERE publisher_name = ?3 LIMIT 1),
                 (SELECT category_id FROM categories WHERE category_name = ?4 LIMIT 1),
                 ?5, ?6)
         ON CONFLICT DO NOTHING",
    )?;
    let mut inserted = 0;
    for r in records {
        inserted += stmt.execute(params![
            r.title,
            r.author,
            r.publisher,
            r.category,
            r.description,
            r.publish_year
        ])?;
    }
    Ok(inserted)
}

fn insert_prices(tx: &Transaction<'_>, records: &[CatalogRecord]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare(
        "INSERT INTO prices (book_id, price, publish_date)
         VALUES ((SELECT book_id FROM books WHERE title = ?1 ORDER BY book_id LIMIT 1), ?2, ?3)
         ON CONFLICT DO NOTHING",
    )?;
    let mut inserted = 0;
    for r in records {
        let publish_date = r.publish_date().map(|d| d.format("%Y-%m-%d").to_string());
        inserted += stmt.execute(params![r.title, r.price, publish_date])?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use crate::Database;

    const HEADER: &str = "Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)\n";

    fn catalog(body: &str) -> String {
        format!("{HEADER}{body}")
    }

    fn count(db: &Database, table: &str) -> i64 {
        db.conn
            .borrow()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    const SAMPLE: &str = "\
Dune,Frank Herbert,Desert planet,Science Fiction,Chilton,9.99,1965
Children of Dune,Frank Herbert,Sequel,Science Fiction,Putnam,7.50,1976
Emma,Jane Austen,Matchmaking,Classics,Penguin,4.50,1815
";

    #[test]
    fn load_catalog_from_csv() {
        let db = Database::new().unwrap();
        let report = db.load_catalog(catalog(SAMPLE).as_bytes()).unwrap();

        assert_eq!(report.rows_read, 3);
        assert!(report.is_clean());
        assert_eq!(report.authors_inserted, 2);
        assert_eq!(report.categories_inserted, 2);
        assert_eq!(report.publishers_inserted, 3);
        assert_eq!(report.books_inserted, 3);
        assert_eq!(report.prices_inserted, 3);

        assert_eq!(count(&db, "authors"), 2);
        assert_eq!(count(&db, "categories"), 2);
        assert_eq!(count(&db, "publishers"), 3);
        assert_eq!(count(&db, "books"), 3);
        assert_eq!(count(&db, "prices"), 3);
    }

    #[test]
    fn books_reference_their_parents() {
        let db = Database::new().unwrap();
        db.load_catalog(catalog(SAMPLE).as_bytes()).unwrap();

        let conn = db.conn.borrow();
        let (author, category, publisher, year): (String, String, String, i32) = conn
            .query_row(
                "SELECT a.author_name, c.category_name, p.publisher_name, b.publication_year
                 FROM books b
                 JOIN authors a ON b.author_id = a.author_id
                 JOIN categories c ON b.category_id = c.category_id
                 JOIN publishers p ON b.publisher_id = p.publisher_id
                 WHERE b.title = 'Emma'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!(author, "Jane Austen");
        assert_eq!(category, "Classics");
        assert_eq!(publisher, "Penguin");
        assert_eq!(year, 1815);
    }

    #[test]
    fn prices_carry_publish_date() {
        let db = Database::new().unwrap();
        db.load_catalog(catalog(SAMPLE).as_bytes()).unwrap();

        let conn = db.conn.borrow();
        let (price, date): (f64, String) = conn
            .query_row(
                "SELECT pr.price, pr.publish_date FROM prices pr
                 JOIN books b ON pr.book_id = b.book_id
                 WHERE b.title = 'Dune'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert!((price - 9.99).abs() < 0.001);
        assert_eq!(date, "1965-01-01");
    }

    #[test]
    fn loading_twice_keeps_parents_unique() {
        let db = Database::new().unwrap();
        db.load_catalog(catalog(SAMPLE).as_bytes()).unwrap();
        let second = db.load_catalog(catalog(SAMPLE).as_bytes()).unwrap();

        assert_eq!(second.authors_inserted, 0);
        assert_eq!(second.categories_inserted, 0);
        assert_eq!(second.publishers_inserted, 0);
        assert_eq!(count(&db, "authors"), 2);
        assert_eq!(count(&db, "categories"), 2);
        assert_eq!(count(&db, "publishers"), 3);
        // Books have no uniqueness constraint, so a reload appends them.
        assert_eq!(count(&db, "books"), 6);
    }

    #[test]
    fn repeated_names_within_one_file_are_deduplicated() {
        let db = Database::new().unwrap();
        let report = db
            .load_catalog(
                catalog(
                    "A,Same Author,,Poetry,Same Press,1,2000\n\
                     B,Same Author,,Poetry,Same Press,2,2001\n",
                )
                .as_bytes(),
            )
            .unwrap();
        assert_eq!(report.authors_inserted, 1);
        assert_eq!(count(&db, "authors"), 1);
        assert_eq!(count(&db, "books"), 2);
    }

    #[test]
    fn row_with_missing_column_is_skipped() {
        let db = Database::new().unwrap();
        let report = db
            .load_catalog(
                catalog(
                    "Dune,Frank Herbert,Desert planet\n\
                     Emma,Jane Austen,Matchmaking,Classics,Penguin,4.50,1815\n",
                )
                .as_bytes(),
            )
            .unwrap();

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.books_inserted, 1);
        assert_eq!(count(&db, "books"), 1);
        assert_eq!(count(&db, "authors"), 1);
    }

    #[test]
    fn missing_headers_abort_before_inserting() {
        let db = Database::new().unwrap();
        let result = db.load_catalog("Title,Authors\nDune,Frank Herbert\n".as_bytes());
        assert!(result.is_err());
        assert_eq!(count(&db, "authors"), 0);
        assert_eq!(count(&db, "books"), 0);
    }

    #[test]
    fn blank_price_is_stored_as_zero() {
        let db = Database::new().unwrap();
        db.load_catalog(catalog("Dune,Frank Herbert,,Science Fiction,Chilton,,\n").as_bytes())
            .unwrap();
        let conn = db.conn.borrow();
        let (price, date): (f64, Option<String>) = conn
            .query_row("SELECT price, publish_date FROM prices", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(price, 0.0);
        assert!(date.is_none());
    }

    #[test]
    fn duplicate_titles_price_the_first_book() {
        let db = Database::new().unwrap();
        db.load_catalog(
            catalog(
                "Poems,First Poet,,Poetry,Press A,3.00,1990\n\
                 Poems,Second Poet,,Poetry,Press B,5.00,2000\n",
            )
            .as_bytes(),
        )
        .unwrap();
        let conn = db.conn.borrow();
        let priced_books: i64 = conn
            .query_row("SELECT COUNT(DISTINCT book_id) FROM prices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(priced_books, 1, "Title lookup resolves to the first match");
    }

    #[test]
    fn failing_batch_is_rolled_back_and_later_batches_run() {
        let db = Database::new().unwrap();
        db.conn
            .borrow()
            .execute_batch(
                "CREATE TRIGGER reject_category BEFORE INSERT ON categories
                 WHEN NEW.category_name = 'Forbidden'
                 BEGIN SELECT RAISE(ABORT, 'forbidden category'); END;",
            )
            .unwrap();

        let report = db
            .load_catalog(
                catalog(
                    "Emma,Jane Austen,,Classics,Penguin,4.50,1815\n\
                     Secrets,Anonymous,,Forbidden,Penguin,1.00,2020\n",
                )
                .as_bytes(),
            )
            .unwrap();

        assert_eq!(report.failed_batches.len(), 1);
        assert_eq!(report.failed_batches[0].table, "categories");
        assert_eq!(report.categories_inserted, 0);
        // The whole categories batch rolled back, including 'Classics'.
        assert_eq!(count(&db, "categories"), 0);
        assert_eq!(count(&db, "books"), 2);
        assert_eq!(count(&db, "prices"), 2);
    }

    #[test]
    fn load_catalog_file_missing_file_fails() {
        let db = Database::new().unwrap();
        let err = db.load_catalog_file("/nonexistent/BooksDatasetClean.csv").err().unwrap();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_catalog_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, catalog(SAMPLE)).unwrap();

        let db = Database::new().unwrap();
        let report = db.load_catalog_file(&path).unwrap();
        assert_eq!(report.books_inserted, 3);
    }
}
