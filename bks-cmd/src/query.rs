//! Terminal versions of the dashboard queries.
//!
//! Tabular results print as CSV with a header row, or as pretty JSON with
//! `--json`.

use bks_db::Database;
use serde::Serialize;
use std::io::Write;

fn write_rows<W: Write, T: Serialize>(rows: &[T], json: bool, out: &mut W) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, rows)?;
        writeln!(out)?;
        return Ok(());
    }
    let mut wtr = csv::Writer::from_writer(&mut *out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_stats<W: Write>(db: &Database, json: bool, out: &mut W) -> anyhow::Result<()> {
    let stats = db.query_summary_statistics()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Total Books: {}", stats.total_books)?;
        writeln!(out, "Average Price: ${:.2}", stats.average_price)?;
        writeln!(out, "Total Categories: {}", stats.total_categories)?;
    }
    Ok(())
}

pub fn run_books<W: Write>(db: &Database, json: bool, out: &mut W) -> anyhow::Result<()> {
    let books = db.query_books()?;
    log::info!("Printing {} books", books.len());
    write_rows(&books, json, out)
}

pub fn run_search<W: Write>(
    db: &Database,
    category: &str,
    max_price: Option<f64>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match max_price {
        Some(max_price) => {
            let books = db.query_books_by_category_and_price(category, max_price)?;
            if books.is_empty() {
                log::warn!(
                    "No books found in the '{}' category with a price less than or equal to {}",
                    category,
                    max_price
                );
            }
            write_rows(&books, json, out)
        }
        None => {
            let books = db.query_books_by_category(category)?;
            if books.is_empty() {
                log::warn!("No books found in the '{}' category", category);
            }
            write_rows(&books, json, out)
        }
    }
}

pub fn run_recent<W: Write>(db: &Database, category: &str, out: &mut W) -> anyhow::Result<()> {
    match db.query_most_recent_book(category)? {
        Some(book) => {
            writeln!(out, "Title: {}", book.title.unwrap_or_default())?;
            match book.publication_year {
                Some(year) => writeln!(out, "Publication Year: {}", year)?,
                None => writeln!(out, "Publication Year: unknown")?,
            }
        }
        None => writeln!(out, "No data found for category '{}'.", category)?,
    }
    Ok(())
}
