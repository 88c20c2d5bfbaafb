//! Schema setup, catalog loading and the connectivity check.

use bks_db::models::LoadReport;
use bks_db::Database;
use log::info;
use std::io::Write;
use std::path::Path;

/// Create any missing tables.
pub fn run_init<W: Write>(db: &Database, out: &mut W) -> anyhow::Result<()> {
    db.ensure_schema()?;
    writeln!(out, "Schema ready in {}", db.connection_string().describe())?;
    Ok(())
}

/// Load `csv` and print the load report.
///
/// Skipped rows and failed batches are reported but do not fail the
/// command; a missing file or missing headers do.
pub fn run_load<W: Write>(db: &Database, csv: &Path, out: &mut W) -> anyhow::Result<()> {
    let report = db.load_catalog_file(csv)?;
    info!(
        "Loaded {} into {}",
        csv.display(),
        db.connection_string().describe()
    );
    write_report(&report, out)
}

fn write_report<W: Write>(report: &LoadReport, out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "Read {} rows ({} skipped)",
        report.rows_read, report.rows_skipped
    )?;
    writeln!(
        out,
        "Inserted {} authors, {} categories, {} publishers, {} books, {} prices",
        report.authors_inserted,
        report.categories_inserted,
        report.publishers_inserted,
        report.books_inserted,
        report.prices_inserted
    )?;
    for failed in &report.failed_batches {
        writeln!(out, "Batch failed for {}: {}", failed.table, failed.error)?;
    }
    if report.is_clean() {
        writeln!(out, "Data loaded successfully")?;
    }
    Ok(())
}

/// Report where the opened database lives.
pub fn run_check<W: Write>(db: &Database, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Connected to {}", db.connection_string().describe())?;
    Ok(())
}
