//! Command implementations for the bookstore CLI.
//!
//! Provides subcommands for creating and loading the catalog database and
//! for running the dashboard queries from a terminal.

use bks_db::{ConnectionStringError, Database};
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

pub mod load;
pub mod query;

/// Catalog file loaded when `load` is given no path.
pub const DEFAULT_CSV: &str = "BooksDatasetClean.csv";

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create the catalog tables if they don't exist
    Init,

    /// Load a books CSV into the database
    Load {
        /// Path to the catalog CSV
        #[arg(default_value = DEFAULT_CSV)]
        csv: PathBuf,
    },

    /// Check that the database can be opened
    Check,

    /// Print total books, average price and total categories
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print every book with its author, category, publisher and price
    Books {
        /// Print JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Search books by category, optionally under a price ceiling
    Search {
        /// Category substring (case-insensitive)
        #[arg(short, long)]
        category: String,

        /// Only include books priced at or below this amount
        #[arg(short = 'p', long)]
        max_price: Option<f64>,

        /// Print JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently published book of a category
    Recent {
        /// Category substring (case-insensitive)
        #[arg(short, long)]
        category: String,
    },
}

/// Open the database from an explicit URL, failing when none was given.
pub fn open_database(database_url: Option<&str>) -> anyhow::Result<Database> {
    match database_url {
        Some(url) => Database::connect(url),
        None => Err(ConnectionStringError::NotSet.into()),
    }
}

/// Run a command, printing to stdout.
pub fn run(database_url: Option<&str>, command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(database_url, command, &mut out)
}

/// Run a command, printing to `out`.
pub fn execute<W: Write>(
    database_url: Option<&str>,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    let db = open_database(database_url)?;
    match command {
        Command::Init => load::run_init(&db, out),
        Command::Load { csv } => load::run_load(&db, &csv, out),
        Command::Check => load::run_check(&db, out),
        Command::Stats { json } => query::run_stats(&db, json, out),
        Command::Books { json } => query::run_books(&db, json, out),
        Command::Search {
            category,
            max_price,
            json,
        } => query::run_search(&db, &category, max_price, json, out),
        Command::Recent { category } => query::run_recent(&db, &category, out),
    }
}
