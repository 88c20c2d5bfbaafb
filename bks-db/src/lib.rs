//! SQLite database layer for the bookstore catalog.
//!
//! This crate owns everything that touches the database: parsing the
//! `DATABASE_URL` connection string, the schema, the CSV catalog loader,
//! and the typed read queries behind the dashboard and the CLI.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper: one connection per session, shared by
//!   cheap clones, single-threaded
//! - SQLite via `rusqlite` (bundled), foreign keys enforced on every connection
//! - Every operation is a single statement or a single-table batch
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use bks_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_catalog(
//!     "Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)\n\
//!      Dune,Frank Herbert,Desert planet,Science Fiction,Chilton,9.99,1965\n"
//!         .as_bytes(),
//! )
//! .unwrap();
//!
//! let books = db.query_books_by_category("science  FICTION").unwrap();
//! assert_eq!(books.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod schema;
pub mod url;
mod loader;
mod queries;
pub mod models;

use anyhow::Context;
use bks_catalog::sanitize::fold_case;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;
use crate::url::{ConnectionString, DatabaseLocation};

pub use crate::url::{ConnectionStringError, OpenMode, DATABASE_URL_ENV};

/// Handle to the bookstore database.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded UI.
///
/// # Example
///
/// ```rust
/// use bks_db::Database;
///
/// let db = Database::connect("sqlite::memory:").unwrap();
/// db.ensure_schema().unwrap();
/// let stats = db.query_summary_statistics().unwrap();
/// assert_eq!(stats.total_books, 0);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
    source: Rc<ConnectionString>,
}

// Manual PartialEq since Connection doesn't implement it
impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.conn, &other.conn)
    }
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use [`Database::load_catalog`]
    /// to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let db = Self::open(&ConnectionString {
            location: DatabaseLocation::Memory,
            mode: OpenMode::default(),
            repairs: Vec::new(),
        })?;
        db.ensure_schema()?;
        Ok(db)
    }

    /// Open the database named by `DATABASE_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let source = ConnectionString::from_env()?;
        Self::open(&source)
    }

    /// Parse (repairing if needed) a connection string and open it.
    pub fn connect(raw: &str) -> anyhow::Result<Self> {
        let source = ConnectionString::parse(raw)?;
        Self::open(&source)
    }

    /// Open a parsed connection string. The schema is not applied.
    pub fn open(source: &ConnectionString) -> anyhow::Result<Self> {
        let conn = match &source.location {
            DatabaseLocation::Memory => Connection::open_in_memory()?,
            DatabaseLocation::File(path) => Connection::open_with_flags(path, source.mode.flags())
                .with_context(|| format!("Failed to open database {}", path.display()))?,
        };
        conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&conn)?;
        log::info!("db: Connected to {}", source.describe());
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
            source: Rc::new(source.clone()),
        })
    }

    /// Create any missing tables and indexes.
    pub fn ensure_schema(&self) -> anyhow::Result<()> {
        self.conn
            .borrow()
            .execute_batch(schema::create_schema())
            .context("Failed to create tables")?;
        log::info!("db: Schema ready");
        Ok(())
    }

    /// The connection string this handle was opened from.
    pub fn connection_string(&self) -> &ConnectionString {
        &self.source
    }
}

/// SQL functions available on every connection.
///
/// - `fold(text)`: [`fold_case`] of its argument, NULL stays NULL
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.as_deref().map(fold_case))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        assert!(db == db2, "Clones should share the connection");
        // Both should reference the same underlying connection
        db.conn
            .borrow()
            .execute("INSERT INTO categories (category_name) VALUES ('Poetry')", [])
            .unwrap();
        let count: i64 = db2
            .conn
            .borrow()
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn separate_databases_are_not_equal() {
        let a = Database::new().unwrap();
        let b = Database::new().unwrap();
        assert!(a != b);
    }

    #[test]
    fn connect_enables_foreign_keys() {
        let db = Database::connect(":memory:").unwrap();
        let enabled: i64 = db
            .conn
            .borrow()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn connect_opens_and_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.db");
        let db = Database::connect(&format!("sqlite://{}", path.display())).unwrap();
        db.ensure_schema().unwrap();
        assert!(path.exists());
        assert_eq!(
            db.connection_string().location,
            DatabaseLocation::File(path.clone())
        );
    }

    #[test]
    fn read_only_connect_to_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let result = Database::connect(&format!("sqlite://{}?mode=ro", path.display()));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn connect_rejects_unsupported_scheme() {
        let err = Database::connect("postgres://user:pw@localhost/books").err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConnectionStringError>(),
            Some(ConnectionStringError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn fold_function_lowercases_unicode() {
        let db = Database::connect(":memory:").unwrap();
        let conn = db.conn.borrow();
        let folded: String = conn
            .query_row("SELECT fold('CIENCIA FICCIÓN')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "ciencia ficción");
        let null: Option<String> = conn
            .query_row("SELECT fold(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let db = Database::new().unwrap();
        db.ensure_schema().unwrap();
        db.ensure_schema().unwrap();
    }
}
