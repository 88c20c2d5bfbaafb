//! SQL schema definitions for the bookstore database.
//!
//! Contains CREATE TABLE statements for the five catalog tables.
//! The schema is applied as a single batch and is safe to re-apply.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// **Parent tables** (unique by name, targets of `ON CONFLICT DO NOTHING`):
/// - `authors` - author_id, author_name
/// - `categories` - category_id, category_name
/// - `publishers` - publisher_id, publisher_name
///
/// **Catalog tables:**
/// - `books` - title, parent references, description, publication year
/// - `prices` - one or more starting prices per book with a publish date (YYYY-MM-DD)
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        author_id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS publishers (
        publisher_id INTEGER PRIMARY KEY AUTOINCREMENT,
        publisher_name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS books (
        book_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        author_id INTEGER REFERENCES authors(author_id),
        publisher_id INTEGER REFERENCES publishers(publisher_id),
        category_id INTEGER REFERENCES categories(category_id),
        description TEXT,
        publication_year INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_books_title ON books(title);
    CREATE INDEX IF NOT EXISTS idx_books_category ON books(category_id);

    CREATE TABLE IF NOT EXISTS prices (
        price_id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER REFERENCES books(book_id),
        price REAL NOT NULL DEFAULT 0,
        publish_date TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_prices_book ON prices(book_id);
    "#
}
