//! Error types for reading the bookstore catalog CSV.

use thiserror::Error;

/// Errors raised while reading a catalog CSV.
///
/// [`CatalogError::MissingHeaders`] and header-level [`CatalogError::Csv`]
/// errors abort a whole load. The row-level variants only reject the row
/// they were raised for.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The header line lacks one or more required columns
    #[error("CSV file is missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// A row is too short to contain a required column
    #[error("line {line}: missing column '{column}'")]
    MissingColumn { line: u64, column: &'static str },

    /// The price column holds something other than a number
    #[error("line {line}: invalid price '{value}'")]
    InvalidPrice { line: u64, value: String },

    /// The CSV reader failed
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl CatalogError {
    /// Whether this error rejects a single row rather than the whole file.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingColumn { .. } | CatalogError::InvalidPrice { .. }
        )
    }
}

/// Type alias for Results using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;
