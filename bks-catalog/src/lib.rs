//! Core types for the bookstore CSV catalog.
//!
//! - [`record`]: header mapping and per-row parsing of the catalog CSV
//! - [`sanitize`]: text cleanup shared by the loader and the category search
//! - [`error`]: catalog parsing errors

pub mod error;
pub mod record;
pub mod sanitize;

pub use error::CatalogError;
pub use record::{read_catalog, CatalogColumns, CatalogRead, CatalogRecord};
