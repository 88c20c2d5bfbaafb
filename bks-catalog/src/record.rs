use crate::error::{CatalogError, Result};
use crate::sanitize::sanitize_value;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::io::Read;

pub const AUTHORS_HEADER: &str = "Authors";
pub const CATEGORY_HEADER: &str = "Category";
pub const PUBLISHER_HEADER: &str = "Publisher";
pub const TITLE_HEADER: &str = "Title";
pub const DESCRIPTION_HEADER: &str = "Description";
pub const PRICE_HEADER: &str = "Price Starting With ($)";
pub const PUBLISH_YEAR_HEADER: &str = "Publish Date (Year)";

/// Every header the catalog CSV must carry, in the canonical dataset order.
pub const REQUIRED_HEADERS: [&str; 7] = [
    AUTHORS_HEADER,
    CATEGORY_HEADER,
    PUBLISHER_HEADER,
    TITLE_HEADER,
    DESCRIPTION_HEADER,
    PRICE_HEADER,
    PUBLISH_YEAR_HEADER,
];

/// Column positions of the catalog fields within one CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogColumns {
    pub authors: usize,
    pub category: usize,
    pub publisher: usize,
    pub title: usize,
    pub description: usize,
    pub price: usize,
    pub publish_year: usize,
}

impl CatalogColumns {
    /// Locate every required header, ignoring surrounding whitespace and a BOM.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let position = |wanted: &str| names.iter().position(|name| *name == wanted);

        let missing: Vec<String> = REQUIRED_HEADERS
            .iter()
            .filter(|h| position(**h).is_none())
            .map(|h| h.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::MissingHeaders(missing));
        }

        let index = |wanted: &str| position(wanted).unwrap_or_default();
        Ok(Self {
            authors: index(AUTHORS_HEADER),
            category: index(CATEGORY_HEADER),
            publisher: index(PUBLISHER_HEADER),
            title: index(TITLE_HEADER),
            description: index(DESCRIPTION_HEADER),
            price: index(PRICE_HEADER),
            publish_year: index(PUBLISH_YEAR_HEADER),
        })
    }
}

/// One cleaned catalog row.
///
/// Text fields are trimmed and truncated; `None` means the cell was blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub author: Option<String>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Starting price in dollars; 0 when the cell was blank
    pub price: f64,
    /// Bare publication year from the `Publish Date (Year)` column
    pub publish_year: Option<i32>,
}

impl CatalogRecord {
    /// Parse a CSV record using the column positions found in the header.
    ///
    /// `line` is only used to label errors.
    pub fn from_record(record: &StringRecord, columns: &CatalogColumns, line: u64) -> Result<Self> {
        let required = |idx: usize, column: &'static str| {
            record
                .get(idx)
                .map(sanitize_value)
                .ok_or(CatalogError::MissingColumn { line, column })
        };

        let author = required(columns.authors, AUTHORS_HEADER)?;
        let category = required(columns.category, CATEGORY_HEADER)?;
        let publisher = required(columns.publisher, PUBLISHER_HEADER)?;
        let title = required(columns.title, TITLE_HEADER)?;
        let description = record.get(columns.description).and_then(sanitize_value);

        let price = match record.get(columns.price).map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| CatalogError::InvalidPrice {
                    line,
                    value: raw.to_string(),
                })?,
        };

        let publish_year = record
            .get(columns.publish_year)
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match parse_year(raw) {
                Some(year) => Some(year),
                None => {
                    log::debug!("line {}: ignoring unparseable year '{}'", line, raw);
                    None
                }
            });

        Ok(Self {
            author,
            category,
            publisher,
            title,
            description,
            price,
            publish_year,
        })
    }

    /// January 1st of the publication year.
    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.publish_year
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|year| NaiveDate::from_ymd_opt(*year, 1, 1).is_some())
}

/// Outcome of reading a whole catalog CSV.
#[derive(Debug, Default)]
pub struct CatalogRead {
    /// Rows that parsed cleanly, in file order
    pub records: Vec<CatalogRecord>,
    /// One error per rejected row
    pub rejected: Vec<CatalogError>,
}

impl CatalogRead {
    /// Number of data rows seen, accepted or not.
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// Read a catalog CSV with a header line.
///
/// A missing header or an I/O failure aborts with an error. Rows that are
/// too short, carry a bad price, or fail to decode are collected in
/// [`CatalogRead::rejected`] and reading continues.
///
/// # Example CSV
/// ```text
/// Title,Authors,Description,Category,Publisher,Price Starting With ($),Publish Date (Year)
/// Dune,Frank Herbert,Desert planet,Science Fiction,Chilton,9.99,1965
/// ```
pub fn read_catalog<R: Read>(reader: R) -> Result<CatalogRead> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    log::debug!("catalog: CSV headers {:?}", headers);
    let columns = CatalogColumns::from_headers(&headers)?;

    let mut read = CatalogRead::default();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                read.rejected.push(e.into());
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match CatalogRecord::from_record(&record, &columns, line) {
            Ok(parsed) => read.records.push(parsed),
            Err(e) => read.rejected.push(e),
        }
    }
    Ok(read)
}
