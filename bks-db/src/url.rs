//! Parsing of the `DATABASE_URL` connection string.
//!
//! The backend is SQLite, so a connection string names a location (a file
//! path or an in-memory database) and an open mode. Accepted forms:
//!
//! ```text
//! sqlite::memory:            :memory:
//! sqlite:///abs/books.db     sqlite://relative/books.db
//! sqlite:books.db            file:books.db          books.db
//! sqlite:///abs/books.db?mode=ro
//! ```
//!
//! Hand-edited environment files routinely produce near-misses (quoted
//! values, a pasted `DATABASE_URL=` prefix, `sqlite3://`, stray slashes,
//! credentials copied from a server URL). Those are repaired and logged.
//! Anything else is rejected with a [`ConnectionStringError`].

use rusqlite::OpenFlags;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// A connection string that cannot be repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("DATABASE_URL is not set")]
    NotSet,

    #[error("connection string is empty")]
    Empty,

    #[error("unsupported database scheme '{0}' (expected sqlite)")]
    UnsupportedScheme(String),

    #[error("connection string has no database path")]
    EmptyPath,

    #[error("invalid mode '{0}' (expected ro, rw or rwc)")]
    InvalidMode(String),

    #[error("unknown connection parameter '{0}'")]
    UnknownParameter(String),
}

/// How the database file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
    #[default]
    ReadWriteCreate,
}

impl OpenMode {
    fn from_param(value: &str) -> Option<Self> {
        match value {
            "ro" => Some(OpenMode::ReadOnly),
            "rw" => Some(OpenMode::ReadWrite),
            "rwc" => Some(OpenMode::ReadWriteCreate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::ReadOnly => "ro",
            OpenMode::ReadWrite => "rw",
            OpenMode::ReadWriteCreate => "rwc",
        }
    }

    pub(crate) fn flags(&self) -> OpenFlags {
        let access = match self {
            OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
            OpenMode::ReadWriteCreate => {
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
        };
        access | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

/// A parsed (and possibly repaired) connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub location: DatabaseLocation,
    pub mode: OpenMode,
    /// Human-readable notes for every repair applied while parsing
    pub repairs: Vec<String>,
}

impl ConnectionString {
    /// Read and parse `DATABASE_URL` from the process environment.
    pub fn from_env() -> Result<Self, ConnectionStringError> {
        let raw = std::env::var(DATABASE_URL_ENV).map_err(|_| ConnectionStringError::NotSet)?;
        Self::parse(&raw)
    }

    /// Parse a connection string, repairing common malformations first.
    pub fn parse(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut repairs = Vec::new();
        let cleaned = strip_wrapping(raw, &mut repairs);
        if cleaned.is_empty() {
            return Err(ConnectionStringError::Empty);
        }

        let (body, query) = match cleaned.split_once('?') {
            Some((body, query)) => (body, Some(query)),
            None => (cleaned.as_str(), None),
        };

        let location = parse_location(body, &mut repairs)?;
        let mode = match query {
            Some(query) => parse_query(query, &mut repairs)?,
            None => OpenMode::default(),
        };

        for repair in &repairs {
            log::warn!("connection string repaired: {}", repair);
        }
        Ok(Self {
            location,
            mode,
            repairs,
        })
    }

    /// Short description for status displays (`books.db (rwc)`).
    pub fn describe(&self) -> String {
        match &self.location {
            DatabaseLocation::Memory => "in-memory database".to_string(),
            DatabaseLocation::File(path) => format!("{} ({})", path.display(), self.mode.as_str()),
        }
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            DatabaseLocation::Memory => write!(f, "sqlite::memory:"),
            DatabaseLocation::File(path) => {
                write!(f, "sqlite://{}", path.display())?;
                if self.mode != OpenMode::default() {
                    write!(f, "?mode={}", self.mode.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Strip whitespace, a pasted `DATABASE_URL=` assignment and matching quotes.
fn strip_wrapping(raw: &str, repairs: &mut Vec<String>) -> String {
    let mut s = raw.trim();

    let assignment = format!("{DATABASE_URL_ENV}=");
    let has_assignment = s
        .get(..assignment.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&assignment));
    if has_assignment {
        s = s[assignment.len()..].trim();
        repairs.push(format!("removed leading '{assignment}'"));
    }

    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = s[1..s.len() - 1].trim();
            repairs.push("removed surrounding quotes".to_string());
            break;
        }
    }
    s.to_string()
}

/// Split off a URL scheme. Single letters are Windows drive letters, not schemes.
fn split_scheme(s: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = s.split_once(':')?;
    let valid = scheme.len() > 1
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn parse_location(
    body: &str,
    repairs: &mut Vec<String>,
) -> Result<DatabaseLocation, ConnectionStringError> {
    if body == ":memory:" {
        return Ok(DatabaseLocation::Memory);
    }

    let Some((scheme, rest)) = split_scheme(body) else {
        return Ok(DatabaseLocation::File(PathBuf::from(body)));
    };

    let lowered = scheme.to_ascii_lowercase();
    if lowered != scheme {
        repairs.push(format!("lower-cased scheme '{scheme}'"));
    }
    match lowered.as_str() {
        "sqlite" | "file" => {}
        "sqlite3" => repairs.push("replaced scheme 'sqlite3' with 'sqlite'".to_string()),
        _ => return Err(ConnectionStringError::UnsupportedScheme(scheme.to_string())),
    }

    let path = if rest.starts_with("//") {
        let slashes = rest.chars().take_while(|c| *c == '/').count();
        let mut after = if slashes > 3 {
            repairs.push(format!("collapsed {slashes} slashes after the scheme"));
            &rest[slashes - 1..]
        } else {
            &rest[2..]
        };
        let authority_end = after.find('/').unwrap_or(after.len());
        if let Some(at) = after[..authority_end].rfind('@') {
            repairs.push("dropped credentials, which SQLite does not use".to_string());
            after = &after[at + 1..];
        }
        after
    } else {
        rest
    };

    match path {
        "" | "/" => Err(ConnectionStringError::EmptyPath),
        ":memory:" => Ok(DatabaseLocation::Memory),
        path => Ok(DatabaseLocation::File(PathBuf::from(path))),
    }
}

fn parse_query(query: &str, repairs: &mut Vec<String>) -> Result<OpenMode, ConnectionStringError> {
    if query.is_empty() || query.ends_with('&') {
        repairs.push("dropped trailing query separator".to_string());
    }

    let mut mode = OpenMode::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "mode" => {
                mode = OpenMode::from_param(value)
                    .ok_or_else(|| ConnectionStringError::InvalidMode(value.to_string()))?;
            }
            _ => return Err(ConnectionStringError::UnknownParameter(key.to_string())),
        }
    }
    Ok(mode)
}
