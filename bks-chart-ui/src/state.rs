//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use bks_db::Database;
use dioxus::prelude::*;

/// Default ceiling for the price search, in dollars.
pub const DEFAULT_MAX_PRICE: f64 = 20.0;

/// The dashboard views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    AllBooks,
    Statistics,
    MostRecent,
    SearchByCategory,
    SearchByPrice,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::AllBooks,
        Tab::Statistics,
        Tab::MostRecent,
        Tab::SearchByCategory,
        Tab::SearchByPrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::AllBooks => "All Books",
            Tab::Statistics => "Statistics",
            Tab::MostRecent => "Most Recent Books",
            Tab::SearchByCategory => "Search by Category",
            Tab::SearchByPrice => "Search by Price & Category",
        }
    }
}

/// The open database and what the connection panel shows about it.
#[derive(Clone)]
pub struct Connection {
    /// Open database (None until a connect attempt succeeds)
    pub db: Option<Database>,
    /// Where `DATABASE_URL` points, or why it can't be used
    pub target: Result<String, String>,
    /// Outcome of the last connect attempt
    pub error: Option<String>,
}

impl Connection {
    pub fn new(target: Result<String, String>) -> Self {
        Self {
            db: None,
            target,
            error: None,
        }
    }

    /// Record a connect attempt. A failure drops any previous handle.
    pub fn apply(&mut self, attempt: Result<Database, String>) {
        match attempt {
            Ok(db) => {
                self.target = Ok(db.connection_string().describe());
                self.error = None;
                self.db = Some(db);
            }
            Err(message) => {
                self.db = None;
                self.error = Some(message);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }
}

/// Shared state for the dashboard session.
#[derive(Clone, Copy)]
pub struct AppState {
    pub connection: Signal<Connection>,
    pub active_tab: Signal<Tab>,
    /// Category input of the "Most Recent Books" tab
    pub recent_category: Signal<String>,
    /// Category input of the "Search by Category" tab
    pub search_category: Signal<String>,
    /// Category input of the "Search by Price & Category" tab
    pub price_category: Signal<String>,
    pub max_price: Signal<f64>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            connection: Signal::new(Connection::new(crate::fetch::connection_info())),
            active_tab: Signal::new(Tab::default()),
            recent_category: Signal::new(String::new()),
            search_category: Signal::new(String::new()),
            price_category: Signal::new(String::new()),
            max_price: Signal::new(DEFAULT_MAX_PRICE),
        }
    }

    /// Open the database named by `DATABASE_URL`.
    pub fn connect(&mut self) {
        let attempt = crate::fetch::connect();
        self.connection.write().apply(attempt);
    }

    pub fn is_connected(&self) -> bool {
        self.connection.read().is_connected()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
