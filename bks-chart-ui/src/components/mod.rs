//! Reusable Dioxus RSX components for the bookstore dashboard.

mod category_input;
mod chart_container;
mod chart_header;
mod connect_prompt;
mod connection_panel;
mod data_table;
mod error_display;
mod metric_card;
mod price_input;
mod tab_bar;

pub use category_input::CategoryInput;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use connect_prompt::ConnectPrompt;
pub use connection_panel::ConnectionPanel;
pub use data_table::DataTable;
pub use error_display::{ErrorDisplay, InfoBox, WarningBox};
pub use metric_card::MetricCard;
pub use price_input::{parse_max_price, PriceInput};
pub use tab_bar::TabBar;
