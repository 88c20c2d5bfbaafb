//! The five dashboard views.
//!
//! Each view memoizes its query on the signals it reads (the database handle
//! and its inputs), so typing in one tab never re-runs another tab's query.

use bks_chart_ui::chart::{self, ScatterPoint, COUNT_AXIS, HISTOGRAM_BINS, PRICE_AXIS, YEAR_AXIS};
use bks_chart_ui::components::{
    CategoryInput, ChartContainer, ChartHeader, DataTable, ErrorDisplay, InfoBox, MetricCard,
    PriceInput, WarningBox,
};
use bks_chart_ui::fetch::{self, Fetched};
use bks_chart_ui::state::AppState;
use bks_chart_ui::table::{format_price, to_table};
use dioxus::prelude::*;

const HISTOGRAM_ID: &str = "category-price-histogram";
const SCATTER_ID: &str = "price-year-scatter";

fn chart_or_error(id: &str, drawn: anyhow::Result<String>) -> Element {
    match drawn {
        Ok(svg) => rsx! {
            ChartContainer { id: id.to_string(), svg }
        },
        Err(e) => {
            log::error!("{:#}", e);
            rsx! {
                ErrorDisplay { message: format!("{:#}", e) }
            }
        }
    }
}

#[component]
pub fn AllBooks() -> Element {
    let state = use_context::<AppState>();
    let books = use_memo(move || {
        state.connection.read().db.as_ref().map(fetch::books).unwrap_or_default()
    });

    let Fetched { data, error } = books();
    let (columns, rows) = to_table(&data);

    rsx! {
        ChartHeader { title: "All Books and Authors".to_string() }
        if let Some(message) = error {
            ErrorDisplay { message }
        } else if data.is_empty() {
            WarningBox { message: "No data available for books and authors.".to_string() }
        } else {
            DataTable { columns, rows }
        }
    }
}

#[component]
pub fn Statistics() -> Element {
    let state = use_context::<AppState>();
    let stats = use_memo(move || {
        state
            .connection
            .read()
            .db
            .as_ref()
            .map(fetch::summary_statistics)
            .unwrap_or_default()
    });

    let body = match stats() {
        Fetched { error: Some(message), .. } => rsx! { ErrorDisplay { message } },
        Fetched { data: Some(stats), .. } => rsx! {
            div {
                style: "display: flex; gap: 16px;",
                MetricCard { label: "Total Books".to_string(), value: stats.total_books.to_string() }
                MetricCard { label: "Average Price".to_string(), value: format_price(stats.average_price) }
                MetricCard { label: "Total Categories".to_string(), value: stats.total_categories.to_string() }
            }
        },
        Fetched { data: None, .. } => rsx! {
            WarningBox { message: "No statistics available.".to_string() }
        },
    };

    rsx! {
        ChartHeader { title: "Database Statistics".to_string() }
        {body}
    }
}

#[component]
pub fn MostRecent() -> Element {
    let state = use_context::<AppState>();
    let recent = use_memo(move || {
        let term = (state.recent_category)();
        if term.trim().is_empty() {
            return None;
        }
        state
            .connection
            .read()
            .db
            .as_ref()
            .map(|db| fetch::most_recent_book(db, &term))
    });

    let term = (state.recent_category)();
    let body = match recent() {
        None => rsx! {
            InfoBox { message: "Enter a category name to find the most recent book.".to_string() }
        },
        Some(Fetched { error: Some(message), .. }) => rsx! { ErrorDisplay { message } },
        Some(Fetched { data: Some(book), .. }) => {
            let title = book.title.unwrap_or_default();
            let year = book
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            rsx! {
                p { style: "color: #2E7D32; font-weight: bold;", "Most Recent Book in Category `{term}`:" }
                p { strong { "Title: " } "{title}" }
                p { strong { "Publication Year: " } "{year}" }
            }
        }
        Some(Fetched { data: None, .. }) => rsx! {
            WarningBox { message: format!("No data found for category `{}`.", term) }
        },
    };

    rsx! {
        ChartHeader { title: "Most Recent Book by Category".to_string() }
        CategoryInput {
            id: "most-recent-category".to_string(),
            value: state.recent_category,
            label: "Enter Category Name:".to_string(),
        }
        {body}
    }
}

#[component]
pub fn SearchByCategory() -> Element {
    let state = use_context::<AppState>();
    let found = use_memo(move || {
        let term = (state.search_category)();
        if term.trim().is_empty() {
            return None;
        }
        state
            .connection
            .read()
            .db
            .as_ref()
            .map(|db| fetch::books_by_category(db, &term))
    });

    let term = (state.search_category)();
    let body = match found() {
        None => rsx! {
            InfoBox { message: "Enter a category name to search for books.".to_string() }
        },
        Some(Fetched { error: Some(message), .. }) => rsx! { ErrorDisplay { message } },
        Some(Fetched { data, .. }) if data.is_empty() => rsx! {
            WarningBox { message: format!("No books found in the `{}` category.", term) }
        },
        Some(Fetched { data, .. }) => {
            let prices: Vec<f64> = data.iter().map(|b| b.price).collect();
            let drawn = chart::histogram_svg(&chart::histogram(&prices, HISTOGRAM_BINS));
            let (columns, rows) = to_table(&data);
            rsx! {
                DataTable { columns, rows }
                ChartHeader {
                    title: format!("Price Distribution for {} Books", term),
                    x_axis: PRICE_AXIS,
                    y_axis: COUNT_AXIS,
                }
                {chart_or_error(HISTOGRAM_ID, drawn)}
            }
        }
    };

    rsx! {
        ChartHeader { title: "Search Books by Category".to_string() }
        CategoryInput {
            id: "search-category".to_string(),
            value: state.search_category,
            label: "Enter Category Name to search books:".to_string(),
        }
        {body}
    }
}

#[component]
pub fn SearchByPrice() -> Element {
    let state = use_context::<AppState>();
    let found = use_memo(move || {
        let term = (state.price_category)();
        let max_price = (state.max_price)();
        if term.trim().is_empty() {
            return None;
        }
        state
            .connection
            .read()
            .db
            .as_ref()
            .map(|db| fetch::books_by_category_and_price(db, &term, max_price))
    });

    let term = (state.price_category)();
    let max_price = (state.max_price)();
    let body = match found() {
        None => rsx! {
            InfoBox { message: "Enter a category name and price to search for books.".to_string() }
        },
        Some(Fetched { error: Some(message), .. }) => rsx! { ErrorDisplay { message } },
        Some(Fetched { data, .. }) if data.is_empty() => rsx! {
            WarningBox {
                message: format!(
                    "No books found in the `{}` category with a price less than or equal to {}.",
                    term, max_price
                ),
            }
        },
        Some(Fetched { data, .. }) => {
            let points: Vec<ScatterPoint> = data
                .iter()
                .filter_map(|b| {
                    b.publication_year.map(|year| ScatterPoint {
                        year: f64::from(year),
                        price: b.price,
                    })
                })
                .collect();
            let drawn = chart::scatter_svg(&points);
            let (columns, rows) = to_table(&data);
            rsx! {
                DataTable { columns, rows }
                ChartHeader {
                    title: format!("Price vs. Publication Year for {} Books", term),
                    x_axis: YEAR_AXIS,
                    y_axis: PRICE_AXIS,
                    note: "Books without a publication year are not plotted".to_string(),
                }
                {chart_or_error(SCATTER_ID, drawn)}
            }
        }
    };

    rsx! {
        ChartHeader { title: "Search Books by Price & Category".to_string() }
        CategoryInput {
            id: "price-category".to_string(),
            value: state.price_category,
            label: "Enter Category Name:".to_string(),
        }
        PriceInput {}
        {body}
    }
}
