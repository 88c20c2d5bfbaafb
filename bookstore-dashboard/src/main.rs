//! Bookstore Dashboard
//!
//! Desktop viewer for the bookstore catalog database. The sidebar shows
//! where `DATABASE_URL` points and connects on demand; once connected, five
//! tabs run the catalog queries against the shared connection:
//!
//! 1. All Books: every book with its author, category, publisher and price
//! 2. Statistics: book count, average price and category count
//! 3. Most Recent Books: newest book of a category
//! 4. Search by Category: matching books and their price histogram
//! 5. Search by Price & Category: books under a price ceiling, plotted
//!    against publication year
//!
//! Queries are synchronous and re-run whenever their inputs change. A failed
//! query shows its error in place of the results; the other tabs keep working.

mod tabs;

use bks_chart_ui::components::{ConnectPrompt, ConnectionPanel, TabBar};
use bks_chart_ui::state::{AppState, Tab};
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(WindowBuilder::new().with_title("Bookstore Dashboard")),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);
    let connected = state.is_connected();

    rsx! {
        div {
            style: "display: flex; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            ConnectionPanel {}
            div {
                style: "flex: 1; padding: 16px 24px; min-width: 0;",
                h1 { style: "margin-top: 0;", "Bookstore Database Viewer" }
                if connected {
                    TabBar {}
                    ActiveTab {}
                } else {
                    ConnectPrompt {}
                }
            }
        }
    }
}

#[component]
fn ActiveTab() -> Element {
    let state = use_context::<AppState>();

    match (state.active_tab)() {
        Tab::AllBooks => rsx! { tabs::AllBooks {} },
        Tab::Statistics => rsx! { tabs::Statistics {} },
        Tab::MostRecent => rsx! { tabs::MostRecent {} },
        Tab::SearchByCategory => rsx! { tabs::SearchByCategory {} },
        Tab::SearchByPrice => rsx! { tabs::SearchByPrice {} },
    }
}
