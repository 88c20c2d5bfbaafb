//! Sidebar with the connection target and the Connect button.

use crate::state::{AppState, Connection};
use dioxus::prelude::*;

/// "Database Connection" sidebar.
#[component]
pub fn ConnectionPanel() -> Element {
    let mut state = use_context::<AppState>();
    let Connection { db, target, error } = (state.connection)();
    let connected = db.is_some();

    rsx! {
        div {
            style: "width: 260px; min-width: 260px; padding: 16px; background: #F0F2F6; min-height: 100vh; box-sizing: border-box;",
            h3 { style: "margin-top: 0;", "Database Connection" }
            {match target {
                Ok(target) => rsx! {
                    p { style: "font-size: 13px; word-break: break-all;", strong { "Database: " } "{target}" }
                },
                Err(reason) => rsx! {
                    p { style: "font-size: 13px; color: #C62828;", "{reason}" }
                },
            }}
            button {
                style: "padding: 6px 12px; border: 1px solid #CCC; border-radius: 4px; background: white; cursor: pointer;",
                onclick: move |_| state.connect(),
                "Connect to Database"
            }
            if connected {
                p { style: "color: #2E7D32; font-size: 13px;", "Connected successfully!" }
            }
            if let Some(message) = error {
                p { style: "color: #C62828; font-size: 13px;", "{message}" }
            }
        }
    }
}
