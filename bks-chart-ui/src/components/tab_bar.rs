//! Tab strip for switching dashboard views.

use crate::state::{AppState, Tab};
use dioxus::prelude::*;

/// One button per [`Tab`]; the active one is highlighted.
#[component]
pub fn TabBar() -> Element {
    let state = use_context::<AppState>();
    let active = (state.active_tab)();

    rsx! {
        div {
            style: "display: flex; gap: 4px; border-bottom: 2px solid #E0E0E0; margin-bottom: 12px;",
            for tab in Tab::ALL {
                TabButton { tab, active: tab == active }
            }
        }
    }
}

#[component]
fn TabButton(tab: Tab, active: bool) -> Element {
    let mut state = use_context::<AppState>();
    let style = if active {
        "padding: 8px 14px; border: none; border-bottom: 3px solid #FF4B4B; background: none; font-weight: bold; cursor: pointer;"
    } else {
        "padding: 8px 14px; border: none; border-bottom: 3px solid transparent; background: none; color: #555; cursor: pointer;"
    };

    let label = tab.label();

    rsx! {
        button {
            style: "{style}",
            onclick: move |_| state.active_tab.set(tab),
            "{label}"
        }
    }
}
