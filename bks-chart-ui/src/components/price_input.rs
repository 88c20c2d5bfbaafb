//! Number input for the price ceiling.

use crate::state::AppState;
use dioxus::prelude::*;

/// Parse a max-price entry; negative or non-numeric input is rejected.
pub fn parse_max_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Max-price input bound to `AppState::max_price`.
#[component]
pub fn PriceInput() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.max_price)();

    let on_change = move |evt: Event<FormData>| match parse_max_price(&evt.value()) {
        Some(price) => state.max_price.set(price),
        None => log::warn!("price_input: Ignoring max price '{}'", evt.value()),
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Enter maximum price: "
                input {
                    r#type: "number",
                    value: "{current}",
                    min: "0",
                    step: "0.1",
                    style: "width: 90px;",
                    onchange: on_change,
                }
            }
        }
    }
}
