//! Single headline number.

use dioxus::prelude::*;

#[component]
pub fn MetricCard(label: String, value: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; padding: 12px 16px; border: 1px solid #E0E0E0; border-radius: 4px;",
            div { style: "font-size: 13px; color: #666;", "{label}" }
            div { style: "font-size: 28px; margin-top: 4px;", "{value}" }
        }
    }
}
