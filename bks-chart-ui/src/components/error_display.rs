//! Error, warning and info boxes.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
        }
    }
}

/// Non-fatal notice, e.g. an empty result.
#[component]
pub fn WarningBox(message: String) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFF8E1; color: #8D6E00; border-radius: 4px; border: 1px solid #FFE082;",
            "{message}"
        }
    }
}

/// Hint shown before the user has entered anything.
#[component]
pub fn InfoBox(message: String) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #E3F2FD; color: #1565C0; border-radius: 4px; border: 1px solid #90CAF9;",
            "{message}"
        }
    }
}
