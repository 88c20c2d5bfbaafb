//! Text input for a category search term.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CategoryInputProps {
    /// DOM id, unique per tab
    pub id: String,
    /// Signal holding the search term
    pub value: Signal<String>,
    #[props(default = "Enter category:".to_string())]
    pub label: String,
}

/// Category text box. Commits the term to `value` on change.
#[component]
pub fn CategoryInput(props: CategoryInputProps) -> Element {
    let mut value = props.value;
    let current = value();

    let on_change = move |evt: Event<FormData>| {
        value.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{props.id}",
                style: "font-weight: bold; margin-right: 8px;",
                "{props.label}"
            }
            input {
                id: "{props.id}",
                r#type: "text",
                value: "{current}",
                placeholder: "e.g. Science Fiction",
                onchange: on_change,
            }
        }
    }
}
