//! Main-pane placeholder shown until a database is connected.

use crate::state::AppState;
use dioxus::prelude::*;

/// Tells the user what the Connect button will open, or why it can't.
#[component]
pub fn ConnectPrompt() -> Element {
    let state = use_context::<AppState>();
    let hint = prompt_text(&state.connection.read().target);

    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{hint}"
        }
    }
}

fn prompt_text(target: &Result<String, String>) -> String {
    match target {
        Ok(target) => format!("Connect to {} to browse the catalog.", target),
        Err(_) => "Set DATABASE_URL, then connect to browse the catalog.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_target() {
        assert_eq!(
            prompt_text(&Ok("books.db (rwc)".to_string())),
            "Connect to books.db (rwc) to browse the catalog."
        );
        assert!(prompt_text(&Err("DATABASE_URL is not set".to_string())).starts_with("Set DATABASE_URL"));
    }
}
