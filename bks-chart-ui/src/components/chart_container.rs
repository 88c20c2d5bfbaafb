//! Chart container for pre-rendered SVG markup.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id of the container
    pub id: String,
    /// Complete `<svg>` markup from [`crate::chart`]
    pub svg: String,
    /// Optional minimum height in pixels
    #[props(default = 300)]
    pub min_height: u32,
}

/// A container div that renders a chart built by [`crate::chart`].
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%; max-width: 900px;",
        props.min_height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
            dangerous_inner_html: "{props.svg}",
        }
    }
}
