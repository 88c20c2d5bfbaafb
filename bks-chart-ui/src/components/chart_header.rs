//! Section header; chart sections also name what each axis measures.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Quantity along the horizontal axis, e.g. [`PRICE_AXIS`](crate::chart::PRICE_AXIS)
    pub x_axis: Option<&'static str>,
    pub y_axis: Option<&'static str>,
    /// Extra line under the axis legend
    pub note: Option<String>,
}

/// Title line, then "X-axis: … | Y-axis: …" when the section holds a chart.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let legend = axis_legend(props.x_axis, props.y_axis);

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if let Some(legend) = legend {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{legend}"
                }
            }
            if let Some(note) = props.note {
                p {
                    style: "margin: 2px 0 0 0; font-size: 12px; color: #888; font-style: italic;",
                    "{note}"
                }
            }
        }
    }
}

fn axis_legend(x_axis: Option<&str>, y_axis: Option<&str>) -> Option<String> {
    match (x_axis, y_axis) {
        (Some(x), Some(y)) => Some(format!("X-axis: {} | Y-axis: {}", x, y)),
        (Some(x), None) => Some(format!("X-axis: {}", x)),
        (None, Some(y)) => Some(format!("Y-axis: {}", y)),
        (None, None) => None,
    }
}
