//! Plain HTML table for query results.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Scrollable table with a sticky header row.
#[component]
pub fn DataTable(props: DataTableProps) -> Element {
    let row_count = props.rows.len();

    rsx! {
        div {
            style: "max-height: 480px; overflow: auto; border: 1px solid #E0E0E0; border-radius: 4px;",
            table {
                style: "border-collapse: collapse; width: 100%; font-size: 13px;",
                thead {
                    tr {
                        for column in props.columns.iter() {
                            th {
                                style: "position: sticky; top: 0; background: #FAFAFA; text-align: left; padding: 6px 8px; border-bottom: 1px solid #E0E0E0;",
                                "{column}"
                            }
                        }
                    }
                }
                tbody {
                    for row in props.rows.iter() {
                        tr {
                            for cell in row.iter() {
                                td {
                                    style: "padding: 4px 8px; border-bottom: 1px solid #F0F0F0;",
                                    "{cell}"
                                }
                            }
                        }
                    }
                }
            }
        }
        p {
            style: "margin: 4px 0; font-size: 12px; color: #666;",
            "{row_count} rows"
        }
    }
}
