//! Conversion of query results into display cells for [`DataTable`](crate::components::DataTable).

use bks_db::models::{BookListing, BookPrice, PricedBook};

/// A query result row that can be shown as a table row.
pub trait TableRow {
    /// Column headings, in cell order.
    fn columns() -> &'static [&'static str];
    /// Display text for each column.
    fn cells(&self) -> Vec<String>;
}

/// Format a dollar amount with two decimals.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_default()
}

impl TableRow for BookListing {
    fn columns() -> &'static [&'static str] {
        &[
            "Book ID",
            "Title",
            "Author",
            "Category",
            "Publisher",
            "Publication Year",
            "Price",
            "Publish Date",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.book_id.to_string(),
            text(&self.title),
            self.author.clone(),
            self.category.clone(),
            self.publisher.clone(),
            year(self.publication_year),
            format_price(self.price),
            text(&self.publish_date),
        ]
    }
}

impl TableRow for BookPrice {
    fn columns() -> &'static [&'static str] {
        &["Title", "Price", "Category"]
    }

    fn cells(&self) -> Vec<String> {
        vec![text(&self.title), format_price(self.price), self.category.clone()]
    }
}

impl TableRow for PricedBook {
    fn columns() -> &'static [&'static str] {
        &["Title", "Price", "Category", "Publication Year"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text(&self.title),
            format_price(self.price),
            self.category.clone(),
            year(self.publication_year),
        ]
    }
}

/// Headings and cell rows for a slice of results.
pub fn to_table<T: TableRow>(rows: &[T]) -> (Vec<String>, Vec<Vec<String>>) {
    let columns = T::columns().iter().map(|c| c.to_string()).collect();
    (columns, rows.iter().map(T::cells).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_price_rounds_to_cents() {
        assert_eq!(format_price(9.999), "$10.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn listing_cells_match_columns() {
        let listing = BookListing {
            book_id: 3,
            title: None,
            author: "Frank Herbert".into(),
            category: "Science Fiction".into(),
            publisher: "Chilton".into(),
            publication_year: None,
            price: 9.99,
            publish_date: None,
        };
        let cells = listing.cells();
        assert_eq!(cells.len(), BookListing::columns().len());
        assert_eq!(cells[0], "3");
        assert_eq!(cells[1], "");
        assert_eq!(cells[5], "");
        assert_eq!(cells[6], "$9.99");
    }

    #[test]
    fn to_table_keeps_row_order() {
        let rows = vec![
            PricedBook {
                title: Some("Children of Dune".into()),
                price: 7.5,
                category: "Science Fiction".into(),
                publication_year: Some(1976),
            },
            PricedBook {
                title: Some("Dune".into()),
                price: 9.99,
                category: "Science Fiction".into(),
                publication_year: Some(1965),
            },
        ];
        let (columns, cells) = to_table(&rows);
        assert_eq!(columns, vec!["Title", "Price", "Category", "Publication Year"]);
        assert_eq!(cells[0], vec!["Children of Dune", "$7.50", "Science Fiction", "1976"]);
        assert_eq!(cells[1][0], "Dune");
    }

    #[test]
    fn to_table_of_nothing_still_has_columns() {
        let (columns, cells) = to_table::<BookPrice>(&[]);
        assert_eq!(columns.len(), 3);
        assert!(cells.is_empty());
    }
}
