//! The master index table.
//!
//! Renders the whole [`Table`] as one `<table>` fragment, ready to be
//! spliced into the shell page. Cells in the link column become anchors to
//! their detail pages; every other cell is plain escaped text. No scripts,
//! no sorting, no filtering.

use crate::detail::LinkMap;
use crate::table::Table;
use maud::{Markup, html};

/// Render `table` with cells of `link_column` linked through `links`.
pub fn render_index(table: &Table, links: &LinkMap, link_column: &str) -> Markup {
    let link_idx = table.columns.iter().position(|c| c == link_column);

    html! {
        table {
            thead {
                tr {
                    @for column in &table.columns {
                        th { (column) }
                    }
                }
            }
            tbody {
                @for (row_idx, row) in table.rows.iter().enumerate() {
                    tr {
                        @for (col_idx, cell) in row.iter().enumerate() {
                            @let href = (link_idx == Some(col_idx))
                                .then(|| links.href_for_row(row_idx, cell))
                                .flatten();
                            td {
                                @if let Some(href) = href {
                                    a href=(href) { (cell) }
                                } @else {
                                    (cell)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
