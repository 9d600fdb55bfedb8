//! Plain-text table rendering
//!
//! Renders the grid as:
//! - a row-number gutter
//! - a header line and a separator
//! - one line per record, editing cells shown as `[pending▏]`

use super::controller::Grid;
use super::snapshot::CellView;

/// Layout options for rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub min_column_width: usize,
    pub max_column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            min_column_width: 4,
            max_column_width: 24,
        }
    }
}

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

fn pad(s: &str, width: usize, right_align: bool) -> String {
    let text = truncate_text(s, width);
    let fill = width.saturating_sub(text.chars().count());
    if right_align {
        format!("{}{}", " ".repeat(fill), text)
    } else {
        format!("{}{}", text, " ".repeat(fill))
    }
}

/// Text of every cell, row-major, with edit sessions applied
fn cell_texts(grid: &Grid) -> Vec<Vec<String>> {
    let table = grid.snapshot();
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| match cell {
                    CellView::Data { column_id, value, .. } => {
                        match grid
                            .cell_state(row.index, column_id.as_str())
                            .and_then(|s| s.input_text())
                        {
                            Some(pending) => format!("[{}▏]", pending),
                            None => value.display_text(),
                        }
                    }
                    CellView::Action { action, .. } => format!("[{}]", action.label()),
                })
                .collect()
        })
        .collect()
}

/// Column widths from header and the first 100 rows, clamped to the options
pub fn column_widths(headers: &[String], cells: &[Vec<String>], opts: &RenderOptions) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in cells.iter().take(100) {
        for (col, text) in row.iter().enumerate() {
            if col < widths.len() {
                widths[col] = widths[col].max(text.chars().count());
            }
        }
    }
    let max = opts.max_column_width.max(opts.min_column_width);
    widths
        .into_iter()
        .map(|w| w.clamp(opts.min_column_width, max))
        .collect()
}

/// Render the whole grid as text
pub fn render_table(grid: &Grid, opts: &RenderOptions) -> String {
    let table = grid.snapshot();
    let headers: Vec<String> = table.headers.iter().map(|h| h.label.clone()).collect();
    let cells = cell_texts(grid);
    let widths = column_widths(&headers, &cells, opts);

    let gutter = table.row_count().max(1).to_string().len().max(2);
    let mut out = String::new();

    out.push_str(&" ".repeat(gutter));
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(" | ");
        out.push_str(&pad(header, *width, false));
    }
    out.push('\n');

    out.push_str(&"-".repeat(gutter));
    for width in &widths {
        out.push_str("-+-");
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');

    if cells.is_empty() {
        out.push_str("(no records)\n");
        return out;
    }

    for (i, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:>width$}", i + 1, width = gutter));
        for (text, width) in row.iter().zip(&widths) {
            out.push_str(" | ");
            out.push_str(&pad(text, *width, is_number(text)));
        }
        out.push('\n');
    }

    out
}
