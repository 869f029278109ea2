//! Fixed-width text-table rendering shared by the CSV and SQLite extractors

/// A header row plus data rows, rendered as a human-readable aligned table.
///
/// Columns and rows keep their original order; there is no row index column.
/// Rendering is deterministic, so extracting the same file twice yields
/// byte-identical output.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Create a table with the given column headers
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a data row; short rows are padded with empty cells
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render headers and rows as right-aligned fixed-width columns
    /// separated by single spaces, one line per row, no trailing newline.
    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                let len = cell.chars().count();
                if len > widths[i] {
                    widths[i] = len;
                }
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_line(&self.headers, &widths));
        for row in &self.rows {
            lines.push(render_line(row, &widths));
        }

        lines.join("\n")
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let empty = String::new();
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).unwrap_or(&empty);
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", " ".repeat(pad), cell)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
