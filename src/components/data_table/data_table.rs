//! DataTable Component
//!
//! Plain-text rendering of a table: header, rows, empty/loading/error states and a
//! pagination footer. Columns marked `text-right` are right-aligned.

use super::column::Column;
use super::record::TableRecord;
use super::sort::{SortDirection, SortState};

const COLUMN_GAP: &str = "  ";
const EMPTY_MESSAGE: &str = "No results.";

/// DataTable component
pub struct DataTable<'a, R: TableRecord> {
    columns: &'a [Column<R>],
    rows: Vec<&'a R>,
    sort: Option<SortState<R::Field>>,
    loading: bool,
    error: Option<&'a str>,
    footer: Option<String>,
}

impl<'a, R: TableRecord> DataTable<'a, R> {
    /// Create a new data table
    pub fn new(columns: &'a [Column<R>]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            sort: None,
            loading: false,
            error: None,
            footer: None,
        }
    }

    /// Set the rows
    pub fn rows(mut self, rows: impl IntoIterator<Item = &'a R>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    /// Mark the active sort column in the header
    pub fn sorted_by(mut self, sort: SortState<R::Field>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set loading state
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Show an error above the rows
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Line printed under the rows
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    fn header_label(&self, column: &Column<R>) -> String {
        let marker = match self.sort {
            Some(sort) if sort.key() == Some(column.key) => match sort.direction() {
                SortDirection::Asc => " ↑",
                SortDirection::Desc => " ↓",
            },
            _ => "",
        };
        format!("{}{}", column.title, marker)
    }

    /// Render to text
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(error) = self.error {
            out.push_str("Error: ");
            out.push_str(error);
            out.push('\n');
        }

        let header: Vec<String> = self.columns.iter().map(|c| self.header_label(c)).collect();
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| self.columns.iter().map(|c| c.render_cell(row)).collect())
            .collect();

        let widths: Vec<usize> = (0..self.columns.len())
            .map(|i| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        out.push_str(&self.line(&header, &widths));
        let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_width));
        out.push('\n');

        if cells.is_empty() {
            let message = if self.loading { "Loading..." } else { EMPTY_MESSAGE };
            out.push_str(message);
            out.push('\n');
        } else {
            for row in &cells {
                out.push_str(&self.line(row, &widths));
            }
        }

        if let Some(footer) = &self.footer {
            out.push_str(footer);
            out.push('\n');
        }

        out
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(cells.iter().zip(widths))
            .map(|(column, (cell, width))| {
                if column.is_right_aligned() {
                    format!("{:>width$}", cell, width = *width)
                } else {
                    format!("{:<width$}", cell, width = *width)
                }
            })
            .collect();
        let mut line = parts.join(COLUMN_GAP).trim_end().to_string();
        line.push('\n');
        line
    }
}

/// Render `rows` under `columns` with the default empty message
pub fn render_table<'a, R: TableRecord>(
    columns: &'a [Column<R>],
    rows: impl IntoIterator<Item = &'a R>,
) -> String {
    DataTable::new(columns).rows(rows).render()
}
