//! Column Definition
//!
//! Defines table columns with their properties and cell renderers.

use super::record::{CellValue, FieldKey, TableRecord};

/// Cell renderer: must be pure, the same inputs always render the same text
pub type CellRenderer<R> = Box<dyn Fn(CellValue<'_>, &R) -> String + Send + Sync>;

/// Class hint that right-aligns a column
pub const ALIGN_RIGHT: &str = "text-right";

/// Column definition for the DataTable
pub struct Column<R: TableRecord> {
    /// Field shown in this column
    pub key: R::Field,
    /// Column header label
    pub title: String,
    /// Whether the column is sortable
    pub sortable: bool,
    /// Display hint (e.g. `text-right`)
    pub class_name: Option<String>,
    /// Optional cell renderer
    render: Option<CellRenderer<R>>,
}

impl<R: TableRecord> Column<R> {
    /// Create a new column
    pub fn new(key: R::Field, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            sortable: false,
            class_name: None,
            render: None,
        }
    }

    /// Make the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the display hint
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Right-align the column
    pub fn align_right(self) -> Self {
        self.class_name(ALIGN_RIGHT)
    }

    /// Set the cell renderer
    pub fn render(mut self, render: impl Fn(CellValue<'_>, &R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Whether the column is right-aligned
    pub fn is_right_aligned(&self) -> bool {
        self.class_name.as_deref() == Some(ALIGN_RIGHT)
    }

    /// Wire name of the column's field
    pub fn field_name(&self) -> &'static str {
        self.key.name()
    }

    /// Render a cell
    pub fn render_cell(&self, row: &R) -> String {
        let value = row.cell(self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => value.to_string(),
        }
    }
}

/// Wire names of the fields whose headers can be clicked to sort
pub fn sortable_field_names<R: TableRecord>(columns: &[Column<R>]) -> Vec<&'static str> {
    columns.iter().filter(|c| c.sortable).map(Column::field_name).collect()
}

impl<R: TableRecord> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("class_name", &self.class_name)
            .field("render", &self.render.is_some())
            .finish()
    }
}
