//! Local Table Engine
//!
//! Searchable, sortable view over an in-memory collection. No network involvement:
//! the visible rows are recomputed from the full record set on every change.

use super::column::Column;
use super::data_table::DataTable;
use super::record::TableRecord;
use super::sort::SortState;

/// Filter and sort `records` into a new ordered view.
///
/// With a non-empty `search_term` and at least one search key, keeps records where any
/// search key's case-folded display text contains the case-folded term. With an active
/// sort key, stable-sorts by that field; descending reverses the comparison, so ties keep
/// their prior relative order either way. The input is never mutated.
pub fn compute_view<'a, R: TableRecord>(
    records: &'a [R],
    search_term: &str,
    sort: &SortState<R::Field>,
    search_keys: &[R::Field],
) -> Vec<&'a R> {
    let mut rows: Vec<&R> = if search_term.is_empty() || search_keys.is_empty() {
        records.iter().collect()
    } else {
        let needle = search_term.to_lowercase();
        records
            .iter()
            .filter(|record| {
                search_keys
                    .iter()
                    .any(|key| record.cell(*key).search_text().contains(&needle))
            })
            .collect()
    };

    if let Some(key) = sort.key() {
        let direction = sort.direction();
        rows.sort_by(|a, b| direction.apply(a.cell(key).cmp(&b.cell(key))));
    }

    rows
}

/// Local table: column schema plus search and sort state
pub struct LocalTable<R: TableRecord> {
    columns: Vec<Column<R>>,
    search_keys: Vec<R::Field>,
    search_term: String,
    sort: SortState<R::Field>,
}

impl<R: TableRecord> LocalTable<R> {
    /// Create a table with no search and no sort
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            search_keys: Vec::new(),
            search_term: String::new(),
            sort: SortState::none(),
        }
    }

    /// Search on a single field
    pub fn with_search_key(self, key: R::Field) -> Self {
        self.with_search_keys([key])
    }

    /// Search on several fields (a record matches if any of them matches)
    pub fn with_search_keys(mut self, keys: impl IntoIterator<Item = R::Field>) -> Self {
        self.search_keys = keys.into_iter().collect();
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> &SortState<R::Field> {
        &self.sort
    }

    /// Replace the active search string
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Toggle sort on `key`.
    ///
    /// A key bound to a column declared non-sortable is ignored.
    pub fn set_sort(&mut self, key: R::Field) {
        if self.columns.iter().any(|c| c.key == key && !c.sortable) {
            tracing::debug!(?key, "Ignoring sort on non-sortable column");
            return;
        }
        self.sort.toggle(key);
    }

    /// Rows to display for `records` under the current search and sort
    pub fn view<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        compute_view(records, &self.search_term, &self.sort, &self.search_keys)
    }

    /// Text rendering of [`LocalTable::view`]
    pub fn render(&self, records: &[R]) -> String {
        DataTable::new(&self.columns)
            .rows(self.view(records))
            .sorted_by(self.sort)
            .render()
    }
}
