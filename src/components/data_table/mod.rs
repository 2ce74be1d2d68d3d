//! DataTable Component
//!
//! A reusable table with two engines: [`LocalTable`] filters and sorts an in-memory
//! collection, [`RemoteTableView`] drives a server-paginated one.

pub mod column;
pub mod data_provider;
pub mod data_table;
pub mod local;
pub mod pagination;
pub mod record;
pub mod remote;
pub mod sort;
pub mod view;

pub use column::{ALIGN_RIGHT, CellRenderer, Column, sortable_field_names};
pub use data_provider::{DataSource, Page, PageRequest};
pub use data_table::{DataTable, render_table};
pub use local::{LocalTable, compute_view};
pub use pagination::{Pagination, last_valid_page, total_pages};
pub use record::{CellValue, FieldKey, IntoCell, TableRecord};
pub use remote::{DateScope, RemoteTable, SortPagePolicy};
pub use sort::{SortDirection, SortState};
pub use view::{RemoteTableView, TableInteractions, TableSnapshot};
