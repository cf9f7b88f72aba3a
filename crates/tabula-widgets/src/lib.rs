//! Stateful controllers for Tabula's filter bar, table toolbar and table.

pub mod data_table;
pub mod filter_bar;
pub mod toolbar;

pub use data_table::{CellValue, DataTable, TableRow, TableView};
pub use filter_bar::{FilterBar, FilterMenu};
pub use toolbar::{DragPreview, TableToolbar};
