//! Shared fixtures: the scenario registry, display seed and rows.

use std::collections::HashMap;
use tabula_core::{ColumnRegistry, ColumnType, DisplayColumn, FilterableColumn};
use tabula_widgets::{CellValue, DataTable, TableRow};

/// `status` (selection: open, closed) and `owner` (text: alice, bob, carol).
#[must_use]
pub fn columns() -> Vec<FilterableColumn> {
    vec![
        FilterableColumn::new("status", "Status", ColumnType::Selection).values(["open", "closed"]),
        FilterableColumn::new("owner", "Owner", ColumnType::Text).values(["alice", "bob", "carol"]),
        FilterableColumn::new("file", "File", ColumnType::File),
        FilterableColumn::new("due", "Due Date", ColumnType::Date),
    ]
}

/// Registry over [`columns`].
#[must_use]
pub fn registry() -> ColumnRegistry {
    ColumnRegistry::new(columns())
}

/// Fixed `name`, then sortable `date` and `size`.
#[must_use]
pub fn display_columns() -> Vec<DisplayColumn> {
    vec![
        DisplayColumn::new("name", "Name").fixed(),
        DisplayColumn::new("date", "Date"),
        DisplayColumn::new("size", "Size"),
    ]
}

/// A plain map row.
#[must_use]
pub fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Every (status, owner) combination plus one row with no owner.
#[must_use]
pub fn rows() -> Vec<HashMap<String, String>> {
    let mut rows = Vec::new();
    for status in ["open", "closed"] {
        for owner in ["alice", "bob", "carol"] {
            rows.push(row(&[("status", status), ("owner", owner)]));
        }
    }
    rows.push(row(&[("status", "open")]));
    rows
}

/// [`rows`] as a `DataTable`, with a name and size per row.
#[must_use]
pub fn table() -> DataTable {
    DataTable::new().rows(rows().into_iter().enumerate().map(|(i, cells)| {
        let mut row = TableRow::new()
            .cell("name", format!("doc-{i}"))
            .cell("size", i32::try_from(i).unwrap_or(i32::MAX));
        for (k, v) in cells {
            row = row.cell(k, CellValue::Text(v));
        }
        row
    }))
}
