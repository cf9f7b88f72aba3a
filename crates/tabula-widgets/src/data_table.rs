//! `DataTable`: rows projected through active filters and display order.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tabula_core::{filter_rows, ActiveFilter, DisplayOrder, Row};

/// A cell value in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Empty cell
    Empty,
}

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        self.as_text().map(Cow::into_owned).unwrap_or_default()
    }

    /// Text used for filtering; `None` for empty cells.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Number(n) => Some(Cow::Owned(format!("{n}"))),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "Yes" } else { "No" })),
            Self::Empty => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A row of data keyed by column id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell values by column id
    pub cells: HashMap<String, CellValue>,
}

impl TableRow {
    /// Create a new empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }
}

impl Row for TableRow {
    fn value(&self, column_id: &str) -> Option<Cow<'_, str>> {
        self.cells.get(column_id).and_then(CellValue::as_text)
    }
}

/// Rendered projection of a table: visible columns in display order and the
/// rows that pass every filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Visible column ids, in display order
    pub column_ids: Vec<String>,
    /// Headers for `column_ids`
    pub headers: Vec<String>,
    /// Cell text per matching row
    pub rows: Vec<Vec<String>>,
    /// Row count before filtering
    pub total_rows: usize,
}

impl TableView {
    /// Number of rows shown.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Row store for a filtered table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    rows: Vec<TableRow>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row.
    #[must_use]
    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Add multiple rows.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// All rows.
    #[must_use]
    pub fn get_rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Row count before filtering.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows passing every filter, in insertion order.
    #[must_use]
    pub fn matching_rows(&self, filters: &[ActiveFilter]) -> Vec<&TableRow> {
        filter_rows(&self.rows, filters)
    }

    /// Project the table through filters and display order.
    #[must_use]
    pub fn view(&self, filters: &[ActiveFilter], order: &DisplayOrder) -> TableView {
        let visible: Vec<_> = order.visible_columns().collect();
        let rows = self
            .matching_rows(filters)
            .into_iter()
            .map(|row| {
                visible
                    .iter()
                    .map(|c| row.get(&c.id).map(CellValue::display).unwrap_or_default())
                    .collect()
            })
            .collect();

        TableView {
            column_ids: visible.iter().map(|c| c.id.clone()).collect(),
            headers: visible.iter().map(|c| c.header.clone()).collect(),
            rows,
            total_rows: self.rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::{ColumnType, DisplayColumn, FilterCondition, FilterableColumn};

    fn status() -> FilterableColumn {
        FilterableColumn::new("status", "Status", ColumnType::Selection).values(["open", "closed"])
    }

    fn table() -> DataTable {
        DataTable::new().rows([
            TableRow::new().cell("name", "a").cell("status", "open").cell("size", 3),
            TableRow::new().cell("name", "b").cell("status", "closed").cell("size", 1.5),
            TableRow::new().cell("name", "c").cell("status", CellValue::Empty),
        ])
    }

    fn order() -> DisplayOrder {
        DisplayOrder::new(vec![
            DisplayColumn::new("name", "Name").fixed(),
            DisplayColumn::new("status", "Status"),
            DisplayColumn::new("size", "Size"),
        ])
    }

    // ===== CellValue Tests =====

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from("x").display(), "x");
        assert_eq!(CellValue::from(2).display(), "2");
        assert_eq!(CellValue::from(1.5).display(), "1.5");
        assert_eq!(CellValue::from(true).display(), "Yes");
        assert_eq!(CellValue::Empty.display(), "");
        assert!(CellValue::Empty.as_text().is_none());
    }

    #[test]
    fn test_empty_cell_is_missing_value() {
        let row = TableRow::new().cell("status", CellValue::Empty);
        assert!(row.value("status").is_none());
        assert!(row.value("other").is_none());
        assert_eq!(
            TableRow::new().cell("status", "open").value("status").as_deref(),
            Some("open")
        );
    }

    // ===== Filtering Tests =====

    #[test]
    fn test_matching_rows() {
        let table = table();
        assert_eq!(table.matching_rows(&[]).len(), 3);

        let any_open = ActiveFilter::for_column(&status()).with_values(["open"]);
        let names: Vec<_> = table
            .matching_rows(&[any_open])
            .iter()
            .map(|r| r.get("name").map(CellValue::display).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["a"]);

        // missing value passes an exclusion filter
        let none_open = ActiveFilter::for_column(&status())
            .with_condition(FilterCondition::IsNoneOf)
            .with_values(["open"]);
        assert_eq!(table.matching_rows(&[none_open]).len(), 2);
    }

    // ===== View Tests =====

    #[test]
    fn test_view_follows_display_order() {
        let mut order = order();
        order.reorder(&["size", "status"]);
        order.toggle_visibility("status");

        let view = table().view(&[], &order);
        assert_eq!(view.column_ids, vec!["name", "size"]);
        assert_eq!(view.headers, vec!["Name", "Size"]);
        assert_eq!(view.rows[0], vec!["a", "3"]);
        assert_eq!(view.rows[2], vec!["c", ""]);
        assert_eq!(view.total_rows, 3);
    }

    #[test]
    fn test_view_applies_filters() {
        let filter = ActiveFilter::for_column(&status()).with_values(["closed"]);
        let view = table().view(&[filter], &order());
        assert_eq!(view.row_count(), 1);
        assert_eq!(view.rows[0], vec!["b", "closed", "1.5"]);
        assert_eq!(view.total_rows, 3);
    }
}
