//! Column registry: the externally supplied description of filterable columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of data a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// File reference
    File,
    /// Free text
    Text,
    /// One of a fixed set of options
    Selection,
    /// Calendar date
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Text => "text",
            Self::Selection => "selection",
            Self::Date => "date",
        };
        write!(f, "{s}")
    }
}

/// A column the user can filter on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterableColumn {
    /// Unique column id
    pub id: String,
    /// Display label
    pub header: String,
    /// Column data type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Value domain, in presentation order (may be empty)
    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterableColumn {
    /// Create a new column without a value domain.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            column_type,
            values: Vec::new(),
        }
    }

    /// Set the value domain.
    #[must_use]
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the column declares a value domain.
    #[must_use]
    pub fn has_domain(&self) -> bool {
        !self.values.is_empty()
    }

    /// Whether `value` is part of the declared domain.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Position of `value` in the declared domain.
    #[must_use]
    pub fn value_position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Ordered, read-only set of filterable columns keyed by id.
///
/// Ids are unique: when constructed from a list with repeated ids, the first
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FilterableColumn>", into = "Vec<FilterableColumn>")]
pub struct ColumnRegistry {
    columns: Vec<FilterableColumn>,
}

impl ColumnRegistry {
    /// Create a registry from a column list.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = FilterableColumn>) -> Self {
        let mut unique: Vec<FilterableColumn> = Vec::new();
        for column in columns {
            if unique.iter().any(|c| c.id == column.id) {
                tracing::debug!(column_id = %column.id, "duplicate column id ignored");
                continue;
            }
            unique.push(column);
        }
        Self { columns: unique }
    }

    /// Look up a column by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FilterableColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Whether a column with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate columns in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterableColumn> {
        self.columns.iter()
    }

    /// All columns in registry order.
    #[must_use]
    pub fn as_slice(&self) -> &[FilterableColumn] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Vec<FilterableColumn>> for ColumnRegistry {
    fn from(columns: Vec<FilterableColumn>) -> Self {
        Self::new(columns)
    }
}

impl From<ColumnRegistry> for Vec<FilterableColumn> {
    fn from(registry: ColumnRegistry) -> Self {
        registry.columns
    }
}

impl FromIterator<FilterableColumn> for ColumnRegistry {
    fn from_iter<T: IntoIterator<Item = FilterableColumn>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a ColumnRegistry {
    type Item = &'a FilterableColumn;
    type IntoIter = std::slice::Iter<'a, FilterableColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
