//! Active filters: committed per-column value constraints.

use crate::column::{ColumnType, FilterableColumn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a filter's value set constrains a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    /// Row value must be one of the selected values.
    #[default]
    IsAnyOf,
    /// Row value must not be any of the selected values.
    IsNoneOf,
}

impl FilterCondition {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IsAnyOf => "is any of",
            Self::IsNoneOf => "is none of",
        }
    }

    /// All conditions, in menu order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::IsAnyOf, Self::IsNoneOf]
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A committed filter on one column.
///
/// `column_header` and `column_type` are snapshots of the registry entry taken
/// when the filter was created or re-targeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilter {
    /// Filtered column id
    pub column_id: String,
    /// Snapshot of the column header
    pub column_header: String,
    /// Snapshot of the column type
    pub column_type: ColumnType,
    /// Match condition
    pub condition: FilterCondition,
    /// Selected values; empty means unconstrained
    pub values: Vec<String>,
}

impl ActiveFilter {
    /// Create an empty `is any of` filter for a column.
    #[must_use]
    pub fn for_column(column: &FilterableColumn) -> Self {
        Self {
            column_id: column.id.clone(),
            column_header: column.header.clone(),
            column_type: column.column_type,
            condition: FilterCondition::IsAnyOf,
            values: Vec::new(),
        }
    }

    /// Set the condition.
    #[must_use]
    pub const fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Set the selected values.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Copy header and type from a registry entry.
    pub(crate) fn snapshot(&mut self, column: &FilterableColumn) {
        self.column_id.clone_from(&column.id);
        self.column_header.clone_from(&column.header);
        self.column_type = column.column_type;
    }

    /// Whether `value` is selected.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Whether the filter has no selected values yet.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a row value passes this filter.
    ///
    /// A missing row value fails a non-empty `is any of` and passes `is none of`.
    #[must_use]
    pub fn accepts(&self, value: Option<&str>) -> bool {
        let selected = value.is_some_and(|v| self.contains(v));
        match self.condition {
            FilterCondition::IsAnyOf => self.values.is_empty() || selected,
            FilterCondition::IsNoneOf => !selected,
        }
    }
}

/// Insertion-ordered set of active filters, at most one per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    filters: Vec<ActiveFilter>,
}

impl ActiveFilterSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Filter for a column.
    #[must_use]
    pub fn get(&self, column_id: &str) -> Option<&ActiveFilter> {
        self.filters.iter().find(|f| f.column_id == column_id)
    }

    pub(crate) fn get_mut(&mut self, column_id: &str) -> Option<&mut ActiveFilter> {
        self.filters.iter_mut().find(|f| f.column_id == column_id)
    }

    /// Whether a filter exists for a column.
    #[must_use]
    pub fn contains(&self, column_id: &str) -> bool {
        self.get(column_id).is_some()
    }

    /// Position of a column's filter in creation order.
    #[must_use]
    pub fn position(&self, column_id: &str) -> Option<usize> {
        self.filters.iter().position(|f| f.column_id == column_id)
    }

    /// Append a filter. Callers guarantee the column is not already filtered.
    pub(crate) fn push(&mut self, filter: ActiveFilter) {
        debug_assert!(!self.contains(&filter.column_id));
        self.filters.push(filter);
    }

    pub(crate) fn remove(&mut self, column_id: &str) -> Option<ActiveFilter> {
        let index = self.position(column_id)?;
        Some(self.filters.remove(index))
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&mut ActiveFilter) -> bool) {
        self.filters.retain_mut(f);
    }

    pub(crate) fn clear(&mut self) {
        self.filters.clear();
    }

    /// Filtered column ids in creation order.
    #[must_use]
    pub fn column_ids(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.column_id.clone()).collect()
    }

    /// Iterate filters in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, ActiveFilter> {
        self.filters.iter()
    }

    /// Filters in creation order.
    #[must_use]
    pub fn as_slice(&self) -> &[ActiveFilter] {
        &self.filters
    }

    /// Owned snapshot of the filters.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ActiveFilter> {
        self.filters.clone()
    }

    /// Number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filters are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActiveFilterSet {
    type Item = &'a ActiveFilter;
    type IntoIter = std::slice::Iter<'a, ActiveFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flip membership of `value` in `current`.
///
/// Added values are placed by their position in `column`'s domain so a
/// double toggle restores the exact prior sequence. Values outside the domain
/// sort after domain values, in toggle order.
pub(crate) fn toggle_in(current: &[String], value: &str, column: &FilterableColumn) -> Vec<String> {
    if current.iter().any(|v| v == value) {
        return current.iter().filter(|v| *v != value).cloned().collect();
    }

    let rank = |v: &str| column.value_position(v).unwrap_or(usize::MAX);
    let new_rank = rank(value);
    let index = current
        .iter()
        .position(|v| rank(v) > new_rank)
        .unwrap_or(current.len());

    let mut next = current.to_vec();
    next.insert(index, value.to_string());
    next
}
