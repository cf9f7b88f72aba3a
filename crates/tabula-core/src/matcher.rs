//! Row matcher: applies an active filter set to rows.
//!
//! A row matches when it passes every filter (logical AND across columns).
//! An empty filter list matches every row.

use crate::filter::ActiveFilter;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to a row's per-column value.
pub trait Row {
    /// Value of the row for a column, if present.
    fn value(&self, column_id: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> Row for HashMap<String, String, S> {
    fn value(&self, column_id: &str) -> Option<Cow<'_, str>> {
        self.get(column_id).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Row for BTreeMap<String, String> {
    fn value(&self, column_id: &str) -> Option<Cow<'_, str>> {
        self.get(column_id).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn value(&self, column_id: &str) -> Option<Cow<'_, str>> {
        (**self).value(column_id)
    }
}

/// Whether `row` passes every filter.
pub fn matches<R: Row + ?Sized>(row: &R, filters: &[ActiveFilter]) -> bool {
    filters
        .iter()
        .all(|filter| filter.accepts(row.value(&filter.column_id).as_deref()))
}

/// Rows that pass every filter, in input order.
pub fn filter_rows<'a, R: Row>(rows: &'a [R], filters: &[ActiveFilter]) -> Vec<&'a R> {
    rows.iter().filter(|row| matches(*row, filters)).collect()
}

/// Indices of rows that pass every filter.
pub fn matching_indices<R: Row>(rows: &[R], filters: &[ActiveFilter]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| matches(*row, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnType, FilterableColumn};
    use crate::filter::FilterCondition;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn filter(id: &str, condition: FilterCondition, values: &[&str]) -> ActiveFilter {
        ActiveFilter::for_column(&FilterableColumn::new(id, id, ColumnType::Selection))
            .with_condition(condition)
            .with_values(values.iter().copied())
    }

    #[test]
    fn test_no_filters_matches_all() {
        assert!(matches(&row(&[("status", "open")]), &[]));
        assert!(matches(&row(&[]), &[]));
    }

    #[test]
    fn test_and_across_filters() {
        let filters = vec![
            filter("status", FilterCondition::IsAnyOf, &["open"]),
            filter("owner", FilterCondition::IsNoneOf, &["alice"]),
        ];
        assert!(matches(&row(&[("status", "open"), ("owner", "bob")]), &filters));
        assert!(!matches(&row(&[("status", "open"), ("owner", "alice")]), &filters));
        assert!(!matches(&row(&[("status", "closed"), ("owner", "bob")]), &filters));
    }

    #[test]
    fn test_missing_value() {
        let any = [filter("status", FilterCondition::IsAnyOf, &["open"])];
        let none = [filter("status", FilterCondition::IsNoneOf, &["open"])];
        let r = row(&[("owner", "bob")]);
        assert!(!matches(&r, &any));
        assert!(matches(&r, &none));
    }

    #[test]
    fn test_filter_rows_and_indices() {
        let rows = vec![
            row(&[("status", "open")]),
            row(&[("status", "closed")]),
            row(&[("status", "open")]),
        ];
        let filters = [filter("status", FilterCondition::IsAnyOf, &["open"])];
        assert_eq!(filter_rows(&rows, &filters).len(), 2);
        assert_eq!(matching_indices(&rows, &filters), vec![0, 2]);
    }

    #[test]
    fn test_btreemap_and_reference_rows() {
        let mut r = BTreeMap::new();
        r.insert("status".to_string(), "open".to_string());
        let filters = [filter("status", FilterCondition::IsAnyOf, &["open"])];
        assert!(matches(&r, &filters));
        assert!(matches(&&r, &filters));
    }
}
