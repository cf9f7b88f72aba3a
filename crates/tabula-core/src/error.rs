//! Error types for rejected filter and display operations.
//!
//! Public operations never surface these to the host: a rejected operation
//! is logged and leaves state untouched. They exist so that validation reads
//! as ordinary `Result` code and so tests can assert why a message was absorbed.

use thiserror::Error;

/// Reasons a filter operation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Column id is not in the registry.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// No active filter exists for the column.
    #[error("no active filter for column: {0}")]
    NoFilter(String),

    /// Another filter already targets the column.
    #[error("column '{0}' already has an active filter")]
    ColumnAlreadyFiltered(String),

    /// Value is outside the column's declared domain.
    #[error("value '{value}' is not in the domain of column '{column_id}'")]
    ValueOutsideDomain { column_id: String, value: String },
}

/// Reasons a display operation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// Column id is not a display column.
    #[error("unknown display column: {0}")]
    UnknownColumn(String),

    /// Proposed order has the wrong number of columns.
    #[error("expected {expected} sortable columns, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Proposed order names a column outside the sortable partition.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    /// Proposed order names a column twice.
    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        let err = FilterError::UnknownColumn("owner".to_string());
        assert_eq!(err.to_string(), "unknown column: owner");

        let err = FilterError::ValueOutsideDomain {
            column_id: "status".to_string(),
            value: "pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "value 'pending' is not in the domain of column 'status'"
        );
    }

    #[test]
    fn test_display_error_display() {
        let err = DisplayError::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 2 sortable columns, got 3");
        assert!(DisplayError::NotSortable("name".to_string())
            .to_string()
            .contains("name"));
    }
}
