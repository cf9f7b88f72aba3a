//! Error types for manifest loading.

use thiserror::Error;

/// Error type for manifest parsing and validation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A column id appears twice in one list
    #[error("duplicate column '{id}' in {list}")]
    DuplicateColumn {
        /// Which list (`columns` or `display`)
        list: &'static str,
        /// Repeated id
        id: String,
    },
    /// Invalid value
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(String),
}
