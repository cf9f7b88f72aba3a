//! Table manifest: the declarative description of a filterable table.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tabula_core::{
    ColumnRegistry, DisplayColumn, DisplayState, DragConfig, FilterState, FilterableColumn,
};

/// Table manifest loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableManifest {
    /// Columns that can be filtered
    #[serde(default)]
    pub columns: Vec<FilterableColumn>,
    /// Columns shown in the table, in their initial order
    #[serde(default)]
    pub display: Vec<DisplayColumn>,
    /// Drag-and-drop settings
    #[serde(default)]
    pub drag: DragConfig,
}

impl TableManifest {
    /// Parse and validate a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails [`Self::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        tracing::debug!(
            columns = manifest.columns.len(),
            display = manifest.display.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check ids and drag settings.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty id, an id repeated within
    /// `columns` or `display`, or a negative or non-finite activation distance.
    pub fn validate(&self) -> Result<(), ParseError> {
        check_ids("columns", self.columns.iter().map(|c| c.id.as_str()))?;
        check_ids("display", self.display.iter().map(|c| c.id.as_str()))?;

        let distance = self.drag.activation_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(ParseError::InvalidValue {
                field: "drag.activation_distance".to_string(),
                message: format!("must be a finite, non-negative number, got {distance}"),
            });
        }
        Ok(())
    }

    /// Column registry for the filter engine.
    #[must_use]
    pub fn registry(&self) -> ColumnRegistry {
        ColumnRegistry::new(self.columns.iter().cloned())
    }

    /// Fresh filter state over [`Self::registry`].
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.registry())
    }

    /// Initial display state; fixed columns are moved to the front.
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        DisplayState::new(self.display.iter().cloned())
    }
}

fn check_ids<'a>(list: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<(), ParseError> {
    let mut seen = HashSet::new();
    for (i, id) in ids.enumerate() {
        if id.is_empty() {
            return Err(ParseError::MissingField(format!("{list}[{i}].id")));
        }
        if !seen.insert(id) {
            return Err(ParseError::DuplicateColumn {
                list,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
