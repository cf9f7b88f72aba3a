//! Column display order and visibility.
//!
//! The ordered column list is split into a fixed partition, always first and
//! never reordered, followed by a sortable partition that reordering permutes.
//! Visibility toggles never move a column.

use crate::error::DisplayError;
use crate::state::State;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const fn default_visible() -> bool {
    true
}

/// A column as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColumn {
    /// Column id
    pub id: String,
    /// Display label
    pub header: String,
    /// Whether the column is shown
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Whether the column is pinned ahead of the sortable columns
    #[serde(default)]
    pub fixed: bool,
}

impl DisplayColumn {
    /// Create a visible, sortable column.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            visible: true,
            fixed: false,
        }
    }

    /// Pin the column.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Set visibility.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Ordered display columns: fixed partition followed by sortable partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DisplayColumn>", into = "Vec<DisplayColumn>")]
pub struct DisplayOrder {
    columns: Vec<DisplayColumn>,
}

impl DisplayOrder {
    /// Create from a seed list.
    ///
    /// Fixed columns are moved ahead of sortable ones (stable within each
    /// partition) and repeated ids are dropped after their first occurrence.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = DisplayColumn>) -> Self {
        let mut seen = HashSet::new();
        let (fixed, sortable): (Vec<_>, Vec<_>) = columns
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.id.clone());
                if !fresh {
                    tracing::debug!(column_id = %c.id, "duplicate display column ignored");
                }
                fresh
            })
            .partition(|c| c.fixed);

        let mut columns = fixed;
        columns.extend(sortable);
        Self { columns }
    }

    /// All columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[DisplayColumn] {
        &self.columns
    }

    /// Look up a column.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DisplayColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Position of a column in the full list.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &DisplayColumn> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Fixed column ids in order.
    #[must_use]
    pub fn fixed_ids(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.fixed)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Sortable column ids in order.
    #[must_use]
    pub fn sortable_ids(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.fixed)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Whether `id` names a sortable column.
    #[must_use]
    pub fn is_sortable(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| !c.fixed)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Flip a column's visibility. Returns `false` for an unknown id.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        match self.try_toggle_visibility(id) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "visibility toggle rejected");
                false
            }
        }
    }

    fn try_toggle_visibility(&mut self, id: &str) -> Result<(), DisplayError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DisplayError::UnknownColumn(id.to_string()))?;
        column.visible = !column.visible;
        Ok(())
    }

    /// Check that `order` is a permutation of the current sortable ids.
    pub fn validate_permutation<S: AsRef<str>>(&self, order: &[S]) -> Result<(), DisplayError> {
        let sortable = self.sortable_ids();
        if order.len() != sortable.len() {
            return Err(DisplayError::LengthMismatch {
                expected: sortable.len(),
                actual: order.len(),
            });
        }

        let mut seen = HashSet::new();
        for id in order {
            let id = id.as_ref();
            if !sortable.iter().any(|s| s == id) {
                return Err(DisplayError::NotSortable(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(DisplayError::DuplicateColumn(id.to_string()));
            }
        }
        Ok(())
    }

    /// Replace the sortable partition with `order`.
    ///
    /// Returns `false`, leaving the order untouched, when `order` is not a
    /// permutation of the current sortable ids.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> bool {
        if let Err(err) = self.validate_permutation(order) {
            tracing::debug!(%err, "reorder rejected");
            return false;
        }

        let (fixed, mut sortable): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.columns).into_iter().partition(|c| c.fixed);

        let mut columns = fixed;
        for id in order {
            // validated above: every id is present exactly once
            if let Some(index) = sortable.iter().position(|c| c.id == id.as_ref()) {
                columns.push(sortable.swap_remove(index));
            }
        }
        self.columns = columns;
        true
    }
}

impl From<Vec<DisplayColumn>> for DisplayOrder {
    fn from(columns: Vec<DisplayColumn>) -> Self {
        Self::new(columns)
    }
}

impl From<DisplayOrder> for Vec<DisplayColumn> {
    fn from(order: DisplayOrder) -> Self {
        order.columns
    }
}

/// Messages accepted by [`DisplayState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMessage {
    /// Flip a column's visibility.
    ToggleVisibility(String),
    /// Replace the sortable partition order.
    Reorder(Vec<String>),
}

/// Effects emitted by [`DisplayState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEffect {
    /// A column's visibility flipped.
    VisibilityToggled(String),
    /// The column order changed; carries the full new list.
    ColumnsReordered(Vec<DisplayColumn>),
}

/// Display configuration state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    order: DisplayOrder,
}

impl DisplayState {
    /// Create from seed columns.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = DisplayColumn>) -> Self {
        Self {
            order: DisplayOrder::new(columns),
        }
    }

    /// Current order.
    #[must_use]
    pub const fn order(&self) -> &DisplayOrder {
        &self.order
    }
}

impl State for DisplayState {
    type Message = DisplayMessage;
    type Effect = DisplayEffect;

    fn update(&mut self, msg: DisplayMessage) -> Vec<DisplayEffect> {
        match msg {
            DisplayMessage::ToggleVisibility(id) => {
                if self.order.toggle_visibility(&id) {
                    tracing::trace!(column_id = %id, "visibility toggled");
                    vec![DisplayEffect::VisibilityToggled(id)]
                } else {
                    Vec::new()
                }
            }
            DisplayMessage::Reorder(order) => {
                let before = self.order.sortable_ids();
                if before == order || !self.order.reorder(&order) {
                    return Vec::new();
                }
                tracing::trace!(?order, "columns reordered");
                vec![DisplayEffect::ColumnsReordered(self.order.columns().to_vec())]
            }
        }
    }
}
