//! Filter state: column registry, active filter set and pending selections.
//!
//! Every message either changes state and yields a `FiltersChanged` snapshot
//! followed by `ColumnFiltered` for the columns it touched, or is absorbed with
//! no effects and the state left exactly as it was. A column change reports
//! only the column the filter moved to.

use crate::column::{ColumnRegistry, FilterableColumn};
use crate::error::FilterError;
use crate::filter::{toggle_in, ActiveFilter, ActiveFilterSet, FilterCondition};
use crate::selection::PendingSelection;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Messages accepted by [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMessage {
    /// Flip one value in a column's selection, creating the filter if needed.
    ToggleValue { column_id: String, value: String },
    /// Change the condition of an existing filter.
    SetCondition {
        column_id: String,
        condition: FilterCondition,
    },
    /// Delete a filter and its pending selection.
    RemoveFilter { column_id: String },
    /// Re-target a filter to another column, clearing its values.
    ChangeColumn { from: String, to: String },
    /// Swap the column registry.
    ReplaceColumns(ColumnRegistry),
    /// Delete every filter.
    ClearAll,
}

/// Effects emitted by [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEffect {
    /// Full ordered filter set after the change.
    FiltersChanged(Vec<ActiveFilter>),
    /// A column whose filter changed.
    ColumnFiltered(String),
}

/// Filter bar state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    registry: ColumnRegistry,
    filters: ActiveFilterSet,
    pending: PendingSelection,
}

impl FilterState {
    /// Create with a column registry and no filters.
    #[must_use]
    pub fn new(registry: ColumnRegistry) -> Self {
        Self {
            registry,
            filters: ActiveFilterSet::new(),
            pending: PendingSelection::new(),
        }
    }

    /// Column registry.
    #[must_use]
    pub const fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Active filters in creation order.
    #[must_use]
    pub const fn filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    /// Pending selection cache.
    #[must_use]
    pub const fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    /// Current selection for a column: the active filter's values when one
    /// exists, otherwise the pending selection.
    #[must_use]
    pub fn selection(&self, column_id: &str) -> &[String] {
        self.filters
            .get(column_id)
            .map(|f| f.values.as_slice())
            .or_else(|| self.pending.get(column_id))
            .unwrap_or(&[])
    }

    /// Whether `value` is currently selected for a column.
    #[must_use]
    pub fn is_selected(&self, column_id: &str, value: &str) -> bool {
        self.selection(column_id).iter().any(|v| v == value)
    }

    /// Columns without an active filter, in registry order.
    pub fn unfiltered_columns(&self) -> impl Iterator<Item = &FilterableColumn> {
        self.registry
            .iter()
            .filter(|c| !self.filters.contains(&c.id))
    }

    fn column(&self, column_id: &str) -> Result<&FilterableColumn, FilterError> {
        self.registry
            .get(column_id)
            .ok_or_else(|| FilterError::UnknownColumn(column_id.to_string()))
    }

    fn toggle_value(&mut self, column_id: &str, value: &str) -> Result<Vec<String>, FilterError> {
        let column = self.column(column_id)?;
        if column.has_domain() && !column.contains_value(value) {
            return Err(FilterError::ValueOutsideDomain {
                column_id: column_id.to_string(),
                value: value.to_string(),
            });
        }

        let next = toggle_in(self.selection(column_id), value, column);
        let created = ActiveFilter::for_column(column);

        self.pending.set(column_id, next.clone());
        if let Some(filter) = self.filters.get_mut(column_id) {
            filter.values = next;
        } else {
            self.filters.push(ActiveFilter { values: next, ..created });
        }
        Ok(vec![column_id.to_string()])
    }

    fn set_condition(
        &mut self,
        column_id: &str,
        condition: FilterCondition,
    ) -> Result<Vec<String>, FilterError> {
        let filter = self
            .filters
            .get_mut(column_id)
            .ok_or_else(|| FilterError::NoFilter(column_id.to_string()))?;
        filter.condition = condition;
        Ok(vec![column_id.to_string()])
    }

    fn remove_filter(&mut self, column_id: &str) -> Result<Vec<String>, FilterError> {
        self.filters
            .remove(column_id)
            .ok_or_else(|| FilterError::NoFilter(column_id.to_string()))?;
        self.pending.remove(column_id);
        Ok(vec![column_id.to_string()])
    }

    fn change_column(&mut self, from: &str, to: &str) -> Result<Vec<String>, FilterError> {
        let column = self.column(to)?.clone();
        if from != to && self.filters.contains(to) {
            return Err(FilterError::ColumnAlreadyFiltered(to.to_string()));
        }
        let mut filter = self
            .filters
            .remove(from)
            .ok_or_else(|| FilterError::NoFilter(from.to_string()))?;

        filter.snapshot(&column);
        filter.values.clear();
        self.filters.push(filter);
        self.pending.rekey(from, to);
        Ok(vec![to.to_string()])
    }

    fn replace_columns(&mut self, registry: ColumnRegistry) -> Vec<String> {
        let mut affected = Vec::new();
        self.filters.retain(|filter| match registry.get(&filter.column_id) {
            Some(column) => {
                let stale = prune_to_domain(&mut filter.values, column);
                if stale
                    || filter.column_header != column.header
                    || filter.column_type != column.column_type
                {
                    filter.snapshot(column);
                    affected.push(filter.column_id.clone());
                }
                true
            }
            None => {
                affected.push(filter.column_id.clone());
                false
            }
        });
        self.pending.retain(|id, values| match registry.get(id) {
            Some(column) => {
                prune_to_domain(values, column);
                true
            }
            None => false,
        });
        self.registry = registry;
        affected
    }

    fn clear_all(&mut self) -> Vec<String> {
        let affected = self.filters.column_ids();
        self.filters.clear();
        self.pending.clear();
        affected
    }

    fn apply(&mut self, msg: FilterMessage) -> Result<Vec<String>, FilterError> {
        match msg {
            FilterMessage::ToggleValue { column_id, value } => self.toggle_value(&column_id, &value),
            FilterMessage::SetCondition {
                column_id,
                condition,
            } => self.set_condition(&column_id, condition),
            FilterMessage::RemoveFilter { column_id } => self.remove_filter(&column_id),
            FilterMessage::ChangeColumn { from, to } => self.change_column(&from, &to),
            FilterMessage::ReplaceColumns(registry) => Ok(self.replace_columns(registry)),
            FilterMessage::ClearAll => Ok(self.clear_all()),
        }
    }
}

/// Drop values outside a non-empty domain. Returns `true` if any were dropped.
fn prune_to_domain(values: &mut Vec<String>, column: &FilterableColumn) -> bool {
    if !column.has_domain() {
        return false;
    }
    let before = values.len();
    values.retain(|v| column.contains_value(v));
    values.len() != before
}

impl State for FilterState {
    type Message = FilterMessage;
    type Effect = FilterEffect;

    fn update(&mut self, msg: FilterMessage) -> Vec<FilterEffect> {
        let before = (self.filters.clone(), self.pending.clone());

        let affected = match self.apply(msg) {
            Ok(affected) => affected,
            Err(err) => {
                tracing::debug!(%err, "filter message rejected");
                return Vec::new();
            }
        };

        if (&self.filters, &self.pending) == (&before.0, &before.1) {
            return Vec::new();
        }

        tracing::trace!(filters = self.filters.len(), ?affected, "filters changed");
        let mut effects = Vec::with_capacity(affected.len() + 1);
        effects.push(FilterEffect::FiltersChanged(self.filters.to_vec()));
        effects.extend(affected.into_iter().map(FilterEffect::ColumnFiltered));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            FilterableColumn::new("status", "Status", ColumnType::Selection)
                .values(["open", "closed"]),
            FilterableColumn::new("owner", "Owner", ColumnType::Text)
                .values(["alice", "bob"]),
            FilterableColumn::new("notes", "Notes", ColumnType::Text),
        ])
    }

    fn toggle(column_id: &str, value: &str) -> FilterMessage {
        FilterMessage::ToggleValue {
            column_id: column_id.to_string(),
            value: value.to_string(),
        }
    }

    fn change(from: &str, to: &str) -> FilterMessage {
        FilterMessage::ChangeColumn {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_first_toggle_creates_filter() {
        let mut state = FilterState::new(registry());
        let effects = state.update(toggle("status", "open"));

        let filter = state.filters().get("status").unwrap();
        assert_eq!(filter.condition, FilterCondition::IsAnyOf);
        assert_eq!(filter.values, vec!["open"]);
        assert_eq!(filter.column_header, "Status");
        assert_eq!(filter.column_type, ColumnType::Selection);
        assert_eq!(state.pending().get("status"), Some(&["open".to_string()][..]));

        assert_eq!(
            effects,
            vec![
                FilterEffect::FiltersChanged(state.filters().to_vec()),
                FilterEffect::ColumnFiltered("status".to_string()),
            ]
        );
    }

    #[test]
    fn test_double_toggle_restores_values() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "closed"));
        let values = state.selection("status").to_vec();

        state.update(toggle("status", "open"));
        state.update(toggle("status", "open"));
        assert_eq!(state.selection("status"), values.as_slice());
    }

    #[test]
    fn test_toggle_unknown_column_is_noop() {
        let mut state = FilterState::new(registry());
        let before = state.clone();
        assert!(state.update(toggle("ghost", "x")).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_value_outside_domain_is_noop() {
        let mut state = FilterState::new(registry());
        let before = state.clone();
        assert!(state.update(toggle("status", "archived")).is_empty());
        assert_eq!(state, before);
        assert_eq!(
            state.clone().apply(toggle("status", "archived")),
            Err(FilterError::ValueOutsideDomain {
                column_id: "status".to_string(),
                value: "archived".to_string()
            })
        );
    }

    #[test]
    fn test_toggle_free_form_column() {
        let mut state = FilterState::new(registry());
        state.update(toggle("notes", "urgent"));
        assert!(state.is_selected("notes", "urgent"));
    }

    #[test]
    fn test_set_condition() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        let effects = state.update(FilterMessage::SetCondition {
            column_id: "status".to_string(),
            condition: FilterCondition::IsNoneOf,
        });
        assert_eq!(effects.len(), 2);
        assert_eq!(
            state.filters().get("status").map(|f| f.condition),
            Some(FilterCondition::IsNoneOf)
        );

        // same condition again: nothing changes, nothing emitted
        assert!(state
            .update(FilterMessage::SetCondition {
                column_id: "status".to_string(),
                condition: FilterCondition::IsNoneOf,
            })
            .is_empty());
    }

    #[test]
    fn test_set_condition_without_filter_is_noop() {
        let mut state = FilterState::new(registry());
        let before = state.clone();
        assert!(state
            .update(FilterMessage::SetCondition {
                column_id: "status".to_string(),
                condition: FilterCondition::IsNoneOf,
            })
            .is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_filter() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        let effects = state.update(FilterMessage::RemoveFilter {
            column_id: "status".to_string(),
        });
        assert_eq!(effects[0], FilterEffect::FiltersChanged(Vec::new()));
        assert!(state.filters().is_empty());
        assert!(!state.pending().contains("status"));

        assert!(state
            .update(FilterMessage::RemoveFilter {
                column_id: "status".to_string(),
            })
            .is_empty());
    }

    #[test]
    fn test_condition_and_values_edits_keep_order() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(toggle("owner", "bob"));
        state.update(toggle("status", "closed"));
        state.update(FilterMessage::SetCondition {
            column_id: "status".to_string(),
            condition: FilterCondition::IsNoneOf,
        });
        assert_eq!(state.filters().column_ids(), vec!["status", "owner"]);
    }

    #[test]
    fn test_change_column_resets_and_moves_to_end() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(toggle("owner", "bob"));
        state.update(FilterMessage::SetCondition {
            column_id: "status".to_string(),
            condition: FilterCondition::IsNoneOf,
        });

        let effects = state.update(change("status", "notes"));
        assert_eq!(effects.last(), Some(&FilterEffect::ColumnFiltered("notes".to_string())));

        assert_eq!(state.filters().column_ids(), vec!["owner", "notes"]);
        let filter = state.filters().get("notes").unwrap();
        assert!(filter.values.is_empty());
        assert_eq!(filter.column_header, "Notes");
        assert_eq!(filter.column_type, ColumnType::Text);
        assert_eq!(filter.condition, FilterCondition::IsNoneOf);

        assert!(!state.pending().contains("status"));
        assert_eq!(state.pending().get("notes"), Some(&[][..]));
    }

    #[test]
    fn test_change_column_rejections() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(toggle("owner", "bob"));
        let before = state.clone();

        assert!(state.update(change("status", "ghost")).is_empty());
        assert!(state.update(change("status", "owner")).is_empty());
        assert!(state.update(change("notes", "status")).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_change_column_to_itself_clears_values() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(change("status", "status"));
        assert!(state.selection("status").is_empty());
        assert!(state.filters().contains("status"));
    }

    #[test]
    fn test_selection_prefers_active_filter() {
        let mut state = FilterState::new(registry());
        state.pending.set("owner", vec!["alice".to_string()]);
        assert_eq!(state.selection("owner"), &["alice".to_string()]);

        state.update(toggle("owner", "bob"));
        assert_eq!(state.selection("owner"), &["alice".to_string(), "bob".to_string()]);
        assert_eq!(state.selection("ghost"), &[] as &[String]);
    }

    #[test]
    fn test_unfiltered_columns() {
        let mut state = FilterState::new(registry());
        state.update(toggle("owner", "bob"));
        let ids: Vec<_> = state.unfiltered_columns().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["status", "notes"]);
    }

    #[test]
    fn test_clear_all() {
        let mut state = FilterState::new(registry());
        assert!(state.update(FilterMessage::ClearAll).is_empty());

        state.update(toggle("status", "open"));
        state.update(toggle("owner", "bob"));
        let effects = state.update(FilterMessage::ClearAll);
        assert_eq!(
            effects,
            vec![
                FilterEffect::FiltersChanged(Vec::new()),
                FilterEffect::ColumnFiltered("status".to_string()),
                FilterEffect::ColumnFiltered("owner".to_string()),
            ]
        );
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_replace_columns_refreshes_and_drops() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(toggle("owner", "bob"));

        let renamed = ColumnRegistry::new(vec![FilterableColumn::new(
            "status",
            "State",
            ColumnType::Selection,
        )
        .values(["open", "closed"])]);
        let effects = state.update(FilterMessage::ReplaceColumns(renamed));

        assert_eq!(state.filters().column_ids(), vec!["status"]);
        assert_eq!(
            state.filters().get("status").map(|f| f.column_header.as_str()),
            Some("State")
        );
        assert_eq!(state.selection("status"), &["open".to_string()]);
        assert!(!state.pending().contains("owner"));
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn test_replace_columns_prunes_values_outside_new_domain() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        state.update(toggle("status", "closed"));

        let narrowed = ColumnRegistry::new(vec![
            FilterableColumn::new("status", "Status", ColumnType::Selection).values(["closed"]),
            FilterableColumn::new("owner", "Owner", ColumnType::Text).values(["alice", "bob"]),
        ]);
        let effects = state.update(FilterMessage::ReplaceColumns(narrowed));
        assert_eq!(effects.last(), Some(&FilterEffect::ColumnFiltered("status".to_string())));
        assert_eq!(state.selection("status"), &["closed".to_string()]);
        assert_eq!(state.pending().get("status"), Some(&["closed".to_string()][..]));

        // the remaining value can still be deselected
        assert_eq!(state.update(toggle("status", "closed")).len(), 2);
        assert!(state.selection("status").is_empty());
    }

    #[test]
    fn test_replace_columns_prunes_pending_only_entries() {
        let mut state = FilterState::new(registry());
        state.pending.set("owner", vec!["alice".to_string(), "bob".to_string()]);
        let narrowed = ColumnRegistry::new(vec![
            FilterableColumn::new("owner", "Owner", ColumnType::Text).values(["bob"]),
        ]);
        state.update(FilterMessage::ReplaceColumns(narrowed));
        assert_eq!(state.selection("owner"), &["bob".to_string()]);
    }

    #[test]
    fn test_replace_columns_without_filter_changes_is_silent() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        assert!(state.update(FilterMessage::ReplaceColumns(registry())).is_empty());
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let mut state = FilterState::new(registry());
        state.update(toggle("status", "open"));
        let json = serde_json::to_string(&state).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
