//! `FilterBar` controller: filter menus on top of the filter state engine.
//!
//! The bar owns the open/closed state of its menus and their search queries
//! as plain data; filter changes go through a [`Store`] so that host callbacks
//! receive one snapshot per change.

use serde::{Deserialize, Serialize};
use tabula_core::{
    search_columns, search_values, ActiveFilter, ActiveFilterSet, ColumnRegistry, FilterCondition,
    FilterEffect, FilterMessage, FilterState, FilterableColumn, SearchResult, Store,
};

/// Which filter menu is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMenu {
    /// No menu open.
    #[default]
    Closed,
    /// Choosing a column, either for a new filter or to re-target `retarget`.
    ColumnPicker {
        /// Header search query
        query: String,
        /// Filter being moved to another column
        retarget: Option<String>,
    },
    /// Choosing values for a column.
    ValuePicker {
        /// Column whose values are listed
        column_id: String,
        /// Value search query
        query: String,
    },
}

impl FilterMenu {
    /// Whether any menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Current search query, if a menu is open.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::ColumnPicker { query, .. } | Self::ValuePicker { query, .. } => {
                Some(query.as_str())
            }
        }
    }
}

/// Filter bar over a fixed column registry.
pub struct FilterBar {
    store: Store<FilterState>,
    menu: FilterMenu,
}

impl FilterBar {
    /// Create a filter bar for the given columns.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = FilterableColumn>) -> Self {
        Self::with_registry(ColumnRegistry::new(columns))
    }

    /// Create a filter bar from an existing registry.
    #[must_use]
    pub fn with_registry(registry: ColumnRegistry) -> Self {
        Self {
            store: Store::new(FilterState::new(registry)),
            menu: FilterMenu::Closed,
        }
    }

    /// Call `callback` with the full filter list after every change.
    #[must_use]
    pub fn on_filters_change<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&[ActiveFilter]) + 'static,
    {
        self.store.subscribe(move |effect| {
            if let FilterEffect::FiltersChanged(filters) = effect {
                callback(filters);
            }
        });
        self
    }

    /// Call `callback` with the id of each column whose filter changed.
    #[must_use]
    pub fn on_column_filter<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.store.subscribe(move |effect| {
            if let FilterEffect::ColumnFiltered(column_id) = effect {
                callback(column_id);
            }
        });
        self
    }

    /// Underlying filter state.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        self.store.state()
    }

    /// Active filters in creation order.
    #[must_use]
    pub const fn filters(&self) -> &ActiveFilterSet {
        self.store.state().filters()
    }

    /// Current menu.
    #[must_use]
    pub const fn menu(&self) -> &FilterMenu {
        &self.menu
    }

    /// Whether a value is selected for a column.
    #[must_use]
    pub fn is_selected(&self, column_id: &str, value: &str) -> bool {
        self.state().is_selected(column_id, value)
    }

    // =========================================================================
    // Menu navigation
    // =========================================================================

    /// Open the column picker to add a filter.
    pub fn open_add_filter(&mut self) {
        self.menu = FilterMenu::ColumnPicker {
            query: String::new(),
            retarget: None,
        };
    }

    /// Open the column picker to move an existing filter to another column.
    pub fn open_change_column(&mut self, column_id: &str) -> bool {
        if !self.filters().contains(column_id) {
            tracing::debug!(column_id, "no filter to re-target");
            return false;
        }
        self.menu = FilterMenu::ColumnPicker {
            query: String::new(),
            retarget: Some(column_id.to_string()),
        };
        true
    }

    /// Open the value picker for a column.
    pub fn open_values(&mut self, column_id: &str) -> bool {
        if !self.state().registry().contains(column_id) {
            tracing::debug!(column_id, "value picker for unknown column");
            return false;
        }
        self.menu = FilterMenu::ValuePicker {
            column_id: column_id.to_string(),
            query: String::new(),
        };
        true
    }

    /// Close any open menu.
    pub fn close_menu(&mut self) {
        self.menu = FilterMenu::Closed;
    }

    /// Update the open menu's search query.
    pub fn set_query(&mut self, text: &str) {
        match &mut self.menu {
            FilterMenu::Closed => {}
            FilterMenu::ColumnPicker { query, .. } | FilterMenu::ValuePicker { query, .. } => {
                text.clone_into(query);
            }
        }
    }

    /// Columns offered by the column picker, narrowed by its query.
    ///
    /// Already-filtered columns are excluded, except the one being re-targeted.
    #[must_use]
    pub fn column_options(&self) -> SearchResult<&FilterableColumn> {
        let FilterMenu::ColumnPicker { query, retarget } = &self.menu else {
            return SearchResult::NoResults;
        };
        let state = self.state();
        let candidates = state.registry().iter().filter(|c| {
            !state.filters().contains(&c.id) || retarget.as_deref() == Some(c.id.as_str())
        });
        search_columns(candidates, query)
    }

    /// Values offered by the value picker, narrowed by its query.
    #[must_use]
    pub fn value_options(&self) -> SearchResult<&str> {
        let FilterMenu::ValuePicker { column_id, query } = &self.menu else {
            return SearchResult::NoResults;
        };
        self.state()
            .registry()
            .get(column_id)
            .map_or(SearchResult::NoResults, |c| search_values(&c.values, query))
    }

    /// Choose a column in the column picker.
    ///
    /// Adding opens the value picker for the column; re-targeting moves the
    /// filter first. Returns `false` if the choice was rejected.
    pub fn pick_column(&mut self, column_id: &str) -> bool {
        let FilterMenu::ColumnPicker { retarget, .. } = &self.menu else {
            return false;
        };
        match retarget.clone() {
            Some(from) => {
                let changed = self.dispatch(FilterMessage::ChangeColumn {
                    from,
                    to: column_id.to_string(),
                });
                if changed || self.filters().contains(column_id) {
                    self.open_values(column_id)
                } else {
                    false
                }
            }
            None => {
                if self.filters().contains(column_id) {
                    tracing::debug!(column_id, "column already filtered");
                    return false;
                }
                self.open_values(column_id)
            }
        }
    }

    // =========================================================================
    // Filter operations
    // =========================================================================

    /// Flip a value for a column. Returns `true` if the filters changed.
    pub fn toggle_value(&mut self, column_id: &str, value: &str) -> bool {
        self.dispatch(FilterMessage::ToggleValue {
            column_id: column_id.to_string(),
            value: value.to_string(),
        })
    }

    /// Set a filter's condition. Returns `true` if the filters changed.
    pub fn set_condition(&mut self, column_id: &str, condition: FilterCondition) -> bool {
        self.dispatch(FilterMessage::SetCondition {
            column_id: column_id.to_string(),
            condition,
        })
    }

    /// Remove a filter, closing its value picker if open.
    pub fn remove_filter(&mut self, column_id: &str) -> bool {
        let removed = self.dispatch(FilterMessage::RemoveFilter {
            column_id: column_id.to_string(),
        });
        if removed {
            let showing = match &self.menu {
                FilterMenu::ValuePicker { column_id: open, .. } => open == column_id,
                FilterMenu::ColumnPicker {
                    retarget: Some(open),
                    ..
                } => open == column_id,
                _ => false,
            };
            if showing {
                self.close_menu();
            }
        }
        removed
    }

    /// Move a filter to another column, clearing its values.
    pub fn change_column(&mut self, from: &str, to: &str) -> bool {
        self.dispatch(FilterMessage::ChangeColumn {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Remove every filter and close menus.
    pub fn clear_all(&mut self) -> bool {
        self.close_menu();
        self.dispatch(FilterMessage::ClearAll)
    }

    fn dispatch(&mut self, msg: FilterMessage) -> bool {
        !self.store.dispatch(msg).is_empty()
    }
}

impl std::fmt::Debug for FilterBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterBar")
            .field("filters", self.filters())
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tabula_core::ColumnType;

    fn columns() -> Vec<FilterableColumn> {
        vec![
            FilterableColumn::new("status", "Status", ColumnType::Selection)
                .values(["open", "closed"]),
            FilterableColumn::new("owner", "Owner", ColumnType::Text)
                .values(["alice", "bob", "Alicia"]),
            FilterableColumn::new("signed", "Date Signed", ColumnType::Date),
        ]
    }

    #[test]
    fn test_callbacks_fire_per_change() {
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let columns_seen = Rc::new(RefCell::new(Vec::new()));
        let (s, c) = (Rc::clone(&snapshots), Rc::clone(&columns_seen));

        let mut bar = FilterBar::new(columns())
            .on_filters_change(move |filters| s.borrow_mut().push(filters.len()))
            .on_column_filter(move |id| c.borrow_mut().push(id.to_string()));

        assert!(bar.toggle_value("status", "open"));
        assert!(!bar.toggle_value("ghost", "open"));
        assert!(bar.toggle_value("owner", "bob"));

        assert_eq!(*snapshots.borrow(), vec![1, 2]);
        assert_eq!(*columns_seen.borrow(), vec!["status", "owner"]);
    }

    #[test]
    fn test_add_filter_flow() {
        let mut bar = FilterBar::new(columns());
        bar.open_add_filter();
        assert!(bar.menu().is_open());
        assert_eq!(bar.column_options().len(), 3);

        bar.set_query("sign");
        let options: Vec<_> = bar.column_options().items().iter().map(|c| c.id.clone()).collect();
        assert_eq!(options, vec!["signed"]);

        bar.set_query("");
        assert!(bar.pick_column("owner"));
        assert_eq!(
            bar.menu(),
            &FilterMenu::ValuePicker {
                column_id: "owner".to_string(),
                query: String::new()
            }
        );
        // the filter only exists once a value is toggled
        assert!(bar.filters().is_empty());

        bar.set_query("ali");
        assert_eq!(bar.value_options().items(), &["alice", "Alicia"]);
        bar.toggle_value("owner", "alice");
        assert!(bar.is_selected("owner", "alice"));
        assert_eq!(bar.filters().len(), 1);
    }

    #[test]
    fn test_column_picker_hides_filtered_columns() {
        let mut bar = FilterBar::new(columns());
        bar.toggle_value("status", "open");
        bar.open_add_filter();
        let ids: Vec<_> = bar.column_options().items().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["owner", "signed"]);
        assert!(!bar.pick_column("status"));
    }

    #[test]
    fn test_change_column_flow() {
        let mut bar = FilterBar::new(columns());
        bar.toggle_value("status", "open");

        assert!(bar.open_change_column("status"));
        let ids: Vec<_> = bar.column_options().items().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["status", "owner", "signed"]);

        assert!(bar.pick_column("owner"));
        assert!(bar.filters().contains("owner"));
        assert!(!bar.filters().contains("status"));
        assert!(bar.state().selection("owner").is_empty());
        assert!(matches!(bar.menu(), FilterMenu::ValuePicker { column_id, .. } if column_id == "owner"));
    }

    #[test]
    fn test_open_change_column_requires_filter() {
        let mut bar = FilterBar::new(columns());
        assert!(!bar.open_change_column("status"));
        assert_eq!(bar.menu(), &FilterMenu::Closed);
    }

    #[test]
    fn test_value_options_no_results() {
        let mut bar = FilterBar::new(columns());
        assert!(bar.value_options().is_empty());
        bar.open_values("status");
        bar.set_query("zzz");
        assert_eq!(bar.value_options(), SearchResult::NoResults);
        assert!(!bar.open_values("ghost"));
    }

    #[test]
    fn test_remove_filter_closes_its_menu() {
        let mut bar = FilterBar::new(columns());
        bar.toggle_value("status", "open");
        bar.open_values("status");
        assert!(bar.remove_filter("status"));
        assert_eq!(bar.menu(), &FilterMenu::Closed);
        assert!(!bar.remove_filter("status"));
    }

    #[test]
    fn test_set_condition_and_clear_all() {
        let mut bar = FilterBar::new(columns());
        assert!(!bar.set_condition("status", FilterCondition::IsNoneOf));
        bar.toggle_value("status", "open");
        assert!(bar.set_condition("status", FilterCondition::IsNoneOf));
        assert!(bar.change_column("status", "signed"));
        bar.open_add_filter();
        assert!(bar.clear_all());
        assert!(bar.filters().is_empty());
        assert!(!bar.menu().is_open());
    }

    #[test]
    fn test_menu_serde() {
        let menu = FilterMenu::ValuePicker {
            column_id: "status".to_string(),
            query: "op".to_string(),
        };
        let json = serde_json::to_string(&menu).unwrap();
        let back: FilterMenu = serde_json::from_str(&json).unwrap();
        assert_eq!(back, menu);
        assert_eq!(back.query(), Some("op"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Toggle(usize, usize),
            Remove(usize),
            Change(usize, usize),
        }

        const IDS: [&str; 3] = ["status", "owner", "signed"];
        const VALUES: [&str; 3] = ["open", "bob", "2024-01-01"];

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..3usize, 0..3usize).prop_map(|(c, v)| Op::Toggle(c, v)),
                (0..3usize).prop_map(Op::Remove),
                (0..3usize, 0..3usize).prop_map(|(a, b)| Op::Change(a, b)),
            ]
        }

        proptest! {
            #[test]
            fn prop_selection_mirrors_filters(ops in prop::collection::vec(op(), 0..40)) {
                let mut bar = FilterBar::new(columns());
                for op in ops {
                    match op {
                        Op::Toggle(c, v) => { bar.toggle_value(IDS[c], VALUES[v]); }
                        Op::Remove(c) => { bar.remove_filter(IDS[c]); }
                        Op::Change(a, b) => { bar.change_column(IDS[a], IDS[b]); }
                    }
                }
                let ids = bar.filters().column_ids();
                for (i, id) in ids.iter().enumerate() {
                    prop_assert!(!ids[i + 1..].contains(id));
                    let filter = bar.filters().get(id).unwrap();
                    prop_assert_eq!(bar.state().selection(id), filter.values.as_slice());
                }
            }
        }
    }
}
