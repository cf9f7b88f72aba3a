//! `TableToolbar`: the column menu with visibility toggles and drag reordering.

use serde::{Deserialize, Serialize};
use tabula_core::{
    ClosestCenter, DisplayColumn, DisplayEffect, DisplayMessage, DisplayOrder, DisplayState,
    DragConfig, DragDropCapability, DropZone, Event, GestureOutcome, Key, Rect, ReorderEngine,
    Store,
};

/// What a drag overlay should render while a gesture is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPreview {
    /// Column being dragged
    pub active_id: String,
    /// Column currently under the pointer or keyboard cursor
    pub over_id: Option<String>,
}

/// Column menu controller.
///
/// Visibility and order live in a [`Store`]; pointer and keyboard input run
/// through a [`ReorderEngine`] and only a completed gesture reaches the store.
pub struct TableToolbar<C: DragDropCapability = ClosestCenter> {
    store: Store<DisplayState>,
    engine: ReorderEngine<C>,
    menu_open: bool,
    focused: Option<String>,
}

impl TableToolbar<ClosestCenter> {
    /// Create a toolbar with closest-center drop detection.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = DisplayColumn>) -> Self {
        Self::with_capability(columns, ClosestCenter::new(), DragConfig::default())
    }

    /// Register one drop zone per sortable column, stacked vertically from
    /// the top of `bounds`. Replaces previously registered zones.
    pub fn layout_drop_zones(&mut self, bounds: Rect, row_height: f32) {
        let sortable = self.store.state().order().sortable_ids();
        let offset = self.store.state().order().fixed_ids().len();
        let capability = self.engine.capability_mut();
        capability.clear();
        for (i, id) in sortable.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let y = bounds.y + (offset + i) as f32 * row_height;
            capability.register(DropZone::new(id, Rect::new(bounds.x, y, bounds.width, row_height)));
        }
    }
}

impl<C: DragDropCapability> TableToolbar<C> {
    /// Create a toolbar with a custom drag-and-drop capability.
    #[must_use]
    pub fn with_capability(
        columns: impl IntoIterator<Item = DisplayColumn>,
        capability: C,
        config: DragConfig,
    ) -> Self {
        Self {
            store: Store::new(DisplayState::new(columns)),
            engine: ReorderEngine::with_config(capability, config),
            menu_open: false,
            focused: None,
        }
    }

    /// Call `callback` with the column id whenever visibility flips.
    #[must_use]
    pub fn on_toggle_column_visibility<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.store.subscribe(move |effect| {
            if let DisplayEffect::VisibilityToggled(id) = effect {
                callback(id);
            }
        });
        self
    }

    /// Call `callback` with the full column list after every reorder.
    #[must_use]
    pub fn on_reorder_columns<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&[DisplayColumn]) + 'static,
    {
        self.store.subscribe(move |effect| {
            if let DisplayEffect::ColumnsReordered(columns) = effect {
                callback(columns);
            }
        });
        self
    }

    /// Current display order.
    #[must_use]
    pub const fn order(&self) -> &DisplayOrder {
        self.store.state().order()
    }

    /// Reorder engine.
    #[must_use]
    pub const fn engine(&self) -> &ReorderEngine<C> {
        &self.engine
    }

    /// Mutable access to the engine's capability, e.g. to register zones.
    pub fn capability_mut(&mut self) -> &mut C {
        self.engine.capability_mut()
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Whether the column menu is open.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Open the column menu.
    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    /// Close the column menu, cancelling any gesture in progress.
    pub fn close_menu(&mut self) {
        self.engine.cancel();
        self.menu_open = false;
        self.focused = None;
    }

    /// Flip the column menu.
    pub fn toggle_menu(&mut self) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Move keyboard focus to a column's drag handle.
    pub fn focus(&mut self, id: Option<&str>) {
        self.focused = id.filter(|id| self.order().get(id).is_some()).map(str::to_string);
    }

    /// Focused drag handle.
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Flip a column's visibility. Returns `true` if it changed.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        !self
            .store
            .dispatch(DisplayMessage::ToggleVisibility(id.to_string()))
            .is_empty()
    }

    /// Replace the sortable order directly. Returns `true` if it changed.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> bool {
        self.commit(order.iter().map(|s| s.as_ref().to_string()).collect())
    }

    fn commit(&mut self, order: Vec<String>) -> bool {
        if self.store.dispatch(DisplayMessage::Reorder(order)).is_empty() {
            return false;
        }
        let sortable = self.store.state().order().sortable_ids();
        self.engine.capability_mut().list_reordered(&sortable);
        true
    }

    /// Route an input event through the reorder engine.
    ///
    /// Escape with no gesture in progress closes the menu.
    pub fn handle_event(&mut self, event: &Event) -> Option<GestureOutcome> {
        if let Event::KeyDown {
            key: Key::Escape, ..
        } = event
        {
            if !self.engine.is_dragging() {
                self.close_menu();
                return None;
            }
        }

        let outcome = self.engine.handle_event(event, self.store.state().order())?;
        if let Some(order) = outcome.order() {
            self.commit(order.to_vec());
        }
        Some(outcome)
    }

    /// Key press on the focused drag handle.
    pub fn key_down(&mut self, key: Key) -> Option<GestureOutcome> {
        let event = Event::KeyDown {
            key,
            focused: self.focused.clone(),
        };
        self.handle_event(&event)
    }

    /// Overlay data for the gesture in progress.
    #[must_use]
    pub fn drag_preview(&self) -> Option<DragPreview> {
        self.engine.gesture().map(|g| DragPreview {
            active_id: g.active_id.clone(),
            over_id: g.over_id.clone(),
        })
    }

    /// Snapshot of the display state.
    #[must_use]
    pub fn snapshot(&self) -> DisplayState {
        self.store.state().clone()
    }
}

impl<C: DragDropCapability + std::fmt::Debug> std::fmt::Debug for TableToolbar<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableToolbar")
            .field("order", self.order())
            .field("engine", &self.engine)
            .field("menu_open", &self.menu_open)
            .field("focused", &self.focused)
            .finish()
    }
}
