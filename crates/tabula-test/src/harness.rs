//! Harness for driving a [`TableToolbar`] with simulated pointer and key input.

use tabula_core::{DisplayColumn, Event, GestureOutcome, Key, Point, Rect};
use tabula_widgets::TableToolbar;

const ROW_HEIGHT: f32 = 30.0;
const WIDTH: f32 = 240.0;

/// Toolbar laid out as a vertical list, one row per column.
pub struct ToolbarHarness {
    toolbar: TableToolbar,
}

impl ToolbarHarness {
    /// Create a harness and lay out its drop zones.
    pub fn new(columns: impl IntoIterator<Item = DisplayColumn>) -> Self {
        Self::from_toolbar(TableToolbar::new(columns))
    }

    /// Wrap an existing toolbar, e.g. one with callbacks attached.
    pub fn from_toolbar(mut toolbar: TableToolbar) -> Self {
        toolbar.open_menu();
        let mut harness = Self { toolbar };
        harness.layout();
        harness
    }

    fn layout(&mut self) {
        #[allow(clippy::cast_precision_loss)]
        let height = self.toolbar.order().len() as f32 * ROW_HEIGHT;
        self.toolbar
            .layout_drop_zones(Rect::new(0.0, 0.0, WIDTH, height), ROW_HEIGHT);
    }

    /// The toolbar under test.
    pub fn toolbar(&self) -> &TableToolbar {
        &self.toolbar
    }

    /// Mutable access to the toolbar.
    pub fn toolbar_mut(&mut self) -> &mut TableToolbar {
        &mut self.toolbar
    }

    /// Center of a column's row in the list.
    pub fn row_center(&self, id: &str) -> Option<Point> {
        let index = self.toolbar.order().position(id)?;
        #[allow(clippy::cast_precision_loss)]
        let y = (index as f32 + 0.5) * ROW_HEIGHT;
        Some(Point::new(WIDTH / 2.0, y))
    }

    // === Event Simulation ===

    /// Drag `handle` onto `target`'s row and release.
    pub fn drag(&mut self, handle: &str, target: &str) -> Option<GestureOutcome> {
        let start = self.row_center(handle)?;
        let end = self.row_center(target)?;
        self.toolbar.handle_event(&Event::PointerDown {
            position: start,
            handle: handle.to_string(),
        });
        self.toolbar.handle_event(&Event::PointerMove { position: end });
        self.toolbar.handle_event(&Event::PointerUp { position: end })
    }

    /// Press and release on a handle without moving.
    pub fn click(&mut self, handle: &str) -> Option<GestureOutcome> {
        let at = self.row_center(handle)?;
        self.toolbar.handle_event(&Event::PointerDown {
            position: at,
            handle: handle.to_string(),
        });
        self.toolbar.handle_event(&Event::PointerUp { position: at })
    }

    /// Focus a handle and press a sequence of keys; returns the last outcome.
    pub fn keys(&mut self, focus: &str, keys: &[Key]) -> Option<GestureOutcome> {
        self.toolbar.focus(Some(focus));
        keys.iter().fold(None, |_, key| self.toolbar.key_down(*key))
    }

    // === Assertions ===

    /// Column ids in display order.
    pub fn order_ids(&self) -> Vec<String> {
        self.toolbar
            .order()
            .columns()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    /// Assert the full column order.
    pub fn assert_order(&self, expected: &[&str]) -> &Self {
        let actual = self.order_ids();
        if actual != expected {
            panic!("expected order {expected:?}, got {actual:?}");
        }
        self
    }
}
