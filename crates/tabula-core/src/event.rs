//! Input events consumed by the reorder engine.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input events relevant to column reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer pressed on the drag handle of a column.
    PointerDown {
        /// Pointer position
        position: Point,
        /// Column whose handle was pressed
        handle: String,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position
        position: Point,
    },
    /// Pointer released.
    PointerUp {
        /// Pointer position
        position: Point,
    },
    /// Pointer interaction interrupted by the platform.
    PointerCancel,
    /// Key pressed.
    KeyDown {
        /// Key
        key: Key,
        /// Column holding keyboard focus, if any
        focused: Option<String>,
    },
}

impl Event {
    /// Check if this is a pointer event.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::PointerUp { .. }
                | Self::PointerCancel
        )
    }

    /// Check if this is a keyboard event.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. })
    }
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Space key
    Space,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,

    /// Any other key, by character
    Char(char),
}

impl Key {
    /// Check if this is an arrow key.
    #[must_use]
    pub const fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}
