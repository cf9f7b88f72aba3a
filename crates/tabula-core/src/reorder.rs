//! Reorder engine: turns drag and keyboard gestures into column permutations.
//!
//! Intermediate gesture positions are tracked here only; committed display
//! state changes once per gesture, when it ends.

use crate::display::DisplayOrder;
use crate::dnd::{DragDropCapability, KeyboardIntent, KeyboardSensor, PointerSensor};
use crate::event::{Event, Key};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Drag configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel in pixels before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f32,
}

const fn default_activation_distance() -> f32 {
    PointerSensor::DEFAULT_ACTIVATION_DISTANCE
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
        }
    }
}

/// Input driving the current gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    /// Pointer drag.
    Pointer {
        /// Press position
        start: Point,
        /// Latest position
        current: Point,
        /// Whether the activation distance has been reached
        activated: bool,
    },
    /// Keyboard reorder.
    Keyboard,
}

/// An in-flight reorder gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    /// Column being moved
    pub active_id: String,
    /// Column currently targeted
    pub over_id: Option<String>,
    /// Input kind
    pub input: GestureInput,
}

impl DragGesture {
    /// Whether the gesture has become a real drag (always true for keyboard).
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        match self.input {
            GestureInput::Pointer { activated, .. } => activated,
            GestureInput::Keyboard => true,
        }
    }
}

/// Result of a finished gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// New sortable-partition order.
    Reordered(Vec<String>),
    /// Gesture ended without moving anything (a click, or dropped in place).
    Unchanged,
    /// Gesture was cancelled.
    Cancelled,
}

impl GestureOutcome {
    /// New sortable order, if any.
    #[must_use]
    pub fn order(&self) -> Option<&[String]> {
        match self {
            Self::Reordered(order) => Some(order),
            Self::Unchanged | Self::Cancelled => None,
        }
    }

    /// Apply the outcome to a display order.
    ///
    /// Returns `true` if the display order changed.
    pub fn apply(&self, display: &mut DisplayOrder) -> bool {
        self.order().is_some_and(|order| display.reorder(order))
    }
}

/// Drives reorder gestures over the sortable partition of a display order.
#[derive(Debug, Clone)]
pub struct ReorderEngine<C: DragDropCapability> {
    capability: C,
    pointer: PointerSensor,
    keyboard: KeyboardSensor,
    gesture: Option<DragGesture>,
}

impl<C: DragDropCapability> ReorderEngine<C> {
    /// Create an engine with default drag configuration.
    pub fn new(capability: C) -> Self {
        Self::with_config(capability, DragConfig::default())
    }

    /// Create an engine with custom drag configuration.
    pub fn with_config(capability: C, config: DragConfig) -> Self {
        Self {
            capability,
            pointer: PointerSensor::new(config.activation_distance),
            keyboard: KeyboardSensor,
            gesture: None,
        }
    }

    /// The drag-and-drop capability.
    pub const fn capability(&self) -> &C {
        &self.capability
    }

    /// Mutable access to the capability (e.g. to update drop zones).
    pub fn capability_mut(&mut self) -> &mut C {
        &mut self.capability
    }

    /// Pointer sensor settings.
    pub const fn pointer_sensor(&self) -> &PointerSensor {
        &self.pointer
    }

    /// Current gesture, if any.
    pub const fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    /// Whether a gesture is in progress.
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Route an input event. Returns an outcome when a gesture ends.
    pub fn handle_event(&mut self, event: &Event, display: &DisplayOrder) -> Option<GestureOutcome> {
        match event {
            Event::PointerDown { position, handle } => {
                self.pointer_down(display, handle, *position);
                None
            }
            Event::PointerMove { position } => {
                self.pointer_move(*position);
                None
            }
            Event::PointerUp { position } => {
                self.pointer_move(*position);
                self.pointer_up(display)
            }
            Event::PointerCancel => self.cancel(),
            Event::KeyDown { key, focused } => self.key_down(*key, focused.as_deref(), display),
        }
    }

    /// Press on a column's drag handle. Ignored for fixed or unknown columns
    /// and while another gesture is active.
    pub fn pointer_down(&mut self, display: &DisplayOrder, id: &str, position: Point) -> bool {
        if self.gesture.is_some() || !display.is_sortable(id) {
            tracing::debug!(column_id = %id, "pointer down ignored");
            return false;
        }
        self.gesture = Some(DragGesture {
            active_id: id.to_string(),
            over_id: None,
            input: GestureInput::Pointer {
                start: position,
                current: position,
                activated: false,
            },
        });
        tracing::trace!(column_id = %id, "pointer gesture pending");
        true
    }

    /// Track pointer movement; resolves the drop target once activated.
    pub fn pointer_move(&mut self, position: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let GestureInput::Pointer {
            start,
            current,
            activated,
        } = &mut gesture.input
        else {
            return;
        };

        *current = position;
        if !*activated && self.pointer.is_activated(*start, position) {
            *activated = true;
            tracing::trace!(column_id = %gesture.active_id, "drag activated");
        }
        if *activated {
            gesture.over_id = self.capability.detect_target(position);
        }
    }

    /// Release the pointer, ending a pointer gesture.
    pub fn pointer_up(&mut self, display: &DisplayOrder) -> Option<GestureOutcome> {
        if !matches!(
            self.gesture.as_ref().map(|g| &g.input),
            Some(GestureInput::Pointer { .. })
        ) {
            return None;
        }
        let gesture = self.gesture.take()?;
        Some(self.finish(&gesture, display))
    }

    /// Handle a key press for keyboard reordering.
    pub fn key_down(
        &mut self,
        key: Key,
        focused: Option<&str>,
        display: &DisplayOrder,
    ) -> Option<GestureOutcome> {
        let intent = self.keyboard.intent(key)?;

        let keyboard_active = matches!(
            self.gesture.as_ref().map(|g| &g.input),
            Some(GestureInput::Keyboard)
        );

        match intent {
            KeyboardIntent::Cancel if self.gesture.is_some() => self.cancel(),
            KeyboardIntent::Activate if keyboard_active => {
                let gesture = self.gesture.take()?;
                Some(self.finish(&gesture, display))
            }
            KeyboardIntent::Activate if self.gesture.is_none() => {
                let id = focused.filter(|id| display.is_sortable(id))?;
                self.gesture = Some(DragGesture {
                    active_id: id.to_string(),
                    over_id: Some(id.to_string()),
                    input: GestureInput::Keyboard,
                });
                tracing::trace!(column_id = %id, "keyboard gesture started");
                None
            }
            KeyboardIntent::Previous | KeyboardIntent::Next if keyboard_active => {
                self.step_keyboard_target(intent, display);
                None
            }
            _ => None,
        }
    }

    fn step_keyboard_target(&mut self, intent: KeyboardIntent, display: &DisplayOrder) {
        let sortable = display.sortable_ids();
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let current = gesture
            .over_id
            .as_deref()
            .and_then(|id| sortable.iter().position(|s| s == id));
        let Some(index) = current else {
            return;
        };
        let next = match intent {
            KeyboardIntent::Previous => index.saturating_sub(1),
            _ => (index + 1).min(sortable.len().saturating_sub(1)),
        };
        gesture.over_id = sortable.get(next).cloned();
    }

    /// Cancel the current gesture without mutation.
    pub fn cancel(&mut self) -> Option<GestureOutcome> {
        let gesture = self.gesture.take()?;
        tracing::trace!(column_id = %gesture.active_id, "gesture cancelled");
        Some(GestureOutcome::Cancelled)
    }

    fn finish(&self, gesture: &DragGesture, display: &DisplayOrder) -> GestureOutcome {
        if !gesture.is_activated() {
            return GestureOutcome::Unchanged;
        }
        let Some(over) = gesture.over_id.as_deref() else {
            return GestureOutcome::Unchanged;
        };
        if over == gesture.active_id {
            return GestureOutcome::Unchanged;
        }

        let sortable = display.sortable_ids();
        let from = sortable.iter().position(|id| *id == gesture.active_id);
        let to = sortable.iter().position(|id| id == over);
        match (from, to) {
            (Some(from), Some(to)) => {
                let order = self.capability.move_within_list(&sortable, from, to);
                tracing::trace!(from, to, "gesture completed");
                GestureOutcome::Reordered(order)
            }
            _ => {
                tracing::debug!(column_id = %over, "drop target is not sortable");
                GestureOutcome::Unchanged
            }
        }
    }
}
