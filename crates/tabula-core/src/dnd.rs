//! Drag and drop capability consumed by the reorder engine.
//!
//! This module provides:
//! - The [`DragDropCapability`] seam: target detection plus list moves
//! - [`ClosestCenter`], a collision strategy over registered drop zones
//! - Pointer and keyboard sensors that turn raw input into drag intents

use crate::event::Key;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// External drag-and-drop capability.
///
/// Implementations decide which drop target a pointer position resolves to
/// and how a list is rearranged when an item moves.
pub trait DragDropCapability {
    /// Resolve the drop target for a pointer position.
    fn detect_target(&self, pointer: Point) -> Option<String>;

    /// Move the item at `from` to index `to`.
    fn move_within_list(&self, list: &[String], from: usize, to: usize) -> Vec<String> {
        array_move(list, from, to)
    }

    /// The list was committed in `order`; drop targets should follow their items.
    fn list_reordered(&mut self, _order: &[String]) {}
}

/// Remove the element at `from` and insert it at `to`.
///
/// Out-of-range indices leave the list unchanged.
#[must_use]
pub fn array_move<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = list.to_vec();
    if from >= out.len() || to >= out.len() {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

/// A registered drop zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    /// Column id the zone belongs to
    pub id: String,
    /// Bounds of the zone
    pub bounds: Rect,
    /// Whether the zone can currently receive drops
    pub enabled: bool,
}

impl DropZone {
    /// Create an enabled drop zone.
    #[must_use]
    pub fn new(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            enabled: true,
        }
    }
}

/// "Closest center" collision detection: the enabled zone whose center is
/// nearest to the pointer wins, whether or not the pointer is inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosestCenter {
    zones: Vec<DropZone>,
}

impl ClosestCenter {
    /// Create with no zones.
    #[must_use]
    pub const fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Register a zone, replacing any zone with the same id.
    pub fn register(&mut self, zone: DropZone) {
        if let Some(existing) = self.zones.iter_mut().find(|z| z.id == zone.id) {
            *existing = zone;
        } else {
            self.zones.push(zone);
        }
    }

    /// Unregister a zone.
    pub fn unregister(&mut self, id: &str) {
        self.zones.retain(|z| z.id != id);
    }

    /// Update a zone's bounds.
    pub fn update_bounds(&mut self, id: &str, bounds: Rect) {
        if let Some(zone) = self.zones.iter_mut().find(|z| z.id == id) {
            zone.bounds = bounds;
        }
    }

    /// Enable or disable a zone.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(zone) = self.zones.iter_mut().find(|z| z.id == id) {
            zone.enabled = enabled;
        }
    }

    /// Registered zones.
    #[must_use]
    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    /// Remove all zones.
    pub fn clear(&mut self) {
        self.zones.clear();
    }
}

impl DragDropCapability for ClosestCenter {
    fn detect_target(&self, pointer: Point) -> Option<String> {
        self.zones
            .iter()
            .filter(|z| z.enabled)
            .map(|z| (z.bounds.center().distance(&pointer), z))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, z)| z.id.clone())
    }

    /// Reassign the zones' slots, top to bottom then left to right, to the
    /// ids in `order`. Zones for ids not in `order` keep their bounds.
    fn list_reordered(&mut self, order: &[String]) {
        let ids: Vec<&String> = order
            .iter()
            .filter(|id| self.zones.iter().any(|z| &z.id == *id))
            .collect();
        let mut slots: Vec<Rect> = self
            .zones
            .iter()
            .filter(|z| order.contains(&z.id))
            .map(|z| z.bounds)
            .collect();
        slots.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
        for (id, bounds) in ids.into_iter().zip(slots) {
            self.update_bounds(id, bounds);
        }
    }
}

/// Pointer sensor with a minimum activation distance.
///
/// A press that travels less than the activation distance is a click, not a
/// drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSensor {
    /// Distance in pixels the pointer must travel before a drag starts
    pub activation_distance: f32,
}

impl PointerSensor {
    /// Default activation distance in pixels.
    pub const DEFAULT_ACTIVATION_DISTANCE: f32 = 8.0;

    /// Create with a custom activation distance (negative values clamp to zero).
    #[must_use]
    pub fn new(activation_distance: f32) -> Self {
        Self {
            activation_distance: activation_distance.max(0.0),
        }
    }

    /// Whether movement from `start` to `current` activates a drag.
    #[must_use]
    pub fn is_activated(&self, start: Point, current: Point) -> bool {
        start.distance(&current) >= self.activation_distance
    }
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ACTIVATION_DISTANCE)
    }
}

/// Drag intent derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardIntent {
    /// Pick up the focused item, or drop the held one.
    Activate,
    /// Move the held item one slot earlier.
    Previous,
    /// Move the held item one slot later.
    Next,
    /// Abort the gesture.
    Cancel,
}

/// Keyboard sensor for accessible reordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardSensor;

impl KeyboardSensor {
    /// Map a key to a drag intent.
    #[must_use]
    pub const fn intent(&self, key: Key) -> Option<KeyboardIntent> {
        match key {
            Key::Space | Key::Enter => Some(KeyboardIntent::Activate),
            Key::Up | Key::Left => Some(KeyboardIntent::Previous),
            Key::Down | Key::Right => Some(KeyboardIntent::Next),
            Key::Escape => Some(KeyboardIntent::Cancel),
            _ => None,
        }
    }
}
