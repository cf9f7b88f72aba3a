//! Core state engine for tabular filter bars and column toolbars.
//!
//! This crate provides the state behind a table's filter and display controls:
//! - Column registry: [`FilterableColumn`], [`ColumnRegistry`]
//! - Filters: [`ActiveFilter`], [`ActiveFilterSet`], [`PendingSelection`], [`FilterState`]
//! - Row matching: [`matches`], [`filter_rows`]
//! - Search: [`search_columns`], [`search_values`]
//! - Display: [`DisplayColumn`], [`DisplayOrder`], [`DisplayState`]
//! - Reordering: [`ReorderEngine`] over a [`DragDropCapability`]
//! - Message dispatch: [`State`], [`Store`]

mod column;
pub mod display;
pub mod dnd;
mod error;
mod event;
mod filter;
mod filter_state;
mod geometry;
pub mod matcher;
pub mod reorder;
pub mod search;
mod selection;
mod state;

pub use column::{ColumnRegistry, ColumnType, FilterableColumn};
pub use display::{DisplayColumn, DisplayEffect, DisplayMessage, DisplayOrder, DisplayState};
pub use dnd::{
    array_move, ClosestCenter, DragDropCapability, DropZone, KeyboardIntent, KeyboardSensor,
    PointerSensor,
};
pub use error::{DisplayError, FilterError};
pub use event::{Event, Key};
pub use filter::{ActiveFilter, ActiveFilterSet, FilterCondition};
pub use filter_state::{FilterEffect, FilterMessage, FilterState};
pub use geometry::{Point, Rect};
pub use matcher::{filter_rows, matches, matching_indices, Row};
pub use reorder::{DragConfig, DragGesture, GestureInput, GestureOutcome, ReorderEngine};
pub use search::{search_columns, search_values, SearchResult};
pub use selection::PendingSelection;
pub use state::{State, Store};
