//! Tabula: filter and column-display configuration for tabular views.
//!
//! Build compound filters over typed columns, and hide or reorder columns by
//! drag-and-drop or keyboard. All state lives in explicit, serializable
//! objects; hosts observe changes through callbacks.
//!
//! ```
//! use tabula::{ColumnType, DisplayColumn, FilterableColumn, TableSession};
//!
//! let mut session = TableSession::new(
//!     [FilterableColumn::new("status", "Status", ColumnType::Selection).values(["open", "closed"])],
//!     [DisplayColumn::new("name", "Name").fixed(), DisplayColumn::new("status", "Status")],
//! );
//! session.filter_bar_mut().toggle_value("status", "open");
//! assert_eq!(session.filters().len(), 1);
//! ```

pub use tabula_core::*;
pub use tabula_widgets as widgets;
pub use tabula_yaml as yaml;

mod session;

pub use session::TableSession;
