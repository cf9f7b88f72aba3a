//! `TableSession`: a filter bar and column toolbar over one table.

use tabula_core::{ActiveFilterSet, DisplayColumn, DisplayOrder, FilterableColumn};
use tabula_widgets::{DataTable, FilterBar, TableToolbar, TableView};
use tabula_yaml::{ParseError, TableManifest};

/// Filter bar and column toolbar for one table view.
#[derive(Debug)]
pub struct TableSession {
    filter_bar: FilterBar,
    toolbar: TableToolbar,
}

impl TableSession {
    /// Create a session from filterable and display columns.
    pub fn new(
        columns: impl IntoIterator<Item = FilterableColumn>,
        display: impl IntoIterator<Item = DisplayColumn>,
    ) -> Self {
        Self {
            filter_bar: FilterBar::new(columns),
            toolbar: TableToolbar::new(display),
        }
    }

    /// Create a session from a manifest, honoring its drag settings.
    pub fn from_manifest(manifest: &TableManifest) -> Self {
        Self {
            filter_bar: FilterBar::with_registry(manifest.registry()),
            toolbar: TableToolbar::with_capability(
                manifest.display.iter().cloned(),
                tabula_core::ClosestCenter::new(),
                manifest.drag,
            ),
        }
    }

    /// Parse a YAML manifest and create a session from it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest = TableManifest::from_yaml(yaml)?;
        Ok(Self::from_manifest(&manifest))
    }

    /// Replace the filter bar, e.g. with one that has callbacks attached.
    #[must_use]
    pub fn with_filter_bar(mut self, filter_bar: FilterBar) -> Self {
        self.filter_bar = filter_bar;
        self
    }

    /// Replace the toolbar, e.g. with one that has callbacks attached.
    #[must_use]
    pub fn with_toolbar(mut self, toolbar: TableToolbar) -> Self {
        self.toolbar = toolbar;
        self
    }

    /// Filter bar.
    pub const fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    /// Mutable filter bar.
    pub fn filter_bar_mut(&mut self) -> &mut FilterBar {
        &mut self.filter_bar
    }

    /// Column toolbar.
    pub const fn toolbar(&self) -> &TableToolbar {
        &self.toolbar
    }

    /// Mutable column toolbar.
    pub fn toolbar_mut(&mut self) -> &mut TableToolbar {
        &mut self.toolbar
    }

    /// Active filters.
    pub const fn filters(&self) -> &ActiveFilterSet {
        self.filter_bar.filters()
    }

    /// Display order.
    pub const fn order(&self) -> &DisplayOrder {
        self.toolbar.order()
    }

    /// Project `table` through the current filters and display order.
    pub fn view(&self, table: &DataTable) -> TableView {
        let view = table.view(self.filters().as_slice(), self.order());
        tracing::trace!(
            shown = view.row_count(),
            total = view.total_rows,
            "table projected"
        );
        view
    }
}
