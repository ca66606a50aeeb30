//! TableState - Mutable Table Controls
//!
//! Owns the record set and query controls for one table and derives the view
//! on demand. The presentation layer mutates this in response to user input
//! and re-renders from `view()`; the pipeline itself stays pure.

use crate::domain::record::Record;
use crate::table::column::Column;
use crate::table::query::{QueryState, SortDirection, SortSpec};
use crate::table::view::{TableView, compute_view, visible_rows};
use crate::utils::prefs_store::TablePrefs;

/// Mutable state for one dashboard table
pub struct TableState {
    rows: Vec<Record>,
    columns: Vec<Column>,
    query: QueryState,
}

impl TableState {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            query: QueryState::new(),
        }
    }

    /// Set initial rows (builder style)
    pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replace the record set. The current page is re-clamped so the user
    /// never lands beyond the last page of the new data.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// The raw record set
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// The column definitions
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The current query controls
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Set the free-text search term and snap back to page 1
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    /// Replace a filter dimension's accepted values and snap back to page 1
    pub fn set_filter<I, V>(&mut self, dimension: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.query
            .filters
            .insert(dimension.into(), values.into_iter().map(Into::into).collect());
        self.query.page = 1;
    }

    /// Drop a filter dimension entirely and snap back to page 1
    pub fn clear_filter(&mut self, dimension: &str) {
        self.query.filters.remove(dimension);
        self.query.page = 1;
    }

    /// Cycle the sort on a column: ascending, then descending, then none.
    /// Toggling a different column restarts at ascending. Unknown or
    /// non-sortable keys are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        if !self.columns.iter().any(|c| c.key == key && c.sortable) {
            return;
        }
        self.query.sort = match self.query.sort.take() {
            Some(sort) if sort.key == key => match sort.direction {
                SortDirection::Ascending => Some(SortSpec::descending(sort.key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        };
    }

    /// Jump to a page, clamped to the valid range for the current view
    pub fn set_page(&mut self, page: i64) {
        self.query.page = page;
        self.clamp_page();
    }

    /// Advance one page (stops at the last page)
    pub fn next_page(&mut self) {
        let current = self.view().page;
        self.set_page(current as i64 + 1);
    }

    /// Go back one page (stops at page 1)
    pub fn prev_page(&mut self) {
        let current = self.view().page;
        self.set_page(current as i64 - 1);
    }

    /// Set the rows-per-page (minimum 1) and snap back to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.query.page_size = size.max(1);
        self.query.page = 1;
    }

    /// Derive the current view
    pub fn view(&self) -> TableView<'_> {
        compute_view(&self.rows, &self.columns, &self.query)
    }

    /// The filtered, sorted, pre-pagination row set for export
    pub fn export_rows(&self) -> Vec<&Record> {
        visible_rows(&self.rows, &self.columns, &self.query)
    }

    /// Apply saved view preferences. Sort keys that no longer exist fail soft
    /// inside the view, so stale preferences cannot break the table.
    pub fn apply_prefs(&mut self, prefs: &TablePrefs) {
        self.query.page_size = prefs.page_size.max(1);
        self.query.sort = prefs.sort.clone();
        self.query.filters = prefs.filters.clone();
        self.query.page = 1;
    }

    /// Snapshot the current controls as saveable preferences
    pub fn prefs(&self) -> TablePrefs {
        TablePrefs {
            page_size: self.query.page_size,
            sort: self.query.sort.clone(),
            filters: self.query.filters.clone(),
        }
    }

    fn clamp_page(&mut self) {
        let total = self.view().total_pages as i64;
        self.query.page = self.query.page.clamp(1, total);
    }
}
