//! QueryState - Table Query Controls

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Default rows per page for dashboard tables
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort direction for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Natural order
    Ascending,
    /// Reversed natural order
    Descending,
}

/// Active sort: column key plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column key to sort by
    pub key: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `key`
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// A filter dimension's accepted values, in canonical form.
///
/// An empty set imposes no constraint on its dimension.
pub type FilterSelection = AHashSet<String>;

/// User-chosen table controls: search, sort, pagination and dimension filters.
///
/// The presentation layer owns the mutable copy (see `TableState`); the view
/// pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// Case-insensitive free-text search ("" = no text filtering)
    pub search: String,
    /// Active sort, if any
    pub sort: Option<SortSpec>,
    /// Requested 1-based page; out-of-range requests are clamped by the view
    pub page: i64,
    /// Rows per page (minimum 1)
    pub page_size: usize,
    /// Dimension name -> accepted canonical values
    pub filters: AHashMap<String, FilterSelection>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filters: AHashMap::new(),
        }
    }
}

impl QueryState {
    /// Query with no search, sort or filters, on page 1
    pub fn new() -> Self {
        Self::default()
    }
}
