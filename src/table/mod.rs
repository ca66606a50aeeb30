//! Table - Tabular View-Model
//!
//! The filter/sort/paginate pipeline and the query controls driving it.

pub mod column;
pub mod query;
pub mod state;
pub mod view;

pub use column::Column;
pub use query::{FilterSelection, QueryState, SortDirection, SortSpec};
pub use state::TableState;
pub use view::{TableView, compute_view, visible_rows};
