//! Column Definition
//!
//! Defines table columns with their properties and value rules.

use std::cmp::Ordering;

use crate::domain::record::Record;
use crate::domain::value::CellValue;

/// Value accessor: derives the cell value a column exposes for a record
pub type ValueFn = Box<dyn Fn(&Record) -> CellValue + Send + Sync>;

/// Custom comparison rule for a column's values
pub type CompareFn = Box<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// Column definition for a tabular view
pub struct Column {
    /// Field key this column reads
    pub key: String,
    /// Column header label
    pub label: String,
    /// Whether the column participates in sorting
    pub sortable: bool,
    /// Custom value extraction (defaults to the record field named by `key`)
    pub accessor: Option<ValueFn>,
    /// Custom comparison rule (defaults to the natural `CellValue` ordering)
    pub comparator: Option<CompareFn>,
}

impl Column {
    /// Create a new column reading the record field named by `key`
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            accessor: None,
            comparator: None,
        }
    }

    /// Make the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a custom value accessor
    pub fn with_accessor(
        mut self,
        accessor: impl Fn(&Record) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.accessor = Some(Box::new(accessor));
        self
    }

    /// Set a custom comparison rule
    pub fn with_comparator(
        mut self,
        comparator: impl Fn(&CellValue, &CellValue) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    /// Resolve the cell value for a record.
    ///
    /// A record missing the field resolves to `Null` rather than failing.
    pub fn value_of(&self, record: &Record) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(record),
            None => record.field(&self.key).cloned().unwrap_or(CellValue::Null),
        }
    }

    /// Compare two values under this column's rule
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match &self.comparator {
            Some(comparator) => comparator(a, b),
            None => a.compare(b),
        }
    }
}
