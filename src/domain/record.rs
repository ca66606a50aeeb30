//! Record - Table Row Data

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// Unique record identifier.
///
/// The dashboard's data sources use both string ids (member codes) and numeric
/// ids (session counters), so both shapes are first-class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// String identifier
    Text(String),
    /// Numeric identifier
    Number(i64),
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

/// An opaque table row: a unique id plus an open set of named fields.
///
/// Records are immutable from the view-model's perspective; the pipeline only
/// ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique ID
    pub id: RecordId,
    /// Named field values
    pub fields: AHashMap<String, CellValue>,
}

impl Record {
    /// Create a record with no fields
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: AHashMap::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a field value by name
    pub fn field(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }
}
