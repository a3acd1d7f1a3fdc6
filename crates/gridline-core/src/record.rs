//! Records of the source collection

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Value;

/// Field map of a record, in insertion order
pub type Fields = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// Stable identifier of a record
///
/// Assigned once when the record enters the source collection and never
/// reassigned or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RecordId)
    }
}

/// One data row: an identifier plus a property -> value mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Create a new record
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Get a field, if present
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    /// Get a field, treating a missing property as NULL
    pub fn value(&self, property: &str) -> &Value {
        self.fields.get(property).unwrap_or(&NULL)
    }

    /// Set a field, returning the previous value
    pub fn set(&mut self, property: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(property.into(), value)
    }
}
