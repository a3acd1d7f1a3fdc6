//! Multi-column sorting
//!
//! A `SortSpec` is an ordered list of (column, direction) keys, first key
//! highest priority. Ordering is stable: records that tie on every key keep
//! their relative input order, under both directions.

use std::cmp::Ordering;

use gridline_core::{Column, Record, Schema};
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Configuration for null value handling in sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPosition {
    /// NULL values appear first
    First,
    /// NULL values appear last
    #[default]
    Last,
}

/// A column to sort by with its direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// Ordered sort keys; a column appears at most once
///
/// Serialized as a plain list of keys; deserializing drops repeated columns
/// the same way `from_keys` does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SortKey>", into = "Vec<SortKey>")]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl From<Vec<SortKey>> for SortSpec {
    fn from(keys: Vec<SortKey>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<SortSpec> for Vec<SortKey> {
    fn from(spec: SortSpec) -> Self {
        spec.keys
    }
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from keys, keeping only the first key for each column
    pub fn from_keys(keys: impl IntoIterator<Item = SortKey>) -> Self {
        let mut spec = Self::new();
        for key in keys {
            if spec.position(&key.column).is_none() {
                spec.keys.push(key);
            }
        }
        spec
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.column == column)
    }

    /// Direction of a column, if it is one of the sort keys
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.position(column).map(|idx| self.keys[idx].direction)
    }

    /// 0-based priority of a column, if it is one of the sort keys
    pub fn priority_of(&self, column: &str) -> Option<usize> {
        self.position(column)
    }

    /// Cycle a column: absent -> ascending -> descending -> absent
    ///
    /// Other keys keep their position and direction.
    pub fn toggled(&self, column: &str) -> Self {
        let mut next = self.clone();
        match next.position(column) {
            None => next.keys.push(SortKey::ascending(column)),
            Some(idx) => match next.keys[idx].direction {
                SortDirection::Ascending => next.keys[idx].direction = SortDirection::Descending,
                SortDirection::Descending => {
                    next.keys.remove(idx);
                }
            },
        }
        next
    }

    /// Same cycle as `toggled`, but every other column is dropped
    pub fn toggled_single(&self, column: &str) -> Self {
        let current = Self {
            keys: self
                .keys
                .iter()
                .filter(|k| k.column == column)
                .cloned()
                .collect(),
        };
        current.toggled(column)
    }
}

/// Compares records by the keys of a `SortSpec`
///
/// Columns are resolved against the schema once; keys naming columns the
/// schema does not have are ignored.
#[derive(Debug)]
pub struct RecordComparator<'a> {
    keys: Vec<(&'a Column, SortDirection)>,
    null_position: NullPosition,
}

impl<'a> RecordComparator<'a> {
    pub fn new(schema: &'a Schema, spec: &SortSpec, null_position: NullPosition) -> Self {
        let keys = spec
            .keys()
            .iter()
            .filter_map(|key| match schema.column(&key.column) {
                Some(column) => Some((column, key.direction)),
                None => {
                    tracing::debug!(column = %key.column, "Ignoring sort key for unknown column");
                    None
                }
            })
            .collect();
        Self {
            keys,
            null_position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compare two records using all configured sort keys
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (column, direction) in &self.keys {
            let va = a.value(column.property());
            let vb = b.value(column.property());

            // Null placement does not flip with the direction
            let ordering = match (va.is_null(), vb.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => match self.null_position {
                    NullPosition::First => Ordering::Less,
                    NullPosition::Last => Ordering::Greater,
                },
                (false, true) => match self.null_position {
                    NullPosition::First => Ordering::Greater,
                    NullPosition::Last => Ordering::Less,
                },
                (false, false) => direction.apply(column.compare(va, vb)),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Stable-sort records by a spec; an empty spec keeps the input order
pub fn order<'a>(
    mut records: Vec<&'a Record>,
    schema: &Schema,
    spec: &SortSpec,
    null_position: NullPosition,
) -> Vec<&'a Record> {
    let comparator = RecordComparator::new(schema, spec, null_position);
    if comparator.is_empty() {
        return records;
    }
    records.sort_by(|a, b| comparator.compare(a, b));
    records
}
