//! Source collection of records

use gridline_core::{Fields, Record, RecordId};

/// Property stripped from incoming rows; identity lives in `Record::id`
const ID_PROPERTY: &str = "id";

/// Owns the records in source order and hands out identifiers
///
/// Identifiers come from a counter that only moves forward, so an id is
/// never reused after its record is deleted.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from rows, assigning ids in row order
    pub fn from_rows(rows: impl IntoIterator<Item = Fields>) -> Self {
        let mut store = Self::new();
        for row in rows {
            store.insert(row);
        }
        store
    }

    /// Append a record and return its new id
    pub fn insert(&mut self, mut fields: Fields) -> RecordId {
        if fields.shift_remove(ID_PROPERTY).is_some() {
            tracing::debug!("Dropped incoming 'id' field; records get store-assigned ids");
        }
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(Record::new(id, fields));
        id
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Position of a record in source order
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    /// Remove a record, keeping the order of the others
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let idx = self.position(id)?;
        Some(self.records.remove(idx))
    }

    /// Replace every field of a record in place; returns the old fields
    pub fn replace(&mut self, id: RecordId, mut fields: Fields) -> Option<Fields> {
        fields.shift_remove(ID_PROPERTY);
        let record = self.get_mut(id)?;
        Some(std::mem::replace(&mut record.fields, fields))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::Value;

    fn row(name: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::from(name));
        fields
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut store = RecordStore::from_rows([row("a"), row("b")]);
        assert_eq!(
            store.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![RecordId(1), RecordId(2)]
        );

        store.remove(RecordId(2)).unwrap();
        let id = store.insert(row("c"));
        assert_eq!(id, RecordId(3));
        assert!(!store.contains(RecordId(2)));
    }

    #[test]
    fn test_incoming_id_field_is_dropped() {
        let mut fields = row("a");
        fields.insert("id".to_string(), Value::from(99));
        let mut store = RecordStore::new();
        let id = store.insert(fields);

        let record = store.get(id).unwrap();
        assert_eq!(record.id, RecordId(1));
        assert!(record.get("id").is_none());
    }

    #[test]
    fn test_replace_keeps_position_and_id() {
        let mut store = RecordStore::from_rows([row("a"), row("b"), row("c")]);
        let old = store.replace(RecordId(2), row("B")).unwrap();

        assert_eq!(old.get("name"), Some(&Value::from("b")));
        assert_eq!(store.position(RecordId(2)), Some(1));
        assert_eq!(store.get(RecordId(2)).unwrap().value("name"), &Value::from("B"));
        assert!(store.replace(RecordId(9), row("x")).is_none());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = RecordStore::from_rows([row("a"), row("b"), row("c")]);
        let removed = store.remove(RecordId(1)).unwrap();
        assert_eq!(removed.value("name"), &Value::from("a"));
        assert_eq!(store.position(RecordId(3)), Some(1));
        assert!(store.remove(RecordId(1)).is_none());
    }
}
