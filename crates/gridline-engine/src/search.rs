//! Per-column substring search
//!
//! Matching is done against the *displayed* value (enum label, canonical
//! boolean token), case-insensitively, by plain substring containment.

use gridline_core::{Column, Record, Schema, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-column filter text, ANDed together, plus an optional query that
/// may match any column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    columns: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    global: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter text of a column; empty text removes the constraint
    pub fn set(&mut self, column: impl Into<String>, text: impl Into<String>) {
        let column = column.into();
        let text = text.into();
        if text.is_empty() {
            self.columns.shift_remove(&column);
        } else {
            self.columns.insert(column, text);
        }
    }

    /// Builder form of `set`
    pub fn with(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(column, text);
        self
    }

    /// Set the query matched against every column
    pub fn set_global(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.global = if text.is_empty() { None } else { Some(text) };
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    pub fn global(&self) -> Option<&str> {
        self.global.as_deref()
    }

    /// Column entries in the order they were first set
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.global = None;
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.global.is_none()
    }
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Does a raw value, as displayed by `column`, contain `filter_text`?
pub fn matches(column: &Column, value: &Value, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    contains_ignore_case(&column.format(value), filter_text)
}

/// Does a record satisfy every entry of a filter?
pub fn record_matches(schema: &Schema, record: &Record, filter: &FilterSpec) -> bool {
    let columns_match = filter.entries().all(|(property, text)| {
        let value = record.value(property);
        match schema.column(property) {
            Some(column) => matches(column, value, text),
            None => contains_ignore_case(&value.to_string(), text),
        }
    });
    if !columns_match {
        return false;
    }

    match filter.global() {
        Some(query) => schema
            .iter()
            .any(|column| matches(column, record.value(column.property()), query)),
        None => true,
    }
}

/// Keep the records matching a filter, in input order
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    schema: &Schema,
    filter: &FilterSpec,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|record| filter.is_empty() || record_matches(schema, record, filter))
        .collect()
}

/// Byte range of a match inside a displayed string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Non-overlapping, case-insensitive occurrences of `query` in `text`
///
/// Spans index into `text` itself, so a renderer can slice it directly.
pub fn highlight(text: &str, query: &str) -> Vec<MatchSpan> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    // Lowercasing can change byte lengths; remember which original char
    // every lowered byte came from.
    let mut lowered = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lower);
            origin.extend(std::iter::repeat_n((start, end), lowered.len() - before));
        }
    }

    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(found) = lowered[from..].find(&needle) {
        let start = from + found;
        let end = start + needle.len();
        spans.push(MatchSpan {
            start: origin[start].0,
            end: origin[end - 1].1,
        });
        from = end;
    }
    spans
}

/// Highlights for several queries, merged into sorted disjoint spans
pub fn highlight_all<'q>(text: &str, queries: impl IntoIterator<Item = &'q str>) -> Vec<MatchSpan> {
    let mut spans: Vec<MatchSpan> = queries
        .into_iter()
        .flat_map(|query| highlight(text, query))
        .collect();
    spans.sort_by_key(|span| span.start);

    let mut merged: Vec<MatchSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::{EnumOption, Fields, RecordId};
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new(vec![
            Column::string("name"),
            Column::number("salary"),
            Column::boolean("active"),
            Column::string("country").with_enum(vec![
                EnumOption::new("de", "Germany"),
                EnumOption::new("fi", "Finland"),
            ]),
        ])
        .unwrap()
    }

    fn record(id: u64, name: &str, salary: f64, active: bool, country: &str) -> Record {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::from(name));
        fields.insert("salary".to_string(), Value::from(salary));
        fields.insert("active".to_string(), Value::Bool(active));
        fields.insert("country".to_string(), Value::from(country));
        Record::new(RecordId(id), fields)
    }

    fn sample() -> Vec<Record> {
        vec![
            record(1, "Dana", 1200.0, true, "de"),
            record(2, "Hannes", 900.0, false, "fi"),
            record(3, "Joe", 1500.0, true, "fi"),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let schema = schema();
        let name = schema.require("name").unwrap();
        assert!(matches(name, &Value::from("Hannes"), "AN"));
        assert!(matches(name, &Value::from("Hannes"), ""));
        assert!(!matches(name, &Value::from("Joe"), "an"));
        // Missing values display as empty text
        assert!(!matches(name, &Value::Null, "a"));
        assert!(matches(name, &Value::Null, ""));
    }

    #[test]
    fn test_matches_displayed_value() {
        let schema = schema();
        let country = schema.require("country").unwrap();
        assert!(matches(country, &Value::from("fi"), "finl"));
        assert!(!matches(country, &Value::from("de"), "de"));

        let active = schema.require("active").unwrap();
        assert!(matches(active, &Value::Bool(true), "tru"));
        assert!(!matches(active, &Value::Bool(false), "tru"));
    }

    #[test]
    fn test_filter_ands_columns() {
        let records = sample();
        let schema = schema();

        let spec = FilterSpec::new().with("name", "a").with("country", "fin");
        assert_eq!(ids(&filter(&records, &schema, &spec)), vec![2]);

        let spec = FilterSpec::new().with("salary", "00");
        assert_eq!(ids(&filter(&records, &schema, &spec)), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = sample();
        let kept = filter(&records, &schema(), &FilterSpec::new());
        assert_eq!(ids(&kept), vec![1, 2, 3]);
    }

    #[test]
    fn test_set_empty_text_removes_entry() {
        let mut spec = FilterSpec::new().with("name", "a");
        spec.set("name", "");
        assert!(spec.is_empty());
        assert_eq!(spec.get("name"), None);
    }

    #[test]
    fn test_global_query_matches_any_column() {
        let records = sample();
        let schema = schema();

        let mut spec = FilterSpec::new();
        spec.set_global("germ");
        assert_eq!(ids(&filter(&records, &schema, &spec)), vec![1]);

        spec.set_global("1500");
        assert_eq!(ids(&filter(&records, &schema, &spec)), vec![3]);

        spec.set("name", "dana");
        assert!(filter(&records, &schema, &spec).is_empty());
    }

    #[test]
    fn test_highlight_spans() {
        assert_eq!(
            highlight("Banana", "AN"),
            vec![MatchSpan { start: 1, end: 3 }, MatchSpan { start: 3, end: 5 }]
        );
        assert!(highlight("Banana", "").is_empty());
        assert!(highlight("Banana", "x").is_empty());
    }

    #[test]
    fn test_highlight_maps_back_to_original_bytes() {
        // 'İ' lowercases to two chars; spans must still slice the original
        let text = "İstanbul";
        let spans = highlight(text, "stan");
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "stan");
    }

    #[test]
    fn test_highlight_all_merges_overlaps() {
        assert_eq!(
            highlight_all("abcdef", ["bc", "cde", "f"]),
            vec![MatchSpan { start: 1, end: 6 }]
        );
        assert_eq!(
            highlight_all("abcdef", ["a", "e"]),
            vec![MatchSpan { start: 0, end: 1 }, MatchSpan { start: 4, end: 5 }]
        );
    }
}
