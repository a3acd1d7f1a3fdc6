//! Column schema
//!
//! The schema is supplied once when a grid is built and is immutable for its
//! lifetime. Columns are ordered; the order is the display order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    BooleanKind, CellKind, EditorKind, EnumKind, GridError, NumberKind, Result, TextKind,
    ValidationError, Value,
};

/// Declared semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Boolean,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One allowed value of an enumerated column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumOption {
    /// Stored code
    pub code: Value,
    /// Display label (falls back to the code)
    pub label: Option<String>,
}

impl EnumOption {
    /// Option with a display label
    pub fn new(code: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: Some(label.into()),
        }
    }

    /// Option displayed as its own code
    pub fn code(code: impl Into<Value>) -> Self {
        Self {
            code: code.into(),
            label: None,
        }
    }

    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.code.to_string())
    }
}

/// A column of the grid
///
/// The `CellKind` is chosen from the type and enumeration when the column is
/// built and reused for every format/validate/compare call.
#[derive(Debug, Clone)]
pub struct Column {
    property: String,
    title: String,
    column_type: ColumnType,
    enum_options: Option<Vec<EnumOption>>,
    editable: bool,
    sortable: bool,
    required: bool,
    kind: Arc<dyn CellKind>,
}

impl Column {
    /// Create a column; read-only and sortable by default
    pub fn new(property: impl Into<String>, column_type: ColumnType) -> Self {
        let property = property.into();
        Self {
            title: title_case(&property),
            property,
            column_type,
            enum_options: None,
            editable: false,
            sortable: true,
            required: false,
            kind: select_kind(column_type, None),
        }
    }

    pub fn string(property: impl Into<String>) -> Self {
        Self::new(property, ColumnType::String)
    }

    pub fn number(property: impl Into<String>) -> Self {
        Self::new(property, ColumnType::Number)
    }

    pub fn boolean(property: impl Into<String>) -> Self {
        Self::new(property, ColumnType::Boolean)
    }

    /// Restrict the column to an enumeration of codes
    pub fn with_enum(mut self, options: Vec<EnumOption>) -> Self {
        self.kind = select_kind(self.column_type, Some(&options));
        self.enum_options = Some(options);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn enum_options(&self) -> Option<&[EnumOption]> {
        self.enum_options.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn editor_kind(&self) -> EditorKind {
        self.kind.editor_kind()
    }

    /// Displayed form of a value
    pub fn format(&self, value: &Value) -> String {
        self.kind.format(value)
    }

    /// Validate a draft and return the value to store
    ///
    /// Required columns reject NULL and blank text.
    pub fn validate(&self, draft: &Value) -> std::result::Result<Value, ValidationError> {
        let value = self.kind.validate(draft)?;
        let blank = value.is_null() || value.as_str().is_some_and(|s| s.trim().is_empty());
        if self.required && blank {
            return Err(ValidationError::Required);
        }
        Ok(value)
    }

    /// Compare two non-null values by the column's semantic type
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.kind.compare(a, b)
    }
}

fn select_kind(column_type: ColumnType, options: Option<&[EnumOption]>) -> Arc<dyn CellKind> {
    if let Some(options) = options {
        return Arc::new(EnumKind::new(options.to_vec()));
    }
    match column_type {
        ColumnType::String => Arc::new(TextKind),
        ColumnType::Number => Arc::new(NumberKind),
        ColumnType::Boolean => Arc::new(BooleanKind),
    }
}

/// "first_name" -> "First Name"
fn title_case(property: &str) -> String {
    property
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_true() -> bool {
    true
}

/// Serializable column definition, as found in schema files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub property: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default)]
    pub required: bool,
}

impl TryFrom<ColumnDef> for Column {
    type Error = GridError;

    fn try_from(def: ColumnDef) -> Result<Self> {
        let mut column = Column::new(def.property, def.column_type).sortable(def.sortable);

        match (def.enum_values, def.enum_names) {
            (Some(values), Some(names)) => {
                if values.len() != names.len() {
                    return Err(GridError::InvalidSchema(format!(
                        "column '{}' has {} enum values but {} enum names",
                        column.property,
                        values.len(),
                        names.len()
                    )));
                }
                let options = values
                    .into_iter()
                    .zip(names)
                    .map(|(code, label)| EnumOption::new(code, label))
                    .collect();
                column = column.with_enum(options);
            }
            (Some(values), None) => {
                column = column.with_enum(values.into_iter().map(EnumOption::code).collect());
            }
            (None, Some(_)) => {
                return Err(GridError::InvalidSchema(format!(
                    "column '{}' has enum names without enum values",
                    column.property
                )));
            }
            (None, None) => {}
        }

        if let Some(title) = def.title {
            column = column.with_title(title);
        }
        if def.editable {
            column = column.editable();
        }
        if def.required {
            column = column.required();
        }
        Ok(column)
    }
}

/// Ordered, immutable set of columns
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema, rejecting duplicate property keys
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.property()) {
                return Err(GridError::InvalidSchema(format!(
                    "duplicate column '{}'",
                    column.property()
                )));
            }
        }
        tracing::debug!(columns = columns.len(), "Schema built");
        Ok(Self { columns })
    }

    /// Build a schema from serialized column definitions
    pub fn from_defs(defs: Vec<ColumnDef>) -> Result<Self> {
        let columns = defs
            .into_iter()
            .map(Column::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Find a column by property key
    pub fn column(&self, property: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.property() == property)
    }

    /// Find a column, failing with `UnknownColumn`
    pub fn require(&self, property: &str) -> Result<&Column> {
        self.column(property)
            .ok_or_else(|| GridError::UnknownColumn(property.to_string()))
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_defaults_from_property() {
        assert_eq!(Column::string("name").title(), "Name");
        assert_eq!(Column::string("first_name").title(), "First Name");
        assert_eq!(Column::string("name").with_title("Who").title(), "Who");
    }

    #[test]
    fn test_enum_selects_dropdown_kind() {
        let column = Column::string("country").with_enum(vec![EnumOption::new("fi", "Finland")]);
        assert_eq!(column.editor_kind(), EditorKind::Dropdown);
        assert_eq!(column.format(&Value::from("fi")), "Finland");
        assert_eq!(Column::boolean("active").editor_kind(), EditorKind::Checkbox);
    }

    #[test]
    fn test_required_rejects_null() {
        let column = Column::string("name").required();
        assert_eq!(column.validate(&Value::Null), Err(ValidationError::Required));
        assert_eq!(column.validate(&Value::from("  ")), Err(ValidationError::Required));
        assert_eq!(Column::string("name").validate(&Value::Null), Ok(Value::Null));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Schema::new(vec![Column::string("a"), Column::number("a")]).unwrap_err();
        assert_eq!(err, GridError::InvalidSchema("duplicate column 'a'".to_string()));
    }

    #[test]
    fn test_from_defs() {
        let defs: Vec<ColumnDef> = serde_json::from_str(
            r#"[
                {"property": "name", "type": "string", "editable": true},
                {"property": "salary", "type": "number", "sortable": false},
                {"property": "country", "type": "string",
                 "enum": ["de", "fi"], "enumNames": ["Germany", "Finland"]}
            ]"#,
        )
        .unwrap();
        let schema = Schema::from_defs(defs).unwrap();

        assert_eq!(schema.len(), 3);
        assert!(schema.require("name").unwrap().is_editable());
        assert!(!schema.require("salary").unwrap().is_sortable());
        assert_eq!(
            schema.require("country").unwrap().format(&Value::from("de")),
            "Germany"
        );
        assert_eq!(
            schema.require("missing").unwrap_err(),
            GridError::UnknownColumn("missing".to_string())
        );
    }

    #[test]
    fn test_from_defs_rejects_mismatched_enum_names() {
        let def = ColumnDef {
            property: "country".to_string(),
            column_type: ColumnType::String,
            enum_values: Some(vec![Value::from("de")]),
            enum_names: Some(vec![]),
            title: None,
            editable: false,
            sortable: true,
            required: false,
        };
        assert!(matches!(
            Column::try_from(def),
            Err(GridError::InvalidSchema(_))
        ));
    }
}
