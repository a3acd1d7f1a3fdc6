//! Per-column cell behavior
//!
//! Each column gets one `CellKind` when it is constructed. The kind decides
//! how a raw value is displayed (and therefore searched), how a draft is
//! validated and coerced at commit time, how two values compare when
//! sorting, and which editor a renderer should offer.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::Serialize;

use crate::{ColumnType, EnumOption, ValidationError, Value};

/// Editor a renderer should show for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    /// Free text input
    Input,
    /// Numeric input
    Number,
    /// Checkbox / toggle
    Checkbox,
    /// Dropdown over the enumeration options
    Dropdown,
}

/// Formatting, validation and comparison for one column
///
/// NULL values never reach `compare`; the sort engine places them according
/// to its null position before delegating here.
pub trait CellKind: Debug + Send + Sync {
    /// Render a raw value the way it is displayed
    fn format(&self, value: &Value) -> String {
        value.to_string()
    }

    /// Validate a draft and coerce it to the stored representation
    fn validate(&self, draft: &Value) -> Result<Value, ValidationError>;

    /// Compare two non-null values
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.format(a).cmp(&self.format(b))
    }

    /// Editor for this kind of cell
    fn editor_kind(&self) -> EditorKind;
}

/// Plain text column
#[derive(Debug, Clone, Copy, Default)]
pub struct TextKind;

impl CellKind for TextKind {
    fn validate(&self, draft: &Value) -> Result<Value, ValidationError> {
        Ok(match draft {
            Value::Null => Value::Null,
            Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        })
    }

    fn editor_kind(&self) -> EditorKind {
        EditorKind::Input
    }
}

/// Numeric column
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberKind;

impl CellKind for NumberKind {
    fn validate(&self, draft: &Value) -> Result<Value, ValidationError> {
        match draft {
            Value::Null => Ok(Value::Null),
            Value::Number(n) if n.is_finite() => Ok(Value::Number(*n)),
            Value::Number(n) => Err(ValidationError::InvalidNumber(n.to_string())),
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Value::Number(n)),
                _ => Err(ValidationError::InvalidNumber(s.clone())),
            },
            Value::Bool(_) => Err(ValidationError::TypeMismatch {
                expected: ColumnType::Number,
                found: draft.type_name(),
            }),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.to_string().cmp(&b.to_string()),
        }
    }

    fn editor_kind(&self) -> EditorKind {
        EditorKind::Number
    }
}

/// Boolean column
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanKind;

impl BooleanKind {
    /// Parse the textual tokens accepted for booleans
    pub fn parse_token(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
            "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
            _ => None,
        }
    }
}

impl CellKind for BooleanKind {
    fn validate(&self, draft: &Value) -> Result<Value, ValidationError> {
        match draft {
            Value::Null => Ok(Value::Null),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => Self::parse_token(s)
                .map(Value::Bool)
                .ok_or_else(|| ValidationError::InvalidBoolean(s.clone())),
            Value::Number(n) if *n == 0.0 => Ok(Value::Bool(false)),
            Value::Number(n) if *n == 1.0 => Ok(Value::Bool(true)),
            Value::Number(_) => Err(ValidationError::InvalidBoolean(draft.to_string())),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a.as_bool(), b.as_bool()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.to_string().cmp(&b.to_string()),
        }
    }

    fn editor_kind(&self) -> EditorKind {
        EditorKind::Checkbox
    }
}

/// Column restricted to an enumeration of codes
///
/// Displays, searches and sorts by label; stores the code.
#[derive(Debug, Clone)]
pub struct EnumKind {
    options: Vec<EnumOption>,
}

impl EnumKind {
    pub fn new(options: Vec<EnumOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[EnumOption] {
        &self.options
    }

    fn option_for(&self, code: &Value) -> Option<&EnumOption> {
        self.options.iter().find(|opt| &opt.code == code)
    }
}

impl CellKind for EnumKind {
    fn format(&self, value: &Value) -> String {
        match self.option_for(value) {
            Some(opt) => opt.display_label(),
            None => value.to_string(),
        }
    }

    fn validate(&self, draft: &Value) -> Result<Value, ValidationError> {
        if draft.is_null() {
            return Ok(Value::Null);
        }
        if let Some(opt) = self.option_for(draft) {
            return Ok(opt.code.clone());
        }
        // Text typed by a user may spell a non-string code, e.g. "3"
        if let Value::String(text) = draft {
            if let Some(opt) = self.options.iter().find(|opt| &opt.code.to_string() == text) {
                return Ok(opt.code.clone());
            }
        }
        Err(ValidationError::NotInEnum(draft.to_string()))
    }

    fn editor_kind(&self) -> EditorKind {
        EditorKind::Dropdown
    }
}
