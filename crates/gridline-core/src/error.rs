//! Error types for Gridline

use thiserror::Error;

use crate::{ColumnType, RecordId};

/// Core error type for grid operations
///
/// Every variant is recoverable: an operation that fails leaves the grid in
/// the state it was in before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Column '{0}' is not editable")]
    NotEditable(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("No edit in progress")]
    NoActiveEdit,

    #[error("Invalid value for column '{column}': {source}")]
    Validation {
        column: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl GridError {
    /// Attach a column name to a validation failure
    pub fn validation(column: impl Into<String>, source: ValidationError) -> Self {
        Self::Validation {
            column: column.into(),
            source,
        }
    }
}

/// Reasons a draft value is rejected by a column
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ColumnType,
        found: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' is not a boolean")]
    InvalidBoolean(String),

    #[error("'{0}' is not one of the allowed values")]
    NotInEnum(String),

    #[error("a value is required")]
    Required,
}

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
