//! Single-cell edit session
//!
//! At most one cell is being edited at a time. The session moves between
//! `Idle` and `Editing`:
//!
//! - `begin` starts an edit (discarding any draft on a different cell)
//! - `update_draft` replaces the draft without validating it
//! - `commit` validates the draft and writes it into the record in place
//! - `cancel` drops the draft without touching the record
//!
//! A commit that fails validation leaves the session `Editing` with the
//! draft intact so the user can correct it.

use gridline_core::{GridError, RecordId, Result, Schema, Value};
use serde::Serialize;

use crate::RecordStore;

/// The cell currently being edited and its uncommitted draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingEdit {
    pub record_id: RecordId,
    pub column: String,
    pub draft: Value,
}

impl PendingEdit {
    pub fn is_cell(&self, record_id: RecordId, column: &str) -> bool {
        self.record_id == record_id && self.column == column
    }
}

/// A committed cell change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellChange {
    pub record_id: RecordId,
    pub column: String,
    /// Value before the commit
    pub original_value: Value,
    /// Value written by the commit
    pub new_value: Value,
}

impl CellChange {
    pub fn is_noop(&self) -> bool {
        self.original_value == self.new_value
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(PendingEdit),
}

impl EditSession {
    pub fn pending(&self) -> Option<&PendingEdit> {
        match self {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Is this exact cell being edited?
    pub fn is_editing_cell(&self, record_id: RecordId, column: &str) -> bool {
        self.pending()
            .is_some_and(|edit| edit.is_cell(record_id, column))
    }

    /// Start editing a cell
    ///
    /// The target is checked before anything else changes: if the column is
    /// not editable or the record is missing, an edit already in progress is
    /// left alone. Beginning the cell that is already being edited keeps its
    /// draft.
    pub fn begin(
        &mut self,
        schema: &Schema,
        store: &RecordStore,
        record_id: RecordId,
        column: &str,
    ) -> Result<()> {
        let col = schema.require(column)?;
        if !col.is_editable() {
            return Err(GridError::NotEditable(column.to_string()));
        }
        let record = store
            .get(record_id)
            .ok_or(GridError::RecordNotFound(record_id))?;

        if self.is_editing_cell(record_id, column) {
            return Ok(());
        }
        if let Some(previous) = self.cancel() {
            tracing::debug!(
                record = %previous.record_id,
                column = %previous.column,
                "Discarded draft superseded by a new edit"
            );
        }

        *self = Self::Editing(PendingEdit {
            record_id,
            column: column.to_string(),
            draft: record.value(column).clone(),
        });
        Ok(())
    }

    /// Replace the draft; validation waits for `commit`
    pub fn update_draft(&mut self, value: Value) -> Result<()> {
        match self {
            Self::Idle => Err(GridError::NoActiveEdit),
            Self::Editing(edit) => {
                edit.draft = value;
                Ok(())
            }
        }
    }

    /// Validate the draft and write it into the source record
    pub fn commit(&mut self, schema: &Schema, store: &mut RecordStore) -> Result<CellChange> {
        let Self::Editing(edit) = self else {
            return Err(GridError::NoActiveEdit);
        };
        let record_id = edit.record_id;
        let column_name = edit.column.clone();

        let column = schema.require(&column_name)?;
        let new_value = match column.validate(&edit.draft) {
            Ok(value) => value,
            Err(source) => {
                tracing::warn!(
                    record = %record_id,
                    column = %column_name,
                    error = %source,
                    "Rejected cell commit"
                );
                return Err(GridError::validation(column_name, source));
            }
        };

        let Some(record) = store.get_mut(record_id) else {
            // The record vanished underneath the edit; nothing left to commit to
            *self = Self::Idle;
            return Err(GridError::RecordNotFound(record_id));
        };
        let original_value = record
            .set(column_name.clone(), new_value.clone())
            .unwrap_or_default();
        *self = Self::Idle;

        tracing::info!(record = %record_id, column = %column_name, "Committed cell edit");
        Ok(CellChange {
            record_id,
            column: column_name,
            original_value,
            new_value,
        })
    }

    /// Drop the draft, returning it if there was one
    pub fn cancel(&mut self) -> Option<PendingEdit> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit),
        }
    }
}
