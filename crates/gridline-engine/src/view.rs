//! Derived state handed to the renderer

use gridline_core::{EditorKind, RecordId, Value};
use serde::Serialize;

use crate::{FilterSpec, MatchSpan, PageInfo, PendingEdit, SortDirection, SortSpec};

/// Column header with its current sort state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub property: String,
    pub title: String,
    pub sortable: bool,
    pub editable: bool,
    pub editor: EditorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    /// 0-based priority within the sort spec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_priority: Option<usize>,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCell {
    pub property: String,
    /// Stored value
    pub value: Value,
    /// Displayed text (enum label, boolean token, ...)
    pub display: String,
    /// Filter matches inside `display`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<MatchSpan>,
    /// This cell has the pending edit
    pub editing: bool,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub id: RecordId,
    /// 0-based index in the filtered and sorted sequence
    pub position: usize,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn cell(&self, property: &str) -> Option<&ViewCell> {
        self.cells.iter().find(|c| c.property == property)
    }

    /// Displayed text of a cell, empty if the column is unknown
    pub fn display(&self, property: &str) -> &str {
        self.cell(property).map(|c| c.display.as_str()).unwrap_or("")
    }
}

/// Everything a renderer needs for one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<ViewRow>,
    pub page: PageInfo,
    pub page_sizes: Vec<usize>,
    pub sort: SortSpec,
    pub filter: FilterSpec,
    pub pending_edit: Option<PendingEdit>,
}

impl GridView {
    pub fn row(&self, id: RecordId) -> Option<&ViewRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Ids of the rows on the current page, in display order
    pub fn ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|r| r.id).collect()
    }
}
