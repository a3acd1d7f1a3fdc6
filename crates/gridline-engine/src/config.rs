//! Grid configuration

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_PAGE_SIZE, NullPosition};

/// How a header click changes the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Clicked columns are appended to the existing keys
    #[default]
    MultiColumn,
    /// A click replaces every other key
    SingleColumn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows per page when the grid is created
    pub page_size: usize,
    /// Page sizes offered to the user
    pub available_page_sizes: Vec<usize>,
    pub sort_mode: SortMode,
    pub null_position: NullPosition,
    /// Changing a filter discards an in-progress edit
    pub cancel_edit_on_filter: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            available_page_sizes: vec![10, 25, 50, 100],
            sort_mode: SortMode::MultiColumn,
            null_position: NullPosition::Last,
            cancel_edit_on_filter: true,
        }
    }
}
