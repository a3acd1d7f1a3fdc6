//! Gridline Engine - state and derivation for the headless data grid
//!
//! The engine owns the source collection and the user-controlled state
//! (filter, sort, page, pending edit) and derives the rows a renderer
//! shows from them:
//!
//! - `DataGrid` - facade that applies intents and re-derives the view
//! - `search` - case-insensitive substring filtering and match highlighting
//! - `sort` - stable multi-key sorting and the asc/desc/off toggle cycle
//! - `pagination` - page slicing, clamping and page input coercion
//! - `edit` - the single-cell edit session
//! - `pipeline` - filter -> sort -> paginate -> `GridView`

mod config;
mod edit;
mod grid;
pub mod pagination;
pub mod pipeline;
pub mod search;
pub mod sort;
mod store;
mod view;

pub use config::{GridConfig, SortMode};
pub use edit::{CellChange, EditSession, PendingEdit};
pub use grid::DataGrid;
pub use pagination::{
    Coerced, DEFAULT_PAGE_SIZE, Page, PageInfo, PaginationError, PaginationState, paginate,
    total_pages,
};
pub use pipeline::{Derivation, build_view, derive};
pub use search::{FilterSpec, MatchSpan, highlight};
pub use sort::{NullPosition, RecordComparator, SortDirection, SortKey, SortSpec};
pub use store::RecordStore;
pub use view::{GridView, HeaderView, ViewCell, ViewRow};

// Core types used throughout the engine API
pub use gridline_core::{
    Column, ColumnType, Fields, GridError, Record, RecordId, Result, Schema, ValidationError,
    Value,
};
