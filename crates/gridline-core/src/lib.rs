//! Gridline Core - shared types for the headless data grid
//!
//! This crate provides the data model every other Gridline crate depends on:
//!
//! - `Value` - scalar cell values (null, boolean, number, string)
//! - `Record` / `RecordId` - identified rows of the source collection
//! - `Column` / `Schema` - the declarative column schema
//! - `CellKind` - per-column formatting, validation and comparison
//! - `GridError` / `ValidationError` - the error taxonomy

mod cell_kind;
mod error;
mod record;
mod schema;
mod types;

pub use cell_kind::*;
pub use error::*;
pub use record::*;
pub use schema::*;
pub use types::*;
