//! Derivation pipeline: filter -> sort -> paginate -> view
//!
//! Both steps are pure functions of their inputs; the same inputs always
//! produce the same rows in the same order.

use gridline_core::{Record, Schema};

use crate::search::{self, FilterSpec};
use crate::sort::{self, NullPosition, SortSpec};
use crate::{
    GridView, HeaderView, PageInfo, PaginationState, PendingEdit, ViewCell, ViewRow, paginate,
};

/// Result of filtering, sorting and locating the page
#[derive(Debug, Clone)]
pub struct Derivation<'a> {
    /// Filtered and sorted records
    pub ordered: Vec<&'a Record>,
    /// Pagination state clamped to the filtered row count
    pub pagination: PaginationState,
}

impl<'a> Derivation<'a> {
    pub fn total_rows(&self) -> usize {
        self.ordered.len()
    }

    /// Records on the current page
    pub fn page_rows(&self) -> &[&'a Record] {
        paginate(&self.ordered, &self.pagination).data
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(&self.pagination, self.total_rows())
    }
}

/// Filter, then sort, then clamp the page to the result
pub fn derive<'a>(
    records: &'a [Record],
    schema: &Schema,
    filter: &FilterSpec,
    sort: &SortSpec,
    pagination: &PaginationState,
    null_position: NullPosition,
) -> Derivation<'a> {
    let filtered = search::filter(records, schema, filter);
    let ordered = sort::order(filtered, schema, sort, null_position);
    let clamped = pagination.clamped(ordered.len());

    if clamped.page != pagination.page {
        tracing::debug!(
            requested = pagination.page,
            page = clamped.page,
            "Clamped page to the filtered row count"
        );
    }
    tracing::debug!(
        source_rows = records.len(),
        rows = ordered.len(),
        page = clamped.page,
        "Derived grid view"
    );

    Derivation {
        ordered,
        pagination: clamped,
    }
}

/// Turn a derivation into renderable headers, rows and cells
pub fn build_view(
    schema: &Schema,
    derivation: &Derivation<'_>,
    filter: &FilterSpec,
    sort: &SortSpec,
    pending_edit: Option<&PendingEdit>,
    page_sizes: &[usize],
) -> GridView {
    let headers = schema
        .iter()
        .map(|column| HeaderView {
            property: column.property().to_string(),
            title: column.title().to_string(),
            sortable: column.is_sortable(),
            editable: column.is_editable(),
            editor: column.editor_kind(),
            sort: sort.direction_of(column.property()),
            sort_priority: sort.priority_of(column.property()),
        })
        .collect();

    let offset = derivation.pagination.offset();
    let rows = derivation
        .page_rows()
        .iter()
        .enumerate()
        .map(|(idx, record)| ViewRow {
            id: record.id,
            position: offset + idx,
            cells: schema
                .iter()
                .map(|column| {
                    let property = column.property();
                    let value = record.value(property).clone();
                    let display = column.format(&value);
                    let queries = filter.get(property).into_iter().chain(filter.global());
                    ViewCell {
                        highlights: search::highlight_all(&display, queries),
                        editing: pending_edit.is_some_and(|edit| edit.is_cell(record.id, property)),
                        property: property.to_string(),
                        value,
                        display,
                    }
                })
                .collect(),
        })
        .collect();

    GridView {
        headers,
        rows,
        page: derivation.page_info(),
        page_sizes: page_sizes.to_vec(),
        sort: sort.clone(),
        filter: filter.clone(),
        pending_edit: pending_edit.cloned(),
    }
}
