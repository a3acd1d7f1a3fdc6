//! `DataGrid`: the engine facade driven by renderer intents
//!
//! Every intent mutates one piece of state and then re-derives the view
//! before returning, so `view()` is always consistent with the source
//! collection, the filter, the sort, the page and the pending edit.

use gridline_core::{
    ColumnType, Fields, GridError, Record, RecordId, Result, Schema, ValidationError, Value,
};

use crate::pagination::{self, PaginationError, PaginationState};
use crate::pipeline;
use crate::{
    CellChange, EditSession, FilterSpec, GridConfig, GridView, PendingEdit, RecordStore,
    SortMode, SortSpec,
};

pub struct DataGrid {
    schema: Schema,
    store: RecordStore,
    config: GridConfig,
    filter: FilterSpec,
    sort: SortSpec,
    pagination: PaginationState,
    edit: EditSession,
    view: GridView,
}

impl DataGrid {
    /// Create a grid with the default configuration
    pub fn new(schema: Schema, rows: impl IntoIterator<Item = Fields>) -> Self {
        Self::with_config(schema, rows, GridConfig::default())
    }

    /// Create a grid; rows are taken as-is, schema constraints apply from
    /// the first edit onwards
    pub fn with_config(
        schema: Schema,
        rows: impl IntoIterator<Item = Fields>,
        config: GridConfig,
    ) -> Self {
        let store = RecordStore::from_rows(rows);
        let pagination = PaginationState::new(1, config.page_size);
        tracing::info!(records = store.len(), columns = schema.len(), "Grid created");

        let mut grid = Self {
            schema,
            store,
            config,
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            pagination,
            edit: EditSession::default(),
            view: GridView::default(),
        };
        grid.refresh();
        grid
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The complete derived state for one render pass
    pub fn view(&self) -> &GridView {
        &self.view
    }

    /// Source collection in source order
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.edit.pending()
    }

    fn refresh(&mut self) {
        let derivation = pipeline::derive(
            self.store.records(),
            &self.schema,
            &self.filter,
            &self.sort,
            &self.pagination,
            self.config.null_position,
        );
        self.view = pipeline::build_view(
            &self.schema,
            &derivation,
            &self.filter,
            &self.sort,
            self.edit.pending(),
            &self.config.available_page_sizes,
        );
        self.pagination = derivation.pagination;
    }

    fn on_filter_changed(&mut self) {
        if self.config.cancel_edit_on_filter {
            if let Some(edit) = self.edit.cancel() {
                tracing::debug!(
                    record = %edit.record_id,
                    column = %edit.column,
                    "Filter change discarded pending edit"
                );
            }
        }
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Set the filter text of one column; empty text clears it
    pub fn set_filter(&mut self, column: &str, text: &str) -> Result<()> {
        self.schema.require(column)?;
        self.filter.set(column, text);
        self.on_filter_changed();
        Ok(())
    }

    /// Set the query matched against every column
    pub fn set_global_search(&mut self, text: &str) {
        self.filter.set_global(text);
        self.on_filter_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.on_filter_changed();
    }

    // ------------------------------------------------------------------
    // Sort
    // ------------------------------------------------------------------

    /// Cycle a column's sort: absent -> ascending -> descending -> absent
    pub fn toggle_sort(&mut self, column: &str) -> Result<()> {
        let col = self.schema.require(column)?;
        if !col.is_sortable() {
            return Err(GridError::NotSortable(column.to_string()));
        }
        self.sort = match self.config.sort_mode {
            SortMode::MultiColumn => self.sort.toggled(column),
            SortMode::SingleColumn => self.sort.toggled_single(column),
        };
        tracing::debug!(column, keys = self.sort.len(), "Sort toggled");
        self.refresh();
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Go to a page; out-of-range pages are clamped
    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = page.max(1);
        self.refresh();
    }

    /// Go to a page given as free text
    ///
    /// Invalid input is coerced (non-positive -> 1, non-numeric -> current
    /// page) and the returned error describes what was wrong with it.
    pub fn set_page_input(&mut self, input: &str) -> Option<PaginationError> {
        let coerced = pagination::coerce_page(input, self.pagination.page);
        if let Some(err) = &coerced.error {
            tracing::warn!(%err, page = coerced.value, "Coerced page input");
        }
        self.set_page(coerced.value);
        coerced.error
    }

    pub fn next_page(&mut self) {
        self.set_page(self.pagination.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.pagination.page.saturating_sub(1));
    }

    /// Change the page size; the current page is re-clamped
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
        self.refresh();
    }

    /// Change the page size from free text, coercing invalid input
    pub fn set_page_size_input(&mut self, input: &str) -> Option<PaginationError> {
        let coerced = pagination::coerce_page_size(input, self.pagination.page_size);
        if let Some(err) = &coerced.error {
            tracing::warn!(%err, page_size = coerced.value, "Coerced page size input");
        }
        self.set_page_size(coerced.value);
        coerced.error
    }

    // ------------------------------------------------------------------
    // Edit session
    // ------------------------------------------------------------------

    pub fn begin_edit(&mut self, record_id: RecordId, column: &str) -> Result<()> {
        self.edit
            .begin(&self.schema, &self.store, record_id, column)?;
        self.refresh();
        Ok(())
    }

    pub fn update_draft(&mut self, value: impl Into<Value>) -> Result<()> {
        self.edit.update_draft(value.into())?;
        self.refresh();
        Ok(())
    }

    /// Validate and write the draft; on failure the edit stays open
    pub fn commit_edit(&mut self) -> Result<CellChange> {
        let result = self.edit.commit(&self.schema, &mut self.store);
        self.refresh();
        result
    }

    /// Discard the draft, returning it if there was one
    pub fn cancel_edit(&mut self) -> Option<PendingEdit> {
        let discarded = self.edit.cancel();
        self.refresh();
        discarded
    }

    /// Flip a boolean cell in one step; NULL becomes false
    ///
    /// Only plain boolean columns qualify. Anything else is rejected before
    /// a pending edit elsewhere is touched.
    pub fn toggle_boolean(&mut self, record_id: RecordId, column: &str) -> Result<CellChange> {
        let col = self.schema.require(column)?;
        if col.column_type() != ColumnType::Boolean || col.enum_options().is_some() {
            return Err(GridError::validation(
                column,
                ValidationError::TypeMismatch {
                    expected: ColumnType::Boolean,
                    found: col.column_type().label(),
                },
            ));
        }
        self.edit
            .begin(&self.schema, &self.store, record_id, column)?;
        let next = match self.edit.pending().map(|edit| &edit.draft) {
            Some(Value::Bool(current)) => Value::Bool(!current),
            _ => Value::Bool(false),
        };
        self.edit.update_draft(next)?;
        self.commit_edit()
    }

    // ------------------------------------------------------------------
    // Source collection
    // ------------------------------------------------------------------

    /// Validate and append a record, returning its new id
    pub fn insert_record(&mut self, fields: Fields) -> Result<RecordId> {
        let fields = validate_fields(&self.schema, fields, false)?;
        let id = self.store.insert(fields);
        tracing::info!(record = %id, "Inserted record");
        self.refresh();
        Ok(id)
    }

    /// Remove a record by id; an edit on it is discarded
    pub fn delete_record(&mut self, record_id: RecordId) -> Result<Record> {
        let record = self
            .store
            .remove(record_id)
            .ok_or(GridError::RecordNotFound(record_id))?;
        self.discard_edit_on(record_id);
        tracing::info!(record = %record_id, "Deleted record");
        self.refresh();
        Ok(record)
    }

    /// Replace every field of a record, keeping its id and position
    pub fn replace_record(&mut self, record_id: RecordId, fields: Fields) -> Result<Fields> {
        if !self.store.contains(record_id) {
            return Err(GridError::RecordNotFound(record_id));
        }
        let fields = validate_fields(&self.schema, fields, true)?;
        let previous = self
            .store
            .replace(record_id, fields)
            .ok_or(GridError::RecordNotFound(record_id))?;
        self.discard_edit_on(record_id);
        tracing::info!(record = %record_id, "Replaced record");
        self.refresh();
        Ok(previous)
    }

    fn discard_edit_on(&mut self, record_id: RecordId) {
        if self
            .edit
            .pending()
            .is_some_and(|edit| edit.record_id == record_id)
        {
            self.edit.cancel();
            tracing::debug!(record = %record_id, "Discarded edit on removed or replaced record");
        }
    }
}

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("records", &self.store.len())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("edit", &self.edit)
            .finish()
    }
}

/// Coerce every schema column present in `fields`
///
/// With `complete`, columns missing from `fields` are checked as NULL so
/// required columns must be supplied.
fn validate_fields(schema: &Schema, mut fields: Fields, complete: bool) -> Result<Fields> {
    for column in schema {
        let property = column.property();
        match fields.get_mut(property) {
            Some(value) => {
                *value = column
                    .validate(value)
                    .map_err(|source| GridError::validation(property, source))?;
            }
            None if complete || column.is_required() => {
                column
                    .validate(&Value::Null)
                    .map_err(|source| GridError::validation(property, source))?;
            }
            None => {}
        }
    }
    Ok(fields)
}
