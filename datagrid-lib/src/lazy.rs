//! Lazy data bridge: delegates paging, sorting and filtering to an
//! external provider.

use std::collections::BTreeMap;

use log::debug;

use crate::error::Result;
use crate::filter::FilterMatchMode;
use crate::filter::GLOBAL_FILTER;
use crate::model::Record;
use crate::model::RowKey;
use crate::request::RequestContext;
use crate::sort::SortOrder;
use crate::sort::SortSpec;
use crate::sort::sort_rows;
use crate::table::DataTable;
use crate::table::RowKeyModel;
use crate::table::row_key_by_field;

/// What a provider is asked to load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Offset of the first row.
    pub offset: usize,
    /// Maximum number of rows.
    pub limit: usize,
    pub sort: SortSpec,
    /// Filter values by row field; the global filter is under `globalFilter`.
    pub filters: BTreeMap<String, String>,
}

/// An external data source that pages, sorts and filters by itself.
///
/// The table keeps exactly one loaded window: every load replaces the
/// previous one.
pub trait LazyDataModel: Send {
    /// Loads one window of rows.
    fn load(&mut self, request: &LoadRequest) -> Vec<Record>;

    fn set_page_size(&mut self, page_size: usize);

    fn page_size(&self) -> usize;

    /// Replaces the loaded window; `None` drops it.
    fn set_wrapped_data(&mut self, rows: Option<Vec<Record>>);

    /// The loaded window.
    fn wrapped_data(&self) -> Option<&[Record]>;

    /// Total number of rows the provider can serve.
    fn row_count(&self) -> usize;

    /// Row-key capability, if the provider has one.
    fn as_row_key_model(&self) -> Option<&dyn RowKeyModel> {
        None
    }
}

/// Lazy provider over rows held in memory.
///
/// Filters, sorts and pages its rows on every load, the way a database
/// backed provider would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLazyModel {
    rows: Vec<Record>,
    key_field: Option<String>,
    page_size: usize,
    window: Option<Vec<Record>>,
    row_count: usize,
    loads: usize,
}

impl InMemoryLazyModel {
    /// Creates a provider over the given rows.
    pub fn new(rows: Vec<Record>) -> Self {
        let row_count = rows.len();
        Self {
            rows,
            row_count,
            ..Self::default()
        }
    }

    /// Enables row keys read from the given field.
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }

    /// Number of loads served so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    fn matches(&self, row: &Record, filters: &BTreeMap<String, String>) -> bool {
        filters.iter().all(|(field, value)| {
            if field == GLOBAL_FILTER {
                row.fields()
                    .values()
                    .any(|cell| FilterMatchMode::Contains.matches(&cell.to_string(), value))
            } else {
                let cell = row.get_path(field).map(|v| v.to_string()).unwrap_or_default();
                FilterMatchMode::StartsWith.matches(&cell, value)
            }
        })
    }
}

impl LazyDataModel for InMemoryLazyModel {
    fn load(&mut self, request: &LoadRequest) -> Vec<Record> {
        self.loads += 1;
        let mut rows: Vec<Record> = self
            .rows
            .iter()
            .filter(|row| self.matches(row, &request.filters))
            .cloned()
            .collect();

        let keys: Vec<(String, SortOrder)> = match &request.sort {
            SortSpec::Single {
                field: Some(field),
                order,
            } => vec![(field.clone(), *order)],
            SortSpec::Single { field: None, .. } => Vec::new(),
            SortSpec::Multi(metas) => metas
                .iter()
                .filter_map(|m| m.sort_field.clone().map(|f| (f, m.order)))
                .collect(),
        };
        sort_rows(&mut rows, &keys);

        self.row_count = rows.len();
        rows.into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect()
    }

    fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn set_wrapped_data(&mut self, rows: Option<Vec<Record>>) {
        self.window = rows;
    }

    fn wrapped_data(&self) -> Option<&[Record]> {
        self.window.as_deref()
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn as_row_key_model(&self) -> Option<&dyn RowKeyModel> {
        self.key_field.as_ref().map(|_| self as &dyn RowKeyModel)
    }
}

impl RowKeyModel for InMemoryLazyModel {
    fn row_key(&self, row: &Record) -> RowKey {
        row_key_by_field(row, self.key_field.as_deref().unwrap_or_default())
    }

    fn row_data(&self, key: &str) -> Option<Record> {
        self.rows.iter().find(|row| self.row_key(row).as_str() == key).cloned()
    }
}

impl DataTable {
    /// Loads the current page from the lazy provider.
    ///
    /// The provider's page size follows the table's page size and the loaded
    /// window replaces the previous one. When this table is the request
    /// source and a paginator or live scroll is active, the provider's row
    /// count is surfaced as the `totalRecords` callback parameter.
    pub fn load_lazy_data(&mut self, ctx: &mut RequestContext) -> Result<()> {
        if !self.is_lazy() {
            return Ok(());
        }
        let request = LoadRequest {
            offset: self.state.first,
            limit: self.state.rows,
            sort: self.sort_spec()?,
            filters: self.lazy_filters(),
        };
        debug!(
            "lazy load of {} at offset {} limit {}",
            self.client_id(),
            request.offset,
            request.limit
        );

        let surface_count = self.is_request_source(ctx.params())
            && (self.attrs.paginator || self.attrs.live_scroll);
        if let Some(model) = self.lazy_model_mut() {
            let rows = model.load(&request);
            model.set_page_size(request.limit);
            model.set_wrapped_data(Some(rows));
            if surface_count {
                ctx.add_callback_param("totalRecords", model.row_count());
            }
        }
        Ok(())
    }

    /// Loads an explicit scroll window from the lazy provider.
    pub fn load_lazy_scroll_data(&mut self, offset: usize, rows: usize) -> Result<()> {
        if !self.is_lazy() {
            return Ok(());
        }
        let request = LoadRequest {
            offset,
            limit: rows,
            sort: self.sort_spec()?,
            filters: self.lazy_filters(),
        };
        debug!("lazy scroll load of {} at offset {} limit {}", self.client_id(), offset, rows);

        if let Some(model) = self.lazy_model_mut() {
            let loaded = model.load(&request);
            model.set_page_size(rows);
            model.set_wrapped_data(Some(loaded));
        }
        Ok(())
    }

    /// Drops the provider's loaded window.
    pub fn clear_lazy_cache(&mut self) {
        if let Some(model) = self.lazy_model_mut() {
            model.set_wrapped_data(None);
        }
    }
}
