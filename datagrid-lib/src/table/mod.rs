//! The table component: declared attributes, children, data and per-instance
//! state.

mod columns;
mod data;
mod pagination;
mod state;

pub use data::*;
pub use state::*;

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::binding::Binding;
use crate::column::ColumnRef;
use crate::column::SelectionMode;
use crate::column::TableChild;
use crate::config::EngineConfig;
use crate::menu::ContextMenu;
use crate::render::Component;
use crate::request::RequestParams;
use crate::sort::SortOrder;

/// Options declared on a table.
///
/// Everything here is configuration; what changes between requests lives
/// in [`TableState`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableAttributes {
    /// Client-side widget name.
    pub widget_var: Option<String>,

    /// Enables the paginator.
    pub paginator: bool,
    /// `top`, `bottom` or `both`.
    pub paginator_position: String,
    pub paginator_template: Option<String>,
    pub rows_per_page_template: Option<String>,
    pub paginator_always_visible: bool,
    /// Page size; `0` renders every row.
    pub rows: usize,

    /// `single` or `multiple`.
    pub sort_mode: String,
    /// Default sort binding.
    pub sort_by: Option<Binding>,
    /// Default sort direction.
    pub sort_order: SortOrder,

    /// Row selection mode.
    pub selection_mode: Option<SelectionMode>,
    /// Binding evaluated against a row to produce its key.
    pub row_key: Option<Binding>,

    pub scrollable: bool,
    pub live_scroll: bool,
    /// Rows fetched per live scroll step.
    pub scroll_rows: usize,
    pub scroll_limit: Option<usize>,
    pub scroll_width: Option<String>,
    pub scroll_height: Option<String>,

    pub resizable_columns: bool,
    pub live_resize: bool,
    pub draggable_columns: bool,

    pub editable: bool,
    /// `row` or `cell`.
    pub edit_mode: String,
    pub cell_separator: Option<String>,

    /// Client event triggering a filter request; falls back to the engine default.
    pub filter_event: Option<String>,
    /// Filter delay in milliseconds; falls back to the engine default.
    pub filter_delay: Option<u32>,

    /// Text of the row shown when there is no data.
    pub empty_message: String,
    pub sticky_header: bool,
}

impl Default for TableAttributes {
    fn default() -> Self {
        Self {
            widget_var: None,
            paginator: false,
            paginator_position: "both".to_string(),
            paginator_template: None,
            rows_per_page_template: None,
            paginator_always_visible: true,
            rows: 0,
            sort_mode: "single".to_string(),
            sort_by: None,
            sort_order: SortOrder::Ascending,
            selection_mode: None,
            row_key: None,
            scrollable: false,
            live_scroll: false,
            scroll_rows: 0,
            scroll_limit: None,
            scroll_width: None,
            scroll_height: None,
            resizable_columns: false,
            live_resize: false,
            draggable_columns: false,
            editable: false,
            edit_mode: "row".to_string(),
            cell_separator: None,
            filter_event: None,
            filter_delay: None,
            empty_message: "No records found.".to_string(),
            sticky_header: false,
        }
    }
}

/// A data table instance.
///
/// Owns its children, its data source and all request-scoped state. The
/// resolved column list and the rendered column count are cached on the
/// instance and rebuilt on demand.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::model::Record;
/// use datagrid_lib::table::{DataSource, DataTable, TableAttributes};
///
/// let table = DataTable::new("cars", TableAttributes::default())
///     .with_child(Column::new("brand").field("#{car.brand}"))
///     .with_data(DataSource::List(vec![Record::new().set("brand", "Volvo")]));
///
/// assert_eq!(table.columns()[0].key(), "cars:brand");
/// assert_eq!(table.row_count(), 1);
/// ```
pub struct DataTable {
    client_id: String,
    config: EngineConfig,
    /// Declared options.
    pub attrs: TableAttributes,
    children: Vec<TableChild>,
    data: DataSource,
    /// Request-scoped state.
    pub state: TableState,
    header: Option<Arc<dyn Component>>,
    footer: Option<Arc<dyn Component>>,
    empty_message: Option<Arc<dyn Component>>,
    context_menu: Option<ContextMenu>,
    columns: OnceCell<Vec<ColumnRef>>,
    columns_count: OnceCell<usize>,
}

impl DataTable {
    /// Creates a table with the given client id and attributes.
    pub fn new(client_id: impl Into<String>, attrs: TableAttributes) -> Self {
        let state = TableState::from_attributes(&attrs);
        Self {
            client_id: client_id.into(),
            config: EngineConfig::default(),
            attrs,
            children: Vec::new(),
            data: DataSource::Empty,
            state,
            header: None,
            footer: None,
            empty_message: None,
            context_menu: None,
            columns: OnceCell::new(),
            columns_count: OnceCell::new(),
        }
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: impl Into<TableChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the data source.
    pub fn with_data(mut self, data: DataSource) -> Self {
        self.data = data;
        self
    }

    /// Sets the header facet.
    pub fn with_header(mut self, header: Arc<dyn Component>) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the footer facet.
    pub fn with_footer(mut self, footer: Arc<dyn Component>) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets the facet rendered instead of the empty message text.
    pub fn with_empty_message(mut self, facet: Arc<dyn Component>) -> Self {
        self.empty_message = Some(facet);
        self
    }

    /// Attaches a context menu.
    pub fn with_context_menu(mut self, menu: ContextMenu) -> Self {
        self.context_menu = Some(menu);
        self
    }

    /// The table's client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Declared children in order.
    pub fn children(&self) -> &[TableChild] {
        &self.children
    }

    /// Appends a child and drops the cached column list.
    pub fn add_child(&mut self, child: impl Into<TableChild>) {
        self.children.push(child.into());
        self.invalidate_columns();
    }

    /// Header facet.
    pub fn header(&self) -> Option<&Arc<dyn Component>> {
        self.header.as_ref()
    }

    /// Footer facet.
    pub fn footer(&self) -> Option<&Arc<dyn Component>> {
        self.footer.as_ref()
    }

    /// Empty message facet.
    pub fn empty_message(&self) -> Option<&Arc<dyn Component>> {
        self.empty_message.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Name of the request parameter `{clientId}_{suffix}`.
    pub fn param_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.client_id, suffix)
    }

    /// Reads the request parameter `{clientId}_{suffix}`.
    pub fn param<'p>(&self, params: &'p RequestParams, suffix: &str) -> Option<&'p str> {
        params.get(&self.param_name(suffix))
    }

    /// Returns `true` if the request carries `{clientId}_{suffix}`.
    pub fn has_param(&self, params: &RequestParams, suffix: &str) -> bool {
        params.contains(&self.param_name(suffix))
    }

    /// Returns `true` if this table is the source of the partial request.
    pub fn is_request_source(&self, params: &RequestParams) -> bool {
        params.get(&self.config.source_param) == Some(self.client_id.as_str())
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("client_id", &self.client_id)
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("data", &self.data)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
