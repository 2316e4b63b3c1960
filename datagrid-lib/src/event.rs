//! Event synthesis: turns a generic behavior notification plus the request
//! parameters into a typed table event.

use log::debug;

use crate::column::ColumnRef;
use crate::error::LookupError;
use crate::error::ParseError;
use crate::error::Result;
use crate::filter::FilterMap;
use crate::menu::MenuItem;
use crate::model::Record;
use crate::request::RequestContext;
use crate::request::RequestParams;
use crate::request::suffix;
use crate::sort::SortOrder;
use crate::table::DataTable;

/// Request lifecycle phase an event is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseId {
    #[default]
    AnyPhase,
    ApplyRequestValues,
    ProcessValidations,
    UpdateModelValues,
    InvokeApplication,
}

/// A raw "something happened" notification from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorEvent {
    /// Logical event name, e.g. `rowSelect`.
    pub name: String,
    pub phase: PhaseId,
    /// Client id of the component that fired it.
    pub source: String,
}

impl BehaviorEvent {
    /// Creates a notification delivered in the invoke application phase.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: PhaseId::InvokeApplication,
            source: source.into(),
        }
    }

    /// Sets the phase.
    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = phase;
        self
    }
}

/// How a row was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOrigin {
    Row,
    Radio,
    Checkbox,
    DoubleClick,
    ContextMenu,
}

/// How a row was unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnselectOrigin {
    Row,
    Checkbox,
}

/// Which row edit notification arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEditKind {
    Init,
    Save,
    Cancel,
}

/// A typed table event.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    Select {
        origin: SelectOrigin,
        row: Record,
    },
    Unselect {
        origin: UnselectOrigin,
        row: Record,
    },
    Page {
        page: usize,
    },
    Sort {
        column: ColumnRef,
        order: SortOrder,
    },
    Filter {
        filtered_value: Option<Vec<Record>>,
        filters: FilterMap,
    },
    RowEdit {
        kind: RowEditKind,
        index: usize,
        row: Record,
    },
    ColumnResize {
        column: ColumnRef,
        width: i64,
        height: i64,
    },
    ToggleSelect {
        checked: bool,
    },
    RowToggle {
        visible: bool,
        index: usize,
        row: Record,
    },
    CellEdit {
        row_index: usize,
        column: ColumnRef,
    },
    /// A context menu item was clicked.
    MenuAction {
        item: MenuItem,
    },
    /// The notification, delivered unchanged.
    Forwarded(BehaviorEvent),
}

/// A typed event together with the phase of the notification it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedEvent {
    pub phase: PhaseId,
    pub event: TableEvent,
}

/// Event names a table understands.
pub const EVENT_NAMES: [&str; 18] = [
    "page",
    "sort",
    "filter",
    "rowSelect",
    "rowUnselect",
    "rowEdit",
    "rowEditInit",
    "rowEditCancel",
    "colResize",
    "toggleSelect",
    "colReorder",
    "contextMenu",
    "rowSelectRadio",
    "rowSelectCheckbox",
    "rowUnselectCheckbox",
    "rowDblselect",
    "rowToggle",
    "cellEdit",
];

/// Parses a pixel size sent as a whole number.
pub(crate) fn parse_size(params: &RequestParams, name: &str) -> std::result::Result<i64, ParseError> {
    let raw = params.require(name)?;
    raw.trim().parse().map_err(|_| ParseError::integer(name, raw))
}

/// Parses `rowIndex,cellIndex`.
pub(crate) fn parse_cell_info(name: &str, raw: &str) -> std::result::Result<(usize, usize), ParseError> {
    let mut parts = raw.split(',');
    let (Some(row), Some(cell), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::malformed(name, raw));
    };
    let row = row.trim().parse().map_err(|_| ParseError::integer(name, raw))?;
    let cell = cell.trim().parse().map_err(|_| ParseError::integer(name, raw))?;
    Ok((row, cell))
}

impl DataTable {
    /// Event names this table understands.
    pub fn event_names(&self) -> &'static [&'static str] {
        &EVENT_NAMES
    }

    /// Row at an index of the current window.
    pub fn require_row(&self, index: usize) -> std::result::Result<Record, LookupError> {
        self.row_at(index)
            .cloned()
            .ok_or(LookupError::RowIndex { index })
    }

    /// Locates the cell of a `{clientId}_cellInfo` parameter.
    ///
    /// The cell index counts rendered columns only.
    pub fn locate_cell(&self, params: &RequestParams) -> Result<(usize, ColumnRef)> {
        let name = self.param_name(suffix::CELL_INFO);
        let (row_index, cell_index) = parse_cell_info(&name, params.require(&name)?)?;
        let column = self
            .ui_columns()
            .into_iter()
            .filter(|(_, view)| view.is_rendered())
            .nth(cell_index)
            .map(|(column, _)| column.clone())
            .ok_or(LookupError::CellIndex { index: cell_index })?;
        Ok((row_index, column))
    }

    fn row_by_key(&self, params: &RequestParams, suffix: &str) -> Result<Record> {
        let key = params.require(&self.param_name(suffix))?;
        self.row_data(key)?
            .ok_or_else(|| LookupError::row_key(key).into())
    }

    fn row_by_index(&self, params: &RequestParams, suffix: &str) -> Result<(usize, Record)> {
        let index = params.parse_usize(&self.param_name(suffix))?;
        Ok((index, self.require_row(index)?))
    }

    /// Synthesizes a typed event from a notification.
    ///
    /// Returns `None` when this table is not the source of the request; the
    /// notification is then the host's to deliver. Unknown names and
    /// `colReorder` come back as [`TableEvent::Forwarded`].
    pub fn queue_event(
        &self,
        behavior: BehaviorEvent,
        params: &RequestParams,
    ) -> Result<Option<SynthesizedEvent>> {
        if !self.is_request_source(params) {
            return Ok(None);
        }

        let phase = behavior.phase;
        let event = match behavior.name.as_str() {
            name @ ("rowSelect" | "rowSelectRadio" | "rowSelectCheckbox" | "rowDblselect"
            | "contextMenu") => {
                let origin = match name {
                    "rowSelectRadio" => SelectOrigin::Radio,
                    "rowSelectCheckbox" => SelectOrigin::Checkbox,
                    "rowDblselect" => SelectOrigin::DoubleClick,
                    "contextMenu" => SelectOrigin::ContextMenu,
                    _ => SelectOrigin::Row,
                };
                TableEvent::Select {
                    origin,
                    row: self.row_by_key(params, suffix::INSTANT_SELECTED_ROW_KEY)?,
                }
            }
            name @ ("rowUnselect" | "rowUnselectCheckbox") => TableEvent::Unselect {
                origin: if name == "rowUnselectCheckbox" {
                    UnselectOrigin::Checkbox
                } else {
                    UnselectOrigin::Row
                },
                row: self.row_by_key(params, suffix::INSTANT_UNSELECTED_ROW_KEY)?,
            },
            "page" => {
                let rows = self.rows_to_render();
                let first = params.parse_usize(&self.param_name(suffix::FIRST))?;
                TableEvent::Page {
                    page: if rows > 0 { first / rows } else { 0 },
                }
            }
            "sort" => {
                let keys = params.require(&self.param_name(suffix::SORT_KEY))?;
                let dirs = params.require(&self.param_name(suffix::SORT_DIR))?;
                let (key, dir) = if self.is_multi_sort() {
                    let last = |list: &str| list.rsplit(',').next().unwrap_or_default().trim().to_string();
                    (last(keys), last(dirs))
                } else {
                    (keys.to_string(), dirs.to_string())
                };
                TableEvent::Sort {
                    column: self.find_column(&key)?,
                    order: SortOrder::parse(&dir)?,
                }
            }
            "filter" => TableEvent::Filter {
                filtered_value: self.state.filtered_value.clone(),
                filters: self.state.filters.clone(),
            },
            name @ ("rowEdit" | "rowEditCancel" | "rowEditInit") => {
                let (index, row) = self.row_by_index(params, suffix::ROW_EDIT_INDEX)?;
                let kind = match name {
                    "rowEditInit" => RowEditKind::Init,
                    "rowEditCancel" => RowEditKind::Cancel,
                    _ => RowEditKind::Save,
                };
                TableEvent::RowEdit { kind, index, row }
            }
            "colResize" => {
                let column_id = params.require(&self.param_name(suffix::COLUMN_ID))?;
                TableEvent::ColumnResize {
                    column: self.find_column(column_id)?,
                    width: parse_size(params, &self.param_name(suffix::WIDTH))?,
                    height: parse_size(params, &self.param_name(suffix::HEIGHT))?,
                }
            }
            "toggleSelect" => TableEvent::ToggleSelect {
                checked: self
                    .param(params, suffix::CHECKED)
                    .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            },
            "rowToggle" => {
                let visible = self.has_param(params, suffix::ROW_EXPANSION);
                let index_suffix = if visible {
                    suffix::EXPANDED_ROW_INDEX
                } else {
                    suffix::COLLAPSED_ROW_INDEX
                };
                let (index, row) = self.row_by_index(params, index_suffix)?;
                TableEvent::RowToggle {
                    visible,
                    index,
                    row,
                }
            }
            "cellEdit" => {
                let (row_index, column) = self.locate_cell(params)?;
                TableEvent::CellEdit { row_index, column }
            }
            _ => TableEvent::Forwarded(behavior),
        };

        Ok(Some(SynthesizedEvent { phase, event }))
    }

    /// Reads the behavior notification carried by the request, if this table
    /// fired it, and queues the synthesized event on the context.
    pub fn decode_behaviors(&self, ctx: &mut RequestContext) -> Result<()> {
        let Some(name) = ctx.params().get(&self.config().behavior_event_param) else {
            return Ok(());
        };
        let behavior = BehaviorEvent::new(name, self.client_id());
        if let Some(event) = self.queue_event(behavior, ctx.params())? {
            debug!("queued {:?} on {}", event.event, self.client_id());
            ctx.queue_event(event);
        }
        Ok(())
    }

    /// Queues the click on a context menu item, if the request carries one.
    pub fn decode_menu_action(&self, ctx: &mut RequestContext) -> Result<()> {
        let Some(menu) = self.context_menu() else {
            return Ok(());
        };
        if let Some(item) = menu.clicked_item(ctx.params())? {
            debug!("menu item {} clicked on {}", item.label, self.client_id());
            let event = SynthesizedEvent {
                phase: PhaseId::InvokeApplication,
                event: TableEvent::MenuAction { item: item.clone() },
            };
            ctx.queue_event(event);
        }
        Ok(())
    }
}
