//! Per-instance request state.

use std::collections::BTreeMap;

use crate::binding::Binding;
use crate::column::ColumnRef;
use crate::filter::FilterMap;
use crate::model::Record;
use crate::model::RowKey;
use crate::model::SelectionValue;
use crate::sort::SortMeta;
use crate::sort::SortOrder;

use super::TableAttributes;

/// Width and height recorded for a resized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSize {
    pub width: i64,
    pub height: i64,
}

/// Row edit action sent with `{clientId}_rowEditAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEditAction {
    Save,
    Cancel,
}

impl RowEditAction {
    /// Parses `save` or `cancel`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "save" => Some(Self::Save),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// The row an edit request targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEdit {
    pub index: usize,
    pub action: RowEditAction,
}

/// The cell a cell edit request targeted.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row_index: usize,
    pub column: ColumnRef,
}

/// State that changes between requests.
///
/// A host that persists tables between requests saves and restores this
/// value; every restored instance is independent of any other.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Offset of the first row of the current page.
    pub first: usize,
    /// Current page size.
    pub rows: usize,

    /// Single sort binding, initialized from the declared `sort_by`.
    pub sort_by: Option<Binding>,
    pub sort_order: SortOrder,
    /// Column the single sort came from.
    pub sort_column: Option<ColumnRef>,
    /// Ordered multi sort criteria.
    pub multi_sort_meta: Vec<SortMeta>,

    /// Active column filters.
    pub filters: FilterMap,
    /// Global filter text.
    pub global_filter: Option<String>,
    /// Rows left after local filtering; `None` when no filter applies.
    pub filtered_value: Option<Vec<Record>>,

    /// Caller-bound selection.
    pub selection: SelectionValue,
    /// Keys of `selection`, recomputed every request.
    pub selected_row_keys: Vec<RowKey>,

    /// One-shot reset flag, consumed by the next full encode.
    pub reset: bool,

    /// Sizes recorded by column resize requests, by column key.
    pub column_widths: BTreeMap<String, ColumnSize>,

    /// Last decoded row edit.
    pub row_edit: Option<RowEdit>,
    /// Last decoded cell edit.
    pub cell_edit: Option<CellEdit>,
}

impl TableState {
    /// Creates the initial state of a table with the given attributes.
    pub fn from_attributes(attrs: &TableAttributes) -> Self {
        Self {
            rows: attrs.rows,
            sort_by: attrs.sort_by.clone(),
            sort_order: attrs.sort_order,
            ..Self::default()
        }
    }
}
