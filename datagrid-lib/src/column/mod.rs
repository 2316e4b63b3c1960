//! Column model: static columns, dynamic column groups and the resolved
//! column list of a table.

mod declared;
mod dynamic;
mod group;

pub use declared::*;
pub use dynamic::*;
pub use group::*;

use crate::binding::Binding;
use crate::error::ParseError;
use crate::model::Record;
use crate::model::Value;

/// Entry of a table's resolved column list.
///
/// Refers back into the table's children by position; the table turns it
/// into a [`UiColumn`] view on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// A column declared directly on the table.
    Static { key: String, child: usize },
    /// One materialized column of a dynamic group.
    Dynamic {
        key: String,
        child: usize,
        index: usize,
    },
    /// A column that only exists inside the header column group.
    HeaderGroup {
        key: String,
        child: usize,
        row: usize,
        position: usize,
    },
}

impl ColumnRef {
    /// The column key (its container client id).
    pub fn key(&self) -> &str {
        match self {
            ColumnRef::Static { key, .. }
            | ColumnRef::Dynamic { key, .. }
            | ColumnRef::HeaderGroup { key, .. } => key,
        }
    }

    /// Returns `true` for a materialized dynamic column.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ColumnRef::Dynamic { .. })
    }
}

/// A resolved column, static or dynamic.
#[derive(Debug, Clone, Copy)]
pub enum UiColumn<'a> {
    Static(&'a Column),
    Dynamic(DynamicColumn<'a>),
}

impl<'a> UiColumn<'a> {
    /// The declared column, or the template of a dynamic one.
    pub fn column(&self) -> &'a Column {
        match self {
            UiColumn::Static(c) => c,
            UiColumn::Dynamic(d) => d.template(),
        }
    }

    /// The dynamic column's backing item.
    pub fn item(&self) -> Option<&'a Value> {
        match self {
            UiColumn::Static(_) => None,
            UiColumn::Dynamic(d) => Some(d.item()),
        }
    }

    /// Returns `true` for a materialized dynamic column.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, UiColumn::Dynamic(_))
    }

    /// Whether the column takes part in rendering.
    pub fn is_rendered(&self) -> bool {
        match self {
            UiColumn::Static(c) => c.rendered,
            UiColumn::Dynamic(d) => d.group().is_rendered(),
        }
    }

    /// Header text of the column.
    pub fn header_text(&self) -> Option<String> {
        match self {
            UiColumn::Static(c) => c.header_text.clone(),
            UiColumn::Dynamic(d) => d.header_text(),
        }
    }

    /// The sort binding, if the column is sortable.
    pub fn sort_by(&self) -> Option<&'a Binding> {
        self.column().sort_by.as_ref()
    }

    /// The filter binding, if the column is filterable.
    pub fn filter_by(&self) -> Option<&'a Binding> {
        self.column().filter_by.as_ref()
    }

    /// Resolves the row field a binding of this column reads.
    ///
    /// Dynamic columns resolve the binding against their own item, so an
    /// indexed binding such as `#{car[column.property]}` yields the item's
    /// `property`.
    pub fn resolve_field(&self, binding: &Binding) -> Result<Option<String>, ParseError> {
        Ok(binding.descriptor()?.field(self.item()))
    }

    /// Value of a binding of this column for one row.
    pub fn value_of(&self, binding: &Binding, row: &Record) -> Result<Value, ParseError> {
        Ok(binding.descriptor()?.value_of(row, self.item()))
    }

    /// Value the cell shows when the column has no children.
    pub fn cell_value(&self, row: &Record) -> Result<Value, ParseError> {
        match &self.column().field {
            Some(binding) => self.value_of(binding, row),
            None => Ok(Value::Null),
        }
    }
}
