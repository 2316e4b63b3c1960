//! Caller-bound selection value

use super::Record;

/// The value a host binds as the table's selection.
///
/// The shape mirrors what the host holds: nothing, one row, or an ordered
/// run of rows. Arrays and lists iterate identically; they are kept apart so
/// a decode can hand back the same shape the host bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionValue {
    /// Nothing selected.
    #[default]
    Empty,
    /// One selected row.
    Item(Record),
    /// Fixed-size run of selected rows.
    Array(Vec<Record>),
    /// Growable run of selected rows.
    List(Vec<Record>),
}

impl SelectionValue {
    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            SelectionValue::Empty => true,
            SelectionValue::Item(_) => false,
            SelectionValue::Array(rows) | SelectionValue::List(rows) => rows.is_empty(),
        }
    }

    /// Returns the selected rows in order.
    pub fn rows(&self) -> Vec<&Record> {
        match self {
            SelectionValue::Empty => Vec::new(),
            SelectionValue::Item(row) => vec![row],
            SelectionValue::Array(rows) | SelectionValue::List(rows) => rows.iter().collect(),
        }
    }
}
