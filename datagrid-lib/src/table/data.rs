//! Data sources and row access.

use std::fmt;

use crate::lazy::LazyDataModel;
use crate::model::Record;
use crate::model::RowKey;
use crate::model::Value;

use super::DataTable;

/// A data model able to map rows to keys and back.
pub trait RowKeyModel {
    /// Key of the given row.
    fn row_key(&self, row: &Record) -> RowKey;

    /// Row with the given key, if the model holds one.
    fn row_data(&self, key: &str) -> Option<Record>;
}

/// Rows keyed by one of their fields.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRows {
    pub rows: Vec<Record>,
    pub key_field: String,
}

impl KeyedRows {
    /// Creates keyed rows; `key_field` may be a dotted path.
    pub fn new(rows: Vec<Record>, key_field: impl Into<String>) -> Self {
        Self {
            rows,
            key_field: key_field.into(),
        }
    }
}

impl RowKeyModel for KeyedRows {
    fn row_key(&self, row: &Record) -> RowKey {
        row_key_by_field(row, &self.key_field)
    }

    fn row_data(&self, key: &str) -> Option<Record> {
        self.rows
            .iter()
            .find(|row| self.row_key(row).as_str() == key)
            .cloned()
    }
}

/// Key of a row read from one of its fields.
pub fn row_key_by_field(row: &Record, field: &str) -> RowKey {
    static NULL: Value = Value::Null;
    RowKey::from(row.get_path(field).unwrap_or(&NULL))
}

/// Where a table's rows come from.
#[derive(Default)]
pub enum DataSource {
    /// No data.
    #[default]
    Empty,
    /// Rows held in memory.
    List(Vec<Record>),
    /// Rows held in memory that know their keys.
    Keyed(KeyedRows),
    /// Rows loaded one window at a time by an external provider.
    Lazy(Box<dyn LazyDataModel>),
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Empty => f.write_str("Empty"),
            DataSource::List(rows) => f.debug_tuple("List").field(&rows.len()).finish(),
            DataSource::Keyed(keyed) => f
                .debug_struct("Keyed")
                .field("rows", &keyed.rows.len())
                .field("key_field", &keyed.key_field)
                .finish(),
            DataSource::Lazy(model) => f
                .debug_struct("Lazy")
                .field("page_size", &model.page_size())
                .field("row_count", &model.row_count())
                .finish(),
        }
    }
}

impl DataTable {
    /// The data source.
    pub fn data(&self) -> &DataSource {
        &self.data
    }

    /// Mutable access to the data source.
    pub fn data_mut(&mut self) -> &mut DataSource {
        &mut self.data
    }

    /// Replaces the data source.
    pub fn set_data(&mut self, data: DataSource) {
        self.data = data;
    }

    /// Returns `true` if rows come from a lazy provider.
    pub fn is_lazy(&self) -> bool {
        matches!(self.data, DataSource::Lazy(_))
    }

    /// The lazy provider, if any.
    pub fn lazy_model(&self) -> Option<&dyn LazyDataModel> {
        match &self.data {
            DataSource::Lazy(model) => Some(model.as_ref()),
            _ => None,
        }
    }

    /// Mutable access to the lazy provider, if any.
    pub fn lazy_model_mut(&mut self) -> Option<&mut (dyn LazyDataModel + 'static)> {
        match &mut self.data {
            DataSource::Lazy(model) => Some(model.as_mut()),
            _ => None,
        }
    }

    /// Rows of the data source, ignoring filtering.
    ///
    /// For a lazy provider this is the last loaded window.
    pub fn source_rows(&self) -> &[Record] {
        match &self.data {
            DataSource::Empty => &[],
            DataSource::List(rows) => rows,
            DataSource::Keyed(keyed) => &keyed.rows,
            DataSource::Lazy(model) => model.wrapped_data().unwrap_or(&[]),
        }
    }

    /// Current rows: the filtered rows when a local filter applies,
    /// otherwise the source rows.
    pub fn value(&self) -> &[Record] {
        match &self.state.filtered_value {
            Some(rows) if !self.is_lazy() => rows,
            _ => self.source_rows(),
        }
    }

    /// Mutable current rows, `None` for lazy or empty sources.
    pub(crate) fn value_mut(&mut self) -> Option<&mut Vec<Record>> {
        if self.is_lazy() {
            return None;
        }
        if let Some(rows) = self.state.filtered_value.as_mut() {
            return Some(rows);
        }
        match &mut self.data {
            DataSource::List(rows) => Some(rows),
            DataSource::Keyed(keyed) => Some(&mut keyed.rows),
            DataSource::Empty | DataSource::Lazy(_) => None,
        }
    }

    /// Total row count: the provider's count for lazy data.
    pub fn row_count(&self) -> usize {
        match &self.data {
            DataSource::Lazy(model) => model.row_count(),
            _ => self.value().len(),
        }
    }

    /// Row at an absolute index.
    ///
    /// Lazy windows are addressed modulo the provider's page size.
    pub fn row_at(&self, index: usize) -> Option<&Record> {
        match &self.data {
            DataSource::Lazy(model) => {
                let page_size = model.page_size();
                let local = if page_size > 0 { index % page_size } else { index };
                model.wrapped_data().and_then(|rows| rows.get(local))
            }
            _ => self.value().get(index),
        }
    }

    /// The row-key capability of the data source, if it has one.
    pub fn row_key_model(&self) -> Option<&dyn RowKeyModel> {
        match &self.data {
            DataSource::Keyed(keyed) => Some(keyed),
            DataSource::Lazy(model) => model.as_row_key_model(),
            DataSource::Empty | DataSource::List(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableAttributes;

    fn rows() -> Vec<Record> {
        vec![
            Record::new().set("id", 1i64).set("brand", "Volvo"),
            Record::new().set("id", 2i64).set("brand", "Audi"),
        ]
    }

    #[test]
    fn test_keyed_rows_round_trip_key() {
        let keyed = KeyedRows::new(rows(), "id");
        let key = keyed.row_key(&keyed.rows[1]);
        assert_eq!(key.as_str(), "2");
        assert_eq!(keyed.row_data("2").unwrap().get("brand"), Some(&Value::from("Audi")));
        assert!(keyed.row_data("9").is_none());
    }

    #[test]
    fn test_value_prefers_filtered_rows() {
        let mut table =
            DataTable::new("t", TableAttributes::default()).with_data(DataSource::List(rows()));
        assert_eq!(table.row_count(), 2);

        table.state.filtered_value = Some(vec![Record::new().set("id", 3i64)]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.source_rows().len(), 2);
        assert_eq!(table.row_at(0).unwrap().get("id"), Some(&Value::Int(3)));
    }
}
