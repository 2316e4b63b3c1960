//! JSON table documents.
//!
//! A document declares one table: its attributes, its columns and its rows.
//!
//! ```json
//! {
//!   "id": "cars",
//!   "attributes": { "paginator": true, "rows": 10, "selectionMode": "multiple" },
//!   "keyField": "id",
//!   "columns": [
//!     { "id": "brand", "header": "Brand", "field": "#{car.brand}", "sortBy": "#{car.brand}" },
//!     { "id": "props", "var": "col", "items": [{ "field": "year" }],
//!       "template": { "id": "dyn", "field": "#{car[col.field]}" } }
//!   ],
//!   "rows": [{ "id": 1, "brand": "Volvo", "year": 1987 }]
//! }
//! ```

use serde::Deserialize;

use datagrid_lib::binding::Binding;
use datagrid_lib::column::Column;
use datagrid_lib::column::Columns;
use datagrid_lib::column::SelectionMode;
use datagrid_lib::filter::FilterMatchMode;
use datagrid_lib::lazy::InMemoryLazyModel;
use datagrid_lib::menu::ContextMenu;
use datagrid_lib::model::Record;
use datagrid_lib::model::SelectionValue;
use datagrid_lib::model::Value;
use datagrid_lib::table::DataSource;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::KeyedRows;
use datagrid_lib::table::TableAttributes;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    pub id: String,
    #[serde(default)]
    pub attributes: TableAttributes,
    #[serde(default)]
    pub columns: Vec<ColumnDocument>,
    #[serde(default)]
    pub rows: Vec<Record>,
    /// Row field holding the row key.
    pub key_field: Option<String>,
    /// Serve rows through the lazy provider instead of in memory.
    #[serde(default)]
    pub lazy: bool,
    /// Keys of the initially selected rows.
    #[serde(default)]
    pub selection: Vec<String>,
    pub context_menu: Option<ContextMenu>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColumnDocument {
    Dynamic(DynamicDocument),
    Static(StaticDocument),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDocument {
    pub id: String,
    pub var: String,
    pub items: Vec<Value>,
    pub template: StaticDocument,
    pub header_property: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticDocument {
    pub id: String,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub field: Option<Binding>,
    pub sort_by: Option<Binding>,
    pub filter_by: Option<Binding>,
    pub filter_value: Option<String>,
    pub filter_options: Option<Value>,
    pub filter_position: Option<String>,
    pub filter_match_mode: Option<FilterMatchMode>,
    pub selection_mode: Option<SelectionMode>,
    pub width: Option<String>,
    pub hidden: bool,
}

impl StaticDocument {
    fn into_column(self) -> Column {
        let mut column = Column::new(self.id).rendered(!self.hidden);
        if let Some(text) = self.header {
            column = column.header_text(text);
        }
        if let Some(text) = self.footer {
            column = column.footer_text(text);
        }
        column.field = self.field;
        column.sort_by = self.sort_by;
        column.filter_by = self.filter_by;
        column.filter_value = self.filter_value;
        column.filter_options = self.filter_options;
        column.selection_mode = self.selection_mode;
        column.width = self.width;
        if let Some(position) = self.filter_position {
            column = column.filter_position(position);
        }
        if let Some(mode) = self.filter_match_mode {
            column = column.filter_match_mode(mode);
        }
        column
    }
}

impl TableDocument {
    /// Builds the table the document declares.
    pub fn into_table(self) -> DataTable {
        let selected: Vec<Record> = match &self.key_field {
            Some(field) => self
                .rows
                .iter()
                .filter(|row| {
                    row.get(field)
                        .is_some_and(|key| self.selection.iter().any(|s| *s == key.to_string()))
                })
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let data = match (self.lazy, self.key_field) {
            (true, Some(field)) => DataSource::Lazy(Box::new(InMemoryLazyModel::new(self.rows).with_key_field(field))),
            (true, None) => DataSource::Lazy(Box::new(InMemoryLazyModel::new(self.rows))),
            (false, Some(field)) => DataSource::Keyed(KeyedRows::new(self.rows, field)),
            (false, None) => DataSource::List(self.rows),
        };

        let mut table = DataTable::new(self.id, self.attributes).with_data(data);
        if let Some(menu) = self.context_menu {
            table = table.with_context_menu(menu);
        }
        for column in self.columns {
            match column {
                ColumnDocument::Static(doc) => table.add_child(doc.into_column()),
                ColumnDocument::Dynamic(doc) => {
                    let mut group = Columns::new(doc.id, doc.var, doc.template.into_column()).value(doc.items);
                    if let Some(path) = doc.header_property {
                        group = group.header_property(path);
                    }
                    table.add_child(group);
                }
            }
        }

        if !selected.is_empty() {
            table.state.selection = if table.is_single_selection_mode() {
                selected
                    .into_iter()
                    .next()
                    .map(SelectionValue::Item)
                    .unwrap_or_default()
            } else {
                SelectionValue::List(selected)
            };
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r##"{
        "id": "cars",
        "attributes": { "selectionMode": "single", "rows": 2 },
        "keyField": "id",
        "selection": ["2"],
        "columns": [
            { "id": "brand", "header": "Brand", "field": "#{car.brand}", "filterBy": "#{car.brand}" },
            { "id": "props", "var": "col", "items": [{ "field": "year" }],
              "template": { "id": "dyn", "field": "#{car[col.field]}" } }
        ],
        "rows": [
            { "id": 1, "brand": "Volvo", "year": 1987 },
            { "id": 2, "brand": "Audi", "year": 2001 }
        ]
    }"##;

    #[test]
    fn test_document_builds_table() {
        let document: TableDocument = serde_json::from_str(DOCUMENT).unwrap();
        let table = document.into_table();

        let keys: Vec<&str> = table.columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["cars:brand", "cars:props:0"]);
        assert_eq!(table.state.rows, 2);
        assert!(table.is_filtering_enabled());
        assert!(matches!(table.state.selection, SelectionValue::Item(_)));
    }

    #[test]
    fn test_document_context_menu() {
        let json = r##"{
            "id": "cars",
            "contextMenu": { "id": "ctx", "elements": [{ "label": "View", "command": "view" }] }
        }"##;
        let document: TableDocument = serde_json::from_str(json).unwrap();
        let table = document.into_table();
        let menu = table.context_menu().unwrap();
        assert_eq!(menu.id, "ctx");
        assert_eq!(menu.elements.len(), 1);
    }
}
