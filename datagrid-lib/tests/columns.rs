//! Tests for the column model.

mod common;

use common::*;
use datagrid_lib::column::Column;
use datagrid_lib::column::ColumnGroup;
use datagrid_lib::column::ColumnGroupKind;
use datagrid_lib::column::ColumnRef;
use datagrid_lib::column::Columns;
use datagrid_lib::column::SubTable;
use datagrid_lib::error::LookupError;
use datagrid_lib::model::Record;
use datagrid_lib::model::Value;
use datagrid_lib::render::Markup;
use datagrid_lib::request::RequestParams;
use datagrid_lib::table::DataSource;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::KeyedRows;
use datagrid_lib::table::TableAttributes;

fn property(field: &str, header: &str) -> Value {
    Value::from(Record::new().set("field", field).set("header", header))
}

fn dynamic_table() -> DataTable {
    let template = Column::new("dyn")
        .field("#{car[col.field]}")
        .sort_by("#{car[col.field]}");
    DataTable::new(TABLE_ID, TableAttributes::default())
        .with_child(
            Columns::new("cols", "col", template)
                .value(vec![property("brand", "Brand"), property("year", "Year")])
                .header_property("header"),
        )
        .with_data(DataSource::Keyed(KeyedRows::new(cars(), "id")))
}

fn keys(table: &DataTable) -> Vec<&str> {
    table.columns().iter().map(ColumnRef::key).collect()
}

#[test]
fn test_static_column_keys() {
    let table = car_table(TableAttributes::default());
    assert_eq!(keys(&table), vec!["cars:brand", "cars:year", "cars:color"]);
}

#[test]
fn test_columns_are_cached() {
    let table = car_table(TableAttributes::default());
    let first = table.columns().to_vec();
    let second = table.columns().to_vec();

    assert_eq!(first, second);
    assert!(std::ptr::eq(table.columns().as_ptr(), table.columns().as_ptr()));
}

#[test]
fn test_add_child_refreshes_columns() {
    let mut table = car_table(TableAttributes::default());
    assert_eq!(table.columns().len(), 3);

    table.add_child(Column::new("price"));

    assert_eq!(table.columns().len(), 4);
    assert_eq!(table.columns()[3].key(), "cars:price");
}

#[test]
fn test_dynamic_column_keys() {
    let table = dynamic_table();
    assert_eq!(keys(&table), vec!["cars:cols:0", "cars:cols:1"]);
    assert!(table.columns().iter().all(ColumnRef::is_dynamic));
}

#[test]
fn test_dynamic_columns_read_their_item() {
    let table = dynamic_table();
    let row = &cars()[1];
    let views = table.ui_columns();

    assert_eq!(views[0].1.header_text().as_deref(), Some("Brand"));
    assert_eq!(views[1].1.header_text().as_deref(), Some("Year"));
    assert_eq!(views[0].1.cell_value(row).unwrap(), Value::from("Audi"));
    assert_eq!(views[1].1.cell_value(row).unwrap(), Value::from(2001_i64));
}

#[test]
fn test_dynamic_column_sort() {
    let mut table = dynamic_table();
    let params = RequestParams::new()
        .with("cars_sortKey", "cars:cols:1")
        .with("cars_sortDir", "ASCENDING");

    table.decode_sort(&params).unwrap();

    assert_eq!(table.resolve_sort_field().unwrap().as_deref(), Some("year"));
    assert_eq!(brands(table.value())[0], "Volvo");
}

#[test]
fn test_dynamic_columns_render_one_cell_per_item() {
    let mut table = dynamic_table();
    let mut ctx = request(&[]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let head = out.find_by_id("cars_head").unwrap();
    let headers: Vec<String> = head.find_all("th").into_iter().map(|th| th.text()).collect();
    assert_eq!(headers, vec!["Brand", "Year"]);
    let first_row = out.find_all("tr").into_iter().find(|tr| tr.attr("data-ri") == Some("0")).unwrap();
    let cells: Vec<String> = first_row.find_all("td").into_iter().map(|td| td.text()).collect();
    assert_eq!(cells, vec!["Volvo", "1987"]);
}

#[test]
fn test_find_column() {
    let table = car_table(TableAttributes::default());
    assert_eq!(table.find_column("cars:year").unwrap().key(), "cars:year");
    assert_eq!(
        table.find_column("cars:price").unwrap_err(),
        LookupError::Column {
            key: "cars:price".to_string()
        }
    );
}

#[test]
fn test_find_column_in_header_group() {
    let table = car_table(TableAttributes::default()).with_child(
        ColumnGroup::new(ColumnGroupKind::Header)
            .row(vec![Column::new("all").header_text("All cars").span(1, 3)])
            .row(vec![brand_column(), year_column(), color_column()]),
    );

    let column = table.find_column("cars:all").unwrap();
    assert!(matches!(column, ColumnRef::HeaderGroup { row: 0, position: 0, .. }));
    let view = table.column_view(&column).unwrap();
    assert_eq!(view.header_text().as_deref(), Some("All cars"));
}

#[test]
fn test_columns_count_skips_hidden_columns() {
    let table = car_table(TableAttributes::default())
        .with_child(Column::new("hidden").rendered(false))
        .with_child(
            Columns::new("extra", "col", Column::new("tpl"))
                .value(vec![Value::from("a"), Value::from("b")]),
        );
    assert_eq!(table.columns_count(), 5);

    let sub = DataTable::new(TABLE_ID, TableAttributes::default()).with_child(SubTable {
        id: "sub".to_string(),
        columns: vec![Column::new("a"), Column::new("b").rendered(false)],
    });
    assert_eq!(sub.columns_count(), 1);
}

#[test]
fn test_empty_message_spans_rendered_columns() {
    let mut table = DataTable::new(TABLE_ID, TableAttributes::default())
        .with_child(brand_column())
        .with_child(year_column().rendered(false))
        .with_child(color_column());
    let mut ctx = request(&[]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let empty = out
        .find_all("tr")
        .into_iter()
        .find(|tr| tr.attr("class") == Some("datagrid-empty-message"))
        .unwrap();
    assert_eq!(empty.find_all("td")[0].attr("colspan"), Some("2"));
    assert_eq!(empty.text(), "No records found.");
}

#[test]
fn test_reorder_columns() {
    init_logger();
    let mut table = car_table(TableAttributes::default());

    table.reorder_columns("cars:color,cars:nope,cars:brand");

    assert_eq!(keys(&table), vec!["cars:color", "cars:brand", "cars:year"]);

    table.invalidate_columns();
    assert_eq!(keys(&table), vec!["cars:brand", "cars:year", "cars:color"]);
}

#[test]
fn test_footer_detection() {
    let plain = car_table(TableAttributes::default());
    assert!(!plain.has_footer_column());

    let footed = DataTable::new(TABLE_ID, TableAttributes::default())
        .with_child(brand_column().footer_text("Total"));
    assert!(footed.has_footer_column());
}
