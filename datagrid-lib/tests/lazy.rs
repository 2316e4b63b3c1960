//! Tests for the lazy data bridge.

mod common;

use common::*;
use datagrid_lib::lazy::InMemoryLazyModel;
use datagrid_lib::model::Record;
use datagrid_lib::render::Markup;
use datagrid_lib::request::RequestParams;
use datagrid_lib::table::DataSource;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::TableAttributes;

fn lazy_rows() -> Vec<Record> {
    (0..30)
        .map(|i| Record::new().set("id", i as i64).set("brand", format!("b{:02}", i)))
        .collect()
}

fn lazy_table(attrs: TableAttributes) -> DataTable {
    DataTable::new(TABLE_ID, attrs)
        .with_child(brand_column())
        .with_data(DataSource::Lazy(Box::new(
            InMemoryLazyModel::new(lazy_rows()).with_key_field("id"),
        )))
}

fn paged(rows: usize) -> TableAttributes {
    TableAttributes {
        paginator: true,
        rows,
        ..Default::default()
    }
}

fn row_indexes(out: &Markup) -> Vec<String> {
    out.find_all("tr")
        .into_iter()
        .filter_map(|tr| tr.attr("data-ri"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_window_replaces_previous_window() {
    let mut table = lazy_table(paged(5));
    let mut ctx = request(&[]);

    table.state.first = 10;
    table.load_lazy_data(&mut ctx).unwrap();
    table.state.first = 20;
    table.load_lazy_data(&mut ctx).unwrap();

    assert_eq!(brands(table.source_rows()), vec!["b20", "b21", "b22", "b23", "b24"]);
    assert_eq!(table.row_count(), 30);
    assert_eq!(table.lazy_model().map(|m| m.page_size()), Some(5));
}

#[test]
fn test_row_at_addresses_window_by_page_size() {
    let mut table = lazy_table(paged(5));
    table.state.first = 20;
    table.load_lazy_data(&mut request(&[])).unwrap();

    let brand = |index| {
        table
            .row_at(index)
            .and_then(|row| row.get("brand"))
            .map(|v| v.to_string())
    };
    assert_eq!(brand(20).as_deref(), Some("b20"));
    assert_eq!(brand(24).as_deref(), Some("b24"));
}

#[test]
fn test_total_records_only_for_request_source() {
    let mut table = lazy_table(paged(5));

    let mut ctx = request(&[]);
    table.load_lazy_data(&mut ctx).unwrap();
    assert_eq!(ctx.callback_params().get("totalRecords"), Some(&serde_json::json!(30)));

    let mut foreign = foreign_request(&[]);
    table.load_lazy_data(&mut foreign).unwrap();
    assert!(foreign.callback_params().is_empty());
}

#[test]
fn test_total_records_needs_paginator_or_live_scroll() {
    let mut table = lazy_table(TableAttributes {
        rows: 5,
        ..Default::default()
    });
    let mut ctx = request(&[]);
    table.load_lazy_data(&mut ctx).unwrap();
    assert!(ctx.callback_params().is_empty());
}

#[test]
fn test_filters_and_sort_reach_the_provider() {
    let mut table = lazy_table(paged(5));
    let params = RequestParams::new()
        .with("cars:brand:filter", "b1")
        .with("cars_sortKey", "cars:brand")
        .with("cars_sortDir", "DESCENDING");

    table.decode_filters(&params).unwrap();
    table.decode_sort(&params).unwrap();
    assert!(table.state.filtered_value.is_none());

    table.load_lazy_data(&mut request(&[])).unwrap();

    assert_eq!(table.row_count(), 10);
    assert_eq!(brands(table.source_rows()), vec!["b19", "b18", "b17", "b16", "b15"]);
}

#[test]
fn test_full_render_loads_current_page() {
    init_logger();
    let mut table = lazy_table(paged(5));
    table.state.first = 10;
    let mut ctx = request(&[]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    assert_eq!(row_indexes(&out), vec!["10", "11", "12", "13", "14"]);
    let paginator = out.find_by_id("cars_paginator_bottom").unwrap();
    assert_eq!(paginator.attr("data-page"), Some("2"));
    assert_eq!(paginator.attr("data-page-count"), Some("6"));
}

#[test]
fn test_page_feature_request_loads_new_window() {
    let mut table = lazy_table(paged(5));
    let mut ctx = request(&[
        ("cars_pagination", "true"),
        ("cars_encodeFeature", "true"),
        ("cars_first", "15"),
        ("cars_rows", "5"),
    ]);
    let renderer = renderer();
    let mut out = Markup::new();

    renderer.decode(&mut table, &mut ctx).unwrap();
    renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

    assert_eq!(table.state.first, 15);
    assert_eq!(row_indexes(&out), vec!["15", "16", "17", "18", "19"]);
    assert_eq!(ctx.callback_params().get("totalRecords"), Some(&serde_json::json!(30)));
}

#[test]
fn test_live_scroll_appends_rows() {
    let attrs = TableAttributes {
        scrollable: true,
        live_scroll: true,
        scroll_rows: 10,
        ..Default::default()
    };
    let renderer = renderer();

    let mut table = lazy_table(attrs.clone());
    let mut out = Markup::new();
    renderer.encode_end(&mut table, &mut request(&[]), &mut out).unwrap();
    assert_eq!(row_indexes(&out).len(), 10);

    let mut ctx = request(&[
        ("cars_scrolling", "true"),
        ("cars_encodeFeature", "true"),
        ("cars_scrollOffset", "10"),
    ]);
    let mut out = Markup::new();
    renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let indexes = row_indexes(&out);
    assert_eq!(indexes.first().map(String::as_str), Some("10"));
    assert_eq!(indexes.last().map(String::as_str), Some("19"));
    assert_eq!(brands(table.source_rows())[0], "b10");
}

#[test]
fn test_reset_and_clear_drop_the_window() {
    let mut table = lazy_table(paged(5));
    table.load_lazy_data(&mut request(&[])).unwrap();
    assert_eq!(table.source_rows().len(), 5);

    table.clear_lazy_cache();
    assert!(table.source_rows().is_empty());

    table.load_lazy_data(&mut request(&[])).unwrap();
    table.reset();
    assert!(table.source_rows().is_empty());
    assert!(table.state.reset);
}
