//! Tests for feature dispatch through the renderer.

mod common;

use std::sync::Arc;
use std::thread;

use common::*;
use datagrid_lib::Result;
use datagrid_lib::column::SelectionMode;
use datagrid_lib::column::RowExpansion;
use datagrid_lib::column::TableChild;
use datagrid_lib::feature::Feature;
use datagrid_lib::feature::FeatureKey;
use datagrid_lib::feature::FeatureRegistry;
use datagrid_lib::feature::PageFeature;
use datagrid_lib::feature::SortFeature;
use datagrid_lib::model::SelectionValue;
use datagrid_lib::render::FieldText;
use datagrid_lib::render::Markup;
use datagrid_lib::render::MarkupWriter;
use datagrid_lib::render::Node;
use datagrid_lib::render::TableRenderer;
use datagrid_lib::request::RequestContext;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::RowEditAction;
use datagrid_lib::table::TableAttributes;

/// Answers sort requests with a marker instead of sorting.
struct MarkerSort;

impl Feature for MarkerSort {
    fn key(&self) -> FeatureKey {
        FeatureKey::Sort
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), "sorting")
    }

    fn decode(&self, _table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        ctx.add_callback_param("marker", "decoded");
        Ok(())
    }

    fn should_encode(&self, _table: &DataTable, _ctx: &RequestContext) -> bool {
        false
    }

    fn encode(
        &self,
        _table: &mut DataTable,
        _ctx: &mut RequestContext,
        _renderer: &TableRenderer,
        _out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        Ok(())
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_registry_is_shareable() {
    assert_send_sync::<FeatureRegistry>();
    assert_send_sync::<TableRenderer>();
}

#[test]
fn test_standard_registry_holds_every_feature() {
    let registry = FeatureRegistry::standard();
    assert_eq!(registry.len(), FeatureKey::ALL.len());
    for key in FeatureKey::ALL {
        assert_eq!(registry.get(key).map(|f| f.key()), Some(key));
    }
}

#[test]
fn test_first_registration_wins() {
    let registry = FeatureRegistry::new(vec![Box::new(MarkerSort), Box::new(SortFeature), Box::new(PageFeature)]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.keys(), vec![FeatureKey::Page, FeatureKey::Sort]);

    let renderer = TableRenderer::new(Arc::new(registry));
    let mut table = car_table(TableAttributes::default());
    let mut ctx = request(&[
        ("cars_sorting", "true"),
        ("cars_sortKey", "cars:brand"),
        ("cars_sortDir", "DESCENDING"),
    ]);

    renderer.decode(&mut table, &mut ctx).unwrap();

    assert_eq!(ctx.callback_params().get("marker"), Some(&serde_json::json!("decoded")));
    assert!(table.state.sort_column.is_none());
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(FeatureRegistry::standard());

    thread::scope(|scope| {
        for first in ["0", "2", "4"] {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                let renderer = TableRenderer::new(registry);
                let mut table = car_table(TableAttributes {
                    paginator: true,
                    rows: 2,
                    ..Default::default()
                });
                let mut ctx = request(&[
                    ("cars_pagination", "true"),
                    ("cars_encodeFeature", "true"),
                    ("cars_first", first),
                    ("cars_rows", "2"),
                ]);
                let mut out = Markup::new();
                renderer.decode(&mut table, &mut ctx).unwrap();
                renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

                let indexes: Vec<&str> = out.find_all("tr").into_iter().filter_map(|tr| tr.attr("data-ri")).collect();
                assert_eq!(indexes.len(), 2);
                assert_eq!(indexes[0], first);
            });
        }
    });
}

#[test]
fn test_feature_request_without_matching_feature_renders_nothing() {
    let mut table = car_table(TableAttributes::default());
    let mut ctx = request(&[("cars_encodeFeature", "true")]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    assert!(out.nodes().is_empty());
}

#[test]
fn test_selection_decode() {
    let mut table = car_table(TableAttributes {
        selection_mode: Some(SelectionMode::Multiple),
        ..Default::default()
    });
    let mut ctx = request(&[("cars_selection", "4,1")]);

    renderer().decode(&mut table, &mut ctx).unwrap();

    let SelectionValue::List(rows) = &table.state.selection else {
        panic!("expected a list selection");
    };
    assert_eq!(brands(rows), vec!["BMW", "Volvo"]);
}

#[test]
fn test_column_resize_decode() {
    let mut table = car_table(TableAttributes {
        resizable_columns: true,
        ..Default::default()
    });
    let mut ctx = request(&[
        ("cars_colResize", "true"),
        ("cars_columnId", "cars:year"),
        ("cars_width", "80.4"),
        ("cars_height", "20"),
    ]);
    let renderer = renderer();

    renderer.decode(&mut table, &mut ctx).unwrap();
    assert_eq!(table.state.column_widths.get("cars:year").map(|s| s.width), Some(80));

    let mut out = Markup::new();
    renderer.encode_end(&mut table, &mut request(&[]), &mut out).unwrap();
    let header = out.find_by_id("cars:year").unwrap();
    assert_eq!(header.attr("style"), Some("width:80px"));
}

#[test]
fn test_column_resize_ignored_when_not_resizable() {
    let mut table = car_table(TableAttributes::default());
    let mut ctx = request(&[
        ("cars_colResize", "true"),
        ("cars_columnId", "cars:year"),
        ("cars_width", "80"),
        ("cars_height", "20"),
    ]);

    renderer().decode(&mut table, &mut ctx).unwrap();

    assert!(table.state.column_widths.is_empty());
}

#[test]
fn test_column_order_decode() {
    let mut table = car_table(TableAttributes {
        draggable_columns: true,
        ..Default::default()
    });
    let mut ctx = request(&[("cars_columnOrder", "cars:color,cars:year")]);
    let renderer = renderer();

    renderer.decode(&mut table, &mut ctx).unwrap();
    let mut out = Markup::new();
    renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let head = out.find_by_id("cars_head").unwrap();
    let ids: Vec<&str> = head.find_all("th").into_iter().filter_map(|th| th.attr("id")).collect();
    assert_eq!(ids, vec!["cars:color", "cars:year", "cars:brand"]);
    assert!(out.find_by_id("cars_columnOrder").is_some());
}

#[test]
fn test_row_edit_feature_renders_one_row() {
    let mut table = car_table(TableAttributes {
        editable: true,
        ..Default::default()
    });
    let mut ctx = request(&[
        ("cars_encodeFeature", "true"),
        ("cars_rowEditAction", "save"),
        ("cars_rowEditIndex", "1"),
    ]);
    let renderer = renderer();
    let mut out = Markup::new();

    renderer.decode(&mut table, &mut ctx).unwrap();
    renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let edit = table.state.row_edit.unwrap();
    assert_eq!(edit.index, 1);
    assert_eq!(edit.action, RowEditAction::Save);
    let rows = out.find_all("tr");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].attr("data-ri"), Some("1"));
    assert_eq!(rows[0].text(), "Audi2001Black");
}

#[test]
fn test_row_edit_with_unknown_action() {
    let mut table = car_table(TableAttributes::default());
    let mut ctx = request(&[("cars_rowEditAction", "explode"), ("cars_rowEditIndex", "1")]);

    let err = renderer().decode(&mut table, &mut ctx).unwrap_err();

    assert!(err.is_parse());
}

#[test]
fn test_cell_edit_feature_renders_cell_content() {
    let mut table = car_table(TableAttributes {
        editable: true,
        edit_mode: "cell".to_string(),
        ..Default::default()
    });
    let mut ctx = request(&[("cars_encodeFeature", "true"), ("cars_cellInfo", "2,0")]);
    let renderer = renderer();
    let mut out = Markup::new();

    renderer.decode(&mut table, &mut ctx).unwrap();
    renderer.encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let edit = table.state.cell_edit.as_ref().unwrap();
    assert_eq!(edit.row_index, 2);
    assert_eq!(edit.column.key(), "cars:brand");
    assert_eq!(out.nodes(), &[Node::Text("Volkswagen".to_string())]);
}

#[test]
fn test_row_expansion_feature() {
    let mut table = car_table(TableAttributes::default()).with_child(TableChild::RowExpansion(RowExpansion {
        children: vec![Arc::new(FieldText("#{car.color}".into()))],
    }));
    let mut ctx = request(&[
        ("cars_encodeFeature", "true"),
        ("cars_rowExpansion", "true"),
        ("cars_expandedRowIndex", "3"),
    ]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    let row = out.find_all("tr")[0];
    assert_eq!(row.attr("class"), Some("datagrid-expanded-row-content"));
    assert_eq!(row.find_all("td")[0].attr("colspan"), Some("3"));
    assert_eq!(row.text(), "Black");
}

#[test]
fn test_full_render_structure() {
    init_logger();
    let mut table = car_table(TableAttributes {
        paginator: true,
        rows: 4,
        paginator_position: "bottom".to_string(),
        widget_var: Some("carsWidget".to_string()),
        ..Default::default()
    });
    table.state.reset = true;
    let mut ctx = request(&[]);
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut ctx, &mut out).unwrap();

    assert!(out.is_complete());
    assert!(!table.state.reset);
    let root = out.find_by_id("cars").unwrap();
    assert_eq!(root.attr("class"), Some("datagrid"));
    assert!(out.find_by_id("cars_head").is_some());
    assert!(out.find_by_id("cars_paginator_top").is_none());
    assert!(out.find_by_id("cars_paginator_bottom").is_some());

    let body = out.find_by_id("cars_data").unwrap();
    assert_eq!(body.find_all("tr").len(), 4);

    let scripts = out.scripts();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].0, "DataTable");
    let config: serde_json::Value = serde_json::from_str(scripts[0].1).unwrap();
    assert_eq!(config["id"], "cars");
    assert_eq!(config["widgetVar"], "carsWidget");
    assert_eq!(config["paginator"]["rows"], 4);
    assert_eq!(config["paginator"]["rowCount"], 6);
    assert_eq!(config["filter"], true);
}

#[test]
fn test_full_render_moves_first_into_range() {
    let mut table = car_table(TableAttributes {
        paginator: true,
        rows: 4,
        ..Default::default()
    });
    table.state.first = 12;
    let mut out = Markup::new();

    renderer().encode_end(&mut table, &mut request(&[]), &mut out).unwrap();

    assert_eq!(table.state.first, 4);
    let body = out.find_by_id("cars_data").unwrap();
    assert_eq!(body.find_all("tr").len(), 2);
}
