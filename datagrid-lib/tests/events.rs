//! Tests for event synthesis.

mod common;

use common::*;
use datagrid_lib::column::Column;
use datagrid_lib::column::SelectionMode;
use datagrid_lib::error::LookupError;
use datagrid_lib::error::ParseError;
use datagrid_lib::error::TableError;
use datagrid_lib::event::BehaviorEvent;
use datagrid_lib::event::PhaseId;
use datagrid_lib::event::RowEditKind;
use datagrid_lib::event::SynthesizedEvent;
use datagrid_lib::event::TableEvent;
use datagrid_lib::event::UnselectOrigin;
use datagrid_lib::menu::ContextMenu;
use datagrid_lib::menu::MenuElement;
use datagrid_lib::menu::MenuItem;
use datagrid_lib::model::Record;
use datagrid_lib::request::RequestParams;
use datagrid_lib::table::DataSource;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::KeyedRows;
use datagrid_lib::table::TableAttributes;

fn source_params(pairs: &[(&str, &str)]) -> RequestParams {
    pairs
        .iter()
        .fold(RequestParams::new().with("javax.faces.source", TABLE_ID), |params, (k, v)| {
            params.with(*k, *v)
        })
}

fn synthesize(table: &DataTable, name: &str, pairs: &[(&str, &str)]) -> TableEvent {
    table
        .queue_event(BehaviorEvent::new(name, TABLE_ID), &source_params(pairs))
        .unwrap()
        .unwrap()
        .event
}

fn brand_of(row: &Record) -> String {
    row.get("brand").map(|v| v.to_string()).unwrap_or_default()
}

#[test]
fn test_event_names() {
    let table = car_table(TableAttributes::default());
    let names = table.event_names();
    assert_eq!(names.len(), 18);
    assert!(names.contains(&"page"));
    assert!(names.contains(&"cellEdit"));
    assert!(names.contains(&"rowDblselect"));
}

#[test]
fn test_page_event() {
    let table = car_table(TableAttributes {
        paginator: true,
        rows: 10,
        ..Default::default()
    });
    let event = synthesize(&table, "page", &[("cars_first", "20")]);
    assert_eq!(event, TableEvent::Page { page: 2 });
}

#[test]
fn test_decode_behaviors_queues_page_event() {
    init_logger();
    let table = car_table(TableAttributes {
        paginator: true,
        rows: 10,
        ..Default::default()
    });
    let mut ctx = request(&[
        ("javax.faces.behavior.event", "page"),
        ("cars_first", "20"),
        ("cars_rows", "10"),
    ]);

    table.decode_behaviors(&mut ctx).unwrap();

    assert_eq!(
        ctx.events(),
        &[SynthesizedEvent {
            phase: PhaseId::InvokeApplication,
            event: TableEvent::Page { page: 2 },
        }]
    );
}

#[test]
fn test_events_from_other_sources_are_not_synthesized() {
    let table = car_table(TableAttributes::default());
    let params = RequestParams::new()
        .with("javax.faces.source", "other")
        .with("cars_first", "20");

    let event = table.queue_event(BehaviorEvent::new("page", "other"), &params).unwrap();
    assert!(event.is_none());

    let mut ctx = foreign_request(&[("javax.faces.behavior.event", "page")]);
    table.decode_behaviors(&mut ctx).unwrap();
    assert!(ctx.events().is_empty());
}

#[test]
fn test_cell_edit_skips_hidden_columns() {
    let table = DataTable::new(TABLE_ID, TableAttributes::default())
        .with_child(Column::new("A").field("#{car.brand}"))
        .with_child(Column::new("B").field("#{car.year}").rendered(false))
        .with_child(Column::new("C").field("#{car.color}"))
        .with_data(DataSource::Keyed(KeyedRows::new(cars(), "id")));

    match synthesize(&table, "cellEdit", &[("cars_cellInfo", "3,1")]) {
        TableEvent::CellEdit { row_index, column } => {
            assert_eq!(row_index, 3);
            assert_eq!(column.key(), "cars:C");
        }
        other => panic!("expected a cell edit event, got {:?}", other),
    }
}

#[test]
fn test_cell_edit_past_last_column() {
    let table = car_table(TableAttributes::default());
    let err = table
        .queue_event(
            BehaviorEvent::new("cellEdit", TABLE_ID),
            &source_params(&[("cars_cellInfo", "0,7")]),
        )
        .unwrap_err();
    assert_eq!(err, TableError::Lookup(LookupError::CellIndex { index: 7 }));
}

#[test]
fn test_unselect_event() {
    let table = car_table(TableAttributes {
        selection_mode: Some(SelectionMode::Multiple),
        ..Default::default()
    });
    match synthesize(&table, "rowUnselectCheckbox", &[("cars_instantUnselectedRowKey", "6")]) {
        TableEvent::Unselect { origin, row } => {
            assert_eq!(origin, UnselectOrigin::Checkbox);
            assert_eq!(brand_of(&row), "Fiat");
        }
        other => panic!("expected an unselect event, got {:?}", other),
    }
}

#[test]
fn test_row_edit_events() {
    let table = car_table(TableAttributes::default());

    match synthesize(&table, "rowEdit", &[("cars_rowEditIndex", "0")]) {
        TableEvent::RowEdit { kind, index, row } => {
            assert_eq!(kind, RowEditKind::Save);
            assert_eq!(index, 0);
            assert_eq!(brand_of(&row), "Volvo");
        }
        other => panic!("expected a row edit event, got {:?}", other),
    }

    match synthesize(&table, "rowEditCancel", &[("cars_rowEditIndex", "1")]) {
        TableEvent::RowEdit { kind, .. } => assert_eq!(kind, RowEditKind::Cancel),
        other => panic!("expected a row edit event, got {:?}", other),
    }
}

#[test]
fn test_row_edit_with_unknown_index() {
    let table = car_table(TableAttributes::default());
    let err = table
        .queue_event(
            BehaviorEvent::new("rowEditInit", TABLE_ID),
            &source_params(&[("cars_rowEditIndex", "99")]),
        )
        .unwrap_err();
    assert_eq!(err, TableError::Lookup(LookupError::RowIndex { index: 99 }));
}

#[test]
fn test_column_resize_event() {
    let table = car_table(TableAttributes::default());
    let event = synthesize(
        &table,
        "colResize",
        &[
            ("cars_columnId", "cars:year"),
            ("cars_width", "120"),
            ("cars_height", "31"),
        ],
    );
    match event {
        TableEvent::ColumnResize { column, width, height } => {
            assert_eq!(column.key(), "cars:year");
            assert_eq!(width, 120);
            assert_eq!(height, 31);
        }
        other => panic!("expected a resize event, got {:?}", other),
    }
}

#[test]
fn test_row_toggle_event() {
    let table = car_table(TableAttributes::default());

    match synthesize(
        &table,
        "rowToggle",
        &[("cars_rowExpansion", "true"), ("cars_expandedRowIndex", "2")],
    ) {
        TableEvent::RowToggle { visible, index, row } => {
            assert!(visible);
            assert_eq!(index, 2);
            assert_eq!(brand_of(&row), "Volkswagen");
        }
        other => panic!("expected a toggle event, got {:?}", other),
    }

    match synthesize(&table, "rowToggle", &[("cars_collapsedRowIndex", "1")]) {
        TableEvent::RowToggle { visible, index, .. } => {
            assert!(!visible);
            assert_eq!(index, 1);
        }
        other => panic!("expected a toggle event, got {:?}", other),
    }
}

#[test]
fn test_toggle_select_event() {
    let table = car_table(TableAttributes::default());
    assert_eq!(
        synthesize(&table, "toggleSelect", &[("cars_checked", "TRUE")]),
        TableEvent::ToggleSelect { checked: true }
    );
    assert_eq!(
        synthesize(&table, "toggleSelect", &[]),
        TableEvent::ToggleSelect { checked: false }
    );
}

#[test]
fn test_filter_event_carries_filter_state() {
    let mut table = car_table(TableAttributes::default());
    table
        .decode_filters(&RequestParams::new().with("cars:brand:filter", "audi"))
        .unwrap();

    match synthesize(&table, "filter", &[]) {
        TableEvent::Filter { filtered_value, filters } => {
            assert_eq!(filtered_value.map(|rows| rows.len()), Some(2));
            assert_eq!(filters.value("cars:brand:filter"), Some("audi"));
        }
        other => panic!("expected a filter event, got {:?}", other),
    }
}

#[test]
fn test_unknown_events_are_forwarded() {
    let table = car_table(TableAttributes::default());
    let behavior = BehaviorEvent::new("colReorder", TABLE_ID).with_phase(PhaseId::ApplyRequestValues);

    let event = table
        .queue_event(behavior.clone(), &source_params(&[]))
        .unwrap()
        .unwrap();

    assert_eq!(event.phase, PhaseId::ApplyRequestValues);
    assert_eq!(event.event, TableEvent::Forwarded(behavior));
    assert!(matches!(
        synthesize(&table, "blur", &[]),
        TableEvent::Forwarded(BehaviorEvent { ref name, .. }) if name == "blur"
    ));
}

#[test]
fn test_missing_event_parameter() {
    let table = car_table(TableAttributes::default());
    let err = table
        .queue_event(BehaviorEvent::new("page", TABLE_ID), &source_params(&[]))
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_fractional_resize_width_is_rejected() {
    let table = car_table(TableAttributes::default());
    let params = source_params(&[
        ("cars_columnId", "cars:year"),
        ("cars_width", "120.6"),
        ("cars_height", "31"),
    ]);
    let err = table
        .queue_event(BehaviorEvent::new("colResize", TABLE_ID), &params)
        .unwrap_err();
    assert!(matches!(err, TableError::Parse(ParseError::Integer { .. })));
}

fn menu_table() -> DataTable {
    let mut export = MenuItem::new("CSV");
    export.command = Some("export-csv".to_string());
    car_table(TableAttributes::default()).with_context_menu(ContextMenu::new(
        "carsMenu",
        vec![
            MenuElement::Item(MenuItem::new("View")),
            MenuElement::Group {
                label: "Export".to_string(),
                elements: vec![MenuElement::Item(export)],
            },
        ],
    ))
}

#[test]
fn test_context_menu_click_queues_menu_action() {
    let mut table = menu_table();
    let mut ctx = request(&[("carsMenu_menuid", "1_0")]);

    renderer().decode(&mut table, &mut ctx).unwrap();

    assert_eq!(ctx.events().len(), 1);
    let event = &ctx.events()[0];
    assert_eq!(event.phase, PhaseId::InvokeApplication);
    match &event.event {
        TableEvent::MenuAction { item } => {
            assert_eq!(item.label, "CSV");
            assert_eq!(item.command.as_deref(), Some("export-csv"));
        }
        other => panic!("expected a menu action, got {:?}", other),
    }
}

#[test]
fn test_context_menu_bad_path() {
    let mut table = menu_table();
    let err = renderer()
        .decode(&mut table, &mut request(&[("carsMenu_menuid", "1_4")]))
        .unwrap_err();
    assert!(err.is_lookup());

    let err = renderer()
        .decode(&mut table, &mut request(&[("carsMenu_menuid", "one")]))
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_no_menu_click_queues_nothing() {
    let mut table = menu_table();
    let mut ctx = request(&[]);
    renderer().decode(&mut table, &mut ctx).unwrap();
    assert!(ctx.events().is_empty());
}
