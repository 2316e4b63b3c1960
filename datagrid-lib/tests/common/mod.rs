//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use datagrid_lib::column::Column;
use datagrid_lib::feature::FeatureRegistry;
use datagrid_lib::model::Record;
use datagrid_lib::render::TableRenderer;
use datagrid_lib::request::RequestContext;
use datagrid_lib::request::RequestParams;
use datagrid_lib::table::DataSource;
use datagrid_lib::table::DataTable;
use datagrid_lib::table::KeyedRows;
use datagrid_lib::table::TableAttributes;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TestLogger;

pub const TABLE_ID: &str = "cars";

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

pub fn car(id: i64, brand: &str, year: i64, color: &str) -> Record {
    Record::new()
        .set("id", id)
        .set("brand", brand)
        .set("year", year)
        .set("color", color)
}

pub fn cars() -> Vec<Record> {
    vec![
        car(1, "Volvo", 1987, "Red"),
        car(2, "Audi", 2001, "Black"),
        car(3, "Volkswagen", 1999, "White"),
        car(4, "BMW", 2010, "Black"),
        car(5, "Audi", 1995, "Silver"),
        car(6, "Fiat", 2005, "Red"),
    ]
}

pub fn brand_column() -> Column {
    Column::new("brand")
        .header_text("Brand")
        .field("#{car.brand}")
        .sort_by("#{car.brand}")
        .filter_by("#{car.brand}")
}

pub fn year_column() -> Column {
    Column::new("year")
        .header_text("Year")
        .field("#{car.year}")
        .sort_by("#{car.year}")
}

pub fn color_column() -> Column {
    Column::new("color").header_text("Color").field("#{car.color}")
}

/// A table over [`cars`] keyed by `id`, with brand, year and color columns.
pub fn car_table(attrs: TableAttributes) -> DataTable {
    DataTable::new(TABLE_ID, attrs)
        .with_child(brand_column())
        .with_child(year_column())
        .with_child(color_column())
        .with_data(DataSource::Keyed(KeyedRows::new(cars(), "id")))
}

/// A request fired by the `cars` table.
pub fn request(pairs: &[(&str, &str)]) -> RequestContext {
    let params = pairs
        .iter()
        .fold(RequestParams::new().with("javax.faces.source", TABLE_ID), |params, (k, v)| {
            params.with(*k, *v)
        });
    RequestContext::new(params)
}

/// A request fired by some other component.
pub fn foreign_request(pairs: &[(&str, &str)]) -> RequestContext {
    let params = pairs
        .iter()
        .fold(RequestParams::new().with("javax.faces.source", "other"), |params, (k, v)| {
            params.with(*k, *v)
        });
    RequestContext::new(params)
}

pub fn renderer() -> TableRenderer {
    TableRenderer::new(Arc::new(FeatureRegistry::standard()))
}

pub fn brands(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .map(|row| row.get("brand").map(|v| v.to_string()).unwrap_or_default())
        .collect()
}
