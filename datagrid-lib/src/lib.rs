//! Server-side engine of an interactive data table.
//!
//! A [`table::DataTable`] is decoded from and encoded into one request at a
//! time by a [`render::TableRenderer`], which dispatches to the features of
//! a shared [`feature::FeatureRegistry`].

pub mod binding;
pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod feature;
pub mod filter;
pub mod lazy;
pub mod menu;
pub mod model;
pub mod render;
pub mod request;
pub mod selection;
pub mod sort;
pub mod table;

pub use error::Result;
pub use error::TableError;
