//! Error types

mod config;
mod lookup;
mod parse;
mod table;

pub use config::*;
pub use lookup::*;
pub use parse::*;
pub use table::*;
