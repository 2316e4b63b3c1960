//! Row data model

mod record;
mod selection;
mod value;

pub use record::*;
pub use selection::*;
pub use value::*;
