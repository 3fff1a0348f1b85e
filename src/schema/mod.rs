pub mod time_unit;
pub use time_unit::*;

pub mod data_type;
pub use data_type::*;

pub mod field;
pub use field::*;

#[allow(clippy::module_inception)]
pub mod schema;
pub use schema::*;
