pub mod io_config;
pub use io_config::*;

pub mod planning_config;
pub use planning_config::*;

pub mod context;
pub use context::*;
