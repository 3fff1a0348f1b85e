pub mod expressions_projection;
pub use expressions_projection::*;
