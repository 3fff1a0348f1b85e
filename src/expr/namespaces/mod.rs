pub mod string;
pub use string::*;

pub mod datetime;
pub use datetime::*;

pub mod float;
pub use float::*;

pub mod list;
pub use list::*;

pub mod struct_ns;
pub use struct_ns::*;

pub mod image;
pub use image::*;

pub mod json;
pub use json::*;

pub mod url;
pub use url::*;

pub mod partitioning;
pub use partitioning::*;
