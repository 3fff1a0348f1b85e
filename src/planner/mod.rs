pub mod map_partition_ops;
pub use map_partition_ops::*;
