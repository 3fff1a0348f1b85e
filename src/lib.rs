pub mod schema;
pub use schema::{DataType, Field, ImageMode, Schema, TimeUnit};

pub mod error;
pub use error::{ExprError, ExprResult};

pub mod config;
pub use config::{get_context, set_planning_config, IoConfig, PlanningConfig, RunnerKind, S3Config};

pub mod expr;
pub use expr::{col, lit, lit_decimal, lit_series, Expression, LiteralValue};

pub mod analyzer;

pub mod projection;
pub use projection::ExpressionsProjection;

pub mod planner;
pub use planner::{ExplodeOp, MapPartitionOp};
