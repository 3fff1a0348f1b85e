pub mod literal;
pub use literal::*;

pub mod operator;
pub use operator::*;

pub mod agg;
pub use agg::*;

pub mod function;
pub use function::*;

#[allow(clippy::module_inception)]
pub mod expr;
pub use expr::*;

pub mod expression;
pub use expression::*;

pub mod namespaces;
pub use namespaces::*;

pub mod sql;
pub use sql::*;

mod display;
mod ops;
