pub mod type_inference;
pub use type_inference::*;

pub mod function_typing;
pub use function_typing::*;
