pub mod function;

pub use function::{BoxedHandler, FunctionEntry, FunctionRegistry};
