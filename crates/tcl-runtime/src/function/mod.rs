pub mod registry;

pub use registry::{BoxedHandler, FunctionEntry, FunctionRegistry};
