pub mod traits;

pub use traits::{FunctionInfo, GlobalFunction};
