use proc_macro::TokenStream;

mod global_function;

/// Exposes a zero-argument function through the global function registry.
///
/// Generates a unit struct named `<PascalCaseName>Function` implementing
/// `GlobalFunction`, which can then be registered with
/// `FunctionRegistry::register_function`.
///
/// # Attributes
/// - `name = "testing.HelloWorld"` - Global name (defaults to the function name)
/// - `description = "..."` - Description (defaults to the doc comment)
///
/// # Example
/// ```ignore
/// /// Returns a fixed greeting.
/// #[tcl::global_function(name = "testing.HelloWorld")]
/// pub fn hello_world() -> String {
///     "Hello, World!".to_string()
/// }
///
/// registry.register_function::<HelloWorldFunction>()?;
/// ```
#[proc_macro_attribute]
pub fn global_function(attr: TokenStream, item: TokenStream) -> TokenStream {
    global_function::expand_global_function(attr, item)
}
