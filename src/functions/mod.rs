pub mod math;

use once_cell::sync::Lazy;

use crate::ast::FunctionRegistry;

pub fn register_functions(registry: &mut FunctionRegistry) {
    math::register(registry);
}

static BUILTINS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::with_builtins);

/// The process-wide built-in function table, built on first use and
/// read-only thereafter.
pub fn builtins() -> &'static FunctionRegistry {
    &BUILTINS
}
