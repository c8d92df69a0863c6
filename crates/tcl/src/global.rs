use once_cell::sync::OnceCell;
use tcl_core::{Result, TclConfig};
use tcl_runtime::FunctionRegistry;
use tracing::{debug, info};

use crate::testing;

static GLOBAL: OnceCell<FunctionRegistry> = OnceCell::new();

/// Register the builtin functions into `registry`.
pub fn register_builtins(registry: &FunctionRegistry) -> Result<()> {
    testing::register(registry)
}

/// Initialize the process-wide registry from configuration.
///
/// Builtins are registered exactly once. If the registry already exists,
/// it is returned unchanged and `config` is ignored.
pub fn init(config: &TclConfig) -> Result<&'static FunctionRegistry> {
    if let Some(registry) = GLOBAL.get() {
        debug!("Global function registry already initialized");
        return Ok(registry);
    }

    GLOBAL.get_or_try_init(|| {
        let registry = FunctionRegistry::from_config(&config.registry);
        register_builtins(&registry)?;
        info!(
            functions = registry.len(),
            on_duplicate = %registry.policy(),
            "Initialized global function registry"
        );
        Ok(registry)
    })
}

/// The process-wide registry, initialized with defaults on first use.
pub fn global() -> &'static FunctionRegistry {
    if let Some(registry) = GLOBAL.get() {
        return registry;
    }

    match init(&TclConfig::default()) {
        Ok(registry) => registry,
        // Builtin registration into a fresh registry cannot collide; fall back
        // to whichever instance won the race, or an empty one.
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize global function registry");
            GLOBAL.get_or_init(FunctionRegistry::new)
        }
    }
}
