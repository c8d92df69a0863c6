use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tcl_core::{DuplicatePolicy, FunctionInfo, GlobalFunction, RegistryConfig, Result, TclError};
use tracing::{debug, warn};

/// Type alias for a boxed zero-argument handler returning a string.
pub type BoxedHandler = Arc<dyn Fn() -> String + Send + Sync>;

/// Entry in the function registry.
#[derive(Clone)]
pub struct FunctionEntry {
    /// Function metadata.
    pub info: FunctionInfo,
    /// Handler bound to the name.
    pub handler: BoxedHandler,
}

impl std::fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Registry of named global functions.
///
/// Safe to share between threads. Handlers are called with no lock held.
pub struct FunctionRegistry {
    functions: RwLock<HashMap<String, Arc<FunctionEntry>>>,
    policy: DuplicatePolicy,
}

impl FunctionRegistry {
    /// Create a new empty registry with the default (overwrite) policy.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create a new empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            functions: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Create a new empty registry from configuration.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_policy(config.on_duplicate)
    }

    /// The duplicate policy applied by [`register`](Self::register).
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a handler under `name`, honouring the duplicate policy.
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> Result<()>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.register_entry(FunctionInfo::new(name), Arc::new(handler), false)
    }

    /// Register a handler, replacing any existing entry when `allow_override` is set.
    pub fn register_with_override<F>(
        &self,
        name: impl Into<String>,
        handler: F,
        allow_override: bool,
    ) -> Result<()>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.register_entry(FunctionInfo::new(name), Arc::new(handler), allow_override)
    }

    /// Register a typed global function.
    pub fn register_function<F: GlobalFunction>(&self) -> Result<()> {
        let handler: BoxedHandler = Arc::new(F::call);
        self.register_entry(F::info(), handler, false)
    }

    /// Register a prepared entry.
    pub fn register_entry(
        &self,
        info: FunctionInfo,
        handler: BoxedHandler,
        allow_override: bool,
    ) -> Result<()> {
        if info.name.is_empty() {
            return Err(TclError::InvalidName(
                "function name must not be empty".to_string(),
            ));
        }

        let mut functions = self.write()?;
        if functions.contains_key(&info.name) {
            if self.policy == DuplicatePolicy::Reject && !allow_override {
                warn!(function = %info.name, "Rejected duplicate global function registration");
                return Err(TclError::DuplicateName(info.name));
            }
            warn!(function = %info.name, "Overwriting global function");
        } else {
            debug!(function = %info.name, "Registered global function");
        }

        let name = info.name.clone();
        functions.insert(name, Arc::new(FunctionEntry { info, handler }));
        Ok(())
    }

    /// Look up the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<BoxedHandler> {
        self.entry(name).map(|entry| Arc::clone(&entry.handler))
    }

    /// Look up and call the handler registered under `name`.
    pub fn invoke(&self, name: &str) -> Result<String> {
        let handler = self.lookup(name)?;
        Ok(handler())
    }

    /// Get the full entry registered under `name`.
    pub fn entry(&self, name: &str) -> Result<Arc<FunctionEntry>> {
        let functions = self.read()?;
        match functions.get(name) {
            Some(entry) => Ok(Arc::clone(entry)),
            None => {
                debug!(function = name, "Global function not found");
                Err(TclError::NotFound(name.to_string()))
            }
        }
    }

    /// Get function info by name.
    pub fn info(&self, name: &str) -> Option<FunctionInfo> {
        self.read()
            .ok()
            .and_then(|functions| functions.get(name).map(|e| e.info.clone()))
    }

    /// Check if a function exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read()
            .map(|functions| functions.contains_key(name))
            .unwrap_or(false)
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .read()
            .map(|functions| functions.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Remove a function. Returns whether it was registered.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let removed = self.write()?.remove(name).is_some();
        if removed {
            debug!(function = name, "Removed global function");
        }
        Ok(removed)
    }

    /// Remove every function.
    pub fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    /// Get the number of registered functions.
    pub fn len(&self) -> usize {
        self.read().map(|functions| functions.len()).unwrap_or(0)
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Arc<FunctionEntry>>>> {
        self.functions
            .read()
            .map_err(|_| TclError::Internal("function registry lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Arc<FunctionEntry>>>> {
        self.functions
            .write()
            .map_err(|_| TclError::Internal("function registry lock poisoned".to_string()))
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("policy", &self.policy)
            .field("names", &self.names())
            .finish()
    }
}
