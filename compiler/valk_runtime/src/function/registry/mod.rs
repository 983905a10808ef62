//! Function registry.
//!
//! Maps each name to its canonical [`FunctionValue`]. The mapping lives in a
//! [`PropertyStore`], so enumeration follows definition order and each
//! lookup or registration is one locked step.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{CallableUnit, Dispatcher, FunctionValue, FunctionsObject};
use crate::config::RuntimeConfig;
use crate::object::PropertyStore;

/// A set of named call units registered together.
///
/// Registering the same batch (the same `Arc`) twice is a no-op.
#[derive(Default)]
pub struct FunctionBatch {
    entries: Vec<(String, Arc<dyn CallableUnit>)>,
}

impl FunctionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Later entries for the same name win.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, unit: Arc<dyn CallableUnit>) -> Self {
        self.entries.push((name.into(), unit));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Debug for FunctionBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// The canonical name → function mapping.
///
/// Shared between threads behind `&` or `Arc`. Calls go through a
/// [`Dispatcher`] obtained from [`dispatcher`](Self::dispatcher).
pub struct FunctionRegistry {
    functions: PropertyStore<FunctionValue>,
    /// Batches already applied, keyed by allocation address. The `Arc` keeps
    /// the address from being reused.
    batches: Mutex<FxHashMap<usize, Arc<FunctionBatch>>>,
    config: RuntimeConfig,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        FunctionRegistry {
            functions: PropertyStore::new(),
            batches: Mutex::new(FxHashMap::default()),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// A dispatcher for calls on the current thread.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self)
    }

    /// Find the function named `name`.
    ///
    /// With `create`, an absent name gets a fresh undefined function so that
    /// callers can hold on to it before its body is registered.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn lookup(&self, name: &str, create: bool) -> Option<FunctionValue> {
        if !create {
            return self.functions.get(name);
        }
        let (function, created) = self
            .functions
            .get_or_insert_with(name, || FunctionValue::undefined(name));
        if created {
            tracing::trace!(name, "created undefined function");
        }
        Some(function)
    }

    /// The function named `name`, if it exists.
    pub fn get(&self, name: &str) -> Option<FunctionValue> {
        self.lookup(name, false)
    }

    /// Bind `unit` to `name`.
    ///
    /// A new name gets a function at generation 0. An existing function keeps
    /// its identity; its unit is replaced and its generation bumped, which
    /// invalidates every call site that cached the previous unit.
    #[tracing::instrument(level = "debug", skip(self, unit))]
    pub fn register(&self, name: &str, unit: Arc<dyn CallableUnit>) -> FunctionValue {
        let (function, created) = self
            .functions
            .get_or_insert_with(name, || FunctionValue::defined(name, Arc::clone(&unit)));
        let generation = if created {
            0
        } else {
            function.install(unit)
        };
        tracing::debug!(name, generation, "installed call unit");
        function
    }

    /// Register every entry of `batch`, once per batch.
    ///
    /// Re-registering a batch already applied leaves all generations
    /// untouched.
    #[tracing::instrument(level = "debug", skip_all, fields(entries = batch.len()))]
    pub fn register_batch(&self, batch: &Arc<FunctionBatch>) {
        let key = Arc::as_ptr(batch) as usize;
        {
            let mut seen = self.batches.lock();
            if seen.contains_key(&key) {
                tracing::trace!("batch already registered");
                return;
            }
            seen.insert(key, Arc::clone(batch));
        }
        for (name, unit) in &batch.entries {
            self.register(name, Arc::clone(unit));
        }
    }

    /// All functions, sorted by name.
    pub fn functions(&self) -> Vec<FunctionValue> {
        let mut functions = self.functions.values();
        functions.sort_by(|a, b| a.name().cmp(b.name()));
        functions
    }

    /// The registry as a read-only object whose members are the functions.
    pub fn functions_object(&self) -> FunctionsObject {
        FunctionsObject::new(self.functions.clone())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
