//! Call dispatch.
//!
//! [`Dispatcher::call`] is the generic path: read the function's current
//! unit and invoke it. A [`CallSite`] adds speculation on top: it remembers
//! up to `inline_cache_limit` (function, unit, generation) triples, and on a
//! later call to a remembered function at an unchanged generation it skips
//! the lookup. A generation mismatch refreshes the entry. A site that has
//! seen more distinct functions than the limit turns megamorphic and uses
//! the generic path from then on.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use super::{CallableUnit, FunctionRegistry, FunctionValue};
use crate::config::RuntimeConfig;
use crate::errors::{stack_overflow, unresolved_call, RuntimeResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Executes calls on one thread.
///
/// Tracks the current call depth against
/// [`RuntimeConfig::max_call_depth`]. Not `Sync`: each thread calling into
/// the runtime uses its own dispatcher over the shared registry.
pub struct Dispatcher<'r> {
    registry: &'r FunctionRegistry,
    depth: Cell<usize>,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Dispatcher {
            registry,
            depth: Cell::new(0),
        }
    }

    pub fn registry(&self) -> &'r FunctionRegistry {
        self.registry
    }

    pub fn config(&self) -> &'r RuntimeConfig {
        self.registry.config()
    }

    /// Number of calls currently active on this dispatcher.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Call `function` through the generic path.
    ///
    /// Fails with `UnresolvedCall` if the function has no unit.
    pub fn call(&self, function: &FunctionValue, args: &[Value]) -> RuntimeResult<Value> {
        let (unit, _) = function.snapshot();
        let unit = unit.ok_or_else(|| unresolved_call(function.name()))?;
        self.invoke(function, unit.as_ref(), args)
    }

    /// Resolve `name` in the registry and call it.
    pub fn call_by_name(&self, name: &str, args: &[Value]) -> RuntimeResult<Value> {
        match self.registry.get(name) {
            Some(function) => self.call(&function, args),
            None => Err(unresolved_call(name)),
        }
    }

    fn invoke(
        &self,
        function: &FunctionValue,
        unit: &dyn CallableUnit,
        args: &[Value],
    ) -> RuntimeResult<Value> {
        let depth = self.depth.get();
        if let Some(max) = self.config().max_call_depth {
            if depth >= max {
                tracing::debug!(function = function.name(), max, "call depth exceeded");
                return Err(stack_overflow(max));
            }
        }
        self.depth.set(depth + 1);
        let result = ensure_sufficient_stack(|| unit.invoke(self, args));
        self.depth.set(depth);
        result
    }
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}

struct CachedTarget {
    function: FunctionValue,
    unit: Arc<dyn CallableUnit>,
    generation: u64,
}

#[derive(Default)]
struct SiteCache {
    entries: SmallVec<[CachedTarget; 2]>,
    megamorphic: bool,
}

/// A speculating call site.
///
/// One `CallSite` belongs to one call expression in guest code. It is
/// `Sync`: sites may be shared by threads running the same code. The cache
/// lock is never held while a call runs, so a unit may recurse through its
/// own call site.
#[derive(Default)]
pub struct CallSite {
    cache: Mutex<SiteCache>,
    fast_hits: AtomicU64,
    slow_calls: AtomicU64,
}

impl CallSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `function`, speculating on a cached unit when its generation is
    /// unchanged.
    pub fn call(
        &self,
        dispatcher: &Dispatcher<'_>,
        function: &FunctionValue,
        args: &[Value],
    ) -> RuntimeResult<Value> {
        if let Some(unit) = self.speculate(function) {
            tracing::trace!(function = function.name(), "fast-path hit");
            self.fast_hits.fetch_add(1, Ordering::Relaxed);
            return dispatcher.invoke(function, unit.as_ref(), args);
        }

        self.slow_calls.fetch_add(1, Ordering::Relaxed);
        let (unit, generation) = function.snapshot();
        let unit = unit.ok_or_else(|| unresolved_call(function.name()))?;
        self.remember(dispatcher.config(), function, &unit, generation);
        dispatcher.invoke(function, unit.as_ref(), args)
    }

    fn speculate(&self, function: &FunctionValue) -> Option<Arc<dyn CallableUnit>> {
        let cache = self.cache.lock();
        if cache.megamorphic {
            return None;
        }
        let entry = cache
            .entries
            .iter()
            .find(|entry| entry.function.ptr_eq(function))?;
        let current = function.generation();
        if entry.generation != current {
            tracing::trace!(
                function = function.name(),
                cached = entry.generation,
                current,
                "generation mismatch"
            );
            return None;
        }
        Some(Arc::clone(&entry.unit))
    }

    fn remember(
        &self,
        config: &RuntimeConfig,
        function: &FunctionValue,
        unit: &Arc<dyn CallableUnit>,
        generation: u64,
    ) {
        let mut cache = self.cache.lock();
        if cache.megamorphic {
            return;
        }
        if let Some(entry) = cache
            .entries
            .iter_mut()
            .find(|entry| entry.function.ptr_eq(function))
        {
            tracing::trace!(function = function.name(), generation, "refreshed call site");
            entry.unit = Arc::clone(unit);
            entry.generation = generation;
            return;
        }
        if cache.entries.len() >= config.inline_cache_limit {
            tracing::debug!(
                function = function.name(),
                limit = config.inline_cache_limit,
                "call site turned megamorphic"
            );
            cache.entries.clear();
            cache.megamorphic = true;
            return;
        }
        cache.entries.push(CachedTarget {
            function: function.clone(),
            unit: Arc::clone(unit),
            generation,
        });
    }

    /// Calls served from the cache.
    pub fn fast_hits(&self) -> u64 {
        self.fast_hits.load(Ordering::Relaxed)
    }

    /// Calls that went through lookup.
    pub fn slow_calls(&self) -> u64 {
        self.slow_calls.load(Ordering::Relaxed)
    }

    /// Number of functions currently cached.
    pub fn cached_targets(&self) -> usize {
        self.cache.lock().entries.len()
    }

    pub fn is_megamorphic(&self) -> bool {
        self.cache.lock().megamorphic
    }
}

impl fmt::Debug for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.lock();
        f.debug_struct("CallSite")
            .field(
                "targets",
                &cache
                    .entries
                    .iter()
                    .map(|entry| entry.function.name())
                    .collect::<Vec<_>>(),
            )
            .field("megamorphic", &cache.megamorphic)
            .field("fast_hits", &self.fast_hits())
            .field("slow_calls", &self.slow_calls())
            .finish()
    }
}
