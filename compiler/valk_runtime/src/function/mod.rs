//! Functions, call units and dispatch.
//!
//! A [`FunctionValue`] is the one canonical object for a name: every lookup
//! of `"fac"` yields the same handle, and redefining `fac` swaps the handle's
//! [`CallableUnit`] in place rather than producing a new function. A
//! generation counter, bumped on every swap, lets call sites detect a
//! redefinition with a single atomic load.
//!
//! - [`registry`]: canonical name → function mapping and batch registration
//! - [`dispatch`]: call execution, depth limiting and call-site caching
//! - [`namespace`]: the registry seen as a read-only interop object

mod dispatch;
mod namespace;
mod registry;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use dispatch::{CallSite, Dispatcher};
pub use namespace::FunctionsObject;
use parking_lot::RwLock;
pub use registry::{FunctionBatch, FunctionRegistry};
use valk_ir::SourceLocation;

use crate::errors::RuntimeResult;
use crate::value::Value;

/// Executable body bound to a function.
///
/// Units receive the dispatcher so they can call other functions, including
/// themselves, through the same depth accounting.
pub trait CallableUnit: Send + Sync {
    fn invoke(&self, dispatcher: &Dispatcher<'_>, args: &[Value]) -> RuntimeResult<Value>;

    /// Where the body was defined, if known.
    fn source_location(&self) -> Option<&SourceLocation> {
        None
    }
}

type NativeBody = dyn Fn(&Dispatcher<'_>, &[Value]) -> RuntimeResult<Value> + Send + Sync;

/// A call unit implemented by a Rust closure.
pub struct NativeUnit {
    body: Box<NativeBody>,
    location: Option<SourceLocation>,
}

impl NativeUnit {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Dispatcher<'_>, &[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        NativeUnit {
            body: Box::new(body),
            location: None,
        }
    }

    /// Attach the definition's source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Share as a call unit ready for registration.
    pub fn into_unit(self) -> Arc<dyn CallableUnit> {
        Arc::new(self)
    }
}

impl CallableUnit for NativeUnit {
    fn invoke(&self, dispatcher: &Dispatcher<'_>, args: &[Value]) -> RuntimeResult<Value> {
        (self.body)(dispatcher, args)
    }

    fn source_location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Unit and generation, always read and written together.
struct Binding {
    unit: Option<Arc<dyn CallableUnit>>,
    generation: u64,
}

struct FunctionSlot {
    name: Arc<str>,
    binding: RwLock<Binding>,
    /// Published copy of `binding.generation` for lock-free staleness checks.
    generation: AtomicU64,
}

/// A named function with a replaceable body.
///
/// Cloning shares the function; identity is the allocation.
#[derive(Clone)]
pub struct FunctionValue(Arc<FunctionSlot>);

impl FunctionValue {
    /// A function with no body yet.
    pub(crate) fn undefined(name: &str) -> Self {
        Self::with_unit(name, None)
    }

    pub(crate) fn defined(name: &str, unit: Arc<dyn CallableUnit>) -> Self {
        Self::with_unit(name, Some(unit))
    }

    fn with_unit(name: &str, unit: Option<Arc<dyn CallableUnit>>) -> Self {
        FunctionValue(Arc::new(FunctionSlot {
            name: Arc::from(name),
            binding: RwLock::new(Binding {
                unit,
                generation: 0,
            }),
            generation: AtomicU64::new(0),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Current generation. Starts at 0 and increases on every redefinition.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.0.generation.load(Ordering::Acquire)
    }

    pub fn unit(&self) -> Option<Arc<dyn CallableUnit>> {
        self.0.binding.read().unit.clone()
    }

    pub fn is_defined(&self) -> bool {
        self.0.binding.read().unit.is_some()
    }

    /// The unit together with the generation it was installed at.
    pub(crate) fn snapshot(&self) -> (Option<Arc<dyn CallableUnit>>, u64) {
        let binding = self.0.binding.read();
        (binding.unit.clone(), binding.generation)
    }

    /// Swap in a new body and bump the generation. Returns the new
    /// generation.
    pub(crate) fn install(&self, unit: Arc<dyn CallableUnit>) -> u64 {
        let mut binding = self.0.binding.write();
        binding.unit = Some(unit);
        binding.generation += 1;
        self.0.generation.store(binding.generation, Ordering::Release);
        binding.generation
    }

    pub fn source_location(&self) -> Option<SourceLocation> {
        self.0
            .binding
            .read()
            .unit
            .as_ref()
            .and_then(|unit| unit.source_location().cloned())
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Hash consistent with [`ptr_eq`](Self::ptr_eq).
    pub fn identity_hash(&self) -> u64 {
        Arc::as_ptr(&self.0).cast::<()>() as usize as u64
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("generation", &self.generation())
            .field("defined", &self.is_defined())
            .finish()
    }
}
