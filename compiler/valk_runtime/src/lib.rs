//! Valkyrie runtime core.
//!
//! The pieces an interpreter for Valkyrie is built on:
//!
//! - [`value`]: the value model (`Value`, arbitrary-precision `Integer`)
//! - [`types`]: the six language types and capability-based classification
//! - [`object`]: insertion-ordered dynamic property storage
//! - [`function`]: the function registry with in-place redefinition, and
//!   dispatch with generation-checked call-site caching
//! - [`interop`]: the message protocol every value answers, native or not
//! - [`ops`]: primitive binary operations
//! - [`errors`]: runtime faults
//!
//! # Tracing
//!
//! Call [`init_tracing`] once at startup. Output is enabled with
//! `RUST_LOG=valk_runtime=debug` (registry changes) or `=trace` (dispatch
//! paths). Set `VALK_LOG_TREE=1` for indented, span-nested output.

pub mod config;
pub mod errors;
pub mod function;
pub mod interop;
pub mod object;
pub mod ops;
mod stack;
pub mod types;
pub mod value;

use std::sync::Once;

pub use config::RuntimeConfig;
pub use errors::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use function::{
    CallSite, CallableUnit, Dispatcher, FunctionBatch, FunctionRegistry, FunctionValue,
    FunctionsObject, NativeUnit,
};
pub use interop::{Interop, LanguageView, TriState};
pub use object::{ObjectValue, PropertyStore};
pub use types::{Classify, TypeDescriptor};
pub use value::{Integer, Value};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("VALK_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
