//! Valkyrie IR - source-level descriptors shared by the runtime core.
//!
//! The parser and AST live outside this workspace. What the runtime needs
//! from them is small: where an operation came from (`SourceLocation`) and
//! what it was called (`Operation`), so faults can be rendered with context.

mod location;
mod op;

pub use location::SourceLocation;
pub use op::{BinaryOp, Operation};
