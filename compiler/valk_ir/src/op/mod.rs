//! Operation descriptors.
//!
//! An `Operation` is what the runtime knows about the expression that
//! failed: an optional short name (`"+"`, `"<="`) and an optional location.
//! Both are optional because foreign callers and synthesized calls may
//! have neither.

use std::fmt;

use crate::SourceLocation;

/// Binary operators implemented by the runtime's primitive operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Lt,
    Le,
    Eq,
}

impl BinaryOp {
    /// The operator's short name as it appears in source.
    pub const fn short_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Context describing the operation a fault occurred in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Operation {
    short_name: Option<&'static str>,
    location: Option<SourceLocation>,
}

impl Operation {
    /// An operation with no known name or location.
    pub const UNKNOWN: Operation = Operation {
        short_name: None,
        location: None,
    };

    /// Create an operation with a short name.
    pub const fn named(short_name: &'static str) -> Self {
        Operation {
            short_name: Some(short_name),
            location: None,
        }
    }

    /// Create the descriptor for a binary operator.
    pub const fn binary(op: BinaryOp) -> Self {
        Operation::named(op.short_name())
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn short_name(&self) -> Option<&'static str> {
        self.short_name
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Operation::binary(op)
    }
}
