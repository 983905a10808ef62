//! Runtime faults.
//!
//! Every failing runtime operation produces a [`RuntimeError`]: a typed
//! [`RuntimeErrorKind`] for programmatic matching, the rendered message, and
//! the source location when one is known. Errors are built through the factory
//! functions in this module rather than by hand, so the message and the kind
//! always agree.

use std::fmt::Write as _;

use thiserror::Error;
use valk_ir::{Operation, SourceLocation};

use crate::interop::{Interop, LanguageView};
use crate::types::Classify;

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Typed fault category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// A property read or removal named an absent member.
    #[error("unknown member: {member}")]
    UnresolvedMember { member: String },

    /// A numeric value does not fit the requested representation, or the
    /// value is not a number at all.
    #[error("unsupported conversion to {target}")]
    UnsupportedConversion { target: &'static str },

    /// The value does not support the requested interop message.
    #[error("unsupported message: {message}")]
    UnsupportedMessage { message: &'static str },

    /// An operation was applied to operands it is not defined for.
    #[error("{message}")]
    TypeError { message: String },

    /// A call resolved to a function that has no callable unit.
    #[error("undefined function: {name}")]
    UnresolvedCall { name: String },

    /// An array read used an index outside the array.
    #[error("index {index} out of bounds")]
    InvalidArrayIndex { index: usize },

    /// The configured call depth was exceeded.
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
}

/// A runtime fault.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    /// Structured category.
    pub kind: RuntimeErrorKind,
    /// Human-readable message. Equals `kind.to_string()`.
    pub message: String,
    /// Where the fault happened, when known.
    pub location: Option<SourceLocation>,
}

impl RuntimeError {
    fn from_kind(kind: RuntimeErrorKind) -> Self {
        let message = kind.to_string();
        RuntimeError {
            kind,
            message,
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn kind(&self) -> &RuntimeErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Read or removal of an absent member.
#[cold]
pub fn unresolved_member(member: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnresolvedMember {
        member: member.to_string(),
    })
}

/// Numeric conversion out of range or out of category.
#[cold]
pub fn unsupported_conversion(target: &'static str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnsupportedConversion { target })
}

/// Interop message the receiver does not implement.
#[cold]
pub fn unsupported_message(message: &'static str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnsupportedMessage { message })
}

/// Call of a function with no callable unit.
#[cold]
pub fn unresolved_call(name: &str) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::UnresolvedCall {
        name: name.to_string(),
    })
}

/// Array index outside the array.
#[cold]
pub fn invalid_array_index(index: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::InvalidArrayIndex { index })
}

/// Call depth limit exceeded.
#[cold]
pub fn stack_overflow(depth: usize) -> RuntimeError {
    RuntimeError::from_kind(RuntimeErrorKind::StackOverflow { depth })
}

/// An operation applied to operands it is not defined for.
///
/// Renders `Type error at <location>: operation "<name>" not defined for
/// <operands>`. Location and name are omitted when the operation does not
/// carry them. Each operand is rendered as its type name followed by its
/// display text; strings are quoted, null operands omit the type name, and
/// operands without a classification render as `ANY`.
#[cold]
pub fn type_error(operation: &Operation, operands: &[&dyn Interop]) -> RuntimeError {
    let mut message = String::from("Type error");
    if let Some(location) = operation.location() {
        let _ = write!(message, " at {location}");
    }
    message.push_str(": operation");
    if let Some(name) = operation.short_name() {
        let _ = write!(message, " \"{name}\"");
    }
    message.push_str(" not defined for");

    for (i, operand) in operands.iter().enumerate() {
        message.push_str(if i == 0 { " " } else { ", " });
        render_operand(&mut message, *operand);
    }

    let error = RuntimeError::from_kind(RuntimeErrorKind::TypeError { message });
    match operation.location() {
        Some(location) => error.with_location(location.clone()),
        None => error,
    }
}

fn render_operand(out: &mut String, operand: &dyn Interop) {
    let view = LanguageView::new(operand);
    let Ok(ty) = view.get_type() else {
        out.push_str("ANY");
        return;
    };
    if !view.is_null() {
        out.push_str(ty.name());
        out.push(' ');
    }
    let quoted = view.is_string();
    if quoted {
        out.push('"');
    }
    out.push_str(&view.to_display_string(false));
    if quoted {
        out.push('"');
    }
}
