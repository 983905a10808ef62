//! Type classification.
//!
//! Valkyrie has six types. A value's type is not read from a tag: it is found
//! by sending capability probes in a fixed order and taking the first that
//! answers yes. This works the same for runtime values and host values.

use std::fmt;

use crate::errors::{unsupported_message, RuntimeResult};
use crate::interop::Interop;

/// One of the language's six types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Null,
    Number,
    String,
    Boolean,
    Function,
    Object,
}

impl TypeDescriptor {
    /// Probe order. Function precedes Object, so an executable value with
    /// members is a Function.
    pub const PRECEDENCE: [TypeDescriptor; 6] = [
        TypeDescriptor::Null,
        TypeDescriptor::Number,
        TypeDescriptor::String,
        TypeDescriptor::Boolean,
        TypeDescriptor::Function,
        TypeDescriptor::Object,
    ];

    /// Name as shown to users.
    pub const fn name(self) -> &'static str {
        match self {
            TypeDescriptor::Null => "NULL",
            TypeDescriptor::Number => "Number",
            TypeDescriptor::String => "String",
            TypeDescriptor::Boolean => "Boolean",
            TypeDescriptor::Function => "Function",
            TypeDescriptor::Object => "Object",
        }
    }

    /// This type's capability probe.
    pub fn is_instance<V: Interop + ?Sized>(self, value: &V) -> bool {
        match self {
            TypeDescriptor::Null => value.is_null(),
            TypeDescriptor::Number => value.fits_in_big_integer(),
            TypeDescriptor::String => value.is_string(),
            TypeDescriptor::Boolean => value.is_boolean(),
            TypeDescriptor::Function => value.is_executable(),
            TypeDescriptor::Object => value.has_members(),
        }
    }

    /// The first type in [`PRECEDENCE`](Self::PRECEDENCE) whose probe
    /// accepts `value`.
    pub fn classify<V: Interop + ?Sized>(value: &V) -> Option<TypeDescriptor> {
        Self::PRECEDENCE
            .into_iter()
            .find(|ty| ty.is_instance(value))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type queries available on every interop receiver.
pub trait Classify {
    fn has_type(&self) -> bool;

    /// Fails with `UnsupportedMessage` when no type applies.
    fn get_type(&self) -> RuntimeResult<TypeDescriptor>;
}

impl<T: Interop + ?Sized> Classify for T {
    fn has_type(&self) -> bool {
        TypeDescriptor::classify(self).is_some()
    }

    fn get_type(&self) -> RuntimeResult<TypeDescriptor> {
        TypeDescriptor::classify(self).ok_or_else(|| unsupported_message("get_type"))
    }
}

#[cfg(test)]
mod tests;
