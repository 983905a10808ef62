//! The interop protocol.
//!
//! [`Interop`] is the message surface through which the runtime inspects
//! any value, its own or a host's: classification probes, display, identity,
//! member access, execution and numeric conversion. Every message has a
//! default that answers "not supported", so a host type only implements what
//! it actually is. [`Value`] implements the full surface; foreign values take
//! part in operations as `&dyn Interop` without being converted.
//!
//! Classification (`has_type`/`get_type`) is layered on top by
//! [`Classify`](crate::types::Classify).

mod view;

use std::fmt;

use num_bigint::BigInt;
use valk_ir::SourceLocation;

pub use view::LanguageView;

use crate::errors::{
    invalid_array_index, unsupported_conversion, unsupported_message, RuntimeResult,
};
use crate::function::Dispatcher;
use crate::object::PropertyStore;
use crate::types::TypeDescriptor;
use crate::value::{Integer, Value, NULL_IDENTITY_HASH};

/// Three-valued identity answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriState {
    True,
    False,
    /// The receiver cannot tell; ask the other side or fall back to
    /// reference identity.
    Undefined,
}

impl From<bool> for TriState {
    fn from(b: bool) -> Self {
        if b {
            TriState::True
        } else {
            TriState::False
        }
    }
}

/// Messages every value can be sent.
pub trait Interop: fmt::Debug + Send + Sync {
    /// The runtime-owned value behind this receiver, if any.
    fn as_native(&self) -> Option<&Value> {
        None
    }

    fn is_null(&self) -> bool {
        false
    }

    fn is_boolean(&self) -> bool {
        false
    }

    fn as_boolean(&self) -> RuntimeResult<bool> {
        Err(unsupported_message("as_boolean"))
    }

    fn is_string(&self) -> bool {
        false
    }

    fn as_string(&self) -> RuntimeResult<String> {
        Err(unsupported_message("as_string"))
    }

    // Numbers. Fixed-width conversions are derived from the big-integer
    // view; implementors only need the first two.

    fn fits_in_big_integer(&self) -> bool {
        false
    }

    fn as_big_integer(&self) -> RuntimeResult<BigInt> {
        Err(unsupported_conversion("big integer"))
    }

    fn fits_in_byte(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_byte())
    }

    fn fits_in_short(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_short())
    }

    fn fits_in_int(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_int())
    }

    fn fits_in_long(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_long())
    }

    fn fits_in_float(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_float())
    }

    fn fits_in_double(&self) -> bool {
        integer_view(self).is_some_and(|n| n.fits_in_double())
    }

    fn as_byte(&self) -> RuntimeResult<i8> {
        integer_view(self).ok_or_else(|| unsupported_conversion("byte"))?.as_byte()
    }

    fn as_short(&self) -> RuntimeResult<i16> {
        integer_view(self).ok_or_else(|| unsupported_conversion("short"))?.as_short()
    }

    fn as_int(&self) -> RuntimeResult<i32> {
        integer_view(self).ok_or_else(|| unsupported_conversion("int"))?.as_int()
    }

    fn as_long(&self) -> RuntimeResult<i64> {
        integer_view(self).ok_or_else(|| unsupported_conversion("long"))?.as_long()
    }

    fn as_float(&self) -> RuntimeResult<f32> {
        integer_view(self).ok_or_else(|| unsupported_conversion("float"))?.as_float()
    }

    fn as_double(&self) -> RuntimeResult<f64> {
        integer_view(self).ok_or_else(|| unsupported_conversion("double"))?.as_double()
    }

    // Members.

    fn has_members(&self) -> bool {
        false
    }

    fn read_member(&self, _member: &str) -> RuntimeResult<Value> {
        Err(unsupported_message("read_member"))
    }

    fn write_member(&self, _member: &str, _value: Value) -> RuntimeResult<()> {
        Err(unsupported_message("write_member"))
    }

    fn remove_member(&self, _member: &str) -> RuntimeResult<()> {
        Err(unsupported_message("remove_member"))
    }

    fn is_member_readable(&self, _member: &str) -> bool {
        false
    }

    /// Whether an existing member may be overwritten.
    fn is_member_writable(&self, _member: &str) -> bool {
        false
    }

    fn is_member_removable(&self, _member: &str) -> bool {
        false
    }

    /// Whether a new member may be added under this name.
    fn is_member_insertable(&self, _member: &str) -> bool {
        false
    }

    fn enumerate_members(&self) -> RuntimeResult<Vec<String>> {
        Err(unsupported_message("enumerate_members"))
    }

    // Arrays.

    fn has_array_elements(&self) -> bool {
        false
    }

    fn array_size(&self) -> RuntimeResult<usize> {
        Err(unsupported_message("array_size"))
    }

    fn read_array_element(&self, _index: usize) -> RuntimeResult<Value> {
        Err(unsupported_message("read_array_element"))
    }

    // Execution.

    fn is_executable(&self) -> bool {
        false
    }

    fn execute(&self, _dispatcher: &Dispatcher<'_>, _args: &[Value]) -> RuntimeResult<Value> {
        Err(unsupported_message("execute"))
    }

    fn has_source_location(&self) -> bool {
        false
    }

    fn source_location(&self) -> RuntimeResult<SourceLocation> {
        Err(unsupported_message("source_location"))
    }

    // Meta objects.

    /// Whether this receiver describes a type.
    fn is_meta_object(&self) -> bool {
        false
    }

    fn meta_simple_name(&self) -> RuntimeResult<&'static str> {
        Err(unsupported_message("meta_simple_name"))
    }

    fn meta_qualified_name(&self) -> RuntimeResult<&'static str> {
        Err(unsupported_message("meta_qualified_name"))
    }

    fn is_meta_instance(&self, _instance: &dyn Interop) -> RuntimeResult<bool> {
        Err(unsupported_message("is_meta_instance"))
    }

    // Identity and display.

    fn is_identical_or_undefined(&self, _other: &dyn Interop) -> TriState {
        TriState::Undefined
    }

    fn identity_hash(&self) -> RuntimeResult<u64> {
        Err(unsupported_message("identity_hash"))
    }

    fn to_display_string(&self, allow_side_effects: bool) -> String;
}

/// The value as an integer, if it is a number.
pub(crate) fn integer_view<T: Interop + ?Sized>(value: &T) -> Option<Integer> {
    if let Some(Value::Integer(n)) = value.as_native() {
        return Some(n.clone());
    }
    if !value.fits_in_big_integer() {
        return None;
    }
    value.as_big_integer().ok().map(Integer::from)
}

/// Whether two receivers are the same value.
///
/// Asks each side in turn; when neither can tell, falls back to reference
/// identity of the receivers themselves.
pub fn is_identical(left: &dyn Interop, right: &dyn Interop) -> bool {
    match left.is_identical_or_undefined(right) {
        TriState::True => true,
        TriState::False => false,
        TriState::Undefined => match right.is_identical_or_undefined(left) {
            TriState::True => true,
            TriState::False => false,
            TriState::Undefined => std::ptr::addr_eq(left, right),
        },
    }
}

impl Interop for Value {
    fn as_native(&self) -> Option<&Value> {
        Some(self)
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    fn as_boolean(&self) -> RuntimeResult<bool> {
        self.as_bool().ok_or_else(|| unsupported_message("as_boolean"))
    }

    fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    fn as_string(&self) -> RuntimeResult<String> {
        self.as_str()
            .map(str::to_string)
            .ok_or_else(|| unsupported_message("as_string"))
    }

    fn fits_in_big_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    fn as_big_integer(&self) -> RuntimeResult<BigInt> {
        self.as_integer()
            .map(|n| n.as_big_int().clone())
            .ok_or_else(|| unsupported_conversion("big integer"))
    }

    fn has_members(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    fn read_member(&self, member: &str) -> RuntimeResult<Value> {
        self.as_object()
            .ok_or_else(|| unsupported_message("read_member"))?
            .read(member)
    }

    fn write_member(&self, member: &str, value: Value) -> RuntimeResult<()> {
        self.as_object()
            .ok_or_else(|| unsupported_message("write_member"))?
            .write(member, value);
        Ok(())
    }

    fn remove_member(&self, member: &str) -> RuntimeResult<()> {
        self.as_object()
            .ok_or_else(|| unsupported_message("remove_member"))?
            .remove(member)
            .map(drop)
    }

    fn is_member_readable(&self, member: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.contains(member))
    }

    fn is_member_writable(&self, member: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.contains(member))
    }

    fn is_member_removable(&self, member: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.contains(member))
    }

    fn is_member_insertable(&self, member: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.is_insertable(member))
    }

    fn enumerate_members(&self) -> RuntimeResult<Vec<String>> {
        self.as_object()
            .map(PropertyStore::keys)
            .ok_or_else(|| unsupported_message("enumerate_members"))
    }

    fn has_array_elements(&self) -> bool {
        matches!(self, Value::List(_))
    }

    fn array_size(&self) -> RuntimeResult<usize> {
        self.as_list()
            .map(<[Value]>::len)
            .ok_or_else(|| unsupported_message("array_size"))
    }

    fn read_array_element(&self, index: usize) -> RuntimeResult<Value> {
        let items = self
            .as_list()
            .ok_or_else(|| unsupported_message("read_array_element"))?;
        items
            .get(index)
            .cloned()
            .ok_or_else(|| invalid_array_index(index))
    }

    fn is_executable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    fn execute(&self, dispatcher: &Dispatcher<'_>, args: &[Value]) -> RuntimeResult<Value> {
        let function = self
            .as_function()
            .ok_or_else(|| unsupported_message("execute"))?;
        dispatcher.call(function, args)
    }

    fn has_source_location(&self) -> bool {
        self.as_function()
            .is_some_and(|f| f.source_location().is_some())
    }

    fn source_location(&self) -> RuntimeResult<SourceLocation> {
        self.as_function()
            .and_then(crate::function::FunctionValue::source_location)
            .ok_or_else(|| unsupported_message("source_location"))
    }

    fn is_identical_or_undefined(&self, other: &dyn Interop) -> TriState {
        match (self, other.as_native()) {
            // Null is identical only to itself, never undefined.
            (Value::Null, other) => TriState::from(matches!(other, Some(Value::Null))),
            (Value::Function(a), Some(Value::Function(b))) => TriState::from(a.ptr_eq(b)),
            (Value::Object(a), Some(Value::Object(b))) => TriState::from(a.ptr_eq(b)),
            _ => TriState::Undefined,
        }
    }

    fn identity_hash(&self) -> RuntimeResult<u64> {
        match self {
            Value::Null => Ok(NULL_IDENTITY_HASH),
            Value::Function(f) => Ok(f.identity_hash()),
            Value::Object(obj) => Ok(obj.identity_hash()),
            _ => Err(unsupported_message("identity_hash")),
        }
    }

    fn to_display_string(&self, _allow_side_effects: bool) -> String {
        self.to_string()
    }
}

impl Interop for TypeDescriptor {
    fn is_meta_object(&self) -> bool {
        true
    }

    fn meta_simple_name(&self) -> RuntimeResult<&'static str> {
        Ok(self.name())
    }

    fn meta_qualified_name(&self) -> RuntimeResult<&'static str> {
        Ok(self.name())
    }

    fn is_meta_instance(&self, instance: &dyn Interop) -> RuntimeResult<bool> {
        Ok(self.is_instance(instance))
    }

    fn to_display_string(&self, _allow_side_effects: bool) -> String {
        self.name().to_string()
    }
}
