//! Language view of arbitrary values.
//!
//! A [`LanguageView`] borrows any interop receiver and answers as Valkyrie
//! would: its type is found by precedence probing and its display follows
//! the category rules. Native values are shown unchanged; foreign values are
//! shown through their probes, never copied.

use num_bigint::BigInt;
use valk_ir::SourceLocation;

use super::{Interop, TriState};
use crate::errors::RuntimeResult;
use crate::function::Dispatcher;
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Borrowing adapter presenting a receiver from this language's side.
#[derive(Clone, Copy, Debug)]
pub struct LanguageView<'a> {
    delegate: &'a dyn Interop,
}

impl<'a> LanguageView<'a> {
    pub fn new(delegate: &'a dyn Interop) -> Self {
        LanguageView { delegate }
    }

    pub fn delegate(&self) -> &'a dyn Interop {
        self.delegate
    }

    /// The type the value has in this language, if any.
    pub fn meta_object(&self) -> Option<TypeDescriptor> {
        TypeDescriptor::classify(self.delegate)
    }

    fn foreign_display(&self) -> String {
        let Some(ty) = self.meta_object() else {
            return "Unsupported".to_string();
        };
        let rendered = match ty {
            TypeDescriptor::Null => Ok("NULL".to_string()),
            TypeDescriptor::Number => self.delegate.as_big_integer().map(|n| n.to_string()),
            TypeDescriptor::String => self.delegate.as_string(),
            TypeDescriptor::Boolean => self.delegate.as_boolean().map(|b| b.to_string()),
            // Foreign functions and objects never expose their contents.
            TypeDescriptor::Function | TypeDescriptor::Object => Ok(ty.name().to_string()),
        };
        rendered.unwrap_or_else(|_| "Unsupported".to_string())
    }
}

impl Interop for LanguageView<'_> {
    fn as_native(&self) -> Option<&Value> {
        self.delegate.as_native()
    }

    fn is_null(&self) -> bool {
        self.delegate.is_null()
    }

    fn is_boolean(&self) -> bool {
        self.delegate.is_boolean()
    }

    fn as_boolean(&self) -> RuntimeResult<bool> {
        self.delegate.as_boolean()
    }

    fn is_string(&self) -> bool {
        self.delegate.is_string()
    }

    fn as_string(&self) -> RuntimeResult<String> {
        self.delegate.as_string()
    }

    fn fits_in_big_integer(&self) -> bool {
        self.delegate.fits_in_big_integer()
    }

    fn as_big_integer(&self) -> RuntimeResult<BigInt> {
        self.delegate.as_big_integer()
    }

    fn fits_in_byte(&self) -> bool {
        self.delegate.fits_in_byte()
    }

    fn fits_in_short(&self) -> bool {
        self.delegate.fits_in_short()
    }

    fn fits_in_int(&self) -> bool {
        self.delegate.fits_in_int()
    }

    fn fits_in_long(&self) -> bool {
        self.delegate.fits_in_long()
    }

    fn fits_in_float(&self) -> bool {
        self.delegate.fits_in_float()
    }

    fn fits_in_double(&self) -> bool {
        self.delegate.fits_in_double()
    }

    fn as_byte(&self) -> RuntimeResult<i8> {
        self.delegate.as_byte()
    }

    fn as_short(&self) -> RuntimeResult<i16> {
        self.delegate.as_short()
    }

    fn as_int(&self) -> RuntimeResult<i32> {
        self.delegate.as_int()
    }

    fn as_long(&self) -> RuntimeResult<i64> {
        self.delegate.as_long()
    }

    fn as_float(&self) -> RuntimeResult<f32> {
        self.delegate.as_float()
    }

    fn as_double(&self) -> RuntimeResult<f64> {
        self.delegate.as_double()
    }

    fn has_members(&self) -> bool {
        self.delegate.has_members()
    }

    fn read_member(&self, member: &str) -> RuntimeResult<Value> {
        self.delegate.read_member(member)
    }

    fn write_member(&self, member: &str, value: Value) -> RuntimeResult<()> {
        self.delegate.write_member(member, value)
    }

    fn remove_member(&self, member: &str) -> RuntimeResult<()> {
        self.delegate.remove_member(member)
    }

    fn is_member_readable(&self, member: &str) -> bool {
        self.delegate.is_member_readable(member)
    }

    fn is_member_writable(&self, member: &str) -> bool {
        self.delegate.is_member_writable(member)
    }

    fn is_member_removable(&self, member: &str) -> bool {
        self.delegate.is_member_removable(member)
    }

    fn is_member_insertable(&self, member: &str) -> bool {
        self.delegate.is_member_insertable(member)
    }

    fn enumerate_members(&self) -> RuntimeResult<Vec<String>> {
        self.delegate.enumerate_members()
    }

    fn has_array_elements(&self) -> bool {
        self.delegate.has_array_elements()
    }

    fn array_size(&self) -> RuntimeResult<usize> {
        self.delegate.array_size()
    }

    fn read_array_element(&self, index: usize) -> RuntimeResult<Value> {
        self.delegate.read_array_element(index)
    }

    fn is_executable(&self) -> bool {
        self.delegate.is_executable()
    }

    fn execute(&self, dispatcher: &Dispatcher<'_>, args: &[Value]) -> RuntimeResult<Value> {
        self.delegate.execute(dispatcher, args)
    }

    fn has_source_location(&self) -> bool {
        self.delegate.has_source_location()
    }

    fn source_location(&self) -> RuntimeResult<SourceLocation> {
        self.delegate.source_location()
    }

    fn is_identical_or_undefined(&self, other: &dyn Interop) -> TriState {
        self.delegate.is_identical_or_undefined(other)
    }

    fn identity_hash(&self) -> RuntimeResult<u64> {
        self.delegate.identity_hash()
    }

    fn to_display_string(&self, allow_side_effects: bool) -> String {
        match self.delegate.as_native() {
            Some(value) => value.to_display_string(allow_side_effects),
            None => self.foreign_display(),
        }
    }
}
