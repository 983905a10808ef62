//! Primitive binary operations.
//!
//! The engine lowers `+`, `-`, `*`, `<`, `<=` and `==` to these functions.
//! Operands are interop receivers, so host values that look like integers
//! take part in arithmetic without conversion. Operand combinations an
//! operation is not defined for fail with a `TypeError` naming the operation.

use valk_ir::Operation;

use crate::errors::{type_error, RuntimeResult};
use crate::interop::{integer_view, Interop, LanguageView, TriState};
use crate::types::{Classify, TypeDescriptor};
use crate::value::{Integer, Value};

/// `left + right`: integer sum, or string concatenation when either side is a
/// string.
pub fn add(op: &Operation, left: &dyn Interop, right: &dyn Interop) -> RuntimeResult<Value> {
    if let Some((a, b)) = integer_operands(left, right) {
        return Ok(Value::Integer(a.add(&b)));
    }
    if left.is_string() || right.is_string() {
        let mut joined = concat_text(left);
        joined.push_str(&concat_text(right));
        return Ok(Value::string(joined));
    }
    Err(type_error(op, &[left, right]))
}

pub fn sub(op: &Operation, left: &dyn Interop, right: &dyn Interop) -> RuntimeResult<Value> {
    let (a, b) = integer_operands(left, right).ok_or_else(|| type_error(op, &[left, right]))?;
    Ok(Value::Integer(a.sub(&b)))
}

pub fn mul(op: &Operation, left: &dyn Interop, right: &dyn Interop) -> RuntimeResult<Value> {
    let (a, b) = integer_operands(left, right).ok_or_else(|| type_error(op, &[left, right]))?;
    Ok(Value::Integer(a.mul(&b)))
}

pub fn lt(op: &Operation, left: &dyn Interop, right: &dyn Interop) -> RuntimeResult<Value> {
    let (a, b) = integer_operands(left, right).ok_or_else(|| type_error(op, &[left, right]))?;
    Ok(Value::Boolean(a < b))
}

pub fn le(op: &Operation, left: &dyn Interop, right: &dyn Interop) -> RuntimeResult<Value> {
    let (a, b) = integer_operands(left, right).ok_or_else(|| type_error(op, &[left, right]))?;
    Ok(Value::Boolean(a <= b))
}

/// `left == right`. Never fails.
///
/// Integers, booleans and strings compare by value; everything else by
/// identity. Values of different kinds are unequal.
pub fn equal(left: &dyn Interop, right: &dyn Interop) -> Value {
    Value::Boolean(values_equal(left, right))
}

fn values_equal(left: &dyn Interop, right: &dyn Interop) -> bool {
    match (left.as_native(), right.as_native()) {
        (Some(Value::Integer(a)), Some(Value::Integer(b))) => return a == b,
        (Some(Value::Boolean(a)), Some(Value::Boolean(b))) => return a == b,
        (Some(Value::Str(a)), Some(Value::Str(b))) => return a == b,
        _ => {}
    }
    if let Some((a, b)) = integer_operands(left, right) {
        return a == b;
    }
    if left.is_null() || right.is_null() {
        return left.is_null() && right.is_null();
    }
    match left.is_identical_or_undefined(right) {
        TriState::True => true,
        TriState::False => false,
        TriState::Undefined => right.is_identical_or_undefined(left) == TriState::True,
    }
}

/// Both operands as integers, if both are numbers.
fn integer_operands(left: &dyn Interop, right: &dyn Interop) -> Option<(Integer, Integer)> {
    Some((integer_view(left)?, integer_view(right)?))
}

/// Text of an operand in a string concatenation.
fn concat_text(value: &dyn Interop) -> String {
    if value.is_null() {
        return "null".to_string();
    }
    if let Some(native) = value.as_native() {
        return native.to_display_string(false);
    }
    match value.get_type() {
        Ok(TypeDescriptor::Number | TypeDescriptor::String | TypeDescriptor::Boolean) => {
            LanguageView::new(value).to_display_string(false)
        }
        _ => "[foreign object]".to_string(),
    }
}
