//! Runtime values.
//!
//! `Value` is the closed set of values owned by the runtime. Strings and
//! lists live behind [`Heap`], functions and objects are shared handles with
//! identity. Values coming from outside the runtime are never converted into
//! `Value`; they take part in operations through the [`Interop`] protocol.
//!
//! [`Interop`]: crate::interop::Interop

mod heap;
mod integer;

use std::fmt;

pub use heap::Heap;
pub use integer::Integer;
use num_bigint::BigInt;

use crate::function::FunctionValue;
use crate::object::ObjectValue;

/// Identity hash of the null singleton. Non-zero, so it never matches a
/// zeroed or default hash.
pub(crate) const NULL_IDENTITY_HASH: u64 = 0x9E37_79B9_7F4A_7C15;

/// A value owned by the runtime.
#[derive(Clone)]
pub enum Value {
    /// The null singleton. Zero-sized, so every `Value::Null` is the same
    /// value.
    Null,
    Integer(Integer),
    Boolean(bool),
    Str(Heap<str>),
    Function(FunctionValue),
    Object(ObjectValue),
    List(Heap<[Value]>),
}

impl Value {
    /// The null singleton.
    pub const NULL: Value = Value::Null;

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(Integer::from(n))
    }

    pub fn big_int(n: BigInt) -> Self {
        Value::Integer(Integer::from(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        let s: String = s.into();
        Value::Str(Heap::new(s))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// A fresh object with no properties.
    pub fn object() -> Self {
        Value::Object(ObjectValue::new())
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(&**items),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::Function(f)
    }
}

impl From<ObjectValue> for Value {
    fn from(o: ObjectValue) -> Self {
        Value::Object(o)
    }
}

/// Display text used by the language.
///
/// Null renders as `NULL`, objects as `Object`, functions as their name.
/// Strings render unquoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => f.write_str(func.name()),
            Value::Object(_) => f.write_str("Object"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
            Value::List(items) => f.debug_tuple("List").field(&&**items).finish(),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
