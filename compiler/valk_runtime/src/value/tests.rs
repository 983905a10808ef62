use super::*;
use crate::function::{FunctionRegistry, NativeUnit};
use crate::interop::Interop;
use pretty_assertions::assert_eq;

#[test]
fn test_display_contract() {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert_eq!(Value::int(-12).to_string(), "-12");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Boolean(false).to_string(), "false");
    assert_eq!(Value::string("raw \"text\"").to_string(), "raw \"text\"");
    assert_eq!(Value::object().to_string(), "Object");
}

#[test]
fn test_function_displays_as_name() {
    let registry = FunctionRegistry::new();
    let f = registry.register("fac", NativeUnit::new(|_, _| Ok(Value::Null)).into_unit());
    assert_eq!(Value::Function(f).to_string(), "fac");
}

#[test]
fn test_list_display() {
    let list = Value::list(vec![Value::int(1), Value::string("a"), Value::Null]);
    assert_eq!(list.to_string(), "[1, a, NULL]");
    assert_eq!(Value::list(Vec::new()).to_string(), "[]");
}

#[test]
fn test_big_integer_display_is_exact() {
    let n = Value::Integer(Integer::parse("99999999999999999999").unwrap());
    assert_eq!(n.to_string(), "99999999999999999999");
    assert!(!n.fits_in_long());
    assert!(n.as_long().is_err());
}

#[test]
fn test_null_singleton_identity() {
    assert!(Value::NULL.is_null());
    assert_eq!(Value::NULL.identity_hash().unwrap(), Value::Null.identity_hash().unwrap());
}

#[test]
fn test_null_identity_hash_is_nonzero() {
    let hash = Value::Null.identity_hash().unwrap();
    assert_eq!(hash, NULL_IDENTITY_HASH);
    assert_ne!(hash, 0);
}

#[test]
fn test_accessors() {
    assert_eq!(Value::int(3).as_integer(), Some(&Integer::from(3_i64)));
    assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    assert_eq!(Value::string("s").as_str(), Some("s"));
    assert_eq!(Value::int(3).as_str(), None);
    assert_eq!(Value::list(vec![Value::Null]).as_list().map(<[Value]>::len), Some(1));
    assert!(Value::object().as_object().is_some());
    assert!(Value::Null.as_function().is_none());
}

#[test]
fn test_string_clone_shares_payload() {
    let s = Value::string("shared");
    let t = s.clone();
    match (&s, &t) {
        (Value::Str(a), Value::Str(b)) => assert!(a.ptr_eq(b)),
        _ => panic!("expected strings"),
    }
}

#[test]
fn test_conversions() {
    assert_eq!(Value::from(5_i64).as_integer(), Some(&Integer::from(5_i64)));
    assert_eq!(Value::from(false).as_bool(), Some(false));
    assert_eq!(Value::from("x").as_str(), Some("x"));
}

#[test]
fn test_debug_is_informative() {
    assert_eq!(format!("{:?}", Value::string("a")), "Str(\"a\")");
    assert_eq!(format!("{:?}", Value::int(2)), "Integer(2)");
    assert_eq!(
        format!("{:?}", Value::list(vec![Value::Null])),
        "List([Null])"
    );
}
