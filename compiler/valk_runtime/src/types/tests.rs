use super::*;
use crate::function::{FunctionRegistry, NativeUnit};
use crate::value::Value;
use pretty_assertions::assert_eq;

/// Host value that is both executable and has members.
#[derive(Debug)]
struct CallableRecord;

impl Interop for CallableRecord {
    fn is_executable(&self) -> bool {
        true
    }

    fn has_members(&self) -> bool {
        true
    }

    fn to_display_string(&self, _allow_side_effects: bool) -> String {
        "record".to_string()
    }
}

#[derive(Debug)]
struct Opaque;

impl Interop for Opaque {
    fn to_display_string(&self, _allow_side_effects: bool) -> String {
        "opaque".to_string()
    }
}

#[test]
fn test_precedence_order() {
    assert_eq!(
        TypeDescriptor::PRECEDENCE.map(TypeDescriptor::name),
        ["NULL", "Number", "String", "Boolean", "Function", "Object"]
    );
}

#[test]
fn test_native_classification() {
    let registry = FunctionRegistry::new();
    let f = registry.register("f", NativeUnit::new(|_, _| Ok(Value::Null)).into_unit());

    assert_eq!(Value::Null.get_type().ok(), Some(TypeDescriptor::Null));
    assert_eq!(Value::int(1).get_type().ok(), Some(TypeDescriptor::Number));
    assert_eq!(Value::string("s").get_type().ok(), Some(TypeDescriptor::String));
    assert_eq!(Value::Boolean(false).get_type().ok(), Some(TypeDescriptor::Boolean));
    assert_eq!(Value::Function(f).get_type().ok(), Some(TypeDescriptor::Function));
    assert_eq!(Value::object().get_type().ok(), Some(TypeDescriptor::Object));
}

#[test]
fn test_function_wins_over_object() {
    assert_eq!(
        TypeDescriptor::classify(&CallableRecord),
        Some(TypeDescriptor::Function)
    );
    assert!(TypeDescriptor::Object.is_instance(&CallableRecord));
}

#[test]
fn test_unclassified_values() {
    assert!(!Opaque.has_type());
    assert!(!Value::list(Vec::new()).has_type());
    assert!(matches!(
        Opaque.get_type().map_err(|e| e.kind),
        Err(crate::errors::RuntimeErrorKind::UnsupportedMessage { message: "get_type" })
    ));
}

#[test]
fn test_descriptor_is_meta_object() {
    let ty = TypeDescriptor::Number;
    assert!(ty.is_meta_object());
    assert_eq!(ty.to_display_string(false), "Number");
    assert_eq!(ty.meta_simple_name().ok(), Some("Number"));
    assert_eq!(ty.is_meta_instance(&Value::int(3)).ok(), Some(true));
    assert_eq!(ty.is_meta_instance(&Value::string("3")).ok(), Some(false));
    assert_eq!(TypeDescriptor::Null.to_string(), "NULL");
}

#[test]
fn test_descriptors_are_not_classified() {
    assert!(!TypeDescriptor::Object.has_type());
}
