//! Property-based tests for the value model, property store and registry.
//!
//! 1. Integer display and narrowing agree with the host integer types
//! 2. Integers beyond 64 bits display exactly and never narrow to `long`
//! 3. The property store behaves like an insertion-ordered map
//! 4. Repeated lookups always yield one canonical function per name

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::HashMap;

use proptest::prelude::*;
use valk_runtime::{FunctionRegistry, Integer, Interop, ObjectValue, Value};

// -- Strategies --

/// Decimal literals with at least 20 digits, always outside `i64`.
fn wide_literal_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::string::string_regex("[1-9][0-9]{19,60}").expect("valid regex"))
        .prop_map(|(negative, digits)| if negative { format!("-{digits}") } else { digits })
}

#[derive(Clone, Debug)]
enum StoreOp {
    Write(String, i64),
    Remove(String),
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    let key = prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_string);
    prop_oneof![
        (key.clone(), any::<i64>()).prop_map(|(k, v)| StoreOp::Write(k, v)),
        key.prop_map(StoreOp::Remove),
    ]
}

fn function_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f]{1,2}").expect("valid regex")
}

// -- Properties --

proptest! {
    #[test]
    fn integer_display_matches_host(n in any::<i64>()) {
        let value = Value::int(n);
        prop_assert_eq!(value.to_string(), n.to_string());
        prop_assert!(value.fits_in_long());
        prop_assert_eq!(value.as_long().unwrap(), n);
    }

    #[test]
    fn narrowing_is_exact(n in any::<i64>()) {
        let value = Value::int(n);
        prop_assert_eq!(value.fits_in_byte(), i8::try_from(n).is_ok());
        prop_assert_eq!(value.fits_in_short(), i16::try_from(n).is_ok());
        prop_assert_eq!(value.fits_in_int(), i32::try_from(n).is_ok());
        if let Ok(narrow) = i32::try_from(n) {
            prop_assert_eq!(value.as_int().unwrap(), narrow);
        } else {
            prop_assert!(value.as_int().is_err());
        }
    }

    #[test]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "an exactly converted double holds an integral value in i64 range"
    )]
    fn double_narrowing_round_trips(n in any::<i64>()) {
        let value = Value::int(n);
        match value.as_double() {
            Ok(d) => prop_assert_eq!(d as i128, i128::from(n)),
            Err(_) => prop_assert!(!value.fits_in_double()),
        }
    }

    #[test]
    fn wide_integers_display_exactly(literal in wide_literal_strategy()) {
        let value = Value::Integer(Integer::parse(&literal).unwrap());
        prop_assert_eq!(value.to_string(), literal);
        prop_assert!(!value.fits_in_long());
        prop_assert!(value.as_long().is_err());
    }

    #[test]
    fn store_matches_ordered_model(ops in prop::collection::vec(store_op_strategy(), 0..40)) {
        let store = ObjectValue::new();
        let mut model: Vec<(String, i64)> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Write(key, v) => {
                    store.write(key.clone(), Value::int(v));
                    match model.iter_mut().find(|(k, _)| *k == key) {
                        Some(slot) => slot.1 = v,
                        None => model.push((key, v)),
                    }
                }
                StoreOp::Remove(key) => {
                    let present = model.iter().position(|(k, _)| *k == key);
                    prop_assert_eq!(store.remove(&key).is_ok(), present.is_some());
                    if let Some(i) = present {
                        model.remove(i);
                    }
                }
            }
        }

        let model_keys: Vec<String> = model.iter().map(|(k, _)| k.clone()).collect();
        prop_assert_eq!(store.keys(), model_keys);
        for (key, v) in &model {
            prop_assert_eq!(store.read(key).unwrap().to_string(), v.to_string());
            prop_assert!(!store.is_insertable(key));
        }
    }

    #[test]
    fn lookups_are_canonical(names in prop::collection::vec(function_name_strategy(), 1..30)) {
        let registry = FunctionRegistry::new();
        let mut first_seen = HashMap::new();

        for name in &names {
            let function = registry.lookup(name, true).unwrap();
            let canonical = first_seen.entry(name.clone()).or_insert_with(|| function.clone());
            prop_assert!(canonical.ptr_eq(&function));
        }
        prop_assert_eq!(registry.functions().len(), first_seen.len());
    }
}
