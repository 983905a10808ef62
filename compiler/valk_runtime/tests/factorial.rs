//! End-to-end: a recursive guest function driven through the registry,
//! call sites and primitive operations, the way an engine would run
//!
//! ```text
//! fn fac(n) { if n <= 1 { return 1; } return n * fac(n - 1); }
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use valk_ir::{BinaryOp, Operation, SourceLocation};
use valk_runtime::{
    ops, CallSite, CallableUnit, FunctionRegistry, NativeUnit, RuntimeConfig, RuntimeErrorKind,
    Value,
};

fn at(op: BinaryOp, line: u32, column: u32) -> Operation {
    Operation::binary(op).at(SourceLocation::new("fac.valk", line, column))
}

/// The body of `fac`, with its recursive call going through `site`.
fn fac_unit(site: Arc<CallSite>) -> Arc<dyn CallableUnit> {
    NativeUnit::new(move |dispatcher, args| {
        let n = args.first().cloned().unwrap_or(Value::Null);
        let one = Value::int(1);
        if ops::le(&at(BinaryOp::Le, 1, 16), &n, &one)?.as_bool() == Some(true) {
            return Ok(one);
        }
        let fac = dispatcher
            .registry()
            .lookup("fac", true)
            .expect("lookup with create always yields a function");
        let smaller = ops::sub(&at(BinaryOp::Sub, 1, 58), &n, &one)?;
        let rest = site.call(dispatcher, &fac, &[smaller])?;
        ops::mul(&at(BinaryOp::Mul, 1, 46), &n, &rest)
    })
    .at(SourceLocation::new("fac.valk", 1, 1))
    .into_unit()
}

fn setup(registry: &FunctionRegistry) -> Arc<CallSite> {
    let recursive_site = Arc::new(CallSite::new());
    registry.register("fac", fac_unit(Arc::clone(&recursive_site)));
    recursive_site
}

#[test]
fn test_factorial_and_redefinition() {
    let registry = FunctionRegistry::new();
    let recursive_site = setup(&registry);
    let dispatcher = registry.dispatcher();
    let fac = registry.get("fac").unwrap();
    let main_site = CallSite::new();

    let call = |n: i64| {
        main_site
            .call(&dispatcher, &fac, &[Value::int(n)])
            .unwrap()
            .to_string()
    };

    assert_eq!(call(5), "120");
    assert_eq!(call(1), "1");
    assert_eq!(call(3), "6");
    assert_eq!(main_site.slow_calls(), 1);
    assert_eq!(main_site.fast_hits(), 2);

    // fac(5) recursed four times and fac(3) twice; only the first went slow.
    assert_eq!(recursive_site.slow_calls(), 1);
    assert_eq!(recursive_site.fast_hits(), 5);

    registry.register(
        "fac",
        NativeUnit::new(|_, args| Ok(Value::string(format!("redefined({})", args[0])))).into_unit(),
    );
    assert_eq!(fac.generation(), 1);
    assert_eq!(call(3), "redefined(3)");
    assert_eq!(main_site.slow_calls(), 2);
    assert_eq!(call(4), "redefined(4)");
    assert_eq!(main_site.fast_hits(), 3);
}

#[test]
fn test_factorial_of_large_input_is_exact() {
    let registry = FunctionRegistry::new();
    setup(&registry);
    let dispatcher = registry.dispatcher();

    let result = dispatcher.call_by_name("fac", &[Value::int(1500)]).unwrap();
    let expected: BigInt = (1..=1500_u32).map(BigInt::from).product();
    assert_eq!(result.to_string(), expected.to_string());
    assert_eq!(dispatcher.depth(), 0);
}

#[test]
fn test_factorial_type_error_carries_location() {
    let registry = FunctionRegistry::new();
    setup(&registry);
    let dispatcher = registry.dispatcher();

    let err = dispatcher
        .call_by_name("fac", &[Value::string("x")])
        .unwrap_err();
    assert!(matches!(err.kind, RuntimeErrorKind::TypeError { .. }));
    assert_eq!(
        err.message,
        "Type error at fac.valk:1:16: operation \"<=\" not defined for String \"x\", Number 1"
    );
    assert_eq!(err.location, Some(SourceLocation::new("fac.valk", 1, 16)));
}

#[test]
fn test_factorial_depth_limit() {
    let registry = FunctionRegistry::with_config(RuntimeConfig::new().with_max_call_depth(Some(50)));
    setup(&registry);
    let dispatcher = registry.dispatcher();

    assert_eq!(
        dispatcher.call_by_name("fac", &[Value::int(50)]).unwrap().to_string(),
        (1..=50_u32).map(BigInt::from).product::<BigInt>().to_string()
    );
    let err = dispatcher
        .call_by_name("fac", &[Value::int(51)])
        .unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::StackOverflow { depth: 50 });
}

#[test]
fn test_calling_before_definition() {
    let registry = FunctionRegistry::new();
    let dispatcher = registry.dispatcher();
    let pending = registry.lookup("fac", true).unwrap();
    let site = CallSite::new();

    let err = site.call(&dispatcher, &pending, &[Value::int(3)]).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UnresolvedCall {
            name: "fac".to_string()
        }
    );

    setup(&registry);
    assert_eq!(
        site.call(&dispatcher, &pending, &[Value::int(4)]).unwrap().to_string(),
        "24"
    );
}
