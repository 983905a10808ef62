use super::*;
use crate::errors::RuntimeErrorKind;
use pretty_assertions::assert_eq;

fn int(n: i64) -> Integer {
    Integer::from(n)
}

fn big(literal: &str) -> Integer {
    Integer::parse(literal).unwrap_or_default()
}

#[test]
fn test_display_is_exact_decimal() {
    assert_eq!(big("99999999999999999999").to_string(), "99999999999999999999");
    assert_eq!(int(-42).to_string(), "-42");
}

#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(Integer::parse("12a"), None);
    assert_eq!(Integer::parse("-7"), Some(int(-7)));
}

#[test]
fn test_fits_in_byte_boundaries() {
    assert!(int(127).fits_in_byte());
    assert!(int(-128).fits_in_byte());
    assert!(!int(128).fits_in_byte());
    assert!(!int(-129).fits_in_byte());
}

#[test]
fn test_fits_in_short_and_int_boundaries() {
    assert!(int(i64::from(i16::MAX)).fits_in_short());
    assert!(!int(i64::from(i16::MAX) + 1).fits_in_short());
    assert!(int(i64::from(i32::MIN)).fits_in_int());
    assert!(!int(i64::from(i32::MIN) - 1).fits_in_int());
}

#[test]
fn test_large_value_fits_nothing_narrow() {
    let n = big("99999999999999999999");
    assert!(!n.fits_in_long());
    assert!(!n.fits_in_int());
    assert_eq!(
        n.as_long().map_err(|e| e.kind),
        Err(RuntimeErrorKind::UnsupportedConversion { target: "long" })
    );
}

#[test]
fn test_float_round_trip() {
    // 2^24 + 1 is the first integer f32 cannot represent.
    assert!(int(16_777_216).fits_in_float());
    assert!(!int(16_777_217).fits_in_float());
    assert_eq!(int(3).as_float().ok(), Some(3.0));
}

#[test]
fn test_double_round_trip() {
    // 2^53 + 1 is the first integer f64 cannot represent.
    assert!(int(9_007_199_254_740_992).fits_in_double());
    assert!(!int(9_007_199_254_740_993).fits_in_double());
    // Large powers of two are exact.
    assert!(big("1267650600228229401496703205376").fits_in_double());
}

#[test]
fn test_arithmetic_does_not_overflow() {
    let max = int(i64::MAX);
    let sum = max.add(&int(1));
    assert_eq!(sum.to_string(), "9223372036854775808");
    assert_eq!(sum.sub(&int(1)), max);
    assert_eq!(int(6).mul(&int(-7)), int(-42));
}
