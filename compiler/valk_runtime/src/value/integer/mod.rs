//! Arbitrary-precision integers.
//!
//! Valkyrie integers never overflow. Narrowing to a fixed-width host type is
//! an explicit, checked conversion: `fits_in_*` answers whether the exact
//! value is representable, and `as_*` performs the conversion or fails with
//! `UnsupportedConversion`. Floating-point targets accept a value only when
//! it converts back to the same integer.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::errors::{unsupported_conversion, RuntimeResult};

/// Mantissa width of `f32`, including the implicit bit.
const F32_EXACT_BITS: u64 = 24;
/// Mantissa width of `f64`, including the implicit bit.
const F64_EXACT_BITS: u64 = 53;

/// An arbitrary-precision integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    pub fn new(value: BigInt) -> Self {
        Integer(value)
    }

    /// Parse a decimal literal, with optional leading `-`.
    pub fn parse(literal: &str) -> Option<Self> {
        literal.parse::<BigInt>().ok().map(Integer)
    }

    #[inline]
    pub fn as_big_int(&self) -> &BigInt {
        &self.0
    }

    pub fn into_big_int(self) -> BigInt {
        self.0
    }

    #[must_use]
    pub fn add(&self, other: &Integer) -> Integer {
        Integer(&self.0 + &other.0)
    }

    #[must_use]
    pub fn sub(&self, other: &Integer) -> Integer {
        Integer(&self.0 - &other.0)
    }

    #[must_use]
    pub fn mul(&self, other: &Integer) -> Integer {
        Integer(&self.0 * &other.0)
    }

    pub fn fits_in_byte(&self) -> bool {
        self.0.to_i8().is_some()
    }

    pub fn fits_in_short(&self) -> bool {
        self.0.to_i16().is_some()
    }

    pub fn fits_in_int(&self) -> bool {
        self.0.to_i32().is_some()
    }

    pub fn fits_in_long(&self) -> bool {
        self.0.to_i64().is_some()
    }

    pub fn fits_in_float(&self) -> bool {
        self.exact_f32().is_some()
    }

    pub fn fits_in_double(&self) -> bool {
        self.exact_f64().is_some()
    }

    pub fn as_byte(&self) -> RuntimeResult<i8> {
        self.0.to_i8().ok_or_else(|| unsupported_conversion("byte"))
    }

    pub fn as_short(&self) -> RuntimeResult<i16> {
        self.0.to_i16().ok_or_else(|| unsupported_conversion("short"))
    }

    pub fn as_int(&self) -> RuntimeResult<i32> {
        self.0.to_i32().ok_or_else(|| unsupported_conversion("int"))
    }

    pub fn as_long(&self) -> RuntimeResult<i64> {
        self.0.to_i64().ok_or_else(|| unsupported_conversion("long"))
    }

    pub fn as_float(&self) -> RuntimeResult<f32> {
        self.exact_f32().ok_or_else(|| unsupported_conversion("float"))
    }

    pub fn as_double(&self) -> RuntimeResult<f64> {
        self.exact_f64().ok_or_else(|| unsupported_conversion("double"))
    }

    fn exact_f32(&self) -> Option<f32> {
        let f = self.0.to_f32()?;
        if self.0.bits() <= F32_EXACT_BITS {
            return Some(f);
        }
        let round_trips = f.is_finite() && BigInt::from_f32(f).as_ref() == Some(&self.0);
        round_trips.then_some(f)
    }

    fn exact_f64(&self) -> Option<f64> {
        let f = self.0.to_f64()?;
        if self.0.bits() <= F64_EXACT_BITS {
            return Some(f);
        }
        let round_trips = f.is_finite() && BigInt::from_f64(f).as_ref() == Some(&self.0);
        round_trips.then_some(f)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer(BigInt::from(value))
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer(value)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests;
