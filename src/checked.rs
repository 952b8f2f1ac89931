//! Checked `i64` primitives with uniform overflow diagnostics.
//
// These sit below the arithmetic instances: operand context in the errors is
// raw (scale 0) and gets re-wrapped by the calling operation per the
// composed-operation rule in `arith::Arithmetic::wrap_err`.

use crate::error::{DecimalError, Result};

#[inline]
pub(crate) fn add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or(DecimalError::overflow("+", a, Some(b), 0))
}

#[inline]
pub(crate) fn sub(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b)
        .ok_or(DecimalError::overflow("-", a, Some(b), 0))
}

#[inline]
pub(crate) fn mul(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b)
        .ok_or(DecimalError::overflow("*", a, Some(b), 0))
}

/// Fails on `MIN / -1`; a zero divisor is a `DivisionByZero`, not overflow.
#[inline]
pub(crate) fn div(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(DecimalError::division_by_zero("/", a, 0));
    }
    if a == i64::MIN && b == -1 {
        return Err(DecimalError::overflow("/", a, Some(b), 0));
    }
    Ok(a.wrapping_div(b))
}

#[inline]
pub(crate) fn neg(a: i64) -> Result<i64> {
    a.checked_neg().ok_or(DecimalError::overflow("-", a, None, 0))
}

#[inline]
pub(crate) fn abs(a: i64) -> Result<i64> {
    a.checked_abs().ok_or(DecimalError::overflow("abs", a, None, 0))
}
