//! Multiplication: same scale, by a plain long, at a foreign scale, exact.
//
// The scaled product `round(a * b / 10^g)` takes a fast path when both
// operands are at most `⌊√i64::MAX⌋` so the product stays in `i64`;
// otherwise the product widens to `i128` and is reduced by the scale factor
// with a single rounding.

use crate::arith::{Arithmetic, OverflowMode};
use crate::checked;
use crate::error::{DecimalError, Result};
use crate::pow10::{div_pow10_parts, mul_pow10};
use crate::rounding::{rounding_increment, RoundingMode, TruncatedPart};
use crate::scale::pow10_u128;
use crate::wide::mul_to_128;

/// Largest magnitude whose square fits in `i64`.
pub(crate) const SQRT_MAX: i64 = 3_037_000_499;

impl Arithmetic {
    /// `round(a * b / 10^scale)`: the product of two values at this scale.
    #[inline]
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64> {
        self.mul_reduced(a, b, self.scale() as u32)
            .map_err(|e| self.wrap_err(e, "*", a, Some(b)))
    }

    /// `a * l` for a plain integer multiplier.
    #[inline]
    pub fn multiply_by_long(&self, a: i64, l: i64) -> Result<i64> {
        match self.overflow() {
            OverflowMode::Unchecked => Ok(a.wrapping_mul(l)),
            OverflowMode::Checked => {
                checked::mul(a, l).map_err(|e| self.wrap_err(e, "*", a, None))
            }
        }
    }

    /// `round(a * v / 10^other_scale)`: multiplies by an unscaled value at a
    /// foreign scale; a negative scale multiplies the product up instead.
    pub fn multiply_unscaled(&self, a: i64, v: i64, other_scale: i32) -> Result<i64> {
        let r = if other_scale >= 0 {
            self.mul_reduced(a, v, other_scale as u32)
        } else {
            self.mul_raised(a, v, other_scale.unsigned_abs())
        };
        r.map_err(|e| self.wrap_err(e, "*", a, None))
    }

    /// `a²` at this scale; identical reduction without the sign analysis.
    #[inline]
    pub fn square(&self, a: i64) -> Result<i64> {
        self.mul_reduced(a, a, self.scale() as u32)
            .map_err(|e| self.wrap_err(e, "square", a, None))
    }

    /// `a + b²`, rounding the square at this scale first.
    pub fn add_squared(&self, a: i64, b: i64) -> Result<i64> {
        let sq = self.square(b).map_err(|e| self.wrap_err(e, "+", a, Some(b)))?;
        self.add(a, sq).map_err(|e| self.wrap_err(e, "+", a, Some(b)))
    }

    /// `round(a * b / 10^g)` for `g >= 0`.
    fn mul_reduced(&self, a: i64, b: i64, g: u32) -> Result<i64> {
        if a.unsigned_abs() <= SQRT_MAX as u64 && b.unsigned_abs() <= SQRT_MAX as u64 {
            let p = a * b;
            if g == 0 {
                return Ok(p);
            }
            let (q, tp, rsign) = div_pow10_parts(p, g.min(20));
            let inc = rounding_increment(self.rounding(), rsign, q, tp)?;
            return Ok(q + inc);
        }
        let p = mul_to_128(a, b);
        let q = if g == 0 {
            p
        } else if g <= 38 {
            let d = pow10_u128(g) as i128;
            let q = p / d;
            let r = p - q * d;
            let tp = TruncatedPart::for_remainder_wide(r.unsigned_abs(), d as u128);
            let inc = rounding_increment(self.rounding(), p.signum() as i32, (q & 1) as i64, tp)?;
            q + inc as i128
        } else {
            // |p| < 2^126 < 10^39 / 2: the quotient is zero and the
            // remainder is always below half.
            let tp = TruncatedPart::for_pow10_wide(p.unsigned_abs(), g);
            rounding_increment(self.rounding(), p.signum() as i32, 0, tp)? as i128
        };
        self.fit(q, "*", a, Some(b))
    }

    /// `a * v * 10^d` for `d >= 1` (foreign scale below zero).
    fn mul_raised(&self, a: i64, v: i64, d: u32) -> Result<i64> {
        match self.overflow() {
            OverflowMode::Unchecked => {
                // wrapping is multiplicative mod 2^64, so reduce first
                let low = mul_to_128(a, v) as i64;
                mul_pow10(low, d as i64, RoundingMode::Down, OverflowMode::Unchecked)
            }
            OverflowMode::Checked => {
                if a == 0 || v == 0 {
                    return Ok(0);
                }
                if d > 38 {
                    return Err(DecimalError::overflow("*", a, Some(v), self.scale()));
                }
                let p = mul_to_128(a, v)
                    .checked_mul(pow10_u128(d) as i128)
                    .ok_or(DecimalError::overflow("*", a, Some(v), self.scale()))?;
                self.fit(p, "*", a, Some(v))
            }
        }
    }

    /// Narrows an `i128` result per the overflow mode.
    #[inline]
    pub(crate) fn fit(&self, v: i128, op: &'static str, a: i64, b: Option<i64>) -> Result<i64> {
        match self.overflow() {
            OverflowMode::Unchecked => Ok(v as i64),
            OverflowMode::Checked => {
                i64::try_from(v).map_err(|_| DecimalError::overflow(op, a, b, self.scale()))
            }
        }
    }
}

/// The exact product of `u1 @ f1` and `u2 @ f2` at scale `f1 + f2`.
///
/// Fails with `InvalidArgument` if the combined scale exceeds 18 and with
/// `Overflow` if the product does not fit.
pub fn multiply_exact(u1: i64, f1: u8, u2: i64, f2: u8) -> Result<i64> {
    if f1 as u32 + f2 as u32 > 18 {
        return Err(DecimalError::InvalidArgument(
            "combined scale of an exact product must be at most 18",
        ));
    }
    let p = crate::wide::mul_to_128(u1, u2);
    i64::try_from(p).map_err(|_| DecimalError::overflow("*", u1, Some(u2), f1 + f2))
}
