//! Division: same scale, by a plain long, at a foreign scale, integral
//! quotient and remainder, inversion.
//
// `round(a * 10^f / b)` runs one of three paths: directly in `i64` when the
// scaled dividend fits, split around the integer quotient when the divisor
// is a valid integer value, otherwise as a 128-by-64 division of the widened
// dividend. Power-of-ten divisors collapse to a scale shift.

use crate::arith::{Arithmetic, OverflowMode};
use crate::checked;
use crate::error::{DecimalError, Result};
use crate::pow10::mul_pow10;
use crate::rounding::{rounding_increment, rounds_away, TruncatedPart};
use crate::scale::{
    is_valid_integer_value, mul_by_scale_exact, mul_by_scale_unchecked, pow10_u128, scale_factor,
    SCALE_FACTORS,
};

/// The scale `k` with `m == 10^k`, if any.
fn pow10_exponent(m: u64) -> Option<u8> {
    SCALE_FACTORS
        .iter()
        .position(|&p| p as u64 == m)
        .map(|k| k as u8)
}

impl Arithmetic {
    /// `round(a * 10^scale / b)`: the quotient of two values at this scale.
    pub fn divide(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::division_by_zero("/", a, self.scale()));
        }
        if a == 0 {
            return Ok(0);
        }
        let one = self.one();
        if a == b {
            return Ok(one);
        }
        if a == b.wrapping_neg() && b != i64::MIN {
            return Ok(-one);
        }
        if let Some(k) = pow10_exponent(b.unsigned_abs()) {
            // dividing by ±10^(k-scale) is a pure scale shift
            let mode = if b < 0 {
                self.rounding().sign_reversion()
            } else {
                self.rounding()
            };
            let shift = self.scale() as i64 - k as i64;
            let q = mul_pow10(a, shift, mode, self.overflow())
                .map_err(|e| self.wrap_err(e, "/", a, Some(b)))?;
            return if b < 0 {
                self.negate(q).map_err(|e| self.wrap_err(e, "/", a, Some(b)))
            } else {
                Ok(q)
            };
        }
        if is_valid_integer_value(self.scale(), a) {
            // |b| >= 2 here, so the incremented quotient cannot overflow
            let p = a * scale_factor(self.scale());
            let q = p / b;
            let r = p - q * b;
            let tp = TruncatedPart::for_remainder(r.unsigned_abs(), b.unsigned_abs());
            let sign = if (a < 0) != (b < 0) { -1 } else { 1 };
            let inc = rounding_increment(self.rounding(), sign, q, tp)?;
            return Ok(q + inc);
        }
        if is_valid_integer_value(self.scale(), b) {
            return self.divide_split(a, b);
        }
        self.divide_wide(a, b, self.scale() as u32)
            .map_err(|e| self.wrap_err(e, "/", a, Some(b)))
    }

    /// Split path: `a = q0*b + r0`, then `r0 * 10^f` still fits.
    fn divide_split(&self, a: i64, b: i64) -> Result<i64> {
        let q0 = a / b;
        let r0 = a - q0 * b;
        let p1 = r0 * scale_factor(self.scale());
        let q1 = p1 / b;
        let r1 = p1 - q1 * b;
        let sign = if (a < 0) != (b < 0) { -1 } else { 1 };
        let total = match self.overflow() {
            OverflowMode::Unchecked => mul_by_scale_unchecked(self.scale(), q0).wrapping_add(q1),
            OverflowMode::Checked => {
                let scaled = mul_by_scale_exact(self.scale(), q0)
                    .map_err(|e| self.wrap_err(e, "/", a, Some(b)))?;
                checked::add(scaled, q1).map_err(|e| self.wrap_err(e, "/", a, Some(b)))?
            }
        };
        let tp = TruncatedPart::for_remainder(r1.unsigned_abs(), b.unsigned_abs());
        let inc = rounding_increment(self.rounding(), sign, total, tp)?;
        match self.overflow() {
            OverflowMode::Unchecked => Ok(total.wrapping_add(inc)),
            OverflowMode::Checked => {
                checked::add(total, inc).map_err(|e| self.wrap_err(e, "/", a, Some(b)))
            }
        }
    }

    /// `round(a / l)` for a plain integer divisor.
    pub fn divide_by_long(&self, a: i64, l: i64) -> Result<i64> {
        if l == 0 {
            return Err(DecimalError::division_by_zero("/", a, self.scale()));
        }
        if l == 1 {
            return Ok(a);
        }
        if a == i64::MIN && l == -1 {
            // pre-tested: unchecked wraps back to MIN, checked traps
            return match self.overflow() {
                OverflowMode::Unchecked => Ok(i64::MIN),
                OverflowMode::Checked => {
                    checked::div(a, l).map_err(|e| self.wrap_err(e, "/", a, None))
                }
            };
        }
        if l == -1 {
            return Ok(-a);
        }
        let q = a / l;
        let r = a - q * l;
        let tp = TruncatedPart::for_remainder(r.unsigned_abs(), l.unsigned_abs());
        let sign = if (a < 0) != (l < 0) { -1 } else { 1 };
        let inc = rounding_increment(self.rounding(), sign, q, tp)?;
        Ok(q + inc)
    }

    /// `round(a * 10^other_scale / v)`: divides by an unscaled value at a
    /// foreign scale.
    pub fn divide_unscaled(&self, a: i64, v: i64, other_scale: i32) -> Result<i64> {
        if v == 0 {
            return Err(DecimalError::division_by_zero("/", a, self.scale()));
        }
        if a == 0 {
            return Ok(0);
        }
        if other_scale == 0 {
            return self.divide_by_long(a, v);
        }
        if other_scale > 38 {
            return Err(DecimalError::InvalidArgument(
                "foreign scale of a division must be at most 38",
            ));
        }
        if other_scale > 0 {
            return self
                .divide_wide(a, v, other_scale as u32)
                .map_err(|e| self.wrap_err(e, "/", a, None));
        }
        // negative foreign scale: divide by v * 10^m in one rounding
        let m = other_scale.unsigned_abs();
        let sign = if (a < 0) != (v < 0) { -1 } else { 1 };
        let d = if m <= 19 {
            (v as i128).checked_mul(pow10_u128(m) as i128)
        } else {
            None
        };
        match d {
            Some(d) => {
                let q = a as i128 / d;
                let r = a as i128 - q * d;
                let tp = TruncatedPart::for_remainder_wide(r.unsigned_abs(), d.unsigned_abs());
                let inc = rounding_increment(self.rounding(), sign, (q & 1) as i64, tp)?;
                Ok((q + inc as i128) as i64)
            }
            None => {
                // |v * 10^m| >= 10^20 > 2|a|: quotient 0, below half
                let inc = rounding_increment(
                    self.rounding(),
                    sign,
                    0,
                    TruncatedPart::LessThanHalfButNotZero,
                )?;
                Ok(inc)
            }
        }
    }

    /// `round(|a| * 10^g / |v|)` through `u128`, signed at the end.
    ///
    /// Runs in at most two 19-digit steps for `g <= 38`; in unchecked mode a
    /// wrapped accumulator keeps the low 64 bits exact because every step is
    /// a ring operation plus an exactly computed sub-quotient.
    fn divide_wide(&self, a: i64, v: i64, g: u32) -> Result<i64> {
        let negative = (a < 0) != (v < 0);
        let va = v.unsigned_abs() as u128;
        let mut q = a.unsigned_abs() as u128 / va;
        let mut rem = a.unsigned_abs() as u128 % va;
        let mut left = g;
        let mut overflowed = false;
        while left > 0 {
            let k = left.min(19);
            let p10 = pow10_u128(k);
            let (shifted, o1) = q.overflowing_mul(p10);
            let t = rem * p10;
            let (next, o2) = shifted.overflowing_add(t / va);
            rem = t % va;
            overflowed |= o1 | o2;
            q = next;
            left -= k;
        }
        let tp = TruncatedPart::for_remainder_wide(rem, va);
        let sign = if negative { -1 } else { 1 };
        let away = rounds_away(self.rounding(), sign, q & 1 == 1, tp)?;
        let q = q.wrapping_add(away as u128);
        if self.is_checked() {
            let limit = if negative { 1u128 << 63 } else { (1u128 << 63) - 1 };
            if overflowed || q > limit {
                return Err(DecimalError::overflow("/", a, Some(v), self.scale()));
            }
        }
        Ok(if negative {
            (q as i64).wrapping_neg()
        } else {
            q as i64
        })
    }

    /// The integral part of `a / b` as a value at this scale.
    pub fn divide_to_integral_value(&self, a: i64, b: i64) -> Result<i64> {
        let q = self.integral_quotient(a, b)?;
        match self.overflow() {
            OverflowMode::Unchecked => Ok(mul_by_scale_unchecked(self.scale(), q)),
            OverflowMode::Checked => mul_by_scale_exact(self.scale(), q)
                .map_err(|e| self.wrap_err(e, "/", a, Some(b))),
        }
    }

    /// `a - trunc(a / b) * b`, the remainder at this scale.
    pub fn remainder(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::division_by_zero("%", a, self.scale()));
        }
        Ok(a.wrapping_rem(b))
    }

    /// Integral quotient and remainder from a single division.
    pub fn divide_and_remainder(&self, a: i64, b: i64) -> Result<(i64, i64)> {
        let q = self.integral_quotient(a, b)?;
        let rem = a.wrapping_sub(q.wrapping_mul(b));
        let int = match self.overflow() {
            OverflowMode::Unchecked => mul_by_scale_unchecked(self.scale(), q),
            OverflowMode::Checked => mul_by_scale_exact(self.scale(), q)
                .map_err(|e| self.wrap_err(e, "/", a, Some(b)))?,
        };
        Ok((int, rem))
    }

    fn integral_quotient(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::division_by_zero("/", a, self.scale()));
        }
        if a == i64::MIN && b == -1 {
            return match self.overflow() {
                OverflowMode::Unchecked => Ok(i64::MIN),
                OverflowMode::Checked => {
                    Err(DecimalError::overflow("/", a, Some(b), self.scale()))
                }
            };
        }
        Ok(a.wrapping_div(b))
    }

    /// `round(1 / v)` at this scale.
    #[inline]
    pub fn invert(&self, v: i64) -> Result<i64> {
        self.divide(self.one(), v)
    }
}
