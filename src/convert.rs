//! Conversions between unscaled values and longs, other scales and binary
//! floating point, plus numerical comparison across scales.
//
// Float conversions decompose the IEEE bits into sign, mantissa and binary
// exponent, reconstruct `m * 2^e * 10^f` exactly in 128 bits and round once;
// the opposite direction produces the correctly rounded float from the exact
// rational, so a `HalfEven` round trip through a wide enough scale is
// bitwise lossless.

use core::cmp::Ordering;

use crate::arith::Arithmetic;
use crate::error::{DecimalError, Result};
use crate::pow10::{div_pow10, mul_pow10};
use crate::rounding::{rounds_away, TruncatedPart};
use crate::scale::{pow10_u128, scale_factor};

impl Arithmetic {
    /// The unscaled representation of the integer `v`.
    #[inline]
    pub fn from_long(&self, v: i64) -> Result<i64> {
        mul_pow10(v, self.scale() as i64, self.rounding(), self.overflow())
            .map_err(|e| self.wrap_err(e, "from_long", v, None))
    }

    /// The integer value of `u`, rounding the fraction away.
    #[inline]
    pub fn to_long(&self, u: i64) -> Result<i64> {
        div_pow10(u, self.scale() as i64, self.rounding(), self.overflow())
    }

    /// Re-scales an unscaled value from `other_scale` to this scale.
    #[inline]
    pub fn from_unscaled(&self, v: i64, other_scale: i32) -> Result<i64> {
        let shift = self.scale() as i64 - other_scale as i64;
        mul_pow10(v, shift, self.rounding(), self.overflow())
            .map_err(|e| self.wrap_err(e, "from_unscaled", v, None))
    }

    /// The value of `u` as an unscaled value at `other_scale`.
    #[inline]
    pub fn to_unscaled(&self, u: i64, other_scale: i32) -> Result<i64> {
        let shift = other_scale as i64 - self.scale() as i64;
        mul_pow10(u, shift, self.rounding(), self.overflow())
            .map_err(|e| self.wrap_err(e, "to_unscaled", u, None))
    }

    /// The unscaled representation of a finite `f64`.
    ///
    /// Fails with `InvalidArgument` for non-finite input or a magnitude that
    /// does not fit at this scale, in either overflow mode.
    pub fn from_f64(&self, x: f64) -> Result<i64> {
        if !x.is_finite() {
            return Err(DecimalError::InvalidArgument("value must be finite"));
        }
        let bits = x.to_bits();
        let neg = bits >> 63 != 0;
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let frac = bits & ((1u64 << 52) - 1);
        let (mantissa, exp2) = if biased == 0 {
            (frac, -1074)
        } else {
            (frac | (1 << 52), biased - 1075)
        };
        self.from_binary(mantissa, exp2, if neg { -1 } else { 1 })
    }

    /// The unscaled representation of a finite `f32`.
    pub fn from_f32(&self, x: f32) -> Result<i64> {
        if !x.is_finite() {
            return Err(DecimalError::InvalidArgument("value must be finite"));
        }
        let bits = x.to_bits();
        let neg = bits >> 31 != 0;
        let biased = ((bits >> 23) & 0xff) as i32;
        let frac = (bits & ((1u32 << 23) - 1)) as u64;
        let (mantissa, exp2) = if biased == 0 {
            (frac, -149)
        } else {
            (frac | (1 << 23), biased - 150)
        };
        self.from_binary(mantissa, exp2, if neg { -1 } else { 1 })
    }

    /// Rounds the exact rational `±m * 2^e` to this scale.
    fn from_binary(&self, m: u64, e: i32, sign: i32) -> Result<i64> {
        if m == 0 {
            return Ok(0);
        }
        let p10 = pow10_u128(self.scale() as u32);
        let mag = if e >= 0 {
            if e > 74 {
                return Err(DecimalError::InvalidArgument(
                    "value magnitude does not fit at this scale",
                ));
            }
            ((m as u128) << e)
                .checked_mul(p10)
                .ok_or(DecimalError::InvalidArgument(
                    "value magnitude does not fit at this scale",
                ))?
        } else {
            let k = e.unsigned_abs();
            let p = m as u128 * p10;
            let (q, tp) = if k < 128 {
                let q = p >> k;
                let r = p & ((1u128 << k) - 1);
                (q, TruncatedPart::for_pow2(r, k))
            } else {
                (0, TruncatedPart::for_pow2(p, k.min(200)))
            };
            q + rounds_away(self.rounding(), sign, q & 1 == 1, tp)? as u128
        };
        let limit = if sign < 0 { 1u128 << 63 } else { (1u128 << 63) - 1 };
        if mag > limit {
            return Err(DecimalError::InvalidArgument(
                "value magnitude does not fit at this scale",
            ));
        }
        Ok(if sign < 0 {
            (mag as i64).wrapping_neg()
        } else {
            mag as i64
        })
    }

    /// The nearest `f64` to `u * 10^-scale`, half-even on ties.
    pub fn to_f64(&self, u: i64) -> f64 {
        if u == 0 {
            return 0.0;
        }
        if self.scale() == 0 {
            return u as f64;
        }
        let (q, e) = nearest_binary(u.unsigned_abs() as u128, self.pow10_wide(), 53);
        let val = (q as f64) * pow2_f64(-e);
        if u < 0 {
            -val
        } else {
            val
        }
    }

    /// The nearest `f32` to `u * 10^-scale`, half-even on ties.
    pub fn to_f32(&self, u: i64) -> f32 {
        if u == 0 {
            return 0.0;
        }
        let (q, e) = nearest_binary(u.unsigned_abs() as u128, self.pow10_wide(), 24);
        let val = (q as f32) * pow2_f32(-e);
        if u < 0 {
            -val
        } else {
            val
        }
    }

    #[inline]
    fn pow10_wide(&self) -> u128 {
        scale_factor(self.scale()) as u128
    }
}

/// Rounds `n / d` half-even to a `prec`-bit mantissa: returns `(q, e)` with
/// `q ∈ [2^(prec-1), 2^prec]` and `n / d ≈ q * 2^-e`.
fn nearest_binary(n: u128, d: u128, prec: u32) -> (u64, i32) {
    let nb = 128 - n.leading_zeros();
    let db = 128 - d.leading_zeros();
    let mut e = prec as i32 - 1 - (nb as i32 - db as i32);
    loop {
        let (num, den) = if e >= 0 {
            (n << e, d)
        } else {
            (n, d << (-e) as u32)
        };
        let q = num / den;
        if q >> prec != 0 {
            e -= 1;
            continue;
        }
        if q >> (prec - 1) == 0 {
            e += 1;
            continue;
        }
        let r = num - q * den;
        let q = match (2 * r).cmp(&den) {
            Ordering::Greater => q + 1,
            Ordering::Equal => q + (q & 1),
            Ordering::Less => q,
        };
        return (q as u64, e);
    }
}

/// `2^p` as `f64`, built from the bits; `p` must be a normal exponent.
#[inline]
fn pow2_f64(p: i32) -> f64 {
    f64::from_bits(((1023 + p) as u64) << 52)
}

/// `2^p` as `f32`, built from the bits; `p` must be a normal exponent.
#[inline]
fn pow2_f32(p: i32) -> f32 {
    f32::from_bits(((127 + p) as u32) << 23)
}

/// Compares `u1 * 10^-f1` with `u2 * 10^-f2` as rational values.
pub fn compare_numerically(u1: i64, f1: u8, u2: i64, f2: u8) -> Ordering {
    match f1.cmp(&f2) {
        Ordering::Equal => u1.cmp(&u2),
        Ordering::Less => {
            let lhs = u1 as i128 * pow10_u128((f2 - f1) as u32) as i128;
            lhs.cmp(&(u2 as i128))
        }
        Ordering::Greater => {
            let rhs = u2 as i128 * pow10_u128((f1 - f2) as u32) as i128;
            (u1 as i128).cmp(&rhs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::OverflowMode::{Checked, Unchecked};
    use crate::rounding::RoundingMode::*;

    #[test]
    fn long_round_trip() {
        let a = Arithmetic::get(2, HalfUp, Checked);
        assert_eq!(a.from_long(12).unwrap(), 1_200);
        assert_eq!(a.to_long(1_250).unwrap(), 13);
        assert_eq!(Arithmetic::get(2, Down, Checked).to_long(1_250).unwrap(), 12);
        assert!(a.from_long(i64::MAX).is_err());
        assert_eq!(
            Arithmetic::get(2, Down, Unchecked).from_long(i64::MAX).unwrap(),
            i64::MAX.wrapping_mul(100)
        );
    }

    #[test]
    fn scale_changes() {
        let a = Arithmetic::get(2, HalfUp, Checked);
        assert_eq!(a.from_unscaled(12_345, 3).unwrap(), 1_235);
        assert_eq!(a.from_unscaled(12_345, 2).unwrap(), 12_345);
        assert_eq!(a.from_unscaled(5, 0).unwrap(), 500);
        assert_eq!(a.to_unscaled(1_234, 3).unwrap(), 12_340);
        assert_eq!(a.to_unscaled(1_234, 0).unwrap(), 12);
    }

    #[test]
    fn doubles_in() {
        let a = Arithmetic::get(2, HalfEven, Checked);
        assert_eq!(a.from_f64(1.25).unwrap(), 125);
        assert_eq!(a.from_f64(-1.25).unwrap(), -125);
        assert_eq!(a.from_f64(0.0).unwrap(), 0);
        assert_eq!(a.from_f64(-0.0).unwrap(), 0);
        // 0.005 is not exactly representable; it reads as slightly more
        assert_eq!(a.from_f64(0.005).unwrap(), 1);
        assert_eq!(a.from_f64(100.0).unwrap(), 10_000);
        assert!(a.from_f64(f64::NAN).is_err());
        assert!(a.from_f64(f64::INFINITY).is_err());
        assert!(a.from_f64(1e30).is_err());
        assert_eq!(a.from_f32(2.5f32).unwrap(), 250);
        assert!(a.from_f32(f32::NEG_INFINITY).is_err());
    }

    #[test]
    fn doubles_out_are_correctly_rounded() {
        let a = Arithmetic::get(2, HalfEven, Checked);
        assert_eq!(a.to_f64(125), 1.25);
        assert_eq!(a.to_f64(-125), -1.25);
        assert_eq!(a.to_f64(0), 0.0);
        assert_eq!(a.to_f64(10), 0.1);
        assert_eq!(a.to_f64(33), 0.33);
        let a18 = Arithmetic::get(18, HalfEven, Checked);
        assert_eq!(a18.to_f64(333_333_333_333_333_333), 0.333333333333333333);
        assert_eq!(a.to_f32(150), 1.5f32);
        assert_eq!(a.to_f32(33), 0.33f32);
    }

    #[test]
    fn double_round_trip() {
        let a18 = Arithmetic::get(18, HalfEven, Checked);
        for x in [0.1, 0.333333333333333333, 1.0 / 3.0, 0.000001234, 2.5] {
            let u = a18.from_f64(x).unwrap();
            assert_eq!(a18.to_f64(u).to_bits(), x.to_bits(), "x={}", x);
        }
    }

    #[test]
    fn numerical_comparison() {
        use core::cmp::Ordering::*;
        assert_eq!(compare_numerically(100, 2, 1, 0), Equal);
        assert_eq!(compare_numerically(100, 2, 1_000, 3), Equal);
        assert_eq!(compare_numerically(101, 2, 1, 0), Greater);
        assert_eq!(compare_numerically(-101, 2, -1, 0), Less);
        assert_eq!(compare_numerically(i64::MAX, 0, i64::MAX, 18), Greater);
        assert_eq!(compare_numerically(0, 5, 0, 11), Equal);
    }
}
