//! Power-of-ten scaling of unscaled values, with and without rounding.
//
// Shared by addition, subtraction, multiplication, division, scale changes
// and the long/string conversions. Exponents are `i64`; any magnitude is
// meaningful because a positive shift beyond 63 wraps to zero
// (`10^64 ≡ 0 mod 2^64`) and a negative shift beyond 19 rounds to zero.

use crate::arith::OverflowMode;
use crate::error::{DecimalError, Result};
use crate::rounding::{rounding_increment, RoundingMode, TruncatedPart};
use crate::scale::{mul_by_scale_exact, scale_factor, MAX_SCALE};

/// Quotient, truncated-part and remainder sign of `u / 10^m` for `m >= 1`.
///
/// The quotient truncates toward zero; the remainder sign equals the sign of
/// `u` unless the remainder is zero.
pub(crate) fn div_pow10_parts(u: i64, m: u32) -> (i64, TruncatedPart, i32) {
    if m <= MAX_SCALE as u32 {
        let d = scale_factor(m as u8);
        let q = u / d;
        let r = u - q * d;
        let tp = TruncatedPart::for_remainder(r.unsigned_abs(), d as u64);
        (q, tp, r.signum() as i32)
    } else if m == 19 {
        // |u| < 10^19, so the quotient is zero and the whole value is the
        // remainder.
        (0, TruncatedPart::for_scale19(u.unsigned_abs()), u.signum() as i32)
    } else {
        let tp = if u == 0 {
            TruncatedPart::Zero
        } else {
            TruncatedPart::LessThanHalfButNotZero
        };
        (0, tp, u.signum() as i32)
    }
}

/// `round(u * 10^n)` under the given rounding mode and overflow mode.
///
/// Negative `n` rounds; positive `n` is exact or overflows. In unchecked
/// mode a positive shift wraps.
pub fn mul_pow10(u: i64, n: i64, mode: RoundingMode, overflow: OverflowMode) -> Result<i64> {
    if u == 0 {
        return Ok(0);
    }
    if n == 0 {
        return Ok(u);
    }
    if n > 0 {
        return match overflow {
            OverflowMode::Checked => {
                if n > MAX_SCALE as i64 {
                    Err(DecimalError::overflow("*10^n", u, Some(n), 0))
                } else {
                    mul_by_scale_exact(n as u8, u)
                }
            }
            OverflowMode::Unchecked => {
                if n >= 64 {
                    return Ok(0);
                }
                let mut v = u;
                let mut n = n;
                while n > MAX_SCALE as i64 {
                    v = v.wrapping_mul(scale_factor(MAX_SCALE));
                    n -= MAX_SCALE as i64;
                }
                Ok(v.wrapping_mul(scale_factor(n as u8)))
            }
        };
    }
    let m = n.unsigned_abs().min(20) as u32;
    let (q, tp, _) = div_pow10_parts(u, m);
    let inc = rounding_increment(mode, u.signum() as i32, q, tp)?;
    Ok(q + inc)
}

/// `round(u / 10^n)`; the symmetric operation with the exponent negated.
#[inline]
pub fn div_pow10(u: i64, n: i64, mode: RoundingMode, overflow: OverflowMode) -> Result<i64> {
    mul_pow10(u, -n, mode, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::OverflowMode::{Checked, Unchecked};
    use crate::rounding::RoundingMode::*;

    #[test]
    fn scaling_up() {
        assert_eq!(mul_pow10(123, 2, Down, Checked).unwrap(), 12_300);
        assert!(mul_pow10(i64::MAX, 1, Down, Checked).is_err());
        assert_eq!(
            mul_pow10(i64::MAX, 1, Down, Unchecked).unwrap(),
            i64::MAX.wrapping_mul(10)
        );
        assert_eq!(mul_pow10(7, 64, Down, Unchecked).unwrap(), 0);
        assert!(mul_pow10(7, 19, Down, Checked).is_err());
        assert_eq!(mul_pow10(0, 40, Down, Checked).unwrap(), 0);
    }

    #[test]
    fn scaling_down_rounds() {
        assert_eq!(mul_pow10(12_345, -2, Down, Checked).unwrap(), 123);
        assert_eq!(mul_pow10(12_345, -2, HalfUp, Checked).unwrap(), 123);
        assert_eq!(mul_pow10(12_350, -2, HalfUp, Checked).unwrap(), 124);
        assert_eq!(mul_pow10(12_350, -2, HalfEven, Checked).unwrap(), 124);
        assert_eq!(mul_pow10(12_450, -2, HalfEven, Checked).unwrap(), 124);
        assert_eq!(mul_pow10(-12_350, -2, HalfUp, Checked).unwrap(), -124);
        assert_eq!(mul_pow10(-12_345, -2, Floor, Checked).unwrap(), -124);
        assert_eq!(mul_pow10(-12_345, -2, Ceiling, Checked).unwrap(), -123);
        assert!(mul_pow10(12_345, -2, Unnecessary, Checked).is_err());
        assert_eq!(mul_pow10(12_300, -2, Unnecessary, Checked).unwrap(), 123);
    }

    #[test]
    fn scaling_down_past_all_digits() {
        // |u| / 10^19 is at most just over a half
        assert_eq!(mul_pow10(5_000_000_000_000_000_000, -19, HalfUp, Checked).unwrap(), 1);
        assert_eq!(mul_pow10(5_000_000_000_000_000_000, -19, HalfDown, Checked).unwrap(), 0);
        assert_eq!(mul_pow10(i64::MIN, -19, HalfUp, Checked).unwrap(), -1);
        assert_eq!(mul_pow10(1, -20, Up, Checked).unwrap(), 1);
        assert_eq!(mul_pow10(1, -20, HalfUp, Checked).unwrap(), 0);
        assert_eq!(mul_pow10(-1, -400, Floor, Checked).unwrap(), -1);
    }

    #[test]
    fn div_is_mul_negated() {
        assert_eq!(
            div_pow10(12_345, 2, HalfUp, Checked).unwrap(),
            mul_pow10(12_345, -2, HalfUp, Checked).unwrap()
        );
        assert_eq!(div_pow10(5, -3, Down, Checked).unwrap(), 5_000);
    }
}
