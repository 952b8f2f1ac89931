//! Wide arithmetic helpers: 128-bit products and quotients, integer square
//! root, and the decimal accumulator behind `pow`.

use crate::error::{DecimalError, Result};
use crate::rounding::{rounds_away, RoundingMode, TruncatedPart};
use crate::scale::{digits_u64, pow10_u128, scale_factor};

/// The full signed 128-bit product.
#[inline]
pub(crate) fn mul_to_128(a: i64, b: i64) -> i128 {
    a as i128 * b as i128
}

/// `round(n / d)` of an unsigned 128-bit numerator by a 64-bit divisor; the
/// rounding direction follows `sign`.
#[inline]
pub(crate) fn div_128_by_64(n: u128, d: u64, sign: i32, mode: RoundingMode) -> Result<u128> {
    let q = n / d as u128;
    let r = (n % d as u128) as u64;
    let tp = TruncatedPart::for_remainder(r, d);
    let away = rounds_away(mode, sign, q & 1 == 1, tp)?;
    Ok(q + away as u128)
}

/// `floor(sqrt(n))` by Newton–Heron iteration; converges when successive
/// iterates stop decreasing, with a final overshoot correction.
pub(crate) fn isqrt_u128(n: u128) -> u128 {
    if n <= 1 {
        return n;
    }
    let bits = 128 - n.leading_zeros();
    let mut x = 1u128 << bits.div_ceil(2);
    loop {
        let q = n / x;
        let next = (x >> 1) + (q >> 1) + (x & q & 1);
        if next >= x {
            break;
        }
        x = next;
    }
    if x.checked_mul(x).map_or(true, |sq| sq > n) {
        x - 1
    } else {
        x
    }
}

const POW10_9: u64 = 1_000_000_000;
const POW10_18: u64 = 1_000_000_000_000_000_000;
const POW10_36: u128 = POW10_18 as u128 * POW10_18 as u128;

/// Unsigned decimal accumulator with 9 integer digits and 36 fraction
/// digits: the value is `(ival + val3*10^-18 + val2*10^-36) * 10^pow10`.
///
/// `multiply` keeps the 18-digit normal form (`ival < 10^9`, both fraction
/// limbs below `10^18`) by shifting excess digits into `pow10` and rounding
/// the digits that fall off the 36-digit fraction. The transient 9-digit
/// form used for multiplication splits each half-limb into `10^9` groups so
/// every partial product fits a `u64`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnsignedDecimal9i36f {
    ival: u64,
    val3: u64,
    val2: u64,
    pow10: i64,
}

impl UnsignedDecimal9i36f {
    /// The value one.
    pub(crate) fn one() -> Self {
        UnsignedDecimal9i36f {
            ival: 1,
            val3: 0,
            val2: 0,
            pow10: 0,
        }
    }

    /// The value `abs_unscaled * 10^-scale`, exactly.
    pub(crate) fn new(abs_unscaled: u64, scale: u8) -> Self {
        let digits = digits_u64(abs_unscaled);
        let t = digits.saturating_sub(9);
        let unit = if t == 0 {
            1
        } else {
            scale_factor(t as u8) as u64
        };
        let hi = abs_unscaled / unit;
        let lo = abs_unscaled % unit;
        let frac36 = lo as u128 * pow10_u128(36 - t);
        UnsignedDecimal9i36f {
            ival: hi,
            val3: (frac36 / POW10_18 as u128) as u64,
            val2: (frac36 % POW10_18 as u128) as u64,
            pow10: t as i64 - scale as i64,
        }
    }

    fn is_zero(&self) -> bool {
        self.ival == 0 && self.val3 == 0 && self.val2 == 0
    }

    /// The five 9-digit groups of the 45-digit mantissa.
    fn groups(&self) -> [u64; 5] {
        [
            self.ival,
            self.val3 / POW10_9,
            self.val3 % POW10_9,
            self.val2 / POW10_9,
            self.val2 % POW10_9,
        ]
    }

    /// `self = self * rhs`, rounding the digits beyond the 36-digit fraction
    /// in the direction given by `sign`.
    pub(crate) fn multiply(
        &mut self,
        sign: i32,
        rhs: &UnsignedDecimal9i36f,
        mode: RoundingMode,
    ) -> Result<()> {
        let a = self.groups();
        let b = rhs.groups();
        // column sums: at most five products of 9-digit groups per column
        let mut c = [0u64; 9];
        for (i, &ai) in a.iter().enumerate() {
            if ai == 0 {
                continue;
            }
            for (j, &bj) in b.iter().enumerate() {
                c[i + j] += ai * bj;
            }
        }
        // carry into 9-digit groups, most significant last
        for k in (1..9).rev() {
            c[k - 1] += c[k] / POW10_9;
            c[k] %= POW10_9;
        }
        if c.iter().all(|&x| x == 0) {
            *self = UnsignedDecimal9i36f {
                ival: 0,
                val3: 0,
                val2: 0,
                pow10: 0,
            };
            return Ok(());
        }
        // renormalise a zero integer group away so precision is retained
        let mut exp = self.pow10 + rhs.pow10;
        while c[0] == 0 {
            for k in 0..8 {
                c[k] = c[k + 1];
            }
            c[8] = 0;
            exp -= 9;
        }
        // shift an oversized integer part into the exponent
        let t = digits_u64(c[0]).saturating_sub(9);
        let unit = if t == 0 {
            1
        } else {
            scale_factor(t as u8) as u64
        };
        let ival = c[0] / unit;
        let rem_int = c[0] % unit;
        let head36 = (c[1] as u128 * POW10_9 as u128 + c[2] as u128) * POW10_18 as u128
            + (c[3] as u128 * POW10_9 as u128 + c[4] as u128);
        let tail36 = (c[5] as u128 * POW10_9 as u128 + c[6] as u128) * POW10_18 as u128
            + (c[7] as u128 * POW10_9 as u128 + c[8] as u128);
        let mut frac36 = rem_int as u128 * pow10_u128(36 - t) + head36 / pow10_u128(t);
        let tp = tp_two_limb(head36 % pow10_u128(t), tail36, t);
        let mut ival = ival;
        let mut exp = exp + t as i64;
        if rounds_away(mode, sign, frac36 & 1 == 1, tp)? {
            frac36 += 1;
            if frac36 == POW10_36 {
                frac36 = 0;
                ival += 1;
                if ival == POW10_9 {
                    ival = POW10_9 / 10;
                    exp += 1;
                }
            }
        }
        self.ival = ival;
        self.val3 = (frac36 / POW10_18 as u128) as u64;
        self.val2 = (frac36 % POW10_18 as u128) as u64;
        self.pow10 = exp;
        Ok(())
    }

    /// The signed unscaled value at `scale`, rounding once.
    pub(crate) fn unscaled_at(
        &self,
        sign: i32,
        scale: u8,
        mode: RoundingMode,
        checked: bool,
    ) -> Result<i64> {
        let frac = self.val3 as u128 * POW10_18 as u128 + self.val2 as u128;
        let e = self.pow10 + scale as i64;
        if e >= 0 {
            if e > 36 {
                if self.is_zero() {
                    return Ok(0);
                }
                if checked {
                    return Err(DecimalError::overflow("pow10", self.ival as i64, None, scale));
                }
                // 10^64 ≡ 0 (mod 2^64), so far shifts wrap to zero
                if e - 36 >= 64 {
                    return Ok(0);
                }
                let mut mag = (self.ival as u128)
                    .wrapping_mul(POW10_36)
                    .wrapping_add(frac);
                let mut left = e - 36;
                while left > 0 {
                    let k = left.min(19);
                    mag = mag.wrapping_mul(pow10_u128(k as u32));
                    left -= k;
                }
                return fit_magnitude(mag, sign, false, scale);
            }
            let unit = pow10_u128(36 - e as u32);
            let kept = frac / unit;
            let tp = TruncatedPart::for_remainder_wide(frac % unit, unit);
            let shifted = (self.ival as u128).checked_mul(pow10_u128(e as u32));
            let mut mag = match shifted {
                Some(s) => match s.checked_add(kept) {
                    Some(m) => m,
                    None => {
                        return if checked {
                            Err(DecimalError::overflow("pow10", self.ival as i64, None, scale))
                        } else {
                            fit_magnitude(s.wrapping_add(kept), sign, false, scale)
                        }
                    }
                },
                None => {
                    return if checked {
                        Err(DecimalError::overflow("pow10", self.ival as i64, None, scale))
                    } else {
                        fit_magnitude(
                            (self.ival as u128)
                                .wrapping_mul(pow10_u128(e as u32))
                                .wrapping_add(kept),
                            sign,
                            false,
                            scale,
                        )
                    }
                }
            };
            mag = mag.wrapping_add(rounds_away(mode, sign, mag & 1 == 1, tp)? as u128);
            return fit_magnitude(mag, sign, checked, scale);
        }
        // negative exponent: shift right of the integer part
        let m = e.unsigned_abs();
        if m > 9 {
            // the whole mantissa is below a tenth of the unit
            let tp = if self.is_zero() {
                TruncatedPart::Zero
            } else {
                TruncatedPart::LessThanHalfButNotZero
            };
            let away = rounds_away(mode, sign, false, tp)?;
            return fit_magnitude(away as u128, sign, checked, scale);
        }
        let unit = scale_factor(m as u8) as u64;
        let q = self.ival / unit;
        let rem_int = self.ival % unit;
        let tp = tp_two_limb(rem_int as u128, frac, m as u32);
        let mag = q as u128 + rounds_away(mode, sign, q & 1 == 1, tp)? as u128;
        fit_magnitude(mag, sign, checked, scale)
    }

    /// The signed unscaled reciprocal at `arith`'s scale.
    ///
    /// The mantissa is renormalised (by exponent choice) into `[0.3, 3)` so
    /// both it and its reciprocal are representable at scale 18; the
    /// reciprocal then shifts back by the residual power of ten.
    pub(crate) fn get_inverted(
        &self,
        sign: i32,
        arith: &crate::arith::Arithmetic,
        pow_mode: RoundingMode,
    ) -> Result<i64> {
        debug_assert!(self.ival > 0);
        let d = digits_u64(self.ival) as i64;
        let lead = self.ival / scale_factor(d as u8 - 1) as u64;
        let k = if lead < 3 { 1 - d } else { -d };
        let norm = UnsignedDecimal9i36f { pow10: k, ..*self };
        // in [3*10^17, 3*10^18): safely invertible at scale 18
        let v18 = norm.unscaled_at(sign, 18, pow_mode, true)?;
        let inv = div_128_by_64(POW10_36, v18.unsigned_abs(), sign, arith.rounding())? as i64;
        let inv = if sign < 0 { -inv } else { inv };
        let e2 = arith.scale() as i64 + k - self.pow10 - 18;
        crate::pow10::mul_pow10(inv, e2, arith.rounding(), arith.overflow())
    }
}

/// Classifies `2 * (hi * 10^36 + lo)` against `10^(pow + 36)` for
/// `pow <= 10`, without ever forming the 46-digit quantities.
fn tp_two_limb(hi: u128, lo: u128, pow: u32) -> TruncatedPart {
    if hi == 0 && lo == 0 {
        return TruncatedPart::Zero;
    }
    let twice_lo = 2 * lo;
    let carry = twice_lo >= POW10_36;
    let twice_lo = if carry { twice_lo - POW10_36 } else { twice_lo };
    let twice_hi = 2 * hi + carry as u128;
    let unit = pow10_u128(pow);
    if twice_hi > unit {
        TruncatedPart::GreaterThanHalf
    } else if twice_hi < unit {
        TruncatedPart::LessThanHalfButNotZero
    } else if twice_lo == 0 {
        TruncatedPart::EqualToHalf
    } else {
        TruncatedPart::GreaterThanHalf
    }
}

/// Narrows an unsigned magnitude to a signed unscaled value.
fn fit_magnitude(mag: u128, sign: i32, checked: bool, scale: u8) -> Result<i64> {
    if checked {
        let limit = if sign < 0 { 1u128 << 63 } else { (1u128 << 63) - 1 };
        if mag > limit {
            return Err(DecimalError::overflow("pow10", mag as i64, None, scale));
        }
    }
    Ok(if sign < 0 {
        (mag as i64).wrapping_neg()
    } else {
        mag as i64
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingMode::*;

    #[test]
    fn isqrt_basics() {
        assert_eq!(isqrt_u128(0), 0);
        assert_eq!(isqrt_u128(1), 1);
        assert_eq!(isqrt_u128(3), 1);
        assert_eq!(isqrt_u128(4), 2);
        assert_eq!(isqrt_u128(20_000), 141);
        let n = (1u128 << 100) - 1;
        let r = isqrt_u128(n);
        assert!(r * r <= n && (r + 1) * (r + 1) > n);
    }

    #[test]
    fn div_128_by_64_rounds() {
        assert_eq!(div_128_by_64(10, 4, 1, Down).unwrap(), 2);
        assert_eq!(div_128_by_64(10, 4, 1, HalfUp).unwrap(), 3);
        assert_eq!(div_128_by_64(10, 4, 1, HalfEven).unwrap(), 2);
        assert_eq!(div_128_by_64(10, 4, -1, Floor).unwrap(), 3);
    }

    #[test]
    fn accumulator_represents_exactly() {
        // 92.33720368547758 at scale 14, 16 significant digits
        let v = UnsignedDecimal9i36f::new(9_233_720_368_547_758, 14);
        assert_eq!(v.unscaled_at(1, 14, Unnecessary, true).unwrap(), 9_233_720_368_547_758);
        // largest magnitude: 19 digits split as 9 + 10
        let big = UnsignedDecimal9i36f::new(u64::MAX / 2, 0);
        assert_eq!(big.unscaled_at(1, 0, Unnecessary, true).unwrap(), (u64::MAX / 2) as i64);
    }

    #[test]
    fn multiply_squares_exactly() {
        // 2.00 squared twice -> 16
        let mut v = UnsignedDecimal9i36f::new(200, 2);
        let c = v;
        v.multiply(1, &c, HalfEven).unwrap();
        let c = v;
        v.multiply(1, &c, HalfEven).unwrap();
        assert_eq!(v.unscaled_at(1, 2, Unnecessary, true).unwrap(), 1_600);
    }

    #[test]
    fn multiply_below_one() {
        // 0.5^2 = 0.25 stays exact in the mantissa-exponent form
        let mut v = UnsignedDecimal9i36f::new(5, 1);
        let c = v;
        v.multiply(1, &c, HalfEven).unwrap();
        assert_eq!(v.unscaled_at(1, 2, Unnecessary, true).unwrap(), 25);
    }

    #[test]
    fn extraction_rounds_once() {
        // 1.25 at scale 1 rounds the trailing 5
        let v = UnsignedDecimal9i36f::new(125, 2);
        assert_eq!(v.unscaled_at(1, 1, HalfUp, true).unwrap(), 13);
        assert_eq!(v.unscaled_at(1, 1, HalfEven, true).unwrap(), 12);
        assert_eq!(v.unscaled_at(-1, 1, HalfUp, true).unwrap(), -13);
        assert_eq!(v.unscaled_at(1, 0, HalfUp, true).unwrap(), 1);
        // overflow at a larger scale is caught
        let w = UnsignedDecimal9i36f::new(u64::MAX / 2, 0);
        assert!(w.unscaled_at(1, 2, HalfUp, true).is_err());
    }

    #[test]
    fn inversion_through_scale18() {
        let a = crate::arith::Arithmetic::get(
            2,
            HalfUp,
            crate::arith::OverflowMode::Checked,
        );
        // 1 / 2.00 = 0.50
        let v = UnsignedDecimal9i36f::new(200, 2);
        assert_eq!(v.get_inverted(1, &a, HalfUp).unwrap(), 50);
        // 1 / 0.50 = 2.00
        let v = UnsignedDecimal9i36f::new(50, 2);
        assert_eq!(v.get_inverted(1, &a, HalfUp).unwrap(), 200);
        // 1 / 3.00 = 0.33
        let v = UnsignedDecimal9i36f::new(300, 2);
        assert_eq!(v.get_inverted(1, &a, HalfUp).unwrap(), 33);
    }
}
