//! Addition and subtraction at equal and differing scales, plus average.

use crate::arith::{Arithmetic, OverflowMode};
use crate::checked;
use crate::error::{DecimalError, Result};
use crate::pow10::{div_pow10_parts, mul_pow10};
use crate::rounding::{rounding_increment, RoundingMode};
use crate::scale::scale_factor;

impl Arithmetic {
    /// `a + b` at this scale.
    #[inline]
    pub fn add(&self, a: i64, b: i64) -> Result<i64> {
        match self.overflow() {
            OverflowMode::Unchecked => Ok(a.wrapping_add(b)),
            OverflowMode::Checked => {
                checked::add(a, b).map_err(|e| self.wrap_err(e, "+", a, Some(b)))
            }
        }
    }

    /// `a - b` at this scale.
    #[inline]
    pub fn subtract(&self, a: i64, b: i64) -> Result<i64> {
        match self.overflow() {
            OverflowMode::Unchecked => Ok(a.wrapping_sub(b)),
            OverflowMode::Checked => {
                checked::sub(a, b).map_err(|e| self.wrap_err(e, "-", a, Some(b)))
            }
        }
    }

    /// `a + v*10^(scale - other_scale)`: adds an unscaled value given at a
    /// foreign scale, rounding when the other scale is finer.
    #[inline]
    pub fn add_unscaled(&self, a: i64, v: i64, other_scale: i32) -> Result<i64> {
        self.add_unscaled_signed(a, v, other_scale, false)
            .map_err(|e| self.wrap_err(e, "+", a, None))
    }

    /// Subtracting counterpart of [`Arithmetic::add_unscaled`].
    #[inline]
    pub fn subtract_unscaled(&self, a: i64, v: i64, other_scale: i32) -> Result<i64> {
        self.add_unscaled_signed(a, v, other_scale, true)
            .map_err(|e| self.wrap_err(e, "-", a, None))
    }

    fn add_unscaled_signed(&self, a: i64, v: i64, other_scale: i32, negate: bool) -> Result<i64> {
        let delta = other_scale as i64 - self.scale() as i64;
        if delta == 0 {
            return if negate {
                self.subtract(a, v)
            } else {
                self.add(a, v)
            };
        }
        if delta < 0 {
            // The other operand is coarser: scale it up exactly, then add.
            let up = -delta;
            return match self.overflow() {
                OverflowMode::Unchecked => {
                    let w = mul_pow10(v, up, RoundingMode::Down, OverflowMode::Unchecked)?;
                    Ok(if negate {
                        a.wrapping_sub(w)
                    } else {
                        a.wrapping_add(w)
                    })
                }
                OverflowMode::Checked => {
                    if up > 18 {
                        if v == 0 {
                            return Ok(a);
                        }
                        return Err(DecimalError::overflow("+", a, Some(v), self.scale()));
                    }
                    // Widen so that an overflowing intermediate with an
                    // opposite-signed `a` can still land in range.
                    let t = (v as i128) * (scale_factor(up as u8) as i128);
                    let s = a as i128 + if negate { -t } else { t };
                    i64::try_from(s)
                        .map_err(|_| DecimalError::overflow("+", a, Some(v), self.scale()))
                }
            };
        }
        // The other operand is finer: truncate it to this scale and round
        // the discarded fraction into the sum. When the fraction's sign
        // opposes the sum, the rounding direction flips.
        let m = delta.unsigned_abs().min(20) as u32;
        let (q, tp, rsign) = div_pow10_parts(v, m);
        let (q, rsign) = if negate { (-q, -rsign) } else { (q, rsign) };
        let sum = match self.overflow() {
            OverflowMode::Unchecked => a.wrapping_add(q),
            OverflowMode::Checked => checked::add(a, q)?,
        };
        if tp.is_zero() {
            return Ok(sum);
        }
        let mode = if sum != 0 && (sum > 0) != (rsign > 0) {
            self.rounding().additive_reversion()
        } else {
            self.rounding()
        };
        let inc = rounding_increment(mode, rsign, sum, tp)?;
        match self.overflow() {
            OverflowMode::Unchecked => Ok(sum.wrapping_add(inc)),
            OverflowMode::Checked => checked::add(sum, inc),
        }
    }

    /// `(a + b) / 2` with rounding; never overflows in either mode.
    pub fn avg(&self, a: i64, b: i64) -> Result<i64> {
        // floor((a + b) / 2) without forming the sum
        let floor = (a & b) + ((a ^ b) >> 1);
        if (a ^ b) & 1 == 0 {
            return Ok(floor);
        }
        // The exact average is floor + 1/2; candidates are floor and
        // floor + 1, and the value is negative exactly when floor is.
        let value_neg = floor < 0;
        let inc = match self.rounding() {
            RoundingMode::Floor => 0,
            RoundingMode::Ceiling => 1,
            RoundingMode::Down | RoundingMode::HalfDown => i64::from(value_neg),
            RoundingMode::Up | RoundingMode::HalfUp => i64::from(!value_neg),
            RoundingMode::HalfEven => floor & 1,
            RoundingMode::Unnecessary => return Err(DecimalError::RoundingNecessary),
        };
        Ok(floor + inc)
    }
}
