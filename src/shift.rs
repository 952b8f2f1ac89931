//! Bit shifts with rounding: `round(u * 2^n)` and `round(u / 2^n)`.

use crate::arith::{Arithmetic, OverflowMode};
use crate::error::{DecimalError, Result};
use crate::rounding::{rounds_away, TruncatedPart};

impl Arithmetic {
    /// `round(u * 2^n)`; negative `n` shifts right instead.
    pub fn shift_left(&self, u: i64, n: i32) -> Result<i64> {
        if n < 0 {
            return self.shift_right_inner(u, -(n as i64));
        }
        self.shift_left_inner(u, n as i64)
    }

    /// `round(u / 2^n)`; negative `n` shifts left instead.
    pub fn shift_right(&self, u: i64, n: i32) -> Result<i64> {
        if n < 0 {
            return self.shift_left_inner(u, -(n as i64));
        }
        self.shift_right_inner(u, n as i64)
    }

    fn shift_left_inner(&self, u: i64, n: i64) -> Result<i64> {
        if u == 0 || n == 0 {
            return Ok(u);
        }
        match self.overflow() {
            OverflowMode::Unchecked => {
                if n >= 64 {
                    Ok(0)
                } else {
                    Ok(u << n as u32)
                }
            }
            OverflowMode::Checked => {
                if n >= 64 {
                    return Err(DecimalError::overflow("<<", u, None, self.scale()));
                }
                i64::try_from((u as i128) << n as u32)
                    .map_err(|_| DecimalError::overflow("<<", u, None, self.scale()))
            }
        }
    }

    fn shift_right_inner(&self, u: i64, n: i64) -> Result<i64> {
        if u == 0 || n == 0 {
            return Ok(u);
        }
        let m = u.unsigned_abs() as u128;
        let (q, tp) = if n >= 64 {
            (0u128, TruncatedPart::for_pow2(m, n.min(130) as u32))
        } else {
            let q = m >> n as u32;
            let r = m & ((1u128 << n as u32) - 1);
            (q, TruncatedPart::for_pow2(r, n as u32))
        };
        let away = rounds_away(self.rounding(), u.signum() as i32, q & 1 == 1, tp)?;
        let mag = q + away as u128;
        Ok(if u < 0 {
            (mag as i64).wrapping_neg()
        } else {
            mag as i64
        })
    }
}
