//! Square root with rounding: `round(sqrt(u * 10^scale))`.

use crate::arith::Arithmetic;
use crate::error::{DecimalError, Result};
use crate::rounding::{rounding_increment, TruncatedPart};
use crate::scale::pow10_u128;
use crate::wide::isqrt_u128;

impl Arithmetic {
    /// The square root of `u` at this scale; negative input fails.
    pub fn sqrt(&self, u: i64) -> Result<i64> {
        if u < 0 {
            return Err(DecimalError::SquareRootOfNegative {
                a: u,
                scale: self.scale(),
            });
        }
        if u == 0 {
            return Ok(0);
        }
        let n = u as u128 * pow10_u128(self.scale() as u32);
        let q = isqrt_u128(n);
        let rem = n - q * q;
        // the residual against q decides the half: n >= (q + 1/2)^2 exactly
        // when rem > q, and an exact half never occurs
        let tp = if rem == 0 {
            TruncatedPart::Zero
        } else if rem <= q {
            TruncatedPart::LessThanHalfButNotZero
        } else {
            TruncatedPart::GreaterThanHalf
        };
        let q = q as i64;
        let inc = rounding_increment(self.rounding(), 1, q, tp)?;
        Ok(q + inc)
    }
}
