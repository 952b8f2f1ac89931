//! Integer powers by binary exponentiation into the decimal accumulator.

use crate::arith::Arithmetic;
use crate::error::{DecimalError, Result};
use crate::wide::UnsignedDecimal9i36f;

/// Exponent bound; matches the range of a nine-digit decimal exponent.
pub const MAX_POW_EXPONENT: i32 = 999_999_999;

impl Arithmetic {
    /// `round(u^n)` at this scale for `n ∈ [-999_999_999, 999_999_999]`.
    ///
    /// `u^0` is one even for `u = 0`; `0^n` for negative `n` fails with
    /// division by zero. Negative exponents evaluate `1 / u^|n|`, carrying
    /// the accumulation under the reciprocal-inverted rounding mode so the
    /// final inversion rounds in the requested direction.
    pub fn pow(&self, u: i64, n: i32) -> Result<i64> {
        if n.unsigned_abs() > MAX_POW_EXPONENT as u32 {
            return Err(DecimalError::InvalidArgument(
                "pow exponent must be within ±999999999",
            ));
        }
        if n == 0 {
            return Ok(self.one());
        }
        if u == 0 {
            return if n > 0 {
                Ok(0)
            } else {
                Err(DecimalError::division_by_zero("^", 0, self.scale()))
            };
        }
        if n == 1 {
            return Ok(u);
        }
        let one = self.one();
        if u == one {
            return Ok(one);
        }
        if u == -one {
            return Ok(if n & 1 == 1 { -one } else { one });
        }
        let sign = if u < 0 && n & 1 == 1 { -1 } else { 1 };
        let acc_mode = if n < 0 {
            self.rounding().reciprocal()
        } else {
            self.rounding()
        };
        let mut factor = UnsignedDecimal9i36f::new(u.unsigned_abs(), self.scale());
        let mut acc = UnsignedDecimal9i36f::one();
        let mut m = n.unsigned_abs();
        loop {
            if m & 1 == 1 {
                acc.multiply(sign, &factor, acc_mode)
                    .map_err(|e| self.wrap_err(e, "^", u, None))?;
            }
            m >>= 1;
            if m == 0 {
                break;
            }
            let squared = factor;
            factor
                .multiply(sign, &squared, acc_mode)
                .map_err(|e| self.wrap_err(e, "^", u, None))?;
        }
        let result = if n > 0 {
            acc.unscaled_at(sign, self.scale(), self.rounding(), self.is_checked())
        } else {
            acc.get_inverted(sign, self, acc_mode)
        };
        result.map_err(|e| self.wrap_err(e, "^", u, None))
    }
}
