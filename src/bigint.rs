//! Big-integer conversions, behind the `bigint` feature.
//
// These are the only operations in the crate that allocate. Arbitrary-scale
// decimal collaborators are consumed and produced as an `(unscaled, scale)`
// pair so no particular big-decimal type is imposed.

use num_bigint::{BigInt, Sign};

use crate::arith::Arithmetic;
use crate::error::{DecimalError, Result};
use crate::rounding::{rounding_increment, TruncatedPart};

impl Arithmetic {
    /// The unscaled representation of an arbitrary-precision integer.
    pub fn from_big_int(&self, v: &BigInt) -> Result<i64> {
        let long = i64::try_from(v).map_err(|_| {
            DecimalError::InvalidArgument("value magnitude does not fit at this scale")
        })?;
        self.from_long(long)
    }

    /// The integer value of `u`, rounding the fraction away.
    pub fn to_big_int(&self, u: i64) -> Result<BigInt> {
        Ok(BigInt::from(self.to_long(u)?))
    }

    /// The integer value of `u`; fails with `RoundingNecessary` when any
    /// fractional digit is non-zero.
    pub fn to_big_int_exact(&self, u: i64) -> Result<BigInt> {
        let exact = self
            .with_rounding(crate::rounding::RoundingMode::Unnecessary)
            .to_long(u)?;
        Ok(BigInt::from(exact))
    }

    /// Converts from a big-decimal collaborator given as its unscaled value
    /// and scale, rounding per this instance.
    pub fn from_big_decimal(&self, unscaled: &BigInt, scale: i64) -> Result<i64> {
        if unscaled.sign() == Sign::NoSign {
            return Ok(0);
        }
        let shift = self.scale() as i64 - scale;
        if shift >= 0 {
            if shift > 38 {
                return Err(DecimalError::InvalidArgument(
                    "value magnitude does not fit at this scale",
                ));
            }
            let widened = unscaled * BigInt::from(10u8).pow(shift as u32);
            return i64::try_from(&widened).map_err(|_| {
                DecimalError::InvalidArgument("value magnitude does not fit at this scale")
            });
        }
        let m = shift.unsigned_abs();
        if m > unscaled.bits() / 3 + 1 {
            // |unscaled| is far below half of 10^m
            let sign = if unscaled.sign() == Sign::Minus { -1 } else { 1 };
            let inc = rounding_increment(
                self.rounding(),
                sign,
                0,
                TruncatedPart::LessThanHalfButNotZero,
            )?;
            return Ok(inc);
        }
        let unit = BigInt::from(10u8).pow(m as u32);
        let q = unscaled / &unit;
        let r = unscaled - &q * &unit;
        let q = i64::try_from(&q).map_err(|_| {
            DecimalError::InvalidArgument("value magnitude does not fit at this scale")
        })?;
        let twice = r.magnitude() * 2u32;
        let tp = if r.sign() == Sign::NoSign {
            TruncatedPart::Zero
        } else {
            match twice.cmp(unit.magnitude()) {
                core::cmp::Ordering::Less => TruncatedPart::LessThanHalfButNotZero,
                core::cmp::Ordering::Equal => TruncatedPart::EqualToHalf,
                core::cmp::Ordering::Greater => TruncatedPart::GreaterThanHalf,
            }
        };
        let sign = if unscaled.sign() == Sign::Minus { -1 } else { 1 };
        let inc = rounding_increment(self.rounding(), sign, q, tp)?;
        q.checked_add(inc).ok_or(DecimalError::InvalidArgument(
            "value magnitude does not fit at this scale",
        ))
    }

    /// The exact `(unscaled, scale)` pair of `u` for a big-decimal
    /// collaborator.
    pub fn to_big_decimal(&self, u: i64) -> (BigInt, u8) {
        (BigInt::from(u), self.scale())
    }
}
