//! Rounding to a precision for `Arithmetic` and `Decimal<S>`.
//
// - kernel `round(u, precision)`: zeroes the digits right of the given
//   fractional position while keeping the scale.
// - `round_dp(dp, mode)`, `trunc()`, `floor()`, `ceil()` and cross-scale
//   conversion on the typed value.

use crate::arith::{Arithmetic, OverflowMode};
use crate::checked;
use crate::error::{DecimalError, Result};
use crate::rounding::{rounding_increment, RoundingMode, TruncatedPart};
use crate::scale::{scale_factor, ScaleMetrics};
use crate::Decimal;

impl Arithmetic {
    /// Rounds `u` at the `precision`-th fractional digit, keeping the scale.
    ///
    /// A negative precision zeroes integer digits; `precision >= scale` is an
    /// identity. Fails with `InvalidArgument` when `precision < scale - 18`.
    pub fn round(&self, u: i64, precision: i32) -> Result<i64> {
        if precision >= self.scale() as i32 {
            return Ok(u);
        }
        let drop = self.scale() as i32 - precision;
        if drop > 18 {
            return Err(DecimalError::InvalidArgument(
                "precision must be at least scale - 18",
            ));
        }
        let unit = scale_factor(drop as u8);
        let q = u / unit;
        let r = u - q * unit;
        if r == 0 {
            return Ok(u);
        }
        let tp = TruncatedPart::for_remainder(r.unsigned_abs(), unit as u64);
        let inc = rounding_increment(self.rounding(), u.signum() as i32, q, tp)?;
        match self.overflow() {
            OverflowMode::Unchecked => Ok((q + inc).wrapping_mul(unit)),
            OverflowMode::Checked => checked::mul(q + inc, unit)
                .map_err(|e| self.wrap_err(e, "round", u, None)),
        }
    }
}

impl<S: ScaleMetrics> Decimal<S> {
    /// Truncate to an integer (dp = 0), toward zero.
    #[inline]
    pub fn trunc(self) -> Self {
        self.round_dp(0, RoundingMode::Down)
    }

    /// Round down toward negative infinity to an integer (dp = 0).
    #[inline]
    pub fn floor(self) -> Self {
        self.round_dp(0, RoundingMode::Floor)
    }

    /// Round up toward positive infinity to an integer (dp = 0).
    #[inline]
    pub fn ceil(self) -> Self {
        self.round_dp(0, RoundingMode::Ceiling)
    }

    /// Truncate to `dp` fractional digits (toward zero).
    #[inline]
    pub fn trunc_dp(self, dp: u32) -> Self {
        self.round_dp(dp, RoundingMode::Down)
    }

    /// Checked version of `round_dp`: returns `None` on overflow.
    pub fn checked_round_dp(self, dp: u32, mode: RoundingMode) -> Option<Self> {
        let arith = Arithmetic::get(S::SCALE, mode, OverflowMode::Checked);
        arith
            .round(self.unscaled(), dp.min(S::SCALE as u32) as i32)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Round to `dp` fractional digits in **the same scale**.
    /// Panics on overflow to mirror the panic-on-overflow operators.
    #[inline]
    pub fn round_dp(self, dp: u32, mode: RoundingMode) -> Self {
        self.checked_round_dp(dp, mode)
            .expect("Decimal::round_dp overflow")
    }

    /// Convert to another scale `T`, applying rounding if scaling down.
    /// Panics on overflow (use `checked_to_scale` for a fallible version).
    #[inline]
    pub fn to_scale<T: ScaleMetrics>(self, mode: RoundingMode) -> Decimal<T> {
        self.checked_to_scale::<T>(mode)
            .expect("Decimal::to_scale overflow")
    }

    /// Fallible conversion to another scale `T`, applying `mode` when
    /// reducing precision. Returns `None` on overflow.
    pub fn checked_to_scale<T: ScaleMetrics>(self, mode: RoundingMode) -> Option<Decimal<T>> {
        let arith = Arithmetic::get(T::SCALE, mode, OverflowMode::Checked);
        arith
            .from_unscaled(self.unscaled(), S::SCALE as i32)
            .ok()
            .map(Decimal::<T>::from_unscaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::OverflowMode::{Checked, Unchecked};
    use crate::rounding::RoundingMode::*;

    #[test]
    fn precision_within_the_fraction() {
        let a = Arithmetic::get(2, HalfUp, Checked);
        // 123.45 at one fractional digit -> 123.50
        assert_eq!(a.round(12_345, 1).unwrap(), 12_350);
        assert_eq!(Arithmetic::get(2, Down, Checked).round(12_345, 1).unwrap(), 12_340);
        assert_eq!(a.round(12_345, 2).unwrap(), 12_345);
        assert_eq!(a.round(12_345, 7).unwrap(), 12_345);
        assert_eq!(a.round(-12_345, 1).unwrap(), -12_350);
    }

    #[test]
    fn negative_precision_zeroes_integer_digits() {
        let a = Arithmetic::get(2, HalfUp, Checked);
        // 123.45 at the tens -> 120.00
        assert_eq!(a.round(12_345, -1).unwrap(), 12_000);
        assert_eq!(a.round(12_345, 0).unwrap(), 12_300);
        assert_eq!(a.round(15_000, -2).unwrap(), 20_000);
        assert!(a.round(12_345, -17).is_err());
        assert_eq!(a.round(12_345, -16).unwrap(), 0);
    }

    #[test]
    fn overflow_at_the_edge() {
        let c = Arithmetic::get(0, Up, Checked);
        assert!(c.round(i64::MAX, -2).is_err());
        let u = Arithmetic::get(0, Up, Unchecked);
        let q = i64::MAX / 100 + 1;
        assert_eq!(u.round(i64::MAX, -2).unwrap(), q.wrapping_mul(100));
    }

    #[test]
    fn unnecessary_mode() {
        let a = Arithmetic::get(2, Unnecessary, Checked);
        assert_eq!(a.round(12_300, 1).unwrap(), 12_300);
        assert!(a.round(12_345, 1).is_err());
    }
}
