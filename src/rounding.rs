//! Rounding modes, truncated-part classification and the increment table.
//
// Every operation that discards digits funnels its decision through
// `rounding_increment`: classify the discarded remainder into a
// `TruncatedPart`, then look up the increment from (mode, sign, last kept
// digit, part). The three inverses translate a mode across sign reversal,
// addition across a zero crossing, and reciprocation.

use crate::error::{DecimalError, Result};
use crate::scale::pow10_u128;

/// Rounding modes applied whenever an operation loses precision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero if there is any discarded remainder.
    Up,
    /// Toward zero (truncate).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To nearest; ties away from zero.
    HalfUp,
    /// To nearest; ties toward zero.
    HalfDown,
    /// To nearest; ties to the even last-kept digit (bankers' rounding).
    HalfEven,
    /// No rounding permitted; fails if any discarded digit is non-zero.
    Unnecessary,
}

impl RoundingMode {
    /// The mode to apply to `x` so that the result equals the requested
    /// rounding of `-x`, negated.
    #[inline]
    pub const fn sign_reversion(self) -> Self {
        match self {
            RoundingMode::Ceiling => RoundingMode::Floor,
            RoundingMode::Floor => RoundingMode::Ceiling,
            other => other,
        }
    }

    /// The mode to apply to a discarded fraction whose sign opposes the
    /// truncated sum it is added to.
    #[inline]
    pub const fn additive_reversion(self) -> Self {
        match self {
            RoundingMode::Up => RoundingMode::Down,
            RoundingMode::Down => RoundingMode::Up,
            RoundingMode::HalfUp => RoundingMode::HalfDown,
            RoundingMode::HalfDown => RoundingMode::HalfUp,
            other => other,
        }
    }

    /// The mode to apply to a value that will subsequently be reciprocated.
    #[inline]
    pub const fn reciprocal(self) -> Self {
        match self {
            RoundingMode::Up => RoundingMode::Down,
            RoundingMode::Down => RoundingMode::Up,
            RoundingMode::Ceiling => RoundingMode::Floor,
            RoundingMode::Floor => RoundingMode::Ceiling,
            RoundingMode::HalfUp => RoundingMode::HalfDown,
            RoundingMode::HalfDown => RoundingMode::HalfUp,
            other => other,
        }
    }
}

/// Classification of a discarded remainder against half of its divisor.
///
/// Ordered so that comparisons express "at least half" directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TruncatedPart {
    /// Nothing was discarded.
    Zero,
    /// A non-zero remainder strictly below half the divisor.
    LessThanHalfButNotZero,
    /// Exactly half the divisor.
    EqualToHalf,
    /// Strictly above half the divisor.
    GreaterThanHalf,
}

impl TruncatedPart {
    /// Classifies `abs_remainder` against `abs_divisor / 2` without widening:
    /// for an odd divisor the half case cannot occur.
    #[inline]
    pub const fn for_remainder(abs_remainder: u64, abs_divisor: u64) -> Self {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        let half = abs_divisor >> 1;
        if abs_remainder > half {
            TruncatedPart::GreaterThanHalf
        } else if abs_remainder == half && abs_divisor & 1 == 0 {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::LessThanHalfButNotZero
        }
    }

    /// `for_remainder` over 128-bit magnitudes.
    #[inline]
    pub const fn for_remainder_wide(abs_remainder: u128, abs_divisor: u128) -> Self {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        let half = abs_divisor >> 1;
        if abs_remainder > half {
            TruncatedPart::GreaterThanHalf
        } else if abs_remainder == half && abs_divisor & 1 == 0 {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::LessThanHalfButNotZero
        }
    }

    /// Classifies a remainder of a division by `2^n` for `n ∈ [1, 128]`.
    #[inline]
    pub const fn for_pow2(abs_remainder: u128, n: u32) -> Self {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        if n > 128 {
            // remainder < 2^128 <= half the divisor
            return TruncatedPart::LessThanHalfButNotZero;
        }
        let half = 1u128 << (n - 1);
        if abs_remainder > half {
            TruncatedPart::GreaterThanHalf
        } else if abs_remainder == half {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::LessThanHalfButNotZero
        }
    }

    /// Classifies a remainder of a division by `10^19`, the one power of ten
    /// that exceeds `i64` yet still bounds every unscaled magnitude.
    #[inline]
    pub const fn for_scale19(abs_remainder: u64) -> Self {
        const HALF: u64 = 5_000_000_000_000_000_000;
        if abs_remainder == 0 {
            TruncatedPart::Zero
        } else if abs_remainder > HALF {
            TruncatedPart::GreaterThanHalf
        } else if abs_remainder == HALF {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::LessThanHalfButNotZero
        }
    }

    /// Classifies a remainder of a division by `10^n` for any `n >= 1`.
    #[inline]
    pub(crate) fn for_pow10_wide(abs_remainder: u128, n: u32) -> Self {
        if abs_remainder == 0 {
            TruncatedPart::Zero
        } else if n > 38 {
            // 10^39 / 2 > u128::MAX >= remainder
            TruncatedPart::LessThanHalfButNotZero
        } else {
            Self::for_remainder_wide(abs_remainder, pow10_u128(n))
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, TruncatedPart::Zero)
    }
}

/// The increment in `{-1, 0, +1}` to add to a truncated result.
///
/// `sign` is the sign of the exact (pre-truncation) value and must be
/// non-zero whenever `truncated` is; `last_kept` supplies the parity for
/// `HalfEven`. `Unnecessary` fails when anything was discarded.
#[inline]
pub fn rounding_increment(
    mode: RoundingMode,
    sign: i32,
    last_kept: i64,
    truncated: TruncatedPart,
) -> Result<i64> {
    let sign = sign.signum() as i64;
    let inc = match mode {
        RoundingMode::Up => {
            if truncated.is_zero() {
                0
            } else {
                sign
            }
        }
        RoundingMode::Down => 0,
        RoundingMode::Ceiling => {
            if sign > 0 && !truncated.is_zero() {
                1
            } else {
                0
            }
        }
        RoundingMode::Floor => {
            if sign < 0 && !truncated.is_zero() {
                -1
            } else {
                0
            }
        }
        RoundingMode::HalfUp => {
            if truncated >= TruncatedPart::EqualToHalf {
                sign
            } else {
                0
            }
        }
        RoundingMode::HalfDown => {
            if truncated == TruncatedPart::GreaterThanHalf {
                sign
            } else {
                0
            }
        }
        RoundingMode::HalfEven => {
            if truncated == TruncatedPart::GreaterThanHalf
                || (truncated == TruncatedPart::EqualToHalf && last_kept & 1 != 0)
            {
                sign
            } else {
                0
            }
        }
        RoundingMode::Unnecessary => {
            if truncated.is_zero() {
                0
            } else {
                return Err(DecimalError::RoundingNecessary);
            }
        }
    };
    Ok(inc)
}

/// Magnitude-level form of [`rounding_increment`]: whether the truncated
/// magnitude moves one step away from zero. Used by the unsigned kernels.
#[inline]
pub(crate) fn rounds_away(
    mode: RoundingMode,
    sign: i32,
    last_kept_odd: bool,
    truncated: TruncatedPart,
) -> Result<bool> {
    Ok(rounding_increment(mode, sign, last_kept_odd as i64, truncated)? != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_part_classification() {
        assert_eq!(TruncatedPart::for_remainder(0, 100), TruncatedPart::Zero);
        assert_eq!(
            TruncatedPart::for_remainder(49, 100),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(TruncatedPart::for_remainder(50, 100), TruncatedPart::EqualToHalf);
        assert_eq!(TruncatedPart::for_remainder(51, 100), TruncatedPart::GreaterThanHalf);
        // odd divisor has no exact half
        assert_eq!(
            TruncatedPart::for_remainder(3, 7),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(TruncatedPart::for_remainder(4, 7), TruncatedPart::GreaterThanHalf);
    }

    #[test]
    fn scale19_half_point() {
        assert_eq!(
            TruncatedPart::for_scale19(5_000_000_000_000_000_000),
            TruncatedPart::EqualToHalf
        );
        assert_eq!(
            TruncatedPart::for_scale19(4_999_999_999_999_999_999),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(
            TruncatedPart::for_scale19(u64::MAX / 2 + 1),
            TruncatedPart::GreaterThanHalf
        );
    }

    #[test]
    fn pow2_half_point() {
        assert_eq!(TruncatedPart::for_pow2(4, 3), TruncatedPart::EqualToHalf);
        assert_eq!(TruncatedPart::for_pow2(3, 3), TruncatedPart::LessThanHalfButNotZero);
        assert_eq!(TruncatedPart::for_pow2(5, 3), TruncatedPart::GreaterThanHalf);
    }

    #[test]
    fn increment_table() {
        use RoundingMode::*;
        use TruncatedPart::*;
        let cases: &[(RoundingMode, i32, i64, TruncatedPart, i64)] = &[
            (Up, 1, 0, LessThanHalfButNotZero, 1),
            (Up, -1, 0, LessThanHalfButNotZero, -1),
            (Up, 1, 0, Zero, 0),
            (Down, 1, 0, GreaterThanHalf, 0),
            (Ceiling, 1, 0, LessThanHalfButNotZero, 1),
            (Ceiling, -1, 0, GreaterThanHalf, 0),
            (Floor, -1, 0, LessThanHalfButNotZero, -1),
            (Floor, 1, 0, GreaterThanHalf, 0),
            (HalfUp, 1, 0, EqualToHalf, 1),
            (HalfUp, -1, 0, EqualToHalf, -1),
            (HalfUp, 1, 0, LessThanHalfButNotZero, 0),
            (HalfDown, 1, 0, EqualToHalf, 0),
            (HalfDown, 1, 0, GreaterThanHalf, 1),
            (HalfEven, 1, 2, EqualToHalf, 0),
            (HalfEven, 1, 3, EqualToHalf, 1),
            (HalfEven, -1, -3, EqualToHalf, -1),
            (HalfEven, 1, 2, GreaterThanHalf, 1),
            (Unnecessary, 1, 0, Zero, 0),
        ];
        for &(mode, sign, last, tp, expect) in cases {
            assert_eq!(
                rounding_increment(mode, sign, last, tp).unwrap(),
                expect,
                "{:?} sign={} last={} {:?}",
                mode,
                sign,
                last,
                tp
            );
        }
        assert_eq!(
            rounding_increment(Unnecessary, 1, 0, LessThanHalfButNotZero),
            Err(DecimalError::RoundingNecessary)
        );
    }

    #[test]
    fn inverses() {
        use RoundingMode::*;
        assert_eq!(Ceiling.sign_reversion(), Floor);
        assert_eq!(Floor.sign_reversion(), Ceiling);
        assert_eq!(HalfEven.sign_reversion(), HalfEven);
        assert_eq!(Up.additive_reversion(), Down);
        assert_eq!(HalfUp.additive_reversion(), HalfDown);
        assert_eq!(Ceiling.additive_reversion(), Ceiling);
        assert_eq!(Up.reciprocal(), Down);
        assert_eq!(Ceiling.reciprocal(), Floor);
        assert_eq!(HalfDown.reciprocal(), HalfUp);
        assert_eq!(Unnecessary.reciprocal(), Unnecessary);
    }
}
