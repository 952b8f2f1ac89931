//! Arithmetic instances: a `(scale, rounding, overflow)` policy bundle.
//
// An instance is a plain `Copy` value; `get` hands one out on demand, which
// makes the 19 x 8 x 2 policy space available without any process-wide
// storage. The operation implementations live in `impl Arithmetic` blocks
// spread over the kernel modules (`add`, `mul`, `div`, `sqrt`, `pow`,
// `shift`, `round`, `convert`, `str`).

use crate::checked;
use crate::error::{DecimalError, Result};
use crate::rounding::RoundingMode;
use crate::scale::{scale_factor, MAX_SCALE};

/// Whether arithmetic traps on `i64` overflow or wraps silently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverflowMode {
    /// Results wrap to the two's-complement value.
    Unchecked,
    /// Overflow fails with a diagnostic [`DecimalError::Overflow`].
    Checked,
}

/// An immutable arithmetic policy over unscaled `i64` values.
///
/// All operations are pure functions of their operands and this policy;
/// instances are freely shareable and trivially `Copy`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arithmetic {
    scale: u8,
    rounding: RoundingMode,
    overflow: OverflowMode,
}

impl Arithmetic {
    /// Returns the instance for `scale ∈ [0, 18]`.
    ///
    /// Panics on an out-of-range scale; use [`Arithmetic::try_get`] for a
    /// fallible lookup.
    #[inline]
    pub const fn get(scale: u8, rounding: RoundingMode, overflow: OverflowMode) -> Self {
        assert!(scale <= MAX_SCALE, "scale must be in 0..=18");
        Arithmetic {
            scale,
            rounding,
            overflow,
        }
    }

    /// Fallible form of [`Arithmetic::get`].
    #[inline]
    pub const fn try_get(
        scale: u8,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self> {
        if scale > MAX_SCALE {
            return Err(DecimalError::InvalidArgument("scale must be in 0..=18"));
        }
        Ok(Arithmetic {
            scale,
            rounding,
            overflow,
        })
    }

    /// The number of fractional digits.
    #[inline]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// The rounding mode applied when an operation loses precision.
    #[inline]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// The overflow mode.
    #[inline]
    pub const fn overflow(&self) -> OverflowMode {
        self.overflow
    }

    /// The same policy with a different rounding mode.
    #[inline]
    pub const fn with_rounding(self, rounding: RoundingMode) -> Self {
        Arithmetic {
            scale: self.scale,
            rounding,
            overflow: self.overflow,
        }
    }

    /// The unscaled representation of one, `10^scale`.
    #[inline]
    pub const fn one(&self) -> i64 {
        scale_factor(self.scale)
    }

    #[inline]
    pub(crate) const fn is_checked(&self) -> bool {
        matches!(self.overflow, OverflowMode::Checked)
    }

    /// Re-contextualises a lower-level failure for a composed operation:
    /// overflow is re-wrapped with the enclosing operation's operands, every
    /// other kind is rethrown unchanged.
    #[inline]
    pub(crate) fn wrap_err(
        &self,
        e: DecimalError,
        op: &'static str,
        a: i64,
        b: Option<i64>,
    ) -> DecimalError {
        if e.passes_through() {
            e
        } else {
            DecimalError::overflow(op, a, b, self.scale)
        }
    }

    /// `-u`, wrapping at `i64::MIN` in unchecked mode.
    #[inline]
    pub fn negate(&self, u: i64) -> Result<i64> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(u.wrapping_neg()),
            OverflowMode::Checked => {
                checked::neg(u).map_err(|e| self.wrap_err(e, "-", u, None))
            }
        }
    }

    /// `|u|`, wrapping at `i64::MIN` in unchecked mode.
    #[inline]
    pub fn abs(&self, u: i64) -> Result<i64> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(u.wrapping_abs()),
            OverflowMode::Checked => {
                checked::abs(u).map_err(|e| self.wrap_err(e, "abs", u, None))
            }
        }
    }
}
