//! scaled-decimal64: signed fixed-point decimals on an `i64` unscaled value.
//!
//! A `Decimal<S>` represents `unscaled * 10^-S::SCALE` for a compile-time
//! scale tag `S` in `F0..F18`. The arithmetic kernel is exposed through
//! [`arith::Arithmetic`] instances that bundle a `(scale, rounding,
//! overflow)` policy and operate directly on unscaled values.
//!
//! Modules:
//! - `arith`: arithmetic instances; operation impls spread over the kernel
//!   modules (add/mul/div/sqrt/pow/shift/round/convert/str)
//! - `scale`: scale factors and the `F0..F18` tag types
//! - `rounding`: rounding modes, truncated parts, the increment table
//! - `round`: rounding utilities and cross-scale conversion
//! - `error`: arithmetic & parse error types
//! - `serde` (feature = "serde"): Serialize/Deserialize impls
//! - `bigint` (feature = "bigint"): big-integer conversions
//! - `macros`: `dec!` and `dec_unscaled!`
//!
//! The API mirrors the fixed-scale style of the `decimal64` family: scale via
//! `ScaleMetrics` tags, `FromStr` for parsing, `Display` for formatting.

#![forbid(unsafe_code)]
#![no_std]

#[cfg(test)]
extern crate std;

use core::fmt;
use core::marker::PhantomData;

pub mod arith;
pub mod convert;
pub mod error;
pub mod macros;
pub mod pow10;
pub mod round;
pub mod rounding;
pub mod scale;
pub mod str;

mod add;
mod checked;
mod div;
mod mul;
mod ops;
mod pow;
mod shift;
mod sqrt;
mod wide;

#[cfg(feature = "bigint")]
pub mod bigint;

#[cfg(all(feature = "serde", feature = "alloc"))]
pub mod serde;

pub use crate::arith::{Arithmetic, OverflowMode};
pub use crate::convert::compare_numerically;
pub use crate::error::{DecimalError, ParseDecimalError};
pub use crate::mul::multiply_exact;
pub use crate::pow::MAX_POW_EXPONENT;
pub use crate::rounding::{RoundingMode, TruncatedPart};
pub use crate::scale::{
    scale_factor, ScaleMetrics, F0, F1, F10, F11, F12, F13, F14, F15, F16, F17, F18, F2, F3, F4,
    F5, F6, F7, F8, F9, MAX_SCALE,
};

/// A signed fixed-scale decimal: the value `unscaled * 10^-S::SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal<S: ScaleMetrics> {
    unscaled: i64,
    scale: PhantomData<S>,
}

impl<S: ScaleMetrics> Decimal<S> {
    /// Zero constant.
    pub const ZERO: Self = Self::from_unscaled(0);

    /// One constant (the value `1` in the fixed scale `S`).
    pub const ONE: Self = Self::from_unscaled(S::SCALE_FACTOR);

    /// The smallest positive value, one unit in the last place.
    pub const ULP: Self = Self::from_unscaled(1);

    /// Builds a value from its signed unscaled representation.
    #[inline]
    pub const fn from_unscaled(unscaled: i64) -> Self {
        Decimal {
            unscaled,
            scale: PhantomData,
        }
    }

    /// The signed unscaled representation.
    #[inline]
    pub const fn unscaled(&self) -> i64 {
        self.unscaled
    }

    /// The number of fractional digits of this type.
    #[inline]
    pub const fn scale() -> u8 {
        S::SCALE
    }

    /// Returns `true` if the value is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.unscaled < 0
    }

    /// Returns `true` if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.unscaled == 0
    }

    /// Returns `true` if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.unscaled > 0
    }

    /// Returns `-1`, `0`, or `1` depending on the sign.
    #[inline]
    pub const fn signum(&self) -> i8 {
        self.unscaled.signum() as i8
    }

    /// Returns a copy with the sign flipped; the unscaled minimum wraps onto
    /// itself (use [`Decimal::checked_negated`] to trap that).
    #[inline]
    pub const fn negated(self) -> Self {
        Self::from_unscaled(self.unscaled.wrapping_neg())
    }

    /// Sign flip that returns `None` for the unrepresentable negation of the
    /// unscaled minimum.
    #[inline]
    pub fn checked_negated(self) -> Option<Self> {
        self.unscaled.checked_neg().map(Self::from_unscaled)
    }

    /// Absolute value; the unscaled minimum wraps onto itself.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::from_unscaled(self.unscaled.wrapping_abs())
    }

    /// Absolute value that returns `None` for the unscaled minimum.
    #[inline]
    pub fn checked_abs(self) -> Option<Self> {
        self.unscaled.checked_abs().map(Self::from_unscaled)
    }

    /// The default policy behind the operator impls: trapping overflow with
    /// half-up rounding.
    #[inline]
    fn default_arith() -> Arithmetic {
        Arithmetic::get(S::SCALE, RoundingMode::HalfUp, OverflowMode::Checked)
    }

    #[inline]
    fn arith(mode: RoundingMode) -> Arithmetic {
        Arithmetic::get(S::SCALE, mode, OverflowMode::Checked)
    }

    /// Checked addition. Returns `None` on overflow.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Self::default_arith()
            .add(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Checked subtraction. Returns `None` on overflow.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Self::default_arith()
            .subtract(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Checked multiplication, rounding half-up. Returns `None` on overflow.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::default_arith()
            .multiply(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Checked division, rounding half-up. Returns `None` on a zero divisor
    /// or overflow.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Self::default_arith()
            .divide(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Multiplication under an explicit rounding mode.
    #[inline]
    pub fn mul_rounded(self, rhs: Self, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .multiply(self.unscaled, rhs.unscaled)
            .map(Self::from_unscaled)
    }

    /// Division under an explicit rounding mode.
    #[inline]
    pub fn div_rounded(self, rhs: Self, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .divide(self.unscaled, rhs.unscaled)
            .map(Self::from_unscaled)
    }

    /// The square root under an explicit rounding mode.
    #[inline]
    pub fn sqrt(self, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode).sqrt(self.unscaled).map(Self::from_unscaled)
    }

    /// `self^n` under an explicit rounding mode.
    #[inline]
    pub fn pow(self, n: i32, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .pow(self.unscaled, n)
            .map(Self::from_unscaled)
    }

    /// `1 / self` under an explicit rounding mode.
    #[inline]
    pub fn invert(self, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .invert(self.unscaled)
            .map(Self::from_unscaled)
    }

    /// The average of `self` and `other`, never overflowing.
    #[inline]
    pub fn avg(self, other: Self, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .avg(self.unscaled, other.unscaled)
            .map(Self::from_unscaled)
    }

    /// `round(self * 2^n)`.
    #[inline]
    pub fn shift_left(self, n: i32, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .shift_left(self.unscaled, n)
            .map(Self::from_unscaled)
    }

    /// `round(self / 2^n)`.
    #[inline]
    pub fn shift_right(self, n: i32, mode: RoundingMode) -> error::Result<Self> {
        Self::arith(mode)
            .shift_right(self.unscaled, n)
            .map(Self::from_unscaled)
    }

    /// Builds the value `v` (an integer), failing when it does not fit.
    #[inline]
    pub fn try_from_int(v: i64) -> error::Result<Self> {
        Self::default_arith().from_long(v).map(Self::from_unscaled)
    }

    /// The nearest `f64` to this value.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        Self::default_arith().to_f64(self.unscaled)
    }

    /// The nearest `f32` to this value.
    #[inline]
    pub fn to_f32(&self) -> f32 {
        Self::default_arith().to_f32(self.unscaled)
    }
}

// --- Formatting ---

impl<S: ScaleMetrics> fmt::Display for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::str::format_unscaled(self.unscaled, S::SCALE, f)
    }
}

// --- Unary negation ---

impl<S: ScaleMetrics> core::ops::Neg for Decimal<S> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

// --- Conversions from unscaled integers and floats ---

impl<S: ScaleMetrics> core::convert::TryFrom<i128> for Decimal<S> {
    type Error = DecimalError;
    /// Interprets `value` as a signed unscaled representation.
    #[inline]
    fn try_from(value: i128) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(Self::from_unscaled)
            .map_err(|_| DecimalError::InvalidArgument("unscaled value out of the i64 range"))
    }
}

impl<S: ScaleMetrics> core::convert::TryFrom<f64> for Decimal<S> {
    type Error = DecimalError;
    /// Rounds the double to this scale half-up; non-finite input fails.
    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::default_arith().from_f64(value).map(Self::from_unscaled)
    }
}

impl<S: ScaleMetrics> core::convert::TryFrom<f32> for Decimal<S> {
    type Error = DecimalError;
    /// Rounds the float to this scale half-up; non-finite input fails.
    #[inline]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::default_arith().from_f32(value).map(Self::from_unscaled)
    }
}

// Public prelude for convenience.
pub mod prelude {
    pub use crate::{
        Arithmetic, Decimal, OverflowMode, RoundingMode, ScaleMetrics, F0, F1, F10, F11, F12, F13,
        F14, F15, F16, F17, F18, F2, F3, F4, F5, F6, F7, F8, F9,
    };
}
