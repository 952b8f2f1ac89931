//! Error types for the arithmetic kernel and a `FromStr` impl for `Decimal`.

#![forbid(unsafe_code)]

use core::{fmt, str::FromStr};

use crate::scale::ScaleMetrics;
use crate::str::DisplayUnscaled;
use crate::Decimal;

/// Errors raised by the arithmetic kernel.
///
/// `Overflow` is only produced in `OverflowMode::Checked`; the remaining
/// kinds are raised in both overflow modes. Operand-bearing variants carry
/// the unscaled operands and the scale of the failing operation so the
/// `Display` form shows the operands as decimal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    /// Division or `invert` with a zero divisor.
    DivisionByZero {
        op: &'static str,
        a: i64,
        scale: u8,
    },
    /// The mathematical result does not fit in the unscaled `i64`.
    Overflow {
        op: &'static str,
        a: i64,
        b: Option<i64>,
        scale: u8,
    },
    /// `RoundingMode::Unnecessary` was requested but a discarded digit is
    /// non-zero.
    RoundingNecessary,
    /// `sqrt` of a negative value.
    SquareRootOfNegative { a: i64, scale: u8 },
    /// Malformed input: scale out of range, precision below `scale - 18`,
    /// pow exponent out of range, non-finite float, or an ill-formed literal.
    InvalidArgument(&'static str),
}

impl DecimalError {
    #[inline]
    pub(crate) const fn overflow(op: &'static str, a: i64, b: Option<i64>, scale: u8) -> Self {
        DecimalError::Overflow { op, a, b, scale }
    }

    #[inline]
    pub(crate) const fn division_by_zero(op: &'static str, a: i64, scale: u8) -> Self {
        DecimalError::DivisionByZero { op, a, scale }
    }

    /// True for the kinds that must pass through composed operations
    /// unchanged instead of being re-wrapped as `Overflow`.
    #[inline]
    pub(crate) const fn passes_through(&self) -> bool {
        !matches!(self, DecimalError::Overflow { .. })
    }
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DecimalError::DivisionByZero { op, a, scale } => {
                write!(f, "division by zero: {} {} 0", DisplayUnscaled::new(a, scale), op)
            }
            DecimalError::Overflow { op, a, b: Some(b), scale } => write!(
                f,
                "overflow: {} {} {}",
                DisplayUnscaled::new(a, scale),
                op,
                DisplayUnscaled::new(b, scale)
            ),
            DecimalError::Overflow { op, a, b: None, scale } => {
                write!(f, "overflow: {}({})", op, DisplayUnscaled::new(a, scale))
            }
            DecimalError::RoundingNecessary => f.write_str("rounding necessary"),
            DecimalError::SquareRootOfNegative { a, scale } => {
                write!(f, "square root of negative value: {}", DisplayUnscaled::new(a, scale))
            }
            DecimalError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

/// Error returned when parsing a `Decimal<S>` from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// Empty or only a sign.
    Empty,
    /// A character that is neither a digit nor a single decimal point.
    InvalidCharacter { at: usize },
    /// The literal's magnitude does not fit at the target scale.
    MagnitudeOverflow,
    /// Excess fractional digits under `RoundingMode::Unnecessary`.
    RoundingNecessary,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDecimalError::Empty => f.write_str("empty string"),
            ParseDecimalError::InvalidCharacter { at } => {
                write!(f, "invalid character at offset {}", at)
            }
            ParseDecimalError::MagnitudeOverflow => {
                f.write_str("magnitude does not fit at this fixed scale")
            }
            ParseDecimalError::RoundingNecessary => {
                f.write_str("fractional digits beyond the fixed scale require rounding")
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, DecimalError>;

impl<S: ScaleMetrics> FromStr for Decimal<S> {
    type Err = ParseDecimalError;

    /// Parses the canonical decimal syntax, rounding excess fractional
    /// digits half-up.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let unscaled =
            crate::str::parse_unscaled(s.trim(), S::SCALE, crate::rounding::RoundingMode::HalfUp)?;
        Ok(Decimal::from_unscaled(unscaled))
    }
}
