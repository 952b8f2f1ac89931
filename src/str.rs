//! Canonical string form: formatting with exactly `scale` fractional digits
//! and parsing with excess digits rounded in.

use core::fmt;

use crate::arith::Arithmetic;
use crate::error::{DecimalError, ParseDecimalError, Result};
use crate::rounding::{rounds_away, RoundingMode, TruncatedPart};
use crate::scale::scale_factor;

/// Writes `u * 10^-scale` canonically: optional `-`, the integer digits
/// (at least one), and for a positive scale a point followed by exactly
/// `scale` fraction digits.
pub fn format_unscaled<W: fmt::Write>(u: i64, scale: u8, w: &mut W) -> fmt::Result {
    if scale == 0 {
        return write!(w, "{}", u);
    }
    let m = u.unsigned_abs();
    let unit = scale_factor(scale) as u64;
    if u < 0 {
        w.write_char('-')?;
    }
    write!(
        w,
        "{}.{:0width$}",
        m / unit,
        m % unit,
        width = scale as usize
    )
}

/// Display adapter for an unscaled value at a given scale.
#[derive(Debug, Clone, Copy)]
pub struct DisplayUnscaled {
    unscaled: i64,
    scale: u8,
}

impl DisplayUnscaled {
    #[inline]
    pub(crate) const fn new(unscaled: i64, scale: u8) -> Self {
        DisplayUnscaled { unscaled, scale }
    }
}

impl fmt::Display for DisplayUnscaled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_unscaled(self.unscaled, self.scale, f)
    }
}

/// Parses `[+|-] (d* (. d*)? | . d+)` into an unscaled value at `scale`.
///
/// A short fraction is zero-padded; digits beyond `scale` classify into a
/// truncated part and round per `mode`. Accumulation runs on the negative
/// side so `i64::MIN` parses exactly.
pub(crate) fn parse_unscaled(
    s: &str,
    scale: u8,
    mode: RoundingMode,
) -> core::result::Result<i64, ParseDecimalError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    let (neg, mut i) = match bytes[0] {
        b'+' => (false, 1),
        b'-' => (true, 1),
        _ => (false, 0),
    };
    if i == bytes.len() {
        return Err(ParseDecimalError::Empty);
    }
    let mut int_neg: i64 = 0;
    let mut any_digits = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        let d = (bytes[i] - b'0') as i64;
        int_neg = int_neg
            .checked_mul(10)
            .and_then(|v| v.checked_sub(d))
            .ok_or(ParseDecimalError::MagnitudeOverflow)?;
        any_digits = true;
        i += 1;
    }
    let mut frac_neg: i64 = 0;
    let mut taken: u8 = 0;
    let mut first_excess: Option<u8> = None;
    let mut excess_tail_nonzero = false;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            let d = bytes[i] - b'0';
            if taken < scale {
                frac_neg = frac_neg * 10 - d as i64;
                taken += 1;
            } else if first_excess.is_none() {
                first_excess = Some(d);
            } else if d != 0 {
                excess_tail_nonzero = true;
            }
            any_digits = true;
            i += 1;
        }
    }
    if i < bytes.len() {
        return Err(ParseDecimalError::InvalidCharacter { at: i });
    }
    if !any_digits {
        return Err(ParseDecimalError::Empty);
    }
    if taken < scale {
        frac_neg *= scale_factor((scale - taken) as u8);
    }
    let total_neg = int_neg
        .checked_mul(scale_factor(scale))
        .and_then(|v| v.checked_add(frac_neg))
        .ok_or(ParseDecimalError::MagnitudeOverflow)?;
    let tp = match first_excess {
        None => TruncatedPart::Zero,
        Some(0) if !excess_tail_nonzero => TruncatedPart::Zero,
        Some(5) if !excess_tail_nonzero => TruncatedPart::EqualToHalf,
        Some(d) if d >= 5 => TruncatedPart::GreaterThanHalf,
        Some(_) => TruncatedPart::LessThanHalfButNotZero,
    };
    let sign = if neg { -1 } else { 1 };
    let away = rounds_away(mode, sign, total_neg & 1 != 0, tp)
        .map_err(|_| ParseDecimalError::RoundingNecessary)?;
    let total_neg = total_neg
        .checked_sub(away as i64)
        .ok_or(ParseDecimalError::MagnitudeOverflow)?;
    if neg {
        Ok(total_neg)
    } else {
        total_neg
            .checked_neg()
            .ok_or(ParseDecimalError::MagnitudeOverflow)
    }
}

impl Arithmetic {
    /// Parses a decimal literal into an unscaled value, applying this
    /// instance's rounding to excess fractional digits.
    pub fn parse(&self, s: &str) -> Result<i64> {
        parse_unscaled(s, self.scale(), self.rounding()).map_err(|e| match e {
            ParseDecimalError::RoundingNecessary => DecimalError::RoundingNecessary,
            ParseDecimalError::Empty => DecimalError::InvalidArgument("empty decimal literal"),
            ParseDecimalError::InvalidCharacter { .. } => {
                DecimalError::InvalidArgument("malformed decimal literal")
            }
            ParseDecimalError::MagnitudeOverflow => DecimalError::InvalidArgument(
                "decimal literal magnitude does not fit at this scale",
            ),
        })
    }

    /// Writes the canonical form of `u` at this scale.
    #[inline]
    pub fn format_into<W: fmt::Write>(&self, u: i64, w: &mut W) -> fmt::Result {
        format_unscaled(u, self.scale(), w)
    }

    /// A `Display` adapter for `u` at this scale.
    #[inline]
    pub fn display(&self, u: i64) -> DisplayUnscaled {
        DisplayUnscaled::new(u, self.scale())
    }
}
