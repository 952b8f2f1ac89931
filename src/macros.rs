//! Literal and const-friendly constructors for `Decimal<S>`.

#![forbid(unsafe_code)]

/// Create a `Decimal<$scale>` from a string/number literal at **runtime**.
///
/// Parses with the crate's `FromStr` impl (excess digits round half-up) and
/// panics on invalid input; use `FromStr` directly for a fallible path.
///
/// ```rust
/// # use scaled_decimal64::{dec, Decimal, F2};
/// let x = dec!(F2, "-12.34");
/// assert!(x.is_negative());
/// assert_eq!(x.to_string(), "-12.34");
/// ```
#[macro_export]
macro_rules! dec {
    ($scale:path, $lit:literal) => {{
        // Accept both string and numeric literals by stringifying the input
        // and trimming optional quotes from string literals.
        let raw = ::core::stringify!($lit);
        let s = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(raw);
        <$crate::Decimal<$scale> as ::core::str::FromStr>::from_str(s)
            .expect("invalid decimal literal for this fixed scale")
    }};
}

/// Create a `Decimal<$scale>` **in const contexts** from its signed unscaled
/// value. This avoids parsing and can be used in `const`.
///
/// ```rust
/// # use scaled_decimal64::{dec_unscaled, Decimal, F4};
/// const FEE: Decimal<F4> = dec_unscaled!(F4, -25_000); // -2.5000
/// assert!(FEE.is_negative());
/// ```
#[macro_export]
macro_rules! dec_unscaled {
    ($scale:path, $unscaled:expr) => {{
        $crate::Decimal::<$scale>::from_unscaled($unscaled)
    }};
}
