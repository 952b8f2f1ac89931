use core::str::FromStr;
use scaled_decimal64::{Decimal, RoundingMode, F2, F4};

#[test]
fn smoke_add_roundtrip() {
    let a = Decimal::<F2>::from_str("12.34").unwrap();
    let b = Decimal::<F2>::from_str("-0.34").unwrap();
    assert_eq!((a + b).to_string(), "12.00");
    assert_eq!((a - b).to_string(), "12.68");
}

#[test]
fn macro_numeric_literal() {
    use scaled_decimal64::dec;
    let x = dec!(F2, -12.34);
    assert!(x.is_negative());
    assert_eq!(x.to_string(), "-12.34");
}

#[test]
fn smoke_rounding() {
    let x = Decimal::<F4>::from_str("-1.2350").unwrap();
    assert_eq!(x.round_dp(2, RoundingMode::HalfEven).to_string(), "-1.2400");
    assert_eq!(x.round_dp(2, RoundingMode::HalfUp).to_string(), "-1.2400");
    assert_eq!(x.ceil().to_string(), "-1.0000");
    assert_eq!(x.floor().to_string(), "-2.0000");
}

#[test]
fn smoke_mul_div() {
    let a = Decimal::<F2>::from_str("1.50").unwrap();
    let b = Decimal::<F2>::from_str("-0.50").unwrap();
    assert_eq!((a * b).to_string(), "-0.75");
    assert_eq!((a / b).to_string(), "-3.00");
    assert_eq!(a.sqrt(RoundingMode::HalfEven).unwrap().to_string(), "1.22");
}

#[test]
fn signed_helpers() {
    let x = Decimal::<F2>::from_str("-3.50").unwrap();
    assert!(x.is_negative());
    assert_eq!(x.signum(), -1);
    assert_eq!(x.abs().to_string(), "3.50");
    assert_eq!((-x).to_string(), "3.50");
    assert_eq!(x.negated().negated(), x);
    assert!(Decimal::<F2>::ZERO.checked_negated().unwrap().is_zero());
}
