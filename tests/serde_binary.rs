#![cfg(feature = "serde")]
use core::str::FromStr;
use scaled_decimal64::{Decimal, F2};

#[test]
fn bincode_uses_the_unscaled_form() {
    let config = bincode::config::standard();
    let x = Decimal::<F2>::from_str("-12.34").unwrap();
    let bytes = bincode::serde::encode_to_vec(x, config).unwrap();
    let (y, _): (Decimal<F2>, usize) =
        bincode::serde::decode_from_slice(&bytes, config).unwrap();
    assert_eq!(x, y);
    assert_eq!(y.unscaled(), -1234);
}
