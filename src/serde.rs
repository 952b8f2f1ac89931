//! Serde support for `Decimal<S>`.
//!
//! Human-readable: string (e.g., "-12.34").
//! Binary: the signed unscaled i64 (e.g., -1234 for F2).
//!
//! Enable with crate feature `serde`.

// Note: this file is compiled as the `serde` module.
// Avoid name collisions with the external serde crate.
use ::serde as serde_crate;
extern crate alloc;
use alloc::string::{String, ToString};

use core::{fmt, marker::PhantomData, str::FromStr};

use crate::scale::ScaleMetrics;
use crate::Decimal;

use self::serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

// -------- Serialize --------

impl<S: ScaleMetrics> Serialize for Decimal<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        if serializer.is_human_readable() {
            // e.g. "-12.34" with the fixed scale's formatting.
            serializer.serialize_str(&self.to_string())
        } else {
            // Signed unscaled representation (binary-friendly).
            serializer.serialize_i64(self.unscaled())
        }
    }
}

// -------- Deserialize --------

impl<'de, S: ScaleMetrics> Deserialize<'de> for Decimal<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor<S: ScaleMetrics>(PhantomData<S>);

        impl<'de, S: ScaleMetrics> de::Visitor<'de> for Visitor<S> {
            type Value = Decimal<S>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a decimal string or a signed unscaled integer")
            }

            // Human-readable inputs
            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::<S>::from_str(s).map_err(E::custom)
            }
            fn visit_borrowed_str<E>(self, s: &'de str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_str(s)
            }
            fn visit_string<E>(self, s: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_str(&s)
            }

            // Binary (non human-readable) integer inputs
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Decimal::from_unscaled(v))
            }
            fn visit_i128<E>(self, v: i128) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::try_from(v).map_err(E::custom)
            }
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_i128(v as i128)
            }
            fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v > i64::MAX as u128 {
                    return Err(E::custom("unscaled value out of the i64 range"));
                }
                Ok(Decimal::from_unscaled(v as i64))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Visitor::<S>(PhantomData))
        } else {
            deserializer.deserialize_i64(Visitor::<S>(PhantomData))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use crate::F2;

    #[test]
    fn json_roundtrip() {
        let x = Decimal::<F2>::from_str("-12.34").unwrap();
        let s = serde_json::to_string(&x).unwrap();
        assert_eq!(s, "\"-12.34\"");
        let y: Decimal<F2> = serde_json::from_str(&s).unwrap();
        assert_eq!(y.to_string(), "-12.34");
    }
}
