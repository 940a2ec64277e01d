//! Lenient field decoders for payloads produced by the blog API.
//!
//! The API serializes database rows as-is: counts come back as strings,
//! `ceil()` results as floats, and unset columns as `null`. These helpers are
//! used through `#[serde(deserialize_with = ...)]`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::TypeError;

/// Integers accepted as JSON integers, integral floats, or numeric strings.
///
/// Values outside the `i64` range are rejected, never clamped.
pub mod int {
    use super::*;

    /// 2^63, the first float above the `i64` range.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    struct LenientInt;

    impl<'de> Visitor<'de> for LenientInt {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, an integral float, or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(invalid(format!("{v} out of range"))))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            from_float(v).ok_or_else(|| E::custom(invalid(format!("{v} is not an integer"))))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            parse(v).map_err(E::custom)
        }
    }

    fn invalid(detail: String) -> TypeError {
        TypeError::InvalidInteger(detail)
    }

    fn from_float(v: f64) -> Option<i64> {
        // NaN and infinities fail both the fract and the range checks.
        (v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v)).then_some(v as i64)
    }

    /// Parse a numeric string, tolerating surrounding whitespace and a
    /// trailing `.0`.
    pub fn parse(raw: &str) -> Result<i64, TypeError> {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(v);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(from_float)
            .ok_or_else(|| invalid(format!("{raw:?} is not an integer")))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        let value = deserializer.deserialize_any(LenientInt)?;
        T::try_from(value).map_err(|_| de::Error::custom(invalid(format!("{value} out of range"))))
    }
}

/// Strings where `null` means empty.
pub mod text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
