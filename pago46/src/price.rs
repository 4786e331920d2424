//! Monetary values on the wire.
//!
//! Two directions, two types:
//!
//! - [`Amount`] is what a merchant sends when creating a payment: either an
//!   integer count of minor units (CLP has no decimals) or a decimal value.
//! - [`Price`] is what comes back. The API is inconsistent about whether the
//!   price is a JSON number or a quoted decimal string (`"1000.50"`), so
//!   [`Price`] accepts both.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::num::ParseFloatError;
use std::str::FromStr;

/// A price decoded from an API response.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Price(f64);

/// Error returned when a price string is not a finite decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceParseError {
    /// The string is not a number at all.
    #[error("invalid price {input:?}: {source}")]
    Invalid {
        /// The rejected input, quotes stripped.
        input: String,
        /// The underlying float parse error.
        #[source]
        source: ParseFloatError,
    },
    /// The string parsed to NaN or an infinity.
    #[error("price must be a finite number, got {0:?}")]
    NotFinite(String),
}

impl Price {
    /// Creates a price from a float.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the price as an `f64`.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    /// Parses a decimal string, tolerating surrounding double quotes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('"');
        let value = trimmed
            .parse::<f64>()
            .map_err(|source| PriceParseError::Invalid {
                input: trimmed.to_owned(),
                source,
            })?;
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(PriceParseError::NotFinite(trimmed.to_owned()))
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Price(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }
}

/// The amount of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Amount {
    /// Integer count of the currency's minor units (e.g. `5000` CLP).
    Minor(u64),
    /// A decimal amount, sent with two fractional digits.
    Decimal(f64),
}

impl Amount {
    /// Formats the amount with exactly two fractional digits.
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        match self {
            Self::Minor(v) => format!("{:.2}", *v as f64),
            Self::Decimal(v) => format!("{v:.2}"),
        }
    }
}

impl Display for Amount {
    /// Minor units print as a bare integer, decimals with two digits.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v:.2}"),
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::Minor(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self::Minor(u64::from(value))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        price: Price,
    }

    #[test]
    fn test_price_from_quoted_string() {
        let w: Wrapper = serde_json::from_str(r#"{"price":"1000.50"}"#).unwrap();
        assert!((w.price.as_f64() - 1000.50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_from_number() {
        let w: Wrapper = serde_json::from_str(r#"{"price":5000}"#).unwrap();
        assert!((w.price.as_f64() - 5000.0).abs() < f64::EPSILON);
        let w: Wrapper = serde_json::from_str(r#"{"price":12.5}"#).unwrap();
        assert!((w.price.as_f64() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_rejects_non_numeric_string() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"price":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert!(matches!(
            "NaN".parse::<Price>(),
            Err(PriceParseError::NotFinite(_))
        ));
        assert!(matches!(
            "inf".parse::<Price>(),
            Err(PriceParseError::NotFinite(_))
        ));
    }

    #[test]
    fn test_price_from_str_strips_quotes() {
        let price: Price = "\"99.90\"".parse().unwrap();
        assert!((price.as_f64() - 99.90).abs() < f64::EPSILON);
        assert_eq!(price.to_string(), "99.90");
    }

    #[test]
    fn test_price_rejects_bool() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"price":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(Amount::from(5000_u64).to_string(), "5000");
        assert_eq!(Amount::from(10.5).to_string(), "10.50");
        assert_eq!(Amount::from(5000_u64).to_decimal_string(), "5000.00");
        assert_eq!(Amount::from(1.005_f64).to_decimal_string(), format!("{:.2}", 1.005_f64));
    }
}
