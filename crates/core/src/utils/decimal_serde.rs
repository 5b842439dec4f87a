//! Serde adapters that carry `Decimal` values as strings on the wire.
//!
//! Amounts leave the API as normalized decimal strings (`"15.5"`, never
//! `"15.50"` or a float) and are accepted either as strings or JSON numbers.

use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawDecimal {
    fn into_decimal(self) -> Result<Decimal, String> {
        match self {
            RawDecimal::Text(s) => {
                Decimal::from_str(s.trim()).map_err(|_| format!("Invalid Decimal '{}'", s))
            }
            RawDecimal::Integer(i) => Ok(Decimal::from(i)),
            // Display gives the shortest round-trip form, so 0.1 stays 0.1.
            RawDecimal::Float(f) => {
                Decimal::from_str(&f.to_string()).map_err(|_| format!("Invalid Decimal {}", f))
            }
        }
    }
}

/// Renders a decimal without trailing zeros.
pub fn decimal_to_string(value: &Decimal) -> String {
    value.normalize().to_string()
}

pub mod decimal_serde {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&decimal_to_string(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawDecimal::deserialize(deserializer)?
            .into_decimal()
            .map_err(D::Error::custom)
    }
}

pub mod decimal_serde_option {
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&decimal_to_string(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A blank string means the field was left out.
        match Option::<RawDecimal>::deserialize(deserializer)? {
            Some(RawDecimal::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => raw.into_decimal().map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
