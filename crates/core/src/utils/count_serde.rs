//! Lenient parsing of optional counts such as `limit` and `skip`.
//!
//! Query strings deliver every value as text, so `?limit=` arrives as an
//! empty string. Blank counts read as absent.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(u64),
    Text(String),
}

pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Number(n)) => Ok(Some(n)),
        Some(RawCount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawCount::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("Invalid count '{}'", s))),
        None => Ok(None),
    }
}
