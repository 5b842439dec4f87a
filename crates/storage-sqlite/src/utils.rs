//! Helpers shared by the repositories: predicate condition decoding and
//! conversion of TEXT-encoded decimals and JSON lists.

use chrono::NaiveDate;
use hearth_core::errors::{DatabaseError, Error, Result};
use hearth_core::query::{Condition, Scalar};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

use crate::errors::IntoCore;

fn unsupported(condition: &Condition) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "Unsupported condition for this column: {:?}",
        condition
    )))
}

/// Inclusive date bounds of a condition. Equality pins both ends.
pub fn date_bounds(condition: &Condition) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    match condition {
        Condition::Eq(value) => {
            let day = value.as_date().ok_or_else(|| unsupported(condition))?;
            Ok((Some(day), Some(day)))
        }
        Condition::Range { gte, lte } => {
            let bound = |side: &Option<Scalar>| match side {
                None => Ok(None),
                Some(value) => value.as_date().map(Some).ok_or_else(|| unsupported(condition)),
            };
            Ok((bound(gte)?, bound(lte)?))
        }
    }
}

/// Value of a text equality condition.
pub fn text_equals(condition: &Condition) -> Result<String> {
    match condition {
        Condition::Eq(Scalar::Text(value)) => Ok(value.clone()),
        other => Err(unsupported(other)),
    }
}

/// Decimals are stored as TEXT to keep them exact.
pub fn parse_stored_decimal(column: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Stored {} '{}' is not a decimal: {}",
            column, raw, e
        )))
    })
}

pub fn to_json_text<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).into_core()
}

pub fn from_json_text<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).into_core()
}
