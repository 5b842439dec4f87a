use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;

/// Which transactions an average covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountScope {
    #[default]
    All,
    Only(TransactionType),
}

impl AmountScope {
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("") => Ok(AmountScope::All),
            Some(raw) => raw.parse(),
        }
    }

    /// Value of the `type` filter, if any.
    pub fn type_filter(&self) -> Option<String> {
        match self {
            AmountScope::All => None,
            AmountScope::Only(kind) => Some(kind.as_str().to_string()),
        }
    }
}

impl FromStr for AmountScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(AmountScope::All),
            "income" | "expense" => Ok(AmountScope::Only(s.parse()?)),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown amount scope '{}' (expected all, income or expense)",
                other
            ))
            .into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, rename = "type")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageAmount {
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub average: Decimal,
    pub count: u64,
}
