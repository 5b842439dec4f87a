//! Budget domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ValidationError};

/// Planned spend for a date window.
///
/// The `(start_date, end_date)` pair identifies a budget; `end_date >=
/// start_date` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: Vec<BudgetCategory>,
}

impl Budget {
    /// Inclusive interval overlap: touching on a single day counts.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub category: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub amount: Decimal,
}

/// Input for creating or overwriting the budget of an exact window.
///
/// `categories` is either a JSON array or a string containing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpsert {
    pub start_date: String,
    pub end_date: String,
    pub categories: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWindow {
    pub start_date: String,
    pub end_date: String,
}

fn malformed(reason: impl ToString) -> ValidationError {
    ValidationError::MalformedPayload {
        field: "categories".to_string(),
        reason: reason.to_string(),
    }
}

/// Validates a budget's category allocations.
pub fn parse_budget_categories(payload: &Value) -> Result<Vec<BudgetCategory>> {
    let parsed;
    let value = match payload {
        Value::String(raw) => {
            parsed = serde_json::from_str::<Value>(raw).map_err(malformed)?;
            &parsed
        }
        other => other,
    };
    if !value.is_array() {
        return Err(malformed("expected an array of {category, amount}").into());
    }
    let categories: Vec<BudgetCategory> =
        serde_json::from_value(value.clone()).map_err(malformed)?;
    if categories.iter().any(|c| c.category.trim().is_empty()) {
        return Err(malformed("category names cannot be empty").into());
    }
    Ok(categories)
}
