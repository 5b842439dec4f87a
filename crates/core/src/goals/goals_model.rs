//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::query::{Filterable, Predicate, PredicateBuilder, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Ongoing,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Ongoing => "ongoing",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ongoing" => Ok(GoalStatus::Ongoing),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" => Ok(GoalStatus::Cancelled),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Domain model representing a financial goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub description: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub current_amount: Decimal,
    pub status: GoalStatus,
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub description: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub target_amount: Decimal,
    pub target_date: String,
    #[serde(default, with = "crate::utils::decimal_serde::decimal_serde")]
    pub current_amount: Decimal,
    #[serde(default)]
    pub status: GoalStatus,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update of an existing goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::utils::decimal_serde::decimal_serde_option")]
    pub target_amount: Option<Decimal>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default, with = "crate::utils::decimal_serde::decimal_serde_option")]
    pub current_amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<GoalStatus>,
}

/// Validated goal column changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalChanges {
    pub description: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub current_amount: Option<Decimal>,
    pub status: Option<GoalStatus>,
}

impl GoalChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.target_amount.is_none()
            && self.target_date.is_none()
            && self.current_amount.is_none()
            && self.status.is_none()
    }

    pub fn apply_to(&self, goal: &mut Goal) {
        if let Some(description) = &self.description {
            goal.description = description.clone();
        }
        if let Some(amount) = self.target_amount {
            goal.target_amount = amount;
        }
        if let Some(date) = self.target_date {
            goal.target_date = date;
        }
        if let Some(amount) = self.current_amount {
            goal.current_amount = amount;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GoalField {
    Status,
    TargetDate,
}

impl Filterable<GoalField> for Goal {
    fn field_values(&self, field: GoalField) -> Vec<Scalar> {
        match field {
            GoalField::Status => vec![Scalar::Text(self.status.as_str().to_string())],
            GoalField::TargetDate => vec![Scalar::Date(self.target_date)],
        }
    }
}

/// Goal listing filter. Both date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalQuery {
    pub status: Option<String>,
    pub target_date_before: Option<String>,
    pub target_date_after: Option<String>,
}

impl GoalQuery {
    pub fn to_predicate(&self) -> Result<Predicate<GoalField>> {
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            GoalStatus::from_str(status)?;
        }
        Ok(PredicateBuilder::new()
            .equals(GoalField::Status, self.status.as_deref())
            .date_to(GoalField::TargetDate, self.target_date_before.as_deref())?
            .date_from(GoalField::TargetDate, self.target_date_after.as_deref())?
            .build())
    }
}
