//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::query::{Filterable, Predicate, PredicateBuilder, Scalar, SortDirection};

/// Income or expense. The sole discriminator of a transaction; the sign of
/// the amount carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            ))
            .into()),
        }
    }
}

/// Domain model representing a recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub member_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub member_id: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update; absent or empty fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(
        default,
        with = "crate::utils::decimal_serde::decimal_serde_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
}

/// Validated column changes handed to the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChanges {
    pub amount: Option<Decimal>,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub member_id: Option<String>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.transaction_type.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.member_id.is_none()
    }
}

/// Fields a transaction predicate can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionField {
    Date,
    Type,
    Category,
    MemberId,
}

impl Filterable<TransactionField> for Transaction {
    fn field_values(&self, field: TransactionField) -> Vec<Scalar> {
        match field {
            TransactionField::Date => vec![Scalar::Date(self.date)],
            TransactionField::Type => {
                vec![Scalar::Text(self.transaction_type.as_str().to_string())]
            }
            TransactionField::Category => vec![Scalar::Text(self.category.clone())],
            TransactionField::MemberId => self
                .member_id
                .clone()
                .map(Scalar::Text)
                .into_iter()
                .collect(),
        }
    }
}

/// Columns a transaction listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSortField {
    Date,
    Amount,
    Category,
    Type,
    Description,
    MemberId,
}

impl TransactionSortField {
    /// Absent or empty means "insertion order".
    pub fn parse(value: Option<&str>) -> Result<Option<Self>> {
        let field = match value {
            None | Some("") => return Ok(None),
            Some("date") => TransactionSortField::Date,
            Some("amount") => TransactionSortField::Amount,
            Some("category") => TransactionSortField::Category,
            Some("type") => TransactionSortField::Type,
            Some("description") => TransactionSortField::Description,
            Some("memberId") => TransactionSortField::MemberId,
            Some(other) => {
                return Err(ValidationError::InvalidInput(format!(
                    "Cannot sort transactions by '{}'",
                    other
                ))
                .into())
            }
        };
        Ok(Some(field))
    }
}

/// Field a group-by-sum partitions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionGroupBy {
    Category,
    MemberId,
    Type,
}

impl FromStr for TransactionGroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "category" => Ok(TransactionGroupBy::Category),
            "memberId" => Ok(TransactionGroupBy::MemberId),
            "type" => Ok(TransactionGroupBy::Type),
            other => Err(ValidationError::InvalidInput(format!(
                "Cannot group transactions by '{}'",
                other
            ))
            .into()),
        }
    }
}

impl TransactionGroupBy {
    pub fn key_of(&self, transaction: &Transaction) -> Option<String> {
        match self {
            TransactionGroupBy::Category => Some(transaction.category.clone()),
            TransactionGroupBy::MemberId => transaction.member_id.clone(),
            TransactionGroupBy::Type => Some(transaction.transaction_type.as_str().to_string()),
        }
    }
}

/// Optional filter parameters shared by list, sum and count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub member_id: Option<String>,
}

impl TransactionFilter {
    pub fn to_predicate(&self) -> Result<Predicate<TransactionField>> {
        if let Some(kind) = self.transaction_type.as_deref().filter(|k| !k.is_empty()) {
            TransactionType::from_str(kind)?;
        }
        Ok(PredicateBuilder::new()
            .date_from(TransactionField::Date, self.start_date.as_deref())?
            .date_to(TransactionField::Date, self.end_date.as_deref())?
            .equals(TransactionField::Type, self.transaction_type.as_deref())
            .equals(TransactionField::Category, self.category.as_deref())
            .id_equals(TransactionField::MemberId, self.member_id.as_deref())?
            .build())
    }
}

/// Query parameters of a transaction listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub member_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::utils::count_serde::optional_count"
    )]
    pub limit: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::utils::count_serde::optional_count"
    )]
    pub skip: Option<u64>,
}

impl TransactionQuery {
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            transaction_type: self.transaction_type.clone(),
            category: self.category.clone(),
            member_id: self.member_id.clone(),
        }
    }

    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::parse(self.sort_order.as_deref())
    }
}

/// Query parameters of a group-by-sum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionGroupQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub group_by: String,
}

impl TransactionGroupQuery {
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            transaction_type: self.transaction_type.clone(),
            ..TransactionFilter::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Condition;

    #[test]
    fn type_serializes_under_type_key() {
        let json = serde_json::json!({
            "amount": 12.5,
            "type": "expense",
            "category": "Food",
            "date": "2024-01-15"
        });
        let new: NewTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(new.transaction_type, TransactionType::Expense);
        assert_eq!(new.amount.to_string(), "12.5");
        assert!(new.member_id.is_none());
        assert_eq!(new.description, "");
    }

    #[test]
    fn unknown_type_is_a_validation_error() {
        let filter = TransactionFilter {
            transaction_type: Some("transfer".to_string()),
            ..Default::default()
        };
        assert!(matches!(filter.to_predicate(), Err(Error::Validation(_))));
    }

    #[test]
    fn filter_emits_only_supplied_fields() {
        let filter = TransactionFilter {
            end_date: Some("2024-01-31".to_string()),
            category: Some("Food".to_string()),
            member_id: Some(String::new()),
            ..Default::default()
        };
        let predicate = filter.to_predicate().unwrap();
        assert_eq!(predicate.len(), 2);
        assert!(matches!(
            predicate.get(TransactionField::Date),
            Some(Condition::Range { gte: None, lte: Some(_) })
        ));
        assert!(predicate.get(TransactionField::Type).is_none());
        assert!(predicate.get(TransactionField::MemberId).is_none());
    }

    #[test]
    fn sort_fields_are_whitelisted() {
        assert_eq!(TransactionSortField::parse(None).unwrap(), None);
        assert_eq!(
            TransactionSortField::parse(Some("memberId")).unwrap(),
            Some(TransactionSortField::MemberId)
        );
        assert!(TransactionSortField::parse(Some("amount; DROP")).is_err());
        assert!("payee".parse::<TransactionGroupBy>().is_err());
    }

    #[test]
    fn blank_listing_window_is_unbounded() {
        let query: TransactionQuery =
            serde_json::from_value(serde_json::json!({"limit": "", "skip": "", "sortBy": "date"}))
                .unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.skip, None);
        assert_eq!(query.sort_by.as_deref(), Some("date"));
    }

    #[test]
    fn blank_amount_update_is_untouched() {
        let update: TransactionUpdate =
            serde_json::from_value(serde_json::json!({"amount": "", "category": "Food"}))
                .unwrap();
        assert_eq!(update.amount, None);
        assert_eq!(update.category.as_deref(), Some("Food"));
    }
}
