//! Household member domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result, ValidationError};
use crate::ids::RecordId;
use crate::query::{Filterable, Predicate, PredicateBuilder, Scalar};

/// A member of the single shared household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub income: Decimal,
    pub income_streams: Vec<String>,
    /// Free-form expense references.
    pub expenses: Vec<String>,
    /// Goal ids.
    pub financial_goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHouseholdMember {
    pub name: String,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub income: Decimal,
    #[serde(default)]
    pub income_streams: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<String>,
    #[serde(default)]
    pub financial_goals: Vec<String>,
}

/// Partial member update. List fields take a JSON array of strings, or a
/// string holding one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMemberUpdate {
    #[serde(default, with = "crate::utils::decimal_serde::decimal_serde_option")]
    pub income: Option<Decimal>,
    #[serde(default)]
    pub income_streams: Option<Value>,
    #[serde(default)]
    pub expenses: Option<Value>,
    #[serde(default)]
    pub financial_goals: Option<Value>,
}

/// Validated member changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberChanges {
    pub income: Option<Decimal>,
    pub income_streams: Option<Vec<String>>,
    pub expenses: Option<Vec<String>>,
    pub financial_goals: Option<Vec<String>>,
}

impl MemberChanges {
    pub fn is_empty(&self) -> bool {
        self.income.is_none()
            && self.income_streams.is_none()
            && self.expenses.is_none()
            && self.financial_goals.is_none()
    }

    pub fn apply_to(&self, member: &mut HouseholdMember) {
        if let Some(income) = self.income {
            member.income = income;
        }
        if let Some(streams) = &self.income_streams {
            member.income_streams = streams.clone();
        }
        if let Some(expenses) = &self.expenses {
            member.expenses = expenses.clone();
        }
        if let Some(goals) = &self.financial_goals {
            member.financial_goals = goals.clone();
        }
    }
}

impl HouseholdMemberUpdate {
    pub fn into_changes(self) -> Result<MemberChanges> {
        let parse = |field: &str, value: Option<Value>| {
            value
                .filter(|v| !matches!(v, Value::String(s) if s.trim().is_empty()))
                .map(|v| parse_string_list(field, &v))
                .transpose()
        };
        let financial_goals = parse("financialGoals", self.financial_goals)?;
        if let Some(goals) = &financial_goals {
            validate_goal_ids(goals)?;
        }
        Ok(MemberChanges {
            income: self.income,
            income_streams: parse("incomeStreams", self.income_streams)?,
            expenses: parse("expenses", self.expenses)?,
            financial_goals,
        })
    }
}

/// Parses a JSON array of strings, or a string containing one.
pub fn parse_string_list(field: &str, payload: &Value) -> Result<Vec<String>> {
    let malformed = |reason: String| ValidationError::MalformedPayload {
        field: field.to_string(),
        reason,
    };
    let decoded;
    let value = match payload {
        Value::String(raw) => {
            decoded = serde_json::from_str::<Value>(raw).map_err(|e| malformed(e.to_string()))?;
            &decoded
        }
        other => other,
    };
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::from(malformed(format!("expected a string, got {}", item))))
            })
            .collect(),
        _ => Err(malformed("expected an array of strings".to_string()).into()),
    }
}

pub(crate) fn validate_goal_ids(goals: &[String]) -> Result<()> {
    for goal in goals {
        RecordId::parse(goal)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberField {
    Income,
    IncomeStream,
}

impl Filterable<MemberField> for HouseholdMember {
    fn field_values(&self, field: MemberField) -> Vec<Scalar> {
        match field {
            MemberField::Income => vec![Scalar::Amount(self.income)],
            MemberField::IncomeStream => self
                .income_streams
                .iter()
                .cloned()
                .map(Scalar::Text)
                .collect(),
        }
    }
}

/// Member listing filter. Income bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberQuery {
    pub min_income: Option<String>,
    pub max_income: Option<String>,
    pub income_stream: Option<String>,
}

impl MemberQuery {
    pub fn to_predicate(&self) -> Result<Predicate<MemberField>> {
        Ok(PredicateBuilder::new()
            .amount_from(MemberField::Income, self.min_income.as_deref())?
            .amount_to(MemberField::Income, self.max_income.as_deref())?
            .equals(MemberField::IncomeStream, self.income_stream.as_deref())
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn member(income: Decimal, streams: &[&str]) -> HouseholdMember {
        HouseholdMember {
            id: RecordId::generate().to_string(),
            name: "Sam".to_string(),
            income,
            income_streams: streams.iter().map(|s| s.to_string()).collect(),
            expenses: vec![],
            financial_goals: vec![],
        }
    }

    #[test]
    fn string_lists_accept_arrays_and_encoded_arrays() {
        assert_eq!(
            parse_string_list("incomeStreams", &json!(["salary", "rental"])).unwrap(),
            vec!["salary", "rental"]
        );
        assert_eq!(
            parse_string_list("incomeStreams", &json!("[\"salary\"]")).unwrap(),
            vec!["salary"]
        );
        for bad in [json!("salary"), json!([1, 2]), json!({"a": "b"})] {
            assert!(matches!(
                parse_string_list("incomeStreams", &bad),
                Err(Error::Validation(_))
            ));
        }
    }

    #[test]
    fn goal_references_must_be_ids() {
        let update = HouseholdMemberUpdate {
            financial_goals: Some(json!(["retire-early"])),
            ..Default::default()
        };
        assert!(matches!(
            update.into_changes(),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn blank_update_fields_are_left_untouched() {
        let update: HouseholdMemberUpdate = serde_json::from_value(json!({
            "income": "",
            "incomeStreams": "",
            "expenses": "  ",
            "financialGoals": "",
        }))
        .unwrap();
        let changes = update.into_changes().unwrap();
        assert!(changes.is_empty());

        let update: HouseholdMemberUpdate = serde_json::from_value(json!({
            "income": "",
            "expenses": ["rent"],
        }))
        .unwrap();
        let changes = update.into_changes().unwrap();
        assert_eq!(changes.income, None);
        assert_eq!(changes.expenses, Some(vec!["rent".to_string()]));
    }

    #[test]
    fn income_range_and_stream_membership() {
        let query = MemberQuery {
            min_income: Some("30000".to_string()),
            max_income: Some("80000".to_string()),
            income_stream: Some("salary".to_string()),
        };
        let predicate = query.to_predicate().unwrap();
        assert_eq!(predicate.len(), 2);
        assert!(predicate.matches(&member(dec!(80000), &["rental", "salary"])));
        assert!(!predicate.matches(&member(dec!(80000.01), &["salary"])));
        assert!(!predicate.matches(&member(dec!(50000), &["freelance"])));
        assert!(!predicate.matches(&member(dec!(50000), &[])));
    }
}
