//! Predicates over record fields.
//!
//! A predicate holds at most one [`Condition`] per field. Absent parameters
//! never produce a condition, so an empty predicate matches every record.
//! Lower and upper bounds on the same field merge into one range whichever
//! order they are supplied in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};
use crate::ids::RecordId;
use crate::utils::time_utils::parse_date;

/// A typed value a condition compares against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scalar {
    Text(String),
    Date(NaiveDate),
    Amount(Decimal),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Scalar::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Scalar::Amount(a) => Some(*a),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq(Scalar),
    /// Inclusive bounds; at least one side is always present.
    Range {
        gte: Option<Scalar>,
        lte: Option<Scalar>,
    },
}

impl Condition {
    pub fn matches(&self, value: &Scalar) -> bool {
        match self {
            Condition::Eq(expected) => expected == value,
            Condition::Range { gte, lte } => {
                gte.as_ref().map_or(true, |lower| value >= lower)
                    && lte.as_ref().map_or(true, |upper| value <= upper)
            }
        }
    }
}

/// Exposes record fields to in-process predicate evaluation.
///
/// Multi-valued fields return every value; a condition matches when any of
/// them does. Missing values return an empty vector and never match.
pub trait Filterable<F> {
    fn field_values(&self, field: F) -> Vec<Scalar>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<F: Ord> {
    conditions: BTreeMap<F, Condition>,
}

impl<F: Ord + Copy> Default for Predicate<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Ord + Copy> Predicate<F> {
    /// An unconstrained predicate.
    pub fn new() -> Self {
        Predicate {
            conditions: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn get(&self, field: F) -> Option<&Condition> {
        self.conditions.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &Condition)> {
        self.conditions.iter().map(|(f, c)| (*f, c))
    }

    pub fn set_eq(&mut self, field: F, value: Scalar) {
        self.conditions.insert(field, Condition::Eq(value));
    }

    pub fn set_lower_bound(&mut self, field: F, value: Scalar) {
        match self.conditions.get_mut(&field) {
            Some(Condition::Range { gte, .. }) => *gte = Some(value),
            _ => {
                self.conditions.insert(
                    field,
                    Condition::Range {
                        gte: Some(value),
                        lte: None,
                    },
                );
            }
        }
    }

    pub fn set_upper_bound(&mut self, field: F, value: Scalar) {
        match self.conditions.get_mut(&field) {
            Some(Condition::Range { lte, .. }) => *lte = Some(value),
            _ => {
                self.conditions.insert(
                    field,
                    Condition::Range {
                        gte: None,
                        lte: Some(value),
                    },
                );
            }
        }
    }

    /// Evaluates the predicate against a record in memory.
    pub fn matches<R: Filterable<F>>(&self, record: &R) -> bool {
        self.conditions.iter().all(|(field, condition)| {
            record
                .field_values(*field)
                .iter()
                .any(|value| condition.matches(value))
        })
    }
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Translates optional raw query parameters into a [`Predicate`].
///
/// Every method ignores `None` and empty strings, and fails fast on values
/// that do not parse.
#[derive(Debug, Clone)]
pub struct PredicateBuilder<F: Ord> {
    predicate: Predicate<F>,
}

impl<F: Ord + Copy> Default for PredicateBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Ord + Copy> PredicateBuilder<F> {
    pub fn new() -> Self {
        PredicateBuilder {
            predicate: Predicate::new(),
        }
    }

    pub fn equals(mut self, field: F, value: Option<&str>) -> Self {
        if let Some(v) = supplied(value) {
            self.predicate.set_eq(field, Scalar::Text(v.to_string()));
        }
        self
    }

    /// Equality on a reference field; the value must be a well-formed id.
    pub fn id_equals(mut self, field: F, value: Option<&str>) -> Result<Self> {
        if let Some(v) = supplied(value) {
            let id = RecordId::parse(v)?;
            self.predicate.set_eq(field, Scalar::Text(id.to_string()));
        }
        Ok(self)
    }

    pub fn date_from(mut self, field: F, value: Option<&str>) -> Result<Self> {
        if let Some(v) = supplied(value) {
            self.predicate
                .set_lower_bound(field, Scalar::Date(parse_date(v)?));
        }
        Ok(self)
    }

    pub fn date_to(mut self, field: F, value: Option<&str>) -> Result<Self> {
        if let Some(v) = supplied(value) {
            self.predicate
                .set_upper_bound(field, Scalar::Date(parse_date(v)?));
        }
        Ok(self)
    }

    pub fn amount_from(mut self, field: F, value: Option<&str>) -> Result<Self> {
        if let Some(v) = supplied(value) {
            self.predicate
                .set_lower_bound(field, Scalar::Amount(parse_amount(v)?));
        }
        Ok(self)
    }

    pub fn amount_to(mut self, field: F, value: Option<&str>) -> Result<Self> {
        if let Some(v) = supplied(value) {
            self.predicate
                .set_upper_bound(field, Scalar::Amount(parse_amount(v)?));
        }
        Ok(self)
    }

    pub fn build(self) -> Predicate<F> {
        self.predicate
    }
}

pub(crate) fn parse_amount(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value.trim()).map_err(ValidationError::DecimalParse)?)
}
