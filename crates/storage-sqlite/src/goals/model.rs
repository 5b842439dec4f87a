//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use hearth_core::goals::{Goal, GoalChanges, GoalStatus};
use hearth_core::{Error, Result};

use crate::utils::parse_stored_decimal;

/// Database model for financial goals
#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::financial_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub description: String,
    pub target_amount: String,
    pub target_date: NaiveDate,
    pub current_amount: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::financial_goals)]
pub struct GoalChangesDB {
    pub description: Option<String>,
    pub target_amount: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub current_amount: Option<String>,
    pub status: Option<String>,
}

impl GoalDB {
    pub fn from_domain(goal: Goal, created_at: NaiveDateTime) -> Self {
        GoalDB {
            id: goal.id,
            description: goal.description,
            target_amount: goal.target_amount.normalize().to_string(),
            target_date: goal.target_date,
            current_amount: goal.current_amount.normalize().to_string(),
            status: goal.status.as_str().to_string(),
            created_at,
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self> {
        Ok(Goal {
            target_amount: parse_stored_decimal("target_amount", &db.target_amount)?,
            current_amount: parse_stored_decimal("current_amount", &db.current_amount)?,
            status: db.status.parse::<GoalStatus>()?,
            id: db.id,
            description: db.description,
            target_date: db.target_date,
        })
    }
}

impl From<GoalChanges> for GoalChangesDB {
    fn from(changes: GoalChanges) -> Self {
        GoalChangesDB {
            description: changes.description,
            target_amount: changes.target_amount.map(|a| a.normalize().to_string()),
            target_date: changes.target_date,
            current_amount: changes.current_amount.map(|a| a.normalize().to_string()),
            status: changes.status.map(|s| s.as_str().to_string()),
        }
    }
}
