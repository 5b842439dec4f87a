//! Database models for budgets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use hearth_core::budgets::Budget;
use hearth_core::{Error, Result};

use crate::utils::{from_json_text, to_json_text};

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// JSON array of `{category, amount}`.
    pub categories: String,
    pub updated_at: NaiveDateTime,
}

impl BudgetDB {
    pub fn from_domain(budget: &Budget, updated_at: NaiveDateTime) -> Result<Self> {
        Ok(BudgetDB {
            id: budget.id.clone(),
            start_date: budget.start_date,
            end_date: budget.end_date,
            categories: to_json_text(&budget.categories)?,
            updated_at,
        })
    }
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self> {
        Ok(Budget {
            categories: from_json_text(&db.categories)?,
            id: db.id,
            start_date: db.start_date,
            end_date: db.end_date,
        })
    }
}
