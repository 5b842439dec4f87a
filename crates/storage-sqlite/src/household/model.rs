//! Database models for the household and its members.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use hearth_core::household::{HouseholdMember, MemberChanges};
use hearth_core::{Error, Result};

use crate::utils::{from_json_text, parse_stored_decimal, to_json_text};

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::households)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HouseholdDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::household_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HouseholdMemberDB {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub income: String,
    pub income_streams: String,
    pub expenses: String,
    pub financial_goals: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::household_members)]
pub struct MemberChangesDB {
    pub income: Option<String>,
    pub income_streams: Option<String>,
    pub expenses: Option<String>,
    pub financial_goals: Option<String>,
}

impl HouseholdMemberDB {
    pub fn from_domain(
        member: HouseholdMember,
        household_id: String,
        created_at: NaiveDateTime,
    ) -> Result<Self> {
        Ok(HouseholdMemberDB {
            income: member.income.normalize().to_string(),
            income_streams: to_json_text(&member.income_streams)?,
            expenses: to_json_text(&member.expenses)?,
            financial_goals: to_json_text(&member.financial_goals)?,
            id: member.id,
            household_id,
            name: member.name,
            created_at,
        })
    }
}

impl TryFrom<HouseholdMemberDB> for HouseholdMember {
    type Error = Error;

    fn try_from(db: HouseholdMemberDB) -> Result<Self> {
        Ok(HouseholdMember {
            income: parse_stored_decimal("income", &db.income)?,
            income_streams: from_json_text(&db.income_streams)?,
            expenses: from_json_text(&db.expenses)?,
            financial_goals: from_json_text(&db.financial_goals)?,
            id: db.id,
            name: db.name,
        })
    }
}

impl TryFrom<MemberChanges> for MemberChangesDB {
    type Error = Error;

    fn try_from(changes: MemberChanges) -> Result<Self> {
        Ok(MemberChangesDB {
            income: changes.income.map(|i| i.normalize().to_string()),
            income_streams: changes.income_streams.as_ref().map(to_json_text).transpose()?,
            expenses: changes.expenses.as_ref().map(to_json_text).transpose()?,
            financial_goals: changes
                .financial_goals
                .as_ref()
                .map(to_json_text)
                .transpose()?,
        })
    }
}
