use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use log::info;
use std::sync::Arc;

use hearth_core::constants::DEFAULT_HOUSEHOLD_NAME;
use hearth_core::household::{HouseholdMember, HouseholdRepositoryTrait, MemberChanges};
use hearth_core::ids::RecordId;
use hearth_core::Result;

use super::model::{HouseholdDB, HouseholdMemberDB, MemberChangesDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{household_members, households};

pub struct HouseholdRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HouseholdRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        HouseholdRepository { pool, writer }
    }
}

/// Id of the single household, creating it on first use.
fn household_id(conn: &mut SqliteConnection) -> Result<String> {
    let existing = households::table
        .order(households::created_at.asc())
        .select(households::id)
        .first::<String>(conn)
        .optional()
        .map_err(StorageError::from)?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let household = HouseholdDB {
        id: RecordId::generate().to_string(),
        name: DEFAULT_HOUSEHOLD_NAME.to_string(),
        created_at: Utc::now().naive_utc(),
    };
    diesel::insert_into(households::table)
        .values(&household)
        .execute(conn)
        .map_err(StorageError::from)?;
    info!("Created household {}", household.id);
    Ok(household.id)
}

#[async_trait]
impl HouseholdRepositoryTrait for HouseholdRepository {
    fn list_members(&self) -> Result<Vec<HouseholdMember>> {
        let mut conn = get_connection(&self.pool)?;
        household_members::table
            .order(sql::<BigInt>("household_members.rowid").asc())
            .select(HouseholdMemberDB::as_select())
            .load::<HouseholdMemberDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(HouseholdMember::try_from)
            .collect()
    }

    async fn insert_member(&self, member: HouseholdMember) -> Result<HouseholdMember> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<HouseholdMember> {
                let household_id = household_id(conn)?;
                let row = HouseholdMemberDB::from_domain(
                    member.clone(),
                    household_id,
                    Utc::now().naive_utc(),
                )?;
                diesel::insert_into(household_members::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(member)
            })
            .await
    }

    async fn update_member(&self, id: RecordId, changes: MemberChanges) -> Result<usize> {
        if changes.is_empty() {
            return Ok(0);
        }
        let changes = MemberChangesDB::try_from(changes)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(household_members::table.find(id.to_string()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
