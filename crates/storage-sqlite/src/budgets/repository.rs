use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use hearth_core::budgets::{Budget, BudgetCategory, BudgetRepositoryTrait};
use hearth_core::ids::RecordId;
use hearth_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;
use crate::utils::to_json_text;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn find_overlapping(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::start_date.le(end).and(budgets::end_date.ge(start)))
            .order((budgets::start_date.asc(), budgets::end_date.asc()))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Budget::try_from)
            .transpose()
    }

    async fn upsert(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        categories: Vec<BudgetCategory>,
    ) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().naive_utc();
                let existing = budgets::table
                    .filter(budgets::start_date.eq(start))
                    .filter(budgets::end_date.eq(end))
                    .select(budgets::id)
                    .first::<String>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                let budget = Budget {
                    id: existing
                        .clone()
                        .unwrap_or_else(|| RecordId::generate().to_string()),
                    start_date: start,
                    end_date: end,
                    categories,
                };

                match existing {
                    Some(budget_id) => {
                        debug!("Overwriting budget {} for {}..{}", budget_id, start, end);
                        diesel::update(budgets::table.find(budget_id))
                            .set((
                                budgets::categories.eq(to_json_text(&budget.categories)?),
                                budgets::updated_at.eq(now),
                            ))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                    None => {
                        diesel::insert_into(budgets::table)
                            .values(&BudgetDB::from_domain(&budget, now)?)
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                }
                Ok(budget)
            })
            .await
    }
}
