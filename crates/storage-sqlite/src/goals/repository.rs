use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use hearth_core::goals::{Goal, GoalChanges, GoalField, GoalRepositoryTrait};
use hearth_core::ids::RecordId;
use hearth_core::query::Predicate;
use hearth_core::Result;

use super::model::{GoalChangesDB, GoalDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::financial_goals;
use crate::utils::{date_bounds, text_equals};

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Option<Goal>> {
    financial_goals::table
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Goal::try_from)
        .transpose()
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(&self, predicate: &Predicate<GoalField>) -> Result<Vec<Goal>> {
        let mut query = financial_goals::table.into_boxed();
        for (field, condition) in predicate.iter() {
            match field {
                GoalField::Status => {
                    query = query.filter(financial_goals::status.eq(text_equals(condition)?));
                }
                GoalField::TargetDate => {
                    let (after, before) = date_bounds(condition)?;
                    if let Some(after) = after {
                        query = query.filter(financial_goals::target_date.ge(after));
                    }
                    if let Some(before) = before {
                        query = query.filter(financial_goals::target_date.le(before));
                    }
                }
            }
        }

        let mut conn = get_connection(&self.pool)?;
        query
            .order((
                financial_goals::target_date.asc(),
                financial_goals::created_at.asc(),
            ))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        let row = GoalDB::from_domain(goal, Utc::now().naive_utc());
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let stored = diesel::insert_into(financial_goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(stored)
            })
            .await
    }

    async fn update(&self, id: RecordId, changes: GoalChanges) -> Result<Option<Goal>> {
        let goal_id = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                if changes.is_empty() {
                    return find_goal(conn, &goal_id);
                }
                let updated = diesel::update(financial_goals::table.find(goal_id.as_str()))
                    .set(GoalChangesDB::from(changes))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Ok(None);
                }
                find_goal(conn, &goal_id)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use chrono::NaiveDate;
    use hearth_core::goals::{GoalQuery, GoalStatus};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(description: &str, target_date: NaiveDate, status: GoalStatus) -> Goal {
        Goal {
            id: RecordId::generate().to_string(),
            description: description.to_string(),
            target_amount: dec!(5000),
            target_date,
            current_amount: dec!(0),
            status,
        }
    }

    #[tokio::test]
    async fn listing_filters_by_status_and_target_window() {
        let (pool, writer, _temp_dir) = setup();
        let repo = GoalRepository::new(pool, writer);
        repo.insert(goal("car", day(2025, 6, 1), GoalStatus::Ongoing))
            .await
            .unwrap();
        repo.insert(goal("trip", day(2024, 9, 1), GoalStatus::Ongoing))
            .await
            .unwrap();
        repo.insert(goal("laptop", day(2024, 10, 1), GoalStatus::Completed))
            .await
            .unwrap();

        let all = repo.list(&Predicate::new()).unwrap();
        let names: Vec<&str> = all.iter().map(|g| g.description.as_str()).collect();
        assert_eq!(names, vec!["trip", "laptop", "car"]);

        let query = GoalQuery {
            status: Some("ongoing".to_string()),
            target_date_before: Some("2024-12-31".to_string()),
            target_date_after: Some("2024-01-01".to_string()),
        };
        let matching = repo.list(&query.to_predicate().unwrap()).unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].description, "trip");
    }

    #[tokio::test]
    async fn update_changes_only_supplied_columns() {
        let (pool, writer, _temp_dir) = setup();
        let repo = GoalRepository::new(pool, writer);
        let stored = repo
            .insert(goal("emergency fund", day(2025, 1, 1), GoalStatus::Ongoing))
            .await
            .unwrap();
        let id = RecordId::parse(&stored.id).unwrap();

        let changes = GoalChanges {
            current_amount: Some(dec!(1250.50)),
            status: Some(GoalStatus::Completed),
            ..Default::default()
        };
        let updated = repo.update(id, changes).await.unwrap().unwrap();
        assert_eq!(updated.current_amount, dec!(1250.50));
        assert_eq!(updated.status, GoalStatus::Completed);
        assert_eq!(updated.description, "emergency fund");
        assert_eq!(updated.target_amount, dec!(5000));

        let unchanged = repo.update(id, GoalChanges::default()).await.unwrap();
        assert_eq!(unchanged, Some(updated));
    }

    #[tokio::test]
    async fn updating_an_unknown_goal_inserts_nothing() {
        let (pool, writer, _temp_dir) = setup();
        let repo = GoalRepository::new(pool, writer);
        let changes = GoalChanges {
            description: Some("ghost".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update(RecordId::generate(), changes).await.unwrap(), None);
        assert!(repo.list(&Predicate::new()).unwrap().is_empty());
    }
}
