use async_trait::async_trait;
use std::sync::Arc;

use super::goals_model::{Goal, GoalChanges, GoalQuery, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{DatabaseError, Result};
use crate::ids::RecordId;
use crate::utils::time_utils::{parse_date, parse_optional_date};

/// Creation and update are separate operations: an update never inserts.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn list_goals(&self, query: &GoalQuery) -> Result<Vec<Goal>> {
        let predicate = query.to_predicate()?;
        self.repository.list(&predicate)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let goal = Goal {
            id: RecordId::generate().to_string(),
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            target_date: parse_date(&new_goal.target_date)?,
            current_amount: new_goal.current_amount,
            status: new_goal.status,
        };
        self.repository.insert(goal).await
    }

    async fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<Goal> {
        let goal_id = RecordId::parse(id)?;
        let changes = GoalChanges {
            description: update.description.filter(|d| !d.is_empty()),
            target_amount: update.target_amount,
            target_date: parse_optional_date(update.target_date.as_deref())?,
            current_amount: update.current_amount,
            status: update.status,
        };
        self.repository
            .update(goal_id, changes)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("goal {}", id)).into())
    }
}
