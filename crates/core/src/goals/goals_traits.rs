use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalChanges, GoalField, GoalQuery, GoalUpdate, NewGoal};
use crate::ids::RecordId;
use crate::query::Predicate;
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Matching goals ordered by target date.
    fn list(&self, predicate: &Predicate<GoalField>) -> Result<Vec<Goal>>;
    async fn insert(&self, goal: Goal) -> Result<Goal>;
    /// Returns `None` when no goal has this id.
    async fn update(&self, id: RecordId, changes: GoalChanges) -> Result<Option<Goal>>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn list_goals(&self, query: &GoalQuery) -> Result<Vec<Goal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<Goal>;
}
