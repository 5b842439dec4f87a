use async_trait::async_trait;
use chrono::NaiveDate;

use super::budgets_model::{Budget, BudgetCategory, BudgetUpsert};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// First budget (by start date) whose window overlaps `[start, end]`.
    fn find_overlapping(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<Budget>>;
    /// Inserts, or overwrites the categories of the budget with this exact window.
    async fn upsert(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        categories: Vec<BudgetCategory>,
    ) -> Result<Budget>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn find_budget(&self, start_date: &str, end_date: &str) -> Result<Option<Budget>>;
    async fn upsert_budget(&self, budget: BudgetUpsert) -> Result<String>;
}
