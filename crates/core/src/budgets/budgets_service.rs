use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::budgets_model::{parse_budget_categories, Budget, BudgetUpsert};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;
use crate::utils::time_utils::parse_date;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn find_budget(&self, start_date: &str, end_date: &str) -> Result<Option<Budget>> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        self.repository.find_overlapping(start, end)
    }

    async fn upsert_budget(&self, budget: BudgetUpsert) -> Result<String> {
        let start = parse_date(&budget.start_date)?;
        let end = parse_date(&budget.end_date)?;
        let categories = parse_budget_categories(&budget.categories)?;
        debug!(
            "Upserting budget {}..{} with {} categories",
            start,
            end,
            categories.len()
        );
        Ok(self.repository.upsert(start, end, categories).await?.id)
    }
}
