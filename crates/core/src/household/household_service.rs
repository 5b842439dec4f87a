use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::household_model::{
    validate_goal_ids, HouseholdMember, HouseholdMemberUpdate, MemberQuery, NewHouseholdMember,
};
use super::household_traits::{HouseholdRepositoryTrait, HouseholdServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::ids::RecordId;

pub struct HouseholdService {
    repository: Arc<dyn HouseholdRepositoryTrait>,
}

impl HouseholdService {
    pub fn new(repository: Arc<dyn HouseholdRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HouseholdServiceTrait for HouseholdService {
    /// Income is stored as exact decimal text, so members are filtered here
    /// rather than in the store.
    fn list_household_members(&self, query: &MemberQuery) -> Result<Vec<HouseholdMember>> {
        let predicate = query.to_predicate()?;
        let members = self.repository.list_members()?;
        let total = members.len();
        let matching: Vec<_> = members
            .into_iter()
            .filter(|m| predicate.matches(m))
            .collect();
        debug!("{} of {} household members match", matching.len(), total);
        Ok(matching)
    }

    async fn add_household_member(&self, member: NewHouseholdMember) -> Result<HouseholdMember> {
        if member.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        validate_goal_ids(&member.financial_goals)?;
        let member = HouseholdMember {
            id: RecordId::generate().to_string(),
            name: member.name,
            income: member.income,
            income_streams: member.income_streams,
            expenses: member.expenses,
            financial_goals: member.financial_goals,
        };
        self.repository.insert_member(member).await
    }

    async fn update_household_member(
        &self,
        member_id: &str,
        update: HouseholdMemberUpdate,
    ) -> Result<bool> {
        let id = RecordId::parse(member_id)?;
        let changes = update.into_changes()?;
        if changes.is_empty() {
            return Ok(false);
        }
        Ok(self.repository.update_member(id, changes).await? > 0)
    }
}
