use async_trait::async_trait;

use super::household_model::{
    HouseholdMember, HouseholdMemberUpdate, MemberChanges, MemberQuery, NewHouseholdMember,
};
use crate::errors::Result;
use crate::ids::RecordId;

/// Trait for household repository operations
#[async_trait]
pub trait HouseholdRepositoryTrait: Send + Sync {
    /// Every member of the household, in insertion order.
    fn list_members(&self) -> Result<Vec<HouseholdMember>>;
    /// Adds a member, creating the household first if none exists.
    async fn insert_member(&self, member: HouseholdMember) -> Result<HouseholdMember>;
    async fn update_member(&self, id: RecordId, changes: MemberChanges) -> Result<usize>;
}

/// Trait for household service operations
#[async_trait]
pub trait HouseholdServiceTrait: Send + Sync {
    fn list_household_members(&self, query: &MemberQuery) -> Result<Vec<HouseholdMember>>;
    async fn add_household_member(&self, member: NewHouseholdMember) -> Result<HouseholdMember>;
    async fn update_household_member(
        &self,
        member_id: &str,
        update: HouseholdMemberUpdate,
    ) -> Result<bool>;
}
