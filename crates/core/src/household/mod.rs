//! Household module - members of the single shared household.

mod household_model;
mod household_service;
mod household_traits;

pub use household_model::{
    parse_string_list, HouseholdMember, HouseholdMemberUpdate, MemberChanges, MemberField,
    MemberQuery, NewHouseholdMember,
};
pub use household_service::HouseholdService;
pub use household_traits::{HouseholdRepositoryTrait, HouseholdServiceTrait};
