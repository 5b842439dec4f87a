mod model;
mod repository;

pub use model::{HouseholdDB, HouseholdMemberDB, MemberChangesDB};
pub use repository::HouseholdRepository;
