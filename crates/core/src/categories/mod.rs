//! Categories module - domain models, services, traits, and the suggestion engine.

mod categories_model;
mod categories_service;
mod categories_traits;
pub mod suggestion;

pub use categories_model::{Category, CategoryDeletion, CategoryUpdate, NewCategory};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
pub use suggestion::{categorize, suggest, Categorization, CategorySuggestion};
