use async_trait::async_trait;

use super::categories_model::{Category, CategoryDeletion, CategoryUpdate, NewCategory};
use super::suggestion::{Categorization, CategorySuggestion};
use crate::errors::Result;
use crate::ids::RecordId;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Category>>;
    async fn insert(&self, category: Category) -> Result<Category>;
    async fn update(&self, id: RecordId, update: CategoryUpdate) -> Result<usize>;
    /// Deletes the category and its direct subcategories atomically.
    async fn delete_with_subcategories(&self, id: RecordId) -> Result<CategoryDeletion>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn list_categories(&self) -> Result<Vec<Category>>;
    async fn add_category(&self, new_category: NewCategory) -> Result<String>;
    async fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<bool>;
    /// `true` only when the cascade committed and removed something. Failures
    /// are logged and reported as `false`.
    async fn delete_category(&self, id: &str) -> bool;
    async fn delete_category_detailed(&self, id: &str) -> Result<CategoryDeletion>;
    fn suggest_category(&self, description: &str) -> Result<CategorySuggestion>;
    fn categorize(&self, description: &str) -> Result<Categorization>;
}
