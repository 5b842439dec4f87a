use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::categories_model::{Category, CategoryDeletion, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use super::suggestion::{self, Categorization, CategorySuggestion};
use crate::errors::Result;
use crate::ids::{parse_optional_id, RecordId};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }

    async fn add_category(&self, new_category: NewCategory) -> Result<String> {
        new_category.validate()?;
        let parent_id = parse_optional_id(new_category.parent_id.as_deref())?;
        let category = Category {
            id: RecordId::generate().to_string(),
            name: new_category.name,
            category_type: new_category.category_type,
            parent_id: parent_id.map(|id| id.to_string()),
            keywords: new_category.keywords.unwrap_or_default(),
        };
        Ok(self.repository.insert(category).await?.id)
    }

    async fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<bool> {
        let id = RecordId::parse(id)?;
        if update.is_empty() {
            return Ok(false);
        }
        Ok(self.repository.update(id, update).await? > 0)
    }

    async fn delete_category(&self, id: &str) -> bool {
        match self.delete_category_detailed(id).await {
            Ok(deletion) => deletion.deleted_anything(),
            Err(e) => {
                warn!("Category {} was not deleted: {}", id, e);
                false
            }
        }
    }

    async fn delete_category_detailed(&self, id: &str) -> Result<CategoryDeletion> {
        let id = RecordId::parse(id)?;
        let deletion = self.repository.delete_with_subcategories(id).await?;
        debug!(
            "Deleted category {}: {} category row(s), {} subcategory row(s)",
            id, deletion.categories_deleted, deletion.subcategories_deleted
        );
        Ok(deletion)
    }

    fn suggest_category(&self, description: &str) -> Result<CategorySuggestion> {
        let categories = self.repository.list()?;
        Ok(suggestion::suggest(description, &categories))
    }

    fn categorize(&self, description: &str) -> Result<Categorization> {
        let categories = self.repository.list()?;
        Ok(suggestion::categorize(description, &categories))
    }
}
