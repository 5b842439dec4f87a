//! Category domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;

/// A category or, when `parent_id` is set, a subcategory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub parent_id: Option<String>,
    /// Only consulted by the suggestion engine.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub category_type: Option<TransactionType>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.category_type.is_none()
            && self.keywords.is_none()
    }
}

/// Outcome of a cascading delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDeletion {
    pub categories_deleted: usize,
    pub subcategories_deleted: usize,
}

impl CategoryDeletion {
    pub fn deleted_anything(&self) -> bool {
        self.categories_deleted + self.subcategories_deleted > 0
    }
}
