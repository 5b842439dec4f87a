//! Database models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use hearth_core::categories::{Category, CategoryUpdate};
use hearth_core::transactions::TransactionType;
use hearth_core::{Error, Result};

use crate::utils::{from_json_text, to_json_text};

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub category_type: String,
    pub parent_id: Option<String>,
    /// JSON array of strings.
    pub keywords: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangesDB {
    pub name: Option<String>,
    pub category_type: Option<String>,
    pub keywords: Option<String>,
}

impl CategoryDB {
    pub fn from_domain(category: Category, created_at: NaiveDateTime) -> Result<Self> {
        Ok(CategoryDB {
            keywords: to_json_text(&category.keywords)?,
            id: category.id,
            name: category.name,
            category_type: category.category_type.as_str().to_string(),
            parent_id: category.parent_id,
            created_at,
        })
    }
}

impl TryFrom<CategoryDB> for Category {
    type Error = Error;

    fn try_from(db: CategoryDB) -> Result<Self> {
        Ok(Category {
            category_type: db.category_type.parse::<TransactionType>()?,
            keywords: from_json_text(&db.keywords)?,
            id: db.id,
            name: db.name,
            parent_id: db.parent_id,
        })
    }
}

impl TryFrom<CategoryUpdate> for CategoryChangesDB {
    type Error = Error;

    fn try_from(update: CategoryUpdate) -> Result<Self> {
        Ok(CategoryChangesDB {
            name: update.name.filter(|n| !n.is_empty()),
            category_type: update.category_type.map(|t| t.as_str().to_string()),
            keywords: update.keywords.as_ref().map(to_json_text).transpose()?,
        })
    }
}
