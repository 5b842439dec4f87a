use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use std::sync::Arc;

use hearth_core::categories::{Category, CategoryDeletion, CategoryRepositoryTrait, CategoryUpdate};
use hearth_core::errors::{DatabaseError, Error};
use hearth_core::ids::RecordId;
use hearth_core::Result;

use super::model::{CategoryChangesDB, CategoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

/// Deletes a category, runs `between`, then deletes the category's direct
/// children. Must run inside a transaction so a failure at any step undoes
/// the earlier ones.
pub(crate) fn delete_category_tree<F>(
    conn: &mut SqliteConnection,
    category_id: &str,
    between: F,
) -> Result<CategoryDeletion>
where
    F: FnOnce(&mut SqliteConnection) -> Result<()>,
{
    let categories_deleted = diesel::delete(categories::table.find(category_id))
        .execute(conn)
        .map_err(StorageError::from)?;
    between(conn)?;
    let subcategories_deleted =
        diesel::delete(categories::table.filter(categories::parent_id.eq(category_id)))
            .execute(conn)
            .map_err(StorageError::from)?;
    Ok(CategoryDeletion {
        categories_deleted,
        subcategories_deleted,
    })
}

/// A cascade that did not commit is reported as an aborted transaction,
/// unless the store could not be reached at all.
fn as_aborted(err: Error) -> Error {
    if err.is_store_unavailable() {
        err
    } else {
        Error::Database(DatabaseError::TransactionFailed(err.to_string()))
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .order((categories::created_at.asc(), sql::<BigInt>("rowid").asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    async fn insert(&self, category: Category) -> Result<Category> {
        let row = CategoryDB::from_domain(category.clone(), Utc::now().naive_utc())?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                diesel::insert_into(categories::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(category)
            })
            .await
    }

    async fn update(&self, id: RecordId, update: CategoryUpdate) -> Result<usize> {
        let changes = CategoryChangesDB::try_from(update)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(categories::table.find(id.to_string()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_with_subcategories(&self, id: RecordId) -> Result<CategoryDeletion> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| {
                delete_category_tree(conn, &id.to_string(), |_| Ok(()))
            })
            .await
            .map_err(as_aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use hearth_core::transactions::TransactionType;

    fn category(name: &str, parent_id: Option<&str>) -> Category {
        Category {
            id: RecordId::generate().to_string(),
            name: name.to_string(),
            category_type: TransactionType::Expense,
            parent_id: parent_id.map(str::to_string),
            keywords: vec![name.to_lowercase()],
        }
    }

    async fn family(repo: &CategoryRepository) -> (Category, Vec<Category>, Category) {
        let parent = repo.insert(category("Food", None)).await.unwrap();
        let mut children = Vec::new();
        for name in ["Groceries", "Dining"] {
            children.push(repo.insert(category(name, Some(&parent.id))).await.unwrap());
        }
        // A grandchild is not part of the cascade.
        let grandchild = repo
            .insert(category("Coffee", Some(&children[1].id)))
            .await
            .unwrap();
        (parent, children, grandchild)
    }

    #[tokio::test]
    async fn cascade_removes_the_category_and_its_children() {
        let (pool, writer, _temp_dir) = setup();
        let repo = CategoryRepository::new(pool, writer);
        let (parent, _children, grandchild) = family(&repo).await;

        let deletion = repo
            .delete_with_subcategories(RecordId::parse(&parent.id).unwrap())
            .await
            .unwrap();
        assert_eq!(
            deletion,
            CategoryDeletion {
                categories_deleted: 1,
                subcategories_deleted: 2,
            }
        );

        let remaining = repo.list().unwrap();
        assert!(remaining
            .iter()
            .all(|c| c.id != parent.id && c.parent_id.as_deref() != Some(parent.id.as_str())));
        assert_eq!(remaining, vec![grandchild]);
    }

    #[tokio::test]
    async fn failure_between_deletes_rolls_back_the_parent() {
        let (pool, writer, _temp_dir) = setup();
        let repo = CategoryRepository::new(pool, writer.clone());
        let (parent, children, _) = family(&repo).await;

        let parent_id = parent.id.clone();
        let result = writer
            .exec(move |conn: &mut SqliteConnection| {
                delete_category_tree(conn, &parent_id, |_| {
                    Err(Error::Database(DatabaseError::QueryFailed(
                        "injected failure".to_string(),
                    )))
                })
            })
            .await
            .map_err(as_aborted);
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::TransactionFailed(_)))
        ));

        let remaining = repo.list().unwrap();
        assert_eq!(remaining.len(), 4);
        assert!(remaining.iter().any(|c| c.id == parent.id));
        assert_eq!(
            remaining
                .iter()
                .filter(|c| c.parent_id.as_deref() == Some(parent.id.as_str()))
                .count(),
            children.len()
        );
    }

    #[tokio::test]
    async fn keywords_round_trip_and_update_in_place() {
        let (pool, writer, _temp_dir) = setup();
        let repo = CategoryRepository::new(pool, writer);
        let food = repo.insert(category("Food", None)).await.unwrap();
        let id = RecordId::parse(&food.id).unwrap();

        let update = CategoryUpdate {
            name: Some(String::new()),
            keywords: Some(vec!["grocery".to_string(), "restaurant".to_string()]),
            ..Default::default()
        };
        assert_eq!(repo.update(id, update).await.unwrap(), 1);

        let stored = repo.list().unwrap();
        assert_eq!(stored[0].name, "Food");
        assert_eq!(stored[0].keywords, vec!["grocery", "restaurant"]);
        assert_eq!(stored[0].category_type, TransactionType::Expense);
    }
}
