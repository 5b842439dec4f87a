use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_types::{BigInt, Double};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use hearth_core::ids::RecordId;
use hearth_core::query::{Page, Predicate, Sort, SortDirection};
use hearth_core::transactions::{
    Transaction, TransactionChanges, TransactionField, TransactionGroupBy,
    TransactionRepositoryTrait, TransactionSortField,
};
use hearth_core::Result;

use super::model::{TransactionChangesDB, TransactionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{date_bounds, parse_stored_decimal, text_equals};

type BoxedTransactions = transactions::BoxedQuery<'static, Sqlite>;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

fn insertion_order() -> diesel::expression::SqlLiteral<BigInt> {
    sql::<BigInt>("transactions.rowid")
}

/// Translates a predicate into WHERE clauses.
fn filtered(predicate: &Predicate<TransactionField>) -> Result<BoxedTransactions> {
    let mut query = transactions::table.into_boxed();
    for (field, condition) in predicate.iter() {
        query = match field {
            TransactionField::Date => {
                let (from, to) = date_bounds(condition)?;
                if let Some(from) = from {
                    query = query.filter(transactions::date.ge(from));
                }
                if let Some(to) = to {
                    query = query.filter(transactions::date.le(to));
                }
                query
            }
            TransactionField::Type => {
                query.filter(transactions::transaction_type.eq(text_equals(condition)?))
            }
            TransactionField::Category => {
                query.filter(transactions::category.eq(text_equals(condition)?))
            }
            TransactionField::MemberId => {
                query.filter(transactions::member_id.eq(text_equals(condition)?))
            }
        };
    }
    Ok(query)
}

/// Applies the requested order. Rows that compare equal keep insertion order.
fn ordered(query: BoxedTransactions, sort: Option<Sort<TransactionSortField>>) -> BoxedTransactions {
    let Some(sort) = sort else {
        return query.order(insertion_order().asc());
    };
    let desc = sort.direction == SortDirection::Desc;
    match sort.field {
        TransactionSortField::Date => {
            if desc {
                query.order((transactions::date.desc(), insertion_order().asc()))
            } else {
                query.order((transactions::date.asc(), insertion_order().asc()))
            }
        }
        TransactionSortField::Amount => {
            let amount = || sql::<Double>("CAST(transactions.amount AS REAL)");
            if desc {
                query.order((amount().desc(), insertion_order().asc()))
            } else {
                query.order((amount().asc(), insertion_order().asc()))
            }
        }
        TransactionSortField::Category => {
            if desc {
                query.order((transactions::category.desc(), insertion_order().asc()))
            } else {
                query.order((transactions::category.asc(), insertion_order().asc()))
            }
        }
        TransactionSortField::Type => {
            if desc {
                query.order((transactions::transaction_type.desc(), insertion_order().asc()))
            } else {
                query.order((transactions::transaction_type.asc(), insertion_order().asc()))
            }
        }
        TransactionSortField::Description => {
            if desc {
                query.order((transactions::description.desc(), insertion_order().asc()))
            } else {
                query.order((transactions::description.asc(), insertion_order().asc()))
            }
        }
        TransactionSortField::MemberId => {
            if desc {
                query.order((transactions::member_id.desc(), insertion_order().asc()))
            } else {
                query.order((transactions::member_id.asc(), insertion_order().asc()))
            }
        }
    }
}

fn paged(mut query: BoxedTransactions, page: Page) -> BoxedTransactions {
    if let Some(limit) = page.limit {
        query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
    }
    if page.offset() > 0 {
        query = query.offset(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    }
    query
}

fn parse_amounts<K>(rows: Vec<(K, String)>) -> Result<Vec<(K, Decimal)>> {
    rows.into_iter()
        .map(|(key, raw)| Ok((key, parse_stored_decimal("amount", &raw)?)))
        .collect()
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list(
        &self,
        predicate: &Predicate<TransactionField>,
        sort: Option<Sort<TransactionSortField>>,
        page: Page,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let query = paged(ordered(filtered(predicate)?, sort), page);
        let rows = query
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Loaded {} transaction row(s)", rows.len());
        rows.into_iter().map(Transaction::try_from).collect()
    }

    fn amounts(&self, predicate: &Predicate<TransactionField>) -> Result<Vec<Decimal>> {
        let mut conn = get_connection(&self.pool)?;
        let raw = filtered(predicate)?
            .select(transactions::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        raw.iter()
            .map(|amount| parse_stored_decimal("amount", amount))
            .collect()
    }

    fn keyed_amounts(
        &self,
        predicate: &Predicate<TransactionField>,
        group_by: TransactionGroupBy,
    ) -> Result<Vec<(Option<String>, Decimal)>> {
        let mut conn = get_connection(&self.pool)?;
        let query = filtered(predicate)?.order(insertion_order().asc());
        let rows = match group_by {
            TransactionGroupBy::Category => query
                .select((transactions::category.nullable(), transactions::amount))
                .load::<(Option<String>, String)>(&mut conn),
            TransactionGroupBy::MemberId => query
                .select((transactions::member_id, transactions::amount))
                .load::<(Option<String>, String)>(&mut conn),
            TransactionGroupBy::Type => query
                .select((transactions::transaction_type.nullable(), transactions::amount))
                .load::<(Option<String>, String)>(&mut conn),
        }
        .map_err(StorageError::from)?;
        parse_amounts(rows)
    }

    fn count(&self, predicate: &Predicate<TransactionField>) -> Result<u64> {
        let mut conn = get_connection(&self.pool)?;
        let count = filtered(predicate)?
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB::from(transaction.clone());
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(transaction)
            })
            .await
    }

    async fn update(&self, id: RecordId, changes: TransactionChanges) -> Result<usize> {
        let changes = TransactionChangesDB::from(changes);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(transactions::table.find(id.to_string()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete(&self, id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table.find(id.to_string()))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use chrono::{NaiveDate, Utc};
    use hearth_core::query::PredicateBuilder;
    use hearth_core::transactions::{TransactionFilter, TransactionType};
    use rust_decimal_macros::dec;

    fn tx(amount: Decimal, kind: TransactionType, category: &str, date: &str) -> Transaction {
        Transaction {
            id: RecordId::generate().to_string(),
            amount,
            transaction_type: kind,
            category: category.to_string(),
            description: format!("{} on {}", category, date),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            member_id: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    async fn seeded(rows: Vec<Transaction>) -> (TransactionRepository, tempfile::TempDir) {
        let (pool, writer, temp_dir) = setup();
        let repo = TransactionRepository::new(pool, writer);
        for row in rows {
            repo.insert(row).await.unwrap();
        }
        (repo, temp_dir)
    }

    #[tokio::test]
    async fn amounts_are_exact_and_filtered() {
        let (repo, _temp_dir) = seeded(vec![
            tx(dec!(10), TransactionType::Expense, "Food", "2024-01-05"),
            tx(dec!(5.5), TransactionType::Expense, "Food", "2024-01-20"),
            tx(dec!(0.1), TransactionType::Income, "Gift", "2024-02-01"),
        ])
        .await;

        let january = TransactionFilter {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            ..Default::default()
        }
        .to_predicate()
        .unwrap();
        let amounts = repo.amounts(&january).unwrap();
        assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec!(15.5));
        assert_eq!(repo.count(&january).unwrap(), 2);

        let nothing = PredicateBuilder::new()
            .equals(TransactionField::Category, Some("Rent"))
            .build();
        assert!(repo.amounts(&nothing).unwrap().is_empty());
    }

    #[tokio::test]
    async fn date_bounds_are_inclusive() {
        let (repo, _temp_dir) = seeded(vec![
            tx(dec!(1), TransactionType::Expense, "A", "2024-01-31"),
            tx(dec!(2), TransactionType::Expense, "B", "2024-02-01"),
        ])
        .await;
        let predicate = TransactionFilter {
            end_date: Some("2024-01-31".to_string()),
            ..Default::default()
        }
        .to_predicate()
        .unwrap();
        let listed = repo.list(&predicate, None, Page::unbounded()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, "A");
    }

    #[tokio::test]
    async fn amount_sort_is_numeric_and_paging_follows_it() {
        let (repo, _temp_dir) = seeded(vec![
            tx(dec!(9), TransactionType::Expense, "a", "2024-01-01"),
            tx(dec!(100), TransactionType::Expense, "b", "2024-01-02"),
            tx(dec!(20.5), TransactionType::Expense, "c", "2024-01-03"),
            tx(dec!(3), TransactionType::Expense, "d", "2024-01-04"),
        ])
        .await;
        let sort = Some(Sort {
            field: TransactionSortField::Amount,
            direction: SortDirection::Desc,
        });
        let everything = Predicate::new();
        let all: Vec<_> = repo
            .list(&everything, sort, Page::unbounded())
            .unwrap()
            .into_iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(all, vec![dec!(100), dec!(20.5), dec!(9), dec!(3)]);

        let window: Vec<_> = repo
            .list(&everything, sort, Page::new(Some(1), Some(2)))
            .unwrap()
            .into_iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(window, vec![dec!(20.5), dec!(9)]);

        let skipped = repo
            .list(&everything, None, Page::new(Some(3), None))
            .unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].category, "d");
    }

    #[tokio::test]
    async fn keyed_amounts_follow_insertion_order() {
        let mut with_member = tx(dec!(4), TransactionType::Income, "Pay", "2024-03-01");
        let member = RecordId::generate().to_string();
        with_member.member_id = Some(member.clone());
        let (repo, _temp_dir) = seeded(vec![
            tx(dec!(10), TransactionType::Expense, "food", "2024-03-01"),
            with_member,
            tx(dec!(5), TransactionType::Expense, "food", "2024-03-02"),
        ])
        .await;
        let everything = Predicate::new();
        let by_member = repo
            .keyed_amounts(&everything, TransactionGroupBy::MemberId)
            .unwrap();
        assert_eq!(
            by_member,
            vec![(None, dec!(10)), (Some(member), dec!(4)), (None, dec!(5))]
        );
        let by_type = repo
            .keyed_amounts(&everything, TransactionGroupBy::Type)
            .unwrap();
        assert_eq!(by_type[1].0.as_deref(), Some("income"));
    }

    #[tokio::test]
    async fn update_and_delete_touch_one_row() {
        let original = tx(dec!(12), TransactionType::Expense, "Fuel", "2024-04-01");
        let id = RecordId::parse(&original.id).unwrap();
        let (repo, _temp_dir) = seeded(vec![original]).await;

        let changes = TransactionChanges {
            amount: Some(dec!(12.75)),
            category: Some("Transport".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update(id, changes.clone()).await.unwrap(), 1);
        let stored = repo
            .list(&Predicate::new(), None, Page::unbounded())
            .unwrap();
        assert_eq!(stored[0].amount, dec!(12.75));
        assert_eq!(stored[0].category, "Transport");
        assert_eq!(stored[0].description, "Fuel on 2024-04-01");

        assert_eq!(repo.update(RecordId::generate(), changes).await.unwrap(), 0);
        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
    }
}
