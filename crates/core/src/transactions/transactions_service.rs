use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionChanges, TransactionFilter, TransactionGroupBy,
    TransactionGroupQuery, TransactionQuery, TransactionSortField, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;
use crate::ids::{parse_optional_id, RecordId};
use crate::query::aggregation::format_total;
use crate::query::{group_amounts, sum_amounts, GroupTotal, Page, Sort};
use crate::utils::time_utils::{parse_date, parse_optional_date};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TransactionUpdate {
    /// Validates the supplied fields into column changes.
    pub fn into_changes(self) -> Result<TransactionChanges> {
        Ok(TransactionChanges {
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: non_empty(self.category),
            description: non_empty(self.description),
            date: parse_optional_date(self.date.as_deref())?,
            member_id: parse_optional_id(self.member_id.as_deref())?.map(|id| id.to_string()),
        })
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let predicate = query.filter().to_predicate()?;
        let sort = TransactionSortField::parse(query.sort_by.as_deref())?.map(|field| Sort {
            field,
            direction: query.sort_direction(),
        });
        let page = Page::new(query.skip, query.limit);
        debug!(
            "Listing transactions: {} condition(s), sort {:?}, page {:?}",
            predicate.len(),
            sort,
            page
        );
        self.repository.list(&predicate, sort, page)
    }

    fn total_amount(&self, filter: &TransactionFilter) -> Result<Decimal> {
        let predicate = filter.to_predicate()?;
        Ok(sum_amounts(self.repository.amounts(&predicate)?))
    }

    fn sum_transactions(&self, filter: &TransactionFilter) -> Result<String> {
        self.total_amount(filter).map(format_total)
    }

    fn group_transactions(&self, query: &TransactionGroupQuery) -> Result<Vec<GroupTotal>> {
        let group_by = TransactionGroupBy::from_str(&query.group_by)?;
        let predicate = query.filter().to_predicate()?;
        let rows = self.repository.keyed_amounts(&predicate, group_by)?;
        Ok(group_amounts(rows))
    }

    fn count_transactions(&self, filter: &TransactionFilter) -> Result<u64> {
        let predicate = filter.to_predicate()?;
        self.repository.count(&predicate)
    }

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<String> {
        new_transaction.validate()?;
        let transaction = Transaction {
            id: RecordId::generate().to_string(),
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type,
            category: new_transaction.category,
            description: new_transaction.description,
            date: parse_date(&new_transaction.date)?,
            member_id: parse_optional_id(new_transaction.member_id.as_deref())?
                .map(|id| id.to_string()),
            created_at: Utc::now().naive_utc(),
        };
        let inserted = self.repository.insert(transaction).await?;
        Ok(inserted.id)
    }

    async fn update_transaction(&self, id: &str, update: TransactionUpdate) -> Result<bool> {
        let id = RecordId::parse(id)?;
        let changes = update.into_changes()?;
        if changes.is_empty() {
            return Ok(false);
        }
        Ok(self.repository.update(id, changes).await? > 0)
    }

    async fn delete_transaction(&self, id: &str) -> Result<bool> {
        let id = RecordId::parse(id)?;
        Ok(self.repository.delete(id).await? > 0)
    }
}
