use async_trait::async_trait;
use rust_decimal::Decimal;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionChanges, TransactionField, TransactionFilter,
    TransactionGroupBy, TransactionGroupQuery, TransactionQuery, TransactionSortField,
    TransactionUpdate,
};
use crate::errors::Result;
use crate::ids::RecordId;
use crate::query::{GroupTotal, Page, Predicate, Sort};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Matching transactions in the requested order. Without a sort they come
    /// back in insertion order.
    fn list(
        &self,
        predicate: &Predicate<TransactionField>,
        sort: Option<Sort<TransactionSortField>>,
        page: Page,
    ) -> Result<Vec<Transaction>>;

    /// Amounts of every matching transaction.
    fn amounts(&self, predicate: &Predicate<TransactionField>) -> Result<Vec<Decimal>>;

    /// `(group key, amount)` of every matching transaction, in insertion order.
    fn keyed_amounts(
        &self,
        predicate: &Predicate<TransactionField>,
        group_by: TransactionGroupBy,
    ) -> Result<Vec<(Option<String>, Decimal)>>;

    fn count(&self, predicate: &Predicate<TransactionField>) -> Result<u64>;

    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;
    async fn update(&self, id: RecordId, changes: TransactionChanges) -> Result<usize>;
    async fn delete(&self, id: RecordId) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;
    fn total_amount(&self, filter: &TransactionFilter) -> Result<Decimal>;
    /// Sum of matching amounts rendered as a decimal string (`"0"` when empty).
    fn sum_transactions(&self, filter: &TransactionFilter) -> Result<String>;
    fn group_transactions(&self, query: &TransactionGroupQuery) -> Result<Vec<GroupTotal>>;
    fn count_transactions(&self, filter: &TransactionFilter) -> Result<u64>;
    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<String>;
    async fn update_transaction(&self, id: &str, update: TransactionUpdate) -> Result<bool>;
    async fn delete_transaction(&self, id: &str) -> Result<bool>;
}
