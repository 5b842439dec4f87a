//! Transactions module - domain models, services, and traits.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{
    NewTransaction, Transaction, TransactionChanges, TransactionField, TransactionFilter,
    TransactionGroupBy, TransactionGroupQuery, TransactionQuery, TransactionSortField,
    TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
