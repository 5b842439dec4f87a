//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use hearth_core::transactions::{Transaction, TransactionChanges, TransactionType};
use hearth_core::{Error, Result};
use rust_decimal::Decimal;

use crate::utils::parse_stored_decimal;

/// Database model for transactions
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub amount: String,
    pub transaction_type: String,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub member_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` columns are left out of the UPDATE.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesDB {
    pub amount: Option<String>,
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub member_id: Option<String>,
}

fn amount_text(amount: Decimal) -> String {
    amount.normalize().to_string()
}

impl From<Transaction> for TransactionDB {
    fn from(transaction: Transaction) -> Self {
        TransactionDB {
            id: transaction.id,
            amount: amount_text(transaction.amount),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            category: transaction.category,
            description: transaction.description,
            date: transaction.date,
            member_id: transaction.member_id,
            created_at: transaction.created_at,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Transaction {
            amount: parse_stored_decimal("amount", &db.amount)?,
            transaction_type: db.transaction_type.parse::<TransactionType>()?,
            id: db.id,
            category: db.category,
            description: db.description,
            date: db.date,
            member_id: db.member_id,
            created_at: db.created_at,
        })
    }
}

impl From<TransactionChanges> for TransactionChangesDB {
    fn from(changes: TransactionChanges) -> Self {
        TransactionChangesDB {
            amount: changes.amount.map(amount_text),
            transaction_type: changes
                .transaction_type
                .map(|kind| kind.as_str().to_string()),
            category: changes.category,
            description: changes.description,
            date: changes.date,
            member_id: changes.member_id,
        }
    }
}
