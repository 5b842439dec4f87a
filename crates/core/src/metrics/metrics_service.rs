use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::metrics_model::{AmountScope, AverageAmount, AverageQuery};
use super::metrics_traits::MetricsServiceTrait;
use crate::errors::Result;
use crate::transactions::{TransactionFilter, TransactionServiceTrait};
use crate::utils::time_utils::{self, parse_date};

pub struct MetricsService {
    transactions: Arc<dyn TransactionServiceTrait>,
}

impl MetricsService {
    pub fn new(transactions: Arc<dyn TransactionServiceTrait>) -> Self {
        Self { transactions }
    }
}

impl MetricsServiceTrait for MetricsService {
    fn average_transaction_amount(&self, query: &AverageQuery) -> Result<AverageAmount> {
        // Both bounds are required here, unlike the listing filters.
        parse_date(&query.start_date)?;
        parse_date(&query.end_date)?;
        let scope = AmountScope::parse(query.scope.as_deref())?;
        let filter = TransactionFilter {
            start_date: Some(query.start_date.clone()),
            end_date: Some(query.end_date.clone()),
            transaction_type: scope.type_filter(),
            ..TransactionFilter::default()
        };

        let count = self.transactions.count_transactions(&filter)?;
        let total = self.transactions.total_amount(&filter)?;
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(count)).normalize()
        };
        debug!("Average over {:?}: {} across {} rows", scope, average, count);
        Ok(AverageAmount { average, count })
    }

    fn days_between(&self, first: &str, second: &str) -> Result<String> {
        let days = time_utils::days_between(parse_date(first)?, parse_date(second)?);
        Ok(days.to_string())
    }
}
