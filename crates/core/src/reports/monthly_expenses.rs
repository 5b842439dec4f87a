use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::constants::MONTHLY_REPORT_LIMIT;
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionQuery, TransactionServiceTrait, TransactionType};
use crate::utils::time_utils::month_bounds;

/// Expense transactions of one calendar month, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpenseReport {
    pub expenses: Vec<Transaction>,
}

/// Listing query covering the month that contains `today`.
pub fn monthly_expense_query(today: NaiveDate) -> TransactionQuery {
    let (first, last) = month_bounds(today);
    TransactionQuery {
        start_date: Some(first.format("%Y-%m-%d").to_string()),
        end_date: Some(last.format("%Y-%m-%d").to_string()),
        transaction_type: Some(TransactionType::Expense.as_str().to_string()),
        sort_by: Some("date".to_string()),
        sort_order: Some("asc".to_string()),
        limit: Some(MONTHLY_REPORT_LIMIT),
        ..TransactionQuery::default()
    }
}

pub fn build_monthly_expense_report(
    transactions: &dyn TransactionServiceTrait,
    today: NaiveDate,
) -> Result<MonthlyExpenseReport> {
    let query = monthly_expense_query(today);
    let expenses = transactions.list_transactions(&query)?;
    info!(
        "Monthly expense report for {}..{}: {} transaction(s)",
        query.start_date.as_deref().unwrap_or_default(),
        query.end_date.as_deref().unwrap_or_default(),
        expenses.len()
    );
    Ok(MonthlyExpenseReport { expenses })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_spans_the_whole_local_month() {
        let query = monthly_expense_query(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap());
        assert_eq!(query.start_date.as_deref(), Some("2024-02-01"));
        assert_eq!(query.end_date.as_deref(), Some("2024-02-29"));
        assert_eq!(query.transaction_type.as_deref(), Some("expense"));
        assert_eq!(query.sort_by.as_deref(), Some("date"));
        assert_eq!(query.limit, Some(1000));
        assert_eq!(query.skip, None);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let query = monthly_expense_query(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(query.start_date.as_deref(), Some("2023-12-01"));
        assert_eq!(query.end_date.as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn empty_month_serializes_as_empty_list() {
        let report = MonthlyExpenseReport { expenses: vec![] };
        assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"expenses":[]}"#);
    }
}
