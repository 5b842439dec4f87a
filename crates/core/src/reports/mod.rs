//! Scheduled reports.

mod monthly_expenses;

pub use monthly_expenses::{build_monthly_expense_report, monthly_expense_query, MonthlyExpenseReport};
