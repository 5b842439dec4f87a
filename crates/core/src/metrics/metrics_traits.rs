use super::metrics_model::{AverageAmount, AverageQuery};
use crate::errors::Result;

/// Figures derived from the transaction queries.
pub trait MetricsServiceTrait: Send + Sync {
    /// Mean amount over the window; zero when nothing matches.
    fn average_transaction_amount(&self, query: &AverageQuery) -> Result<AverageAmount>;
    /// Absolute whole-day distance between two dates, as a string.
    fn days_between(&self, first: &str, second: &str) -> Result<String>;
}
