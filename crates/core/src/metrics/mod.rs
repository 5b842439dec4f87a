//! Derived metrics built on top of the transaction queries.

mod metrics_model;
mod metrics_service;
mod metrics_traits;

pub use metrics_model::{AmountScope, AverageAmount, AverageQuery};
pub use metrics_service::MetricsService;
pub use metrics_traits::MetricsServiceTrait;
