//! Hearth Core - Domain entities, services, and traits.
//!
//! This crate contains the household finance logic for Hearth: the filter
//! builder and aggregation helpers, the category suggestion engine, derived
//! metrics and the monthly report. It is database-agnostic and defines
//! repository traits that are implemented by the `storage-sqlite` crate.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod household;
pub mod ids;
pub mod metrics;
pub mod query;
pub mod reports;
pub mod transactions;
pub mod utils;

pub use ids::RecordId;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
