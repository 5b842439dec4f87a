//! SQLite storage implementation for Hearth.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `hearth-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for every record type
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!  storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod household;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from hearth-core for convenience
pub use hearth_core::errors::{DatabaseError, Error, Result};

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use goals::GoalRepository;
pub use household::HouseholdRepository;
pub use transactions::TransactionRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};

    /// Migrated database in a fresh temp dir. Must run inside a Tokio runtime
    /// because the writer actor is spawned onto it. Keep the `TempDir` alive
    /// for the duration of the test.
    pub(crate) fn setup() -> (Arc<DbPool>, WriteHandle, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("hearth.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (pool, writer, temp_dir)
    }
}
