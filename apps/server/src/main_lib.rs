use std::sync::Arc;

use crate::config::{Config, LogFormat};
use hearth_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    household::{HouseholdService, HouseholdServiceTrait},
    metrics::{MetricsService, MetricsServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use hearth_storage_sqlite::{
    budgets::BudgetRepository,
    categories::CategoryRepository,
    db::{self, write_actor},
    goals::GoalRepository,
    household::HouseholdRepository,
    transactions::TransactionRepository,
};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub household_service: Arc<dyn HouseholdServiceTrait + Send + Sync>,
    pub metrics_service: Arc<dyn MetricsServiceTrait + Send + Sync>,
    pub db_path: String,
}

/// Where formatted log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps stdout free for command output.
    Stderr,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded into it.
pub fn init_tracing(format: LogFormat, target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = match target {
        LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
    };
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(writer))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(writer),
            )
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo));

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo));

    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service = Arc::new(BudgetService::new(budget_repo));

    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service = Arc::new(GoalService::new(goal_repo));

    let household_repo = Arc::new(HouseholdRepository::new(pool.clone(), writer.clone()));
    let household_service = Arc::new(HouseholdService::new(household_repo));

    let metrics_service = Arc::new(MetricsService::new(transaction_service.clone()));

    Ok(Arc::new(AppState {
        transaction_service,
        category_service,
        budget_service,
        goal_service,
        household_service,
        metrics_service,
        db_path,
    }))
}
