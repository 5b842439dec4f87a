//! Prints this month's expense transactions as one JSON document.
//!
//! Logs go to stderr. Any failure exits non-zero without writing to stdout.

use std::io::Write;

use hearth_core::reports::build_monthly_expense_report;
use hearth_core::utils::time_utils::local_today;
use hearth_server::config::Config;
use hearth_server::{build_state, init_tracing, LogTarget};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format, LogTarget::Stderr);
    let state = build_state(&config).await?;

    let report = build_monthly_expense_report(state.transaction_service.as_ref(), local_today())?;
    let document = serde_json::to_string(&report)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", document)?;
    stdout.flush()?;
    Ok(())
}
