use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/hearth.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow_origins: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `HEARTH_*` variables, after loading an optional `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_raw = var("HEARTH_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .with_context(|| format!("Invalid HEARTH_LISTEN_ADDR '{}'", listen_raw))?;

        let db_path = var("HEARTH_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());

        let cors_allow_origins = var("HEARTH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_ms = match var("HEARTH_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid HEARTH_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let log_format = match var("HEARTH_LOG_FORMAT") {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow_origins,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origins.is_empty() || self.cors_allow_origins.iter().any(|o| o == "*")
    }
}
