//! Environment-based server configuration.
//!
//! # Responsibility
//! - Resolve bind address, database path and logging settings from the
//!   environment with sensible local-development defaults.
//!
//! Variables: `QUICKNOTE_ADDR`, `QUICKNOTE_DB`, `QUICKNOTE_LOG_LEVEL`,
//! `QUICKNOTE_LOG_DIR`.

use quicknote_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_DB_PATH: &str = "quicknote.sqlite3";
const DEFAULT_LOG_DIR: &str = "logs";

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub addr: SocketAddr,
    /// SQLite database file path.
    pub db_path: PathBuf,
    /// Log level passed to the logging bootstrap.
    pub log_level: String,
    /// Directory receiving rolling log files.
    pub log_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAddr(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddr(value) => {
                write!(f, "QUICKNOTE_ADDR `{value}` is not a valid socket address")
            }
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for unset or blank variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr_text = env_or("QUICKNOTE_ADDR", DEFAULT_ADDR);
        let addr = addr_text
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_text))?;

        Ok(Self {
            addr,
            db_path: PathBuf::from(env_or("QUICKNOTE_DB", DEFAULT_DB_PATH)),
            log_level: env_or("QUICKNOTE_LOG_LEVEL", default_log_level()),
            log_dir: PathBuf::from(env_or("QUICKNOTE_LOG_DIR", DEFAULT_LOG_DIR)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::{env_or, ServerConfig};

    #[test]
    fn defaults_apply_when_variables_are_unset() {
        let config = ServerConfig::from_env().expect("default config should parse");
        assert_eq!(config.addr.port(), 3001);
        assert_eq!(config.db_path.to_str(), Some("quicknote.sqlite3"));
    }

    #[test]
    fn env_or_ignores_blank_values() {
        assert_eq!(env_or("QUICKNOTE_TEST_UNSET_VAR", "fallback"), "fallback");
    }
}
