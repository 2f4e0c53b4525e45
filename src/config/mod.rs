//! Configuration module for the party planner backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Port used when neither `PARTY_BIND_ADDR` nor `PORT` is set.
const DEFAULT_PORT: &str = "3000";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the document store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("PARTY_DB_PATH")
            .unwrap_or_else(|_| "./data/party.sqlite".to_string())
            .into();

        let bind_addr = match env::var("PARTY_BIND_ADDR") {
            Ok(addr) => addr,
            Err(_) => {
                let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
                format!("0.0.0.0:{}", port)
            }
        }
        .parse()?;

        let log_level = env::var("PARTY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test because they mutate process-wide env vars.
    #[test]
    fn test_config_from_env() {
        env::remove_var("PARTY_DB_PATH");
        env::remove_var("PARTY_BIND_ADDR");
        env::remove_var("PARTY_LOG_LEVEL");
        env::remove_var("PORT");

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/party.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");

        env::set_var("PORT", "8181");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 8181);

        env::set_var("PARTY_BIND_ADDR", "127.0.0.1:9000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");

        env::set_var("PARTY_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());

        env::remove_var("PARTY_BIND_ADDR");
        env::remove_var("PORT");
    }
}
