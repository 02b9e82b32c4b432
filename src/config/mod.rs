//! Configuration module for the CrewDesk backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Path to the stored service credential used for remote sheet reads
    pub sheets_credentials_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("CREWDESK_DB_PATH")
            .unwrap_or_else(|_| "./data/crewdesk.sqlite".to_string())
            .into();

        let bind_addr = env::var("CREWDESK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CREWDESK_BIND_ADDR format");

        let log_level = env::var("CREWDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sheets_credentials_path = env::var("CREWDESK_SHEETS_CREDENTIALS")
            .unwrap_or_else(|_| "./service_account.json".to_string())
            .into();

        Self {
            db_path,
            bind_addr,
            log_level,
            sheets_credentials_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("CREWDESK_DB_PATH");
        env::remove_var("CREWDESK_BIND_ADDR");
        env::remove_var("CREWDESK_LOG_LEVEL");
        env::remove_var("CREWDESK_SHEETS_CREDENTIALS");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/crewdesk.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.sheets_credentials_path,
            PathBuf::from("./service_account.json")
        );
    }
}
