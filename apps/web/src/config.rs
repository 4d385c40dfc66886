//! Web server configuration module.
//!
//! Configuration is loaded once at startup from environment variables (after
//! `.env` has been applied by `main`), with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use orderdesk_db::DbConfig;

/// Static assets shipped with this crate.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub app_port: u16,

    /// Resolved database settings (URL, pool size)
    pub database: DbConfig,

    /// Directory served for unmatched GET paths
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// ## Variables
    /// - `APP_PORT` (default 3000)
    /// - `DATABASE_URL`, or all of `MYSQL_USERNAME`, `MYSQL_PASSWORD`,
    ///   `MYSQL_SCHEMA` plus optional `MYSQL_SERVER` (localhost) and
    ///   `MYSQL_SERVER_PORT` (3306)
    /// - `MYSQL_CONN_LIMIT` (default 4, at least 1)
    /// - `STATIC_DIR` (default: this crate's `static/`)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_port = parse_or(&lookup, "APP_PORT", 3000u16)?;

        let conn_limit = parse_or(&lookup, "MYSQL_CONN_LIMIT", 4u32)?;
        if conn_limit == 0 {
            return Err(ConfigError::InvalidValue("MYSQL_CONN_LIMIT".to_string()));
        }

        let database = match non_empty(&lookup, "DATABASE_URL") {
            Some(url) => DbConfig::new(url),
            None => {
                let host = non_empty(&lookup, "MYSQL_SERVER").unwrap_or_else(|| "localhost".to_string());
                let port = parse_or(&lookup, "MYSQL_SERVER_PORT", 3306u16)?;
                let username = required(&lookup, "MYSQL_USERNAME")?;
                let password = required(&lookup, "MYSQL_PASSWORD")?;
                let schema = required(&lookup, "MYSQL_SCHEMA")?;

                DbConfig::mysql(&host, port, &username, &password, &schema)
            }
        }
        .max_connections(conn_limit);

        let static_dir = non_empty(&lookup, "STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(AppConfig {
            app_port,
            database,
            static_dir,
        })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

/// Present, possibly empty (an empty password is a valid password).
fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| ConfigError::MissingRequired(name.to_string()))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_mysql_settings_with_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MYSQL_USERNAME", "orders"),
            ("MYSQL_PASSWORD", "secret"),
            ("MYSQL_SCHEMA", "bikestores"),
        ]))
        .unwrap();

        assert_eq!(config.app_port, 3000);
        assert_eq!(config.database.max_connections, 4);
        assert!(config.database.url.starts_with("mysql://orders:"));
        assert!(config.database.url.contains("localhost:3306/bikestores"));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
    }

    #[test]
    fn test_database_url_overrides_mysql_settings() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://orderdesk_dev.db"),
            ("APP_PORT", "8080"),
            ("MYSQL_CONN_LIMIT", "2"),
            ("STATIC_DIR", "/srv/static"),
        ]))
        .unwrap();

        assert_eq!(config.app_port, 8080);
        assert_eq!(config.database.url, "sqlite://orderdesk_dev.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_missing_credentials() {
        let err = AppConfig::from_lookup(lookup(&[("MYSQL_USERNAME", "orders")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingRequired("MYSQL_PASSWORD".to_string()));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("APP_PORT".to_string()));

        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("MYSQL_CONN_LIMIT", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("MYSQL_CONN_LIMIT".to_string()));
    }
}
