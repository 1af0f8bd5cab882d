//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `gradebook.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.
//!
//! Storage selection follows the variables the service has always used:
//! `DB_URL` picks `PostgreSQL` or `SQLite` from its scheme, `REDIS_URL` picks
//! Redis, and `GRADEBOOK_STORAGE` forces a backend when both are present.

use std::fmt;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which store backs the grade repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Redis,
    Postgres,
    Sqlite,
}

impl StorageBackend {
    /// Infer the backend from a connection URL scheme.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        match url.split(':').next()? {
            "redis" | "rediss" => Some(Self::Redis),
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Redis => "redis",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        })
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Connection URL for the selected backend.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `gradebook.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gradebook.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GRADEBOOK_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GRADEBOOK_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GRADEBOOK_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }

        let redis_url = var("REDIS_URL");
        let db_url = var("DB_URL");
        match var("GRADEBOOK_STORAGE").as_deref().and_then(StorageBackend::parse) {
            Some(StorageBackend::Redis) => {
                self.storage.backend = StorageBackend::Redis;
                if let Some(url) = redis_url {
                    self.storage.url = url;
                }
            }
            Some(backend) => {
                self.storage.backend = backend;
                if let Some(url) = db_url {
                    self.storage.url = url;
                }
            }
            None => {
                if let Some(url) = db_url.or(redis_url) {
                    if let Some(backend) = StorageBackend::from_url(&url) {
                        self.storage.backend = backend;
                    }
                    self.storage.url = url;
                }
            }
        }

        if let Some(val) = var("GRADEBOOK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let actual = StorageBackend::from_url(&self.storage.url);
        if actual != Some(self.storage.backend) {
            return Err(ConfigError::Validation(format!(
                "storage url does not match the {} backend",
                self.storage.backend
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite:gradebook.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gradebookd=info,gradebook=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_vars(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).cloned());
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.url, "sqlite:gradebook.db?mode=rwc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [storage]
            backend = 'redis'
            url = 'redis://localhost:6379'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, StorageBackend::Redis);
        assert_eq!(config.storage.url, "redis://localhost:6379");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_url_that_does_not_match_backend() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Postgres;
        config.storage.url = "mysql://localhost/grades".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_select_redis_from_redis_url() {
        let config = with_vars(&[("REDIS_URL", "rediss://cache.example.com:6380")]);
        assert_eq!(config.storage.backend, StorageBackend::Redis);
        assert_eq!(config.storage.url, "rediss://cache.example.com:6380");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_select_sql_backend_from_db_url_scheme() {
        let config = with_vars(&[("DB_URL", "postgres://app@db/grades")]);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);

        let config = with_vars(&[("DB_URL", "sqlite::memory:")]);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn should_prefer_db_url_when_both_urls_set() {
        let config = with_vars(&[
            ("REDIS_URL", "redis://localhost"),
            ("DB_URL", "postgres://app@db/grades"),
        ]);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.url, "postgres://app@db/grades");
    }

    #[test]
    fn should_force_backend_from_storage_variable() {
        let config = with_vars(&[
            ("GRADEBOOK_STORAGE", "Redis"),
            ("REDIS_URL", "redis://localhost"),
            ("DB_URL", "postgres://app@db/grades"),
        ]);
        assert_eq!(config.storage.backend, StorageBackend::Redis);
        assert_eq!(config.storage.url, "redis://localhost");
    }

    #[test]
    fn should_flag_forced_backend_without_matching_url() {
        let config = with_vars(&[("GRADEBOOK_STORAGE", "postgres")]);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_override_bind_address() {
        let config = with_vars(&[("GRADEBOOK_BIND", "127.0.0.1:8080")]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");

        let config = with_vars(&[("GRADEBOOK_HOST", "10.0.0.5"), ("GRADEBOOK_PORT", "9000")]);
        assert_eq!(config.bind_addr(), "10.0.0.5:9000");
    }

    #[test]
    fn should_let_rust_log_win_over_gradebook_log() {
        let config = with_vars(&[("GRADEBOOK_LOG", "warn"), ("RUST_LOG", "trace")]);
        assert_eq!(config.logging.filter, "trace");
    }
}
