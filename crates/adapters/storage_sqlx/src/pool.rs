//! Connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{PgPool, SqlitePool};

use crate::error::StorageError;

const MAX_POSTGRES_CONNECTIONS: u32 = 10;

/// SQL engines this adapter can drive, inferred from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Pick the engine matching a connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UnsupportedScheme`] for any other scheme.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(StorageError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Configuration for the SQL storage adapter.
pub struct Config {
    /// Connection URL (e.g. `postgres://user@host/db`, `sqlite:grades.db`
    /// or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DB_URL` is not set.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("DB_URL")?,
        })
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool (creating a missing `SQLite` file) and
    /// runs all pending migrations for the selected engine.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the scheme is unsupported or the
    /// connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// Holds the connection pool for the configured engine.
///
/// Pools are cheap to clone; repositories keep their own clone and acquire a
/// connection per query.
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        match Backend::from_url(database_url)? {
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(MAX_POSTGRES_CONNECTIONS)
                    .connect(database_url)
                    .await?;
                sqlx::migrate!("./migrations/postgres").run(&pool).await?;
                Ok(Self::Postgres(pool))
            }
            Backend::Sqlite => {
                let options =
                    SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
                let pool = SqlitePool::connect_with(options).await?;
                sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
                Ok(Self::Sqlite(pool))
            }
        }
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        match self {
            Self::Postgres(_) => Backend::Postgres,
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}
