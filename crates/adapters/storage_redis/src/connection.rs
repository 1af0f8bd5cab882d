//! Redis connection setup.

use redis::aio::ConnectionManager;

use crate::error::StorageError;

/// Configuration for the Redis storage adapter.
pub struct Config {
    /// Connection URL (`redis://host:6379/0`, or `rediss://` for TLS).
    pub redis_url: String,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `REDIS_URL` is not set.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            redis_url: std::env::var("REDIS_URL")?,
        })
    }

    /// Open a [`RedisConnection`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid or the server cannot be
    /// reached.
    pub async fn build(self) -> Result<RedisConnection, StorageError> {
        RedisConnection::initialize(&self.redis_url).await
    }
}

/// Holds the multiplexed connection manager.
///
/// Cloning the manager is cheap and every clone shares the same underlying
/// connection, which is re-established automatically after a failure.
pub struct RedisConnection {
    manager: ConnectionManager,
}

impl RedisConnection {
    async fn initialize(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }

    /// Borrow the underlying connection manager.
    #[must_use]
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }
}
