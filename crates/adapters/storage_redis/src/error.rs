//! Storage-specific error type wrapping redis errors.

use gradebook_domain::error::GradebookError;

/// Errors originating from the Redis storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A command or connection failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl From<StorageError> for GradebookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
