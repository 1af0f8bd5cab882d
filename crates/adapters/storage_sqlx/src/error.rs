//! Storage-specific error type wrapping sqlx errors.

use gradebook_domain::error::GradebookError;

/// Errors originating from the SQL storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The connection URL names a database this adapter does not drive.
    #[error("unsupported database url scheme: {0}")]
    UnsupportedScheme(String),
}

impl From<StorageError> for GradebookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
