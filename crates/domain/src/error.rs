//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GradebookError`] via `#[from]`. The `Display` output of the
//! validation and not-found variants is the exact message returned to
//! HTTP clients.

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum GradebookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An adapter failed to talk to its backing store.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Client input violated a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("Missing name or grade")]
    MissingField { field: &'static str },
}

/// No record exists with the requested identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_client_facing_messages() {
        let err = GradebookError::from(ValidationError::MissingField { field: "name" });
        assert_eq!(err.to_string(), "Missing name or grade");

        let err = GradebookError::from(NotFoundError {
            entity: "Grade",
            id: "42".to_string(),
        });
        assert_eq!(err.to_string(), "Grade not found");
    }

    #[test]
    fn should_keep_source_when_wrapping_storage_error() {
        let io = std::io::Error::other("connection refused");
        let err = GradebookError::Storage(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }
}
