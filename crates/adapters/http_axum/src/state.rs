//! Shared application state for axum handlers.

use std::sync::Arc;

use gradebook_app::ports::GradeRepository;
use gradebook_app::services::grade_service::GradeService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch. The store
/// handle lives inside the service, so every request reaches the store
/// through this state rather than through a global connection.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Grade CRUD service.
    pub grade_service: Arc<GradeService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            grade_service: Arc::clone(&self.grade_service),
        }
    }
}

impl<R> AppState<R>
where
    R: GradeRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(grade_service: GradeService<R>) -> Self {
        Self {
            grade_service: Arc::new(grade_service),
        }
    }
}
