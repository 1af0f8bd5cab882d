//! Storage port — repository trait for grade persistence.

use std::future::Future;

use gradebook_domain::error::GradebookError;
use gradebook_domain::grade::Grade;
use gradebook_domain::id::GradeId;

/// Persistence for [`Grade`] records.
///
/// Implementations own their connection handle (pool or connection manager)
/// and acquire a connection per call; nothing is shared mutably between
/// requests.
pub trait GradeRepository {
    /// Reserve a fresh identifier that no previous call has returned.
    ///
    /// Ids are never reused, even when the record that held one is deleted
    /// or the id was allocated but never persisted.
    fn allocate_id(&self) -> impl Future<Output = Result<GradeId, GradebookError>> + Send;

    /// Persist a new record carrying an id from [`Self::allocate_id`].
    fn create(&self, grade: Grade) -> impl Future<Output = Result<Grade, GradebookError>> + Send;

    fn get_by_id(
        &self,
        id: GradeId,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send;

    /// Every stored record. Callers must not rely on the order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Grade>, GradebookError>> + Send;

    /// Overwrite `name` and `grade` of an existing record.
    ///
    /// Resolves to `None` when no record has `grade.id`; never inserts.
    fn update(
        &self,
        grade: Grade,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send;

    /// Remove a record, resolving to `false` when it did not exist.
    fn delete(&self, id: GradeId) -> impl Future<Output = Result<bool, GradebookError>> + Send;
}
