//! Grade service — use-cases for managing grade records.

use gradebook_domain::error::{GradebookError, NotFoundError};
use gradebook_domain::grade::{Grade, GradeDraft};
use gradebook_domain::id::GradeId;

use crate::ports::GradeRepository;

/// Application service for grade CRUD operations.
pub struct GradeService<R> {
    repo: R,
}

fn not_found(id: impl ToString) -> GradebookError {
    NotFoundError {
        entity: "Grade",
        id: id.to_string(),
    }
    .into()
}

impl<R: GradeRepository> GradeService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[cfg(test)]
    fn repository(&self) -> &R {
        &self.repo
    }

    /// List every grade.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_grades(&self) -> Result<Vec<Grade>, GradebookError> {
        self.repo.get_all().await
    }

    /// Look up a grade by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::NotFound`] when no grade with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_grade(&self, id: GradeId) -> Result<Grade, GradebookError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate the draft, allocate an id, and persist the new grade.
    ///
    /// The store is not touched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::Validation`] if `name` or `grade` is missing
    /// or empty, or a storage error from the repository.
    pub async fn create_grade(&self, draft: GradeDraft) -> Result<Grade, GradebookError> {
        draft.validate()?;
        let id = self.repo.allocate_id().await?;
        let grade = draft.into_grade(id)?;
        let created = self.repo.create(grade).await?;
        tracing::info!(grade_id = %created.id, "grade created");
        Ok(created)
    }

    /// Replace the name and grade of an existing record.
    ///
    /// Existence is checked before the draft is validated, so an unknown id
    /// reports [`GradebookError::NotFound`] even when the body is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::NotFound`] when no grade with `id` exists
    /// (including when it is deleted concurrently),
    /// [`GradebookError::Validation`] if the draft is incomplete, or a
    /// storage error from the repository.
    pub async fn update_grade(
        &self,
        id: GradeId,
        draft: GradeDraft,
    ) -> Result<Grade, GradebookError> {
        self.get_grade(id).await?;
        let grade = draft.into_grade(id)?;
        let updated = self
            .repo
            .update(grade)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(grade_id = %id, "grade updated");
        Ok(updated)
    }

    /// Delete a grade by id.
    ///
    /// # Errors
    ///
    /// Returns [`GradebookError::NotFound`] when no grade with `id` exists,
    /// or a storage error from the repository.
    pub async fn delete_grade(&self, id: GradeId) -> Result<(), GradebookError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(grade_id = %id, "grade deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_domain::error::ValidationError;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryGradeRepo {
        next_id: AtomicI64,
        writes: AtomicUsize,
        store: Mutex<BTreeMap<GradeId, Grade>>,
    }

    impl InMemoryGradeRepo {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl GradeRepository for InMemoryGradeRepo {
        fn allocate_id(
            &self,
        ) -> impl Future<Output = Result<GradeId, GradebookError>> + Send {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(GradeId::new(id)) }
        }

        fn create(
            &self,
            grade: Grade,
        ) -> impl Future<Output = Result<Grade, GradebookError>> + Send {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut store = self.store.lock().unwrap();
            store.insert(grade.id, grade.clone());
            async { Ok(grade) }
        }

        fn get_by_id(
            &self,
            id: GradeId,
        ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Grade>, GradebookError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Grade> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            grade: Grade,
        ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut store = self.store.lock().unwrap();
            let result = store.get_mut(&grade.id).map(|existing| {
                *existing = grade.clone();
                grade
            });
            async { Ok(result) }
        }

        fn delete(
            &self,
            id: GradeId,
        ) -> impl Future<Output = Result<bool, GradebookError>> + Send {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut store = self.store.lock().unwrap();
            let removed = store.remove(&id).is_some();
            async move { Ok(removed) }
        }
    }

    fn make_service() -> GradeService<InMemoryGradeRepo> {
        GradeService::new(InMemoryGradeRepo::default())
    }

    #[tokio::test]
    async fn should_create_grade_with_fresh_id_when_valid() {
        let svc = make_service();

        let first = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();
        let second = svc.create_grade(GradeDraft::new("Bob", "B")).await.unwrap();
        assert_eq!(first.id, GradeId::new(1));
        assert_eq!(second.id, GradeId::new(2));

        let fetched = svc.get_grade(first.id).await.unwrap();
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.grade, "A");
    }

    #[tokio::test]
    async fn should_reject_create_without_touching_store_when_name_is_empty() {
        let svc = make_service();

        let result = svc.create_grade(GradeDraft::new("", "A")).await;
        assert!(matches!(
            result,
            Err(GradebookError::Validation(ValidationError::MissingField { field: "name" }))
        ));
        assert_eq!(svc.repository().writes(), 0);
        assert!(svc.list_grades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_grade_missing() {
        let svc = make_service();
        let result = svc.get_grade(GradeId::new(99)).await;
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_grades() {
        let svc = make_service();
        for (name, grade) in [("Ann", "A"), ("Bob", "B"), ("Cid", "C")] {
            svc.create_grade(GradeDraft::new(name, grade)).await.unwrap();
        }

        let all = svc.list_grades().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|g| g.name == "Cid" && g.grade == "C"));
    }

    #[tokio::test]
    async fn should_update_grade_keeping_id() {
        let svc = make_service();
        let created = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();

        let updated = svc
            .update_grade(created.id, GradeDraft::new("Ann", "B"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.grade, "B");
        assert_eq!(svc.get_grade(created.id).await.unwrap().grade, "B");
    }

    #[tokio::test]
    async fn should_report_not_found_before_validation_on_update() {
        let svc = make_service();
        let result = svc.update_grade(GradeId::new(7), GradeDraft::default()).await;
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_update_without_mutation_when_grade_missing() {
        let svc = make_service();
        let created = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();
        let writes = svc.repository().writes();

        let draft = GradeDraft {
            name: Some("Ann".to_string()),
            grade: None,
        };
        let result = svc.update_grade(created.id, draft).await;
        assert!(matches!(result, Err(GradebookError::Validation(_))));
        assert_eq!(svc.repository().writes(), writes);
        assert_eq!(svc.get_grade(created.id).await.unwrap().grade, "A");
    }

    #[tokio::test]
    async fn should_delete_grade() {
        let svc = make_service();
        let created = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();

        svc.delete_grade(created.id).await.unwrap();

        let result = svc.get_grade(created.id).await;
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_twice() {
        let svc = make_service();
        let created = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();
        svc.delete_grade(created.id).await.unwrap();

        let result = svc.delete_grade(created.id).await;
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_not_reuse_id_after_delete() {
        let svc = make_service();
        let first = svc.create_grade(GradeDraft::new("Ann", "A")).await.unwrap();
        svc.delete_grade(first.id).await.unwrap();

        let second = svc.create_grade(GradeDraft::new("Bob", "B")).await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
