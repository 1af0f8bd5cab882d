//! `SQLite` implementation of [`GradeRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gradebook_app::ports::GradeRepository;
use gradebook_domain::error::GradebookError;
use gradebook_domain::grade::Grade;
use gradebook_domain::id::GradeId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Grade`].
struct Wrapper(Grade);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Grade {
            id: GradeId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            grade: row.try_get("grade")?,
        }))
    }
}

const NEXT_ID: &str =
    "UPDATE id_sequence SET last_id = last_id + 1 WHERE name = 'students' RETURNING last_id";
const INSERT: &str = "INSERT INTO students (id, name, grade) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, grade FROM students WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, grade FROM students ORDER BY id";
const UPDATE: &str = "UPDATE students SET name = ?, grade = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM students WHERE id = ?";

/// `SQLite`-backed grade repository.
///
/// Ids come from a dedicated `id_sequence` row so that they are reserved
/// before the insert and never reused after a delete.
pub struct SqliteGradeRepository {
    pool: SqlitePool,
}

impl SqliteGradeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl GradeRepository for SqliteGradeRepository {
    fn allocate_id(&self) -> impl Future<Output = Result<GradeId, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id: i64 = sqlx::query_scalar(NEXT_ID)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(GradeId::new(id))
        }
    }

    fn create(&self, grade: Grade) -> impl Future<Output = Result<Grade, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(grade.id.get())
                .bind(&grade.name)
                .bind(&grade.grade)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(grade)
        }
    }

    fn get_by_id(
        &self,
        id: GradeId,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Grade>, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        grade: Grade,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&grade.name)
                .bind(&grade.grade)
                .bind(grade.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(grade))
        }
    }

    fn delete(&self, id: GradeId) -> impl Future<Output = Result<bool, GradebookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
