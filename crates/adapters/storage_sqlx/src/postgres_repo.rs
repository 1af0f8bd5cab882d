//! `PostgreSQL` implementation of [`GradeRepository`].

use std::future::Future;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use gradebook_app::ports::GradeRepository;
use gradebook_domain::error::GradebookError;
use gradebook_domain::grade::Grade;
use gradebook_domain::id::GradeId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Grade`].
struct Wrapper(Grade);

impl<'r> FromRow<'r, PgRow> for Wrapper {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Grade {
            id: GradeId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            grade: row.try_get("grade")?,
        }))
    }
}

const NEXT_ID: &str = "SELECT nextval(pg_get_serial_sequence('students', 'id'))";
const INSERT: &str = "INSERT INTO students (id, name, grade) VALUES ($1, $2, $3)";
// The cast keeps reads working against tables created with a plain `SERIAL` id.
const SELECT_BY_ID: &str = "SELECT id::BIGINT AS id, name, grade FROM students WHERE id = $1";
const SELECT_ALL: &str = "SELECT id::BIGINT AS id, name, grade FROM students ORDER BY id";
const UPDATE: &str = "UPDATE students SET name = $1, grade = $2 WHERE id = $3";
const DELETE_BY_ID: &str = "DELETE FROM students WHERE id = $1";

/// `PostgreSQL`-backed grade repository.
///
/// Ids are drawn from the sequence behind the `students.id` serial column.
pub struct PgGradeRepository {
    pool: PgPool,
}

impl PgGradeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GradeRepository for PgGradeRepository {
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
