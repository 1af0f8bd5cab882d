//! Redis implementation of [`GradeRepository`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::LazyLock;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use gradebook_app::ports::GradeRepository;
use gradebook_domain::error::GradebookError;
use gradebook_domain::grade::Grade;
use gradebook_domain::id::GradeId;

use crate::error::StorageError;
use crate::keys::{GRADE_PATTERN, NEXT_ID_KEY, grade_key, parse_grade_key};

/// Overwrites both fields only if the hash already exists, so an update can
/// never resurrect a record deleted by a concurrent request.
static UPDATE_IF_EXISTS: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            redis.call('HSET', KEYS[1], 'name', ARGV[1], 'grade', ARGV[2])
            return 1
        end
        return 0
        ",
    )
});

/// Build a [`Grade`] from the fields of its hash.
///
/// An empty map means the key does not exist. Missing fields read as empty
/// strings.
fn grade_from_fields(id: GradeId, mut fields: HashMap<String, String>) -> Option<Grade> {
    if fields.is_empty() {
        return None;
    }
    Some(Grade {
        id,
        name: fields.remove("name").unwrap_or_default(),
        grade: fields.remove("grade").unwrap_or_default(),
    })
}

/// Redis-backed grade repository.
pub struct RedisGradeRepository {
    manager: ConnectionManager,
}

impl RedisGradeRepository {
    /// Create a new repository sharing the given connection manager.
    #[must_use]
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

impl GradeRepository for RedisGradeRepository {
    fn allocate_id(&self) -> impl Future<Output = Result<GradeId, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let id: i64 = con.incr(NEXT_ID_KEY, 1).await.map_err(StorageError::from)?;
            Ok(GradeId::new(id))
        }
    }

    fn create(&self, grade: Grade) -> impl Future<Output = Result<Grade, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let _: () = con
                .hset_multiple(
                    grade_key(grade.id),
                    &[("name", grade.name.as_str()), ("grade", grade.grade.as_str())],
                )
                .await
                .map_err(StorageError::from)?;

            Ok(grade)
        }
    }

    fn get_by_id(
        &self,
        id: GradeId,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let fields: HashMap<String, String> = con
                .hgetall(grade_key(id))
                .await
                .map_err(StorageError::from)?;

            Ok(grade_from_fields(id, fields))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Grade>, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let keys: Vec<String> = con.keys(GRADE_PATTERN).await.map_err(StorageError::from)?;

            let mut grades = Vec::with_capacity(keys.len());
            for key in keys {
                let Some(id) = parse_grade_key(&key) else {
                    tracing::warn!(%key, "skipping key without an integer id");
                    continue;
                };
                let fields: HashMap<String, String> = match con.hgetall(&key).await {
                    Ok(fields) => fields,
                    Err(err) => {
                        tracing::warn!(%key, error = %err, "skipping unreadable grade");
                        continue;
                    }
                };
                // The key may have been deleted since KEYS ran.
                if let Some(grade) = grade_from_fields(id, fields) {
                    grades.push(grade);
                }
            }
            grades.sort_by_key(|grade| grade.id);

            Ok(grades)
        }
    }

    fn update(
        &self,
        grade: Grade,
    ) -> impl Future<Output = Result<Option<Grade>, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let updated: i64 = UPDATE_IF_EXISTS
                .key(grade_key(grade.id))
                .arg(&grade.name)
                .arg(&grade.grade)
                .invoke_async(&mut con)
                .await
                .map_err(StorageError::from)?;

            Ok((updated == 1).then_some(grade))
        }
    }

    fn delete(&self, id: GradeId) -> impl Future<Output = Result<bool, GradebookError>> + Send {
        let mut con = self.manager.clone();
        async move {
            let removed: i64 = con.del(grade_key(id)).await.map_err(StorageError::from)?;
            Ok(removed > 0)
        }
    }
}
