//! Key layout shared by every Redis operation.

use gradebook_domain::id::GradeId;

/// Prefix of the per-record hash keys.
pub const GRADE_PREFIX: &str = "grade:";

/// Glob matching every record key and nothing else.
///
/// The counter lives under `grades:` so it never matches.
pub const GRADE_PATTERN: &str = "grade:*";

/// Counter incremented to allocate ids.
pub const NEXT_ID_KEY: &str = "grades:next_id";

/// Hash key holding the record with `id`.
#[must_use]
pub fn grade_key(id: GradeId) -> String {
    format!("{GRADE_PREFIX}{id}")
}

/// Recover the id from a record key, or `None` if the key is foreign.
///
/// Only keys that [`grade_key`] could have produced are accepted, so a
/// listed record can always be fetched back by its id.
#[must_use]
pub fn parse_grade_key(key: &str) -> Option<GradeId> {
    GradeId::parse_canonical(key.strip_prefix(GRADE_PREFIX)?)
}
