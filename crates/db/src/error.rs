//! Translation of sqlx errors into [`StoreError`].

use bistro_core::store::StoreError;

/// PostgreSQL SQLSTATE codes we classify explicitly.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error.
///
/// - Unique violations on `uq_*` constraints become [`StoreError::Conflict`].
/// - Check, not-null and foreign key violations become [`StoreError::Constraint`].
/// - Everything else is passed through as [`StoreError::Backend`].
pub fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown").to_string();
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                return StoreError::Conflict(constraint);
            }
            Some(FOREIGN_KEY_VIOLATION | NOT_NULL_VIOLATION | CHECK_VIOLATION) => {
                return StoreError::Constraint(constraint);
            }
            _ => {}
        }
    }
    StoreError::Backend(Box::new(err))
}
