//! Repository error type.
//!
//! Lifecycle operations mix domain failures ([`CoreError`]) with database
//! failures (`sqlx::Error`); this wrapper lets them propagate both with `?`.
//! Plain CRUD repositories return `sqlx::Error` directly.

use rifugio_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// True when `err` is a PostgreSQL unique-constraint violation (23505) on
/// the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
