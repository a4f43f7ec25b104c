use thiserror::Error;

#[cfg(test)]
pub mod memory;

/// Failures reported by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Map a unique-constraint violation on `users.email` to [`StoreError::EmailTaken`].
pub(crate) fn map_unique_email(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::EmailTaken,
        _ => StoreError::Database(err),
    }
}
