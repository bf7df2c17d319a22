//! Error mapping shared by the Postgres stores.

use crate::errors::StoreError;

/// Turn unique and check constraint violations into [`StoreError::Conflict`].
pub fn map_write_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error)
            if db_error.is_unique_violation() || db_error.is_check_violation() =>
        {
            StoreError::Conflict(db_error.message().to_string())
        }
        _ => StoreError::Database(error),
    }
}
