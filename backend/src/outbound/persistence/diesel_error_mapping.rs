//! Shared mapping from pool and Diesel failures to domain store errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StoreError;

use super::pool::PoolError;

/// Map pool errors to domain store errors.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors to domain store errors without leaking SQL details.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        DieselError::NotFound => StoreError::query("record not found"),
        _ => StoreError::query("database error"),
    }
}

/// Name of the violated unique constraint, when the error is one.
pub(crate) fn unique_violation_constraint(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name()
        }
        _ => None,
    }
}
