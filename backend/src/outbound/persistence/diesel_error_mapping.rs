//! Shared Diesel error mapping for the repositories.
//!
//! Database failures are logged at `debug` with their kind and message, then
//! collapsed into a repository error through caller-supplied constructors so
//! driver detail never reaches clients.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Message carried by a pool error.
pub(super) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Name of the violated unique constraint, if `error` is a unique violation.
pub(super) fn unique_violation(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(info.constraint_name().unwrap_or_default())
        }
        _ => None,
    }
}

/// Collapse a Diesel error into a `query` or `connection` repository error.
pub(super) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Convert a domain revision into the `INTEGER` column type.
///
/// Revisions start at 1 and grow by one per write, so values beyond
/// `i32::MAX` are clamped rather than wrapped.
pub(super) fn revision_to_db(revision: u32) -> i32 {
    i32::try_from(revision).unwrap_or(i32::MAX)
}

/// Convert a stored revision back into the domain type.
pub(super) fn revision_from_db(revision: i32) -> u32 {
    u32::try_from(revision).unwrap_or_default()
}
