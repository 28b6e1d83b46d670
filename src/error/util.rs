//! Utility functions for error handling
//!
//! Maps SQLite failures onto the registry error taxonomy so callers can tell a
//! dangling reference from a bad value, a timeout or a dead store.

use rusqlite::ErrorCode;
use rusqlite::ffi;

use crate::error::RegistryError;

/// Classify a rusqlite error into a [`RegistryError`]
///
/// The raw SQLite message is logged at debug level and kept in the error's
/// detail, but the kind is what callers are expected to branch on.
#[must_use]
pub fn classify_sqlite_error(error: &rusqlite::Error) -> RegistryError {
    log::debug!("Classifying store error: {error}");
    match error {
        rusqlite::Error::SqliteFailure(failure, message) => {
            let detail = message.clone().unwrap_or_else(|| failure.to_string());
            match failure.code {
                ErrorCode::ConstraintViolation
                    if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
                {
                    RegistryError::ReferenceError(format!(
                        "a referenced record does not exist ({detail})"
                    ))
                }
                ErrorCode::ConstraintViolation => {
                    RegistryError::ValidationError(format!("value rejected by store ({detail})"))
                }
                ErrorCode::OperationInterrupted => RegistryError::TimeoutError(detail),
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied => RegistryError::ConnectivityError(detail),
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    RegistryError::TransactionError(detail)
                }
                _ => RegistryError::QueryError(detail),
            }
        }
        rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
            RegistryError::QueryError(format!("column {column} has an unexpected value: {source}"))
        }
        rusqlite::Error::InvalidColumnType(column, name, _) => {
            RegistryError::QueryError(format!("column {column} ({name}) has an unexpected type"))
        }
        other => RegistryError::QueryError(other.to_string()),
    }
}

/// Wrap a commit or rollback failure as a transaction error with context
#[must_use]
pub fn transaction_error(context: &str, error: &rusqlite::Error) -> RegistryError {
    match classify_sqlite_error(error) {
        // An interrupted commit is still a timeout from the caller's point of view
        timeout @ RegistryError::TimeoutError(_) => timeout,
        _ => RegistryError::TransactionError(format!("{context}: {error}")),
    }
}
