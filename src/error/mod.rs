//! Error handling for the donation registry.

pub mod util;

use crate::models::UnitKind;

/// Specialized error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A donor, hospital or other referenced row does not exist
    #[error("Reference error: {0}")]
    ReferenceError(String),

    /// Bad enum token, format or range
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Illegal inventory status change
    #[error("Invalid transition for {kind} unit {unit_id}: {from} -> {to}")]
    InvalidTransitionError {
        kind: UnitKind,
        unit_id: i64,
        from: String,
        to: String,
    },

    /// Commit, rollback or lock failure at the store
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Store unreachable or not a database
    #[error("Connectivity error: {0}")]
    ConnectivityError(String),

    /// Statement ran past the configured deadline
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Optimistic lock mismatch
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// Row addressed by primary key does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Error loading configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Read path failure
    #[error("Query error: {0}")]
    QueryError(String),
}

/// Discriminant of [`RegistryError`], for callers that branch on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Reference,
    Validation,
    InvalidTransition,
    Transaction,
    Connectivity,
    Timeout,
    Conflict,
    NotFound,
    Config,
    Query,
}

impl RegistryError {
    /// Get the kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ReferenceError(_) => ErrorKind::Reference,
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::InvalidTransitionError { .. } => ErrorKind::InvalidTransition,
            Self::TransactionError(_) => ErrorKind::Transaction,
            Self::ConnectivityError(_) => ErrorKind::Connectivity,
            Self::TimeoutError(_) => ErrorKind::Timeout,
            Self::ConflictError(_) => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::QueryError(_) => ErrorKind::Query,
        }
    }

    /// Message safe to show an end user.
    ///
    /// Store diagnostics (SQL fragments, constraint names) are left out; domain
    /// errors raised by this crate keep their text since it carries no internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ReferenceError(msg) | Self::ValidationError(msg) | Self::ConflictError(msg) => {
                msg.clone()
            }
            Self::InvalidTransitionError { .. } | Self::NotFound { .. } => self.to_string(),
            Self::TransactionError(_) => "The change could not be saved".to_string(),
            Self::ConnectivityError(_) => "The registry database is unavailable".to_string(),
            Self::TimeoutError(_) => "The operation took too long and was cancelled".to_string(),
            Self::ConfigError(_) => "The registry is misconfigured".to_string(),
            Self::QueryError(_) => "The data could not be loaded".to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Create a reference error
    pub fn reference(message: impl Into<String>) -> Self {
        Self::ReferenceError(message.into())
    }
}

impl From<rusqlite::Error> for RegistryError {
    fn from(error: rusqlite::Error) -> Self {
        util::classify_sqlite_error(&error)
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
