//! Scoped access to the registry database
//!
//! The store owns a single SQLite connection. Every operation acquires it for
//! the duration of one closure: reads run directly on the connection, writes
//! run inside an immediate transaction that is committed when the closure
//! succeeds and rolled back when it fails. Nothing is held open between
//! operations.
//!
//! A statement deadline is armed for each scope. SQLite's progress handler
//! checks it while statements run and interrupts any statement that overruns,
//! which surfaces as [`RegistryError::TimeoutError`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::config::RegistryConfig;
use crate::error::util::transaction_error;
use crate::error::{RegistryError, Result};
use crate::schema;

/// Virtual machine instructions between deadline checks
const PROGRESS_INTERVAL: i32 = 1_000;

type DeadlineSlot = Arc<Mutex<Option<Instant>>>;

/// Handle to the registry database
pub struct Store {
    conn: Mutex<Connection>,
    deadline: DeadlineSlot,
    statement_timeout: Duration,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("statement_timeout", &self.statement_timeout)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Open the database named in the configuration and initialize its schema
    ///
    /// Any failure here is a [`RegistryError::ConnectivityError`]: without a
    /// store there is no registry to operate on.
    pub fn open(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.database_path)
        }
        .map_err(|e| {
            RegistryError::ConnectivityError(format!(
                "failed to open {}: {e}",
                config.database_path
            ))
        })?;

        let store = Self::from_connection(conn, config).map_err(|e| match e {
            RegistryError::ConnectivityError(_) => e,
            other => RegistryError::ConnectivityError(format!(
                "failed to initialize {}: {other}",
                config.database_path
            )),
        })?;
        log::info!("Opened registry database at {}", config.database_path);
        Ok(store)
    }

    /// Open a private in-memory database with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&RegistryConfig::default())
    }

    fn from_connection(conn: Connection, config: &RegistryConfig) -> Result<Self> {
        conn.busy_timeout(config.busy_timeout())?;

        let deadline: DeadlineSlot = Arc::new(Mutex::new(None));
        let handler_deadline = Arc::clone(&deadline);
        conn.progress_handler(
            PROGRESS_INTERVAL,
            Some(move || {
                // Returning true interrupts the running statement
                handler_deadline
                    .lock()
                    .map(|slot| slot.is_some_and(|limit| Instant::now() >= limit))
                    .unwrap_or(false)
            }),
        );

        schema::initialize(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            deadline,
            statement_timeout: config.statement_timeout(),
        })
    }

    /// Run a read-only closure against the connection
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.acquire()?;
        let _deadline = self.arm_deadline();
        f(&conn)
    }

    /// Run a closure inside one transaction
    ///
    /// Commits when the closure returns `Ok`. On `Err` the transaction is
    /// rolled back before the error is returned; a failed rollback is reported
    /// as a [`RegistryError::TransactionError`] in its place. When SQLite has
    /// already rolled back on its own, as it does for an interrupted write, the
    /// closure's error is returned unchanged.
    pub fn write<T, F>(&self, operation: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.acquire()?;
        let _deadline = self.arm_deadline();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| transaction_error(&format!("failed to begin {operation}"), &e))?;
        log::debug!("Began transaction for {operation}");

        match f(&tx) {
            Ok(value) => {
                tx.commit()
                    .map_err(|e| transaction_error(&format!("failed to commit {operation}"), &e))?;
                log::info!("Committed {operation}");
                Ok(value)
            }
            Err(error) => {
                if tx.is_autocommit() {
                    // SQLite already rolled back, e.g. after an interrupt
                    log::warn!("{operation} was rolled back by the store: {error}");
                    drop(tx);
                    return Err(error);
                }
                log::warn!("Rolling back {operation}: {error}");
                tx.rollback().map_err(|e| {
                    transaction_error(
                        &format!("failed to roll back {operation} after '{error}'"),
                        &e,
                    )
                })?;
                Err(error)
            }
        }
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            RegistryError::TransactionError("Failed to acquire lock on connection".to_string())
        })
    }

    fn arm_deadline(&self) -> DeadlineGuard<'_> {
        let limit = Instant::now() + self.statement_timeout;
        *self.deadline.lock().unwrap_or_else(PoisonError::into_inner) = Some(limit);
        DeadlineGuard {
            slot: &self.deadline,
        }
    }

    /// Run raw SQL outside any transaction, for fault injection in tests
    #[cfg(test)]
    pub(crate) fn execute_batch_unchecked(&self, sql: &str) -> Result<()> {
        let conn = self.acquire()?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

/// Clears the deadline when the scope ends, on every exit path
struct DeadlineGuard<'a> {
    slot: &'a Mutex<Option<Instant>>,
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
