//! Repository layer: entity-scoped statements
//!
//! Each function runs parameterized SQL against a connection handed in by the
//! caller, which is either a plain connection (reads) or a transaction from
//! [`crate::store::Store::write`]. Lookups by primary key return `Ok(None)`
//! for a missing row so that "not there" stays distinct from "query failed".
//!
//! Inserts into `Patient`, `Donation`, `Blood` and `Organ` are crate-private:
//! those rows are only created by the workflows in [`crate::workflow`].

pub mod donation;
pub mod donor;
pub mod hospital;
pub mod inventory;
pub mod patient;

use rusqlite::{Connection, OptionalExtension, Params};

use crate::error::Result;

/// Whether a row with the given id exists in `table`
///
/// `table` and `id_column` come from this crate, never from user input.
pub(crate) fn row_exists(conn: &Connection, table: &str, id_column: &str, id: i64) -> Result<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE {id_column} = ?1"),
            [id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Run a `SELECT COUNT(*)` style statement
pub(crate) fn count<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<i64> {
    Ok(conn.query_row(sql, params, |row| row.get(0))?)
}

/// Wrap user search text as a `LIKE` substring pattern, escaping wildcards
///
/// Statements using the pattern must declare `ESCAPE '\'`.
#[must_use]
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
