//! Database initialization and helpers shared by the per-resource query modules.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, category::create_category_table, entry::create_entry_tables,
    journal::create_journal_tables, savings_goal::create_savings_goal_table,
};

/// Create every application table that does not exist yet and seed the
/// journal questions.
///
/// Foreign key enforcement is switched on for `connection`, which SQLite
/// leaves off by default.
///
/// # Errors
/// Returns an error if any of the SQL statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_entry_tables(&transaction)?;
    create_savings_goal_table(&transaction)?;
    create_journal_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// Whether `error` is an SQLite constraint failure with the given extended code,
/// e.g. [rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE].
pub(crate) fn is_constraint_violation(error: &rusqlite::Error, extended_code: i32) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == extended_code
    )
}
