//! Declared ownership policy for every resource table.
//!
//! A table is either shared (admin-managed rows any caller may change) or
//! owned (every row belongs to exactly one user). Owned tables only hand out
//! operations that take the owner's [UserId], so a delete or update that
//! forgets the ownership predicate does not compile.

use rusqlite::Connection;

use crate::{Error, UserId, database_id::DatabaseId};

/// A table whose rows are not scoped to a user.
#[derive(Debug)]
pub struct SharedTable(&'static str);

/// A table whose rows each belong to one user via a `user_id` column.
#[derive(Debug)]
pub struct OwnedTable(&'static str);

pub const CATEGORY_TABLE: SharedTable = SharedTable("category");
pub const INCOME_TABLE: OwnedTable = OwnedTable("income");
pub const EXPENSE_TABLE: OwnedTable = OwnedTable("expense");
pub const SAVINGS_GOAL_TABLE: OwnedTable = OwnedTable("savings_goal");
pub const JOURNAL_ANSWER_TABLE: OwnedTable = OwnedTable("journal_answer");

impl SharedTable {
    /// Delete the row with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no row has `id`.
    pub fn delete(&self, id: DatabaseId, connection: &Connection) -> Result<(), Error> {
        let rows_affected =
            connection.execute(&format!("DELETE FROM {} WHERE id = ?1", self.0), [id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl OwnedTable {
    /// The SQL table name.
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Delete the row with `id` if it belongs to `owner`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no row has `id`, or the row belongs to
    /// another user.
    pub fn delete(
        &self,
        id: DatabaseId,
        owner: &UserId,
        connection: &Connection,
    ) -> Result<(), Error> {
        let rows_affected = connection.execute(
            &format!("DELETE FROM {} WHERE id = ?1 AND user_id = ?2", self.0),
            (id, owner),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Count the rows owned by `owner`.
    pub fn count(&self, owner: &UserId, connection: &Connection) -> Result<u64, Error> {
        let count: i64 = connection.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", self.0),
            [owner],
            |row| row.get(0),
        )?;

        u64::try_from(count)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, count).into())
    }
}
