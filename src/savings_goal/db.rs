//! Database operations for savings goals.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, UserId,
    category::CategoryId,
    db::is_constraint_violation,
    ownership::SAVINGS_GOAL_TABLE,
    savings_goal::{NewSavingsGoal, SavingsGoal, SavingsGoalChanges, SavingsGoalId},
};

const GOAL_COLUMNS: &str = "id, user_id, goal_name, target_amount, current_amount, target_date, \
    category_id, description, completed, created_at, updated_at";

/// Store a new savings goal for `user_id`.
///
/// `created_at` and `updated_at` are both set to the current time.
///
/// # Errors
/// Returns [Error::InvalidCategory] if `category_id` does not refer to a category.
pub fn create_savings_goal(
    user_id: &UserId,
    goal: NewSavingsGoal,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    let now = OffsetDateTime::now_utc();
    let category_id = goal.category_id;

    connection
        .prepare(&format!(
            "INSERT INTO savings_goal (user_id, goal_name, target_amount, current_amount,
                target_date, category_id, description, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             RETURNING {GOAL_COLUMNS}"
        ))?
        .query_row(
            (
                user_id,
                goal.goal_name,
                goal.target_amount,
                goal.current_amount,
                goal.target_date,
                goal.category_id,
                goal.description,
                goal.completed,
                now,
            ),
            map_goal_row,
        )
        .map_err(|error| map_category_error(error, category_id))
}

/// Retrieve all of a user's savings goals, newest first.
pub fn get_savings_goals(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<SavingsGoal>, Error> {
    connection
        .prepare(&format!(
            "SELECT {GOAL_COLUMNS} FROM savings_goal WHERE user_id = ?1 ORDER BY id DESC"
        ))?
        .query_map([user_id], map_goal_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Apply `changes` to a user's savings goal and bump its `updated_at`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the goal does not exist or belongs to another user,
/// - [Error::InvalidCategory] if the new category ID does not refer to a category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_savings_goal(
    goal_id: SavingsGoalId,
    user_id: &UserId,
    changes: SavingsGoalChanges,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    let category_id = changes.category_id.unwrap_or_default();

    connection
        .prepare(&format!(
            "UPDATE savings_goal
             SET goal_name = COALESCE(?1, goal_name),
                 target_amount = COALESCE(?2, target_amount),
                 current_amount = COALESCE(?3, current_amount),
                 target_date = COALESCE(?4, target_date),
                 category_id = COALESCE(?5, category_id),
                 description = COALESCE(?6, description),
                 completed = COALESCE(?7, completed),
                 updated_at = ?8
             WHERE id = ?9 AND user_id = ?10
             RETURNING {GOAL_COLUMNS}"
        ))?
        .query_row(
            (
                changes.goal_name,
                changes.target_amount,
                changes.current_amount,
                changes.target_date,
                changes.category_id,
                changes.description,
                changes.completed,
                OffsetDateTime::now_utc(),
                goal_id,
                user_id,
            ),
            map_goal_row,
        )
        .map_err(|error| map_category_error(error, category_id))
}

/// Delete a user's savings goal.
///
/// # Errors
/// Returns [Error::NotFound] if the goal does not exist or belongs to another user.
pub fn delete_savings_goal(
    goal_id: SavingsGoalId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    SAVINGS_GOAL_TABLE.delete(goal_id, user_id, connection)
}

/// Initialize the savings goal table.
///
/// The category table must exist already.
pub fn create_savings_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS savings_goal (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            goal_name TEXT NOT NULL,
            target_amount REAL NOT NULL,
            current_amount REAL NOT NULL DEFAULT 0,
            target_date TEXT NOT NULL,
            category_id INTEGER,
            description TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_savings_goal_user ON savings_goal(user_id);",
    )?;

    Ok(())
}

fn map_category_error(error: rusqlite::Error, category_id: CategoryId) -> Error {
    if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
        Error::InvalidCategory(category_id)
    } else {
        error.into()
    }
}

fn map_goal_row(row: &Row) -> Result<SavingsGoal, rusqlite::Error> {
    Ok(SavingsGoal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        goal_name: row.get(2)?,
        target_amount: row.get(3)?,
        current_amount: row.get(4)?,
        target_date: row.get(5)?,
        category_id: row.get(6)?,
        description: row.get(7)?,
        completed: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
