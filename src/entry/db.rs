//! Database operations for income and expense records.

use rusqlite::{Connection, Row};

use crate::{
    Error, UserId,
    category::CategoryId,
    db::is_constraint_violation,
    entry::{Entry, EntryChanges, EntryId, EntryKind, NewEntry},
};

/// Store a new income or expense for `user_id` and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if `category_id` does not refer to a category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_entry(
    kind: EntryKind,
    user_id: &UserId,
    entry: NewEntry,
    connection: &Connection,
) -> Result<Entry, Error> {
    let category_id = entry.category_id;

    connection
        .prepare(&format!(
            "INSERT INTO {} (user_id, amount, category_id, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, amount, category_id, date, description",
            kind.table().name()
        ))?
        .query_row(
            (
                user_id,
                entry.amount,
                entry.category_id,
                entry.date,
                entry.description,
            ),
            map_entry_row,
        )
        .map_err(|error| map_category_error(error, category_id))
}

/// Retrieve all of a user's entries, most recent date first.
pub fn get_entries(
    kind: EntryKind,
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Entry>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, user_id, amount, category_id, date, description FROM {}
             WHERE user_id = ?1
             ORDER BY date DESC, id DESC",
            kind.table().name()
        ))?
        .query_map([user_id], map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Apply `changes` to the entry `entry_id` owned by `user_id` and return the updated row.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the entry does not exist or belongs to another user,
/// - [Error::InvalidCategory] if the new category ID does not refer to a category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_entry(
    kind: EntryKind,
    entry_id: EntryId,
    user_id: &UserId,
    changes: EntryChanges,
    connection: &Connection,
) -> Result<Entry, Error> {
    let category_id = changes.category_id.unwrap_or_default();

    connection
        .prepare(&format!(
            "UPDATE {}
             SET amount = COALESCE(?1, amount),
                 category_id = COALESCE(?2, category_id),
                 date = COALESCE(?3, date),
                 description = COALESCE(?4, description)
             WHERE id = ?5 AND user_id = ?6
             RETURNING id, user_id, amount, category_id, date, description",
            kind.table().name()
        ))?
        .query_row(
            (
                changes.amount,
                changes.category_id,
                changes.date,
                changes.description,
                entry_id,
                user_id,
            ),
            map_entry_row,
        )
        .map_err(|error| map_category_error(error, category_id))
}

/// Delete the entry `entry_id` if it belongs to `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the entry does not exist or belongs to another user.
pub fn delete_entry(
    kind: EntryKind,
    entry_id: EntryId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    kind.table().delete(entry_id, user_id, connection)
}

/// Initialize the income and expense tables and their indexes.
///
/// The category table must exist already.
pub fn create_entry_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    for kind in [EntryKind::Income, EntryKind::Expense] {
        let table = kind.table().name();

        connection.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL,
                category_id INTEGER,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_{table}_user_date ON {table}(user_id, date);"
        ))?;
    }

    Ok(())
}

fn map_category_error(error: rusqlite::Error, category_id: CategoryId) -> Error {
    if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
        Error::InvalidCategory(category_id)
    } else {
        error.into()
    }
}

fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    Ok(Entry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        category_id: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
    })
}

#[cfg(test)]
mod entry_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, UserId,
        category::{CategoryName, create_category, create_category_table},
        entry::{EntryChanges, EntryKind, NewEntry},
    };

    use super::{create_entry, create_entry_tables, delete_entry, get_entries, update_entry};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .pragma_update(None, "foreign_keys", "ON")
            .unwrap();
        create_category_table(&connection).expect("Could not create category table");
        create_entry_tables(&connection).expect("Could not create entry tables");
        create_category(CategoryName::new_unchecked("Tutoring"), &connection).unwrap();
        connection
    }

    fn new_entry(amount: f64, date: time::Date) -> NewEntry {
        NewEntry {
            amount,
            category_id: 1,
            date,
            description: "tutoring".to_owned(),
        }
    }

    #[test]
    fn create_entry_echoes_submitted_fields() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let entry = new_entry(50.0, date!(2025 - 04 - 01));

        let got = create_entry(EntryKind::Income, &user_id, entry.clone(), &connection)
            .expect("Could not create income");

        assert!(got.id > 0);
        assert_eq!(got.user_id, user_id);
        assert_eq!(got.amount, entry.amount);
        assert_eq!(got.category_id, Some(entry.category_id));
        assert_eq!(got.date, entry.date);
        assert_eq!(got.description, entry.description);
    }

    #[test]
    fn create_entry_with_unknown_category_fails() {
        let connection = get_test_db_connection();
        let entry = NewEntry {
            category_id: 99,
            ..new_entry(1.0, date!(2025 - 04 - 01))
        };

        let user_id = UserId::new_unchecked("u1");
        let got = create_entry(EntryKind::Expense, &user_id, entry, &connection);

        assert_eq!(got, Err(Error::InvalidCategory(99)));
    }

    #[test]
    fn income_and_expenses_are_kept_apart() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        create_entry(
            EntryKind::Income,
            &user_id,
            new_entry(10.0, date!(2025 - 04 - 01)),
            &connection,
        )
        .unwrap();

        let expenses = get_entries(EntryKind::Expense, &user_id, &connection).unwrap();

        assert!(expenses.is_empty());
    }

    #[test]
    fn get_entries_is_scoped_to_user_and_ordered_by_date_descending() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let older = create_entry(
            EntryKind::Expense,
            &user_id,
            new_entry(1.0, date!(2025 - 01 - 01)),
            &connection,
        )
        .unwrap();
        let newer = create_entry(
            EntryKind::Expense,
            &user_id,
            new_entry(2.0, date!(2025 - 03 - 01)),
            &connection,
        )
        .unwrap();
        create_entry(
            EntryKind::Expense,
            &UserId::new_unchecked("u2"),
            new_entry(3.0, date!(2025 - 02 - 01)),
            &connection,
        )
        .unwrap();

        let got = get_entries(EntryKind::Expense, &user_id, &connection).unwrap();

        assert_eq!(got, vec![newer, older]);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let entry = create_entry(
            EntryKind::Income,
            &user_id,
            new_entry(50.0, date!(2025 - 04 - 01)),
            &connection,
        )
        .unwrap();

        let changes = EntryChanges {
            amount: Some(75.5),
            ..Default::default()
        };
        let got = update_entry(EntryKind::Income, entry.id, &user_id, changes, &connection)
            .expect("Could not update income");

        assert_eq!(got.amount, 75.5);
        assert_eq!(got.date, entry.date);
        assert_eq!(got.description, entry.description);
        assert_eq!(got.category_id, entry.category_id);
    }

    #[test]
    fn update_of_another_users_entry_is_not_found_and_changes_nothing() {
        let connection = get_test_db_connection();
        let owner = UserId::new_unchecked("u1");
        let entry = create_entry(
            EntryKind::Income,
            &owner,
            new_entry(50.0, date!(2025 - 04 - 01)),
            &connection,
        )
        .unwrap();

        let changes = EntryChanges {
            amount: Some(1.0),
            ..Default::default()
        };
        let got = update_entry(
            EntryKind::Income,
            entry.id,
            &UserId::new_unchecked("intruder"),
            changes,
            &connection,
        );

        assert_eq!(got, Err(Error::NotFound));
        assert_eq!(
            get_entries(EntryKind::Income, &owner, &connection).unwrap(),
            vec![entry]
        );
    }

    #[test]
    fn delete_twice_is_not_found_the_second_time() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let entry = create_entry(
            EntryKind::Expense,
            &user_id,
            new_entry(5.0, date!(2025 - 04 - 01)),
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_entry(EntryKind::Expense, entry.id, &user_id, &connection),
            Ok(())
        );
        assert_eq!(
            delete_entry(EntryKind::Expense, entry.id, &user_id, &connection),
            Err(Error::NotFound)
        );
        assert!(
            get_entries(EntryKind::Expense, &user_id, &connection)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn deleting_category_keeps_entry_without_category() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        create_entry(
            EntryKind::Expense,
            &user_id,
            new_entry(5.0, date!(2025 - 04 - 01)),
            &connection,
        )
        .unwrap();

        connection.execute("DELETE FROM category WHERE id = 1", []).unwrap();

        let got = get_entries(EntryKind::Expense, &user_id, &connection).unwrap();
        assert_eq!(got[0].category_id, None);
    }
}
