//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    db::is_constraint_violation,
    ownership::CATEGORY_TABLE,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if a category with the same name exists.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("INSERT INTO category (name) VALUES (?1) RETURNING id, name;")?
        .query_row((name.as_ref(),), map_row)
        .map_err(|error| map_unique_name_error(error, &name))
}

/// Retrieve all categories in the order they were created.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Rename a category and return the updated row.
///
/// # Errors
/// Returns [Error::NotFound] if the category doesn't exist, or
/// [Error::DuplicateCategoryName] if another category already has `new_name`.
pub fn update_category(
    category_id: CategoryId,
    new_name: CategoryName,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("UPDATE category SET name = ?1 WHERE id = ?2 RETURNING id, name;")?
        .query_row((new_name.as_ref(), category_id), map_row)
        .map_err(|error| map_unique_name_error(error, &new_name))
}

/// Delete a category by ID.
///
/// Records that referenced the category keep existing with no category.
///
/// # Errors
/// Returns [Error::NotFound] if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    CATEGORY_TABLE.delete(category_id, connection)
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );",
        (),
    )?;

    Ok(())
}

fn map_unique_name_error(error: rusqlite::Error, name: &CategoryName) -> Error {
    if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
        Error::DuplicateCategoryName(name.to_string())
    } else {
        error.into()
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, create_category, get_all_categories},
    };

    use super::{create_category_table, delete_category, update_category};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Groceries").unwrap();

        let category = create_category(name.clone(), &connection);

        let got = category.expect("Could not create category");
        assert!(got.id > 0);
        assert_eq!(got.name, name);
    }

    #[test]
    fn create_category_with_duplicate_name_fails() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Rent"), &connection)
            .expect("Could not create test category");

        let result = create_category(CategoryName::new_unchecked("Rent"), &connection);

        assert_eq!(result, Err(Error::DuplicateCategoryName("Rent".to_owned())));
    }

    #[test]
    fn get_all_categories_orders_by_creation() {
        let connection = get_test_db_connection();
        let first = create_category(CategoryName::new_unchecked("Zoo"), &connection).unwrap();
        let second = create_category(CategoryName::new_unchecked("Art"), &connection).unwrap();

        let got = get_all_categories(&connection).expect("Could not get categories");

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("Original"), &connection)
            .expect("Could not create test category");

        let new_name = CategoryName::new_unchecked("Updated");
        let updated = update_category(category.id, new_name.clone(), &connection)
            .expect("Could not update category");

        assert_eq!(updated.id, category.id);
        assert_eq!(updated.name, new_name);
        assert_eq!(get_all_categories(&connection), Ok(vec![updated]));
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = update_category(999999, CategoryName::new_unchecked("Updated"), &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_twice_returns_not_found() {
        let connection = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("ToDelete"), &connection)
            .expect("Could not create test category");

        assert_eq!(delete_category(category.id, &connection), Ok(()));
        assert_eq!(
            delete_category(category.id, &connection),
            Err(Error::NotFound)
        );
        assert_eq!(get_all_categories(&connection), Ok(vec![]));
    }
}
