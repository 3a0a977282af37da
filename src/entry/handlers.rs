//! Route handlers shared by the income and expense ledgers.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::{get, put},
};
use rusqlite::Connection;

use crate::{
    Error, UserId,
    db::lock_connection,
    extract::PathParams,
    endpoints::format_endpoint,
    entry::{
        Entry, EntryChanges, EntryId, EntryKind, NewEntryPayload,
        db::{create_entry, delete_entry, get_entries, update_entry},
    },
    json::JsonBody,
};

/// The state needed for one ledger's handlers.
#[derive(Debug, Clone)]
pub struct EntryState {
    pub kind: EntryKind,
    pub db_connection: Arc<Mutex<Connection>>,
}

/// Build the routes for one ledger, e.g. `/users/{user_id}/incomes`.
///
/// The returned router already has its state, so it can be merged into a
/// router with any state type.
pub fn entry_router<S>(kind: EntryKind, db_connection: Arc<Mutex<Connection>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            kind.collection_endpoint(),
            get(list_entries_endpoint).post(create_entry_endpoint),
        )
        .route(
            kind.item_endpoint(),
            put(update_entry_endpoint).delete(delete_entry_endpoint),
        )
        .with_state(EntryState {
            kind,
            db_connection,
        })
}

/// List a user's entries, most recent first.
pub async fn list_entries_endpoint(
    State(state): State<EntryState>,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<Vec<Entry>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_entries(state.kind, &user_id, &connection).map(Json)
}

/// Create an entry for a user. Responds with 201 Created and the stored entry.
pub async fn create_entry_endpoint(
    State(state): State<EntryState>,
    PathParams(user_id): PathParams<UserId>,
    JsonBody(payload): JsonBody<NewEntryPayload>,
) -> Result<impl IntoResponse, Error> {
    let new_entry = payload.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let entry = create_entry(state.kind, &user_id, new_entry, &connection)?;
    tracing::info!(
        "Created {} {} for user {user_id}",
        state.kind.label(),
        entry.id
    );

    let location = format_endpoint(state.kind.item_endpoint(), &[&user_id, &entry.id]);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(entry)))
}

/// Update some or all fields of a user's entry.
pub async fn update_entry_endpoint(
    State(state): State<EntryState>,
    PathParams((user_id, entry_id)): PathParams<(UserId, EntryId)>,
    JsonBody(changes): JsonBody<EntryChanges>,
) -> Result<Json<Entry>, Error> {
    let changes = changes.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    update_entry(state.kind, entry_id, &user_id, changes, &connection).map(Json)
}

/// Delete a user's entry. Responds with 204 No Content.
pub async fn delete_entry_endpoint(
    State(state): State<EntryState>,
    PathParams((user_id, entry_id)): PathParams<(UserId, EntryId)>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_entry(state.kind, entry_id, &user_id, &connection)?;
    tracing::info!(
        "Deleted {} {entry_id} for user {user_id}",
        state.kind.label()
    );

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod entry_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, UserId,
        db::initialize,
        extract::PathParams,
        entry::{EntryChanges, EntryKind, NewEntryPayload, db::get_entries},
        json::JsonBody,
    };

    use super::{EntryState, create_entry_endpoint, update_entry_endpoint};

    fn get_entry_state(kind: EntryKind) -> EntryState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        connection
            .execute("INSERT INTO category (id, name) VALUES (3, 'Tutoring')", [])
            .unwrap();

        EntryState {
            kind,
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn create_income_responds_created() {
        let state = get_entry_state(EntryKind::Income);
        let payload = NewEntryPayload {
            amount: Some(50.0),
            category_id: Some(3),
            date: Some(date!(2025 - 04 - 01)),
            description: Some("tutoring".to_owned()),
        };

        let response = create_entry_endpoint(
            State(state.clone()),
            PathParams(UserId::new_unchecked("u1")),
            JsonBody(payload),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = get_entries(
            EntryKind::Income,
            &UserId::new_unchecked("u1"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn create_with_missing_amount_does_not_reach_store() {
        let state = get_entry_state(EntryKind::Expense);
        let payload = NewEntryPayload {
            amount: None,
            category_id: Some(3),
            date: Some(date!(2025 - 04 - 01)),
            description: Some("lunch".to_owned()),
        };

        let result = create_entry_endpoint(
            State(state.clone()),
            PathParams(UserId::new_unchecked("u1")),
            JsonBody(payload),
        )
        .await;

        assert_eq!(result.err(), Some(Error::MissingField("amount")));
        let stored = get_entries(
            EntryKind::Expense,
            &UserId::new_unchecked("u1"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn update_missing_entry_is_not_found() {
        let state = get_entry_state(EntryKind::Expense);
        let changes = EntryChanges {
            description: Some("nope".to_owned()),
            ..Default::default()
        };

        let response = update_entry_endpoint(
            State(state),
            PathParams((UserId::new_unchecked("u1"), 1234)),
            JsonBody(changes),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
