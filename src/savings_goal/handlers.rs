//! Savings goal route handlers.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserId,
    db::lock_connection,
    extract::PathParams,
    endpoints::{self, format_endpoint},
    json::JsonBody,
    savings_goal::{
        NewSavingsGoalPayload, SavingsGoal, SavingsGoalChanges, SavingsGoalId,
        db::{create_savings_goal, delete_savings_goal, get_savings_goals, update_savings_goal},
    },
};

/// The state needed for the savings goal handlers.
#[derive(Debug, Clone)]
pub struct SavingsGoalState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SavingsGoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List a user's savings goals, newest first.
pub async fn list_savings_goals_endpoint(
    State(state): State<SavingsGoalState>,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<Vec<SavingsGoal>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_savings_goals(&user_id, &connection).map(Json)
}

/// Create a savings goal. Responds with 201 Created and the stored goal.
pub async fn create_savings_goal_endpoint(
    State(state): State<SavingsGoalState>,
    PathParams(user_id): PathParams<UserId>,
    JsonBody(payload): JsonBody<NewSavingsGoalPayload>,
) -> Result<impl IntoResponse, Error> {
    let new_goal = payload.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let goal = create_savings_goal(&user_id, new_goal, &connection)?;
    tracing::info!("Created savings goal {} for user {user_id}", goal.id);

    let location = format_endpoint(endpoints::USER_SAVINGS_GOAL, &[&user_id, &goal.id]);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(goal)))
}

/// Update some or all fields of a savings goal, including marking it completed.
pub async fn update_savings_goal_endpoint(
    State(state): State<SavingsGoalState>,
    PathParams((user_id, goal_id)): PathParams<(UserId, SavingsGoalId)>,
    JsonBody(changes): JsonBody<SavingsGoalChanges>,
) -> Result<Json<SavingsGoal>, Error> {
    let changes = changes.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    update_savings_goal(goal_id, &user_id, changes, &connection).map(Json)
}

/// Delete a savings goal. Responds with 204 No Content.
pub async fn delete_savings_goal_endpoint(
    State(state): State<SavingsGoalState>,
    PathParams((user_id, goal_id)): PathParams<(UserId, SavingsGoalId)>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_savings_goal(goal_id, &user_id, &connection)?;
    tracing::info!("Deleted savings goal {goal_id} for user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod savings_goal_endpoint_tests {
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
        json::JsonBody,
        savings_goal::{NewSavingsGoalPayload, db::get_savings_goals},
    };

    use super::{SavingsGoalState, create_savings_goal_endpoint, delete_savings_goal_endpoint};

    fn get_savings_goal_state() -> SavingsGoalState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        connection
            .execute("INSERT INTO category (id, name) VALUES (1, 'Travel')", [])
            .unwrap();

        SavingsGoalState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn create_goal_responds_created() {
        let state = get_savings_goal_state();
        let payload = NewSavingsGoalPayload {
            goal_name: Some("Japan trip".to_owned()),
            target_amount: Some(4000.0),
            target_date: Some(date!(2026 - 09 - 01)),
            category_id: Some(1),
            description: Some("Flights and rail pass".to_owned()),
            ..Default::default()
        };

        let response = create_savings_goal_endpoint(
            State(state.clone()),
            PathParams(UserId::new_unchecked("u1")),
            JsonBody(payload),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let goals = get_savings_goals(
            &UserId::new_unchecked("u1"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        assert_eq!(goals.len(), 1);
    }

    #[tokio::test]
    async fn create_goal_without_target_amount_fails() {
        let state = get_savings_goal_state();
        let payload = NewSavingsGoalPayload {
            goal_name: Some("Japan trip".to_owned()),
            target_date: Some(date!(2026 - 09 - 01)),
            category_id: Some(1),
            description: Some("Temples and ramen".to_owned()),
            ..Default::default()
        };

        let result = create_savings_goal_endpoint(
            State(state),
            PathParams(UserId::new_unchecked("u1")),
            JsonBody(payload),
        )
        .await;

        assert_eq!(result.err(), Some(Error::MissingField("target_amount")));
    }

    #[tokio::test]
    async fn delete_missing_goal_is_not_found() {
        let state = get_savings_goal_state();

        let response = delete_savings_goal_endpoint(
            State(state),
            PathParams((UserId::new_unchecked("u1"), 5)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
