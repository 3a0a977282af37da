//! Journal route handlers.
//!
//! Unlike the other resources, journal endpoints use camelCase field names
//! and wrap their results in an object, e.g. `{"answers": [...]}`.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::lock_connection,
    extract::{PathParams, QueryParams},
    journal::{
        AnswerId,
        db::{create_answer, delete_answer, get_answers, get_questions, update_answer},
        domain::{
            AnswerResponse, AnswersQuery, AnswersResponse, DeleteAnswerPayload, MessageResponse,
            NewAnswerPayload, QuestionsResponse, UpdateAnswerPayload,
        },
    },
    json::JsonBody,
};

/// The state needed for the journal handlers.
#[derive(Debug, Clone)]
pub struct JournalState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for JournalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every journal question.
pub async fn list_questions_endpoint(
    State(state): State<JournalState>,
) -> Result<Json<QuestionsResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let questions = get_questions(&connection)?;

    Ok(Json(QuestionsResponse { questions }))
}

/// List a user's answers given as `?userId=...`, newest first.
pub async fn list_answers_endpoint(
    State(state): State<JournalState>,
    QueryParams(query): QueryParams<AnswersQuery>,
) -> Result<Json<AnswersResponse>, Error> {
    let user_id = query.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let answers = get_answers(&user_id, &connection)?;

    Ok(Json(AnswersResponse { answers }))
}

/// Answer a question. Responds with 409 Conflict if the user has already answered it.
pub async fn create_answer_endpoint(
    State(state): State<JournalState>,
    JsonBody(payload): JsonBody<NewAnswerPayload>,
) -> Result<impl IntoResponse, Error> {
    let (user_id, question_id, answer) = payload.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let answer = create_answer(&user_id, question_id, answer, &connection)?;
    tracing::info!(
        "User {user_id} answered journal question {question_id} (answer {})",
        answer.id
    );

    Ok((StatusCode::CREATED, Json(AnswerResponse { answer })))
}

/// Rewrite the text of an answer.
pub async fn update_answer_endpoint(
    State(state): State<JournalState>,
    PathParams(answer_id): PathParams<AnswerId>,
    JsonBody(payload): JsonBody<UpdateAnswerPayload>,
) -> Result<Json<AnswerResponse>, Error> {
    let (user_id, answer) = payload.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let answer = update_answer(answer_id, &user_id, answer, &connection)?;

    Ok(Json(AnswerResponse { answer }))
}

/// Delete an answer. Responds with 200 OK and a confirmation message.
pub async fn delete_answer_endpoint(
    State(state): State<JournalState>,
    PathParams(answer_id): PathParams<AnswerId>,
    JsonBody(payload): JsonBody<DeleteAnswerPayload>,
) -> Result<Json<MessageResponse>, Error> {
    let user_id = payload.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    delete_answer(answer_id, &user_id, &connection)?;
    tracing::info!("Deleted journal answer {answer_id} for user {user_id}");

    Ok(Json(MessageResponse {
        message: "Answer deleted successfully",
    }))
}

#[cfg(test)]
mod journal_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        extract::{PathParams, QueryParams},
        journal::domain::{AnswersQuery, DeleteAnswerPayload, NewAnswerPayload},
        json::JsonBody,
    };

    use super::{
        JournalState, create_answer_endpoint, delete_answer_endpoint, list_answers_endpoint,
    };

    fn get_journal_state() -> JournalState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        JournalState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn answer_payload(question_id: i64) -> NewAnswerPayload {
        NewAnswerPayload {
            user_id: Some("u1".to_owned()),
            question_id: Some(question_id),
            answer: Some("Pack lunch".to_owned()),
        }
    }

    #[tokio::test]
    async fn list_answers_requires_user_id() {
        let state = get_journal_state();

        let result =
            list_answers_endpoint(State(state), QueryParams(AnswersQuery::default())).await;

        assert_eq!(result.err(), Some(Error::MissingField("userId")));
    }

    #[tokio::test]
    async fn second_create_for_same_question_is_conflict() {
        let state = get_journal_state();

        let first = create_answer_endpoint(State(state.clone()), JsonBody(answer_payload(1)))
            .await
            .into_response();
        let second = create_answer_endpoint(State(state), JsonBody(answer_payload(1)))
            .await
            .into_response();

        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn delete_without_user_id_is_bad_request() {
        let state = get_journal_state();

        let response = delete_answer_endpoint(
            State(state),
            PathParams(1),
            JsonBody(DeleteAnswerPayload::default()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
