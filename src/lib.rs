//! Pocketwise is a personal finance tracker.
//!
//! This library provides a JSON REST API for recording income, expenses,
//! savings goals and learning journal answers, and for summarising them on a
//! dashboard.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod aggregation;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod entry;
mod extract;
mod journal;
mod json;
mod logging;
mod ownership;
mod routing;
mod savings_goal;
mod timezone;
mod user;

pub use app_state::AppState;
pub use auth::{AuthPolicy, BearerToken};
pub use category::{Category, CategoryName, create_category};
pub use db::initialize as initialize_db;
pub use entry::{EntryKind, NewEntry, create_entry};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use savings_goal::{NewSavingsGoal, create_savings_goal};
pub use timezone::get_local_offset;
pub use user::UserId;

use crate::database_id::DatabaseId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing or null in the request body.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value is not allowed.
    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        /// The wire name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The request body could not be parsed as JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// The request body could not be read.
    #[error("Could not read request body: {0}")]
    UnreadableBody(String),

    /// The request body is larger than the server accepts.
    #[error("request body is too large")]
    BodyTooLarge,

    /// A path parameter could not be parsed, e.g. a non-numeric ID.
    #[error("{0}")]
    InvalidPath(String),

    /// The query string could not be parsed.
    #[error("{0}")]
    InvalidQuery(String),

    /// An empty string was used as a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was submitted as a journal answer.
    #[error("Answer cannot be empty")]
    EmptyAnswer,

    /// The category ID used to create or update a record did not match a
    /// valid category.
    #[error("category_id {0} does not refer to a valid category")]
    InvalidCategory(DatabaseId),

    /// The question ID used to create a journal answer did not match a
    /// journal question.
    #[error("questionId {0} does not refer to a valid question")]
    InvalidQuestion(DatabaseId),

    /// The category name already exists in the database.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The user has already answered the journal question.
    ///
    /// The store enforces one answer per user and question, so the client
    /// should update the existing answer instead.
    #[error("An answer to this question already exists. Update the existing answer instead.")]
    DuplicateJournalAnswer,

    /// The requested resource was not found.
    ///
    /// Rows that exist but belong to another user are reported the same way.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The route exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request did not carry a bearer token and the server requires one.
    #[error("missing bearer token")]
    MissingBearerToken,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent for every failed request.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_)
            | Error::InvalidField { .. }
            | Error::InvalidJson(_)
            | Error::UnreadableBody(_)
            | Error::InvalidPath(_)
            | Error::InvalidQuery(_)
            | Error::EmptyCategoryName
            | Error::EmptyAnswer
            | Error::InvalidCategory(_)
            | Error::InvalidQuestion(_) => StatusCode::BAD_REQUEST,
            Error::MissingBearerToken => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::DuplicateCategoryName(_) | Error::DuplicateJournalAnswer => StatusCode::CONFLICT,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server errors are logged where they are raised, the details stay out of the response.
        let message = if status.is_server_error() {
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
