//! Application router configuration with shared and user-scoped route definitions.

use axum::{
    Router,
    http::{StatusCode, Uri, header::ALLOW},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error,
    auth::bearer_token_guard,
    category::{
        create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
        update_category_endpoint,
    },
    dashboard::get_dashboard_endpoint,
    endpoints,
    entry::{EntryKind, entry_router},
    journal::{
        create_answer_endpoint, delete_answer_endpoint, list_answers_endpoint,
        list_questions_endpoint, update_answer_endpoint,
    },
    savings_goal::{
        create_savings_goal_endpoint, delete_savings_goal_endpoint, list_savings_goals_endpoint,
        update_savings_goal_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Category routes are shared by every user and never need a bearer token.
/// User-scoped and journal routes pass through [bearer_token_guard].
pub fn build_router(state: AppState) -> Router {
    let shared_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        );

    let user_routes = Router::new()
        .route(
            endpoints::USER_SAVINGS_GOALS,
            get(list_savings_goals_endpoint).post(create_savings_goal_endpoint),
        )
        .route(
            endpoints::USER_SAVINGS_GOAL,
            put(update_savings_goal_endpoint).delete(delete_savings_goal_endpoint),
        )
        .route(endpoints::USER_DASHBOARD, get(get_dashboard_endpoint))
        .route(endpoints::JOURNAL_QUESTIONS, get(list_questions_endpoint))
        .route(
            endpoints::JOURNAL_ANSWERS,
            get(list_answers_endpoint).post(create_answer_endpoint),
        )
        .route(
            endpoints::JOURNAL_ANSWER,
            put(update_answer_endpoint).delete(delete_answer_endpoint),
        )
        .merge(entry_router(
            EntryKind::Income,
            state.db_connection.clone(),
        ))
        .merge(entry_router(
            EntryKind::Expense,
            state.db_connection.clone(),
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_token_guard,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    user_routes
        .merge(shared_routes)
        .fallback(get_404_not_found)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(cors)
        .with_state(state)
}

async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {uri}");
    Error::NotFound.into_response()
}

/// Give the router's empty 405 responses a JSON error body, keeping the `Allow` header.
async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let mut json_response = Error::MethodNotAllowed.into_response();

    if let Some(allow) = response.headers().get(ALLOW) {
        json_response.headers_mut().insert(ALLOW, allow.clone());
    }

    json_response
}
