//! Category route handlers.
//!
//! Categories are admin-managed and shared by every user, so these handlers
//! take no user ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        Category, CategoryId, CategoryName,
        db::{create_category, delete_category, get_all_categories, update_category},
        domain::CategoryPayload,
    },
    db::lock_connection,
    extract::PathParams,
    endpoints::{self, format_endpoint},
    json::{JsonBody, required},
};

/// The state needed for the category handlers.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category, oldest first.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_categories(&connection).map(Json)
}

/// Create a category from a JSON body `{"name": ...}`.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> Result<impl IntoResponse, Error> {
    let name = CategoryName::new(&required(payload.name, "name")?)?;

    let connection = lock_connection(&state.db_connection)?;

    let category = create_category(name, &connection)?;
    tracing::info!("Created category {}", category.id);

    let location = format_endpoint(endpoints::CATEGORY, &[&category.id]);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)))
}

/// Rename a category.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    PathParams(category_id): PathParams<CategoryId>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> Result<Json<Category>, Error> {
    let name = CategoryName::new(&required(payload.name, "name")?)?;

    let connection = lock_connection(&state.db_connection)?;

    update_category(category_id, name, &connection).map(Json)
}

/// Delete a category. Responds with 204 No Content.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    PathParams(category_id): PathParams<CategoryId>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_category(category_id, &connection)?;
    tracing::info!("Deleted category {category_id}");

    Ok(StatusCode::NO_CONTENT)
}
