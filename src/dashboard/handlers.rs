//! Dashboard route handler.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserId,
    category::get_all_categories,
    dashboard::{DashboardInputs, DashboardSummary, build_dashboard},
    db::lock_connection,
    extract::PathParams,
    entry::{EntryKind, get_entries},
    journal::count_answers,
    savings_goal::get_savings_goals,
    timezone::local_today,
};

/// The state needed for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the user's rows.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Summarise a user's records for today in the server's local timezone.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<DashboardSummary>, Error> {
    let today = local_today(&state.local_timezone)?;

    let (incomes, expenses, savings_goals, categories, journal_answer_count) = {
        let connection = lock_connection(&state.db_connection)?;

        (
            get_entries(EntryKind::Income, &user_id, &connection)?,
            get_entries(EntryKind::Expense, &user_id, &connection)?,
            get_savings_goals(&user_id, &connection)?,
            get_all_categories(&connection)?,
            count_answers(&user_id, &connection)?,
        )
    };

    Ok(Json(build_dashboard(
        today,
        DashboardInputs {
            incomes: &incomes,
            expenses: &expenses,
            savings_goals: &savings_goals,
            categories: &categories,
            journal_answer_count,
        },
    )))
}
