//! Dashboard module
//!
//! Summarises a user's income, expenses, savings goals and journal activity
//! for the current month and year.

mod handlers;
mod summary;

pub use handlers::{DashboardState, get_dashboard_endpoint};
pub use summary::{DashboardInputs, DashboardSummary, GoalProgress, PeriodTotals, build_dashboard};
