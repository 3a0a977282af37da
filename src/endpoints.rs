//! The API endpoints URIs.
//!
//! For endpoints that take parameters, e.g., '/users/{user_id}/incomes', use [format_endpoint].

use std::fmt::Display;

use urlencoding::encode;

/// The route to list and create categories.
pub const CATEGORIES: &str = "/categories";
/// The route to update or delete a category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route to list and create a user's income.
pub const USER_INCOMES: &str = "/users/{user_id}/incomes";
/// The route to update or delete one of a user's income records.
pub const USER_INCOME: &str = "/users/{user_id}/incomes/{entry_id}";
/// The route to list and create a user's expenses.
pub const USER_EXPENSES: &str = "/users/{user_id}/expenses";
/// The route to update or delete one of a user's expense records.
pub const USER_EXPENSE: &str = "/users/{user_id}/expenses/{entry_id}";
/// The route to list and create a user's savings goals.
pub const USER_SAVINGS_GOALS: &str = "/users/{user_id}/savings-goals";
/// The route to update or delete one of a user's savings goals.
pub const USER_SAVINGS_GOAL: &str = "/users/{user_id}/savings-goals/{goal_id}";
/// The route for a user's dashboard summary.
pub const USER_DASHBOARD: &str = "/users/{user_id}/dashboard";
/// The route to list the journal questions.
pub const JOURNAL_QUESTIONS: &str = "/journal-questions";
/// The route to list and create journal answers.
pub const JOURNAL_ANSWERS: &str = "/journal-answers";
/// The route to update or delete a journal answer.
pub const JOURNAL_ANSWER: &str = "/journal-answers/{answer_id}";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// Parameters without a matching value are left as they are, and extra
/// values are ignored. Values are percent-encoded, so a value containing `/`
/// stays a single path segment.
pub fn format_endpoint(endpoint_path: &str, values: &[&dyn Display]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_length + 1;

        formatted.push_str(&rest[..param_start]);
        match values.next() {
            Some(value) => formatted.push_str(&encode(&value.to_string())),
            None => formatted.push_str(&rest[param_start..param_end]),
        }

        rest = &rest[param_end..];
    }

    formatted.push_str(rest);
    formatted
}
