//! Savings goals: how much a user wants to save, and by when.

mod db;
mod domain;
mod handlers;

pub use db::{create_savings_goal, create_savings_goal_table, get_savings_goals};
pub use domain::{
    NewSavingsGoal, NewSavingsGoalPayload, SavingsGoal, SavingsGoalChanges, SavingsGoalId,
};
pub use handlers::{
    create_savings_goal_endpoint, delete_savings_goal_endpoint, list_savings_goals_endpoint,
    update_savings_goal_endpoint,
};
