//! Savings goal domain types and request payloads.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserId,
    category::CategoryId,
    database_id::DatabaseId,
    json::{non_blank_text, non_negative_amount, positive_amount, required, required_text},
};

/// Database identifier for a savings goal.
pub type SavingsGoalId = DatabaseId;

/// An amount of money a user wants to have saved by a date.
///
/// `current_amount` may exceed `target_amount`. Progress is clamped to 100%
/// when it is computed, never when it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: SavingsGoalId,
    pub user_id: UserId,
    pub goal_name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Date,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A validated savings goal that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    /// A short name for the goal, e.g. "Emergency fund".
    pub goal_name: String,
    /// How much the user wants to save. Greater than zero.
    pub target_amount: f64,
    /// How much has been saved so far. Never negative.
    pub current_amount: f64,
    /// When the user wants to reach the target.
    pub target_date: Date,
    /// The category the goal is saving for.
    pub category_id: CategoryId,
    /// Free text describing the goal.
    pub description: String,
    /// Whether the user has marked the goal as done.
    pub completed: bool,
}

/// Request body for creating a savings goal.
///
/// `current_amount` defaults to zero and `completed` to false, every other
/// field is required.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewSavingsGoalPayload {
    pub goal_name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<Date>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl NewSavingsGoalPayload {
    /// Check that every required field is present and valid.
    pub fn validate(self) -> Result<NewSavingsGoal, Error> {
        let goal_name = validate_goal_name(required(self.goal_name, "goal_name")?)?;
        let target_amount = positive_amount(
            required(self.target_amount, "target_amount")?,
            "target_amount",
        )?;
        let target_date = required(self.target_date, "target_date")?;
        let category_id = required(self.category_id, "category_id")?;
        let description = required_text(self.description, "description")?;
        let current_amount =
            non_negative_amount(self.current_amount.unwrap_or(0.0), "current_amount")?;

        Ok(NewSavingsGoal {
            goal_name,
            target_amount,
            current_amount,
            target_date,
            category_id,
            description,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Request body for a partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalChanges {
    pub goal_name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<Date>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl SavingsGoalChanges {
    /// Check the values of the fields that are present.
    pub fn validate(mut self) -> Result<Self, Error> {
        self.goal_name = self.goal_name.map(validate_goal_name).transpose()?;
        self.description = self
            .description
            .map(|description| non_blank_text(description, "description"))
            .transpose()?;

        if let Some(target_amount) = self.target_amount {
            positive_amount(target_amount, "target_amount")?;
        }

        if let Some(current_amount) = self.current_amount {
            non_negative_amount(current_amount, "current_amount")?;
        }

        Ok(self)
    }
}

fn validate_goal_name(goal_name: String) -> Result<String, Error> {
    let trimmed = goal_name.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidField {
            field: "goal_name",
            reason: "must not be empty",
        });
    }

    Ok(trimmed.to_owned())
}
