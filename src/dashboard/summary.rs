//! Builds the dashboard summary from already fetched rows.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{
    aggregation::{
        CategoryShare, DateRange, LedgerRecord, MonthlySummary, RewardActivity, RewardStatus,
        UNCATEGORIZED_LABEL, bucket_by_month, category_breakdown, filter_by_date_range,
        percent_change, progress_percent, reward_status, total,
    },
    category::{Category, CategoryId},
    entry::Entry,
    savings_goal::{SavingsGoal, SavingsGoalId},
};

/// The rows a dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub incomes: &'a [Entry],
    pub expenses: &'a [Entry],
    pub savings_goals: &'a [SavingsGoal],
    pub categories: &'a [Category],
    pub journal_answer_count: u64,
}

/// Income and expense totals over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub range: DateRange,
    pub income: f64,
    pub expenses: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// How far along a savings goal is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub id: SavingsGoalId,
    pub goal_name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub target_date: Date,
    pub progress_percent: f64,
    pub completed: bool,
}

/// Everything the dashboard shows for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub today: Date,
    pub current_month: PeriodTotals,
    pub previous_month: PeriodTotals,
    /// Change in income from the previous month, 0 if the previous month had none.
    pub income_change_percent: f64,
    /// Change in expenses from the previous month, 0 if the previous month had none.
    pub expense_change_percent: f64,
    /// From the first of January up to and including today.
    pub year_to_date: PeriodTotals,
    pub monthly_income: Vec<MonthlySummary>,
    pub monthly_expenses: Vec<MonthlySummary>,
    /// This month's expenses per category, largest first.
    pub expense_breakdown: Vec<CategoryShare>,
    pub savings_goals: Vec<GoalProgress>,
    pub rewards: RewardStatus,
}

/// Compute the dashboard for `today` from a user's rows.
pub fn build_dashboard(today: Date, inputs: DashboardInputs) -> DashboardSummary {
    let category_names: HashMap<CategoryId, &str> = inputs
        .categories
        .iter()
        .map(|category| (category.id, category.name.as_ref()))
        .collect();

    let incomes = to_records(inputs.incomes, &category_names);
    let expenses = to_records(inputs.expenses, &category_names);

    let current_month = period_totals(&incomes, &expenses, DateRange::month_of(today));
    let previous_month = period_totals(&incomes, &expenses, DateRange::previous_month_of(today));
    let year_start = DateRange::year_of(today).start;
    let year_to_date = period_totals(&incomes, &expenses, DateRange::new(year_start, today));

    let expense_breakdown =
        category_breakdown(&filter_by_date_range(&expenses, current_month.range));

    let savings_goals: Vec<GoalProgress> = inputs
        .savings_goals
        .iter()
        .map(|goal| GoalProgress {
            id: goal.id,
            goal_name: goal.goal_name.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            target_date: goal.target_date,
            progress_percent: progress_percent(goal.current_amount, goal.target_amount),
            completed: goal.completed,
        })
        .collect();

    let rewards = reward_status(RewardActivity {
        entries: (inputs.incomes.len() + inputs.expenses.len()) as u64,
        journal_answers: inputs.journal_answer_count,
        completed_goals: savings_goals.iter().filter(|goal| goal.completed).count() as u64,
    });

    DashboardSummary {
        today,
        income_change_percent: percent_change(current_month.income, previous_month.income),
        expense_change_percent: percent_change(current_month.expenses, previous_month.expenses),
        current_month,
        previous_month,
        year_to_date,
        monthly_income: bucket_by_month(&incomes),
        monthly_expenses: bucket_by_month(&expenses),
        expense_breakdown,
        savings_goals,
        rewards,
    }
}

fn to_records(entries: &[Entry], category_names: &HashMap<CategoryId, &str>) -> Vec<LedgerRecord> {
    entries
        .iter()
        .map(|entry| LedgerRecord {
            amount: entry.amount,
            date: entry.date,
            category: entry
                .category_id
                .and_then(|id| category_names.get(&id).copied())
                .unwrap_or(UNCATEGORIZED_LABEL)
                .to_owned(),
        })
        .collect()
}

fn period_totals(
    incomes: &[LedgerRecord],
    expenses: &[LedgerRecord],
    range: DateRange,
) -> PeriodTotals {
    let income = total(&filter_by_date_range(incomes, range));
    let expenses = total(&filter_by_date_range(expenses, range));

    PeriodTotals {
        range,
        income,
        expenses,
        net: income - expenses,
    }
}
