//! Pure functions that summarise a user's records for display.
//!
//! Nothing in here touches the database. Every function takes already
//! fetched rows and returns a new value, so results can be recomputed on
//! every request.

mod breakdown;
mod monthly;
mod palette;
mod progress;
mod range;
mod rewards;

use time::Date;

pub use breakdown::{CategoryShare, category_breakdown};
pub use monthly::{MonthlySummary, bucket_by_month};
pub use palette::{CategoryStyle, category_style};
pub use progress::{percent_change, progress_percent};
pub use range::{DateRange, filter_by_date_range};
pub use rewards::{RewardActivity, RewardStatus, RewardTier, reward_status};

/// The label used for records whose category has been deleted.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A dated, categorized amount of money, the unit every aggregation works on.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub amount: f64,
    pub date: Date,
    pub category: String,
}

/// Sum the amounts of `records`.
pub fn total(records: &[LedgerRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}
