//! Grouping records into calendar months.

use std::collections::{BTreeMap, btree_map::Entry};

use serde::Serialize;

use crate::aggregation::LedgerRecord;

/// The records of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    /// The month number, January is 1.
    pub month: u8,
    pub total: f64,
    /// Subtotals for the categories that have records this month.
    /// Categories without records are absent rather than zero.
    pub by_category: BTreeMap<String, f64>,
}

/// Group records by the year and month of their date.
///
/// Returns one summary per month that has records, most recent month first.
/// Every record is counted in exactly one summary, so the summary totals add
/// up to the total of `records`.
pub fn bucket_by_month(records: &[LedgerRecord]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u8), MonthlySummary> = BTreeMap::new();

    for record in records {
        let key = (record.date.year(), u8::from(record.date.month()));

        let summary = match months.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(MonthlySummary {
                year: key.0,
                month: key.1,
                total: 0.0,
                by_category: BTreeMap::new(),
            }),
        };

        summary.total += record.amount;
        *summary
            .by_category
            .entry(record.category.clone())
            .or_insert(0.0) += record.amount;
    }

    months.into_values().rev().collect()
}
