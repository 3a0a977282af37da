use std::collections::HashMap;

use serde::Serialize;

use crate::aggregation::{CategoryStyle, LedgerRecord, category_style, total};

/// One category's part of a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// The share of the overall total in `[0, 100]`.
    pub percent: f64,
    pub style: CategoryStyle,
}

/// Total `records` per category, largest total first.
///
/// Ties are ordered by category name. When the overall total is zero every
/// share is 0 percent.
pub fn category_breakdown(records: &[LedgerRecord]) -> Vec<CategoryShare> {
    let overall = total(records);

    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.category.as_str()).or_insert(0.0) += record.amount;
    }

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, category_total)| CategoryShare {
            category: category.to_owned(),
            total: category_total,
            percent: if overall > 0.0 {
                category_total / overall * 100.0
            } else {
                0.0
            },
            style: category_style(category),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    shares
}
