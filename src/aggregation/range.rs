//! Inclusive date ranges and the calendar periods the dashboard reports on.

use serde::Serialize;
use time::{Date, Month};

use crate::aggregation::LedgerRecord;

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Create a range covering `start` through `end`, both inclusive.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The calendar month that contains `day`.
    pub fn month_of(day: Date) -> Self {
        let start = day
            .replace_day(1)
            .expect("every month has a first day");
        let end = first_day_of_next_month(day)
            .previous_day()
            .expect("the first day of a month always has a previous day");

        Self { start, end }
    }

    /// The calendar month before the one that contains `day`.
    pub fn previous_month_of(day: Date) -> Self {
        let last_day_of_previous_month = Self::month_of(day)
            .start
            .previous_day()
            .expect("dates before the year -9999 are not supported");

        Self::month_of(last_day_of_previous_month)
    }

    /// The calendar year that contains `day`.
    pub fn year_of(day: Date) -> Self {
        let start = Date::from_calendar_date(day.year(), Month::January, 1)
            .expect("every year has a first of January");
        let end = Date::from_calendar_date(day.year(), Month::December, 31)
            .expect("every year has a thirty-first of December");

        Self { start, end }
    }

    /// Whether `date` falls within the range, bounds included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

fn first_day_of_next_month(day: Date) -> Date {
    let (year, month) = match day.month() {
        Month::December => (day.year() + 1, Month::January),
        month => (day.year(), month.next()),
    };

    Date::from_calendar_date(year, month, 1).expect("every month has a first day")
}

/// Keep the records whose date falls within `range`.
///
/// An inverted range, where the start is after the end, keeps nothing.
pub fn filter_by_date_range(records: &[LedgerRecord], range: DateRange) -> Vec<LedgerRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.date))
        .cloned()
        .collect()
}
