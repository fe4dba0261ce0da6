//! Billing calendar: Saturday-anchored weeks and their month membership.
//!
//! A billing week runs Saturday through Friday. A week belongs to a month
//! when any of its seven days falls in that month, so a week that spans a
//! month boundary appears in the week list of both adjacent months.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let (start, end) = (self.start, self.end);
        std::iter::successors(Some(start), move |d| {
            d.succ_opt().filter(|next| *next <= end)
        })
    }
}

/// The most recent Saturday on or before `d` (Saturday maps to itself).
pub fn week_start(d: NaiveDate) -> NaiveDate {
    let days_since_saturday = (d.weekday().num_days_from_monday() + 2) % 7;
    d - Days::new(days_since_saturday as u64)
}

/// The Saturday..Friday billing week containing `d`.
pub fn week_of(d: NaiveDate) -> DateRange {
    let start = week_start(d);
    DateRange::new(start, start + Days::new(6))
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> DateRange {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("valid month")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("valid month")
    };
    DateRange::new(first, next_first.pred_opt().expect("month has days"))
}

/// Ordered week-start dates of every billing week overlapping the month.
/// Boundary weeks extend into the adjacent month and are listed by both.
pub fn weeks_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let bounds = month_bounds(year, month);

    let mut weeks = Vec::new();
    let mut ws = week_start(bounds.start);
    while ws <= bounds.end {
        weeks.push(ws);
        ws = ws + Days::new(7);
    }
    weeks
}

/// The seven days of a week, each flagged with membership in the given
/// month. Out-of-month days are still listed so views can render them
/// de-emphasized, but they never count toward the month's totals.
pub fn days_in_week_for_month(
    week_start: NaiveDate,
    year: i32,
    month: u32,
) -> Vec<(NaiveDate, bool)> {
    (0..7u64)
        .map(|i| {
            let d = week_start + Days::new(i);
            (d, d.year() == year && d.month() == month)
        })
        .collect()
}

/// The twelve (year, month) pairs of a fiscal year view.
pub fn fiscal_year_months(year: i32) -> Vec<(i32, u32)> {
    (1..=12).map(|m| (year, m)).collect()
}

/// Number of Monday..Friday days in the range. The weekday definition is
/// fixed regardless of the Saturday week-start convention.
pub fn count_weekdays(range: DateRange) -> i64 {
    range
        .days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as i64
}

/// Index of the week containing `d` within a month's week list, or 0
/// when the date lies outside every listed week.
pub fn find_week_index(weeks: &[NaiveDate], d: NaiveDate) -> usize {
    weeks
        .iter()
        .position(|ws| *ws <= d && d <= *ws + Days::new(6))
        .unwrap_or(0)
}

/// Previous month in calendar order.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// Next month in calendar order.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}
