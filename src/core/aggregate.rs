//! Period aggregation over day entries.
//!
//! Pure computations: every function is a function of the record set and
//! the range alone, so the same inputs always produce the same totals.

use crate::config::Config;
use crate::core::calendar::{self, DateRange};
use crate::models::adjust_kind::AdjustKind;
use crate::models::day_entry::DayEntry;

/// Adjustment minutes per kind over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjustmentTotals {
    pub public_holiday: i64,
    pub leave: i64,
    pub sick: i64,
    pub training: i64,
}

impl AdjustmentTotals {
    pub fn of(&self, kind: AdjustKind) -> i64 {
        match kind {
            AdjustKind::PublicHoliday => self.public_holiday,
            AdjustKind::Leave => self.leave,
            AdjustKind::Sick => self.sick,
            AdjustKind::Training => self.training,
        }
    }

    pub fn total(&self) -> i64 {
        self.public_holiday + self.leave + self.sick + self.training
    }
}

/// Everything a period view needs in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodSummary {
    pub worked: i64,
    pub max: i64,
    pub adjustments: AdjustmentTotals,
}

impl PeriodSummary {
    pub fn total(&self) -> i64 {
        self.worked + self.adjustments.total()
    }
}

pub struct Aggregator {
    std_day_minutes: i64,
    hourly_rate: f64,
}

impl Aggregator {
    pub fn new(cfg: &Config) -> Self {
        Self {
            std_day_minutes: cfg.std_day_minutes(),
            hourly_rate: cfg.hourly_rate,
        }
    }

    /// Sum of worked minutes over entries whose date falls in range.
    pub fn total_worked(&self, entries: &[DayEntry], range: DateRange) -> i64 {
        entries
            .iter()
            .filter(|e| range.contains(e.date))
            .map(|e| e.worked_minutes())
            .sum()
    }

    /// Adjustment minutes grouped by kind, restricted to the range.
    pub fn adjustment_totals(&self, entries: &[DayEntry], range: DateRange) -> AdjustmentTotals {
        let mut totals = AdjustmentTotals::default();
        for entry in entries.iter().filter(|e| range.contains(e.date)) {
            for adj in &entry.adjustments {
                match adj.kind {
                    AdjustKind::PublicHoliday => totals.public_holiday += adj.minutes,
                    AdjustKind::Leave => totals.leave += adj.minutes,
                    AdjustKind::Sick => totals.sick += adj.minutes,
                    AdjustKind::Training => totals.training += adj.minutes,
                }
            }
        }
        totals
    }

    /// Maximum workable minutes in the range: weekdays × standard day,
    /// reduced by public-holiday adjustments. Leave, Sick and Training
    /// never change the maximum.
    pub fn max_minutes(&self, entries: &[DayEntry], range: DateRange) -> i64 {
        let weekdays = calendar::count_weekdays(range);
        weekdays * self.std_day_minutes - self.adjustment_totals(entries, range).public_holiday
    }

    /// Earnings for a number of worked minutes. Always computed; whether
    /// it is shown is the presentation layer's privacy concern.
    pub fn earnings(&self, worked_minutes: i64) -> f64 {
        worked_minutes as f64 / 60.0 * self.hourly_rate
    }

    pub fn summarize(&self, entries: &[DayEntry], range: DateRange) -> PeriodSummary {
        PeriodSummary {
            worked: self.total_worked(entries, range),
            max: self.max_minutes(entries, range),
            adjustments: self.adjustment_totals(entries, range),
        }
    }
}
