use super::adjust_kind::AdjustKind;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A typed non-worked-hours amount attached to a date.
/// The kind is mandatory by construction: untyped hours never reach
/// this struct, they are rejected when the user input is parsed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Adjustment {
    pub kind: AdjustKind,
    pub minutes: i64, // ⇔ adjustments.minutes (INT, >= 0)
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,              // ⇔ entries.date (TEXT "YYYY-MM-DD", PK)
    pub clock_in: Option<NaiveTime>,  // ⇔ entries.clock_in (TEXT "HH:MM")
    pub lunch: Option<i64>,           // ⇔ entries.lunch_minutes (INT)
    pub clock_out: Option<NaiveTime>, // ⇔ entries.clock_out (TEXT "HH:MM")
    pub adjustments: Vec<Adjustment>, // ⇔ adjustments rows, ordered by id
    pub comment: Option<String>,      // ⇔ entries.comment (TEXT)
}

impl DayEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    /// Minutes actually worked: clock_out − clock_in − lunch.
    /// Zero when either clock is missing; never negative.
    pub fn worked_minutes(&self) -> i64 {
        match (self.clock_in, self.clock_out) {
            (Some(start), Some(end)) => {
                let span = (end - start).num_minutes() - self.lunch.unwrap_or(0);
                span.max(0)
            }
            _ => 0,
        }
    }

    /// Total adjustment minutes over all kinds.
    pub fn adjusted_minutes(&self) -> i64 {
        self.adjustments.iter().map(|a| a.minutes).sum()
    }

    /// Adjustment minutes for a single kind.
    pub fn adjusted_minutes_of(&self, kind: AdjustKind) -> i64 {
        self.adjustments
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.minutes)
            .sum()
    }

    /// Total billable minutes (worked + adjustments).
    pub fn total_minutes(&self) -> i64 {
        self.worked_minutes() + self.adjusted_minutes()
    }

    /// A blank entry aggregates identically to a missing row.
    pub fn is_blank(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none() && self.adjustments.is_empty()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn weekday_str(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// Check the invariants the edit boundary must enforce before the
    /// entry is persisted. A rejected entry is never written.
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(start), Some(end)) = (self.clock_in, self.clock_out)
            && end <= start
        {
            return Err(AppError::Validation(format!(
                "clock-out {} must be after clock-in {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }
        if let Some(lunch) = self.lunch
            && lunch < 0
        {
            return Err(AppError::Validation(format!(
                "lunch minutes must be non-negative, got {lunch}"
            )));
        }
        for adj in &self.adjustments {
            if adj.minutes < 0 {
                return Err(AppError::Validation(format!(
                    "adjustment hours must be non-negative ({})",
                    adj.kind.label()
                )));
            }
        }
        Ok(())
    }
}
