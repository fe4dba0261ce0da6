use chrono::NaiveDate;
use serde::Serialize;

/// Worked minutes assigned to a ticket for a given date.
/// One row per (ticket, date); re-upserting replaces the hours.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Allocation {
    pub ticket_id: String,
    pub date: NaiveDate,
    pub minutes: i64,
    /// Set once the hours have been keyed into the client's billing system.
    pub entered_on_client: bool,
}

impl Allocation {
    pub fn new(ticket_id: &str, date: NaiveDate, minutes: i64) -> Self {
        Self {
            ticket_id: ticket_id.to_string(),
            date,
            minutes,
            entered_on_client: false,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
