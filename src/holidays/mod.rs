//! Public-holiday lookup collaborator.
//!
//! The tracker itself never hardcodes holiday dates: it asks a provider
//! for the bank holidays of a year and region. The production provider
//! fetches the UK government feed; tests plug in a stub.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const GOV_UK_FEED: &str = "https://www.gov.uk/bank-holidays.json";

pub trait HolidayProvider {
    /// Public holidays of a year for a region, mapped to their names.
    fn public_holidays(&self, year: i32, region: &str) -> AppResult<BTreeMap<NaiveDate, String>>;
}

// ---------------------------------------------------------------------
// gov.uk feed
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Division {
    events: Vec<HolidayEvent>,
}

#[derive(Debug, Deserialize)]
struct HolidayEvent {
    title: String,
    date: NaiveDate,
}

/// Provider backed by https://www.gov.uk/bank-holidays.json.
/// Regions are the feed's division keys: "england-and-wales",
/// "scotland", "northern-ireland".
pub struct GovUkHolidays {
    client: reqwest::blocking::Client,
    url: String,
}

impl GovUkHolidays {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.to_string(),
        }
    }
}

impl Default for GovUkHolidays {
    fn default() -> Self {
        Self::new(GOV_UK_FEED)
    }
}

impl HolidayProvider for GovUkHolidays {
    fn public_holidays(&self, year: i32, region: &str) -> AppResult<BTreeMap<NaiveDate, String>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::Holiday(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Holiday(format!(
                "feed returned status {}",
                response.status()
            )));
        }

        let divisions: BTreeMap<String, Division> = response
            .json()
            .map_err(|e| AppError::Holiday(format!("malformed feed: {e}")))?;

        let division = divisions
            .get(region)
            .ok_or_else(|| AppError::Holiday(format!("unknown region '{region}'")))?;

        Ok(division
            .events
            .iter()
            .filter(|ev| ev.date.year() == year)
            .map(|ev| (ev.date, ev.title.clone()))
            .collect())
    }
}

// ---------------------------------------------------------------------
// Stub for tests and offline use
// ---------------------------------------------------------------------

/// Fixed-table provider used by tests.
pub struct StaticHolidays {
    pub dates: BTreeMap<NaiveDate, String>,
}

impl HolidayProvider for StaticHolidays {
    fn public_holidays(&self, year: i32, _region: &str) -> AppResult<BTreeMap<NaiveDate, String>> {
        Ok(self
            .dates
            .iter()
            .filter(|(d, _)| d.year() == year)
            .map(|(d, n)| (*d, n.clone()))
            .collect())
    }
}
