use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Resolve a period expression into a view period:
/// - `YYYY`       → year view
/// - `YYYY-MM`    → month view
/// - `YYYY-MM-DD` → day view
pub fn parse_period(p: &str) -> AppResult<Period> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(Period::day(d));
    }

    // YYYY-MM
    if p.len() == 7
        && let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d")
    {
        return Ok(Period::month(dm.year(), dm.month()));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Ok(Period::year(year));
    }

    Err(AppError::InvalidDate(p.to_string()))
}

/// Parse a year-month expression "YYYY-MM" into (year, month).
pub fn parse_year_month(p: &str) -> AppResult<(i32, u32)> {
    if p.len() == 7
        && let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d")
    {
        return Ok((dm.year(), dm.month()));
    }
    Err(AppError::InvalidDate(p.to_string()))
}

pub fn parse_time(t: &str) -> AppResult<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<chrono::NaiveTime>> {
    input.map(|s| parse_time(s)).transpose()
}
