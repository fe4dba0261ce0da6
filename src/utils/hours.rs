//! Decimal-hours parsing and formatting. Hours are handled internally as
//! integer minutes so that totals and coverage comparisons stay exact.

use crate::errors::{AppError, AppResult};

/// Parse a decimal hours string ("7.5", "0.25") into minutes.
pub fn parse_hours(s: &str) -> AppResult<i64> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::InvalidHours(trimmed.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidHours(trimmed.to_string()));
    }
    Ok((value * 60.0).round() as i64)
}

/// Minutes → decimal hours for display ("7.5h", "0.25h", "8h").
pub fn format_hours(mins: i64) -> String {
    let hours = mins as f64 / 60.0;
    let s = format!("{hours:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}h")
}

/// Minutes → days at the given standard day length ("1.50d").
pub fn format_days(mins: i64, std_day_minutes: i64) -> String {
    if std_day_minutes == 0 {
        return "-".to_string();
    }
    format!("{:.2}d", mins as f64 / std_day_minutes as f64)
}

/// Minutes → clock-style "HH:MM" (with sign for negative values).
pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Money display with currency code, e.g. "1234.50 GBP".
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}
