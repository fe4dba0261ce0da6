//! Bank-holiday population: turn provider dates into PublicHoliday
//! adjustments for a month.

use crate::config::Config;
use crate::core::calendar;
use crate::db::queries;
use crate::errors::AppResult;
use crate::holidays::HolidayProvider;
use chrono::{Datelike, Weekday};
use rusqlite::Connection;

use crate::models::adjust_kind::AdjustKind;
use crate::models::day_entry::{Adjustment, DayEntry};

/// Upsert a PublicHoliday adjustment of one standard day for every
/// weekday holiday of the month that is not already populated.
/// Dates that already carry clocked time or adjustments are left alone.
/// Returns how many entries were created.
pub fn populate_holidays(
    conn: &mut Connection,
    provider: &dyn HolidayProvider,
    cfg: &Config,
    year: i32,
    month: u32,
) -> AppResult<usize> {
    let bounds = calendar::month_bounds(year, month);
    let holidays = provider.public_holidays(year, &cfg.region)?;

    let mut created = 0;
    for (date, name) in holidays {
        if !bounds.contains(date) {
            continue;
        }
        // Weekend holidays carry no hours to recover
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let existing = queries::get_day(conn, &date)?;
        if let Some(e) = &existing
            && !e.is_blank()
        {
            continue;
        }

        let entry = DayEntry {
            date,
            adjustments: vec![Adjustment {
                kind: AdjustKind::PublicHoliday,
                minutes: cfg.std_day_minutes(),
            }],
            comment: Some(name),
            ..Default::default()
        };
        queries::upsert_day(conn, &entry)?;
        created += 1;
    }

    Ok(created)
}
