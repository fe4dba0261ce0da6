use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::adjust_kind::AdjustKind;
use crate::models::day_entry::{Adjustment, DayEntry};
use crate::ui::messages::success;
use crate::ui::views;
use crate::utils::date::{parse_date, parse_optional_time};
use crate::utils::hours::parse_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Day {
        date,
        start,
        lunch,
        end,
        adjust,
        comment,
        clear,
    } = cmd
    {
        let date = parse_date(date)?;
        let mut pool = DbPool::new(&cfg.database)?;

        // Start from the stored entry so a partial edit keeps the rest
        let mut entry = queries::get_day(&pool.conn, &date)?.unwrap_or_else(|| DayEntry::new(date));
        if *clear {
            entry = DayEntry::new(date);
        }

        if let Some(t) = parse_optional_time(start.as_ref())? {
            entry.clock_in = Some(t);
        }
        if let Some(t) = parse_optional_time(end.as_ref())? {
            entry.clock_out = Some(t);
        }
        if let Some(l) = lunch {
            if *l < 0 {
                return Err(AppError::Validation(format!(
                    "lunch minutes must be non-negative, got {l}"
                )));
            }
            entry.lunch = Some(*l);
        }
        if let Some(c) = comment {
            entry.comment = Some(c.clone());
        }
        if !adjust.is_empty() {
            entry.adjustments = parse_adjustments(adjust)?;
        }

        // validate + upsert as one record write
        queries::upsert_day(&mut pool.conn, &entry)?;

        let _ = log::insert_log(
            &pool.conn,
            "day",
            &entry.date_str(),
            "Day entry updated",
        );

        success(format!("Saved {}", entry.date_str()));
        println!();
        print!("{}", views::render_day(&pool.conn, cfg, date, false)?);
    }
    Ok(())
}

/// Parse --adjust values of the form KIND:HOURS. Hours with no kind are
/// rejected here, before anything touches the database.
pub fn parse_adjustments(raw: &[String]) -> AppResult<Vec<Adjustment>> {
    let mut out = Vec::with_capacity(raw.len());
    for item in raw {
        let Some((kind_str, hours_str)) = item.split_once(':') else {
            return Err(AppError::Validation(format!(
                "adjustment '{item}' needs a kind, e.g. L:{item}"
            )));
        };
        let kind = AdjustKind::ak_from_str(kind_str)
            .ok_or_else(|| AppError::InvalidAdjustKind(kind_str.to_string()))?;
        let minutes = parse_hours(hours_str)?;
        out.push(Adjustment { kind, minutes });
    }
    Ok(out)
}
