use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::adjust_kind::AdjustKind;
use crate::models::day_entry::{Adjustment, DayEntry};
use crate::ui::messages::success;
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Quick { date, kind, force } = cmd {
        let date = parse_date(date)?;

        // Only the non-holiday kinds: holidays come from the feed
        let kind = match kind.to_lowercase().as_str() {
            "leave" => AdjustKind::Leave,
            "sick" => AdjustKind::Sick,
            "training" => AdjustKind::Training,
            other => return Err(AppError::InvalidAdjustKind(other.to_string())),
        };

        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(existing) = queries::get_day(&pool.conn, &date)?
            && !existing.is_blank()
            && !force
        {
            return Err(AppError::Validation(format!(
                "{} already has data (use --force to overwrite)",
                date.format("%Y-%m-%d")
            )));
        }

        let entry = DayEntry {
            date,
            adjustments: vec![Adjustment {
                kind,
                minutes: cfg.std_day_minutes(),
            }],
            ..Default::default()
        };
        queries::upsert_day(&mut pool.conn, &entry)?;

        let _ = log::insert_log(&pool.conn, "quick", &entry.date_str(), kind.label());

        success(format!(
            "{} recorded for {}",
            kind.label(),
            date.format("%b %d")
        ));
    }
    Ok(())
}
