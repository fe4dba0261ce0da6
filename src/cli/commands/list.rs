use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::period::{Granularity, Period};
use crate::ui::views;
use crate::utils::date;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let period = match period {
            Some(p) => date::parse_period(p)?,
            None => {
                let today = date::today();
                Period::month(today.year(), today.month())
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        let anchor = period.anchor;

        let out = match period.granularity {
            Granularity::Year => {
                views::render_year(&pool.conn, cfg, anchor.year(), None, false)?
            }
            Granularity::Month => views::render_month(
                &pool.conn,
                cfg,
                anchor.year(),
                anchor.month(),
                None,
                false,
            )?,
            Granularity::Week => views::render_week(
                &pool.conn,
                cfg,
                anchor.year(),
                anchor.month(),
                period.range().start,
                None,
                false,
            )?,
            Granularity::Day => views::render_day(&pool.conn, cfg, anchor, false)?,
        };

        print!("{out}");
    }
    Ok(())
}
