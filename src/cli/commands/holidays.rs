use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::populate::populate_holidays;
use crate::db::pool::DbPool;
use crate::db::log;
use crate::errors::AppResult;
use crate::holidays::GovUkHolidays;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_year_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holidays { month, url } = cmd {
        let (year, m) = parse_year_month(month)?;

        let provider = match url {
            Some(u) => GovUkHolidays::new(u),
            None => GovUkHolidays::default(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let count = populate_holidays(&mut pool.conn, &provider, cfg, year, m)?;

        let _ = log::insert_log(
            &pool.conn,
            "holidays",
            month,
            &format!("{count} holiday entries created"),
        );

        if count > 0 {
            success(format!("Added {count} holiday entries"));
        } else {
            info("No new holidays to add");
        }
    }
    Ok(())
}
