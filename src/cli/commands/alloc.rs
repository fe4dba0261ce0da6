use crate::cli::parser::{AllocCmd, Commands};
use crate::config::Config;
use crate::core::coverage;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::allocation::Allocation;
use crate::models::ticket::normalize_ticket_id;
use crate::ui::messages::{success, warning};
use crate::ui::views;
use crate::utils::date::parse_date;
use crate::utils::hours::parse_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Alloc { action } = cmd else {
        return Ok(());
    };
    let pool = DbPool::new(&cfg.database)?;

    match action {
        AllocCmd::Set {
            date,
            ticket,
            hours,
            client,
        } => {
            let date = parse_date(date)?;
            let ticket_id = normalize_ticket_id(ticket)?;
            let minutes = parse_hours(hours)?;

            let alloc = Allocation {
                ticket_id: ticket_id.clone(),
                date,
                minutes,
                entered_on_client: *client,
            };
            queries::upsert_allocation(&pool.conn, &alloc)?;

            let _ = log::insert_log(
                &pool.conn,
                "alloc_set",
                &format!("{} {}", alloc.date_str(), ticket_id),
                hours,
            );

            success(format!(
                "Allocated {}h to {} on {}",
                hours,
                ticket_id,
                date.format("%b %d")
            ));
            print_coverage(&pool, cfg, date)?;
        }

        AllocCmd::Del { date, ticket } => {
            let date = parse_date(date)?;
            let ticket_id = normalize_ticket_id(ticket)?;

            // Deleting twice is a no-op with a notice, not a failure
            match queries::delete_allocation(&pool.conn, &ticket_id, &date) {
                Ok(()) => {
                    success(format!(
                        "Removed allocation of {} on {}",
                        ticket_id,
                        date.format("%b %d")
                    ));
                }
                Err(AppError::NotFound(msg)) => warning(msg),
                Err(e) => return Err(e),
            }
        }

        AllocCmd::Show { date } => {
            let date = parse_date(date)?;
            print_coverage(&pool, cfg, date)?;
        }
    }

    Ok(())
}

fn print_coverage(pool: &DbPool, cfg: &Config, date: chrono::NaiveDate) -> AppResult<()> {
    let entry = queries::get_day(&pool.conn, &date)?;
    let worked = entry.map(|e| e.worked_minutes()).unwrap_or(0);
    let allocations = queries::get_allocations(&pool.conn, &date)?;
    let cov = coverage::coverage(worked, &allocations);

    println!();
    print!(
        "{}",
        views::render_allocations(&allocations, worked, cov, cfg, false)
    );
    Ok(())
}
