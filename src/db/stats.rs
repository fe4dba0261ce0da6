use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let entries: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
    let adjustments: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM adjustments", [], |row| row.get(0))?;
    let tickets: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
    let allocations: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM allocations", [], |row| row.get(0))?;

    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, entries, RESET);
    println!(
        "{}• Adjustments:{} {}{}{}",
        CYAN, RESET, GREEN, adjustments, RESET
    );
    println!("{}• Tickets:{} {}{}{}", CYAN, RESET, GREEN, tickets, RESET);
    println!(
        "{}• Allocations:{} {}{}{}",
        CYAN, RESET, GREEN, allocations, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM entries ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM entries ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
