//! View rendering for the browse session and the `list` command.
//!
//! Each renderer loads the records it needs, aggregates them and returns
//! a plain string; nothing here mutates state, so views can be asserted
//! on directly in tests.

use crate::config::Config;
use crate::core::aggregate::{Aggregator, PeriodSummary};
use crate::core::calendar;
use crate::core::coverage::{self, Coverage};
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::allocation::Allocation;
use crate::models::day_entry::DayEntry;
use crate::models::period::Period;
use crate::utils::colors::{self, DIM, GREY, RESET};
use crate::utils::formatting::{bold, ellipsize, pad_left};
use crate::utils::hours::{format_days, format_hours, format_money};
use crate::utils::table::{Column, Table};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use rusqlite::Connection;

fn entry_for<'a>(entries: &'a [DayEntry], d: NaiveDate) -> Option<&'a DayEntry> {
    entries.iter().find(|e| e.date == d)
}

fn coverage_for(conn: &Connection, entry: Option<&DayEntry>, d: NaiveDate) -> AppResult<Coverage> {
    let worked = entry.map(|e| e.worked_minutes()).unwrap_or(0);
    let allocations = queries::get_allocations(conn, &d)?;
    Ok(coverage::coverage(worked, &allocations))
}

fn summary_block(summary: &PeriodSummary, cfg: &Config, privacy: bool) -> String {
    let std_day = cfg.std_day_minutes();
    let agg_line = |label: &str, mins: i64| {
        format!(
            "{:>18}  {:>8} {:>9}\n",
            label,
            format_hours(mins),
            format!("({})", format_days(mins, std_day))
        )
    };

    let mut out = String::new();
    out.push_str(&agg_line("Worked", summary.worked));
    out.push_str(&agg_line("of max possible", summary.max));
    out.push_str(&agg_line("Leave", summary.adjustments.leave));
    out.push_str(&agg_line("Sick", summary.adjustments.sick));
    out.push_str(&agg_line("Training", summary.adjustments.training));
    out.push_str(&agg_line("P/H", summary.adjustments.public_holiday));
    out.push_str(&agg_line("TOTAL", summary.total()));

    if !privacy {
        let aggregator = Aggregator::new(cfg);
        let earned = aggregator.earnings(summary.worked);
        out.push_str(&format!(
            "{:>18}  {}\n",
            "Earned",
            format_money(earned, &cfg.currency)
        ));
    }
    out
}

fn cursor_mark(cursor: Option<usize>, row: usize) -> &'static str {
    match cursor {
        Some(c) if c == row => ">",
        _ => " ",
    }
}

// ---------------------------------------------------------------------
// Week view
// ---------------------------------------------------------------------

pub fn render_week(
    conn: &Connection,
    cfg: &Config,
    year: i32,
    month: u32,
    week_start: NaiveDate,
    cursor: Option<usize>,
    privacy: bool,
) -> AppResult<String> {
    let weeks = calendar::weeks_in_month(year, month);
    let idx = calendar::find_week_index(&weeks, week_start);
    let week = calendar::week_of(week_start);
    let entries = queries::get_days_in_range(conn, &week.start, &week.end)?;

    let aggregator = Aggregator::new(cfg);
    let summary = aggregator.summarize(&entries, week);

    let month_name = calendar::month_bounds(year, month).start.format("%B %Y");
    let mut out = format!(
        "{}   ◄ Week {}/{} ({} - {}) ►\n\n",
        bold(&month_name.to_string()),
        idx + 1,
        weeks.len(),
        week.start.format("%b %d"),
        week.end.format("%b %d"),
    );
    out.push_str(&summary_block(&summary, cfg, privacy));
    out.push('\n');

    let mut table = Table::new(vec![
        Column::new(" ", 1),
        Column::new("Day", 3),
        Column::new("Date", 8),
        Column::new("In", 5),
        Column::new("Lunch", 5),
        Column::new("Out", 5),
        Column::new("Worked", 6),
        Column::new("Adj", 6),
        Column::new("Type", 4),
        Column::new("Cov", 3),
        Column::new("Comment", 24),
    ]);

    for (row, (d, in_month)) in calendar::days_in_week_for_month(week.start, year, month)
        .into_iter()
        .enumerate()
    {
        let entry = entry_for(&entries, d);
        let cov = coverage_for(conn, entry, d)?;

        let in_str = entry
            .and_then(|e| e.clock_in)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let lunch_str = entry
            .and_then(|e| e.lunch)
            .map(|m| format!("{m:02}m"))
            .unwrap_or_else(|| "-".to_string());
        let out_str = entry
            .and_then(|e| e.clock_out)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let worked = entry.map(|e| e.worked_minutes()).unwrap_or(0);
        let worked_str = if worked > 0 {
            format_hours(worked)
        } else {
            "-".to_string()
        };
        let adj = entry.map(|e| e.adjusted_minutes()).unwrap_or(0);
        let adj_str = if adj > 0 {
            format_hours(adj)
        } else {
            "-".to_string()
        };
        let kinds: String = entry
            .map(|e| {
                let mut codes: Vec<&str> =
                    e.adjustments.iter().map(|a| a.kind.to_db_str()).collect();
                codes.dedup();
                codes.join("")
            })
            .unwrap_or_default();
        let comment = entry
            .and_then(|e| e.comment.as_deref())
            .map(|c| ellipsize(c, 24))
            .unwrap_or_default();

        // Out-of-month dates are shown parenthesized and never counted
        let date_str = if in_month {
            d.format("%b %d").to_string()
        } else {
            format!("({})", d.format("%b %d"))
        };

        let is_weekend = matches!(d.weekday(), Weekday::Sat | Weekday::Sun);
        let style = |s: String| {
            if is_weekend || !in_month {
                format!("{DIM}{s}{RESET}")
            } else {
                s
            }
        };

        table.add_row(vec![
            cursor_mark(cursor, row).to_string(),
            style(d.format("%a").to_string()),
            style(date_str),
            style(in_str),
            style(lunch_str),
            style(out_str),
            style(worked_str),
            style(adj_str),
            style(kinds),
            format!("{}{}{}", colors::color_for_coverage(cov), cov.glyph(), RESET),
            style(comment),
        ]);
    }

    out.push_str(&table.render());
    Ok(out)
}

// ---------------------------------------------------------------------
// Month view
// ---------------------------------------------------------------------

pub fn render_month(
    conn: &Connection,
    cfg: &Config,
    year: i32,
    month: u32,
    cursor: Option<usize>,
    privacy: bool,
) -> AppResult<String> {
    let bounds = calendar::month_bounds(year, month);
    let entries = queries::get_days_in_range(conn, &bounds.start, &bounds.end)?;
    let aggregator = Aggregator::new(cfg);
    let summary = aggregator.summarize(&entries, bounds);

    let mut out = format!("{}\n\n", bold(&bounds.start.format("%B %Y").to_string()));
    out.push_str(&summary_block(&summary, cfg, privacy));
    out.push('\n');

    let mut table = Table::new(vec![
        Column::new(" ", 1),
        Column::new("Week", 4),
        Column::new("From", 8),
        Column::new("To", 8),
        Column::new("Worked", 7),
        Column::new("Adj", 7),
        Column::new("Flags", 5),
    ]);

    for (row, ws) in calendar::weeks_in_month(year, month).into_iter().enumerate() {
        // Totals per week row count only the days inside this month
        let mut worked = 0;
        let mut adjusted = 0;
        let mut flags = 0;
        for (d, in_month) in calendar::days_in_week_for_month(ws, year, month) {
            if !in_month {
                continue;
            }
            let entry = entry_for(&entries, d);
            worked += entry.map(|e| e.worked_minutes()).unwrap_or(0);
            adjusted += entry.map(|e| e.adjusted_minutes()).unwrap_or(0);
            if !matches!(
                coverage_for(conn, entry, d)?,
                Coverage::None | Coverage::Exact
            ) {
                flags += 1;
            }
        }

        table.add_row(vec![
            cursor_mark(cursor, row).to_string(),
            format!("{}", row + 1),
            ws.format("%b %d").to_string(),
            (ws + Days::new(6)).format("%b %d").to_string(),
            format_hours(worked),
            format_hours(adjusted),
            if flags > 0 {
                format!("{}{}{}", colors::YELLOW, flags, RESET)
            } else {
                format!("{GREY}-{RESET}")
            },
        ]);
    }

    out.push_str(&table.render());
    Ok(out)
}

// ---------------------------------------------------------------------
// Year view
// ---------------------------------------------------------------------

pub fn render_year(
    conn: &Connection,
    cfg: &Config,
    year: i32,
    cursor: Option<usize>,
    privacy: bool,
) -> AppResult<String> {
    let range = Period::year(year).range();
    let entries = queries::get_days_in_range(conn, &range.start, &range.end)?;
    let aggregator = Aggregator::new(cfg);
    let summary = aggregator.summarize(&entries, range);

    let mut out = format!("{}\n\n", bold(&format!("Year {year}")));
    out.push_str(&summary_block(&summary, cfg, privacy));
    out.push('\n');

    let mut table = Table::new(vec![
        Column::new(" ", 1),
        Column::new("Month", 9),
        Column::new("Worked", 8),
        Column::new("Max", 8),
        Column::new("Leave", 7),
        Column::new("Sick", 7),
        Column::new("Train", 7),
        Column::new("P/H", 7),
    ]);

    for (row, (y, m)) in calendar::fiscal_year_months(year).into_iter().enumerate() {
        let bounds = calendar::month_bounds(y, m);
        let s = aggregator.summarize(&entries, bounds);

        table.add_row(vec![
            cursor_mark(cursor, row).to_string(),
            bounds.start.format("%B").to_string(),
            format_hours(s.worked),
            format_hours(s.max),
            format_hours(s.adjustments.leave),
            format_hours(s.adjustments.sick),
            format_hours(s.adjustments.training),
            format_hours(s.adjustments.public_holiday),
        ]);
    }

    out.push_str(&table.render());
    Ok(out)
}

// ---------------------------------------------------------------------
// Day view
// ---------------------------------------------------------------------

pub fn render_day(
    conn: &Connection,
    cfg: &Config,
    date: NaiveDate,
    privacy: bool,
) -> AppResult<String> {
    let entry = queries::get_day(conn, &date)?;
    let allocations = queries::get_allocations(conn, &date)?;
    let worked = entry.as_ref().map(|e| e.worked_minutes()).unwrap_or(0);
    let cov = coverage::coverage(worked, &allocations);

    let mut out = format!("{}\n\n", bold(&date.format("%a %b %d, %Y").to_string()));

    match &entry {
        Some(e) => {
            let fmt_clock = |t: Option<chrono::NaiveTime>| {
                t.map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string())
            };
            out.push_str(&format!(
                "  In {}   Lunch {}   Out {}   Worked {}\n",
                colors::colorize_optional(&fmt_clock(e.clock_in)),
                colors::colorize_optional(
                    &e.lunch
                        .map(|m| format!("{m}m"))
                        .unwrap_or_else(|| "-".to_string())
                ),
                colors::colorize_optional(&fmt_clock(e.clock_out)),
                format_hours(worked),
            ));
            for adj in &e.adjustments {
                out.push_str(&format!(
                    "  {} {}\n",
                    pad_left(&format_hours(adj.minutes), 6),
                    adj.kind.label()
                ));
            }
            if let Some(c) = &e.comment {
                out.push_str(&format!("  {GREY}{c}{RESET}\n"));
            }
        }
        None => out.push_str(&format!("  {GREY}no entry{RESET}\n")),
    }

    out.push('\n');
    out.push_str(&render_allocations(&allocations, worked, cov, cfg, privacy));
    Ok(out)
}

/// Allocation lines plus the coverage verdict, shared between day view
/// and `alloc show`.
pub fn render_allocations(
    allocations: &[Allocation],
    worked_minutes: i64,
    cov: Coverage,
    cfg: &Config,
    privacy: bool,
) -> String {
    let mut out = String::new();
    let allocated: i64 = allocations.iter().map(|a| a.minutes).sum();

    if allocations.is_empty() {
        out.push_str(&format!("  {GREY}no allocations{RESET}\n"));
    }
    for alloc in allocations {
        let client_mark = if alloc.entered_on_client { "•" } else { " " };
        out.push_str(&format!(
            "  {} {} {}\n",
            pad_left(&format_hours(alloc.minutes), 6),
            alloc.ticket_id,
            client_mark,
        ));
    }

    out.push_str(&format!(
        "  Allocated {} of {} worked  {}{}{}\n",
        format_hours(allocated),
        format_hours(worked_minutes),
        colors::color_for_coverage(cov),
        cov.glyph(),
        RESET,
    ));

    if !privacy {
        let aggregator = Aggregator::new(cfg);
        out.push_str(&format!(
            "  Worth {}\n",
            format_money(aggregator.earnings(worked_minutes), &cfg.currency)
        ));
    }
    out
}

/// Row count of each view, used by the session to clamp its cursor.
pub fn row_count(state: &crate::core::nav::NavState) -> usize {
    use crate::core::nav::NavState;
    match state {
        NavState::Year { .. } => 12,
        NavState::Month { year, month } => calendar::weeks_in_month(*year, *month).len(),
        NavState::Week { .. } => 7,
        NavState::Day { .. } => 0,
    }
}

/// Render whichever view the navigation state points at.
pub fn render_state(
    conn: &Connection,
    cfg: &Config,
    state: &crate::core::nav::NavState,
    cursor: Option<usize>,
    privacy: bool,
) -> AppResult<String> {
    use crate::core::nav::NavState;
    match *state {
        NavState::Year { year } => render_year(conn, cfg, year, cursor, privacy),
        NavState::Month { year, month } => render_month(conn, cfg, year, month, cursor, privacy),
        NavState::Week {
            year,
            month,
            week_start,
        } => render_week(conn, cfg, year, month, week_start, cursor, privacy),
        NavState::Day { date, .. } => render_day(conn, cfg, date, privacy),
    }
}
