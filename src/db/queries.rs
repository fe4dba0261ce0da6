use crate::errors::{AppError, AppResult};
use crate::models::adjust_kind::AdjustKind;
use crate::models::allocation::Allocation;
use crate::models::day_entry::{Adjustment, DayEntry};
use crate::models::ticket::Ticket;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------
// Day entries
// ---------------------------------------------------------------------

fn map_entry_row(row: &Row) -> Result<DayEntry> {
    let date_str: String = row.get("date")?;
    let date = parse_db_date(&date_str)?;

    let clock_in: Option<String> = row.get("clock_in")?;
    let clock_out: Option<String> = row.get("clock_out")?;

    Ok(DayEntry {
        date,
        clock_in: clock_in.as_deref().map(parse_db_time).transpose()?,
        lunch: row.get("lunch_minutes")?,
        clock_out: clock_out.as_deref().map(parse_db_time).transpose()?,
        adjustments: Vec::new(), // filled in by the caller
        comment: row.get("comment")?,
    })
}

fn parse_db_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

fn parse_db_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

fn load_adjustments(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Adjustment>> {
    let mut stmt = conn.prepare(
        "SELECT kind, minutes FROM adjustments
         WHERE date = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], |row| {
        let kind_str: String = row.get(0)?;
        let kind = AdjustKind::from_db_str(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidAdjustKind(kind_str.clone())),
            )
        })?;
        Ok(Adjustment {
            kind,
            minutes: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_day(conn: &Connection, date: &NaiveDate) -> AppResult<Option<DayEntry>> {
    let mut stmt = conn.prepare("SELECT * FROM entries WHERE date = ?1")?;
    let entry = stmt
        .query_row([date.format("%Y-%m-%d").to_string()], map_entry_row)
        .optional()?;

    match entry {
        Some(mut e) => {
            e.adjustments = load_adjustments(conn, date)?;
            Ok(Some(e))
        }
        None => Ok(None),
    }
}

/// Insert or replace a day entry together with its adjustments.
/// The two tables are written in one transaction so a quit signal can
/// never leave a half-updated date behind.
pub fn upsert_day(conn: &mut Connection, entry: &DayEntry) -> AppResult<()> {
    entry.validate()?;

    let tx = conn.transaction()?;
    let date_str = entry.date_str();

    tx.execute(
        "INSERT OR REPLACE INTO entries (date, clock_in, lunch_minutes, clock_out, comment)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            date_str,
            entry.clock_in.map(|t| t.format("%H:%M").to_string()),
            entry.lunch,
            entry.clock_out.map(|t| t.format("%H:%M").to_string()),
            entry.comment,
        ],
    )?;

    tx.execute("DELETE FROM adjustments WHERE date = ?1", [&date_str])?;
    for adj in &entry.adjustments {
        tx.execute(
            "INSERT INTO adjustments (date, kind, minutes) VALUES (?1, ?2, ?3)",
            params![date_str, adj.kind.to_db_str(), adj.minutes],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Entries between two dates (inclusive), adjustments attached, ordered
/// by date.
pub fn get_days_in_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<DayEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM entries
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        [
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_entry_row,
    )?;

    let mut out: Vec<DayEntry> = Vec::new();
    for r in rows {
        out.push(r?);
    }

    // Attach adjustments in one sweep over the same range
    let mut stmt = conn.prepare(
        "SELECT date, kind, minutes FROM adjustments
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map(
        [
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        },
    )?;

    for r in rows {
        let (date_str, kind_str, minutes) = r?;
        let kind = AdjustKind::from_db_str(&kind_str)
            .ok_or_else(|| AppError::InvalidAdjustKind(kind_str.clone()))?;
        if let Some(entry) = out.iter_mut().find(|e| e.date_str() == date_str) {
            entry.adjustments.push(Adjustment { kind, minutes });
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------
// Allocations
// ---------------------------------------------------------------------

fn map_allocation_row(row: &Row) -> Result<Allocation> {
    let date_str: String = row.get("date")?;
    Ok(Allocation {
        ticket_id: row.get("ticket_id")?,
        date: parse_db_date(&date_str)?,
        minutes: row.get("minutes")?,
        entered_on_client: row.get::<_, i64>("entered_on_client")? == 1,
    })
}

pub fn get_allocations(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Allocation>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM allocations
         WHERE date = ?1
         ORDER BY ticket_id ASC",
    )?;

    let rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], map_allocation_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_allocations_in_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<Allocation>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM allocations
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, ticket_id ASC",
    )?;

    let rows = stmt.query_map(
        [
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_allocation_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Total allocated minutes for a date.
pub fn allocated_minutes(conn: &Connection, date: &NaiveDate) -> AppResult<i64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(minutes), 0) FROM allocations WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Insert or replace the allocation for (ticket, date). The ticket must
/// exist; archived tickets remain valid targets for historical edits.
pub fn upsert_allocation(conn: &Connection, alloc: &Allocation) -> AppResult<()> {
    if alloc.minutes < 0 {
        return Err(AppError::Validation(
            "allocation hours must be non-negative".into(),
        ));
    }
    if get_ticket(conn, &alloc.ticket_id)?.is_none() {
        return Err(AppError::NotFound(format!(
            "ticket {} does not exist",
            alloc.ticket_id
        )));
    }

    conn.execute(
        "INSERT OR REPLACE INTO allocations (ticket_id, date, minutes, entered_on_client)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            alloc.ticket_id,
            alloc.date_str(),
            alloc.minutes,
            if alloc.entered_on_client { 1 } else { 0 },
        ],
    )?;
    Ok(())
}

/// Delete the allocation for (ticket, date). Returns NotFound when no
/// row matched; callers decide whether that is a no-op or a message.
pub fn delete_allocation(conn: &Connection, ticket_id: &str, date: &NaiveDate) -> AppResult<()> {
    let n = conn.execute(
        "DELETE FROM allocations WHERE ticket_id = ?1 AND date = ?2",
        params![ticket_id, date.format("%Y-%m-%d").to_string()],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!(
            "no allocation for {} on {}",
            ticket_id,
            date.format("%Y-%m-%d")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------

fn map_ticket_row(row: &Row) -> Result<Ticket> {
    let created_str: String = row.get("created_at")?;
    Ok(Ticket {
        id: row.get("id")?,
        description: row.get("description")?,
        archived: row.get::<_, i64>("archived")? == 1,
        created_at: parse_db_date(&created_str)?,
    })
}

pub fn get_ticket(conn: &Connection, id: &str) -> AppResult<Option<Ticket>> {
    let mut stmt = conn.prepare("SELECT * FROM tickets WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_ticket_row).optional()?)
}

pub fn list_tickets(conn: &Connection, include_archived: bool) -> AppResult<Vec<Ticket>> {
    let sql = if include_archived {
        "SELECT * FROM tickets ORDER BY id ASC"
    } else {
        "SELECT * FROM tickets WHERE archived = 0 ORDER BY id ASC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_ticket_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Substring search over id and description.
pub fn search_tickets(
    conn: &Connection,
    query: &str,
    include_archived: bool,
) -> AppResult<Vec<Ticket>> {
    let pattern = format!("%{query}%");
    let sql = if include_archived {
        "SELECT * FROM tickets
         WHERE id LIKE ?1 OR description LIKE ?1
         ORDER BY id ASC"
    } else {
        "SELECT * FROM tickets
         WHERE (id LIKE ?1 OR description LIKE ?1) AND archived = 0
         ORDER BY id ASC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([pattern], map_ticket_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Create a ticket. A duplicate id is a validation error, not an upsert.
pub fn create_ticket(conn: &Connection, ticket: &Ticket) -> AppResult<()> {
    if get_ticket(conn, &ticket.id)?.is_some() {
        return Err(AppError::Validation(format!(
            "ticket {} already exists",
            ticket.id
        )));
    }
    conn.execute(
        "INSERT INTO tickets (id, description, archived, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            ticket.id,
            ticket.description,
            if ticket.archived { 1 } else { 0 },
            ticket.created_at.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(())
}

pub fn update_ticket(conn: &Connection, ticket: &Ticket) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE tickets SET description = ?1, archived = ?2 WHERE id = ?3",
        params![
            ticket.description,
            if ticket.archived { 1 } else { 0 },
            ticket.id,
        ],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("ticket {}", ticket.id)));
    }
    Ok(())
}

pub fn set_ticket_archived(conn: &Connection, id: &str, archived: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE tickets SET archived = ?1 WHERE id = ?2",
        params![if archived { 1 } else { 0 }, id],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("ticket {id}")));
    }
    Ok(())
}

/// Delete a ticket. Refused while any allocation still references it;
/// nothing is removed in that case.
pub fn delete_ticket(conn: &Connection, id: &str) -> AppResult<()> {
    let refs: i64 = conn.query_row(
        "SELECT COUNT(*) FROM allocations WHERE ticket_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    if refs > 0 {
        return Err(AppError::ReferentialIntegrity(format!(
            "ticket {id} has {refs} allocation(s); archive it instead"
        )));
    }

    let n = conn.execute("DELETE FROM tickets WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("ticket {id}")));
    }
    Ok(())
}
