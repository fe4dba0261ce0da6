use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration
/// ledger: applied migrations are recorded as `migration_applied` rows.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the full schema for a fresh database.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            date          TEXT PRIMARY KEY,
            clock_in      TEXT,
            lunch_minutes INTEGER,
            clock_out     TEXT,
            comment       TEXT
        );

        CREATE TABLE IF NOT EXISTS adjustments (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            date    TEXT NOT NULL,
            kind    TEXT NOT NULL CHECK(kind IN ('P','L','S','T')),
            minutes INTEGER NOT NULL CHECK(minutes >= 0)
        );

        CREATE TABLE IF NOT EXISTS tickets (
            id          TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            archived    INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS allocations (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_id         TEXT NOT NULL,
            date              TEXT NOT NULL,
            minutes           INTEGER NOT NULL CHECK(minutes >= 0),
            entered_on_client INTEGER NOT NULL DEFAULT 0,
            UNIQUE(ticket_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_adjustments_date ON adjustments(date);
        CREATE INDEX IF NOT EXISTS idx_allocations_date ON allocations(date);
        CREATE INDEX IF NOT EXISTS idx_allocations_ticket ON allocations(ticket_id);
        "#,
    )?;
    Ok(())
}

/// Migration: add the entered_on_client flag to allocations created by
/// older releases.
fn migrate_add_entered_on_client(conn: &Connection) -> Result<(), Error> {
    let version = "20250712_0001_add_entered_on_client";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if has_column(conn, "allocations", "entered_on_client")? {
        // Fresh schema already carries the column; just record it.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Column present at creation')",
            [version],
        )?;
        return Ok(());
    }

    // 2) Apply
    conn.execute(
        "ALTER TABLE allocations ADD COLUMN entered_on_client INTEGER NOT NULL DEFAULT 0;",
        [],
    )?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added entered_on_client flag to allocations')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'entered_on_client' to allocations table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create core tables when missing
    let fresh = !table_exists(conn, "entries")?;
    create_schema(conn)?;
    if fresh {
        success("Created timesheet schema.");
    }

    // 3) Column migrations
    migrate_add_entered_on_client(conn)?;

    Ok(())
}
