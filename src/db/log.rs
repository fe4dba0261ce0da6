use crate::db::pool::DbPool;
use rusqlite::{Connection, Result};

/// Record an operation in the internal log table.
pub fn insert_log(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), ?1, ?2, ?3)",
        [operation, target, message],
    )?;
    Ok(())
}

pub fn load_log(pool: &mut DbPool) -> Result<Vec<(String, String, String, String)>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT date, operation, target, message FROM log ORDER BY date DESC, id DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
