use crate::errors::{AppError, AppResult};
use crate::models::interval::{IntervalState, TimesheetInterval};
use crate::models::location::Location;
use crate::utils::time::{parse_db_timestamp, to_db_timestamp};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const INTERVAL_COLUMNS: &str = "id, location_id, start_time, end_time, in_count, out_count";

fn parse_ts(raw: &str, column: usize) -> Result<DateTime<Utc>> {
    parse_db_timestamp(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid timestamp: {raw}"))),
        )
    })
}

pub fn map_interval(row: &Row) -> Result<TimesheetInterval> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;

    let start_time = parse_ts(&start_raw, 2)?;
    let end_time = end_raw.as_deref().map(|s| parse_ts(s, 3)).transpose()?;

    Ok(TimesheetInterval {
        id: row.get("id")?,
        location_id: row.get("location_id")?,
        start_time,
        state: IntervalState::from_end_time(end_time),
        in_count: row.get("in_count")?,
        out_count: row.get("out_count")?,
    })
}

fn map_location(row: &Row) -> Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

// ---------------------------
// Locations
// ---------------------------

pub fn insert_location(conn: &Connection, name: &str) -> AppResult<Location> {
    conn.execute("INSERT INTO locations (name) VALUES (?1)", [name])?;
    Ok(Location::new(conn.last_insert_rowid(), name))
}

pub fn find_location(conn: &Connection, id: i64) -> AppResult<Option<Location>> {
    let loc = conn
        .query_row(
            "SELECT id, name FROM locations WHERE id = ?1",
            [id],
            map_location,
        )
        .optional()?;
    Ok(loc)
}

pub fn list_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    let mut stmt = conn.prepare("SELECT id, name FROM locations ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_location)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Timesheet intervals
// ---------------------------

/// The location's interval without an end time, if any.
pub fn find_open_interval(conn: &Connection, location_id: i64) -> AppResult<Option<TimesheetInterval>> {
    let sql = format!(
        "SELECT {INTERVAL_COLUMNS} FROM location_timesheets
         WHERE location_id = ?1 AND end_time IS NULL"
    );
    let iv = conn.query_row(&sql, [location_id], map_interval).optional()?;
    Ok(iv)
}

/// Most recent interval by start time, open or closed.
pub fn latest_interval(conn: &Connection, location_id: i64) -> AppResult<Option<TimesheetInterval>> {
    let sql = format!(
        "SELECT {INTERVAL_COLUMNS} FROM location_timesheets
         WHERE location_id = ?1
         ORDER BY start_time DESC, id DESC
         LIMIT 1"
    );
    let iv = conn.query_row(&sql, [location_id], map_interval).optional()?;
    Ok(iv)
}

/// All intervals of a location, newest first.
pub fn load_timesheet(conn: &Connection, location_id: i64) -> AppResult<Vec<TimesheetInterval>> {
    let sql = format!(
        "SELECT {INTERVAL_COLUMNS} FROM location_timesheets
         WHERE location_id = ?1
         ORDER BY start_time DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([location_id], map_interval)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_interval(
    conn: &Connection,
    location_id: i64,
    start_time: &DateTime<Utc>,
    in_count: i64,
    out_count: i64,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO location_timesheets (location_id, start_time, end_time, in_count, out_count)
         VALUES (?1, ?2, NULL, ?3, ?4)",
        params![location_id, to_db_timestamp(start_time), in_count, out_count],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the cumulative counts of an interval that is still open and
/// optionally close it in the same statement.
///
/// Returns the number of rows touched: 0 means the interval was closed (or
/// removed) since it was read.
pub fn update_open_interval(
    conn: &Connection,
    interval_id: i64,
    in_count: i64,
    out_count: i64,
    end_time: Option<&DateTime<Utc>>,
) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE location_timesheets
         SET in_count = ?1, out_count = ?2, end_time = ?3
         WHERE id = ?4 AND end_time IS NULL",
        params![in_count, out_count, end_time.map(to_db_timestamp), interval_id],
    )?;
    Ok(changed)
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}
