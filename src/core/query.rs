//! Read-only projections over locations and their timesheets.

use crate::db::queries::{find_location, latest_interval, list_locations, load_timesheet};
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::models::views::{LocationSnapshot, LocationTimesheet, TimesheetEntry};
use rusqlite::Connection;

pub struct QueryLogic;

impl QueryLogic {
    fn require_location(conn: &Connection, location_id: i64) -> AppResult<Location> {
        find_location(conn, location_id)?.ok_or_else(|| AppError::not_found("Location Not Found"))
    }

    /// Counts of the most recent interval, open or closed. All zero when the
    /// location has never been counted.
    pub fn snapshot(conn: &Connection, location_id: i64) -> AppResult<LocationSnapshot> {
        let location = Self::require_location(conn, location_id)?;

        let (in_count, out_count) = latest_interval(conn, location_id)?
            .map(|iv| (iv.in_count, iv.out_count))
            .unwrap_or((0, 0));

        Ok(LocationSnapshot {
            location,
            in_count,
            out_count,
            total_count: in_count - out_count,
        })
    }

    pub fn timesheet(conn: &Connection, location_id: i64) -> AppResult<LocationTimesheet> {
        let location = Self::require_location(conn, location_id)?;

        let timesheet = load_timesheet(conn, location_id)?
            .iter()
            .map(TimesheetEntry::from)
            .collect();

        Ok(LocationTimesheet {
            location,
            timesheet,
        })
    }

    pub fn locations(conn: &Connection) -> AppResult<Vec<Location>> {
        list_locations(conn)
    }
}
