pub mod backup;
pub mod config;
pub mod count;
pub mod db;
pub mod export;
pub mod init;
pub mod location;
pub mod log;
pub mod request;
pub mod show;
pub mod timesheet;

use crate::errors::{AppError, AppResult};

/// Parse a location id typed on the command line.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::invalid("Invalid ID"))
}

/// Parse an optional `--in` / `--out` value.
pub(crate) fn parse_count(raw: Option<&String>, field: &str) -> AppResult<Option<i64>> {
    raw.map(|s| {
        s.trim()
            .parse::<i64>()
            .map_err(|_| AppError::invalid(format!("passed {field} is invalid")))
    })
    .transpose()
}
