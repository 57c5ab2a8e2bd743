//! Read-side projections returned by the query service and serialized into
//! response bodies and exports.

use super::interval::TimesheetInterval;
use super::location::Location;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Current counts of a location, taken from its most recent interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    #[serde(flatten)]
    pub location: Location,
    pub in_count: i64,
    pub out_count: i64,
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub in_count: i64,
    pub out_count: i64,
    pub total_count: i64,
}

impl From<&TimesheetInterval> for TimesheetEntry {
    fn from(iv: &TimesheetInterval) -> Self {
        Self {
            start_time: iv.start_time,
            end_time: iv.end_time(),
            in_count: iv.in_count,
            out_count: iv.out_count,
            total_count: iv.total_count(),
        }
    }
}

/// Full history of a location, newest interval first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationTimesheet {
    #[serde(flatten)]
    pub location: Location,
    pub timesheet: Vec<TimesheetEntry>,
}
