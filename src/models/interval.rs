//! Timesheet intervals and their open/closed state.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of an interval. `Open` accepts deltas; `Closed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntervalState {
    Open,
    Closed { end_time: DateTime<Utc> },
}

impl IntervalState {
    /// Build the state from the nullable `end_time` column.
    pub fn from_end_time(end_time: Option<DateTime<Utc>>) -> Self {
        match end_time {
            Some(end_time) => IntervalState::Closed { end_time },
            None => IntervalState::Open,
        }
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        match self {
            IntervalState::Open => None,
            IntervalState::Closed { end_time } => Some(*end_time),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, IntervalState::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetInterval {
    pub id: i64,
    pub location_id: i64,
    pub start_time: DateTime<Utc>, // ⇔ location_timesheets.start_time (RFC 3339, ms)
    pub state: IntervalState,      // ⇔ location_timesheets.end_time (NULL = open)
    pub in_count: i64,
    pub out_count: i64,
}

impl TimesheetInterval {
    /// Net occupancy estimate. Negative when exits were reported first.
    pub fn total_count(&self) -> i64 {
        self.in_count - self.out_count
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.state.end_time()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn interval(in_count: i64, out_count: i64, state: IntervalState) -> TimesheetInterval {
        TimesheetInterval {
            id: 1,
            location_id: 5,
            start_time: Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap(),
            state,
            in_count,
            out_count,
        }
    }

    #[test]
    fn total_may_go_negative() {
        assert_eq!(interval(2, 5, IntervalState::Open).total_count(), -3);
        assert_eq!(interval(7, 3, IntervalState::Open).total_count(), 4);
    }

    #[test]
    fn state_follows_end_time_column() {
        let end = Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap();
        assert!(IntervalState::from_end_time(None).is_open());
        let closed = interval(1, 1, IntervalState::from_end_time(Some(end)));
        assert!(!closed.is_open());
        assert_eq!(closed.end_time(), Some(end));
    }
}
