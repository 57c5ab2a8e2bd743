//! Interval accounting: folds in/out count deltas into a location's
//! timesheet.
//!
//! Each location has at most one open interval. A delta either opens a new
//! interval (none open), or accumulates into the open one. The open interval
//! is closed in the same write when its counts balance and it has been open
//! longer than the close threshold.

use crate::core::locks::LocationLocks;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{find_location, find_open_interval, insert_interval, update_open_interval};
use crate::errors::{AppError, AppResult};
use crate::models::delta::CountDelta;
use crate::models::interval::{IntervalState, TimesheetInterval};
use chrono::{DateTime, TimeDelta, Utc};
use rusqlite::TransactionBehavior;
use std::sync::PoisonError;

pub const DEFAULT_CLOSE_AFTER_MINUTES: i64 = 30;

/// What a single delta did to the timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    Opened {
        interval_id: i64,
        in_count: i64,
        out_count: i64,
    },
    Accumulated {
        interval_id: i64,
        in_count: i64,
        out_count: i64,
    },
    Closed {
        interval_id: i64,
        in_count: i64,
        out_count: i64,
        end_time: DateTime<Utc>,
    },
}

impl CountOutcome {
    pub fn interval_id(&self) -> i64 {
        match self {
            CountOutcome::Opened { interval_id, .. }
            | CountOutcome::Accumulated { interval_id, .. }
            | CountOutcome::Closed { interval_id, .. } => *interval_id,
        }
    }

    /// Counts stored on the interval after the delta.
    pub fn counts(&self) -> (i64, i64) {
        match self {
            CountOutcome::Opened {
                in_count,
                out_count,
                ..
            }
            | CountOutcome::Accumulated {
                in_count,
                out_count,
                ..
            }
            | CountOutcome::Closed {
                in_count,
                out_count,
                ..
            } => (*in_count, *out_count),
        }
    }

    /// Status reported back to callers; identical for every transition.
    pub fn status(&self) -> &'static str {
        "updated"
    }

    pub fn describe(&self) -> String {
        let (i, o) = self.counts();
        match self {
            CountOutcome::Opened { interval_id, .. } => {
                format!("Opened interval {interval_id} (in={i}, out={o})")
            }
            CountOutcome::Accumulated { interval_id, .. } => {
                format!("Updated interval {interval_id} (in={i}, out={o})")
            }
            CountOutcome::Closed { interval_id, .. } => {
                format!("Closed interval {interval_id} (in={i}, out={o})")
            }
        }
    }
}

/// New cumulative counts for an open interval and whether it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulation {
    pub in_count: i64,
    pub out_count: i64,
    pub next_state: IntervalState,
}

/// Pure transition of an open interval under one delta.
pub fn accumulate(
    open: &TimesheetInterval,
    delta: &CountDelta,
    now: DateTime<Utc>,
    close_after: TimeDelta,
) -> AppResult<Accumulation> {
    let overflow = || AppError::invalid("count exceeds the supported range");
    let in_count = open
        .in_count
        .checked_add(delta.in_or_zero())
        .ok_or_else(overflow)?;
    let out_count = open
        .out_count
        .checked_add(delta.out_or_zero())
        .ok_or_else(overflow)?;

    let balanced = in_count == out_count;
    let next_state = if balanced && now - open.start_time > close_after {
        IntervalState::Closed { end_time: now }
    } else {
        IntervalState::Open
    };

    Ok(Accumulation {
        in_count,
        out_count,
        next_state,
    })
}

/// Sole writer of timesheet intervals.
#[derive(Debug)]
pub struct IntervalEngine {
    close_after: TimeDelta,
    locks: LocationLocks,
}

impl Default for IntervalEngine {
    fn default() -> Self {
        Self::new(TimeDelta::minutes(DEFAULT_CLOSE_AFTER_MINUTES))
    }
}

impl IntervalEngine {
    pub fn new(close_after: TimeDelta) -> Self {
        Self {
            close_after,
            locks: LocationLocks::new(),
        }
    }

    pub fn from_minutes(minutes: i64) -> AppResult<Self> {
        TimeDelta::try_minutes(minutes)
            .map(Self::new)
            .ok_or_else(|| AppError::Config(format!("close_after_minutes out of range: {minutes}")))
    }

    pub fn close_after(&self) -> TimeDelta {
        self.close_after
    }

    pub fn apply_count(
        &self,
        pool: &mut DbPool,
        location_id: i64,
        delta: &CountDelta,
    ) -> AppResult<CountOutcome> {
        self.apply_count_at(pool, location_id, delta, Utc::now())
    }

    /// Apply `delta` as if it arrived at `now`.
    ///
    /// The whole read-modify-write runs under the location's mutex and inside
    /// one `BEGIN IMMEDIATE` transaction; on any error nothing is written.
    pub fn apply_count_at(
        &self,
        pool: &mut DbPool,
        location_id: i64,
        delta: &CountDelta,
        now: DateTime<Utc>,
    ) -> AppResult<CountOutcome> {
        // locations are never deleted: once found, the lock entry is for a real one
        if find_location(&pool.conn, location_id)?.is_none() {
            return Err(AppError::not_found("Location Not Found"));
        }

        let lock = self.locks.lock_for(location_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let outcome = match find_open_interval(&tx, location_id)? {
            None => {
                let (in_count, out_count) = (delta.in_or_zero(), delta.out_or_zero());
                let interval_id = insert_interval(&tx, location_id, &now, in_count, out_count)?;
                CountOutcome::Opened {
                    interval_id,
                    in_count,
                    out_count,
                }
            }
            Some(open) => {
                let next = accumulate(&open, delta, now, self.close_after)?;
                let end_time = next.next_state.end_time();

                let changed = update_open_interval(
                    &tx,
                    open.id,
                    next.in_count,
                    next.out_count,
                    end_time.as_ref(),
                )?;
                if changed == 0 {
                    return Err(AppError::Conflict(format!(
                        "interval {} of location {} is no longer open",
                        open.id, location_id
                    )));
                }

                match end_time {
                    Some(end_time) => CountOutcome::Closed {
                        interval_id: open.id,
                        in_count: next.in_count,
                        out_count: next.out_count,
                        end_time,
                    },
                    None => CountOutcome::Accumulated {
                        interval_id: open.id,
                        in_count: next.in_count,
                        out_count: next.out_count,
                    },
                }
            }
        };

        tx.commit()?;

        log::debug!("location {location_id}: {}", outcome.describe());
        audit_quiet(
            &pool.conn,
            "count",
            &format!("location {location_id}"),
            &outcome.describe(),
        );

        Ok(outcome)
    }
}
