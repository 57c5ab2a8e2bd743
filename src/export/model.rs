// src/export/model.rs

use crate::models::views::LocationTimesheet;
use crate::utils::time::to_db_timestamp;
use serde::Serialize;

/// Flat row for timesheet exports (one per interval).
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TimesheetExport {
    pub location_id: i64,
    pub location_name: String,
    pub start_time: String,
    pub end_time: String,
    pub in_count: i64,
    pub out_count: i64,
    pub total_count: i64,
}

impl TimesheetExport {
    pub fn rows(sheet: &LocationTimesheet) -> Vec<Self> {
        sheet
            .timesheet
            .iter()
            .map(|e| TimesheetExport {
                location_id: sheet.location.id,
                location_name: sheet.location.name.clone(),
                start_time: to_db_timestamp(&e.start_time),
                end_time: e.end_time.as_ref().map(to_db_timestamp).unwrap_or_default(),
                in_count: e.in_count,
                out_count: e.out_count,
                total_count: e.total_count,
            })
            .collect()
    }
}
