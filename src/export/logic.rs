// src/export/logic.rs

use crate::core::query::QueryLogic;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::TimesheetExport;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level timesheet export.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the timesheet of `location_id` to `file`.
    ///
    /// Returns the number of exported intervals; nothing is written when the
    /// location has no intervals yet.
    pub fn export(
        pool: &mut DbPool,
        location_id: i64,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        let sheet = QueryLogic::timesheet(&pool.conn, location_id)?;
        let rows = TimesheetExport::rows(&sheet);

        if rows.is_empty() {
            warning(format!(
                "No intervals recorded for location {} ({}).",
                sheet.location.id, sheet.location.name
            ));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit_quiet(
            &pool.conn,
            "export",
            &format!("location {location_id}"),
            &format!("{} intervals → {} ({})", rows.len(), path.display(), format.as_str()),
        );

        Ok(rows.len())
    }
}
