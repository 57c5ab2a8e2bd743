use super::parse_id;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::views::TimesheetEntry;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_duration, format_local};
use chrono::Utc;

fn entry_row(e: &TimesheetEntry) -> Vec<String> {
    let (end, duration) = match e.end_time {
        Some(end) => (format_local(&end), format_duration(end - e.start_time)),
        None => ("--".to_string(), format_duration(Utc::now() - e.start_time)),
    };

    vec![
        format_local(&e.start_time),
        end,
        duration,
        e.in_count.to_string(),
        e.out_count.to_string(),
        e.total_count.to_string(),
    ]
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timesheet { id } = cmd {
        let id = parse_id(id)?;
        let pool = DbPool::new(&cfg.database)?;
        let sheet = QueryLogic::timesheet(&pool.conn, id)?;

        header(format!("{} (#{})", sheet.location.name, sheet.location.id));

        if sheet.timesheet.is_empty() {
            info("No intervals recorded yet.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Start"),
            Column::left("End"),
            Column::right("Duration"),
            Column::right("In"),
            Column::right("Out"),
            Column::right("Total"),
        ]);
        for e in &sheet.timesheet {
            table.add_row(entry_row(e));
        }

        // grey out the open interval's end marker after layout
        for line in table.render().lines() {
            println!("{}", line.replacen(" -- ", &format!(" {} ", colorize_optional("--")), 1));
        }
    }

    Ok(())
}
