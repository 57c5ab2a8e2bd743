use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let locations = count_rows(&pool.conn, "locations")?;
    let intervals = count_rows(&pool.conn, "location_timesheets")?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM location_timesheets WHERE end_time IS NULL",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Locations:{} {}{}{}", CYAN, RESET, GREEN, locations, RESET);
    println!(
        "{}• Intervals:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, intervals, RESET, open
    );

    //
    // 3) TIME RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(start_time), MAX(start_time) FROM location_timesheets",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let placeholder = format!("{GREY}--{RESET}");

    println!("{}• Interval starts:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| placeholder.clone()));
    println!("    to:   {}", last.unwrap_or(placeholder));

    println!();
    Ok(())
}
