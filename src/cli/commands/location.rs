use crate::cli::parser::{Commands, LocationAction};
use crate::config::Config;
use crate::core::location::LocationLogic;
use crate::core::query::QueryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Location { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            LocationAction::Add { name } => {
                let loc = LocationLogic::add(&pool.conn, name)?;
                success(format!("Location {} registered: {}", loc.id, loc.name));
            }
            LocationAction::List => {
                let locations = QueryLogic::locations(&pool.conn)?;
                if locations.is_empty() {
                    info("No locations registered yet.");
                    return Ok(());
                }

                header("Locations");
                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("Name"),
                    Column::right("Total"),
                ]);
                for loc in &locations {
                    let snap = QueryLogic::snapshot(&pool.conn, loc.id)?;
                    table.add_row(vec![
                        loc.id.to_string(),
                        loc.name.clone(),
                        snap.total_count.to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
