use super::parse_id;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, RESET, color_for_total};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let id = parse_id(id)?;
        let pool = DbPool::new(&cfg.database)?;
        let snap = QueryLogic::snapshot(&pool.conn, id)?;

        println!("\n📍 {} (#{})", snap.location.name, snap.location.id);
        println!("{}• In:{}    {}", CYAN, RESET, snap.in_count);
        println!("{}• Out:{}   {}", CYAN, RESET, snap.out_count);
        println!(
            "{}• Total:{} {}{}{}",
            CYAN,
            RESET,
            color_for_total(snap.total_count),
            snap.total_count,
            RESET
        );
    }

    Ok(())
}
