use super::parse_id;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        id,
        format,
        file,
        force,
    } = cmd
    {
        let id = parse_id(id)?;
        let mut pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&mut pool, id, *format, file, *force)?;
    }
    Ok(())
}
