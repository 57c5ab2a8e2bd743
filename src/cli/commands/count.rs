use super::{parse_count, parse_id};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::{CountOutcome, IntervalEngine};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::delta::CountDelta;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Count {
        id,
        in_count,
        out_count,
    } = cmd
    {
        //
        // 1. Validate everything before touching the store
        //
        let id = parse_id(id)?;
        let delta = CountDelta::new(
            parse_count(in_count.as_ref(), "inCount")?,
            parse_count(out_count.as_ref(), "outCount")?,
        )?;

        //
        // 2. Apply
        //
        let mut pool = DbPool::new(&cfg.database)?;
        let engine = IntervalEngine::from_minutes(cfg.close_after_minutes)?;
        let outcome = engine.apply_count(&mut pool, id, &delta)?;

        success("Count updated");
        info(outcome.describe());
        if let CountOutcome::Closed { .. } = outcome {
            info(format!("Location {} is empty, interval closed.", id));
        }
    }

    Ok(())
}
