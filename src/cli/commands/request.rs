use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::IntervalEngine;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::transport::{Method, Request, Router};
use crate::utils::colors::{GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Request { method, path, body } = cmd {
        let method: Method = method.parse()?;
        let body = body
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .map_err(|e| AppError::invalid(format!("request body is not valid JSON: {e}")))?;

        let request = Request {
            method,
            path: path.clone(),
            body,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let engine = IntervalEngine::from_minutes(cfg.close_after_minutes)?;
        let response = Router::new(&engine).handle(&mut pool, &request);

        let color = if response.is_success() { GREEN } else { RED };
        println!("{}HTTP {}{}", color, response.status, RESET);
        println!("{}", serde_json::to_string_pretty(&response.body)?);
    }

    Ok(())
}
