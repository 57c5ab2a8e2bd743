use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a (possibly empty) database up to the current schema.
///
/// Returns the migration versions applied by this call; empty when the
/// schema was already current.
pub fn init_db(conn: &Connection) -> AppResult<Vec<&'static str>> {
    let applied = run_pending_migrations(conn)?;
    if applied.is_empty() {
        log::debug!("schema already up to date");
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!init_db(&conn).unwrap().is_empty());
        assert!(init_db(&conn).unwrap().is_empty());
    }
}
