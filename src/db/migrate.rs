//! Idempotent schema migrations.
//!
//! Every migration is recorded in the `log` table as a `migration_applied`
//! row whose target is the migration version, so re-running is a no-op.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_locations",
        description: "Created locations table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS locations (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250901_0002_create_location_timesheets",
        description: "Created location_timesheets table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS location_timesheets (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            location_id  INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            start_time   TEXT NOT NULL,
            end_time     TEXT,
            in_count     INTEGER NOT NULL DEFAULT 0 CHECK(in_count >= 0),
            out_count    INTEGER NOT NULL DEFAULT 0 CHECK(out_count >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_timesheets_location_start
            ON location_timesheets(location_id, start_time);
        "#,
    },
    Migration {
        version: "20250915_0003_single_open_interval",
        description: "At most one open interval per location",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_timesheets_one_open
            ON location_timesheets(location_id) WHERE end_time IS NULL;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        log::info!("migration applied: {}", m.version);
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied.push(m.version);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |_| Ok(()),
        )
        .optional()
        .unwrap()
        .is_some()
    }

    #[test]
    fn creates_schema_once() {
        let conn = Connection::open_in_memory().unwrap();

        let first = run_pending_migrations(&conn).unwrap();
        assert_eq!(first.len(), MIGRATIONS.len());
        assert!(table_exists(&conn, "locations"));
        assert!(table_exists(&conn, "location_timesheets"));

        let second = run_pending_migrations(&conn).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn second_open_interval_is_refused_by_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute("INSERT INTO locations (name) VALUES ('Lobby')", [])
            .unwrap();

        let insert = "INSERT INTO location_timesheets (location_id, start_time, in_count, out_count)
                      VALUES (1, ?1, 0, 0)";
        conn.execute(insert, ["2025-09-01T09:00:00.000Z"]).unwrap();
        assert!(conn.execute(insert, ["2025-09-01T10:00:00.000Z"]).is_err());
    }
}
