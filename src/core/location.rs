use crate::db::log::audit_quiet;
use crate::db::queries::insert_location;
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use rusqlite::Connection;

/// Registration of counted places. Locations are immutable once created.
pub struct LocationLogic;

impl LocationLogic {
    pub fn add(conn: &Connection, name: &str) -> AppResult<Location> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid("location name must not be empty"));
        }

        let loc = insert_location(conn, name)?;
        audit_quiet(
            conn,
            "location_add",
            &format!("location {}", loc.id),
            &format!("Registered '{}'", loc.name),
        );
        Ok(loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::log::load_log;

    #[test]
    fn names_are_trimmed_and_required() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let loc = LocationLogic::add(&conn, "  Main hall ").unwrap();
        assert_eq!(loc.name, "Main hall");
        assert!(matches!(
            LocationLogic::add(&conn, "   "),
            Err(AppError::InvalidInput(_))
        ));

        let log = load_log(&conn).unwrap();
        assert!(log.iter().any(|e| e.operation == "location_add"));
    }
}
