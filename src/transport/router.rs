//! Routes:
//!
//! | method | path              | handler        |
//! |--------|-------------------|----------------|
//! | GET    | `/:id`            | snapshot       |
//! | GET    | `/timesheet/:id`  | timesheet      |
//! | PATCH  | `/updateCount`    | apply a delta  |

use crate::core::engine::IntervalEngine;
use crate::core::query::QueryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::models::delta::{CountDelta, parse_integer};
use crate::transport::request::{Method, Request, Response};
use serde_json::Value;

pub struct Router<'a> {
    engine: &'a IntervalEngine,
}

fn parse_path_id(raw: &str) -> AppResult<i64> {
    parse_integer(&Value::from(raw)).ok_or_else(|| AppError::invalid("Invalid ID"))
}

fn body_id(body: &Value) -> AppResult<i64> {
    body.get("id")
        .and_then(parse_integer)
        .ok_or_else(|| AppError::invalid("Invalid ID"))
}

impl<'a> Router<'a> {
    pub fn new(engine: &'a IntervalEngine) -> Self {
        Self { engine }
    }

    /// Serve one request. Never fails: every error becomes an error response.
    pub fn handle(&self, pool: &mut DbPool, req: &Request) -> Response {
        log::debug!("{} {}", req.method, req.path);

        let segments = req.segments();
        let result = match (&req.method, segments.as_slice()) {
            (Method::Patch, ["updateCount"]) => self.update_count(pool, req),
            (Method::Get, ["timesheet", id]) => Self::timesheet(pool, id),
            (Method::Get, [id]) => Self::snapshot(pool, id),
            _ => return Response::error(404, "Route Not Found"),
        };

        result.unwrap_or_else(|e| Self::failure(req, e))
    }

    fn failure(req: &Request, e: AppError) -> Response {
        let kind = e.kind();
        if kind == ErrorKind::Unexpected {
            log::error!("{} {} failed: {e}", req.method, req.path);
        } else {
            log::info!("{} {} rejected: {e}", req.method, req.path);
        }
        Response::error(kind.status_code(), e.to_string())
    }

    fn snapshot(pool: &mut DbPool, raw_id: &str) -> AppResult<Response> {
        let id = parse_path_id(raw_id)?;
        let snap = QueryLogic::snapshot(&pool.conn, id)?;
        Ok(Response::data(serde_json::to_value(snap)?))
    }

    fn timesheet(pool: &mut DbPool, raw_id: &str) -> AppResult<Response> {
        let id = parse_path_id(raw_id)?;
        let sheet = QueryLogic::timesheet(&pool.conn, id)?;
        Ok(Response::data(serde_json::to_value(sheet)?))
    }

    fn update_count(&self, pool: &mut DbPool, req: &Request) -> AppResult<Response> {
        let body = req.body.as_ref().unwrap_or(&Value::Null);

        let id = body_id(body)?;
        let delta = CountDelta::from_json(body.get("inCount"), body.get("outCount"))?;

        let outcome = self.engine.apply_count(pool, id, &delta)?;
        log::debug!("updateCount {id}: {}", outcome.status());
        Ok(Response::message("Count updated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_location;
    use serde_json::json;

    fn setup() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let loc = insert_location(&pool.conn, "Lobby").unwrap();
        (pool, loc.id)
    }

    #[test]
    fn snapshot_route_returns_location_and_counts() {
        let (mut pool, id) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        let res = router.handle(&mut pool, &Request::get(format!("/{id}")));
        assert_eq!(res.status, 200);
        assert_eq!(res.body["statusCode"], 200);
        assert_eq!(res.body["data"]["id"], id);
        assert_eq!(res.body["data"]["name"], "Lobby");
        assert_eq!(res.body["data"]["totalCount"], 0);
    }

    #[test]
    fn update_then_read_back() {
        let (mut pool, id) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        let res = router.handle(
            &mut pool,
            &Request::patch("/updateCount", json!({ "id": id, "inCount": 3 })),
        );
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({ "statusCode": "200", "message": "Count updated" }));

        let res = router.handle(
            &mut pool,
            &Request::patch("/updateCount", json!({ "id": id.to_string(), "outCount": "1" })),
        );
        assert_eq!(res.status, 200);

        let res = router.handle(&mut pool, &Request::get(format!("/timesheet/{id}")));
        assert_eq!(res.status, 200);
        let sheet = res.body["data"]["timesheet"].as_array().unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet[0]["inCount"], 3);
        assert_eq!(sheet[0]["outCount"], 1);
        assert_eq!(sheet[0]["totalCount"], 2);
        assert!(sheet[0]["endTime"].is_null());
    }

    #[test]
    fn invalid_and_unknown_ids() {
        let (mut pool, _) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        for path in ["/abc", "/timesheet/abc"] {
            let res = router.handle(&mut pool, &Request::get(path));
            assert_eq!(res.status, 400, "{path}");
            assert_eq!(res.body["error"], "Invalid ID");
        }
        for path in ["/999", "/timesheet/999"] {
            let res = router.handle(&mut pool, &Request::get(path));
            assert_eq!(res.status, 404, "{path}");
            assert_eq!(res.body["error"], "Location Not Found");
        }

        let res = router.handle(
            &mut pool,
            &Request::patch("/updateCount", json!({ "id": "x", "inCount": 1 })),
        );
        assert_eq!(res.status, 400);
        let res = router.handle(
            &mut pool,
            &Request::patch("/updateCount", json!({ "id": 999, "inCount": 1 })),
        );
        assert_eq!(res.status, 404);
    }

    #[test]
    fn path_and_body_ids_are_parsed_alike() {
        let (mut pool, id) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        for path in [format!("/{id}.0"), format!("/timesheet/{id}.0")] {
            let res = router.handle(&mut pool, &Request::get(path.as_str()));
            assert_eq!(res.status, 200, "{path}");
            assert_eq!(res.body["data"]["id"], id);
        }

        let res = router.handle(&mut pool, &Request::get("/1e20"));
        assert_eq!(res.status, 400);
        let res = router.handle(
            &mut pool,
            &Request::patch("/updateCount", json!({ "id": 1e20, "inCount": 1 })),
        );
        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Invalid ID");
    }

    #[test]
    fn bad_deltas_are_rejected_without_writes() {
        let (mut pool, id) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        for body in [
            json!({ "id": id }),
            json!({ "id": id, "inCount": "many" }),
            json!({ "id": id, "outCount": -2 }),
            json!({ "id": id, "inCount": 1e300 }),
        ] {
            let res = router.handle(&mut pool, &Request::patch("/updateCount", body.clone()));
            assert_eq!(res.status, 400, "{body}");
        }

        let sheet = QueryLogic::timesheet(&pool.conn, id).unwrap();
        assert!(sheet.timesheet.is_empty());
    }

    #[test]
    fn unmatched_routes_are_404() {
        let (mut pool, _) = setup();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        let res = router.handle(&mut pool, &Request::new(Method::Other("DELETE".into()), "/1"));
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Route Not Found");
        let res = router.handle(&mut pool, &Request::get("/updateCount/extra/parts"));
        assert_eq!(res.status, 404);
    }

    #[test]
    fn store_faults_surface_as_500() {
        let (mut pool, id) = setup();
        pool.conn
            .execute_batch("DROP INDEX idx_timesheets_one_open; DROP TABLE location_timesheets;")
            .unwrap();
        let engine = IntervalEngine::default();
        let router = Router::new(&engine);

        let res = router.handle(&mut pool, &Request::get(format!("/{id}")));
        assert_eq!(res.status, 500);
        assert!(res.body["error"].as_str().unwrap().contains("location_timesheets"));
    }
}
