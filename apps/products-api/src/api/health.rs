//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use sea_orm::DatabaseConnection;

async fn ready(State(db): State<DatabaseConnection>) -> Response {
    let postgres: HealthCheckFuture<'_> = Box::pin(async {
        database::postgres::check_health(&db)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", postgres)]).await
}

/// `GET /ready`, 503 while PostgreSQL is unreachable
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
