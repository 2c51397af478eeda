use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::app::App;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: u64,
}

pub async fn health(State(app): State<App>) -> Json<Health> {
    Json(Health {
        status: "OK",
        timestamp: Utc::now(),
        uptime: app.started_at.elapsed().as_secs(),
    })
}

/// Liveness answer used while the database is still being migrated.
pub async fn ok() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

pub async fn readiness(State(app): State<App>) -> (StatusCode, Json<Value>) {
    match app.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(error) => {
            warn!(%error, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": "Database connection error" })),
            )
        }
    }
}
