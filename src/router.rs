use std::any::Any;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::{
    api::{dashboard, health_checks, logs},
    app::App,
};

pub fn router(app: App) -> Router {
    let api_router = Router::new()
        .route("/logs", get(logs::list).post(logs::create))
        .route("/logs/bulk", post(logs::create_bulk))
        .route("/logs/filters/values", get(logs::filter_values))
        .route(
            "/logs/{id}",
            get(logs::get).put(logs::replace).delete(logs::delete),
        )
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/trends", get(dashboard::trends))
        .route("/dashboard/interfaces", get(dashboard::interfaces));

    let cors_layer = cors_layer(&app.config.server.cors_origins);

    let router = Router::new()
        .route("/health", get(health_checks::health))
        .route("/readiness", get(health_checks::readiness))
        .nest("/api", api_router)
        .fallback(route_not_found)
        .with_state(app)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    match cors_layer {
        Some(cors_layer) => router.layer(cors_layer),
        None => router,
    }
}

/// `None` when no origin is configured, which leaves CORS disabled.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny),
    )
}

async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!(%detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
