use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse,
    response::Response, Json,
};
use serde_json::json;
use tracing::debug;
use validator::ValidationErrors;

use crate::api::api_error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Validation error")]
    ValidationError(ValidationErrors),
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson(rejection) => {
                let message = format!("Invalid JSON body: {}", rejection.body_text());
                debug!(%message, "Rejected request body");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::ValidationError(errors) => ApiError::from(errors).into_response(),
        }
    }
}
