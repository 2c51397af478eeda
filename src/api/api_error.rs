use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::{debug, error};
use validator::ValidationErrors;

use crate::interface_logs::filter::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected input. Carries the field errors when the input came through `validator`.
    #[error("{0}")]
    Validation(String, Option<ValidationErrors>),
    #[error("Log not found")]
    NotFound,
    #[error("Store error: {0}")]
    Store(#[from] DbErr),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = format!("Validation failed: {errors}");
        Self::Validation(message, Some(errors))
    }
}

impl From<FilterError> for ApiError {
    fn from(error: FilterError) -> Self {
        Self::Validation(error.to_string(), None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message, details) => {
                debug!(%message, "Rejected request");

                let body = match details {
                    Some(details) => json!({ "error": message, "details": details }),
                    None => json!({ "error": message }),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Log not found" })),
            )
                .into_response(),
            Self::Store(db_error) => {
                error!(error = %db_error, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let mut errors = ValidationErrors::new();
        errors.add("status", ValidationError::new("enum"));

        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_filter_errors_name_the_value() {
        let error = ApiError::from(FilterError::InvalidStatus("done".to_string()));

        assert!(error.to_string().contains("'done'"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_errors_are_hidden() {
        let error = ApiError::Store(DbErr::Custom("connection reset".to_string()));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
