pub mod api_error;
pub mod dashboard;
pub mod health_checks;
pub mod json_error;
pub mod logs;
pub mod validated_json;
