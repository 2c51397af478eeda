use std::{borrow::Cow, str::FromStr};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::database::models::{log_severity::LogSeverity, log_status::LogStatus};

/// Request body for creating or replacing an interface run record.
///
/// Enumerated fields arrive as plain strings so that an unknown value is reported
/// as a validation error on that field rather than as an unparseable body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceLogPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "interfaceName is required"))]
    pub interface_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "integrationKey is required"))]
    pub integration_key: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    #[serde(default = "default_severity")]
    #[validate(custom(function = "validate_severity"))]
    pub severity: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "recordsProcessed must not be negative"))]
    pub records_processed: i64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(custom(function = "validate_metadata"))]
    pub metadata: Option<Map<String, Value>>,
}

/// Request body for inserting several records at once.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkInterfaceLogPayload {
    #[validate(
        length(min = 1, max = 1000, message = "logs must contain between 1 and 1000 entries"),
        nested
    )]
    pub logs: Vec<InterfaceLogPayload>,
}

fn default_severity() -> String {
    LogSeverity::default().to_string()
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if status.is_empty() {
        return Err(ValidationError::new("required").with_message("status is required".into()));
    }

    LogStatus::from_str(status).map(|_| ()).map_err(|_| {
        ValidationError::new("enum").with_message(Cow::Owned(format!(
            "status must be one of success, failed, warning, running (got '{status}')"
        )))
    })
}

/// Metadata is a flat map: values may be strings, numbers, booleans or null.
fn validate_metadata(metadata: &Map<String, Value>) -> Result<(), ValidationError> {
    match metadata
        .iter()
        .find(|(_, value)| value.is_object() || value.is_array())
    {
        Some((key, _)) => Err(ValidationError::new("flat").with_message(Cow::Owned(format!(
            "metadata must be a flat map; '{key}' holds a nested value"
        )))),
        None => Ok(()),
    }
}

fn validate_severity(severity: &str) -> Result<(), ValidationError> {
    LogSeverity::from_str(severity).map(|_| ()).map_err(|_| {
        ValidationError::new("enum").with_message(Cow::Owned(format!(
            "severity must be one of low, medium, high, critical (got '{severity}')"
        )))
    })
}

/// A record that passed validation and is ready to be written.
///
/// Only [`InterfaceLogPayload::into_new_log`] constructs this outside of tests, so
/// every write path goes through the same checks.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterfaceLog {
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    pub message: String,
    pub severity: LogSeverity,
    pub duration: i64,
    pub records_processed: i64,
    pub timestamp: Option<DateTime<Utc>>,
    pub metadata: Option<Map<String, Value>>,
}

impl InterfaceLogPayload {
    /// Validates the payload and converts it into its typed form.
    pub fn into_new_log(self) -> Result<NewInterfaceLog, ValidationErrors> {
        self.validate()?;

        let status = LogStatus::from_str(&self.status)
            .map_err(|_| single_error("status", "enum", "status is not a known value"))?;
        let severity = LogSeverity::from_str(&self.severity)
            .map_err(|_| single_error("severity", "enum", "severity is not a known value"))?;

        Ok(NewInterfaceLog {
            interface_name: self.interface_name,
            integration_key: self.integration_key,
            status,
            message: self.message,
            severity,
            duration: self.duration,
            records_processed: self.records_processed,
            timestamp: self.timestamp.map(|timestamp| timestamp.trunc_subsecs(3)),
            metadata: self.metadata,
        })
    }
}

impl BulkInterfaceLogPayload {
    pub fn into_new_logs(self) -> Result<Vec<NewInterfaceLog>, ValidationErrors> {
        self.validate()?;
        self.logs
            .into_iter()
            .map(InterfaceLogPayload::into_new_log)
            .collect()
    }
}

fn single_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code).with_message(message.into()));
    errors
}
