use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    sea_query::{Expr, LikeExpr, SimpleExpr},
    ColumnTrait, Condition,
};
use serde::Deserialize;

use crate::{
    config::PaginationConfig,
    database::models::{
        interface_log::Column,
        log_severity::LogSeverity,
        log_status::LogStatus,
    },
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid {field} '{value}': expected an RFC 3339 timestamp or a YYYY-MM-DD date")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid status filter '{0}': expected one of success, failed, warning, running")]
    InvalidStatus(String),
    #[error("Invalid severity filter '{0}': expected one of low, medium, high, critical")]
    InvalidSeverity(String),
}

/// Raw query string of the log listing, exactly as sent by the client.
///
/// Every parameter is optional and empty values count as absent, matching what
/// HTML forms send for untouched inputs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub interface_name: Option<String>,
    pub integration_key: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
}

impl LogListParams {
    pub fn parse(self, config: &PaginationConfig) -> Result<(LogFilter, Pagination), FilterError> {
        let pagination = Pagination::normalize(self.page.as_deref(), self.limit.as_deref(), config);

        let status = present(self.status)
            .map(|status| LogStatus::from_str(&status).map_err(|_| FilterError::InvalidStatus(status)))
            .transpose()?;
        let severity = present(self.severity)
            .map(|severity| {
                LogSeverity::from_str(&severity).map_err(|_| FilterError::InvalidSeverity(severity))
            })
            .transpose()?;

        let start = present(self.start_date)
            .map(|value| parse_date_bound("startDate", &value, DayEdge::Start))
            .transpose()?;
        let end = present(self.end_date)
            .map(|value| parse_date_bound("endDate", &value, DayEdge::End))
            .transpose()?;

        let filter = LogFilter {
            interface_name: present(self.interface_name),
            integration_key: present(self.integration_key),
            status,
            severity,
            start,
            end,
            search: present(self.search),
        };

        Ok((filter, pagination))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Filters applied to a log listing. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Case-insensitive substring of `interface_name`
    pub interface_name: Option<String>,
    /// Case-insensitive substring of `integration_key`
    pub integration_key: Option<String>,
    pub status: Option<LogStatus>,
    pub severity: Option<LogSeverity>,
    /// Inclusive lower bound on `timestamp`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`
    pub end: Option<DateTime<Utc>>,
    /// Case-insensitive substring of name, key or message
    pub search: Option<String>,
}

impl LogFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(interface_name) = &self.interface_name {
            condition =
                condition.add(contains_ignore_case(Column::InterfaceNameFolded, interface_name));
        }
        if let Some(integration_key) = &self.integration_key {
            condition =
                condition.add(contains_ignore_case(Column::IntegrationKeyFolded, integration_key));
        }
        if let Some(status) = self.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if let Some(severity) = self.severity {
            condition = condition.add(Column::Severity.eq(severity));
        }
        if let Some(start) = self.start {
            condition = condition.add(Column::Timestamp.gte(start));
        }
        if let Some(end) = self.end {
            condition = condition.add(Column::Timestamp.lte(end));
        }
        if let Some(search) = &self.search {
            condition = condition.add(
                Condition::any()
                    .add(contains_ignore_case(Column::InterfaceNameFolded, search))
                    .add(contains_ignore_case(Column::IntegrationKeyFolded, search))
                    .add(contains_ignore_case(Column::MessageFolded, search)),
            );
        }

        condition
    }
}

/// Case folding shared by stored text and search needles.
///
/// Folding happens in Rust on both sides: SQLite's `LOWER()` only knows ASCII.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// `folded_column LIKE '%needle%'` with the needle folded and matched literally.
fn contains_ignore_case(folded_column: Column, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&fold_case(needle)));

    Expr::col(folded_column).like(LikeExpr::new(pattern).escape('\\'))
}

/// Escapes LIKE wildcards so user input never acts as a pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[derive(Debug, Clone, Copy)]
enum DayEdge {
    Start,
    End,
}

/// Parses a date filter bound.
///
/// A bare date covers the whole UTC day: the start bound becomes midnight, the end
/// bound the last millisecond of that day.
fn parse_date_bound(
    field: &'static str,
    value: &str,
    edge: DayEdge,
) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let invalid = || FilterError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    let naive = match edge {
        DayEdge::Start => date.and_hms_opt(0, 0, 0),
        DayEdge::End => date.and_hms_milli_opt(23, 59, 59, 999),
    }
    .ok_or_else(invalid)?;

    Ok(naive.and_utc())
}

/// A normalized, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Builds a page request from raw query values.
    ///
    /// Missing, unparseable, zero or negative values fall back to page 1 and the
    /// configured default size; `limit` is capped at the configured maximum.
    pub fn normalize(page: Option<&str>, limit: Option<&str>, config: &PaginationConfig) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Self { page, limit }
    }

    /// Zero-based page index.
    pub const fn index(&self) -> u64 {
        self.page - 1
    }

    /// Rows to skip before this page, or `None` when that exceeds `i64::MAX`.
    pub fn offset(&self) -> Option<u64> {
        self.index()
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }

    pub const fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(self.limit)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .and_then(|value| u64::try_from(value).ok())
}
