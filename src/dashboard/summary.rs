use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use super::{average_duration, period::Period, success_rate};
use crate::database::models::{
    interface_log::{Column, Entity},
    log_severity::LogSeverity,
    log_status::LogStatus,
};

/// How many failures the summary lists.
const RECENT_FAILURES_LIMIT: u64 = 5;

/// Per-status totals for the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub status: LogStatus,
    pub count: u64,
    pub avg_duration: f64,
    pub total_records: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct RecentFailure {
    pub id: Uuid,
    pub interface_name: String,
    pub integration_key: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub severity: LogSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub summary: Vec<StatusSummary>,
    pub total_logs: u64,
    pub success_rate: f64,
    pub recent_failures: Vec<RecentFailure>,
}

impl Summary {
    pub fn count_for(&self, status: LogStatus) -> u64 {
        self.summary
            .iter()
            .find(|group| group.status == status)
            .map_or(0, |group| group.count)
    }
}

#[derive(Debug, FromQueryResult)]
struct SummarySample {
    status: LogStatus,
    duration: i64,
    records_processed: i64,
}

#[derive(Debug, Clone, Copy, Default)]
struct StatusTotals {
    count: u64,
    duration_total: i64,
    records_total: i64,
}

/// Folds records into per-status totals.
#[derive(Debug, Default)]
pub struct SummaryAccumulator {
    totals: [StatusTotals; 4],
}

impl SummaryAccumulator {
    pub fn add(&mut self, status: LogStatus, duration: i64, records_processed: i64) {
        let totals = &mut self.totals[status.index()];
        totals.count += 1;
        totals.duration_total = totals.duration_total.saturating_add(duration);
        totals.records_total = totals.records_total.saturating_add(records_processed);
    }

    /// Builds the summary. Only statuses seen at least once get a group.
    pub fn finish(self, recent_failures: Vec<RecentFailure>) -> Summary {
        let summary: Vec<StatusSummary> = LogStatus::ALL
            .iter()
            .zip(self.totals)
            .filter(|(_, totals)| totals.count > 0)
            .map(|(status, totals)| StatusSummary {
                status: *status,
                count: totals.count,
                avg_duration: average_duration(totals.duration_total, totals.count),
                total_records: totals.records_total,
            })
            .collect();

        let total_logs = self.totals.iter().map(|totals| totals.count).sum();
        let success_count = self.totals[LogStatus::Success.index()].count;

        Summary {
            summary,
            total_logs,
            success_rate: success_rate(success_count, total_logs),
            recent_failures,
        }
    }
}

pub async fn summary(
    db: &DatabaseConnection,
    period: Period,
    now: DateTime<Utc>,
) -> Result<Summary, DbErr> {
    let window = period.window(now);
    let mut accumulator = SummaryAccumulator::default();

    {
        let mut samples = Entity::find()
            .select_only()
            .column(Column::Status)
            .column(Column::Duration)
            .column(Column::RecordsProcessed)
            .filter(window.condition())
            .into_model::<SummarySample>()
            .stream(db)
            .await?;

        while let Some(sample) = samples.try_next().await? {
            accumulator.add(sample.status, sample.duration, sample.records_processed);
        }
    }

    let recent_failures = Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::InterfaceName)
        .column(Column::IntegrationKey)
        .column(Column::Message)
        .column(Column::Timestamp)
        .column(Column::Severity)
        .filter(window.condition())
        .filter(Column::Status.eq(LogStatus::Failed))
        .order_by_desc(Column::Timestamp)
        .limit(RECENT_FAILURES_LIMIT)
        .into_model::<RecentFailure>()
        .all(db)
        .await?;

    Ok(accumulator.finish(recent_failures))
}
