use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use serde::Serialize;

use super::{average_duration, period::Period, success_rate};
use crate::database::models::{
    interface_log::{Column, Entity},
    log_status::LogStatus,
};

/// Health rollup of one interface over the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceHealth {
    pub interface_name: String,
    pub total_runs: u64,
    pub success_count: u64,
    pub failed_count: u64,
    pub success_rate: f64,
    pub avg_duration: f64,
    pub last_run: DateTime<Utc>,
}

#[derive(Debug, FromQueryResult)]
struct HealthSample {
    interface_name: String,
    status: LogStatus,
    duration: i64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct InterfaceTotals {
    total_runs: u64,
    success_count: u64,
    failed_count: u64,
    duration_total: i64,
    last_run: DateTime<Utc>,
}

/// Folds records into per-interface totals.
#[derive(Debug, Default)]
pub struct HealthAccumulator {
    interfaces: HashMap<String, InterfaceTotals>,
}

impl HealthAccumulator {
    pub fn add(
        &mut self,
        interface_name: String,
        status: LogStatus,
        duration: i64,
        timestamp: DateTime<Utc>,
    ) {
        let totals = self
            .interfaces
            .entry(interface_name)
            .or_insert(InterfaceTotals {
                total_runs: 0,
                success_count: 0,
                failed_count: 0,
                duration_total: 0,
                last_run: timestamp,
            });

        totals.total_runs += 1;
        totals.duration_total = totals.duration_total.saturating_add(duration);
        totals.last_run = totals.last_run.max(timestamp);

        match status {
            LogStatus::Success => totals.success_count += 1,
            LogStatus::Failed => totals.failed_count += 1,
            LogStatus::Warning | LogStatus::Running => {}
        }
    }

    /// Most recently run interfaces first; ties are ordered by name.
    pub fn finish(self) -> Vec<InterfaceHealth> {
        let mut interfaces: Vec<InterfaceHealth> = self
            .interfaces
            .into_iter()
            .map(|(interface_name, totals)| InterfaceHealth {
                interface_name,
                total_runs: totals.total_runs,
                success_count: totals.success_count,
                failed_count: totals.failed_count,
                success_rate: success_rate(totals.success_count, totals.total_runs),
                avg_duration: average_duration(totals.duration_total, totals.total_runs),
                last_run: totals.last_run,
            })
            .collect();

        interfaces.sort_by(|a, b| {
            b.last_run
                .cmp(&a.last_run)
                .then_with(|| a.interface_name.cmp(&b.interface_name))
        });

        interfaces
    }
}

pub async fn interface_health(
    db: &DatabaseConnection,
    period: Period,
    now: DateTime<Utc>,
) -> Result<Vec<InterfaceHealth>, DbErr> {
    let window = period.window(now);
    let mut accumulator = HealthAccumulator::default();

    let mut samples = Entity::find()
        .select_only()
        .column(Column::InterfaceName)
        .column(Column::Status)
        .column(Column::Duration)
        .column(Column::Timestamp)
        .filter(window.condition())
        .into_model::<HealthSample>()
        .stream(db)
        .await?;

    while let Some(sample) = samples.try_next().await? {
        accumulator.add(
            sample.interface_name,
            sample.status,
            sample.duration,
            sample.timestamp,
        );
    }

    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_rollup_per_interface() {
        let mut accumulator = HealthAccumulator::default();
        accumulator.add("Payroll".to_string(), LogStatus::Success, 1000, at(8));
        accumulator.add("Payroll".to_string(), LogStatus::Failed, 2000, at(10));
        accumulator.add("Payroll".to_string(), LogStatus::Warning, 3000, at(9));

        let health = accumulator.finish();

        assert_eq!(
            health,
            vec![InterfaceHealth {
                interface_name: "Payroll".to_string(),
                total_runs: 3,
                success_count: 1,
                failed_count: 1,
                success_rate: 33.3,
                avg_duration: 2000.0,
                last_run: at(10),
            }]
        );
    }

    #[test]
    fn test_orders_by_most_recent_run() {
        let mut accumulator = HealthAccumulator::default();
        accumulator.add("Benefits".to_string(), LogStatus::Success, 0, at(6));
        accumulator.add("Time Tracking".to_string(), LogStatus::Success, 0, at(11));
        accumulator.add("AD Provisioning".to_string(), LogStatus::Success, 0, at(6));
        accumulator.add("Recruiting".to_string(), LogStatus::Running, 0, at(9));

        let names: Vec<_> = accumulator
            .finish()
            .into_iter()
            .map(|health| health.interface_name)
            .collect();

        assert_eq!(
            names,
            vec!["Time Tracking", "Recruiting", "AD Provisioning", "Benefits"]
        );
    }

    #[test]
    fn test_only_running_interface_has_zero_success_rate() {
        let mut accumulator = HealthAccumulator::default();
        accumulator.add("Learning Sync".to_string(), LogStatus::Running, 400, at(7));

        let health = &accumulator.finish()[0];
        assert_eq!(health.success_rate, 0.0);
        assert_eq!(health.avg_duration, 400.0);
    }
}
