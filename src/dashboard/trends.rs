use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use futures_util::TryStreamExt;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use serde::Serialize;

use super::period::Period;
use crate::database::models::{
    interface_log::{Column, Entity},
    log_status::LogStatus,
};

/// Status counts for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Start of the bucket
    pub time: DateTime<Utc>,
    pub success: u64,
    pub failed: u64,
    pub warning: u64,
    pub running: u64,
}

impl TrendPoint {
    pub const fn total(&self) -> u64 {
        self.success + self.failed + self.warning + self.running
    }
}

#[derive(Debug, FromQueryResult)]
struct TrendSample {
    status: LogStatus,
    timestamp: DateTime<Utc>,
}

/// Counts records per status in fixed-width buckets aligned to the Unix epoch.
#[derive(Debug)]
pub struct TrendAccumulator {
    width_seconds: i64,
    buckets: BTreeMap<i64, [u64; 4]>,
}

impl TrendAccumulator {
    pub fn new(bucket_width: Duration) -> Self {
        Self {
            width_seconds: bucket_width.num_seconds().max(1),
            buckets: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, timestamp: DateTime<Utc>, status: LogStatus) {
        let start = timestamp.timestamp().div_euclid(self.width_seconds) * self.width_seconds;
        self.buckets.entry(start).or_default()[status.index()] += 1;
    }

    /// One point per non-empty bucket, oldest first.
    pub fn finish(self) -> Vec<TrendPoint> {
        self.buckets
            .into_iter()
            .filter_map(|(start, counts)| {
                Some(TrendPoint {
                    time: DateTime::from_timestamp(start, 0)?,
                    success: counts[LogStatus::Success.index()],
                    failed: counts[LogStatus::Failed.index()],
                    warning: counts[LogStatus::Warning.index()],
                    running: counts[LogStatus::Running.index()],
                })
            })
            .collect()
    }
}

pub async fn trends(
    db: &DatabaseConnection,
    period: Period,
    now: DateTime<Utc>,
) -> Result<Vec<TrendPoint>, DbErr> {
    let window = period.window(now);
    let mut accumulator = TrendAccumulator::new(period.bucket_width());

    let mut samples = Entity::find()
        .select_only()
        .column(Column::Status)
        .column(Column::Timestamp)
        .filter(window.condition())
        .into_model::<TrendSample>()
        .stream(db)
        .await?;

    while let Some(sample) = samples.try_next().await? {
        accumulator.add(sample.timestamp, sample.status);
    }

    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, hour, minute, second).unwrap()
    }

    #[test]
    fn test_five_minute_buckets() {
        let mut accumulator = TrendAccumulator::new(Period::OneHour.bucket_width());
        accumulator.add(at(10, 0, 0), LogStatus::Success);
        accumulator.add(at(10, 4, 59), LogStatus::Failed);
        accumulator.add(at(10, 5, 0), LogStatus::Success);

        let points = accumulator.finish();

        assert_eq!(
            points,
            vec![
                TrendPoint {
                    time: at(10, 0, 0),
                    success: 1,
                    failed: 1,
                    warning: 0,
                    running: 0,
                },
                TrendPoint {
                    time: at(10, 5, 0),
                    success: 1,
                    failed: 0,
                    warning: 0,
                    running: 0,
                },
            ]
        );
    }

    #[test]
    fn test_buckets_are_sorted_regardless_of_input_order() {
        let mut accumulator = TrendAccumulator::new(Period::TwentyFourHours.bucket_width());
        accumulator.add(at(15, 30, 0), LogStatus::Warning);
        accumulator.add(at(9, 10, 0), LogStatus::Running);
        accumulator.add(at(12, 59, 59), LogStatus::Success);

        let times: Vec<_> = accumulator.finish().iter().map(|point| point.time).collect();

        assert_eq!(times, vec![at(9, 0, 0), at(12, 0, 0), at(15, 0, 0)]);
    }

    #[test]
    fn test_six_hour_buckets_align_to_midnight_utc() {
        let mut accumulator = TrendAccumulator::new(Period::SevenDays.bucket_width());
        accumulator.add(at(5, 59, 59), LogStatus::Success);
        accumulator.add(at(6, 0, 0), LogStatus::Success);
        accumulator.add(at(17, 0, 0), LogStatus::Failed);

        let times: Vec<_> = accumulator.finish().iter().map(|point| point.time).collect();

        assert_eq!(times, vec![at(0, 0, 0), at(6, 0, 0), at(12, 0, 0)]);
    }

    #[test]
    fn test_daily_buckets_sum_to_record_count() {
        let mut accumulator = TrendAccumulator::new(Period::ThirtyDays.bucket_width());
        let statuses = [
            LogStatus::Success,
            LogStatus::Failed,
            LogStatus::Warning,
            LogStatus::Running,
        ];
        for (offset, status) in statuses.iter().cycle().take(10).enumerate() {
            let day = i64::try_from(offset % 3).unwrap();
            accumulator.add(at(8, 0, 0) - Duration::days(day), *status);
        }

        let points = accumulator.finish();
        let total: u64 = points.iter().map(TrendPoint::total).sum();

        assert_eq!(points.len(), 3);
        assert_eq!(total, 10);
        assert_eq!(points[2].time, at(0, 0, 0));
    }

    #[test]
    fn test_absent_statuses_are_zero() {
        let mut accumulator = TrendAccumulator::new(Period::OneHour.bucket_width());
        accumulator.add(at(10, 1, 0), LogStatus::Running);

        let point = &accumulator.finish()[0];
        assert_eq!((point.success, point.failed, point.warning, point.running), (0, 0, 0, 1));
    }
}
