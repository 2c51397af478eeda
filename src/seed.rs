//! Sample data for local development and demos.
//!
//! Records are drawn from a small catalogue of HR integration interfaces, each with a
//! fixed integration key and status-appropriate messages.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use serde_json::{Map, Value};

use crate::{
    database::models::{log_severity::LogSeverity, log_status::LogStatus},
    interface_logs::payload::NewInterfaceLog,
};

/// Records inserted per statement.
pub const SEED_BATCH_SIZE: usize = 1000;

const JOB_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// (interface name, integration key)
const INTERFACES: [(&str, &str); 10] = [
    ("SAP SuccessFactors Employee Sync", "SF-ECP-EMP-001"),
    ("SAP ECP Payroll Integration", "ECP-PAYROLL-002"),
    ("Workday HR Data Export", "WD-EXPORT-003"),
    ("AD User Provisioning", "AD-USER-004"),
    ("Benefits Enrollment Sync", "BENEFITS-005"),
    ("Time Tracking Integration", "TIME-TRACK-006"),
    ("Performance Management Export", "PERF-MGMT-007"),
    ("Learning Management Sync", "LEARN-SYNC-008"),
    ("Recruitment Data Import", "RECRUIT-IMP-009"),
    ("Compensation Update Feed", "COMP-FEED-010"),
];

fn messages(status: LogStatus) -> &'static [&'static str] {
    match status {
        LogStatus::Success => &[
            "Successfully processed 1,247 employee records",
            "Payroll data synchronized with 99.8% accuracy",
            "User provisioning completed for 45 new hires",
            "Benefits enrollment updated for Q3 2024",
            "Performance ratings exported to external system",
        ],
        LogStatus::Failed => &[
            "Connection timeout to SAP SuccessFactors API",
            "Invalid data format in employee records",
            "Authentication failed for Workday integration",
            "Database connection pool exhausted",
            "Required field missing in payroll data",
        ],
        LogStatus::Warning => &[
            "Partial data sync completed with 3 skipped records",
            "API rate limit approaching threshold",
            "Duplicate employee ID detected and handled",
            "Slow response times detected from external system",
            "Data validation warnings for 12 records",
        ],
        LogStatus::Running => &[
            "Processing employee data batch 3 of 5",
            "Synchronizing benefits enrollment changes",
            "Validating payroll calculation results",
            "Exporting performance review data",
            "Updating user access permissions",
        ],
    }
}

const SEVERITIES: [LogSeverity; 4] = [
    LogSeverity::Low,
    LogSeverity::Medium,
    LogSeverity::High,
    LogSeverity::Critical,
];

/// Generates one random record with a timestamp within the last `days` days of `now`.
pub fn generate_log<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: u32) -> NewInterfaceLog {
    let (interface_name, integration_key) = INTERFACES[rng.gen_range(0..INTERFACES.len())];
    let status = LogStatus::ALL[rng.gen_range(0..LogStatus::ALL.len())];
    let messages = messages(status);
    let message = messages[rng.gen_range(0..messages.len())];
    let severity = SEVERITIES[rng.gen_range(0..SEVERITIES.len())];

    let lookback_seconds = i64::from(days.max(1)) * 24 * 60 * 60;
    let timestamp = (now - Duration::seconds(rng.gen_range(0..lookback_seconds))).trunc_subsecs(3);

    NewInterfaceLog {
        interface_name: interface_name.to_string(),
        integration_key: integration_key.to_string(),
        status,
        message: message.to_string(),
        severity,
        duration: rng.gen_range(1_000..31_000),
        records_processed: rng.gen_range(100..5_100),
        timestamp: Some(timestamp),
        metadata: Some(metadata(rng, interface_name, timestamp)),
    }
}

fn metadata<R: Rng + ?Sized>(
    rng: &mut R,
    interface_name: &str,
    timestamp: DateTime<Utc>,
) -> Map<String, Value> {
    let source_system = if interface_name.contains("SAP") {
        "SAP"
    } else if interface_name.contains("Workday") {
        "Workday"
    } else {
        "External"
    };
    let target_system = if interface_name.contains("ECP") {
        "SAP ECP"
    } else {
        "Downstream System"
    };
    let job_suffix: String = (0..9)
        .map(|_| char::from(JOB_ID_CHARSET[rng.gen_range(0..JOB_ID_CHARSET.len())]))
        .collect();

    let mut metadata = Map::new();
    metadata.insert("sourceSystem".to_string(), Value::from(source_system));
    metadata.insert("targetSystem".to_string(), Value::from(target_system));
    metadata.insert(
        "jobId".to_string(),
        Value::from(format!("JOB-{}-{job_suffix}", timestamp.timestamp_millis())),
    );
    metadata.insert(
        "userId".to_string(),
        Value::from(format!("admin{}", rng.gen_range(1..=5))),
    );
    metadata
}

/// Sizes of the insert batches needed to write `count` records.
pub fn batch_sizes(count: usize) -> impl Iterator<Item = usize> {
    (0..count)
        .step_by(SEED_BATCH_SIZE)
        .map(move |offset| (count - offset).min(SEED_BATCH_SIZE))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_logs_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let log = generate_log(&mut rng, now(), 7);
            let timestamp = log.timestamp.unwrap();

            assert!(timestamp <= now());
            assert!(timestamp > now() - Duration::days(7));
            assert!((1_000..31_000).contains(&log.duration));
            assert!((100..5_100).contains(&log.records_processed));
        }
    }

    #[test]
    fn test_integration_key_matches_interface() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let log = generate_log(&mut rng, now(), 30);
            let expected = INTERFACES
                .iter()
                .find(|(name, _)| *name == log.interface_name)
                .map(|(_, key)| *key);

            assert_eq!(expected, Some(log.integration_key.as_str()));
        }
    }

    #[test]
    fn test_message_fits_status() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let log = generate_log(&mut rng, now(), 1);
            assert!(messages(log.status).contains(&log.message.as_str()));
        }
    }

    #[test]
    fn test_metadata_names_source_system() {
        let mut rng = StdRng::seed_from_u64(5);
        let metadata = metadata(&mut rng, "Workday HR Data Export", now());

        assert_eq!(metadata["sourceSystem"], "Workday");
        assert_eq!(metadata["targetSystem"], "Downstream System");
        assert!(metadata["jobId"]
            .as_str()
            .is_some_and(|job_id| job_id.starts_with("JOB-")));
    }

    #[test]
    fn test_batches_respect_batch_size() {
        let sizes: Vec<_> = batch_sizes(2_500).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
    }

    #[test]
    fn test_zero_count_yields_no_batches() {
        assert_eq!(batch_sizes(0).count(), 0);
        assert_eq!(batch_sizes(1000).collect::<Vec<_>>(), vec![1000]);
    }
}
