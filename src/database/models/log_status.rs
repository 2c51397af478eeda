use sea_orm::{sea_query::StringLen, DeriveActiveEnum};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Outcome of a single interface run. `Running` marks a run that has not finished yet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogStatus {
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "running")]
    Running,
}

impl LogStatus {
    pub const ALL: [Self; 4] = [Self::Success, Self::Failed, Self::Warning, Self::Running];

    /// Position of the status in [`LogStatus::ALL`], used to index per-status counters.
    pub const fn index(self) -> usize {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
            Self::Warning => 2,
            Self::Running => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_parses_lowercase_names() {
        assert_eq!(LogStatus::from_str("failed").unwrap(), LogStatus::Failed);
        assert_eq!(LogStatus::from_str("running").unwrap(), LogStatus::Running);
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert!(LogStatus::from_str("skipped").is_err());
        assert!(LogStatus::from_str("Success").is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (position, status) in LogStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), position);
        }
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(LogStatus::Warning.to_string(), "warning");
    }
}
