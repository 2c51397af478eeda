use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::database::models::interface_log::Column;

/// Lookback selector shared by every dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, Serialize)]
pub enum Period {
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[strum(serialize = "24h")]
    #[serde(rename = "24h")]
    TwentyFourHours,
    #[strum(serialize = "7d")]
    #[serde(rename = "7d")]
    SevenDays,
    #[strum(serialize = "30d")]
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Period {
    /// Parses a period selector, falling back to `24h` for missing or unknown values.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn lookback(self) -> Duration {
        match self {
            Self::OneHour => Duration::hours(1),
            Self::TwentyFourHours => Duration::days(1),
            Self::SevenDays => Duration::days(7),
            Self::ThirtyDays => Duration::days(30),
        }
    }

    /// Width of a trend bucket for this period.
    pub fn bucket_width(self) -> Duration {
        match self {
            Self::OneHour => Duration::minutes(5),
            Self::TwentyFourHours => Duration::hours(1),
            Self::SevenDays => Duration::hours(6),
            Self::ThirtyDays => Duration::days(1),
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow {
            start: now - self.lookback(),
            end: now,
        }
    }
}

/// Inclusive `[start, end]` range over record timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn condition(&self) -> Condition {
        Condition::all().add(Column::Timestamp.between(self.start, self.end))
    }
}
