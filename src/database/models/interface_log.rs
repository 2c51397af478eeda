//! `SeaORM` Entity for interface run records

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::database::models::{log_severity::LogSeverity, log_status::LogStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interface_log")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub severity: LogSeverity,
    pub duration: i64,
    pub records_processed: i64,
    pub timestamp: DateTimeUtc,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Case-folded copies of the searchable text, written alongside the originals
    #[serde(skip)]
    pub interface_name_folded: String,
    #[serde(skip)]
    pub integration_key_folded: String,
    #[serde(skip)]
    #[sea_orm(column_type = "Text")]
    pub message_folded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Human-readable run duration, e.g. `"850ms"`, `"12.5s"`, `"3.2m"`.
    pub fn formatted_duration(&self) -> String {
        crate::interface_logs::duration::format_duration(self.duration)
    }
}
