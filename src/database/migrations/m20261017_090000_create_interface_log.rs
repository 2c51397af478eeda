use sea_orm_migration::{
    prelude::*,
    schema::{big_integer, json_null, string, string_len, text, timestamp_with_time_zone, uuid},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Secondary indexes: single-column filters plus the compound (filter, timestamp)
/// pairs used by filtered listings sorted by recency.
const INDEXES: &[(&str, &[InterfaceLog])] = &[
    ("idx-interface_log-interface_name", &[InterfaceLog::InterfaceName]),
    ("idx-interface_log-integration_key", &[InterfaceLog::IntegrationKey]),
    ("idx-interface_log-status", &[InterfaceLog::Status]),
    ("idx-interface_log-severity", &[InterfaceLog::Severity]),
    ("idx-interface_log-timestamp", &[InterfaceLog::Timestamp]),
    (
        "idx-interface_log-interface_name-timestamp",
        &[InterfaceLog::InterfaceName, InterfaceLog::Timestamp],
    ),
    (
        "idx-interface_log-integration_key-timestamp",
        &[InterfaceLog::IntegrationKey, InterfaceLog::Timestamp],
    ),
    (
        "idx-interface_log-status-timestamp",
        &[InterfaceLog::Status, InterfaceLog::Timestamp],
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InterfaceLog::Table)
                    .if_not_exists()
                    .col(uuid(InterfaceLog::Id).primary_key())
                    .col(string(InterfaceLog::InterfaceName))
                    .col(string(InterfaceLog::IntegrationKey))
                    .col(string_len(InterfaceLog::Status, 16))
                    .col(text(InterfaceLog::Message))
                    .col(string_len(InterfaceLog::Severity, 16).default("medium"))
                    .col(big_integer(InterfaceLog::Duration).default(0))
                    .col(big_integer(InterfaceLog::RecordsProcessed).default(0))
                    .col(timestamp_with_time_zone(InterfaceLog::Timestamp))
                    .col(json_null(InterfaceLog::Metadata))
                    .col(timestamp_with_time_zone(InterfaceLog::CreatedAt))
                    .col(timestamp_with_time_zone(InterfaceLog::UpdatedAt))
                    .col(string(InterfaceLog::InterfaceNameFolded))
                    .col(string(InterfaceLog::IntegrationKeyFolded))
                    .col(text(InterfaceLog::MessageFolded))
                    .to_owned(),
            )
            .await?;

        for (name, columns) in INDEXES {
            let mut index = Index::create();
            index.name(*name).table(InterfaceLog::Table).if_not_exists();
            for column in *columns {
                index.col(*column);
            }
            manager.create_index(index.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InterfaceLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum InterfaceLog {
    Table,
    Id,
    InterfaceName,
    IntegrationKey,
    Status,
    Message,
    Severity,
    Duration,
    RecordsProcessed,
    Timestamp,
    Metadata,
    CreatedAt,
    UpdatedAt,
    InterfaceNameFolded,
    IntegrationKeyFolded,
    MessageFolded,
}
