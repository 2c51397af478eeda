use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::config::DatabaseConfig;

pub mod migrations;
pub mod models;

use self::migrations::Migrator;

/// Connect to the database and run pending migrations in the background.
///
/// The returned receiver resolves once migrations have finished, so the caller can
/// keep answering liveness probes while the schema is being brought up to date.
pub async fn setup_database(
    db_config: &DatabaseConfig,
) -> Result<(DatabaseConnection, oneshot::Receiver<Result<(), DbErr>>), DbErr> {
    let connection = setup_database_connection(db_config).await?;
    let migrations_connection = connection.clone();

    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        let migration_result = Migrator::up(&migrations_connection, None).await;
        let _ = sender.send(migration_result);
    });

    Ok((connection, receiver))
}

pub async fn setup_database_connection(
    db_config: &DatabaseConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(db_config.url.clone());

    options.sqlx_logging(false); // Disable SQL query logging to reduce noise
    options.max_connections(db_config.pool_size);

    // An in-memory SQLite database lives exactly as long as its connection
    if db_config.is_in_memory() {
        options.max_connections(1).min_connections(1);
    }

    debug!("Connecting to database at: {}", &db_config.url);

    sea_orm::Database::connect(options).await
}
