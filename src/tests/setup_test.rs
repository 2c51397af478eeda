use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::debug;

use crate::{
    app::App,
    boot::read_config,
    config::Config,
    database::{
        migrations::Migrator,
        models::{interface_log::Model, log_severity::LogSeverity, log_status::LogStatus},
        setup_database_connection,
    },
    environment::Environment,
    interface_logs::{self, payload::NewInterfaceLog},
    router::router,
};

static TRACING_INITIALIZED: std::sync::Once = std::sync::Once::new();

/// Initialize tracing for tests
fn init_tracing() {
    TRACING_INITIALIZED.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let _ = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Creates a test server backed by a fresh, fully migrated in-memory database.
///
/// Every call gets its own database, so tests never see each other's records and
/// can run in parallel.
///
/// # Panics
///
/// Panics if the test configuration cannot be read or the database cannot be set up.
pub async fn setup_test() -> TestUtils {
    init_tracing();

    debug!("Setting up test");

    let environment = Environment::Test;
    let config = read_config(&environment).expect("Failed to read test configuration");

    let db = setup_database_connection(&config.database)
        .await
        .expect("Failed to connect to the test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app = App::new(config.clone(), environment, db.clone());
    let server = TestServer::new(router(app)).expect("Failed to create test server");

    TestUtils { server, db, config }
}

/// A test server plus direct access to the database it serves.
pub struct TestUtils {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub config: Config,
}

impl TestUtils {
    pub fn server(&self) -> &TestServer {
        &self.server
    }

    /// Writes records straight to the store, bypassing the HTTP layer.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails.
    pub async fn insert_logs(&self, logs: Vec<NewInterfaceLog>) -> Vec<Model> {
        interface_logs::insert_many(&self.db, logs)
            .await
            .expect("Failed to insert test logs")
    }
}

/// A valid record for `interface_name` with the given status and timestamp.
pub fn new_log(
    interface_name: &str,
    status: LogStatus,
    timestamp: DateTime<Utc>,
) -> NewInterfaceLog {
    NewInterfaceLog {
        interface_name: interface_name.to_string(),
        integration_key: format!("{}-KEY", interface_name.to_uppercase().replace(' ', "-")),
        status,
        message: format!("{interface_name} finished with status {status}"),
        severity: LogSeverity::Medium,
        duration: 1_500,
        records_processed: 25,
        timestamp: Some(timestamp),
        metadata: None,
    }
}
