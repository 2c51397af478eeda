use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::{config::Config, environment::Environment};

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub db: DatabaseConnection,
    pub started_at: Instant,
}

impl App {
    #[must_use]
    pub fn new(config: Config, environment: Environment, db: DatabaseConnection) -> Self {
        Self {
            config,
            environment,
            db,
            started_at: Instant::now(),
        }
    }
}
