use std::{env, process, str::FromStr as _};

use clap::Parser as _;
use config_rs::Config as ConfigRs;
use tracing::{debug, trace};

use crate::{
    cli::{Cli, Commands},
    commands::{migrate, seed, serve, version},
    config::{Config, ConfigError},
    environment::Environment,
    setup_tracing::setup_tracing_for_command,
};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

pub async fn boot() {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        version::print_version_info();
        return;
    }

    let environment = set_environment();

    let app_config = match read_config(&environment) {
        Ok(app_config) => app_config,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(1);
        }
    };

    setup_tracing_for_command(&cli.command, &app_config.tracing.log_level, environment);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", app_config);

    handle_command(environment, app_config, cli).await;
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

/// Loads `config/{environment}.toml`, then applies `APP_` environment overrides
/// such as `APP_DATABASE__URL` or `APP_SERVER__CORS_ORIGINS=a,b`.
pub fn read_config(environment: &Environment) -> Result<Config, ConfigError> {
    let config_file_name = format!("config/{environment}");

    trace!("Reading configuration from: {}", config_file_name);

    let config: Config = ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name))
        .add_source(
            config_rs::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        )
        .build()?
        .try_deserialize()?;

    config.validated()
}

pub async fn handle_command(environment: Environment, config: Config, cli: Cli) {
    match cli.command {
        Some(Commands::Migrate { action }) => {
            migrate::handle_migrate_command(&config, action).await;
        }
        Some(Commands::Seed { count, days, clear }) => {
            seed::handle_seed_command(&config, count, days, clear).await;
        }
        Some(Commands::Version) => {
            version::print_version_info();
        }
        Some(Commands::Serve) | None => {
            serve::handle_serve_command(environment, config).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_test_configuration() {
        let config = read_config(&Environment::Test).unwrap();

        assert!(config.database.is_in_memory());
        assert!(config.pagination.max_page_size >= config.pagination.default_page_size);
    }
}
