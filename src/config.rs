use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config_rs::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct Config {
    pub tracing: TracingConfig,
    #[validate(nested)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Checks the loaded configuration once, before anything is started with it.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

fn validate_page_sizes(config: &Config) -> Result<(), ValidationError> {
    let pagination = &config.pagination;

    if pagination.default_page_size == 0 {
        return Err(ValidationError::new("default_page_size")
            .with_message("pagination.default_page_size must be at least 1".into()));
    }

    if pagination.max_page_size < pagination.default_page_size {
        return Err(ValidationError::new("max_page_size").with_message(
            "pagination.max_page_size must not be smaller than default_page_size".into(),
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TracingConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "database.url must not be empty"))]
    pub url: String,
    #[validate(range(min = 1, message = "database.pool_size must be at least 1"))]
    pub pool_size: u32,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request omits `limit` or sends an invalid one (default: 50)
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for a requested `limit` (default: 500)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

const fn default_page_size() -> u64 {
    50
}

const fn default_max_page_size() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            tracing: TracingConfig {
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                pool_size: 1,
            },
            server: ServerConfig {
                port: 5000,
                cors_origins: vec![],
            },
            pagination: PaginationConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validated().is_ok());
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut config = config();
        config.database.url = String::new();

        assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_pool_size() {
        let mut config = config();
        config.database.pool_size = 0;

        assert!(config.validated().is_err());
    }

    #[test]
    fn test_rejects_max_page_size_below_default() {
        let mut config = config();
        config.pagination.max_page_size = 10;
        config.pagination.default_page_size = 20;

        assert!(config.validated().is_err());
    }

    #[test]
    fn test_detects_in_memory_sqlite() {
        assert!(config().database.is_in_memory());

        let file = DatabaseConfig {
            url: "sqlite://data/monitor.db?mode=rwc".to_string(),
            pool_size: 5,
        };
        assert!(!file.is_in_memory());
    }
}
