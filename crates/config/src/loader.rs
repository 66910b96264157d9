//! Configuration loader implementation

use crate::schema::Config;
use crate::validation::ConfigValidator;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::Path;
use types::ConfigError;

/// Prefix for environment variable overrides, e.g. `ACCOUNT_SERVICE_SERVER__PORT`
pub const ENV_PREFIX: &str = "ACCOUNT_SERVICE_";

/// Configuration loader that handles defaults, YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment variables
    ///
    /// The file is optional: without it the service runs on built-in defaults.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_path.as_ref()))
            // Nested keys use a double underscore: ACCOUNT_SERVICE_SERVER__PORT
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration")?;

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Config> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml_content))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration from string")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Fail on the first validation error; warnings are left to the caller
    fn validate(config: &Config) -> Result<()> {
        let report = ConfigValidator::validate(config);

        if let Some(issue) = report.errors.into_iter().next() {
            return Err(ConfigError::ValidationError {
                field: issue.field,
                message: issue.message,
            }
            .into());
        }

        Ok(())
    }

    /// Get default configuration
    pub fn default() -> Config {
        Config::default()
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let yaml_content = serde_yaml::to_string(&config)
            .context("Failed to serialize default configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}
