//! Configuration loading
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults of [`AppConfig`]
//! 2. Optional `config/<environment>.toml`
//! 3. `PORTAL__<SECTION>__<KEY>` environment variables (e.g. `PORTAL__SERVER__PORT`)

use config::{Config, ConfigError, Environment as EnvSource, File};
use gp_shared::{AppConfig, Environment};

/// Prefix of the environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "PORTAL";

/// Load the application configuration for the environment named by `PORTAL_ENVIRONMENT`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_for(Environment::from_env())
}

/// Load the application configuration for an explicit environment
pub fn load_config_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .set_default("environment", environment.to_string())?
        .add_source(File::with_name(&environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    for warning in app_config.production_warnings() {
        log::warn!("Configuration: {}", warning);
    }
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_shared::StorageBackend;

    #[test]
    fn test_defaults_without_sources() {
        let config = load_config_for(Environment::Staging).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.tokens.strict_expiry);
    }
}
