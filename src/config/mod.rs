//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONCIERGE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod store;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::LeadStoreConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Model provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Lead store configuration (Google Sheets)
    #[serde(default)]
    pub store: LeadStoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present (development), then reads environment
    /// variables with the `CONCIERGE` prefix:
    ///
    /// - `CONCIERGE__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `CONCIERGE__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `CONCIERGE__STORE__SPREADSHEET_ID=...` -> `store.spreadsheet_id`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global, so these tests must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CONCIERGE__AI__API_KEY", "test-api-key");
    }

    fn clear_env() {
        env::remove_var("CONCIERGE__AI__API_KEY");
        env::remove_var("CONCIERGE__SERVER__PORT");
        env::remove_var("CONCIERGE__SERVER__ENVIRONMENT");
        env::remove_var("CONCIERGE__STORE__SPREADSHEET_ID");
    }

    #[test]
    fn loads_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load failed");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().expect("load failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn custom_port_and_spreadsheet_are_picked_up() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONCIERGE__SERVER__PORT", "3000");
        env::set_var("CONCIERGE__STORE__SPREADSHEET_ID", "sheet-123");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load failed");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.spreadsheet_id.as_deref(), Some("sheet-123"));
    }

    #[test]
    fn production_environment_is_detected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONCIERGE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.expect("load failed").is_production());
    }
}
