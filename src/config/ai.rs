//! Model provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Model provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Cap on tokens generated per reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Path to a persona file overriding the built-in default
    pub persona_path: Option<String>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some_and(|key| !key.is_empty())
    }

    /// Validate model provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("CONCIERGE__AI__API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        if self.max_output_tokens == 0 {
            return Err(ValidationError::InvalidMaxOutputTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_output_tokens: default_max_output_tokens(),
            persona_path: None,
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_output_tokens() -> u32 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_flash_model() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_output_tokens, 1024);
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_api_key_fails_validation() {
        let config = AiConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn configured_api_key_passes_validation() {
        let config = AiConfig {
            api_key: Some(Secret::new("key-123".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.api_key(), Some("key-123"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = AiConfig {
            api_key: Some(Secret::new("key-123".to_string())),
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
