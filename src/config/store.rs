//! Lead store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Lead store configuration
///
/// The store is optional: without a spreadsheet id the service starts with
/// lead persistence disabled and only the lead endpoints fail. Credentials
/// come from the base64 value when set, from the key file otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadStoreConfig {
    /// Spreadsheet identifier holding the lead rows
    pub spreadsheet_id: Option<String>,

    /// Base64-encoded service-account key (takes precedence)
    pub credentials_base64: Option<String>,

    /// Path to a service-account key file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,

    /// A1 range of the lead columns
    #[serde(default = "default_range")]
    pub range: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LeadStoreConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a spreadsheet is configured at all
    pub fn has_spreadsheet(&self) -> bool {
        self.spreadsheet_id
            .as_ref()
            .is_some_and(|id| !id.is_empty())
    }

    /// Validate lead store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.range.trim().is_empty() {
            return Err(ValidationError::EmptyStoreRange);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        Ok(())
    }
}

impl Default for LeadStoreConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            credentials_base64: None,
            credentials_path: default_credentials_path(),
            range: default_range(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_credentials_path() -> String {
    "credentials.json".to_string()
}

fn default_range() -> String {
    "Leads!A:H".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_store_unconfigured() {
        let config = LeadStoreConfig::default();
        assert!(!config.has_spreadsheet());
        assert_eq!(config.credentials_path, "credentials.json");
        assert_eq!(config.range, "Leads!A:H");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_spreadsheet_id_counts_as_unconfigured() {
        let config = LeadStoreConfig {
            spreadsheet_id: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_spreadsheet());
    }

    #[test]
    fn blank_range_fails_validation() {
        let config = LeadStoreConfig {
            range: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
