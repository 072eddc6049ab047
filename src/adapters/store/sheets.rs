//! Google Sheets lead store.
//!
//! Appends one row per lead via `values:append` and reads rows back via a
//! `values` GET on the configured range. When credentials never loaded the
//! store stays unconfigured and every operation reports
//! [`StoreError::Unavailable`] - chat traffic keeps flowing, only the lead
//! endpoints fail.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::domain::Lead;
use crate::ports::{LeadRow, LeadStore, StoreError};

use super::sheets_auth::{ServiceAccountKey, TokenProvider};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DEFAULT_RANGE: &str = "Leads!A:H";

/// Configuration for the Sheets adapter.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1-style range covering the lead columns.
    pub range: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl SheetsConfig {
    /// Creates a configuration for the given spreadsheet with defaults.
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: DEFAULT_RANGE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the A1 range.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Sets the base URL (mainly for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Lead store backed by one worksheet.
pub struct SheetsLeadStore {
    inner: Option<SheetsClient>,
    /// Why the store is unconfigured, when it is.
    unavailable_reason: String,
}

struct SheetsClient {
    config: SheetsConfig,
    client: Client,
    tokens: TokenProvider,
}

impl SheetsLeadStore {
    /// Builds a configured store from loaded key material.
    pub fn new(config: SheetsConfig, key: ServiceAccountKey) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        let tokens = TokenProvider::new(key, client.clone());
        Self {
            inner: Some(SheetsClient {
                config,
                client,
                tokens,
            }),
            unavailable_reason: String::new(),
        }
    }

    /// Builds a store that reports `Unavailable` on every call.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            inner: None,
            unavailable_reason: reason.into(),
        }
    }

    fn client(&self) -> Result<&SheetsClient, StoreError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StoreError::unavailable(self.unavailable_reason.clone()))
    }
}

impl SheetsClient {
    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.config.base_url, self.config.spreadsheet_id, self.config.range, suffix
        )
    }
}

#[async_trait]
impl LeadStore for SheetsLeadStore {
    async fn append(&self, lead: &Lead) -> Result<(), StoreError> {
        let sheets = self.client()?;
        let token = sheets.tokens.access_token().await?;

        let body = json!({ "values": [LeadRow::from(lead).into_cells()] });
        let response = sheets
            .client
            .post(sheets.values_url(":append"))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &error_body));
        }

        tracing::info!(lead_id = %lead.id, "lead appended to sheet");
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<LeadRow>, StoreError> {
        let sheets = self.client()?;
        let token = sheets.tokens.access_token().await?;

        let response = sheets
            .client
            .get(sheets.values_url(""))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &error_body));
        }

        let parsed: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        // First row is the header the sheet was seeded with.
        Ok(parsed
            .values
            .unwrap_or_default()
            .into_iter()
            .skip(1)
            .take(limit)
            .map(|cells| LeadRow::from_cells(&cells))
            .collect())
    }
}

fn map_http_error(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::auth(message),
        _ => StoreError::api(status.as_u16(), message),
    }
}

#[derive(Deserialize)]
struct ValueRange {
    values: Option<Vec<Vec<String>>>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
