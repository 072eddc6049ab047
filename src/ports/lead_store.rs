//! Lead-store port - append-only persistence for contact-form submissions.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Lead;

/// Port for the external row store holding lead submissions.
///
/// The store is append-only: rows are written once and read back
/// top-to-bottom in insertion order. Appends are serialized by the store
/// itself, so concurrent submissions need no coordination here.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Appends one lead as a new row. Only ever called with validated data.
    async fn append(&self, lead: &Lead) -> Result<(), StoreError>;

    /// Reads back up to `limit` rows in insertion order, skipping the
    /// header row.
    async fn list(&self, limit: usize) -> Result<Vec<LeadRow>, StoreError>;
}

/// Failures surfaced by the row store.
///
/// `Unavailable` means the store was never initialized (missing or broken
/// credentials): a configuration fault where retrying cannot help. Every
/// other variant is a runtime fault a caller could reasonably retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store not configured: {0}")]
    Unavailable(String),

    #[error("store authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("store returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse store response: {0}")]
    Parse(String),
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable(reason.into())
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        StoreError::Auth(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        StoreError::Network(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        StoreError::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        StoreError::Parse(message.into())
    }

    /// True for the configuration fault that no retry can fix.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Row image of one stored lead, exactly as the sheet holds it.
///
/// Column order: id, company, name, email, phone, message, created_at,
/// status. Reads are defensive: a row shorter than the full column set is
/// padded with absent values instead of failing the whole read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRow {
    pub id: String,
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
    pub status: String,
}

impl LeadRow {
    /// Number of columns a fully populated row occupies.
    pub const COLUMNS: usize = 8;

    /// Builds a row from raw cells, padding missing columns with absence.
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        let optional = |index: usize| {
            cells
                .get(index)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let status = match cell(7) {
            value if value.is_empty() => "new".to_string(),
            value => value,
        };

        Self {
            id: cell(0),
            company: cell(1),
            name: cell(2),
            email: cell(3),
            phone: optional(4),
            message: optional(5),
            created_at: cell(6),
            status,
        }
    }

    /// Flattens the row back into cells, absent values as empty strings.
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.id,
            self.company,
            self.name,
            self.email,
            self.phone.unwrap_or_default(),
            self.message.unwrap_or_default(),
            self.created_at,
            self.status,
        ]
    }
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            company: lead.company.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            message: lead.message.clone(),
            created_at: lead.created_at.to_rfc3339(),
            status: lead.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lead, LeadDraft};

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn lead_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn LeadStore) {}
    }

    #[test]
    fn full_row_maps_every_column() {
        let row = LeadRow::from_cells(&cells(&[
            "id-1",
            "Acme",
            "Juan",
            "juan@test.com",
            "3001234567",
            "more info",
            "2026-08-01T10:00:00+00:00",
            "contacted",
        ]));
        assert_eq!(row.id, "id-1");
        assert_eq!(row.phone.as_deref(), Some("3001234567"));
        assert_eq!(row.message.as_deref(), Some("more info"));
        assert_eq!(row.status, "contacted");
    }

    #[test]
    fn short_row_is_padded_with_absence() {
        let row = LeadRow::from_cells(&cells(&["id-1", "Acme"]));
        assert_eq!(row.id, "id-1");
        assert_eq!(row.company, "Acme");
        assert_eq!(row.name, "");
        assert_eq!(row.email, "");
        assert!(row.phone.is_none());
        assert!(row.message.is_none());
        assert_eq!(row.created_at, "");
        assert_eq!(row.status, "new");
    }

    #[test]
    fn blank_optional_cells_become_absence() {
        let row = LeadRow::from_cells(&cells(&[
            "id-1", "Acme", "Juan", "j@t.com", "  ", "", "ts", "",
        ]));
        assert!(row.phone.is_none());
        assert!(row.message.is_none());
        assert_eq!(row.status, "new");
    }

    #[test]
    fn lead_round_trips_through_cells() {
        let lead = Lead::try_new(LeadDraft {
            company: "Acme Widgets".to_string(),
            name: "Juan Perez".to_string(),
            email: "juan@test.com".to_string(),
            phone: Some("3001234567".to_string()),
            message: Some("more info please".to_string()),
        })
        .unwrap();

        let row = LeadRow::from(&lead);
        let cells = row.clone().into_cells();
        assert_eq!(cells.len(), LeadRow::COLUMNS);
        assert_eq!(LeadRow::from_cells(&cells), row);
    }
}
