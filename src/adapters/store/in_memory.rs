//! In-memory lead store for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Lead;
use crate::ports::{LeadRow, LeadStore, StoreError};

/// Vector-backed store mirroring the sheet's row image.
///
/// Optionally fails every call with a configured error, for exercising the
/// boundary's store-failure paths.
#[derive(Default)]
pub struct InMemoryLeadStore {
    rows: Mutex<Vec<LeadRow>>,
    failure: Option<StoreError>,
}

impl InMemoryLeadStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails every call with the given error.
    pub fn failing_with(failure: StoreError) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    /// Number of rows currently held.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn append(&self, lead: &Lead) -> Result<(), StoreError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.rows.lock().unwrap().push(LeadRow::from(lead));
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<LeadRow>, StoreError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadDraft;

    fn lead(company: &str) -> Lead {
        Lead::try_new(LeadDraft {
            company: company.to_string(),
            name: "Juan Perez".to_string(),
            email: "juan@test.com".to_string(),
            phone: None,
            message: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn appended_leads_list_in_insertion_order() {
        let store = InMemoryLeadStore::new();
        store.append(&lead("First Co")).await.unwrap();
        store.append(&lead("Second Co")).await.unwrap();

        let rows = store.list(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].company, "First Co");
        assert_eq!(rows[1].company, "Second Co");
    }

    #[tokio::test]
    async fn list_honors_limit() {
        let store = InMemoryLeadStore::new();
        for i in 0..5 {
            store.append(&lead(&format!("Company {}", i))).await.unwrap();
        }
        assert_eq!(store.list(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn configured_failure_surfaces_on_every_call() {
        let store = InMemoryLeadStore::failing_with(StoreError::network("down"));
        assert!(store.append(&lead("Acme")).await.is_err());
        assert!(store.list(1).await.is_err());
        assert!(store.is_empty());
    }
}
