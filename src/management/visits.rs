use chrono::Utc;
use std::sync::Arc;

use super::store::{DOCUMENT_VISITS, JsonStore, StoreError};
use crate::types::Visits;

#[derive(Debug, Clone)]
pub struct VisitCounter {
    store: Arc<JsonStore>,
}

impl VisitCounter {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Bumps the counter and returns the new total.
    pub async fn track(&self) -> Result<u64, StoreError> {
        self.store
            .update_document(DOCUMENT_VISITS, |visits: &mut Visits| {
                visits.count += 1;
                visits.last_visit = Some(Utc::now());
                visits.count
            })
            .await
    }

    pub async fn current(&self) -> Result<Visits, StoreError> {
        self.store.load_document(DOCUMENT_VISITS).await
    }
}
