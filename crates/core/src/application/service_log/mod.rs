// Service Log - use cases behind the CLI

pub mod record;


pub use record::RecordRequest;

use super::evaluator::{DueServiceEvaluator, MatchKey};
use crate::domain::{Catalog, DueReport, Mileage, RecordId, ServiceRecord};
use crate::error::Result;
use crate::port::{RecordStore, TimeProvider};
use std::sync::Arc;

/// Service Log (composition of catalog, evaluator and store)
pub struct ServiceLog {
    store: Arc<dyn RecordStore>,
    catalog: Arc<Catalog>,
    evaluator: DueServiceEvaluator,
    time_provider: Arc<dyn TimeProvider>,
}

impl ServiceLog {
    pub fn new(
        store: Arc<dyn RecordStore>,
        catalog: Arc<Catalog>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            evaluator: DueServiceEvaluator::new(catalog.clone()),
            catalog,
            time_provider,
        }
    }

    pub fn with_match_key(mut self, match_key: MatchKey) -> Self {
        self.evaluator = self.evaluator.with_match_key(match_key);
        self
    }

    /// Tasks due or approaching due at `current_mileage`
    pub async fn check(&self, current_mileage: Mileage) -> Result<DueReport> {
        self.evaluator
            .evaluate(current_mileage, self.store.as_ref())
            .await
    }

    /// Validate and append a service record
    pub async fn record(&self, req: RecordRequest) -> Result<RecordId> {
        record::execute(
            self.store.as_ref(),
            &self.catalog,
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Full log in insertion order
    pub async fn history(&self) -> Result<Vec<ServiceRecord>> {
        self.store.list_all().await
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
