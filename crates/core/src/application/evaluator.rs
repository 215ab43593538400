// Due-Service Evaluator
// Decides which catalog tasks are due or approaching due at a given mileage

use crate::domain::{Catalog, DueEntry, DueReport, Mileage, TaskDefinition};
use crate::error::{AppError, Result};
use crate::port::RecordStore;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// How a catalog task is matched against stored records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchKey {
    /// Records carry the catalog task id (repairs never match)
    #[default]
    TaskId,
    /// Exact description equality, for logs imported without task ids
    Description,
}

impl FromStr for MatchKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "task-id" | "task_id" | "id" => Ok(MatchKey::TaskId),
            "description" => Ok(MatchKey::Description),
            other => Err(AppError::Config(format!(
                "unknown match key '{}' (expected task-id or description)",
                other
            ))),
        }
    }
}

/// Due-service evaluator
///
/// Each catalog task is evaluated independently:
/// - `last` = highest recorded mileage for the task, or 0 if never serviced
/// - `next_due = last + interval`
/// - flagged when `current >= next_due - interval / 10`
pub struct DueServiceEvaluator {
    catalog: Arc<Catalog>,
    match_key: MatchKey,
}

impl DueServiceEvaluator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            match_key: MatchKey::default(),
        }
    }

    pub fn with_match_key(mut self, match_key: MatchKey) -> Self {
        self.match_key = match_key;
        self
    }

    /// Evaluate every catalog task at `current_mileage`.
    ///
    /// Any store error aborts the whole evaluation; a partial report is
    /// never returned.
    pub async fn evaluate(
        &self,
        current_mileage: Mileage,
        store: &dyn RecordStore,
    ) -> Result<DueReport> {
        let mut entries = Vec::new();

        for task in self.catalog.list() {
            let last = self.last_service(task, store).await?;

            if let Some(entry) = check_task(task, last, current_mileage) {
                debug!(
                    task_id = task.id,
                    last_service = entry.last_service_mileage,
                    next_due = entry.next_due_mileage,
                    "Task flagged"
                );
                entries.push(entry);
            }
        }

        info!(
            current_mileage = current_mileage,
            tasks = self.catalog.len(),
            flagged = entries.len(),
            "Due-service evaluation completed"
        );

        Ok(DueReport::new(current_mileage, entries))
    }

    async fn last_service(&self, task: &TaskDefinition, store: &dyn RecordStore) -> Result<Mileage> {
        let latest = match self.match_key {
            MatchKey::TaskId => store.find_latest_by_task(task.id).await?,
            MatchKey::Description => store.find_latest_by_description(&task.description).await?,
        };
        Ok(latest.unwrap_or(0))
    }
}

/// Pure decision for one task given its last service mileage
pub fn check_task(
    task: &TaskDefinition,
    last_service: Mileage,
    current_mileage: Mileage,
) -> Option<DueEntry> {
    let next_due = last_service.saturating_add(task.interval);
    // tolerance < interval <= next_due, so no underflow
    let threshold = next_due - task.tolerance();

    (current_mileage >= threshold).then(|| DueEntry {
        task_id: task.id,
        description: task.description.clone(),
        last_service_mileage: last_service,
        next_due_mileage: next_due,
    })
}
