// Record Store Port (Interface)

use crate::domain::{Mileage, NewServiceRecord, RecordId, ServiceRecord, TaskId};
use crate::error::Result;
use async_trait::async_trait;

/// Append-only service log.
///
/// Implementations must make `append` durable before returning, and every
/// read must observe all previously completed appends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Highest mileage among records whose description equals `description` exactly
    async fn find_latest_by_description(&self, description: &str) -> Result<Option<Mileage>>;

    /// Highest mileage among records linked to catalog task `task_id`
    async fn find_latest_by_task(&self, task_id: TaskId) -> Result<Option<Mileage>>;

    /// Store a new record, returning its unique, increasing id
    async fn append(&self, record: &NewServiceRecord) -> Result<RecordId>;

    /// All records in insertion order
    async fn list_all(&self) -> Result<Vec<ServiceRecord>>;
}
