// Record Use Case - validate and append one service event

use crate::domain::{
    Catalog, Mileage, NewServiceRecord, RecordId, ServiceCategory, TaskId, MAX_DESCRIPTION_LEN,
};
use crate::error::{AppError, Result};
use crate::port::{RecordStore, TimeProvider};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Raw record submission, as entered by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Signed so negative input can be rejected instead of wrapping
    pub mileage: i64,
    pub category: ServiceCategory,

    /// Required for scheduled work, rejected for repairs
    #[serde(default)]
    pub task_id: Option<TaskId>,

    /// Required for repairs, ignored for scheduled work
    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl RecordRequest {
    pub fn scheduled(mileage: i64, task_id: TaskId) -> Self {
        Self {
            mileage,
            category: ServiceCategory::Scheduled,
            task_id: Some(task_id),
            description: None,
            date: None,
        }
    }

    pub fn repair(mileage: i64, description: impl Into<String>) -> Self {
        Self {
            mileage,
            category: ServiceCategory::UnscheduledRepair,
            task_id: None,
            description: Some(description.into()),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Validate a request against the catalog; nothing reaches the store on failure
pub fn validate_request(
    req: &RecordRequest,
    catalog: &Catalog,
    today: NaiveDate,
) -> Result<NewServiceRecord> {
    if req.mileage < 0 {
        return Err(AppError::Validation(format!(
            "Mileage cannot be negative: {}",
            req.mileage
        )));
    }
    let mileage = Mileage::try_from(req.mileage).map_err(|_| {
        AppError::Validation(format!("Mileage out of range: {}", req.mileage))
    })?;

    let (task_id, description) = match req.category {
        ServiceCategory::Scheduled => {
            let id = req.task_id.ok_or_else(|| {
                AppError::Validation("Scheduled maintenance requires a catalog task".to_string())
            })?;
            let task = catalog
                .get(id)
                .ok_or_else(|| AppError::NotFound(format!("Catalog task {} not found", id)))?;
            // Canonical text keeps description-matched logs consistent
            (Some(task.id), task.description.clone())
        }
        ServiceCategory::UnscheduledRepair => {
            if req.task_id.is_some() {
                return Err(AppError::Validation(
                    "Unscheduled repairs are not linked to catalog tasks".to_string(),
                ));
            }
            let description = req.description.as_deref().unwrap_or("").trim();
            if description.is_empty() {
                return Err(AppError::Validation(
                    "Repair description cannot be empty".to_string(),
                ));
            }
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(AppError::Validation(format!(
                    "Repair description too long (max {} characters)",
                    MAX_DESCRIPTION_LEN
                )));
            }
            (None, description.to_string())
        }
    };

    Ok(NewServiceRecord {
        mileage,
        date: req.date.unwrap_or(today),
        category: req.category,
        description,
        task_id,
    })
}

/// Execute record use case
///
/// # Arguments
///
/// * `store` - Record store
/// * `catalog` - Catalog used to resolve scheduled tasks
/// * `time_provider` - Source of the default service date
/// * `req` - Record request
pub async fn execute(
    store: &dyn RecordStore,
    catalog: &Catalog,
    time_provider: &dyn TimeProvider,
    req: RecordRequest,
) -> Result<RecordId> {
    let record = validate_request(&req, catalog, time_provider.today())?;

    let record_id = store.append(&record).await?;

    info!(
        record_id = record_id,
        mileage = record.mileage,
        category = %record.category,
        "Service record appended"
    );

    Ok(record_id)
}
