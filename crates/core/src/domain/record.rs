// Service Record Domain Model

use super::catalog::TaskId;
use super::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Odometer reading in distance units (km)
pub type Mileage = u32;

/// Store-assigned record identifier (unique, increasing)
pub type RecordId = i64;

/// Column width of `description` in the record store
pub const MAX_DESCRIPTION_LEN: usize = 80;

/// Kind of service performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Scheduled,
    UnscheduledRepair,
}

impl ServiceCategory {
    /// Canonical label persisted by the record store
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Scheduled => "scheduled maintenance",
            ServiceCategory::UnscheduledRepair => "unscheduled repair",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled maintenance" | "scheduled" => Ok(ServiceCategory::Scheduled),
            "unscheduled repair" | "repair" => Ok(ServiceCategory::UnscheduledRepair),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

/// Validated record ready to be appended (no id yet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRecord {
    pub mileage: Mileage,
    pub date: NaiveDate,
    pub category: ServiceCategory,
    pub description: String,
    /// Catalog task this record services (scheduled work only)
    pub task_id: Option<TaskId>,
}

/// Stored, immutable service log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: RecordId,
    pub mileage: Mileage,
    /// ISO-8601 date as stored; kept raw so a malformed value never hides the row
    pub date: String,
    pub category: ServiceCategory,
    pub description: String,
    pub task_id: Option<TaskId>,
}

impl ServiceRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// `dd.mm.yyyy`, or the stored text verbatim when it is not a valid date
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(date) => date.format("%d.%m.%Y").to_string(),
            None => self.date.clone(),
        }
    }
}
