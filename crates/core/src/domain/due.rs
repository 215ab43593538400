// Due-Status Domain Model (derived, never persisted)

use super::catalog::TaskId;
use super::record::Mileage;
use serde::{Deserialize, Serialize};

/// Whether a flagged task has reached its next-due mileage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueStatus {
    DueNow,
    Upcoming,
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueStatus::DueNow => write!(f, "DUE NOW"),
            DueStatus::Upcoming => write!(f, "UPCOMING"),
        }
    }
}

/// One task flagged by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueEntry {
    pub task_id: TaskId,
    pub description: String,
    /// 0 when the task has never been serviced
    pub last_service_mileage: Mileage,
    pub next_due_mileage: Mileage,
}

impl DueEntry {
    pub fn status(&self, current_mileage: Mileage) -> DueStatus {
        if current_mileage >= self.next_due_mileage {
            DueStatus::DueNow
        } else {
            DueStatus::Upcoming
        }
    }
}

/// Result of one evaluation, entries in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueReport {
    pub current_mileage: Mileage,
    pub entries: Vec<DueEntry>,
}

impl DueReport {
    pub fn new(current_mileage: Mileage, entries: Vec<DueEntry>) -> Self {
        Self {
            current_mileage,
            entries,
        }
    }

    /// Look up an entry by task description
    pub fn get(&self, description: &str) -> Option<&DueEntry> {
        self.entries.iter().find(|e| e.description == description)
    }

    pub fn contains(&self, description: &str) -> bool {
        self.get(description).is_some()
    }

    pub fn status_of(&self, entry: &DueEntry) -> DueStatus {
        entry.status(self.current_mileage)
    }

    pub fn due_now(&self) -> impl Iterator<Item = &DueEntry> {
        self.entries
            .iter()
            .filter(move |e| e.status(self.current_mileage) == DueStatus::DueNow)
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &DueEntry> {
        self.entries
            .iter()
            .filter(move |e| e.status(self.current_mileage) == DueStatus::Upcoming)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
