// Maintenance Catalog - static table of recurring service procedures

use super::error::{DomainError, Result};
use super::record::MAX_DESCRIPTION_LEN;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Stable catalog identifier of a task
pub type TaskId = u32;

/// Recurrence interval in distance units (km)
pub type Interval = u32;

/// One recurring maintenance procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: TaskId,
    pub description: String,
    pub interval: Interval,
}

impl TaskDefinition {
    pub fn new(id: TaskId, description: impl Into<String>, interval: Interval) -> Self {
        Self {
            id,
            description: description.into(),
            interval,
        }
    }

    /// Early-warning band before the next-due mileage: 10% of the interval,
    /// truncated.
    pub fn tolerance(&self) -> Interval {
        self.interval / 10
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| DomainError::InvalidTask {
            id: self.id,
            reason: reason.to_string(),
        };

        if self.description.trim().is_empty() {
            return Err(invalid("description is empty"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(invalid("description is too long"));
        }
        if self.interval == 0 {
            return Err(invalid("interval must be positive"));
        }
        Ok(())
    }
}

/// Immutable, ordered set of task definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tasks: Vec<TaskDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting invalid entries and duplicate ids/descriptions
    pub fn new(tasks: Vec<TaskDefinition>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut descriptions = HashSet::new();

        for task in &tasks {
            task.validate()?;

            if !ids.insert(task.id) {
                return Err(DomainError::DuplicateTask {
                    field: "id",
                    value: task.id.to_string(),
                });
            }
            if !descriptions.insert(task.description.as_str()) {
                return Err(DomainError::DuplicateTask {
                    field: "description",
                    value: task.description.clone(),
                });
            }
        }

        Ok(Self { tasks })
    }

    /// Built-in schedule for a typical passenger car
    pub fn standard() -> Self {
        let tasks = [
            (0, "Engine oil change", 15_000),
            (1, "Oil filter replacement", 15_000),
            (2, "Brake disc replacement", 100_000),
            (3, "Fuel filter replacement", 80_000),
            (4, "Engine air filter replacement", 40_000),
            (5, "Cabin air filter replacement", 20_000),
            (6, "Spark plug replacement", 100_000),
            (7, "Brake fluid replacement", 40_000),
            (8, "Transfer case oil change", 100_000),
            (9, "Rear differential oil change", 100_000),
            (10, "Engine coolant replacement", 80_000),
            (11, "Automatic transmission fluid change", 100_000),
        ]
        .into_iter()
        .map(|(id, description, interval)| TaskDefinition::new(id, description, interval))
        .collect();

        Self { tasks }
    }

    /// Parse a catalog from a JSON array of `{id, description, interval}`
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let tasks: Vec<TaskDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(tasks)?)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// All tasks in definition order
    pub fn list(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskDefinition> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_by_description(&self, description: &str) -> Option<&TaskDefinition> {
        self.tasks.iter().find(|t| t.description == description)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_catalog_is_valid() {
        let standard = Catalog::standard();
        assert_eq!(standard.len(), 12);

        // Re-validate through the checked constructor
        let rebuilt = Catalog::new(standard.list().to_vec()).unwrap();
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn test_tolerance_truncates() {
        assert_eq!(TaskDefinition::new(0, "a", 15_000).tolerance(), 1_500);
        assert_eq!(TaskDefinition::new(0, "a", 15_005).tolerance(), 1_500);
        assert_eq!(TaskDefinition::new(0, "a", 9).tolerance(), 0);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = Catalog::new(vec![TaskDefinition::new(3, "Wipers", 0)]);
        assert!(matches!(result, Err(DomainError::InvalidTask { id: 3, .. })));
    }

    #[test]
    fn test_rejects_blank_description() {
        let result = Catalog::new(vec![TaskDefinition::new(1, "   ", 1000)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let dup_id = Catalog::new(vec![
            TaskDefinition::new(1, "A", 1000),
            TaskDefinition::new(1, "B", 1000),
        ]);
        assert!(dup_id.unwrap_err().to_string().contains("id"));

        let dup_desc = Catalog::new(vec![
            TaskDefinition::new(1, "A", 1000),
            TaskDefinition::new(2, "A", 2000),
        ]);
        assert!(dup_desc.unwrap_err().to_string().contains("description"));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get(7).unwrap().description, "Brake fluid replacement");
        assert_eq!(catalog.find_by_description("Engine oil change").unwrap().id, 0);
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "description": "Timing belt", "interval": 120000}},
                {{"id": 2, "description": "Tire rotation", "interval": 10000}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.list()[0].description, "Timing belt");
        assert_eq!(catalog.list()[1].tolerance(), 1_000);
    }

    #[test]
    fn test_load_invalid_json() {
        let result = Catalog::from_json_str(r#"{"id": 1}"#);
        assert!(matches!(result, Err(crate::AppError::Serialization(_))));
    }
}
