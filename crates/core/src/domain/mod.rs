// Domain Layer - Pure business logic and entities

pub mod catalog;
pub mod due;
pub mod error;
pub mod record;

// Re-exports
pub use catalog::{Catalog, Interval, TaskDefinition, TaskId};
pub use due::{DueEntry, DueReport, DueStatus};
pub use error::DomainError;
pub use record::{
    Mileage, NewServiceRecord, RecordId, ServiceCategory, ServiceRecord, MAX_DESCRIPTION_LEN,
};
