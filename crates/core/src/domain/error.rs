// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid task definition {id}: {reason}")]
    InvalidTask { id: u32, reason: String },

    #[error("Duplicate task {field} in catalog: {value}")]
    DuplicateTask { field: &'static str, value: String },

    #[error("Unknown service category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
