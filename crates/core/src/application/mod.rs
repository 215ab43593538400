// Application Layer - Use Cases and Business Logic

pub mod evaluator;
pub mod service_log;

// Re-exports
pub use evaluator::{DueServiceEvaluator, MatchKey};
pub use service_log::{RecordRequest, ServiceLog};
