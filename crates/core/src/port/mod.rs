// Port Layer - Interfaces for external dependencies

pub mod record_store;
pub mod time_provider; // For deterministic record dates

// Re-exports
pub use record_store::RecordStore;
pub use time_provider::TimeProvider;
