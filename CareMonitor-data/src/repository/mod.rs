// Repository module structure
pub mod errors;
mod health_record;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use health_record::{HealthRecordRepository, HealthRecordRepositoryTrait};
