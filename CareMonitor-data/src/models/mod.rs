pub mod health_record;

pub use health_record::{HealthRecord, NewHealthRecord};
