pub mod health_record;
pub mod requests;

pub use health_record::{HealthRecord, HeartRateStatus};
pub use requests::{FallAlertRequest, HealthDataRequest, ReminderRequest, DEFAULT_REMINDER};
