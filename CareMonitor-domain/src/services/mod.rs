pub mod fall_alert;
pub mod health_data;
pub mod reminder;

// Domain services
// Each service performs one side effect after its request has been validated.

// Re-export service traits, implementations and errors
pub use fall_alert::{FallAlertError, FallAlertService, FallAlertServiceTrait, MailConfigSource};
pub use health_data::{HealthDataService, HealthDataServiceError, HealthDataServiceTrait};
pub use reminder::{ReminderError, ReminderService, ReminderServiceTrait};

/// Local wall-clock time in the format used for records and alerts
pub(crate) fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
