use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use care_monitor_domain::entities::{HealthRecord, HeartRateStatus};

/// Result of a stored health reading
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDataResponse {
    /// Always "Health data processed"
    #[schema(example = "Health data processed")]
    pub status: String,

    /// The record as stored
    pub data: HealthRecord,

    /// Heart-rate classification
    pub analysis: HeartRateStatus,
}

impl HealthDataResponse {
    pub fn processed(record: HealthRecord) -> Self {
        let analysis = record.status;
        Self {
            status: "Health data processed".to_string(),
            data: record,
            analysis,
        }
    }
}

/// Confirmation that a fall alert was delivered
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FallAlertResponse {
    #[schema(example = "Fall alert sent")]
    pub status: String,

    #[schema(example = "Caregiver has been notified via email!")]
    pub message: String,
}

impl FallAlertResponse {
    pub fn sent() -> Self {
        Self {
            status: "Fall alert sent".to_string(),
            message: "Caregiver has been notified via email!".to_string(),
        }
    }
}

/// Confirmation that a reminder was spoken
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderResponse {
    #[schema(example = "Reminder sent")]
    pub status: String,

    /// The text that was spoken
    pub message: String,
}

impl ReminderResponse {
    pub fn sent(message: String) -> Self {
        Self {
            status: "Reminder sent".to_string(),
            message,
        }
    }
}
