use serde::{Deserialize, Serialize};

/// Storage model for a heart-rate / blood-pressure observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Identifier assigned by the store
    pub id: i64,

    /// Local time the record was written, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,

    /// Heart rate in beats per minute
    pub heart_rate: i64,

    /// Blood pressure as reported, e.g. "120/80"
    pub blood_pressure: String,

    /// Derived classification label
    pub status: String,
}

/// Row to append; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHealthRecord {
    pub timestamp: String,
    pub heart_rate: i64,
    pub blood_pressure: String,
    pub status: String,
}

impl NewHealthRecord {
    /// Attach the store-assigned id
    pub fn with_id(self, id: i64) -> HealthRecord {
        HealthRecord {
            id,
            timestamp: self.timestamp,
            heart_rate: self.heart_rate,
            blood_pressure: self.blood_pressure,
            status: self.status,
        }
    }
}
