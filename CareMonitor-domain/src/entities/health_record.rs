use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use care_monitor_data::models::HealthRecord as StoredHealthRecord;

/// Upper bound of the low heart-rate band (exclusive)
pub const BRADYCARDIA_BELOW: i64 = 60;

/// Lower bound of the high heart-rate band (exclusive)
pub const TACHYCARDIA_ABOVE: i64 = 100;

/// Heart-rate classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum HeartRateStatus {
    /// 60 to 100 bpm inclusive
    #[serde(rename = "Normal")]
    Normal,

    /// Above 100 bpm
    #[serde(rename = "High (Tachycardia)")]
    Tachycardia,

    /// Below 60 bpm
    #[serde(rename = "Low (Bradycardia)")]
    Bradycardia,
}

impl HeartRateStatus {
    /// Classify a heart rate in beats per minute
    pub fn classify(heart_rate: i64) -> Self {
        if heart_rate > TACHYCARDIA_ABOVE {
            HeartRateStatus::Tachycardia
        } else if heart_rate < BRADYCARDIA_BELOW {
            HeartRateStatus::Bradycardia
        } else {
            HeartRateStatus::Normal
        }
    }

    /// Label stored with the record and shown to clients
    pub fn label(&self) -> &'static str {
        match self {
            HeartRateStatus::Normal => "Normal",
            HeartRateStatus::Tachycardia => "High (Tachycardia)",
            HeartRateStatus::Bradycardia => "Low (Bradycardia)",
        }
    }
}

impl fmt::Display for HeartRateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted heart-rate / blood-pressure observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthRecord {
    /// Identifier assigned by the store
    pub id: i64,

    /// Local time the record was written
    #[cfg_attr(feature = "with-api", schema(example = "2024-03-01 08:30:00"))]
    pub timestamp: String,

    /// Heart rate in beats per minute
    pub heart_rate: i64,

    /// Blood pressure as reported
    #[cfg_attr(feature = "with-api", schema(example = "120/80"))]
    pub blood_pressure: String,

    /// Derived classification
    pub status: HeartRateStatus,
}

impl HealthRecord {
    /// Combine a stored row with the classification it was written with
    pub(crate) fn from_stored(record: StoredHealthRecord, status: HeartRateStatus) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            heart_rate: record.heart_rate,
            blood_pressure: record.blood_pressure,
            status,
        }
    }
}
