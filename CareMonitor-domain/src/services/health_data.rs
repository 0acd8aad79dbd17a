use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use care_monitor_data::models::NewHealthRecord;
use care_monitor_data::repository::{HealthRecordRepositoryTrait, RepositoryError};

use crate::entities::health_record::{HealthRecord, HeartRateStatus};
use crate::entities::requests::HealthDataRequest;
use super::local_timestamp;

/// Health data service errors
#[derive(Debug, Error)]
pub enum HealthDataServiceError {
    /// The store refused the write
    #[error("Failed to store health data: {0}")]
    Store(#[from] RepositoryError),
}

/// Trait for health data operations
#[async_trait]
pub trait HealthDataServiceTrait {
    /// Classify a validated reading and append it to the store
    async fn record_reading(
        &self,
        request: HealthDataRequest,
    ) -> Result<HealthRecord, HealthDataServiceError>;
}

/// Health data service for domain logic
pub struct HealthDataService<R: HealthRecordRepositoryTrait> {
    repository: R,
}

impl<R: HealthRecordRepositoryTrait> HealthDataService<R> {
    /// Create a new health data service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: HealthRecordRepositoryTrait + Send + Sync> HealthDataServiceTrait for HealthDataService<R> {
    async fn record_reading(
        &self,
        request: HealthDataRequest,
    ) -> Result<HealthRecord, HealthDataServiceError> {
        let status = HeartRateStatus::classify(request.heart_rate);

        let new_record = NewHealthRecord {
            timestamp: local_timestamp(),
            heart_rate: request.heart_rate,
            blood_pressure: request.bp,
            status: status.label().to_string(),
        };

        let stored = self.repository.create(new_record).await.map_err(|e| {
            error!("Failed to store health record: {}", e);
            HealthDataServiceError::Store(e)
        })?;

        info!(
            id = stored.id,
            heart_rate = stored.heart_rate,
            blood_pressure = %stored.blood_pressure,
            status = %status,
            "Received health data"
        );

        Ok(HealthRecord::from_stored(stored, status))
    }
}
