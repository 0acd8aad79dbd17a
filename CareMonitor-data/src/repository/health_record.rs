use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::health_record::{HealthRecord, NewHealthRecord};

/// Repository trait for health records
#[async_trait]
pub trait HealthRecordRepositoryTrait {
    /// Append a record and return it with the store-assigned id
    async fn create(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError>;

    /// Get all health records, oldest first
    async fn get_all(&self) -> Result<Vec<HealthRecord>, RepositoryError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// SQLite-backed repository for health records
#[derive(Debug, Clone)]
pub struct HealthRecordRepository {
    pool: DatabasePool,
}

impl HealthRecordRepository {
    /// Create a new repository
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRecordRepositoryTrait for HealthRecordRepository {
    async fn create(&self, record: NewHealthRecord) -> Result<HealthRecord, RepositoryError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO health_records (timestamp, heart_rate, blood_pressure, status)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &record.timestamp,
                record.heart_rate,
                &record.blood_pressure,
                &record.status,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored health record in database: id={}", id);

        Ok(record.with_id(id))
    }

    async fn get_all(&self) -> Result<Vec<HealthRecord>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, heart_rate, blood_pressure, status
             FROM health_records ORDER BY id ASC",
        )?;

        let records = stmt.query_map([], |row| {
            Ok(HealthRecord {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                heart_rate: row.get(2)?,
                blood_pressure: row.get(3)?,
                status: row.get(4)?,
            })
        })?;

        let mut result = Vec::new();
        for record in records {
            result.push(record?);
        }

        Ok(result)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(self.pool.ping()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseConfig, DatabaseError};

    fn repository() -> HealthRecordRepository {
        let pool = DatabasePool::new(&DatabaseConfig::in_memory()).unwrap();
        HealthRecordRepository::new(pool)
    }

    fn reading(heart_rate: i64) -> NewHealthRecord {
        NewHealthRecord {
            timestamp: "2024-03-01 08:30:00".to_string(),
            heart_rate,
            blood_pressure: "120/80".to_string(),
            status: "Normal".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = repository();

        let first = repo.create(reading(72)).await.unwrap();
        let second = repo.create(reading(72)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.heart_rate, 72);
        assert_eq!(first.blood_pressure, "120/80");
    }

    #[tokio::test]
    async fn get_all_returns_rows_in_insert_order() {
        let repo = repository();
        assert!(repo.get_all().await.unwrap().is_empty());

        repo.create(reading(55)).await.unwrap();
        repo.create(reading(130)).await.unwrap();

        let rows = repo.get_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].heart_rate, 55);
        assert_eq!(rows[1].heart_rate, 130);
        assert_eq!(rows[0].timestamp, "2024-03-01 08:30:00");
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_pool() {
        assert!(repository().ping().await.is_ok());
    }

    #[tokio::test]
    async fn exhausted_pool_surfaces_as_database_error() {
        let config = DatabaseConfig {
            timeout_seconds: 1,
            ..DatabaseConfig::in_memory()
        };
        let pool = DatabasePool::new(&config).unwrap();
        let repo = HealthRecordRepository::new(pool.clone());

        // The in-memory pool holds a single connection
        let _held = pool.get().unwrap();
        let err = repo.create(reading(72)).await.unwrap_err();

        assert!(
            matches!(
                err,
                RepositoryError::Database(DatabaseError::SqlitePoolError(_))
            ),
            "unexpected error: {:?}",
            err
        );
    }
}
