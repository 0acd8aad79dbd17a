//! Database connection module for the CareMonitor application
//!
//! Health records live in a single SQLite file. Connections are pooled with
//! r2d2; each request checks one out for its write and hands it back when done.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;
use tracing::{error, info};

use super::migrations::run_migrations;

/// Pooled SQLite connection
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Data directory could not be created
    #[error("Failed to create data directory {path}: {source}")]
    DataDirectory {
        path: String,
        source: std::io::Error,
    },
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, `None` for a private in-memory database
    pub sqlite_path: Option<String>,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some("data/health_data.db".to_string()),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for an in-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: None,
            max_connections: 1,
            timeout_seconds: 5,
        }
    }

    /// Create a new database configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("DATA_DIR").unwrap_or_else(|| "data".to_string());
        let sqlite_path = lookup("DB_SQLITE_PATH").unwrap_or_else(|| {
            Path::new(&data_dir)
                .join("health_data.db")
                .to_string_lossy()
                .into_owned()
        });

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = lookup("DB_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        Self {
            sqlite_path: Some(sqlite_path),
            max_connections,
            timeout_seconds,
        }
    }
}

/// Shared handle to the SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabasePool {
    inner: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl DatabasePool {
    /// Open the pool described by `config` and make sure the schema exists
    pub fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let builder = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.timeout_seconds));

        let pool = match &config.sqlite_path {
            Some(path) => {
                info!("Initializing SQLite database at: {}", path);
                ensure_parent_dir(path)?;

                let manager = SqliteConnectionManager::file(path)
                    .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);
                builder.build(manager)?
            }
            None => {
                info!("Initializing in-memory SQLite database");
                // Every in-memory connection is its own database, so the pool
                // must hold exactly one connection that never expires.
                builder
                    .max_size(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .build(SqliteConnectionManager::memory())?
            }
        };

        let conn = pool.get()?;
        run_migrations(&conn).map_err(|e| {
            error!("Failed to run database migrations: {}", e);
            DatabaseError::SqliteError(e)
        })?;
        drop(conn);

        info!("SQLite connection pool created successfully");
        Ok(Self {
            inner: Arc::new(pool),
        })
    }

    /// Check out a connection for the duration of one unit of work
    pub fn get(&self) -> Result<PooledConnection, DatabaseError> {
        Ok(self.inner.get()?)
    }

    /// Verify the database answers a trivial query
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Describe the database and the pool occupancy
    pub fn connection_info(&self) -> String {
        let location = self
            .get()
            .ok()
            .and_then(|conn| {
                conn.query_row("PRAGMA database_list", [], |row| row.get::<_, String>(2))
                    .ok()
            })
            .map(|path| {
                if path.is_empty() {
                    "SQLite in-memory database".to_string()
                } else {
                    format!("SQLite database at {}", path)
                }
            })
            .unwrap_or_else(|| "SQLite database (path unknown)".to_string());

        let state = self.inner.state();
        format!(
            "{} (connections: active={}, idle={})",
            location, state.connections, state.idle_connections
        )
    }
}

fn ensure_parent_dir(path: &str) -> Result<(), DatabaseError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent).map_err(|source| DatabaseError::DataDirectory {
                path: parent.to_string_lossy().into_owned(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_path.as_deref(), Some("data/health_data.db"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_database_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("DATA_DIR", "/var/lib/care"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_TIMEOUT_SECONDS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = DatabaseConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.sqlite_path.as_deref(),
            Some(Path::new("/var/lib/care").join("health_data.db").to_str().unwrap())
        );
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_explicit_sqlite_path_wins() {
        let config = DatabaseConfig::from_lookup(|key| match key {
            "DATA_DIR" => Some("ignored".to_string()),
            "DB_SQLITE_PATH" => Some("/tmp/records.db".to_string()),
            _ => None,
        });
        assert_eq!(config.sqlite_path.as_deref(), Some("/tmp/records.db"));
    }

    #[test]
    fn test_in_memory_pool_runs_migrations() {
        let pool = DatabasePool::new(&DatabaseConfig::in_memory()).unwrap();
        pool.ping().unwrap();

        let conn = pool.get().unwrap();
        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'health_records'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1);
        drop(conn);

        assert!(pool.connection_info().contains("in-memory"));
    }
}
