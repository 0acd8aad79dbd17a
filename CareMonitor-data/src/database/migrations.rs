use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Running SQLite migrations");

    create_health_records_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the health records table
fn create_health_records_table(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Creating health_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS health_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            heart_rate INTEGER NOT NULL,
            blood_pressure TEXT NOT NULL,
            status TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
