use anyhow::Result;
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

/// Open (or create) the sqlite database under `storage_path`.
pub async fn async_db(storage_path: &str) -> Result<Connection> {
    let path = std::path::Path::new(storage_path).join("slotbook.db");
    let db = Connection::open(path).await?;
    Ok(db)
}

/// Create tables that don't exist yet. Safe to run on every start.
pub fn initialize_db(conn: &SyncConnection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS auth (
            id TEXT PRIMARY KEY,
            service TEXT NOT NULL,
            refresh_token TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    )
}
