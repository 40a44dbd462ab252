//! Storage for the host's Google refresh token.
//!
//! Only the refresh token is persisted. Access tokens are minted per
//! request and never shared between requests.

use anyhow::Result;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

/// Row id for the single host this service books against.
pub const HOST_ACCOUNT_ID: &str = "host";
pub const SERVICE_NAME: &str = "google_calendar";

pub async fn save_refresh_token(db: &Connection, account_id: &str, refresh_token: &str) -> Result<()> {
    let account_id = account_id.to_string();
    let refresh_token = refresh_token.to_string();
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO auth (id, service, refresh_token) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                service = excluded.service,
                refresh_token = excluded.refresh_token,
                updated_at = CURRENT_TIMESTAMP",
            (&account_id, SERVICE_NAME, &refresh_token),
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

pub async fn find_refresh_token(db: &Connection, account_id: &str) -> Result<Option<String>> {
    let account_id = account_id.to_string();
    let token = db
        .call(move |conn| {
            let token = conn
                .query_row(
                    "SELECT refresh_token FROM auth WHERE id = ?1 AND service = ?2",
                    (&account_id, SERVICE_NAME),
                    |row| row.get(0),
                )
                .optional()?;
            Ok(token)
        })
        .await?;
    Ok(token)
}
