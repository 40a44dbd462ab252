use crate::core::db::{async_db, initialize_db};
use anyhow::{Context, Result};
use std::fs;

pub async fn run(storage_path: &str) -> Result<()> {
    println!("Initializing db...");
    fs::create_dir_all(storage_path)
        .with_context(|| format!("Failed to create storage directory {}", storage_path))?;

    let db = async_db(storage_path)
        .await
        .context("Failed to connect to db")?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    println!("Finished initializing db");

    Ok(())
}
