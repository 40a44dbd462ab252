use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::google::oauth::GoogleOAuth;
use crate::scheduling::{BookingLocks, SlotCatalog};

/// Shared, read-only request context. The catalog and config never change
/// after startup; the booking locks synchronize internally.
#[derive(Clone)]
pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    pub catalog: Arc<SlotCatalog>,
    pub booking_locks: Arc<BookingLocks>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig, catalog: SlotCatalog) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            db,
            config,
            catalog: Arc::new(catalog),
            booking_locks: Arc::new(BookingLocks::new()),
            http,
        })
    }

    pub fn oauth(&self) -> GoogleOAuth {
        GoogleOAuth::new(self.http.clone(), &self.config)
    }
}
