use std::env;

use anyhow::{Context, Result};

use crate::google::gcal;

pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_auth_url: String,
    pub google_token_url: String,
    pub google_calendar_api_url: String,
    pub http_timeout_secs: u64,
    /// JSON file with the slot catalog. The builtin catalog is used when unset.
    pub slot_catalog_path: Option<String>,
}

impl AppConfig {
    /// Read configuration from `SLOTBOOK_*` environment variables. `port` is
    /// only used to derive the default OAuth redirect URI.
    pub fn from_env(port: &str) -> Result<Self> {
        let storage_path = env::var("SLOTBOOK_STORAGE_PATH").unwrap_or("./".to_string());
        let google_client_id =
            env::var("SLOTBOOK_GOOGLE_CLIENT_ID").context("Missing SLOTBOOK_GOOGLE_CLIENT_ID")?;
        let google_client_secret = env::var("SLOTBOOK_GOOGLE_CLIENT_SECRET")
            .context("Missing SLOTBOOK_GOOGLE_CLIENT_SECRET")?;
        let google_redirect_uri = env::var("SLOTBOOK_GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| format!("http://localhost:{}/oauth2callback", port));
        let google_auth_url = env::var("SLOTBOOK_GOOGLE_AUTH_URL")
            .unwrap_or_else(|_| DEFAULT_GOOGLE_AUTH_URL.to_string());
        let google_token_url = env::var("SLOTBOOK_GOOGLE_TOKEN_URL")
            .unwrap_or_else(|_| DEFAULT_GOOGLE_TOKEN_URL.to_string());
        let google_calendar_api_url = env::var("SLOTBOOK_GOOGLE_CALENDAR_API_URL")
            .unwrap_or_else(|_| gcal::DEFAULT_API_URL.to_string());
        let http_timeout_secs = match env::var("SLOTBOOK_HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid SLOTBOOK_HTTP_TIMEOUT_SECS: {}", value))?,
            Err(_) => 30,
        };
        let slot_catalog_path = env::var("SLOTBOOK_SLOT_CATALOG_PATH").ok();

        Ok(Self {
            storage_path,
            google_client_id,
            google_client_secret,
            google_redirect_uri,
            google_auth_url,
            google_token_url,
            google_calendar_api_url,
            http_timeout_secs,
            slot_catalog_path,
        })
    }

    #[cfg(test)]
    pub fn for_tests(google_base_url: &str) -> Self {
        Self {
            storage_path: String::from("./"),
            google_client_id: String::from("test_client_id"),
            google_client_secret: String::from("test_client_secret"),
            google_redirect_uri: String::from("http://localhost:2222/oauth2callback"),
            google_auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
            google_token_url: format!("{}/token", google_base_url),
            google_calendar_api_url: google_base_url.to_string(),
            http_timeout_secs: 5,
            slot_catalog_path: None,
        }
    }
}
