//! Google OAuth2 web-server flow: consent URL, code exchange, refresh.

use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::core::AppConfig;

pub const CALENDAR_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
];

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// OAuth client settings for one Google project.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
}

impl GoogleOAuth {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            auth_url: config.google_auth_url.clone(),
            token_url: config.google_token_url.clone(),
        }
    }

    /// Override the redirect URI, e.g. for the out-of-band CLI flow.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// URL the host opens to grant offline calendar access.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&CALENDAR_SCOPES.join(" "))
        )
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<OAuthToken> {
        let res = self.http.post(&self.token_url).form(params).send().await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Token request failed: {} ({})", status, text);
        }
        let token: OAuthToken = serde_json::from_str(&text)?;
        Ok(token)
    }

    /// Trade an authorization code for tokens. The response must include a
    /// refresh token since that is all that gets stored.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthToken> {
        let token = self
            .token_request(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;
        if token.refresh_token.is_none() {
            return Err(anyhow!("No refresh token in response"));
        }
        Ok(token)
    }

    /// Get a fresh access token from a stored refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<OAuthToken> {
        self.token_request(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }
}
