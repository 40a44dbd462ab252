//! Router for the OAuth flow

use std::sync::Arc;

use anyhow::anyhow;
use axum::{Router, extract::State};
use axum_extra::extract::Query;

use super::public;
use crate::api::public::{ApiError, Envelope};
use crate::api::state::AppState;
use crate::api::utils::Validator;
use crate::google::credentials::{HOST_ACCOUNT_ID, save_refresh_token};

type SharedState = Arc<AppState>;

async fn initiate_auth_handler(
    State(state): State<SharedState>,
) -> Envelope<public::AuthUrlResponse> {
    Envelope::ok(public::AuthUrlResponse {
        auth_url: state.oauth().authorization_url(),
    })
}

async fn oauth_callback_handler(
    State(state): State<SharedState>,
    Query(query): Query<public::CallbackQuery>,
) -> Result<Envelope<public::CallbackResponse>, ApiError> {
    if let Some(error) = query.error {
        return Err(ApiError::AuthExchangeFailed(anyhow!(
            "Authorization was not granted: {}",
            error
        )));
    }

    let mut v = Validator::new();
    let Some(code) = v.non_empty("code", query.code) else {
        return Err(v.into_error());
    };

    let token = state
        .oauth()
        .exchange_code(&code)
        .await
        .map_err(ApiError::AuthExchangeFailed)?;

    // exchange_code guarantees a refresh token
    let refresh_token = token
        .refresh_token
        .ok_or_else(|| ApiError::AuthExchangeFailed(anyhow!("No refresh token in response")))?;
    save_refresh_token(&state.db, HOST_ACCOUNT_ID, &refresh_token).await?;
    tracing::info!("Stored calendar credential for {}", HOST_ACCOUNT_ID);

    Ok(Envelope::created(public::CallbackResponse {
        message: String::from("Calendar access authorized"),
    }))
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/initiate-auth", axum::routing::get(initiate_auth_handler))
        .route("/oauth2callback", axum::routing::get(oauth_callback_handler))
}
