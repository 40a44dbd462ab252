//! Per-request calendar access.

use std::sync::Arc;

use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::google::credentials::{HOST_ACCOUNT_ID, find_refresh_token};
use crate::google::gcal::GoogleCalendar;
use crate::scheduling::Scheduler;

/// Mint an access token from the stored refresh token and bind it to a
/// scheduler for this request only.
pub async fn host_scheduler(state: &AppState) -> Result<Scheduler<GoogleCalendar>, ApiError> {
    let refresh_token = find_refresh_token(&state.db, HOST_ACCOUNT_ID)
        .await?
        .ok_or(ApiError::AuthRequired)?;

    let token = state
        .oauth()
        .refresh(&refresh_token)
        .await
        .map_err(ApiError::AuthExchangeFailed)?;

    let calendar = GoogleCalendar::new(
        state.http.clone(),
        &state.config.google_calendar_api_url,
        token.access_token,
    );

    Ok(Scheduler::new(Arc::clone(&state.catalog), calendar)
        .with_booking_locks(Arc::clone(&state.booking_locks)))
}
