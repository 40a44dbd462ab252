//! Router for the availability and booking API

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State};
use axum_extra::extract::Query;

use super::public;
use crate::api::public::{ApiError, Envelope, FieldError};
use crate::api::session::host_scheduler;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn availability_handler(
    State(state): State<SharedState>,
    Query(query): Query<public::AvailabilityQuery>,
) -> Result<Envelope<Vec<public::TimeInterval>>, ApiError> {
    let params = query.validate()?;
    let scheduler = host_scheduler(&state).await?;

    let slots = scheduler
        .compute_availability(
            params.window_start,
            params.window_end,
            &params.time_zone,
            &params.calendar_id,
        )
        .await?;

    Ok(Envelope::ok(slots))
}

async fn schedule_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::ScheduleRequest>, JsonRejection>,
) -> Result<Envelope<public::ScheduleResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::ValidationFailed(vec![FieldError::new("body", rejection.body_text())])
    })?;
    let params = request.validate()?;
    let scheduler = host_scheduler(&state).await?;

    let created = scheduler
        .book_meeting(&params.event, &params.calendar_id)
        .await?;

    Ok(Envelope::ok(created))
}

async fn host_meetings_handler(
    State(state): State<SharedState>,
    Query(query): Query<public::HostMeetingsQuery>,
) -> Result<Envelope<Vec<public::ScheduleResponse>>, ApiError> {
    let params = query.validate()?;
    let scheduler = host_scheduler(&state).await?;

    let events = scheduler
        .list_host_events(params.window_start, params.window_end, &params.calendar_id)
        .await?;

    Ok(Envelope::ok(events))
}

async fn user_meetings_handler(
    State(state): State<SharedState>,
    Query(query): Query<public::UserMeetingsQuery>,
) -> Result<Envelope<Vec<public::ScheduleResponse>>, ApiError> {
    let params = query.validate()?;
    let scheduler = host_scheduler(&state).await?;

    let events = scheduler
        .list_non_host_events(
            params.window_start,
            params.window_end,
            &params.calendar_id,
            &params.email,
        )
        .await?;

    Ok(Envelope::ok(events))
}

/// Create the meetings router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/availability", axum::routing::get(availability_handler))
        .route("/schedule", axum::routing::post(schedule_handler))
        .route("/host-meetings", axum::routing::get(host_meetings_handler))
        .route("/user-meetings", axum::routing::get(user_meetings_handler))
}
