//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::scheduling::SchedulingError;

/// Every response body is `{status, data}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

// Errors

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input, one entry per offending field
    ValidationFailed(Vec<FieldError>),
    /// No host credential has been stored yet
    AuthRequired,
    AuthExchangeFailed(anyhow::Error),
    SlotUnavailable,
    UpstreamUnavailable(anyhow::Error),
    UpstreamWriteFailed(anyhow::Error),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthRequired => StatusCode::UNAUTHORIZED,
            ApiError::SlotUnavailable => StatusCode::CONFLICT,
            ApiError::AuthExchangeFailed(_)
            | ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamWriteFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed(_) => "validation_failed",
            ApiError::AuthRequired => "auth_required",
            ApiError::AuthExchangeFailed(_) => "auth_exchange_failed",
            ApiError::SlotUnavailable => "slot_unavailable",
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::UpstreamWriteFailed(_) => "upstream_write_failed",
            ApiError::Internal(_) => "internal",
        }
    }

    /// Client-facing message. Upstream details are logged, not returned.
    fn message(&self) -> String {
        match self {
            ApiError::ValidationFailed(_) => String::from("Invalid request"),
            ApiError::AuthRequired => {
                String::from("Calendar access has not been authorized. Visit /initiate-auth")
            }
            ApiError::AuthExchangeFailed(_) => String::from("Error authorizing calendar access"),
            ApiError::SlotUnavailable => {
                String::from("The requested time slot is not available")
            }
            ApiError::UpstreamUnavailable(_) => String::from("Error reading from the calendar"),
            ApiError::UpstreamWriteFailed(_) => String::from("Error scheduling event"),
            ApiError::Internal(_) => String::from("Something went wrong"),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        match &self {
            ApiError::ValidationFailed(errors) => {
                tracing::warn!("Validation failed: {:?}", errors)
            }
            ApiError::AuthRequired | ApiError::SlotUnavailable => {
                tracing::warn!("{}", self.message())
            }
            ApiError::AuthExchangeFailed(e)
            | ApiError::UpstreamUnavailable(e)
            | ApiError::UpstreamWriteFailed(e)
            | ApiError::Internal(e) => tracing::error!("{}: {:#}", self.code(), e),
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.code(),
            message: self.message(),
            errors: match self {
                ApiError::ValidationFailed(errors) => Some(errors),
                _ => None,
            },
        };
        Envelope::new(status, body).into_response()
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::SlotUnavailable => ApiError::SlotUnavailable,
            SchedulingError::UpstreamUnavailable(e) => ApiError::UpstreamUnavailable(e),
            SchedulingError::UpstreamWriteFailed(e) => ApiError::UpstreamWriteFailed(e),
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

// Re-export public types from each route

pub mod auth {
    pub use crate::api::routes::auth::public::*;
}

pub mod meetings {
    pub use crate::api::routes::meetings::public::*;
}
