//! Errors produced by the availability and booking engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    /// The requested window does not fit inside any free slot. Expected and
    /// correctable by picking another slot.
    #[error("The requested time slot is not available")]
    SlotUnavailable,

    #[error("Calendar provider read failed: {0:#}")]
    UpstreamUnavailable(anyhow::Error),

    /// The availability check passed but the provider rejected the write.
    #[error("Calendar provider write failed: {0:#}")]
    UpstreamWriteFailed(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
