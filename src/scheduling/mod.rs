//! Availability and booking engine.
//!
//! - [`interval`]: pure overlap/containment checks
//! - [`catalog`]: the host's offerable slots
//! - [`provider`]: the calendar collaborator contract
//! - [`scheduler`]: availability computation and the booking gate
//! - [`locks`]: per-calendar booking serialization

pub mod catalog;
pub mod error;
pub mod interval;
pub mod locks;
pub mod provider;
pub mod scheduler;

pub use catalog::{CatalogSource, SlotCatalog};
pub use error::SchedulingError;
pub use interval::{TimeInterval, is_contained_by_any, overlaps, within_window};
pub use locks::{BookingGuard, BookingLocks};
pub use provider::{
    Attendee, CalendarEvent, CalendarProvider, EventDateTime, ProviderEvent, ScheduleResponse,
};
pub use scheduler::{Scheduler, free_slots};
