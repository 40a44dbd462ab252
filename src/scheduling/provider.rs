//! The contract between the scheduler and an external calendar.
//!
//! Implementations own storage, pagination, ordering and recurring-event
//! expansion. The scheduler only sees a finite, start-ordered list of
//! single occurrences.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    pub display_name: String,
}

/// One end of an event as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: DateTime<FixedOffset>,
    pub time_zone: String,
}

/// A booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub time_zone: String,
    pub attendees: Vec<Attendee>,
}

impl CalendarEvent {
    /// The window this event asks to occupy.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(
            self.start.date_time,
            self.end.date_time,
            self.time_zone.clone(),
        )
    }
}

/// An event as stored by the provider.
///
/// `start`/`end` are `None` for all-day events, which carry a date rather
/// than a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub attendees: Vec<Attendee>,
}

impl ProviderEvent {
    /// The busy window this event occupies, tagged with the caller's zone.
    pub fn busy_interval(&self, time_zone: &str) -> Option<TimeInterval> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TimeInterval::new(start, end, time_zone)),
            _ => None,
        }
    }

    pub fn has_attendee(&self, email: &str) -> bool {
        self.attendees
            .iter()
            .any(|attendee| attendee.email.eq_ignore_ascii_case(email))
    }
}

/// The public shape of an event returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start_date_time: Option<DateTime<FixedOffset>>,
    pub end_date_time: Option<DateTime<FixedOffset>>,
    pub attendees: Vec<Attendee>,
}

impl From<ProviderEvent> for ScheduleResponse {
    fn from(event: ProviderEvent) -> Self {
        Self {
            id: event.id,
            summary: event.summary.unwrap_or_default(),
            description: event.description,
            start_date_time: event.start,
            end_date_time: event.end,
            attendees: event.attendees,
        }
    }
}

/// A calendar the scheduler can read busy time from and write bookings to.
///
/// Values implementing this are expected to be bound to a single caller's
/// credential for the lifetime of one request.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Single-occurrence events in `[time_min, time_max]`, ordered by start.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<ProviderEvent>>;

    /// Persist `event` and return it as stored, with its provider id.
    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent)
    -> Result<ProviderEvent>;
}
