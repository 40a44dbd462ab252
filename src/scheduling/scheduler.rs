//! Availability and booking on top of a slot catalog and a calendar provider.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use super::catalog::SlotCatalog;
use super::error::{Result, SchedulingError};
use super::interval::{TimeInterval, is_contained_by_any, overlaps};
use super::locks::BookingLocks;
use super::provider::{CalendarEvent, CalendarProvider, ScheduleResponse};

/// Catalog entries inside the window that overlap none of `busy`, in
/// catalog order. A slot touched by any busy interval is dropped whole,
/// never split.
pub fn free_slots(
    catalog: &SlotCatalog,
    window_start: DateTime<FixedOffset>,
    window_end: DateTime<FixedOffset>,
    busy: &[TimeInterval],
) -> Vec<TimeInterval> {
    catalog
        .within(window_start, window_end)
        .filter(|slot| !busy.iter().any(|b| overlaps(slot, b)))
        .cloned()
        .collect()
}

/// Request-scoped orchestrator. Build one per request with the shared
/// catalog and a provider bound to that request's credential.
pub struct Scheduler<P> {
    catalog: Arc<SlotCatalog>,
    provider: P,
    locks: Option<Arc<BookingLocks>>,
}

impl<P: CalendarProvider> Scheduler<P> {
    pub fn new(catalog: Arc<SlotCatalog>, provider: P) -> Self {
        Self {
            catalog,
            provider,
            locks: None,
        }
    }

    /// Serialize bookings per calendar through `locks`.
    pub fn with_booking_locks(mut self, locks: Arc<BookingLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    async fn busy_intervals(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
        time_zone: &str,
        calendar_id: &str,
    ) -> Result<Vec<TimeInterval>> {
        let events = self
            .provider
            .list_events(calendar_id, window_start, window_end)
            .await
            .map_err(SchedulingError::UpstreamUnavailable)?;

        let busy: Vec<TimeInterval> = events
            .iter()
            .filter_map(|event| {
                let interval = event.busy_interval(time_zone);
                if interval.is_none() {
                    tracing::debug!("Skipping event {} without a start/end time", event.id);
                }
                interval
            })
            .collect();

        Ok(busy)
    }

    /// Catalog slots inside `[window_start, window_end]` that no existing
    /// event on `calendar_id` overlaps.
    pub async fn compute_availability(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
        time_zone: &str,
        calendar_id: &str,
    ) -> Result<Vec<TimeInterval>> {
        let busy = self
            .busy_intervals(window_start, window_end, time_zone, calendar_id)
            .await?;
        let free = free_slots(&self.catalog, window_start, window_end, &busy);

        tracing::debug!(
            "Availability for {} in [{}, {}]: {} busy, {} free of {} catalog slots ({})",
            calendar_id,
            window_start,
            window_end,
            busy.len(),
            free.len(),
            self.catalog.len(),
            self.catalog.source()
        );

        Ok(free)
    }

    pub async fn list_host_events(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
        calendar_id: &str,
    ) -> Result<Vec<ScheduleResponse>> {
        let events = self
            .provider
            .list_events(calendar_id, window_start, window_end)
            .await
            .map_err(SchedulingError::UpstreamUnavailable)?;

        Ok(events.into_iter().map(ScheduleResponse::from).collect())
    }

    /// Host events that `email` is invited to.
    pub async fn list_non_host_events(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
        calendar_id: &str,
        email: &str,
    ) -> Result<Vec<ScheduleResponse>> {
        let events = self
            .provider
            .list_events(calendar_id, window_start, window_end)
            .await
            .map_err(SchedulingError::UpstreamUnavailable)?;

        Ok(events
            .into_iter()
            .filter(|event| event.has_attendee(email))
            .map(ScheduleResponse::from)
            .collect())
    }

    /// Book `event` if it fits wholly inside a slot that is free right now.
    ///
    /// Availability is recomputed from the provider on every call. Nothing
    /// is written when the check fails, and nothing is undone when the write
    /// fails.
    pub async fn book_meeting(
        &self,
        event: &CalendarEvent,
        calendar_id: &str,
    ) -> Result<ScheduleResponse> {
        let candidate = event.interval();
        tracing::info!(
            "Booking received for {}: {} - {}",
            calendar_id,
            candidate.start,
            candidate.end
        );

        if !candidate.is_real() {
            tracing::warn!("Booking rejected: empty or inverted window");
            return Err(SchedulingError::SlotUnavailable);
        }

        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(calendar_id).await),
            None => None,
        };

        // Widen the query window to every catalog slot the candidate touches
        // so an enclosing slot passes the within-window filter.
        let (window_start, window_end) = self.catalog.overlapping(&candidate).fold(
            (candidate.start, candidate.end),
            |(start, end), slot| (start.min(slot.start), end.max(slot.end)),
        );

        let available = self
            .compute_availability(window_start, window_end, &event.time_zone, calendar_id)
            .await?;
        tracing::debug!(
            "Availability checked for {}: {} candidate slots",
            calendar_id,
            available.len()
        );

        if !is_contained_by_any(&candidate, &available) {
            tracing::warn!(
                "Booking rejected for {}: {} - {} is not inside a free slot",
                calendar_id,
                candidate.start,
                candidate.end
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        tracing::debug!("Booking submitted to calendar {}", calendar_id);
        let created = self
            .provider
            .insert_event(calendar_id, event)
            .await
            .map_err(|e| {
                tracing::error!("Booking failed for {}: {:#}", calendar_id, e);
                SchedulingError::UpstreamWriteFailed(e)
            })?;

        tracing::info!("Booking confirmed for {}: event {}", calendar_id, created.id);
        Ok(ScheduleResponse::from(created))
    }
}
