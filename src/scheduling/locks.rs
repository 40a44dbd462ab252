//! Per-calendar serialization of bookings.
//!
//! A booking holds its calendar's lock from the availability recheck until
//! the provider write returns, so two bookings handled by this process can't
//! both pass the check for the same window. Writers outside this process are
//! not covered.
//!
//! Entries live only while a booking holds or waits on them. The map is keyed
//! by caller-supplied calendar ids and would otherwise grow for the life of
//! the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type CalendarLocks = HashMap<String, Arc<AsyncMutex<()>>>;

#[derive(Debug, Default)]
pub struct BookingLocks {
    calendars: Mutex<CalendarLocks>,
}

/// Exclusive booking access to one calendar. Released on drop.
#[derive(Debug)]
pub struct BookingGuard<'a> {
    locks: &'a BookingLocks,
    calendar_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn calendars(&self) -> MutexGuard<'_, CalendarLocks> {
        self.calendars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Wait for exclusive booking access to `calendar_id`.
    pub async fn acquire(&self, calendar_id: &str) -> BookingGuard<'_> {
        // Cloned under the map lock so a concurrent release sees this waiter
        let lock = Arc::clone(
            self.calendars()
                .entry(calendar_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        );

        BookingGuard {
            locks: self,
            calendar_id: calendar_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of calendars with a booking in flight.
    pub fn in_flight(&self) -> usize {
        self.calendars().len()
    }
}

impl Drop for BookingGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut calendars = self.locks.calendars();
        if let Some(lock) = calendars.get(&self.calendar_id)
            && Arc::strong_count(lock) == 1
        {
            calendars.remove(&self.calendar_id);
        }
    }
}
