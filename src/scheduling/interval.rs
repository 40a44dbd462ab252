//! Interval algebra over offset-aware time intervals.
//!
//! Every comparison here is done on the resolved instant. Two timestamps
//! written with different offsets but naming the same moment compare equal.
//!
//! Zero-length and inverted intervals are treated as empty: they never
//! overlap anything and they never satisfy an availability check.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A time window with an explicit UTC offset on both ends and the IANA zone
/// name the caller associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub time_zone: String,
}

impl TimeInterval {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            time_zone: time_zone.into(),
        }
    }

    /// True when the interval has positive length.
    pub fn is_real(&self) -> bool {
        self.start < self.end
    }
}

/// Strict half-open overlap. Adjacent intervals (`a.end == b.start`) do not
/// overlap, and neither does anything involving an empty interval.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    if !a.is_real() || !b.is_real() {
        return false;
    }
    a.start < b.end && b.start < a.end
}

/// True iff `slot` lies entirely inside `[window_start, window_end]`.
pub fn within_window(
    slot: &TimeInterval,
    window_start: DateTime<FixedOffset>,
    window_end: DateTime<FixedOffset>,
) -> bool {
    slot.start >= window_start && slot.end <= window_end
}

/// True iff some entry of `free` fully contains `candidate`.
///
/// This is containment, not absence of overlap: a candidate spanning two
/// adjacent free slots is rejected even though it overlaps nothing busy.
pub fn is_contained_by_any<'a, I>(candidate: &TimeInterval, free: I) -> bool
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    if !candidate.is_real() {
        return false;
    }
    free.into_iter()
        .any(|slot| within_window(candidate, slot.start, slot.end))
}
