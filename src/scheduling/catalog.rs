//! The host's slot catalog: every window the host is willing to offer.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset};

use super::interval::{TimeInterval, overlaps, within_window};

const BUILTIN_TIME_ZONE: &str = "Asia/Kolkata";

const BUILTIN_SLOTS: [(&str, &str); 10] = [
    ("2023-04-10T06:30:00+05:30", "2023-04-10T07:30:00+05:30"),
    ("2023-04-11T00:30:00+05:30", "2023-04-11T01:30:00+05:30"),
    ("2023-04-11T02:30:00+05:30", "2023-04-11T03:30:00+05:30"),
    ("2023-04-11T18:30:00+05:30", "2023-04-11T19:30:00+05:30"),
    ("2023-04-11T22:30:00+05:30", "2023-04-11T23:30:00+05:30"),
    ("2023-04-12T01:30:00+05:30", "2023-04-12T02:30:00+05:30"),
    ("2023-04-12T02:30:00+05:30", "2023-04-12T03:30:00+05:30"),
    ("2023-04-12T21:30:00+05:30", "2023-04-12T22:30:00+05:30"),
    ("2023-04-13T16:30:00+05:30", "2023-04-13T17:30:00+05:30"),
    ("2023-04-15T05:30:00+05:30", "2023-04-15T06:30:00+05:30"),
];

/// Where a catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
    Inline,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => write!(f, "builtin"),
            CatalogSource::File(path) => write!(f, "file:{}", path.display()),
            CatalogSource::Inline => write!(f, "inline"),
        }
    }
}

/// An ordered, immutable set of offerable slots.
///
/// Ordering is the declared order and is preserved by every query, so the
/// same catalog always yields the same availability sequence.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    slots: Vec<TimeInterval>,
    source: CatalogSource,
}

impl SlotCatalog {
    pub fn new(slots: Vec<TimeInterval>, source: CatalogSource) -> Self {
        Self { slots, source }
    }

    /// Build an in-memory catalog, typically for tests or embedding.
    pub fn inline(slots: Vec<TimeInterval>) -> Self {
        Self::new(slots, CatalogSource::Inline)
    }

    /// The fixed catalog the service ships with.
    pub fn builtin() -> Self {
        let slots = BUILTIN_SLOTS
            .iter()
            .filter_map(|(start, end)| {
                let start = DateTime::parse_from_rfc3339(start).ok()?;
                let end = DateTime::parse_from_rfc3339(end).ok()?;
                Some(TimeInterval::new(start, end, BUILTIN_TIME_ZONE))
            })
            .collect();
        Self::new(slots, CatalogSource::Builtin)
    }

    /// Load a catalog from a JSON array of `{start, end, timeZone}` objects.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read slot catalog {}", path.display()))?;
        let slots: Vec<TimeInterval> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse slot catalog {}", path.display()))?;

        for (idx, slot) in slots.iter().enumerate() {
            if !slot.is_real() {
                bail!(
                    "Slot {} in {} is empty or inverted ({} - {})",
                    idx,
                    path.display(),
                    slot.start,
                    slot.end
                );
            }
        }

        Ok(Self::new(slots, CatalogSource::File(path.to_path_buf())))
    }

    /// Load from `path` when given, otherwise fall back to the builtin set.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn slots(&self) -> &[TimeInterval] {
        &self.slots
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots lying entirely inside the window, in catalog order.
    pub fn within(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
    ) -> impl Iterator<Item = &TimeInterval> {
        self.slots
            .iter()
            .filter(move |slot| within_window(slot, window_start, window_end))
    }

    /// Slots sharing any instant with `candidate`, in catalog order.
    pub fn overlapping<'a>(
        &'a self,
        candidate: &'a TimeInterval,
    ) -> impl Iterator<Item = &'a TimeInterval> {
        self.slots.iter().filter(move |slot| overlaps(slot, candidate))
    }
}
