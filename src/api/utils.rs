//! Request validation helpers.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::api::public::{ApiError, FieldError};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const DATETIME_HINT: &str =
    "Invalid datetime string! Must include a UTC offset. For e.g. 2023-04-13T16:30:00+05:30";

/// Collects field errors so a request reports every problem at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> ApiError {
        ApiError::ValidationFailed(self.errors)
    }

    /// The field must be present. Empty strings are allowed.
    pub fn present<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.error(field, format!("{} is required", field));
        }
        value
    }

    /// The field must be present and not blank.
    pub fn non_empty(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            Some(_) => {
                self.error(field, format!("{} must not be empty", field));
                None
            }
            None => {
                self.error(field, format!("{} is required", field));
                None
            }
        }
    }

    /// An RFC 3339 timestamp with an explicit offset.
    pub fn datetime(
        &mut self,
        field: &str,
        value: Option<String>,
    ) -> Option<DateTime<FixedOffset>> {
        let value = self.present(field, value)?;
        match DateTime::parse_from_rfc3339(value.trim()) {
            Ok(dt) => Some(dt),
            Err(_) => {
                self.error(field, DATETIME_HINT);
                None
            }
        }
    }

    pub fn email(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = self.present(field, value)?;
        let value = value.trim().to_string();
        if EMAIL_RE.is_match(&value) {
            Some(value)
        } else {
            self.error(field, "Invalid email string!");
            None
        }
    }

    /// When both ends parsed, the window must have positive length.
    pub fn window(
        &mut self,
        end_field: &str,
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) {
        if let (Some(start), Some(end)) = (start, end)
            && start >= end
        {
            self.error(end_field, format!("{} must be after the start", end_field));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_requires_offset() {
        let mut v = Validator::new();
        assert!(
            v.datetime("startDateTime", Some("2023-04-13T16:30:00+05:30".into()))
                .is_some()
        );
        assert!(
            v.datetime("startDateTime", Some("2023-04-13T11:00:00Z".into()))
                .is_some()
        );
        assert!(v.is_valid());

        assert!(
            v.datetime("startDateTime", Some("2023-04-13T16:30:00".into()))
                .is_none()
        );
        assert!(v.datetime("endDateTime", Some("tomorrow".into())).is_none());
        assert!(v.datetime("endDateTime", None).is_none());
        assert_eq!(v.errors.len(), 3);
    }

    #[test]
    fn test_email() {
        let mut v = Validator::new();
        assert_eq!(
            v.email("email", Some("guest@example.com".into())).as_deref(),
            Some("guest@example.com")
        );
        assert!(v.email("email", Some("guest@".into())).is_none());
        assert!(v.email("email", Some("not an email".into())).is_none());
        assert_eq!(v.errors.len(), 2);
        assert_eq!(v.errors[0].message, "Invalid email string!");
    }

    #[test]
    fn test_non_empty() {
        let mut v = Validator::new();
        assert!(v.non_empty("calendarId", Some("primary".into())).is_some());
        assert!(v.non_empty("calendarId", Some("  ".into())).is_none());
        assert!(v.non_empty("timeZone", None).is_none());
        assert_eq!(
            v.errors,
            vec![
                FieldError::new("calendarId", "calendarId must not be empty"),
                FieldError::new("timeZone", "timeZone is required"),
            ]
        );
    }

    #[test]
    fn test_window_must_be_positive() {
        let mut v = Validator::new();
        let start = DateTime::parse_from_rfc3339("2023-04-13T16:30:00+05:30").ok();
        let same_instant = DateTime::parse_from_rfc3339("2023-04-13T11:00:00Z").ok();
        v.window("endDateTime", start, same_instant);
        assert!(!v.is_valid());
    }
}
