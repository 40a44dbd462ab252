//! Public types for the meetings API
//!
//! Incoming fields are all optional at the serde level so that missing
//! values come back as field errors instead of a generic rejection.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::api::public::ApiError;
use crate::api::utils::Validator;
use crate::scheduling::{Attendee, CalendarEvent, EventDateTime};

pub use crate::scheduling::{ScheduleResponse, TimeInterval};

// Availability

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub time_zone: Option<String>,
    pub calendar_id: Option<String>,
}

#[derive(Debug)]
pub struct AvailabilityParams {
    pub window_start: DateTime<FixedOffset>,
    pub window_end: DateTime<FixedOffset>,
    pub time_zone: String,
    pub calendar_id: String,
}

impl AvailabilityQuery {
    pub fn validate(self) -> Result<AvailabilityParams, ApiError> {
        let mut v = Validator::new();
        let window_start = v.datetime("startDateTime", self.start_date_time);
        let window_end = v.datetime("endDateTime", self.end_date_time);
        v.window("endDateTime", window_start, window_end);
        let time_zone = v.non_empty("timeZone", self.time_zone);
        let calendar_id = v.non_empty("calendarId", self.calendar_id);

        match (window_start, window_end, time_zone, calendar_id) {
            (Some(window_start), Some(window_end), Some(time_zone), Some(calendar_id))
                if v.is_valid() =>
            {
                Ok(AvailabilityParams {
                    window_start,
                    window_end,
                    time_zone,
                    calendar_id,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

// Host and user meetings

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMeetingsQuery {
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub calendar_id: Option<String>,
}

#[derive(Debug)]
pub struct HostMeetingsParams {
    pub window_start: DateTime<FixedOffset>,
    pub window_end: DateTime<FixedOffset>,
    pub calendar_id: String,
}

impl HostMeetingsQuery {
    pub fn validate(self) -> Result<HostMeetingsParams, ApiError> {
        let mut v = Validator::new();
        let window_start = v.datetime("startDateTime", self.start_date_time);
        let window_end = v.datetime("endDateTime", self.end_date_time);
        v.window("endDateTime", window_start, window_end);
        let calendar_id = v.non_empty("calendarId", self.calendar_id);

        match (window_start, window_end, calendar_id) {
            (Some(window_start), Some(window_end), Some(calendar_id)) if v.is_valid() => {
                Ok(HostMeetingsParams {
                    window_start,
                    window_end,
                    calendar_id,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMeetingsQuery {
    pub email: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub calendar_id: Option<String>,
}

#[derive(Debug)]
pub struct UserMeetingsParams {
    pub email: String,
    pub window_start: DateTime<FixedOffset>,
    pub window_end: DateTime<FixedOffset>,
    pub calendar_id: String,
}

impl UserMeetingsQuery {
    pub fn validate(self) -> Result<UserMeetingsParams, ApiError> {
        let mut v = Validator::new();
        let email = v.email("email", self.email);
        let window_start = v.datetime("startDateTime", self.start_date_time);
        let window_end = v.datetime("endDateTime", self.end_date_time);
        v.window("endDateTime", window_start, window_end);
        let calendar_id = v.non_empty("calendarId", self.calendar_id);

        match (email, window_start, window_end, calendar_id) {
            (Some(email), Some(window_start), Some(window_end), Some(calendar_id))
                if v.is_valid() =>
            {
                Ok(UserMeetingsParams {
                    email,
                    window_start,
                    window_end,
                    calendar_id,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

// Schedule

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTimeBody {
    pub date_time: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeBody {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventTimeBody>,
    pub end: Option<EventTimeBody>,
    pub time_zone: Option<String>,
    pub attendees: Option<Vec<AttendeeBody>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub event: Option<EventBody>,
    pub calendar_id: Option<String>,
}

#[derive(Debug)]
pub struct ScheduleParams {
    pub event: CalendarEvent,
    pub calendar_id: String,
}

fn event_time(v: &mut Validator, field: &str, body: Option<EventTimeBody>) -> Option<EventDateTime> {
    let body = v.present(field, body)?;
    let date_time = v.datetime(&format!("{}.dateTime", field), body.date_time);
    let time_zone = v.non_empty(&format!("{}.timeZone", field), body.time_zone);
    Some(EventDateTime {
        date_time: date_time?,
        time_zone: time_zone?,
    })
}

fn attendees(v: &mut Validator, body: Option<Vec<AttendeeBody>>) -> Option<Vec<Attendee>> {
    let body = v.present("event.attendees", body)?;
    let mut attendees = Vec::with_capacity(body.len());
    for (idx, attendee) in body.into_iter().enumerate() {
        let email = v.email(&format!("event.attendees[{}].email", idx), attendee.email);
        let display_name = v.present(
            &format!("event.attendees[{}].displayName", idx),
            attendee.display_name,
        );
        if let (Some(email), Some(display_name)) = (email, display_name) {
            attendees.push(Attendee {
                email,
                display_name,
            });
        }
    }
    Some(attendees)
}

impl ScheduleRequest {
    /// Window ordering is not checked here: an empty or inverted booking is
    /// a scheduling outcome, not a malformed request.
    pub fn validate(self) -> Result<ScheduleParams, ApiError> {
        let mut v = Validator::new();
        let calendar_id = v.non_empty("calendarId", self.calendar_id);
        let Some(event) = v.present("event", self.event) else {
            return Err(v.into_error());
        };

        let summary = v.present("event.summary", event.summary);
        let description = v.present("event.description", event.description);
        let start = event_time(&mut v, "event.start", event.start);
        let end = event_time(&mut v, "event.end", event.end);
        let time_zone = v.non_empty("event.timeZone", event.time_zone);
        let attendees = attendees(&mut v, event.attendees);

        match (summary, description, start, end, time_zone, attendees, calendar_id) {
            (
                Some(summary),
                Some(description),
                Some(start),
                Some(end),
                Some(time_zone),
                Some(attendees),
                Some(calendar_id),
            ) if v.is_valid() => Ok(ScheduleParams {
                event: CalendarEvent {
                    summary,
                    description,
                    start,
                    end,
                    time_zone,
                    attendees,
                },
                calendar_id,
            }),
            _ => Err(v.into_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::public::FieldError;

    fn field_errors(err: ApiError) -> Vec<FieldError> {
        match err {
            ApiError::ValidationFailed(errors) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_availability_query_reports_every_field() {
        let errors = field_errors(AvailabilityQuery::default().validate().unwrap_err());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["startDateTime", "endDateTime", "timeZone", "calendarId"]
        );
    }

    #[test]
    fn test_availability_query_rejects_inverted_window() {
        let query = AvailabilityQuery {
            start_date_time: Some("2023-04-12T00:00:00+05:30".into()),
            end_date_time: Some("2023-04-11T00:00:00+05:30".into()),
            time_zone: Some("Asia/Kolkata".into()),
            calendar_id: Some("primary".into()),
        };
        let errors = field_errors(query.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endDateTime");
    }

    #[test]
    fn test_schedule_request_nested_fields() {
        let request: ScheduleRequest = serde_json::from_value(serde_json::json!({
            "calendarId": "primary",
            "event": {
                "summary": "Intro",
                "description": "",
                "start": {"dateTime": "2023-04-11T18:30:00", "timeZone": "Asia/Kolkata"},
                "end": {"dateTime": "2023-04-11T19:30:00+05:30"},
                "timeZone": "Asia/Kolkata",
                "attendees": [{"email": "nope", "displayName": "Guest"}]
            }
        }))
        .unwrap();
        let errors = field_errors(request.validate().unwrap_err());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "event.start.dateTime",
                "event.end.timeZone",
                "event.attendees[0].email"
            ]
        );
    }

    #[test]
    fn test_schedule_request_valid() {
        let request: ScheduleRequest = serde_json::from_value(serde_json::json!({
            "calendarId": "primary",
            "event": {
                "summary": "Intro",
                "description": "First call",
                "start": {"dateTime": "2023-04-11T18:30:00+05:30", "timeZone": "Asia/Kolkata"},
                "end": {"dateTime": "2023-04-11T19:30:00+05:30", "timeZone": "Asia/Kolkata"},
                "timeZone": "Asia/Kolkata",
                "attendees": [{"email": "guest@example.com", "displayName": "Guest"}]
            }
        }))
        .unwrap();
        let params = request.validate().unwrap();
        assert_eq!(params.calendar_id, "primary");
        assert_eq!(params.event.attendees.len(), 1);
        assert_eq!(
            params.event.interval().end,
            DateTime::parse_from_rfc3339("2023-04-11T19:30:00+05:30").unwrap()
        );
    }
}
