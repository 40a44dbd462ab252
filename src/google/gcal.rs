//! Google Calendar v3 events API, bound to one access token.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::scheduling::{Attendee, CalendarEvent, CalendarProvider, ProviderEvent};

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GcalDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcalAttendee {
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcalEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub start: GcalDateTime,
    #[serde(default)]
    pub end: GcalDateTime,
    pub attendees: Option<Vec<GcalAttendee>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub items: Option<Vec<GcalEvent>>,
    pub next_page_token: Option<String>,
}

impl From<&CalendarEvent> for GcalEvent {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: None,
            summary: Some(event.summary.clone()),
            description: Some(event.description.clone()),
            start: GcalDateTime {
                date_time: Some(event.start.date_time),
                date: None,
                time_zone: Some(event.start.time_zone.clone()),
            },
            end: GcalDateTime {
                date_time: Some(event.end.date_time),
                date: None,
                time_zone: Some(event.end.time_zone.clone()),
            },
            attendees: Some(
                event
                    .attendees
                    .iter()
                    .map(|a| GcalAttendee {
                        email: Some(a.email.clone()),
                        display_name: Some(a.display_name.clone()),
                    })
                    .collect(),
            ),
        }
    }
}

impl From<GcalEvent> for ProviderEvent {
    fn from(event: GcalEvent) -> Self {
        let attendees = event
            .attendees
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| {
                Some(Attendee {
                    email: a.email?,
                    display_name: a.display_name.unwrap_or_default(),
                })
            })
            .collect();

        Self {
            id: event.id.unwrap_or_default(),
            summary: event.summary,
            description: event.description,
            start: event.start.date_time,
            end: event.end.date_time,
            attendees,
        }
    }
}

/// Calendar client scoped to a single access token.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    http: Client,
    api_url: String,
    access_token: String,
}

impl GoogleCalendar {
    pub fn new(http: Client, api_url: &str, access_token: String) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_url,
            urlencoding::encode(calendar_id)
        )
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    /// Follows `nextPageToken` until every page has been read.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<ProviderEvent>> {
        let url = self.events_url(calendar_id);
        let time_min = time_min.to_rfc3339();
        let time_max = time_max.to_rfc3339();
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let res = self
                .http
                .get(&url)
                .query(&query)
                .bearer_auth(&self.access_token)
                .send()
                .await?;
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            if !status.is_success() {
                anyhow::bail!("Event list failed: {} ({})", status, text);
            }

            let page: ListEventsResponse = serde_json::from_str(&text)?;
            events.extend(
                page.items
                    .unwrap_or_default()
                    .into_iter()
                    .map(ProviderEvent::from),
            );

            match page.next_page_token {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    tracing::warn!("Calendar {} repeated page token {}", calendar_id, token);
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(events)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<ProviderEvent> {
        let res = self
            .http
            .post(self.events_url(calendar_id))
            .bearer_auth(&self.access_token)
            .json(&GcalEvent::from(event))
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Event insert failed: {} ({})", status, text);
        }
        let created: GcalEvent = serde_json::from_str(&text)?;
        Ok(ProviderEvent::from(created))
    }
}
