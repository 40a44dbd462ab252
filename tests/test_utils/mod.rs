//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use axum::{Router, body::Body};
use chrono::{DateTime, FixedOffset};
use tokio_rusqlite::Connection;

use slotbook::api::{AppState, app};
use slotbook::core::db::initialize_db;
use slotbook::core::{AppConfig, DEFAULT_GOOGLE_AUTH_URL};
use slotbook::google::credentials::{HOST_ACCOUNT_ID, save_refresh_token};
use slotbook::scheduling::{
    Attendee, CalendarEvent, CalendarProvider, EventDateTime, ProviderEvent, SlotCatalog,
    TimeInterval,
};

pub const ZONE: &str = "Asia/Kolkata";

pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn interval(start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(at(start), at(end), ZONE)
}

pub fn catalog(slots: &[(&str, &str)]) -> SlotCatalog {
    SlotCatalog::inline(slots.iter().map(|(s, e)| interval(s, e)).collect())
}

pub fn booking(start: &str, end: &str) -> CalendarEvent {
    CalendarEvent {
        summary: String::from("Intro call"),
        description: String::from("Let's meet"),
        start: EventDateTime {
            date_time: at(start),
            time_zone: ZONE.to_string(),
        },
        end: EventDateTime {
            date_time: at(end),
            time_zone: ZONE.to_string(),
        },
        time_zone: ZONE.to_string(),
        attendees: vec![Attendee {
            email: String::from("guest@example.com"),
            display_name: String::from("Guest"),
        }],
    }
}

pub fn event(id: &str, start: &str, end: &str, attendees: &[&str]) -> ProviderEvent {
    ProviderEvent {
        id: id.to_string(),
        summary: Some(format!("Event {}", id)),
        description: None,
        start: Some(at(start)),
        end: Some(at(end)),
        attendees: attendees
            .iter()
            .map(|email| Attendee {
                email: email.to_string(),
                display_name: String::new(),
            })
            .collect(),
    }
}

#[derive(Default)]
struct FakeState {
    events: Vec<ProviderEvent>,
    list_calls: usize,
    inserted: usize,
    fail_list: bool,
    fail_insert: bool,
    insert_delay: Option<Duration>,
}

/// In-memory calendar. Clones share the same events so concurrent
/// schedulers see each other's writes.
#[derive(Clone, Default)]
pub struct FakeCalendar {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCalendar {
    pub fn with_events(events: Vec<ProviderEvent>) -> Self {
        let calendar = Self::default();
        calendar.state.lock().unwrap().events = events;
        calendar
    }

    pub fn failing_list(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    pub fn failing_insert(self) -> Self {
        self.state.lock().unwrap().fail_insert = true;
        self
    }

    pub fn slow_insert(self, delay: Duration) -> Self {
        self.state.lock().unwrap().insert_delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn inserted(&self) -> usize {
        self.state.lock().unwrap().inserted
    }
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<ProviderEvent>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if state.fail_list {
            bail!("calendar unreachable");
        }
        let mut events: Vec<ProviderEvent> = state
            .events
            .iter()
            .filter(|e| match (e.start, e.end) {
                (Some(start), Some(end)) => start <= time_max && end >= time_min,
                _ => true,
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start);
        Ok(events)
    }

    async fn insert_event(
        &self,
        _calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<ProviderEvent> {
        let delay = self.state.lock().unwrap().insert_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if state.fail_insert {
            bail!("write rejected");
        }
        state.inserted += 1;
        let created = ProviderEvent {
            id: format!("created_{}", state.inserted),
            summary: Some(event.summary.clone()),
            description: Some(event.description.clone()),
            start: Some(event.start.date_time),
            end: Some(event.end.date_time),
            attendees: event.attendees.clone(),
        };
        state.events.push(created.clone());
        Ok(created)
    }
}

/// Creates a test application router backed by an in-memory db, with all
/// Google endpoints pointed at `google_base_url`.
pub async fn test_app(google_base_url: &str, catalog: SlotCatalog) -> (Router, Connection) {
    let db = Connection::open_in_memory()
        .await
        .expect("Failed to open in-memory db");
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await
    .expect("Failed to migrate db");

    let app_config = AppConfig {
        storage_path: String::from("./"),
        google_client_id: String::from("test_client_id"),
        google_client_secret: String::from("test_client_secret"),
        google_redirect_uri: String::from("http://localhost:3000/oauth2callback"),
        google_auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
        google_token_url: format!("{}/token", google_base_url),
        google_calendar_api_url: google_base_url.to_string(),
        http_timeout_secs: 5,
        slot_catalog_path: None,
    };
    let app_state = AppState::new(db.clone(), app_config, catalog).unwrap();
    (app(Arc::new(app_state)), db)
}

/// Store a refresh token as if the host had completed the OAuth flow.
pub async fn authorize(db: &Connection) {
    save_refresh_token(db, HOST_ACCOUNT_ID, "test_refresh_token")
        .await
        .unwrap();
}

/// Mock the token endpoint to hand out an access token for any refresh.
pub async fn mock_token(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .match_body(mockito::Matcher::UrlEncoded(
            "grant_type".into(),
            "refresh_token".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "test_access_token", "expires_in": 3599, "token_type": "Bearer"}"#)
        .create_async()
        .await
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
