//! Notification timing for upcoming events.
//!
//! This module decides which events are due for a reminder. It does not send
//! anything and owns no timer: the caller ticks [`NotificationScheduler`] on
//! its own cadence and delivers the returned [`Notification`]s however it
//! likes.
//!
//! An event is due at `now` when `now` falls in
//! `[start - notificationTime minutes, start)`. Each event id fires at most
//! once per scheduler (one scheduler = one session).

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::event::Event;
use crate::time::{parse_date_time, DateRange};

/// Formats the reminder text for an event.
pub fn create_notification_message(event: &Event) -> String {
    format!(
        "{}분 후 {} 일정이 시작됩니다.",
        event.notification_time, event.title
    )
}

/// Returns the window during which the event's reminder is due.
///
/// `None` if the event's start does not parse.
pub fn notification_window(event: &Event) -> Option<DateRange> {
    let start = parse_date_time(&event.date, &event.start_time)?;
    let opens = start - Duration::minutes(i64::from(event.notification_time));
    Some(DateRange::new(Some(opens), Some(start)))
}

/// Returns true if the event's reminder window contains `now`.
pub fn is_due(event: &Event, now: NaiveDateTime) -> bool {
    notification_window(event).is_some_and(|window| window.contains(now))
}

/// Returns the events due at `now` whose ids are not in `notified`.
///
/// Input order is preserved.
pub fn get_upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    notified: &HashSet<String>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| !notified.contains(&event.id) && is_due(event, now))
        .collect()
}

/// A reminder ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Id of the event the reminder is for.
    pub id: String,
    /// The event title.
    pub title: String,
    /// Text to display.
    pub message: String,
    /// When the event starts.
    pub starts_at: NaiveDateTime,
}

/// Session-scoped reminder state.
///
/// Tracks which event ids have already produced a notification so that an
/// event is announced at most once, even if the clock later moves backwards.
/// Create a new scheduler (or call [`reset`](Self::reset)) to start a new
/// session.
#[derive(Debug, Default)]
pub struct NotificationScheduler {
    notified: HashSet<String>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the notifications due at `now` and marks their events as notified.
    pub fn tick(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<Notification> {
        let due: Vec<Notification> = get_upcoming_events(events, now, &self.notified)
            .into_iter()
            .filter_map(|event| {
                let starts_at = parse_date_time(&event.date, &event.start_time)?;
                Some(Notification {
                    id: event.id.clone(),
                    title: event.title.clone(),
                    message: create_notification_message(event),
                    starts_at,
                })
            })
            .collect();

        for notification in &due {
            info!(
                id = %notification.id,
                title = %notification.title,
                starts_at = %notification.starts_at,
                "Event notification due"
            );
            self.notified.insert(notification.id.clone());
        }

        due
    }

    /// Returns true if the event id has already been announced this session.
    pub fn is_notified(&self, id: &str) -> bool {
        self.notified.contains(id)
    }

    /// Ids announced so far this session.
    pub fn notified_ids(&self) -> &HashSet<String> {
        &self.notified
    }

    /// Starts a new session, forgetting every announced id.
    pub fn reset(&mut self) {
        debug!(count = self.notified.len(), "Resetting notified events");
        self.notified.clear();
    }
}
