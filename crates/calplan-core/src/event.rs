//! Event types for calendar entries.
//!
//! This module provides the record types the store hands around:
//! - [`Event`]: a stored calendar entry with its store-assigned id
//! - [`EventDraft`]: the editable fields of an event, as submitted from a form
//! - [`RepeatInfo`] / [`RepeatType`]: the (unexpanded) recurrence rule
//! - [`Scheduled`]: the date/time accessors shared by both, used by the
//!   overlap and range helpers

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{parse_date, parse_time};

/// Categories offered by the event form.
pub const CATEGORIES: [&str; 4] = ["업무", "개인", "가족", "기타"];

/// Notification lead times offered by the event form, in minutes, with labels.
pub const NOTIFICATION_OPTIONS: [(u32, &str); 5] = [
    (1, "1분 전"),
    (10, "10분 전"),
    (60, "1시간 전"),
    (120, "2시간 전"),
    (1440, "1일 전"),
];

/// Lead time used when a draft does not specify one.
pub const DEFAULT_NOTIFICATION_MINUTES: u32 = 10;

/// Returns the form label for a notification lead time, if it is one of the offered options.
pub fn notification_label(minutes: u32) -> Option<&'static str> {
    NOTIFICATION_OPTIONS
        .iter()
        .find(|(m, _)| *m == minutes)
        .map(|(_, label)| *label)
}

/// How an event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatType {
    /// Unit suffix used in the "반복: N…마다" line. `None` has no unit.
    pub fn unit_label(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Daily => Some("일"),
            Self::Weekly => Some("주"),
            Self::Monthly => Some("월"),
            Self::Yearly => Some("년"),
        }
    }
}

impl std::str::FromStr for RepeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!(
                "unknown repeat type '{}', expected none, daily, weekly, monthly or yearly",
                other
            )),
        }
    }
}

/// Recurrence rule attached to an event.
///
/// Recurrences are stored and displayed but never expanded into instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatInfo {
    #[serde(rename = "type")]
    pub kind: RepeatType,
    pub interval: u32,
}

impl RepeatInfo {
    pub fn new(kind: RepeatType, interval: u32) -> Self {
        Self { kind, interval }
    }

    /// Returns true if the event repeats at all.
    pub fn is_repeating(&self) -> bool {
        self.kind != RepeatType::None
    }
}

/// Date/time accessors shared by stored events and unsaved drafts.
pub trait Scheduled {
    /// The store id, if the value has been persisted.
    fn event_id(&self) -> Option<&str>;
    /// Calendar date, `YYYY-MM-DD`.
    fn date_str(&self) -> &str;
    /// Start time of day, `HH:MM`.
    fn start_time_str(&self) -> &str;
    /// End time of day, `HH:MM`.
    fn end_time_str(&self) -> &str;
}

/// A calendar event as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: String,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub start_time: String,
    /// `HH:MM`, 24-hour.
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatInfo,
    /// Minutes before the start at which a notification fires.
    #[serde(default)]
    pub notification_time: u32,
}

impl Event {
    /// Creates an event with the required fields; the rest take their draft defaults.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        EventDraft::new(title, date, start_time, end_time).into_event(id)
    }

    /// Returns the editable fields of this event.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            repeat: self.repeat,
            notification_time: self.notification_time,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method to set the repeat rule.
    pub fn with_repeat(mut self, repeat: RepeatInfo) -> Self {
        self.repeat = repeat;
        self
    }

    /// Builder method to set the notification lead time.
    pub fn with_notification_time(mut self, minutes: u32) -> Self {
        self.notification_time = minutes;
        self
    }

    /// Returns true if `term` appears, ignoring case, in the title, description or location.
    ///
    /// An empty term matches every event.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        [&self.title, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl Scheduled for Event {
    fn event_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn date_str(&self) -> &str {
        &self.date
    }

    fn start_time_str(&self) -> &str {
        &self.start_time
    }

    fn end_time_str(&self) -> &str {
        &self.end_time
    }
}

/// The editable fields of an event, before the store assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatInfo,
    #[serde(default)]
    pub notification_time: u32,
}

impl EventDraft {
    /// Creates a draft with the required fields and the default lead time.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            notification_time: DEFAULT_NOTIFICATION_MINUTES,
            ..Default::default()
        }
    }

    /// Attaches an id, producing a stored event.
    pub fn into_event(self, id: impl Into<String>) -> Event {
        Event {
            id: id.into(),
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            category: self.category,
            repeat: self.repeat,
            notification_time: self.notification_time,
        }
    }

    /// Checks that the draft can be saved.
    ///
    /// Title, date, start and end time are required. Date and times must
    /// parse, and the start must come strictly before the end.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("date", &self.date),
            ("startTime", &self.start_time),
            ("endTime", &self.end_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired { fields: missing });
        }

        parse_date(&self.date).ok_or(ValidationError::Malformed { field: "date" })?;
        let start =
            parse_time(&self.start_time).ok_or(ValidationError::Malformed { field: "startTime" })?;
        let end =
            parse_time(&self.end_time).ok_or(ValidationError::Malformed { field: "endTime" })?;

        if start >= end {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok(())
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method to set the repeat rule.
    pub fn with_repeat(mut self, repeat: RepeatInfo) -> Self {
        self.repeat = repeat;
        self
    }

    /// Builder method to set the notification lead time.
    pub fn with_notification_time(mut self, minutes: u32) -> Self {
        self.notification_time = minutes;
        self
    }
}

impl Scheduled for EventDraft {
    fn event_id(&self) -> Option<&str> {
        None
    }

    fn date_str(&self) -> &str {
        &self.date
    }

    fn start_time_str(&self) -> &str {
        &self.start_time
    }

    fn end_time_str(&self) -> &str {
        &self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event::new("1", "팀 회의", "2024-10-15", "09:00", "10:00")
            .with_description("주간 팀 미팅")
            .with_location("회의실 A")
            .with_category("업무")
            .with_notification_time(1)
    }

    mod repeat {
        use super::*;

        #[test]
        fn parse_from_str() {
            assert_eq!("weekly".parse::<RepeatType>(), Ok(RepeatType::Weekly));
            assert_eq!("Daily".parse::<RepeatType>(), Ok(RepeatType::Daily));
            assert!("fortnightly".parse::<RepeatType>().is_err());
        }

        #[test]
        fn unit_labels() {
            assert_eq!(RepeatType::None.unit_label(), None);
            assert_eq!(RepeatType::Monthly.unit_label(), Some("월"));
        }

        #[test]
        fn serde_uses_type_key() {
            let repeat = RepeatInfo::new(RepeatType::Weekly, 2);
            let json = serde_json::to_value(repeat).unwrap();
            assert_eq!(json, serde_json::json!({ "type": "weekly", "interval": 2 }));
            assert!(repeat.is_repeating());
            assert!(!RepeatInfo::default().is_repeating());
        }
    }

    mod event {
        use super::*;

        #[test]
        fn json_shape_matches_store_file() {
            let event = Event::new("1", "Standup", "2024-10-15", "09:00", "10:00")
                .with_description("Weekly sync")
                .with_location("Room A")
                .with_category("work")
                .with_notification_time(1);
            insta::assert_json_snapshot!(event, @r#"
            {
              "id": "1",
              "title": "Standup",
              "date": "2024-10-15",
              "startTime": "09:00",
              "endTime": "10:00",
              "description": "Weekly sync",
              "location": "Room A",
              "category": "work",
              "repeat": {
                "type": "none",
                "interval": 0
              },
              "notificationTime": 1
            }
            "#);
        }

        #[test]
        fn optional_fields_default_when_missing() {
            let json = r#"{
                "id": "7",
                "title": "점심",
                "date": "2024-10-02",
                "startTime": "12:00",
                "endTime": "13:00"
            }"#;
            let event: Event = serde_json::from_str(json).unwrap();
            assert_eq!(event.description, "");
            assert_eq!(event.repeat, RepeatInfo::default());
            assert_eq!(event.notification_time, 0);
        }

        #[test]
        fn search_is_case_insensitive_across_fields() {
            let event = Event::new("5", "EVENT 1", "2025-02-11", "14:30", "15:30")
                .with_location("Room B");
            assert!(event.matches_search("event 1"));
            assert!(event.matches_search("room b"));
            assert!(event.matches_search(""));
            assert!(!event.matches_search("event 2"));
        }

        #[test]
        fn draft_roundtrip_keeps_fields() {
            let event = sample_event();
            let again = event.to_draft().into_event(event.id.clone());
            assert_eq!(event, again);
        }

        #[test]
        fn scheduled_accessors() {
            let event = sample_event();
            assert_eq!(event.event_id(), Some("1"));
            assert_eq!(event.date_str(), "2024-10-15");
            assert_eq!(event.to_draft().event_id(), None);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn valid_draft_passes() {
            let draft = EventDraft::new("테스트 일정", "2024-10-01", "10:00", "11:00");
            assert_eq!(draft.validate(), Ok(()));
            assert_eq!(draft.notification_time, DEFAULT_NOTIFICATION_MINUTES);
        }

        #[test]
        fn missing_fields_are_listed() {
            let draft = EventDraft::new("", "2024-10-01", "", "11:00");
            let err = draft.validate().unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingRequired {
                    fields: vec!["title", "startTime"]
                }
            );
            assert_eq!(err.to_string(), "필수 정보를 모두 입력해주세요.");
        }

        #[test]
        fn start_after_end_is_rejected() {
            let draft = EventDraft::new("회의", "2024-10-01", "11:00", "10:00");
            let err = draft.validate().unwrap_err();
            assert_eq!(err.to_string(), "시간 설정을 확인해주세요.");
            assert_eq!(
                err.start_time_message(),
                Some("시작 시간은 종료 시간보다 빨라야 합니다.")
            );
            assert_eq!(
                err.end_time_message(),
                Some("종료 시간은 시작 시간보다 늦어야 합니다.")
            );
        }

        #[test]
        fn equal_start_and_end_is_rejected() {
            let draft = EventDraft::new("회의", "2024-10-01", "10:00", "10:00");
            assert!(matches!(
                draft.validate(),
                Err(ValidationError::InvalidTimeRange { .. })
            ));
        }

        #[test]
        fn malformed_time_is_rejected() {
            let draft = EventDraft::new("회의", "2024-10-01", "25:00", "26:00");
            assert_eq!(
                draft.validate(),
                Err(ValidationError::Malformed { field: "startTime" })
            );
        }

        #[test]
        fn malformed_date_is_rejected() {
            let draft = EventDraft::new("회의", "2024-13-01", "10:00", "11:00");
            let err = draft.validate().unwrap_err();
            assert_eq!(err, ValidationError::Malformed { field: "date" });
            assert_eq!(err.to_string(), "날짜 또는 시간 형식이 올바르지 않습니다: date");
        }

        #[test]
        fn malformed_end_time_names_end() {
            let draft = EventDraft::new("회의", "2024-10-01", "10:00", "10:60");
            assert_eq!(
                draft.validate(),
                Err(ValidationError::Malformed { field: "endTime" })
            );
        }
    }

    #[test]
    fn notification_labels() {
        assert_eq!(notification_label(10), Some("10분 전"));
        assert_eq!(notification_label(1440), Some("1일 전"));
        assert_eq!(notification_label(7), None);
    }
}
