//! Output formatting for events.
//!
//! This module renders events for the terminal front-end:
//! - **Event list**: one text block per event, as in the sidebar list
//! - **Week / month grids**: a plain-text calendar with holiday and event markers
//! - **JSON**: the same `{ "events": [...] }` shape the store file uses
//!
//! Grid cells carry a one-character marker after the day number:
//! `*` holiday, `+` events, `#` both.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    format_date, format_month, format_week, month_weeks, week_dates, weekday_label,
};
use crate::event::{notification_label, Event};

const WEEKDAY_HEADERS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for event titles in grids (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Prefix for the title of an event that has already notified.
    pub notified_marker: String,
    /// Text shown when a list has no events.
    pub empty_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: Some(20),
            notified_marker: "🔔".to_string(),
            empty_text: "검색 결과가 없습니다.".to_string(),
        }
    }
}

/// JSON listing of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOutput {
    pub events: Vec<Event>,
}

/// Marker for a day cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayMarker {
    None,
    Holiday,
    Events,
    Both,
}

impl DayMarker {
    fn for_day(is_holiday: bool, has_events: bool) -> Self {
        match (is_holiday, has_events) {
            (true, true) => Self::Both,
            (true, false) => Self::Holiday,
            (false, true) => Self::Events,
            (false, false) => Self::None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Self::None => ' ',
            Self::Holiday => '*',
            Self::Events => '+',
            Self::Both => '#',
        }
    }
}

/// Event formatter.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats a single event as a block of lines.
    ///
    /// Empty description and location lines are omitted.
    pub fn format_event(&self, event: &Event, notified: bool) -> String {
        let mut lines = Vec::with_capacity(8);

        let title = format!("[{}] {}", event.id, event.title);
        if notified {
            lines.push(format!("{} {}", self.options.notified_marker, title));
        } else {
            lines.push(title);
        }
        lines.push(event.date.clone());
        lines.push(format!("{} - {}", event.start_time, event.end_time));
        if !event.description.is_empty() {
            lines.push(event.description.clone());
        }
        if !event.location.is_empty() {
            lines.push(event.location.clone());
        }
        lines.push(format!("카테고리: {}", event.category));
        if let Some(unit) = event.repeat.kind.unit_label() {
            lines.push(format!("반복: {}{}마다", event.repeat.interval, unit));
        }
        lines.push(format!("알림: {}", lead_time_label(event.notification_time)));

        lines.join("\n")
    }

    /// Formats a list of events separated by blank lines.
    pub fn format_event_list(&self, events: &[&Event], notified: &HashSet<String>) -> String {
        if events.is_empty() {
            return self.options.empty_text.clone();
        }
        events
            .iter()
            .map(|event| self.format_event(event, notified.contains(&event.id)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders the month containing `reference` as a grid followed by an agenda.
    ///
    /// `holidays` is keyed by `YYYY-MM-DD`. Events outside the month are ignored.
    pub fn format_month_grid(
        &self,
        reference: NaiveDate,
        events: &[&Event],
        holidays: &BTreeMap<String, String>,
    ) -> String {
        let mut lines = vec![format_month(reference), weekday_header()];

        let mut agenda = Vec::new();
        for week in month_weeks(reference) {
            let mut row = String::new();
            for cell in week {
                let Some(day) = cell else {
                    row.push_str("    ");
                    continue;
                };
                let Some(date) = reference.with_day(day) else {
                    continue;
                };
                let key = format_date(date);
                let holiday = holidays.get(&key);
                let day_events = events_on(events, &key);

                let marker = DayMarker::for_day(holiday.is_some(), !day_events.is_empty());
                row.push_str(&format!("{:>3}{}", day, marker.as_char()));

                let short = date.format("%m-%d");
                if let Some(name) = holiday {
                    agenda.push(format!("{} * {}", short, name));
                }
                for event in day_events {
                    agenda.push(format!(
                        "{} + {}-{} {}",
                        short,
                        event.start_time,
                        event.end_time,
                        self.title(event)
                    ));
                }
            }
            lines.push(row.trim_end().to_string());
        }

        if !agenda.is_empty() {
            lines.push(String::new());
            lines.extend(agenda);
        }
        lines.join("\n")
    }

    /// Renders the Sunday-first week containing `reference`, one line per day
    /// followed by that day's events.
    pub fn format_week_grid(
        &self,
        reference: NaiveDate,
        events: &[&Event],
        holidays: &BTreeMap<String, String>,
    ) -> String {
        let mut lines = vec![format_week(reference)];

        for date in week_dates(reference) {
            let key = format_date(date);
            let mut line = format!("{} ({})", date.format("%m-%d"), weekday_label(date));
            if let Some(name) = holidays.get(&key) {
                line.push_str(&format!(" * {}", name));
            }
            lines.push(line);

            for event in events_on(events, &key) {
                lines.push(format!(
                    "  {}-{} {}",
                    event.start_time,
                    event.end_time,
                    self.title(event)
                ));
            }
        }
        lines.join("\n")
    }

    /// Builds the JSON listing.
    pub fn format_json(&self, events: &[&Event]) -> JsonOutput {
        JsonOutput {
            events: events.iter().map(|e| (*e).clone()).collect(),
        }
    }

    fn title<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self.options.max_title_length {
            Some(max) => ellipsis(&event.title, max),
            None => Cow::Borrowed(&event.title),
        }
    }
}

fn weekday_header() -> String {
    WEEKDAY_HEADERS
        .iter()
        .map(|label| format!("{:>3} ", label))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn events_on<'a>(events: &[&'a Event], key: &str) -> Vec<&'a Event> {
    events.iter().copied().filter(|e| e.date == key).collect()
}

/// Label for a notification lead time, falling back to `N분 전`.
pub fn lead_time_label(minutes: u32) -> Cow<'static, str> {
    match notification_label(minutes) {
        Some(label) => Cow::Borrowed(label),
        None => Cow::Owned(format!("{}분 전", minutes)),
    }
}

/// Truncates a string with ellipsis if it exceeds the given length in characters.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipsis_counts_characters() {
        assert_eq!(ellipsis("짧은 제목", 10), "짧은 제목");
        assert_eq!(ellipsis("아주 아주 긴 회의 제목입니다", 8), "아주 아주...");
        assert_eq!(ellipsis("anything", 0), "");
    }

    #[test]
    fn lead_time_labels() {
        assert_eq!(lead_time_label(60), "1시간 전");
        assert_eq!(lead_time_label(15), "15분 전");
    }

    #[test]
    fn weekday_header_layout() {
        assert_eq!(weekday_header(), "  일   월   화   수   목   금   토");
    }

    #[test]
    fn output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
