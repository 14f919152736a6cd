//! Date and time parsing for calendar events.
//!
//! Event records carry their date and times as plain strings (`YYYY-MM-DD`,
//! `HH:MM`). This module turns them into local wall-clock values:
//! [`parse_date_time`] for a single instant and [`DateRange`] for an event's
//! start/end pair.
//!
//! Malformed input never panics or errors. It yields `None`, which every
//! downstream helper treats as "not a valid instant".

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::Scheduled;

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("Invalid time regex"));

/// Parses a `YYYY-MM-DD` date string.
///
/// Returns `None` unless the string has exactly that shape and names a real
/// calendar day.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if !DATE_REGEX.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Parses an `HH:MM` 24-hour time string.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    if !TIME_REGEX.is_match(time) {
        return None;
    }
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// Combines a date and a time string into a local instant with zero seconds.
///
/// Returns `None` if either part is empty, malformed or out of range.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// The start/end pair of an event.
///
/// Either endpoint is `None` when the underlying strings did not parse.
/// Valid ranges are read as half-open intervals `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Returns true if both endpoints parsed.
    pub fn is_valid(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Returns both endpoints, or `None` if either is invalid.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start?, self.end?))
    }

    /// Checks if an instant falls within `[start, end)`.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| start <= dt && dt < end)
    }

    /// Checks if two ranges intersect.
    ///
    /// Touching endpoints do not count, and an invalid range overlaps nothing.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((a_start, a_end)), Some((b_start, b_end))) => a_start < b_end && b_start < a_end,
            _ => false,
        }
    }
}

/// Computes the start/end instants of an event or draft.
pub fn convert_event_to_date_range<E: Scheduled + ?Sized>(event: &E) -> DateRange {
    DateRange::new(
        parse_date_time(event.date_str(), event.start_time_str()),
        parse_date_time(event.date_str(), event.end_time_str()),
    )
}
