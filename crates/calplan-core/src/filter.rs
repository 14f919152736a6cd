//! Event filtering for the week and month listings.
//!
//! Filtering is a stable two-step pass: a free-text search, then a date
//! window around a reference day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{is_date_in_range, week_start};
use crate::event::Event;
use crate::time::parse_date;

/// Which date window the listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The Sunday-to-Saturday week containing the reference date.
    Week,
    /// The calendar month containing the reference date.
    #[default]
    Month,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Returns true if `date` falls in this view's window around `reference`.
    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Self::Week => {
                let start = week_start(reference);
                is_date_in_range(date, start, start + Duration::days(6))
            }
            Self::Month => date.year() == reference.year() && date.month() == reference.month(),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown view '{}', expected week or month", other)),
        }
    }
}

/// Keeps the events matching `term` (see [`Event::matches_search`]).
pub fn search_events<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.matches_search(term)).collect()
}

/// Keeps the events dated inside the view window around `reference`.
///
/// Events whose date does not parse are dropped.
pub fn filter_events_by_view<'a, I>(events: I, reference: NaiveDate, view: ViewMode) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| parse_date(&e.date).is_some_and(|date| view.contains(date, reference)))
        .collect()
}

/// Applies the search term, then the view window. Input order is preserved.
pub fn get_filtered_events<'a>(
    events: &'a [Event],
    search_term: &str,
    reference: NaiveDate,
    view: ViewMode,
) -> Vec<&'a Event> {
    filter_events_by_view(search_events(events, search_term), reference, view)
}
