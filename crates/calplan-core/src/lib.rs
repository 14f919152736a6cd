//! Core types: events, time parsing, overlap, filters, holidays, notifications

pub mod calendar;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod holidays;
pub mod logging;
pub mod notification;
pub mod overlap;
pub mod time;

pub use calendar::{
    days_in_month, format_date, format_month, format_week, is_date_in_range, month_weeks,
    week_dates, week_start,
};
pub use error::ValidationError;
pub use event::{
    CATEGORIES, DEFAULT_NOTIFICATION_MINUTES, Event, EventDraft, NOTIFICATION_OPTIONS, RepeatInfo,
    RepeatType, Scheduled, notification_label,
};
pub use filter::{ViewMode, filter_events_by_view, get_filtered_events, search_events};
pub use format::{FormatOptions, JsonOutput, OutputFormat, OutputFormatter, ellipsis};
pub use holidays::fetch_holidays;
pub use logging::{LogConfig, LogFormat, LoggingError, init_logging};
pub use notification::{
    Notification, NotificationScheduler, create_notification_message, get_upcoming_events,
    is_due, notification_window,
};
pub use overlap::{find_overlapping_events, is_overlapping};
pub use time::{DateRange, convert_event_to_date_range, parse_date, parse_date_time, parse_time};
