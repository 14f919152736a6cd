//! Event commands: list, add, edit, delete.

use std::collections::HashSet;

use calplan_core::{
    CATEGORIES, Event, EventDraft, OutputFormat, OutputFormatter, RepeatInfo, RepeatType,
    ViewMode, is_due,
};
use calplan_store::{EventService, EventStore, SaveOutcome, StoreError};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::cli::{EventFields, ListArgs};
use crate::error::{CliError, CliResult};

impl EventFields {
    /// Overlays the given fields on `base`. Fields left out keep their value.
    pub fn apply(self, mut base: EventDraft) -> CliResult<EventDraft> {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(date) = self.date {
            base.date = date;
        }
        if let Some(start) = self.start {
            base.start_time = start;
        }
        if let Some(end) = self.end {
            base.end_time = end;
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        if let Some(location) = self.location {
            base.location = location;
        }
        if let Some(category) = self.category {
            if !category.is_empty() && !CATEGORIES.contains(&category.as_str()) {
                return Err(CliError::InvalidArgument(format!(
                    "unknown category '{}', expected one of {}",
                    category,
                    CATEGORIES.join(", ")
                )));
            }
            base.category = category;
        }
        if let Some(minutes) = self.notify {
            base.notification_time = minutes;
        }

        match (self.repeat, self.interval) {
            (Some(RepeatType::None), _) => base.repeat = RepeatInfo::default(),
            (Some(kind), interval) => {
                base.repeat = RepeatInfo::new(kind, interval.unwrap_or(base.repeat.interval).max(1));
            }
            (None, Some(interval)) => {
                if !base.repeat.is_repeating() {
                    return Err(CliError::InvalidArgument(
                        "--interval needs --repeat for an event that does not repeat".to_string(),
                    ));
                }
                base.repeat.interval = interval.max(1);
            }
            (None, None) => {}
        }

        Ok(base)
    }
}

/// Lists events matching the search inside the view window.
///
/// Events whose reminder is due at `now` carry the notified marker.
pub fn list<S: EventStore>(
    service: &EventService<S>,
    args: &ListArgs,
    default_view: ViewMode,
    now: NaiveDateTime,
    formatter: &OutputFormatter,
    format: OutputFormat,
) -> CliResult<String> {
    let reference = args.window.date.unwrap_or(now.date());
    let view = args.window.view.unwrap_or(default_view);
    let events = service.filtered(&args.search, reference, view);
    debug!(
        count = events.len(),
        view = %view,
        reference = %reference,
        "Filtered events"
    );

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&formatter.format_json(&events))?),
        OutputFormat::Text => {
            let reminding: HashSet<String> = events
                .iter()
                .filter(|event| is_due(event, now))
                .map(|event| event.id.clone())
                .collect();
            Ok(formatter.format_event_list(&events, &reminding))
        }
    }
}

/// Adds an event.
pub fn add<S: EventStore>(
    service: &mut EventService<S>,
    fields: EventFields,
    force: bool,
    formatter: &OutputFormatter,
    format: OutputFormat,
) -> CliResult<String> {
    let draft = fields.apply(EventDraft::new("", "", "", ""))?;
    let event = saved(service.save(draft, None, force)?)?;
    render_saved(&event, "일정이 추가되었습니다.", formatter, format)
}

/// Edits event `id`; fields not given keep their stored value.
pub fn edit<S: EventStore>(
    service: &mut EventService<S>,
    id: &str,
    fields: EventFields,
    force: bool,
    formatter: &OutputFormatter,
    format: OutputFormat,
) -> CliResult<String> {
    let current = service
        .store()
        .get(id)
        .ok_or_else(|| StoreError::not_found(id))?
        .to_draft();
    let draft = fields.apply(current)?;
    let event = saved(service.save(draft, Some(id), force)?)?;
    render_saved(&event, "일정이 수정되었습니다.", formatter, format)
}

/// Deletes event `id`.
pub fn delete<S: EventStore>(
    service: &mut EventService<S>,
    id: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let event = service.delete(id)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&event)?),
        OutputFormat::Text => Ok(format!("일정이 삭제되었습니다. [{}] {}", event.id, event.title)),
    }
}

/// The overlap warning shown when a save is blocked.
pub fn render_conflicts(conflicts: &[Event]) -> String {
    let mut lines = vec![
        "일정 겹침 경고".to_string(),
        "다음 일정과 겹칩니다:".to_string(),
    ];
    lines.extend(conflicts.iter().map(|e| {
        format!(
            "- {} ({} {}-{})",
            e.title, e.date, e.start_time, e.end_time
        )
    }));
    lines.join("\n")
}

fn saved(outcome: SaveOutcome) -> CliResult<Event> {
    match outcome {
        SaveOutcome::Saved(event) => Ok(event),
        SaveOutcome::Conflict(conflicts) => {
            eprintln!("{}", render_conflicts(&conflicts));
            Err(CliError::Conflict {
                count: conflicts.len(),
            })
        }
    }
}

fn render_saved(
    event: &Event,
    message: &str,
    formatter: &OutputFormatter,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(event)?),
        OutputFormat::Text => Ok(format!("{}\n\n{}", message, formatter.format_event(event, false))),
    }
}
